//! Expression type resolution.
//!
//! `JavaResolver` computes the static type of an expression subtree from the
//! node annotations, the metadata catalog and the current context. It never
//! mutates the tree. A `None` result means the type is unknown; callers treat
//! that as "skip this rewrite".

use crate::context::DecompilerContext;
use jdecomp_ast::{
    AstVisitor, BinaryOperatorType, NodeArena, NodeIndex, NodeKind, Pattern, PrimitiveValue, Role,
    UnaryOperatorType, WildcardKind, accept,
};
use jdecomp_common::limits::MAX_RESOLVE_DEPTH;
use jdecomp_metadata::{
    JvmType, MemberReference, TypeCatalog, TypeRef, box_type, instantiate_member_type, is_sub_type,
    underlying_primitive,
};
use std::sync::Arc;
use tracing::trace;

/// The resolved type of an expression, plus its value when it is a literal.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolveResult {
    pub ty: TypeRef,
    pub constant: Option<PrimitiveValue>,
}

impl ResolveResult {
    pub fn of(ty: TypeRef) -> Self {
        Self { ty, constant: None }
    }

    fn constant(ty: TypeRef, value: PrimitiveValue) -> Self {
        Self {
            ty,
            constant: Some(value),
        }
    }
}

pub struct JavaResolver<'a> {
    context: &'a DecompilerContext,
}

impl<'a> JavaResolver<'a> {
    pub fn new(context: &'a DecompilerContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &'a DecompilerContext {
        self.context
    }

    /// Resolve the type (and constant value) of `node`.
    pub fn resolve(&self, arena: &NodeArena, node: NodeIndex) -> Option<ResolveResult> {
        let mut visitor = ResolveVisitor {
            arena,
            catalog: self.context.catalog(),
            context: self.context,
        };
        accept(&mut visitor, node, 0)
    }

    pub fn resolve_type(&self, arena: &NodeArena, node: NodeIndex) -> Option<TypeRef> {
        self.resolve(arena, node).map(|r| r.ty)
    }
}

// =============================================================================
// Visitor
// =============================================================================

struct ResolveVisitor<'a> {
    arena: &'a NodeArena,
    catalog: &'a dyn TypeCatalog,
    context: &'a DecompilerContext,
}

impl ResolveVisitor<'_> {
    fn child(&mut self, node: NodeIndex, role: Role, depth: u32) -> Option<ResolveResult> {
        if depth >= MAX_RESOLVE_DEPTH {
            trace!(node = node.0, depth, "resolution depth limit reached");
            return None;
        }
        let child = self.arena.child_by_role(node, role).ok()?;
        if child.is_none() {
            return None;
        }
        accept(self, child, depth + 1)
    }

    fn child_type(&mut self, node: NodeIndex, role: Role, depth: u32) -> Option<TypeRef> {
        self.child(node, role, depth).map(|r| r.ty)
    }

    fn primitive(kind: JvmType) -> Option<ResolveResult> {
        Some(ResolveResult::of(TypeRef::Primitive(kind)))
    }

    /// The type a member annotation gives an access through `receiver`.
    fn member_type(&self, member: &MemberReference, receiver: Option<&TypeRef>) -> Option<TypeRef> {
        let ty = member.field_type().or_else(|| member.return_type())?;
        match (member.declaring_def(), receiver) {
            (Some(declaring), Some(receiver)) => {
                Some(instantiate_member_type(self.catalog, ty, declaring, receiver))
            }
            _ => Some(ty.clone()),
        }
    }

    /// Type of a type-syntax node named `name` with no annotation.
    fn lookup_named_type(&self, name: &str) -> Option<TypeRef> {
        if let Some(kind) = primitive_keyword(name) {
            return Some(TypeRef::Primitive(kind));
        }
        self.catalog
            .lookup(name)
            .or_else(|| self.catalog.lookup(&format!("java/lang/{name}")))
            .map(TypeRef::class)
    }

    fn conditional_type(&self, when_true: ResolveResult, when_false: ResolveResult) -> TypeRef {
        let (t, f) = (&when_true.ty, &when_false.ty);
        if t == f {
            return t.clone();
        }
        if t.is_null() || f.is_null() {
            let other = if t.is_null() { f } else { t };
            return match other.primitive_kind() {
                Some(kind) => box_type(self.catalog, kind).unwrap_or_else(|| other.clone()),
                None => other.clone(),
            };
        }

        let object = || self.catalog.well_known().object_type();
        match (
            underlying_primitive(self.catalog, t),
            underlying_primitive(self.catalog, f),
        ) {
            (Some(JvmType::Boolean), Some(JvmType::Boolean)) => return TypeRef::BOOLEAN,
            (Some(a), Some(b)) if a.is_numeric() && b.is_numeric() => {
                if matches!(
                    (a, b),
                    (JvmType::Short, JvmType::Byte) | (JvmType::Byte, JvmType::Short)
                ) {
                    return TypeRef::SHORT;
                }
                if let Some(narrow) = narrow_with_constant(a, &when_false)
                    .or_else(|| narrow_with_constant(b, &when_true))
                {
                    return TypeRef::Primitive(narrow);
                }
                return JvmType::binary_promotion(a, b).map_or_else(object, TypeRef::Primitive);
            }
            _ => {}
        }

        let boxed = |ty: &TypeRef| match ty.primitive_kind() {
            Some(kind) => box_type(self.catalog, kind),
            None => Some(ty.clone()),
        };
        let (Some(t), Some(f)) = (boxed(t), boxed(f)) else {
            return object();
        };
        if is_sub_type(self.catalog, &t, &f) {
            f
        } else if is_sub_type(self.catalog, &f, &t) {
            t
        } else {
            object()
        }
    }

    fn binary_type(&self, operator: BinaryOperatorType, left: &TypeRef, right: &TypeRef) -> Option<TypeRef> {
        if operator.is_comparison() || operator.is_logical() {
            return Some(TypeRef::BOOLEAN);
        }
        if operator == BinaryOperatorType::Add {
            let string = self.catalog.well_known().string_type();
            if *left == string || *right == string {
                return Some(string);
            }
        }
        let l = underlying_primitive(self.catalog, left)?;
        if operator.is_shift() {
            return l.unary_promotion().map(TypeRef::Primitive);
        }
        let r = underlying_primitive(self.catalog, right)?;
        if operator.is_bitwise() && l == JvmType::Boolean && r == JvmType::Boolean {
            return Some(TypeRef::BOOLEAN);
        }
        JvmType::binary_promotion(l, r).map(TypeRef::Primitive)
    }
}

/// `byte`, `short` or `char` when the other arm is an `int` constant that
/// fits in it.
fn narrow_with_constant(kind: JvmType, other: &ResolveResult) -> Option<JvmType> {
    let narrow = matches!(kind, JvmType::Byte | JvmType::Short | JvmType::Character);
    let value = other.constant.as_ref()?;
    (narrow && matches!(value, PrimitiveValue::Int(_)) && value.fits_in(kind)).then_some(kind)
}

fn primitive_keyword(name: &str) -> Option<JvmType> {
    Some(match name {
        "boolean" => JvmType::Boolean,
        "byte" => JvmType::Byte,
        "char" => JvmType::Character,
        "short" => JvmType::Short,
        "int" => JvmType::Integer,
        "long" => JvmType::Long,
        "float" => JvmType::Float,
        "double" => JvmType::Double,
        "void" => JvmType::Void,
        _ => return None,
    })
}

impl AstVisitor for ResolveVisitor<'_> {
    type Input = u32;
    type Output = Option<ResolveResult>;

    fn arena(&self) -> &NodeArena {
        self.arena
    }

    // =========================================================================
    // Special nodes
    // =========================================================================

    fn visit_null(&mut self, _depth: u32) -> Self::Output {
        None
    }

    fn visit_pattern_placeholder(&mut self, _node: NodeIndex, _pattern: &Arc<Pattern>, _depth: u32) -> Self::Output {
        None
    }

    fn visit_token(&mut self, _node: NodeIndex, _depth: u32) -> Self::Output {
        None
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn visit_primitive(&mut self, node: NodeIndex, _depth: u32) -> Self::Output {
        let value = self.arena.primitive_value(node)?;
        let ty = match value.jvm_type() {
            Some(kind) => TypeRef::Primitive(kind),
            None => self.catalog.well_known().string_type(),
        };
        Some(ResolveResult::constant(ty, value.clone()))
    }

    fn visit_null_reference(&mut self, _node: NodeIndex, _depth: u32) -> Self::Output {
        Some(ResolveResult::of(TypeRef::Null))
    }

    fn visit_identifier(&mut self, node: NodeIndex, _depth: u32) -> Self::Output {
        if let Some(ty) = self.arena.type_reference(node) {
            return Some(ResolveResult::of(ty.clone()));
        }
        let member = self.arena.member_reference(node)?;
        member.field_type().cloned().map(ResolveResult::of)
    }

    fn visit_this(&mut self, _node: NodeIndex, _depth: u32) -> Self::Output {
        self.context.current_type.clone().map(ResolveResult::of)
    }

    fn visit_member_reference(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        let arena = self.arena;
        let target = self.child_type(node, Role::TARGET_EXPRESSION, depth);
        let Some(member) = arena.member_reference(node) else {
            // Arrays carry no metadata for their one field.
            let is_array_length = arena.name(node) == Some("length")
                && target.as_ref().is_some_and(TypeRef::is_array);
            return is_array_length.then(|| ResolveResult::of(TypeRef::INT));
        };
        if !member.is_field() {
            return None;
        }
        self.member_type(member, target.as_ref()).map(ResolveResult::of)
    }

    fn visit_invocation(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        let arena = self.arena;
        let target = arena.child_by_role(node, Role::TARGET_EXPRESSION).ok()?;
        let member = arena
            .member_reference(node)
            .or_else(|| arena.member_reference(target))
            .filter(|m| m.is_method())?;
        let receiver = if arena.kind(target) == NodeKind::MemberReference {
            self.child_type(target, Role::TARGET_EXPRESSION, depth + 1)
        } else {
            None
        };
        self.member_type(member, receiver.as_ref()).map(ResolveResult::of)
    }

    fn visit_object_creation(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.child(node, Role::TYPE, depth).map(|r| ResolveResult::of(r.ty))
    }

    fn visit_cast(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.child(node, Role::TYPE, depth).map(|r| ResolveResult::of(r.ty))
    }

    fn visit_assignment(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.child(node, Role::LEFT, depth).map(|r| ResolveResult::of(r.ty))
    }

    fn visit_conditional(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        let when_true = self.child(node, Role::TRUE_EXPRESSION, depth)?;
        let when_false = self.child(node, Role::FALSE_EXPRESSION, depth)?;
        Some(ResolveResult::of(self.conditional_type(when_true, when_false)))
    }

    fn visit_binary_operator(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        let operator = self.arena.binary_operator(node)?;
        if operator == BinaryOperatorType::Any {
            return None;
        }
        if operator.is_comparison() || operator.is_logical() {
            return Self::primitive(JvmType::Boolean);
        }
        let left = self.child_type(node, Role::LEFT, depth)?;
        let right = self.child_type(node, Role::RIGHT, depth)?;
        self.binary_type(operator, &left, &right).map(ResolveResult::of)
    }

    fn visit_unary_operator(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        let operator = self.arena.unary_operator(node)?;
        match operator {
            UnaryOperatorType::Not => Self::primitive(JvmType::Boolean),
            UnaryOperatorType::Minus | UnaryOperatorType::Plus | UnaryOperatorType::BitNot => {
                let operand = self.child_type(node, Role::EXPRESSION, depth)?;
                underlying_primitive(self.catalog, &operand)?
                    .unary_promotion()
                    .and_then(Self::primitive)
            }
            UnaryOperatorType::Increment
            | UnaryOperatorType::Decrement
            | UnaryOperatorType::PostIncrement
            | UnaryOperatorType::PostDecrement => {
                self.child(node, Role::EXPRESSION, depth).map(|r| ResolveResult::of(r.ty))
            }
            UnaryOperatorType::Any => None,
        }
    }

    // =========================================================================
    // Type syntax
    // =========================================================================

    fn visit_simple_type(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        let arena = self.arena;
        if let Some(ty) = arena.type_reference(node) {
            return Some(ResolveResult::of(ty.clone()));
        }
        let ty = self.lookup_named_type(arena.name(node)?)?;
        let arguments = arena.children_by_role(node, Role::TYPE_ARGUMENT).ok()?;
        if arguments.is_empty() || depth >= MAX_RESOLVE_DEPTH {
            return Some(ResolveResult::of(ty));
        }
        let def = ty.as_class()?.def;
        let arguments = arguments
            .iter()
            .map(|&arg| accept(self, arg, depth + 1).map(|r| r.ty))
            .collect::<Option<Vec<_>>>()?;
        Some(ResolveResult::of(TypeRef::generic(def, arguments)))
    }

    fn visit_wildcard_type(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        if let Some(ty) = self.arena.type_reference(node) {
            return Some(ResolveResult::of(ty.clone()));
        }
        let ty = match self.arena.wildcard_kind(node)? {
            WildcardKind::Unbounded => TypeRef::unbounded_wildcard(),
            WildcardKind::Extends => TypeRef::extends_wildcard(self.child_type(node, Role::TYPE, depth)?),
            WildcardKind::Super => TypeRef::super_wildcard(self.child_type(node, Role::TYPE, depth)?),
        };
        Some(ResolveResult::of(ty))
    }

    fn visit_composed_type(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        if let Some(ty) = self.arena.type_reference(node) {
            return Some(ResolveResult::of(ty.clone()));
        }
        let rank = self.arena.array_rank(node)?;
        let ty = (0..rank).fold(self.child_type(node, Role::TYPE, depth)?, |ty, _| TypeRef::array(ty));
        Some(ResolveResult::of(ty))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn visit_block(&mut self, _node: NodeIndex, _depth: u32) -> Self::Output {
        None
    }

    fn visit_expression_statement(&mut self, _node: NodeIndex, _depth: u32) -> Self::Output {
        None
    }

    fn visit_return_statement(&mut self, _node: NodeIndex, _depth: u32) -> Self::Output {
        None
    }

    fn visit_variable_declaration(&mut self, _node: NodeIndex, _depth: u32) -> Self::Output {
        None
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
