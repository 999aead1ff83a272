//! Conversion insertion.
//!
//! Bytecode is looser about types than Java source: `boolean` and `int` share
//! a representation, and a field access only needs the receiver to be the
//! declaring class at run time. This pass rewrites the spots where the
//! decompiled tree would not compile as Java:
//!
//! - `(int) flag` becomes `flag ? 1 : 0`, and `(boolean) i` becomes `i != 0`
//! - `flag = i` and `count = flag` get the same treatment, and assignments
//!   that need a narrowing conversion get an explicit cast
//! - `target.member` where `target` does not statically have the declaring
//!   type gets `target` cast to it
//! - casts with no legal conversion go through `Object`
//!
//! Children are rewritten before their parent. A rewrite that produces a new
//! node re-runs the pass on that node.

use crate::ast_builder::ConvertTypeOptions;
use crate::context::DecompilerContext;
use crate::error::TransformResult;
use crate::pipeline::AstTransform;
use crate::redundant_cast::{is_cast_redundant, remove_cast};
use crate::resolver::JavaResolver;
use jdecomp_ast::{
    AssignmentOperatorType, AstVisitor, BinaryOperatorType, NodeArena, NodeIndex, Pattern, PrimitiveValue, Role,
    accept, leaf_visits, walk_children,
};
use jdecomp_metadata::{
    ConversionType, JvmType, TypeRef, as_sub_type, erase, get_conversion_type, is_sub_type, underlying_primitive,
};
use std::sync::Arc;
use tracing::{debug, trace, warn};

pub struct InsertNecessaryConversionsTransform<'a> {
    context: &'a DecompilerContext,
}

impl<'a> InsertNecessaryConversionsTransform<'a> {
    pub fn new(context: &'a DecompilerContext) -> Self {
        Self { context }
    }
}

impl AstTransform for InsertNecessaryConversionsTransform<'_> {
    fn name(&self) -> &'static str {
        "InsertNecessaryConversions"
    }

    fn run(&mut self, arena: &mut NodeArena, root: NodeIndex) -> TransformResult {
        let mut visitor = ConversionVisitor {
            arena,
            context: self.context,
            max_depth: self.context.settings.max_transform_depth,
        };
        accept(&mut visitor, root, 0)
    }
}

struct ConversionVisitor<'a> {
    arena: &'a mut NodeArena,
    context: &'a DecompilerContext,
    max_depth: u32,
}

impl ConversionVisitor<'_> {
    fn walk(&mut self, node: NodeIndex, depth: u32) -> TransformResult {
        if depth >= self.max_depth {
            warn!(node = node.0, depth, "conversion pass reached its depth limit, not descending");
            return Ok(());
        }
        walk_children(self, node, depth + 1)
    }

    fn reenter(&mut self, node: NodeIndex, depth: u32) -> TransformResult {
        if depth >= self.max_depth {
            warn!(node = node.0, depth, "conversion pass reached its depth limit, not re-entering");
            return Ok(());
        }
        accept(self, node, depth + 1)
    }

    // =========================================================================
    // Casts
    // =========================================================================

    fn convert_cast(&mut self, cast: NodeIndex, depth: u32) -> TransformResult {
        let context = self.context;
        let catalog = context.catalog();
        let resolver = JavaResolver::new(context);

        let type_node = self.arena.child_by_role(cast, Role::TYPE)?;
        let operand = self.arena.child_by_role(cast, Role::EXPRESSION)?;
        let Some(target) = resolver.resolve_type(self.arena, type_node) else {
            trace!(node = cast.0, "cast type unresolved, skipping");
            return Ok(());
        };
        let Some(source) = resolver.resolve_type(self.arena, operand) else {
            trace!(node = cast.0, "cast operand unresolved, skipping");
            return Ok(());
        };
        if get_conversion_type(catalog, &target, &source) != ConversionType::None {
            return Ok(());
        }

        let source_kind = underlying_primitive(catalog, &source);
        let detached = self.arena.parent(cast).is_none();
        if source_kind == Some(JvmType::Boolean) && target.is_numeric() {
            if detached {
                trace!(node = cast.0, "detached cast cannot be replaced, skipping");
                return Ok(());
            }
            let Some(conditional) = self.boolean_to_number(cast, operand, &target)? else {
                return Ok(());
            };
            debug!(node = cast.0, replacement = conditional.0, "boolean cast rewritten as conditional");
            return self.narrow_boolean_result(conditional, &target, depth);
        }

        if target.is_boolean()
            && let Some(kind) = source_kind.filter(|k| k.is_numeric())
        {
            if detached {
                trace!(node = cast.0, "detached cast cannot be replaced, skipping");
                return Ok(());
            }
            let test = self.number_to_boolean(cast, operand, kind)?;
            debug!(node = cast.0, replacement = test.0, "numeric cast to boolean rewritten as comparison");
            return self.reenter(test, depth);
        }

        let Some(builder) = context.ast_builder() else {
            trace!(node = cast.0, "no AST builder, cannot route cast through Object");
            return Ok(());
        };
        let object = catalog.well_known().object_type();
        let inner = self.arena.replace_with(operand, |arena, operand| {
            let ty = builder.convert_type(arena, &object)?;
            arena.add_cast(ty, operand)
        })?;
        debug!(node = cast.0, inner = inner.0, "impossible cast routed through Object");
        self.reenter(inner, depth)
    }

    /// Replace `node` (which owns `value`) with `value ? 1 : 0` in the
    /// literal kind of `target`.
    fn boolean_to_number(
        &mut self,
        node: NodeIndex,
        value: NodeIndex,
        target: &TypeRef,
    ) -> TransformResult<Option<NodeIndex>> {
        let Some(kind) = target.primitive_kind() else {
            return Ok(None);
        };
        let Some((one, zero)) = PrimitiveValue::boolean_literals(kind) else {
            return Ok(None);
        };
        let conditional = self.arena.replace_with(node, |arena, _| {
            if arena.parent(value).is_some() {
                arena.remove(value)?;
            }
            let one = arena.add_primitive(one);
            let zero = arena.add_primitive(zero);
            arena.add_conditional(value, one, zero)
        })?;
        Ok(Some(conditional))
    }

    /// Replace `node` (which owns `value`) with `value != 0`, the zero
    /// literal being of `value`'s own kind.
    fn number_to_boolean(&mut self, node: NodeIndex, value: NodeIndex, kind: JvmType) -> TransformResult<NodeIndex> {
        let zero = PrimitiveValue::zero_of(kind).unwrap_or(PrimitiveValue::Int(0));
        let test = self.arena.replace_with(node, |arena, _| {
            if arena.parent(value).is_some() {
                arena.remove(value)?;
            }
            let zero = arena.add_primitive(zero);
            arena.add_binary(BinaryOperatorType::InEquality, value, zero)
        })?;
        Ok(test)
    }

    /// `b ? 1 : 0` is an `int`; below 32 bits it needs a cast back to the
    /// target type unless that cast would be redundant where it stands.
    fn narrow_boolean_result(&mut self, conditional: NodeIndex, target: &TypeRef, depth: u32) -> TransformResult {
        let narrow = target.primitive_kind().is_some_and(|k| k.bit_width() < 32);
        if !narrow {
            return self.reenter(conditional, depth);
        }
        let context = self.context;
        let Some(builder) = context.ast_builder() else {
            trace!(node = conditional.0, "no AST builder, leaving conditional unnarrowed");
            return Ok(());
        };
        let cast = self.arena.replace_with(conditional, |arena, conditional| {
            let ty = builder.convert_type(arena, target)?;
            arena.add_cast(ty, conditional)
        })?;

        let resolver = JavaResolver::new(context);
        if is_cast_redundant(&resolver, self.arena, cast) {
            let operand = remove_cast(self.arena, cast)?;
            trace!(node = cast.0, "narrowing cast is redundant, removed");
            return self.reenter(operand, depth);
        }
        self.reenter(cast, depth)
    }

    // =========================================================================
    // Assignments
    // =========================================================================

    fn convert_assignment(&mut self, node: NodeIndex, depth: u32) -> TransformResult {
        if self.arena.assignment_operator(node) != Some(AssignmentOperatorType::Assign) {
            return Ok(());
        }
        let context = self.context;
        let catalog = context.catalog();
        let resolver = JavaResolver::new(context);

        let left = self.arena.child_by_role(node, Role::LEFT)?;
        let mut right = self.arena.child_by_role(node, Role::RIGHT)?;
        let (Some(left_type), Some(right_type)) = (
            resolver.resolve_type(self.arena, left),
            resolver.resolve_type(self.arena, right),
        ) else {
            trace!(node = node.0, "assignment side unresolved, skipping");
            return Ok(());
        };

        if get_conversion_type(catalog, &left_type, &right_type).is_explicit() {
            if let Some(builder) = context.ast_builder() {
                let options = ConvertTypeOptions {
                    allow_wildcards: false,
                    ..builder.options()
                };
                right = self.arena.replace_with(right, |arena, value| {
                    let ty = builder.convert_type_with(arena, &left_type, options)?;
                    arena.add_cast(ty, value)
                })?;
                debug!(node = node.0, cast = right.0, "explicit cast inserted on assigned value");
            } else {
                trace!(node = node.0, "no AST builder, assignment left without cast");
            }
        }

        let right_kind = underlying_primitive(catalog, &right_type);
        if right_kind == Some(JvmType::Boolean) && left_type.is_numeric() {
            let Some(conditional) = self.boolean_to_number(right, right, &left_type)? else {
                return Ok(());
            };
            debug!(node = node.0, replacement = conditional.0, "boolean assigned to number rewritten as conditional");
            return self.narrow_boolean_result(conditional, &left_type, depth);
        }
        if left_type.is_boolean()
            && let Some(kind) = right_kind.filter(|k| k.is_numeric())
        {
            let test = self.number_to_boolean(right, right, kind)?;
            debug!(node = node.0, replacement = test.0, "number assigned to boolean rewritten as comparison");
            return self.reenter(test, depth);
        }
        Ok(())
    }

    // =========================================================================
    // Member references
    // =========================================================================

    fn convert_member_reference(&mut self, node: NodeIndex, depth: u32) -> TransformResult {
        let target = self.arena.child_by_role(node, Role::TARGET_EXPRESSION)?;
        if target.is_none() {
            return Ok(());
        }
        let member = self.arena.member_reference(node).cloned().or_else(|| {
            (self.arena.role(node) == Some(Role::TARGET_EXPRESSION))
                .then(|| self.arena.member_reference(self.arena.parent(node)).cloned())
                .flatten()
        });
        let Some(member) = member else {
            trace!(node = node.0, "member reference without metadata, skipping");
            return Ok(());
        };
        let context = self.context;
        let catalog = context.catalog();
        let resolver = JavaResolver::new(context);
        let Some(target_type) = resolver.resolve_type(self.arena, target) else {
            trace!(node = node.0, "member target unresolved, skipping");
            return Ok(());
        };
        if is_sub_type(catalog, &target_type, &member.declaring_type) {
            return Ok(());
        }
        let Some(builder) = context.ast_builder() else {
            trace!(node = node.0, "no AST builder, member target left uncast");
            return Ok(());
        };

        let cast_type = match member.declaring_def() {
            Some(declaring) => as_sub_type(catalog, &target_type, declaring).unwrap_or_else(|| {
                let parameters = catalog
                    .definition(declaring)
                    .map_or(0, |d| d.generic_parameters.len());
                if parameters > 0 && member.contains_generic_parameters() {
                    TypeRef::generic(declaring, vec![TypeRef::unbounded_wildcard(); parameters])
                } else {
                    TypeRef::class(declaring)
                }
            }),
            // Arrays and other declaring types without a definition.
            None => erase(catalog, &member.declaring_type),
        };
        let cast = self.arena.replace_with(target, |arena, target| {
            let ty = builder.convert_type(arena, &cast_type)?;
            arena.add_cast(ty, target)
        })?;
        debug!(node = node.0, cast = cast.0, member = %member.name, "member target cast to declaring type");
        self.reenter(cast, depth)
    }
}

impl AstVisitor for ConversionVisitor<'_> {
    type Input = u32;
    type Output = TransformResult;

    fn arena(&self) -> &NodeArena {
        self.arena
    }

    fn visit_null(&mut self, _depth: u32) -> Self::Output {
        Ok(())
    }

    fn visit_pattern_placeholder(&mut self, node: NodeIndex, _pattern: &Arc<Pattern>, _depth: u32) -> Self::Output {
        trace!(node = node.0, "pattern placeholder left as is");
        Ok(())
    }

    // Leaves and type syntax never need conversions.
    leaf_visits!(
        visit_token,
        visit_primitive,
        visit_null_reference,
        visit_identifier,
        visit_this,
        visit_simple_type,
        visit_wildcard_type,
        visit_composed_type,
    );

    fn visit_member_reference(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)?;
        self.convert_member_reference(node, depth)
    }

    fn visit_invocation(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)
    }

    fn visit_object_creation(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)
    }

    fn visit_cast(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)?;
        self.convert_cast(node, depth)
    }

    fn visit_assignment(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)?;
        self.convert_assignment(node, depth)
    }

    fn visit_conditional(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)
    }

    fn visit_binary_operator(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)
    }

    fn visit_unary_operator(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)
    }

    fn visit_block(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)
    }

    fn visit_expression_statement(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)
    }

    fn visit_return_statement(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)
    }

    fn visit_variable_declaration(&mut self, node: NodeIndex, depth: u32) -> Self::Output {
        self.walk(node, depth)
    }
}

/// Run the conversion pass over the subtree at `root`.
pub fn insert_necessary_conversions(
    context: &DecompilerContext,
    arena: &mut NodeArena,
    root: NodeIndex,
) -> TransformResult {
    InsertNecessaryConversionsTransform::new(context).run(arena, root)
}

#[cfg(test)]
#[path = "../tests/insert_conversions_tests.rs"]
mod tests;
