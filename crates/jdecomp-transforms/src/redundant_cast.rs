//! Redundant cast detection and removal.
//!
//! A cast is redundant when dropping it changes neither the value nor the
//! meaning of the program in the position it occupies. Only a few positions
//! are judged; everywhere else (method arguments, member targets) a cast may
//! select an overload or a member, and is kept.

use crate::resolver::{JavaResolver, ResolveResult};
use jdecomp_ast::{AssignmentOperatorType, NodeArena, NodeIndex, NodeKind, PrimitiveValue, Role, StructuralError};
use jdecomp_metadata::{JvmType, TypeRef, get_conversion_type, underlying_primitive};

/// True if removing `cast` leaves the program's behavior unchanged.
pub fn is_cast_redundant(resolver: &JavaResolver<'_>, arena: &NodeArena, cast: NodeIndex) -> bool {
    if arena.kind(cast) != NodeKind::Cast {
        return false;
    }
    let (Ok(type_node), Ok(operand)) = (
        arena.child_by_role(cast, Role::TYPE),
        arena.child_by_role(cast, Role::EXPRESSION),
    ) else {
        return false;
    };
    let Some(cast_type) = resolver.resolve_type(arena, type_node) else {
        return false;
    };
    let Some(source) = resolver.resolve(arena, operand) else {
        return false;
    };
    if source.ty == cast_type {
        return true;
    }

    let parent = arena.parent(cast);
    let Some(role) = arena.role(cast) else {
        return false;
    };
    match arena.kind(parent) {
        NodeKind::Cast if role == Role::EXPRESSION => {
            let outer = arena
                .child_by_role(parent, Role::TYPE)
                .ok()
                .and_then(|ty| resolver.resolve_type(arena, ty));
            outer.is_some_and(|outer| is_nested_cast_redundant(&source, &cast_type, &outer))
        }
        NodeKind::BinaryOperator if role == Role::LEFT || role == Role::RIGHT => {
            let other_role = if role == Role::LEFT { Role::RIGHT } else { Role::LEFT };
            let operator = arena.binary_operator(parent);
            let other = arena
                .child_by_role(parent, other_role)
                .ok()
                .and_then(|other| resolver.resolve_type(arena, other));
            match (operator, other) {
                (Some(operator), Some(other))
                    if !operator.is_shift()
                        && (operator.is_arithmetic() || operator.is_comparison() || operator.is_bitwise()) =>
                {
                    let catalog = resolver.context().catalog();
                    underlying_primitive(catalog, &other)
                        .is_some_and(|other| is_operand_cast_redundant(&source, &cast_type, other))
                }
                _ => false,
            }
        }
        NodeKind::Assignment
            if role == Role::RIGHT
                && arena.assignment_operator(parent) == Some(AssignmentOperatorType::Assign) =>
        {
            let target = arena
                .child_by_role(parent, Role::LEFT)
                .ok()
                .and_then(|left| resolver.resolve_type(arena, left));
            target.is_some_and(|target| is_assigned_cast_redundant(resolver, &source, &cast_type, &target))
        }
        NodeKind::VariableDeclaration if role == Role::INITIALIZER => {
            let target = arena
                .child_by_role(parent, Role::TYPE)
                .ok()
                .and_then(|ty| resolver.resolve_type(arena, ty));
            target.is_some_and(|target| is_assigned_cast_redundant(resolver, &source, &cast_type, &target))
        }
        NodeKind::ReturnStatement => {
            let target = resolver
                .context()
                .current_method
                .as_ref()
                .and_then(|m| m.return_type().cloned());
            target.is_some_and(|target| is_assigned_cast_redundant(resolver, &source, &cast_type, &target))
        }
        _ => false,
    }
}

/// Remove `cast`, putting its operand in its place. Returns the operand.
///
/// A detached cast just releases its operand.
pub fn remove_cast(arena: &mut NodeArena, cast: NodeIndex) -> Result<NodeIndex, StructuralError> {
    let operand = arena.child_by_role(cast, Role::EXPRESSION)?;
    if arena.parent(cast).is_none() {
        arena.remove(operand)?;
        return Ok(operand);
    }
    arena.replace_with(cast, |arena, _cast| {
        arena.remove(operand)?;
        Ok(operand)
    })
}

// =============================================================================
// Rules
// =============================================================================

/// `(T) s` produces the same value as `s` itself would once converted to `T`.
fn is_value_preserving(source: JvmType, target: JvmType, constant: Option<&PrimitiveValue>) -> bool {
    if source == target {
        return true;
    }
    if constant.is_some_and(|c| c.fits_in(target)) {
        return true;
    }
    if source.is_integral() && target.is_integral() && source.widens_to(target) {
        return true;
    }
    match target {
        JvmType::Double => matches!(
            source,
            JvmType::Byte | JvmType::Short | JvmType::Character | JvmType::Integer | JvmType::Float
        ),
        JvmType::Float => matches!(source, JvmType::Byte | JvmType::Short | JvmType::Character),
        _ => false,
    }
}

/// `(U) (T) s`: the inner cast adds nothing if it is value preserving, or if
/// every type is integral and `T` keeps at least the bits `U` keeps.
fn is_nested_cast_redundant(source: &ResolveResult, inner: &TypeRef, outer: &TypeRef) -> bool {
    let (Some(s), Some(t), Some(u)) = (
        primitive_of(&source.ty),
        primitive_of(inner),
        primitive_of(outer),
    ) else {
        return false;
    };
    if is_value_preserving(s, t, source.constant.as_ref()) {
        return true;
    }
    s.is_integral() && t.is_integral() && u.is_integral() && t.bit_width() >= u.bit_width()
}

/// `(T) s op other`: binary promotion against `other` must come out the same.
fn is_operand_cast_redundant(source: &ResolveResult, cast_type: &TypeRef, other: JvmType) -> bool {
    let (Some(s), Some(t)) = (primitive_of(&source.ty), primitive_of(cast_type)) else {
        return false;
    };
    if !s.is_numeric() || !t.is_numeric() || !other.is_numeric() {
        return false;
    }
    is_value_preserving(s, t, source.constant.as_ref())
        && JvmType::binary_promotion(t, other) == JvmType::binary_promotion(s, other)
}

/// `target = (T) s`: the assignment must stay legal and keep its value.
fn is_assigned_cast_redundant(
    resolver: &JavaResolver<'_>,
    source: &ResolveResult,
    cast_type: &TypeRef,
    target: &TypeRef,
) -> bool {
    let catalog = resolver.context().catalog();
    match (primitive_of(&source.ty), primitive_of(cast_type)) {
        (Some(s), Some(t)) => {
            if !is_value_preserving(s, t, source.constant.as_ref()) {
                return false;
            }
            if get_conversion_type(catalog, target, &source.ty).is_implicit() {
                return true;
            }
            // byte b = 5: int constants narrow implicitly when they fit.
            let narrow_target = matches!(
                target.primitive_kind(),
                Some(JvmType::Byte | JvmType::Short | JvmType::Character)
            );
            narrow_target
                && source.constant.as_ref().is_some_and(|c| {
                    matches!(
                        c,
                        PrimitiveValue::Byte(_)
                            | PrimitiveValue::Short(_)
                            | PrimitiveValue::Char(_)
                            | PrimitiveValue::Int(_)
                    ) && target.primitive_kind().is_some_and(|k| c.fits_in(k))
                })
        }
        (None, None) => {
            get_conversion_type(catalog, cast_type, &source.ty).is_implicit()
                && get_conversion_type(catalog, target, &source.ty).is_implicit()
        }
        _ => false,
    }
}

fn primitive_of(ty: &TypeRef) -> Option<JvmType> {
    ty.primitive_kind().filter(|k| k.is_primitive())
}

#[cfg(test)]
#[path = "../tests/redundant_cast_tests.rs"]
mod tests;
