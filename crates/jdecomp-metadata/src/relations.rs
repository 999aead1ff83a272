//! Subtype relation and supertype/subtype views.
//!
//! - `is_sub_type(t, s)`: JLS 4.10 subtyping over class, array, variable and
//!   wildcard types (raw types are treated as unchecked-compatible).
//! - `as_super(t, d)`: the supertype of `t` whose class is `d`, with type
//!   arguments expressed in terms of `t`'s arguments.
//! - `as_sub_type(t, d)`: the instantiation of `d` that is a subtype of `t`,
//!   inferring `d`'s arguments from `t` where possible.
//!
//! Every walk is bounded by `MAX_SUPERTYPE_DEPTH`; on overflow the query
//! answers "no".

use crate::catalog::TypeCatalog;
use crate::def::DefId;
use crate::instantiate::{TypeSubstitution, erase, substitute};
use crate::types::{TypeRef, WildcardBound};
use jdecomp_common::limits::MAX_SUPERTYPE_DEPTH;
use tracing::trace;

/// The immediate supertypes of `ty`, instantiated for its type arguments.
///
/// Raw receivers see erased supertypes. Classes and interfaces without an
/// explicit superclass report `java.lang.Object`.
pub fn direct_supertypes(catalog: &dyn TypeCatalog, ty: &TypeRef) -> Vec<TypeRef> {
    let well_known = catalog.well_known();
    match ty {
        TypeRef::Class(class) => {
            if class.def == well_known.object {
                return Vec::new();
            }
            let Some(definition) = catalog.definition(class.def) else {
                return Vec::new();
            };
            let mut supers: Vec<TypeRef> = definition
                .base_type
                .iter()
                .chain(definition.interfaces.iter())
                .cloned()
                .collect();
            if definition.base_type.is_none() {
                supers.insert(0, well_known.object_type());
            }
            if definition.is_generic_definition() {
                if class.is_raw() {
                    supers = supers.iter().map(|s| erase(catalog, s)).collect();
                } else if let Some(subst) = TypeSubstitution::from_class(catalog, class) {
                    supers = supers.iter().map(|s| substitute(s, &subst)).collect();
                }
            }
            supers
        }
        TypeRef::TypeVariable(_) | TypeRef::Wildcard(_) => vec![
            ty.upper_bound()
                .cloned()
                .unwrap_or_else(|| well_known.object_type()),
        ],
        TypeRef::Array(_) => vec![
            well_known.object_type(),
            TypeRef::class(well_known.cloneable),
            TypeRef::class(well_known.serializable),
        ],
        TypeRef::Primitive(_) | TypeRef::Null => Vec::new(),
    }
}

/// Is `ty` a subtype of `base`?
pub fn is_sub_type(catalog: &dyn TypeCatalog, ty: &TypeRef, base: &TypeRef) -> bool {
    is_sub_type_inner(catalog, ty, base, 0)
}

fn is_sub_type_inner(catalog: &dyn TypeCatalog, ty: &TypeRef, base: &TypeRef, depth: u32) -> bool {
    if depth > MAX_SUPERTYPE_DEPTH {
        trace!(depth, "is_sub_type - depth limit exceeded");
        return false;
    }
    if ty == base {
        return true;
    }
    let well_known = catalog.well_known();

    match (ty, base) {
        (TypeRef::Primitive(_), _) | (_, TypeRef::Primitive(_)) => false,
        (TypeRef::Null, _) => true,
        (_, TypeRef::Null) => false,
        (_, TypeRef::Wildcard(bound)) => match bound {
            WildcardBound::Unbounded => true,
            WildcardBound::Extends(upper) => is_sub_type_inner(catalog, ty, upper, depth + 1),
            WildcardBound::Super(lower) => is_sub_type_inner(catalog, lower, ty, depth + 1),
        },
        (TypeRef::TypeVariable(_) | TypeRef::Wildcard(_), _) => {
            let upper = ty
                .upper_bound()
                .cloned()
                .unwrap_or_else(|| well_known.object_type());
            is_sub_type_inner(catalog, &upper, base, depth + 1)
        }
        (_, TypeRef::TypeVariable(_)) => false,
        (_, TypeRef::Class(b)) if b.def == well_known.object => true,
        (TypeRef::Array(element), TypeRef::Array(base_element)) => {
            if element.is_primitive() || base_element.is_primitive() {
                element == base_element
            } else {
                is_sub_type_inner(catalog, element, base_element, depth + 1)
            }
        }
        (TypeRef::Array(_), TypeRef::Class(b)) => {
            b.def == well_known.cloneable || b.def == well_known.serializable
        }
        (TypeRef::Class(_), TypeRef::Array(_)) => false,
        (TypeRef::Class(_), TypeRef::Class(b)) => {
            let Some(TypeRef::Class(view)) = as_super_inner(catalog, ty, b.def, depth + 1) else {
                return false;
            };
            if b.is_raw() || view.is_raw() {
                return true;
            }
            view.type_arguments.len() == b.type_arguments.len()
                && b.type_arguments
                    .iter()
                    .zip(view.type_arguments.iter())
                    .all(|(formal, actual)| contains_type_argument(catalog, formal, actual, depth))
        }
    }
}

/// Type argument containment (JLS 4.5.1): does `formal` contain `actual`?
fn contains_type_argument(
    catalog: &dyn TypeCatalog,
    formal: &TypeRef,
    actual: &TypeRef,
    depth: u32,
) -> bool {
    if formal == actual {
        return true;
    }
    match formal {
        TypeRef::Wildcard(WildcardBound::Unbounded) => true,
        TypeRef::Wildcard(WildcardBound::Extends(upper)) => match actual {
            TypeRef::Wildcard(WildcardBound::Extends(actual_upper)) => {
                is_sub_type_inner(catalog, actual_upper, upper, depth + 1)
            }
            TypeRef::Wildcard(_) => is_sub_type_inner(
                catalog,
                &catalog.well_known().object_type(),
                upper,
                depth + 1,
            ),
            _ => is_sub_type_inner(catalog, actual, upper, depth + 1),
        },
        TypeRef::Wildcard(WildcardBound::Super(lower)) => match actual {
            TypeRef::Wildcard(WildcardBound::Super(actual_lower)) => {
                is_sub_type_inner(catalog, lower, actual_lower, depth + 1)
            }
            TypeRef::Wildcard(_) => false,
            _ => is_sub_type_inner(catalog, lower, actual, depth + 1),
        },
        _ => false,
    }
}

/// The supertype of `ty` whose class is `def`, or `None` if `ty` does not
/// derive from `def`.
pub fn as_super(catalog: &dyn TypeCatalog, ty: &TypeRef, def: DefId) -> Option<TypeRef> {
    as_super_inner(catalog, ty, def, 0)
}

fn as_super_inner(
    catalog: &dyn TypeCatalog,
    ty: &TypeRef,
    def: DefId,
    depth: u32,
) -> Option<TypeRef> {
    if depth > MAX_SUPERTYPE_DEPTH {
        trace!(depth, def_id = def.0, "as_super - depth limit exceeded");
        return None;
    }
    let well_known = catalog.well_known();
    match ty {
        TypeRef::Class(class) => {
            if class.def == def {
                return Some(ty.clone());
            }
            direct_supertypes(catalog, ty)
                .iter()
                .find_map(|s| as_super_inner(catalog, s, def, depth + 1))
        }
        TypeRef::TypeVariable(_) | TypeRef::Wildcard(_) => {
            let upper = ty
                .upper_bound()
                .cloned()
                .unwrap_or_else(|| well_known.object_type());
            as_super_inner(catalog, &upper, def, depth + 1)
        }
        TypeRef::Array(_) => {
            let array_super = def == well_known.object
                || def == well_known.cloneable
                || def == well_known.serializable;
            array_super.then(|| TypeRef::class(def))
        }
        TypeRef::Primitive(_) | TypeRef::Null => None,
    }
}

/// The instantiation of `sub_def` that is a subtype of `ty`.
///
/// Type arguments of `sub_def` are inferred by matching `sub_def`'s view of
/// `ty`'s class against `ty`'s arguments. Parameters left open become
/// unbounded wildcards; a raw `ty` yields the raw `sub_def`. Returns `None`
/// when `ty` is not a class type, when the inference is contradictory, or
/// when the result is not actually a subtype of `ty`.
pub fn as_sub_type(catalog: &dyn TypeCatalog, ty: &TypeRef, sub_def: DefId) -> Option<TypeRef> {
    let TypeRef::Class(target) = ty else {
        return None;
    };
    if target.def == sub_def {
        return Some(ty.clone());
    }
    let definition = catalog.definition(sub_def)?;
    if !definition.is_generic_definition() {
        let candidate = TypeRef::class(sub_def);
        return is_sub_type(catalog, &candidate, ty).then_some(candidate);
    }

    let self_type = definition.self_type(sub_def);
    let Some(TypeRef::Class(base_view)) = as_super(catalog, &self_type, target.def) else {
        return None;
    };

    let target_is_raw = target.is_raw()
        && catalog
            .definition(target.def)
            .is_some_and(|d| d.is_generic_definition());

    let candidate = if target_is_raw {
        TypeRef::class(sub_def)
    } else {
        let mut mapping = TypeSubstitution::new();
        if !base_view.is_raw() && !target.is_raw() {
            for (from, to) in base_view
                .type_arguments
                .iter()
                .zip(target.type_arguments.iter())
            {
                if !adapt(from, to, &mut mapping, sub_def) {
                    trace!(
                        sub_def = sub_def.0,
                        "as_sub_type - conflicting type argument inference"
                    );
                    return None;
                }
            }
        }
        let args = definition
            .type_variables(sub_def)
            .into_iter()
            .map(|var| {
                mapping
                    .get(&var)
                    .cloned()
                    .unwrap_or_else(TypeRef::unbounded_wildcard)
            })
            .collect();
        TypeRef::generic(sub_def, args)
    };

    is_sub_type(catalog, &candidate, ty).then_some(candidate)
}

/// Record the bindings that make `from` (written in `owner`'s type
/// variables) equal to `to`. Fails only on contradictory bindings.
fn adapt(from: &TypeRef, to: &TypeRef, mapping: &mut TypeSubstitution, owner: DefId) -> bool {
    match (from, to) {
        (TypeRef::TypeVariable(var), _) if var.owner == Some(owner) => {
            if let Some(existing) = mapping.get(var) {
                return existing == to;
            }
            mapping.insert(var.clone(), to.clone());
            true
        }
        (TypeRef::Class(f), TypeRef::Class(t)) if f.def == t.def => {
            if f.is_raw() || t.is_raw() {
                return true;
            }
            f.type_arguments
                .iter()
                .zip(t.type_arguments.iter())
                .all(|(a, b)| adapt(a, b, mapping, owner))
        }
        (TypeRef::Array(f), TypeRef::Array(t)) => adapt(f, t, mapping, owner),
        (TypeRef::Wildcard(WildcardBound::Extends(f)), TypeRef::Wildcard(WildcardBound::Extends(t)))
        | (TypeRef::Wildcard(WildcardBound::Super(f)), TypeRef::Wildcard(WildcardBound::Super(t))) => {
            adapt(f, t, mapping, owner)
        }
        _ => true,
    }
}

#[cfg(test)]
#[path = "../tests/relations_tests.rs"]
mod tests;
