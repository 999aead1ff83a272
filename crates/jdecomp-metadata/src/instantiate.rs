//! Generic type instantiation and erasure.
//!
//! `substitute` replaces type variables according to a `TypeSubstitution`;
//! `erase` computes the JVM erasure of a type; `instantiate_member_type`
//! specializes a member's signature type for a particular receiver.

use crate::catalog::TypeCatalog;
use crate::def::DefId;
use crate::relations::as_super;
use crate::types::{ClassType, TypeRef, TypeVariable, WildcardBound};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::trace;

/// A mapping from type variables to the types replacing them.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<TypeVariable, TypeRef>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the substitution induced by a parameterized class type, mapping
    /// each generic parameter of its definition to the matching argument.
    ///
    /// Returns `None` for raw types and for arity mismatches.
    pub fn from_class(catalog: &dyn TypeCatalog, class: &ClassType) -> Option<Self> {
        if class.is_raw() {
            return None;
        }
        let definition = catalog.definition(class.def)?;
        if definition.generic_parameters.len() != class.type_arguments.len() {
            trace!(
                def_id = class.def.0,
                expected = definition.generic_parameters.len(),
                actual = class.type_arguments.len(),
                "TypeSubstitution::from_class - arity mismatch"
            );
            return None;
        }
        let mut subst = Self::new();
        for (var, arg) in definition
            .type_variables(class.def)
            .into_iter()
            .zip(class.type_arguments.iter())
        {
            subst.insert(var, arg.clone());
        }
        Some(subst)
    }

    pub fn insert(&mut self, var: TypeVariable, ty: TypeRef) {
        self.map.insert(var, ty);
    }

    pub fn get(&self, var: &TypeVariable) -> Option<&TypeRef> {
        self.map.get(var)
    }

    pub fn contains(&self, var: &TypeVariable) -> bool {
        self.map.contains_key(var)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}

/// Replace every type variable in `ty` that `subst` maps.
pub fn substitute(ty: &TypeRef, subst: &TypeSubstitution) -> TypeRef {
    if subst.is_empty() {
        return ty.clone();
    }
    match ty {
        TypeRef::TypeVariable(var) => subst.get(var).cloned().unwrap_or_else(|| ty.clone()),
        TypeRef::Class(class) => {
            if class.is_raw() {
                return ty.clone();
            }
            let args: Vec<TypeRef> = class
                .type_arguments
                .iter()
                .map(|arg| substitute(arg, subst))
                .collect();
            TypeRef::generic(class.def, args)
        }
        TypeRef::Array(element) => TypeRef::array(substitute(element, subst)),
        TypeRef::Wildcard(WildcardBound::Extends(bound)) => {
            TypeRef::Wildcard(WildcardBound::Extends(Arc::new(substitute(bound, subst))))
        }
        TypeRef::Wildcard(WildcardBound::Super(bound)) => {
            TypeRef::Wildcard(WildcardBound::Super(Arc::new(substitute(bound, subst))))
        }
        TypeRef::Wildcard(WildcardBound::Unbounded) | TypeRef::Primitive(_) | TypeRef::Null => {
            ty.clone()
        }
    }
}

/// JVM erasure: drop type arguments, replace type variables and wildcards by
/// their (erased) upper bound.
pub fn erase(catalog: &dyn TypeCatalog, ty: &TypeRef) -> TypeRef {
    match ty {
        TypeRef::Class(class) => TypeRef::class(class.def),
        TypeRef::Array(element) => TypeRef::array(erase(catalog, element)),
        TypeRef::TypeVariable(_) | TypeRef::Wildcard(_) => match ty.upper_bound() {
            Some(bound) => erase(catalog, bound),
            None => catalog.well_known().object_type(),
        },
        TypeRef::Primitive(_) | TypeRef::Null => ty.clone(),
    }
}

/// Specialize a member's signature type for access through `receiver`.
///
/// When the receiver's view of `declaring` is parameterized, the declaring
/// class's generic parameters are substituted; when it is raw, the member
/// type is erased. Receivers that are not subtypes of `declaring` leave the
/// type unchanged.
pub fn instantiate_member_type(
    catalog: &dyn TypeCatalog,
    member_type: &TypeRef,
    declaring: DefId,
    receiver: &TypeRef,
) -> TypeRef {
    let Some(TypeRef::Class(view)) = as_super(catalog, receiver, declaring) else {
        return member_type.clone();
    };
    if let Some(subst) = TypeSubstitution::from_class(catalog, &view) {
        return substitute(member_type, &subst);
    }
    let is_generic = catalog
        .definition(declaring)
        .is_some_and(|d| d.is_generic_definition());
    if view.is_raw() && is_generic {
        return erase(catalog, member_type);
    }
    member_type.clone()
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod tests;
