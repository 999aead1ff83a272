//! Member references (fields and methods).

use crate::catalog::TypeCatalog;
use crate::def::DefId;
use crate::relations::direct_supertypes;
use crate::types::{GenericParameter, TypeRef};
use jdecomp_common::limits::MAX_SUPERTYPE_DEPTH;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// A reference to a field or method, as it appears at a use site.
///
/// `declaring_type` is the owner named by the reference, which may be a
/// subclass of the class that actually declares the member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberReference {
    pub name: Arc<str>,
    pub declaring_type: TypeRef,
    pub kind: MemberKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field {
        field_type: TypeRef,
    },
    Method {
        parameters: Vec<TypeRef>,
        return_type: TypeRef,
        generic_parameters: Vec<GenericParameter>,
    },
}

impl MemberReference {
    pub fn field(name: &str, declaring_type: TypeRef, field_type: TypeRef) -> Self {
        Self {
            name: Arc::from(name),
            declaring_type,
            kind: MemberKind::Field { field_type },
        }
    }

    pub fn method(
        name: &str,
        declaring_type: TypeRef,
        parameters: Vec<TypeRef>,
        return_type: TypeRef,
    ) -> Self {
        Self {
            name: Arc::from(name),
            declaring_type,
            kind: MemberKind::Method {
                parameters,
                return_type,
                generic_parameters: Vec::new(),
            },
        }
    }

    /// Attach method-level generic parameters. No-op for fields.
    pub fn with_generic_parameters(mut self, params: Vec<GenericParameter>) -> Self {
        if let MemberKind::Method {
            generic_parameters, ..
        } = &mut self.kind
        {
            *generic_parameters = params;
        }
        self
    }

    pub const fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field { .. })
    }

    pub const fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }

    pub fn is_constructor(&self) -> bool {
        self.is_method() && self.name.as_ref() == "<init>"
    }

    pub fn field_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            MemberKind::Field { field_type } => Some(field_type),
            MemberKind::Method { .. } => None,
        }
    }

    pub fn return_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            MemberKind::Method { return_type, .. } => Some(return_type),
            MemberKind::Field { .. } => None,
        }
    }

    pub fn parameters(&self) -> &[TypeRef] {
        match &self.kind {
            MemberKind::Method { parameters, .. } => parameters,
            MemberKind::Field { .. } => &[],
        }
    }

    /// The `DefId` of the declaring class, if it is a class type.
    pub fn declaring_def(&self) -> Option<DefId> {
        self.declaring_type.as_class().map(|c| c.def)
    }

    /// True if the declaring type or the member's signature mentions a
    /// generic parameter, or the member is a generic method.
    pub fn contains_generic_parameters(&self) -> bool {
        if self.declaring_type.contains_generic_parameters() {
            return true;
        }
        match &self.kind {
            MemberKind::Field { field_type } => field_type.contains_generic_parameters(),
            MemberKind::Method {
                parameters,
                return_type,
                generic_parameters,
            } => {
                !generic_parameters.is_empty()
                    || return_type.contains_generic_parameters()
                    || parameters.iter().any(TypeRef::contains_generic_parameters)
            }
        }
    }
}

/// Find the declaration a member reference points at, searching the named
/// owner first and then its supertypes breadth-first.
///
/// Fields match by name; methods match by name and arity.
pub fn resolve_member(
    catalog: &dyn TypeCatalog,
    member: &MemberReference,
) -> Option<Arc<MemberReference>> {
    let start = member.declaring_type.clone();
    let mut queue = std::collections::VecDeque::from([(start, 0u32)]);
    let mut seen = FxHashSet::default();

    while let Some((current, depth)) = queue.pop_front() {
        let Some(class) = current.as_class() else {
            continue;
        };
        if !seen.insert(class.def) || depth > MAX_SUPERTYPE_DEPTH {
            continue;
        }
        let Some(definition) = catalog.definition(class.def) else {
            continue;
        };
        let found = definition
            .declared_members(&member.name)
            .iter()
            .find(|candidate| {
                candidate.is_field() == member.is_field()
                    && candidate.parameters().len() == member.parameters().len()
            });
        if let Some(found) = found {
            return Some(Arc::clone(found));
        }
        for supertype in direct_supertypes(catalog, &current) {
            queue.push_back((supertype, depth + 1));
        }
    }
    None
}

#[cfg(test)]
#[path = "../tests/members_tests.rs"]
mod tests;
