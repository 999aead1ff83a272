//! Definition identifiers and stored type definitions.
//!
//! A `DefId` names a class or interface independently of how it was loaded.
//! Type references only carry the `DefId`; the definition itself (name,
//! generic parameters, supertypes, members) lives in a catalog.
//!
//! ## `DefId` Allocation
//!
//! | Catalog | Strategy | Use Case |
//! |---------|----------|----------|
//! | `MetadataCatalog` | Sequential allocation | In-memory catalogs, tests |
//! | external loaders | Loader-defined | Lazily loaded class files |

use crate::members::MemberReference;
use crate::types::{GenericParameter, TypeRef, TypeVariable};
use bitflags::bitflags;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::sync::Arc;

// =============================================================================
// DefId - Definition Identifier
// =============================================================================

/// Identifier of a class, interface, enum or annotation definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

impl DefId {
    /// Sentinel value for invalid `DefId`.
    pub const INVALID: Self = Self(0);

    /// First valid `DefId`.
    pub const FIRST_VALID: u32 = 1;

    /// Check if this `DefId` is valid.
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

impl std::fmt::Display for DefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DefId({})", self.0)
    }
}

// =============================================================================
// TypeKind / TypeFlags
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

bitflags! {
    /// Access and property flags of a type definition, as found in the
    /// class file's `access_flags`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u32 {
        const PUBLIC = 1 << 0;
        const FINAL = 1 << 1;
        const ABSTRACT = 1 << 2;
        const STATIC = 1 << 3;
        const SYNTHETIC = 1 << 4;
        const NESTED = 1 << 5;
    }
}

// =============================================================================
// TypeDefinition
// =============================================================================

/// Complete information about a type definition.
///
/// Stored in a catalog and retrieved by `DefId`.
#[derive(Clone, Debug)]
pub struct TypeDefinition {
    /// Internal (slash separated) name, e.g. `java/util/ArrayList`.
    pub internal_name: Arc<str>,
    pub kind: TypeKind,
    pub flags: TypeFlags,
    pub generic_parameters: Vec<GenericParameter>,
    /// Superclass. `None` for `java/lang/Object` and for interfaces.
    pub base_type: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    /// Declared members keyed by name. Overloads share a key.
    pub members: IndexMap<Arc<str>, SmallVec<[Arc<MemberReference>; 1]>>,
}

impl TypeDefinition {
    /// Create a class definition with no supertypes and no members.
    pub fn class(internal_name: &str) -> Self {
        Self::new(internal_name, TypeKind::Class)
    }

    pub fn interface(internal_name: &str) -> Self {
        Self::new(internal_name, TypeKind::Interface).with_flags(TypeFlags::ABSTRACT)
    }

    pub fn new(internal_name: &str, kind: TypeKind) -> Self {
        Self {
            internal_name: Arc::from(internal_name),
            kind,
            flags: TypeFlags::PUBLIC,
            generic_parameters: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
            members: IndexMap::new(),
        }
    }

    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_generic_parameters(mut self, params: Vec<GenericParameter>) -> Self {
        self.generic_parameters = params;
        self
    }

    pub fn with_base_type(mut self, base: TypeRef) -> Self {
        self.base_type = Some(base);
        self
    }

    pub fn with_interfaces(mut self, interfaces: Vec<TypeRef>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn add_member(&mut self, member: Arc<MemberReference>) {
        self.members
            .entry(Arc::clone(&member.name))
            .or_default()
            .push(member);
    }

    /// Name without the package or enclosing classes.
    pub fn simple_name(&self) -> &str {
        let name = self.internal_name.as_ref();
        let start = name.rfind(['/', '$']).map_or(0, |i| i + 1);
        &name[start..]
    }

    /// Dotted package name, empty for the default package.
    pub fn package_name(&self) -> String {
        match self.internal_name.rfind('/') {
            Some(i) => self.internal_name[..i].replace('/', "."),
            None => String::new(),
        }
    }

    /// Dotted fully-qualified name, e.g. `java.util.ArrayList`.
    pub fn full_name(&self) -> String {
        self.internal_name.replace('/', ".").replace('$', ".")
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    pub fn is_final(&self) -> bool {
        self.flags.contains(TypeFlags::FINAL) || self.kind == TypeKind::Enum
    }

    pub fn is_generic_definition(&self) -> bool {
        !self.generic_parameters.is_empty()
    }

    /// The type variables declared by this definition, in order.
    pub fn type_variables(&self, owner: DefId) -> Vec<TypeVariable> {
        self.generic_parameters
            .iter()
            .map(|p| p.as_type_variable(Some(owner)))
            .collect()
    }

    /// `D<T1, ..., Tn>` for a generic definition, the plain class type otherwise.
    pub fn self_type(&self, owner: DefId) -> TypeRef {
        if self.generic_parameters.is_empty() {
            return TypeRef::class(owner);
        }
        let args = self
            .type_variables(owner)
            .into_iter()
            .map(TypeRef::TypeVariable)
            .collect();
        TypeRef::generic(owner, args)
    }

    pub fn declared_members(&self, name: &str) -> &[Arc<MemberReference>] {
        self.members
            .get(name)
            .map(|m| m.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod tests;
