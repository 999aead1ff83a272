//! Type Metadata and Conversion Queries
//!
//! This crate describes the Java types a decompiled method body talks about
//! and answers the questions the rewrite passes ask of them:
//!
//! - **Definitions**: classes and interfaces keyed by `DefId`, stored in a
//!   `TypeCatalog` (`MetadataCatalog` is the in-memory implementation)
//! - **Type references**: `TypeRef` values for primitives, parameterized
//!   classes, arrays, type variables and wildcards
//! - **Relations**: `is_sub_type`, `as_super`, `as_sub_type`
//! - **Conversions**: `get_conversion_type` classifies a conversion as
//!   identity, implicit, explicit, explicit-to-unboxed, or impossible
//! - **Generics**: substitution and erasure
mod catalog;
mod conversions;
pub mod def;
mod format;
mod instantiate;
pub mod jvm_type;
pub mod members;
pub mod relations;
pub mod types;

pub use catalog::{MetadataCatalog, TypeCatalog, WellKnownTypes};
pub use conversions::{
    ConversionType, box_type, get_conversion_type, is_boxed_type, primitive_conversion,
    unboxed_type, underlying_primitive,
};
pub use def::{DefId, TypeDefinition, TypeFlags, TypeKind};
pub use format::TypeFormatter;
pub use instantiate::{TypeSubstitution, erase, instantiate_member_type, substitute};
pub use jvm_type::JvmType;
pub use members::{MemberKind, MemberReference, resolve_member};
pub use relations::{as_sub_type, as_super, direct_supertypes, is_sub_type};
pub use types::{ClassType, GenericParameter, TypeRef, TypeVariable, WildcardBound};

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;
