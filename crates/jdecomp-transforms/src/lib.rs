//! Semantic Rewrites
//!
//! Passes that run over a decompiled method body after its tree has been
//! built, making it legal Java source:
//!
//! - **Resolution**: `JavaResolver` gives expressions their static types
//! - **Conversion insertion**: `InsertNecessaryConversionsTransform` fixes
//!   boolean/number mixing, impossible casts and member access through a
//!   supertype
//! - **Redundant casts**: `is_cast_redundant` / `remove_cast`
//! - **Type syntax**: `AstBuilder` turns a `TypeRef` into type nodes
//!
//! Passes share a `DecompilerContext` (catalog, settings, builder, current
//! type and method) and are sequenced by `run_transforms`.

pub mod ast_builder;
pub mod context;
pub mod error;
pub mod insert_conversions;
pub mod pipeline;
pub mod redundant_cast;
pub mod resolver;
pub mod settings;

pub use ast_builder::{AstBuilder, ConvertTypeOptions};
pub use context::DecompilerContext;
pub use error::{TransformError, TransformResult};
pub use insert_conversions::{InsertNecessaryConversionsTransform, insert_necessary_conversions};
pub use pipeline::{AstTransform, enabled_transforms, run_transforms};
pub use redundant_cast::{is_cast_redundant, remove_cast};
pub use resolver::{JavaResolver, ResolveResult};
pub use settings::DecompilerSettings;

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;
