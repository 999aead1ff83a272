//! jdecomp
//!
//! The semantic rewrite core of a Java bytecode decompiler. A decompiled
//! method body lives in a `jdecomp_ast::NodeArena`; the passes in
//! `jdecomp_transforms` resolve static types against a
//! `jdecomp_metadata::TypeCatalog` and rewrite the tree until it is legal
//! Java source.
//!
//! ```ignore
//! use jdecomp::{DecompilerContext, run_transforms};
//!
//! jdecomp::tracing_config::init_tracing();
//! let context = DecompilerContext::new(catalog);
//! run_transforms(&context, &mut arena, body)?;
//! ```

pub mod tracing_config;

pub use jdecomp_ast as ast;
pub use jdecomp_common as common;
pub use jdecomp_metadata as metadata;
pub use jdecomp_transforms as transforms;

pub use jdecomp_transforms::{
    AstBuilder, AstTransform, DecompilerContext, DecompilerSettings, InsertNecessaryConversionsTransform,
    JavaResolver, TransformError, TransformResult, insert_necessary_conversions, is_cast_redundant,
    remove_cast, run_transforms,
};
