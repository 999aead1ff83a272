//! Errors surfaced by the rewrite passes.
//!
//! Missing type information is not an error: rules that cannot resolve their
//! operands are skipped. Only broken tree structure and malformed settings
//! reach the caller.

use jdecomp_ast::StructuralError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("invalid decompiler settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type TransformResult<T = ()> = Result<T, TransformError>;
