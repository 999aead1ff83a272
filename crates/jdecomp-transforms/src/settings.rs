//! Decompiler settings consulted by the rewrite passes.

use crate::error::TransformError;
use jdecomp_common::limits::MAX_TRANSFORM_DEPTH;
use serde::{Deserialize, Serialize};

/// Settings loaded from a JSON document such as
///
/// ```json
/// { "insertNecessaryConversions": true, "allowWildcardsInCasts": false }
/// ```
///
/// Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecompilerSettings {
    /// Run the conversion-insertion transform.
    pub insert_necessary_conversions: bool,
    /// Default for `ConvertTypeOptions::allow_wildcards` when building cast
    /// types. Casts inserted for assignments never use wildcards.
    pub allow_wildcards_in_casts: bool,
    pub max_transform_depth: u32,
}

impl Default for DecompilerSettings {
    fn default() -> Self {
        Self {
            insert_necessary_conversions: true,
            allow_wildcards_in_casts: true,
            max_transform_depth: MAX_TRANSFORM_DEPTH,
        }
    }
}

impl DecompilerSettings {
    pub fn from_json(text: &str) -> Result<Self, TransformError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, TransformError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../tests/settings_tests.rs"]
mod tests;
