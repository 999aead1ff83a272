//! Child-slot roles.
//!
//! Every node kind declares an ordered list of roles; each child occupies
//! exactly one of its parent's roles. Single-valued roles hold at most one
//! child, collection roles hold an ordered list.

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Cardinality {
    Single,
    Collection,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Role {
    pub id: u16,
    pub name: &'static str,
    pub cardinality: Cardinality,
    /// Punctuation/keyword slot filled by a `Token` node.
    pub is_token: bool,
}

impl Role {
    const fn single(id: u16, name: &'static str) -> Self {
        Self {
            id,
            name,
            cardinality: Cardinality::Single,
            is_token: false,
        }
    }

    const fn collection(id: u16, name: &'static str) -> Self {
        Self {
            id,
            name,
            cardinality: Cardinality::Collection,
            is_token: false,
        }
    }

    const fn token(id: u16, name: &'static str) -> Self {
        Self {
            id,
            name,
            cardinality: Cardinality::Single,
            is_token: true,
        }
    }

    pub const EXPRESSION: Self = Self::single(1, "Expression");
    pub const TYPE: Self = Self::single(2, "Type");
    pub const TARGET_EXPRESSION: Self = Self::single(3, "Target");
    pub const ARGUMENT: Self = Self::collection(4, "Argument");
    pub const TYPE_ARGUMENT: Self = Self::collection(5, "TypeArgument");
    pub const LEFT: Self = Self::single(6, "Left");
    pub const RIGHT: Self = Self::single(7, "Right");
    pub const CONDITION: Self = Self::single(8, "Condition");
    pub const TRUE_EXPRESSION: Self = Self::single(9, "TrueExpression");
    pub const FALSE_EXPRESSION: Self = Self::single(10, "FalseExpression");
    pub const STATEMENT: Self = Self::collection(11, "Statement");
    pub const INITIALIZER: Self = Self::single(12, "Initializer");

    pub const LEFT_PARENTHESIS: Self = Self::token(20, "LPar");
    pub const RIGHT_PARENTHESIS: Self = Self::token(21, "RPar");
    pub const NEW_KEYWORD: Self = Self::token(22, "NewKeyword");
    pub const DOT: Self = Self::token(23, "Dot");

    #[inline]
    pub const fn is_collection(self) -> bool {
        matches!(self.cardinality, Cardinality::Collection)
    }

    /// Default token text for token roles.
    pub const fn token_text(self) -> Option<&'static str> {
        match self.id {
            20 => Some("("),
            21 => Some(")"),
            22 => Some("new"),
            23 => Some("."),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}
