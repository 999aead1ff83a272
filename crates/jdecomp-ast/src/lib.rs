//! Arena AST for decompiled Java method bodies.
//!
//! - **Nodes**: `NodeArena` owns every node; `NodeIndex` handles refer to
//!   them and `NodeIndex::NONE` is the null node
//! - **Roles**: each `NodeKind` declares an ordered role schema; children
//!   occupy exactly one role of their parent
//! - **Patterns**: `Pattern` placeholders and pattern trees, matched with
//!   backtracking over collection roles
//! - **Visitors**: `AstVisitor` with exhaustive `accept` dispatch
//! - **Snapshots**: JSON and compact text views for debugging and tests

pub mod base;
pub mod error;
pub mod matching;
pub mod node;
mod node_access;
mod node_arena;
pub mod pattern;
pub mod role;
pub mod snapshot;
pub mod visitor;

pub use base::NodeIndex;
pub use error::StructuralError;
pub use matching::{match_node, matches_collection, subtree_equals};
pub use node::{
    AssignmentOperatorType, BinaryOperatorType, ChildSlot, Node, NodeArena, NodeData, NodeKind,
    PrimitiveValue, UnaryOperatorType, UserData, WildcardKind,
};
pub use pattern::{Match, Pattern, PatternTree};
pub use role::{Cardinality, Role};
pub use snapshot::{NodeSnapshot, debug_string, to_json};
pub use visitor::{AstVisitor, VisitResult, accept, walk_children};
