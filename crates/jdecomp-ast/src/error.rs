//! Structural errors raised by tree mutation and role queries.

use crate::base::NodeIndex;
use crate::node::NodeKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("role `{role}` of node {node} already holds a child")]
    SingleRoleOccupied { node: NodeIndex, role: &'static str },

    #[error("{kind:?} nodes have no `{role}` role")]
    UnknownRole { kind: NodeKind, role: &'static str },

    #[error("node {node} is already attached to a parent")]
    AlreadyAttached { node: NodeIndex },

    #[error("node {node} has no parent")]
    NotAttached { node: NodeIndex },

    #[error("attaching node {node} would make it its own ancestor")]
    WouldCreateCycle { node: NodeIndex },

    #[error("node {node} does not exist in this arena")]
    InvalidNode { node: NodeIndex },
}
