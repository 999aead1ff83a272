//! Patterns and match results.
//!
//! A pattern is either a placeholder constraint (`AnyNode`, `Choice`,
//! `Repeat`, ...) or a concrete tree (`Subtree`) whose nodes may themselves
//! be `PatternPlaceholder` nodes embedding further patterns. Placeholders
//! record what they matched into a `Match`.

use crate::base::NodeIndex;
use crate::node::{NodeArena, NodeKind};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub enum Pattern {
    /// Any non-null node.
    AnyNode { group: Option<Arc<str>> },
    /// Any node, including the null node.
    AnyNodeOrNull { group: Option<Arc<str>> },
    /// Captures whatever `inner` matches under `group`.
    Named { group: Arc<str>, inner: Box<Pattern> },
    /// Exactly one of the alternatives, tried in order.
    Choice(Vec<Pattern>),
    /// Between `min` and `max` consecutive siblings matching `inner`.
    /// Only meaningful inside a collection role.
    Repeat {
        inner: Box<Pattern>,
        min: usize,
        max: usize,
    },
    /// A node structurally equal to the last capture of `group`.
    Backreference { group: Arc<str> },
    /// Any node of the given kind.
    TypedNode { kind: NodeKind, group: Option<Arc<str>> },
    /// A concrete pattern tree.
    Subtree(PatternTree),
}

/// A concrete pattern tree living in its own arena.
#[derive(Clone, Debug)]
pub struct PatternTree {
    pub arena: NodeArena,
    pub root: NodeIndex,
}

impl Pattern {
    pub fn any() -> Self {
        Self::AnyNode { group: None }
    }

    pub fn any_named(group: &str) -> Self {
        Self::AnyNode {
            group: Some(Arc::from(group)),
        }
    }

    pub fn any_or_null(group: &str) -> Self {
        Self::AnyNodeOrNull {
            group: Some(Arc::from(group)),
        }
    }

    pub fn named(group: &str, inner: Self) -> Self {
        Self::Named {
            group: Arc::from(group),
            inner: Box::new(inner),
        }
    }

    pub fn choice(alternatives: Vec<Self>) -> Self {
        Self::Choice(alternatives)
    }

    pub fn repeat(inner: Self) -> Self {
        Self::Repeat {
            inner: Box::new(inner),
            min: 0,
            max: usize::MAX,
        }
    }

    pub fn repeat_between(inner: Self, min: usize, max: usize) -> Self {
        Self::Repeat {
            inner: Box::new(inner),
            min,
            max,
        }
    }

    /// Zero or one occurrence.
    pub fn optional(inner: Self) -> Self {
        Self::repeat_between(inner, 0, 1)
    }

    pub fn backreference(group: &str) -> Self {
        Self::Backreference {
            group: Arc::from(group),
        }
    }

    pub fn typed(kind: NodeKind, group: Option<&str>) -> Self {
        Self::TypedNode {
            kind,
            group: group.map(Arc::from),
        }
    }

    pub fn subtree(arena: NodeArena, root: NodeIndex) -> Self {
        Self::Subtree(PatternTree { arena, root })
    }
}

/// Captures recorded while matching.
///
/// The log only grows during a match attempt; backtracking restores an
/// earlier `checkpoint` by truncation.
#[derive(Clone, Debug, Default)]
pub struct Match {
    results: Vec<(Arc<str>, NodeIndex)>,
}

impl Match {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn checkpoint(&self) -> usize {
        self.results.len()
    }

    #[inline]
    pub fn restore(&mut self, checkpoint: usize) {
        self.results.truncate(checkpoint);
    }

    pub fn add(&mut self, group: &Arc<str>, node: NodeIndex) {
        self.results.push((Arc::clone(group), node));
    }

    /// All captures of `group`, in capture order.
    pub fn get<'a>(&'a self, group: &'a str) -> impl Iterator<Item = NodeIndex> + 'a {
        self.results
            .iter()
            .filter(move |(g, _)| g.as_ref() == group)
            .map(|(_, node)| *node)
    }

    pub fn first(&self, group: &str) -> Option<NodeIndex> {
        self.get(group).next()
    }

    pub fn last(&self, group: &str) -> Option<NodeIndex> {
        self.results
            .iter()
            .rev()
            .find(|(g, _)| g.as_ref() == group)
            .map(|(_, node)| *node)
    }

    pub fn has(&self, group: &str) -> bool {
        self.results.iter().any(|(g, _)| g.as_ref() == group)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}
