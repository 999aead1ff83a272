//! Structural matching with backtracking.
//!
//! Matching is pure with respect to both trees: only the `Match` log is
//! written. Collection roles are matched by a search over split points:
//!
//! 1. Pattern children are consumed left to right against target children.
//! 2. A `Repeat` placeholder never matches directly; it pushes one choice
//!    point `(target position, checkpoint)` per admissible repetition count
//!    and reports failure, handing control to the outer loop.
//! 3. The outer loop pops the most recent choice point, restores the match
//!    log, and resumes with the pattern child after the repeat.
//!
//! A collection matches when every pattern child succeeded and every target
//! child was consumed.

use crate::base::NodeIndex;
use crate::node::{NodeArena, NodeData};
use crate::pattern::{Match, Pattern};
use jdecomp_common::limits::MAX_BACKTRACKING_STEPS;
use tracing::trace;

/// A pending alternative: resume matching at `next_other` with the match
/// log truncated to `checkpoint`.
#[derive(Copy, Clone, Debug)]
struct PossibleMatch {
    next_other: usize,
    checkpoint: usize,
}

impl Pattern {
    /// Does `target` (in `arena`) satisfy this pattern?
    pub fn matches(&self, arena: &NodeArena, target: NodeIndex, m: &mut Match) -> bool {
        match self {
            Self::AnyNode { group } => {
                if target.is_none() {
                    return false;
                }
                if let Some(group) = group {
                    m.add(group, target);
                }
                true
            }
            Self::AnyNodeOrNull { group } => {
                if let Some(group) = group {
                    m.add(group, target);
                }
                true
            }
            Self::Named { group, inner } => {
                let checkpoint = m.checkpoint();
                if inner.matches(arena, target, m) {
                    m.add(group, target);
                    true
                } else {
                    m.restore(checkpoint);
                    false
                }
            }
            Self::Choice(alternatives) => {
                let checkpoint = m.checkpoint();
                for alternative in alternatives {
                    if alternative.matches(arena, target, m) {
                        return true;
                    }
                    m.restore(checkpoint);
                }
                false
            }
            Self::Repeat { inner, min, max } => {
                if target.is_none() {
                    return *min == 0;
                }
                *max >= 1 && inner.matches(arena, target, m)
            }
            Self::Backreference { group } => match m.last(group) {
                Some(captured) => subtree_equals(arena, captured, arena, target),
                None => false,
            },
            Self::TypedNode { kind, group } => {
                if target.is_none() || arena.kind(target) != *kind {
                    return false;
                }
                if let Some(group) = group {
                    m.add(group, target);
                }
                true
            }
            Self::Subtree(tree) => match_node(&tree.arena, tree.root, arena, target, m),
        }
    }

    /// Match this pattern at `targets[position]` inside a collection.
    ///
    /// `Repeat` pushes its continuations onto `backtracking` and returns
    /// `false`; every other pattern matches the single node at `position`
    /// (or the null node past the end).
    fn matches_collection(
        &self,
        arena: &NodeArena,
        targets: &[NodeIndex],
        position: usize,
        m: &mut Match,
        backtracking: &mut Vec<PossibleMatch>,
    ) -> bool {
        let Self::Repeat { inner, min, max } = self else {
            let target = targets.get(position).copied().unwrap_or(NodeIndex::NONE);
            return self.matches(arena, target, m);
        };

        let mut count = 0usize;
        let mut current = position;
        if *min == 0 {
            backtracking.push(PossibleMatch {
                next_other: current,
                checkpoint: m.checkpoint(),
            });
        }
        while count < *max && current < targets.len() && inner.matches(arena, targets[current], m) {
            count += 1;
            current += 1;
            if count >= *min {
                backtracking.push(PossibleMatch {
                    next_other: current,
                    checkpoint: m.checkpoint(),
                });
            }
        }
        false
    }
}

/// Match pattern node `pattern` (in `pattern_arena`) against `target`.
///
/// Placeholder nodes delegate to their embedded pattern. The null pattern
/// node matches only the null node. Other nodes match nodes of the same kind
/// and payload whose role slots match pairwise as collections.
pub fn match_node(
    pattern_arena: &NodeArena,
    pattern: NodeIndex,
    arena: &NodeArena,
    target: NodeIndex,
    m: &mut Match,
) -> bool {
    let Some(pattern_node) = pattern_arena.get(pattern) else {
        return target.is_none();
    };
    if let NodeData::PatternPlaceholder { pattern } = &pattern_node.data {
        return pattern.matches(arena, target, m);
    }
    let Some(target_node) = arena.get(target) else {
        return false;
    };
    if !pattern_node.data.matches_payload(&target_node.data) {
        return false;
    }
    pattern_node
        .slots
        .iter()
        .zip(target_node.slots.iter())
        .all(|(p, t)| matches_collection(pattern_arena, &p.children, arena, &t.children, m))
}

/// Match a list of pattern children against a list of target children,
/// backtracking over `Repeat` placeholders.
pub fn matches_collection(
    pattern_arena: &NodeArena,
    patterns: &[NodeIndex],
    arena: &NodeArena,
    targets: &[NodeIndex],
    m: &mut Match,
) -> bool {
    let mut backtracking = vec![PossibleMatch {
        next_other: 0,
        checkpoint: m.checkpoint(),
    }];
    let mut pattern_stack = vec![0usize];
    let mut steps = 0usize;

    while let Some(choice) = backtracking.pop() {
        let Some(mut p) = pattern_stack.pop() else {
            break;
        };
        let mut t = choice.next_other;
        m.restore(choice.checkpoint);

        let mut success = true;
        while p < patterns.len() && success {
            steps += 1;
            if steps > MAX_BACKTRACKING_STEPS {
                trace!(steps, "matches_collection - backtracking limit exceeded");
                return false;
            }
            success = match_in_collection(pattern_arena, patterns[p], arena, targets, t, m, &mut backtracking);
            while backtracking.len() > pattern_stack.len() {
                pattern_stack.push(p + 1);
            }
            p += 1;
            if t < targets.len() {
                t += 1;
            }
        }
        if success && t >= targets.len() {
            return true;
        }
    }
    false
}

fn match_in_collection(
    pattern_arena: &NodeArena,
    pattern: NodeIndex,
    arena: &NodeArena,
    targets: &[NodeIndex],
    position: usize,
    m: &mut Match,
    backtracking: &mut Vec<PossibleMatch>,
) -> bool {
    if let Some(NodeData::PatternPlaceholder { pattern }) = pattern_arena.get(pattern).map(|n| &n.data) {
        return pattern.matches_collection(arena, targets, position, m, backtracking);
    }
    let target = targets.get(position).copied().unwrap_or(NodeIndex::NONE);
    match_node(pattern_arena, pattern, arena, target, m)
}

/// Structural equality of two subtrees (kinds, payloads and children;
/// annotations are ignored).
pub fn subtree_equals(a_arena: &NodeArena, a: NodeIndex, b_arena: &NodeArena, b: NodeIndex) -> bool {
    let mut stack = vec![(a, b)];
    while let Some((a, b)) = stack.pop() {
        match (a_arena.get(a), b_arena.get(b)) {
            (None, None) => {}
            (Some(x), Some(y)) => {
                if x.kind() != y.kind() || !x.data.matches_payload(&y.data) {
                    return false;
                }
                for (xs, ys) in x.slots.iter().zip(y.slots.iter()) {
                    if xs.children.len() != ys.children.len() {
                        return false;
                    }
                    stack.extend(xs.children.iter().copied().zip(ys.children.iter().copied()));
                }
            }
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
#[path = "../tests/matching_tests.rs"]
mod tests;
