//! Visitor dispatch over the closed set of node kinds.
//!
//! `accept` routes a node to the `AstVisitor` method for its kind with an
//! exhaustive match. Every method is required, so adding a `NodeKind` fails
//! to compile until every visitor handles it. `walk_visits!` and
//! `leaf_visits!` fill in the kinds a visitor only passes through.
//!
//! ```ignore
//! struct CountCasts<'a> {
//!     arena: &'a NodeArena,
//!     casts: usize,
//! }
//!
//! impl AstVisitor for CountCasts<'_> {
//!     type Input = ();
//!     type Output = ();
//!
//!     fn arena(&self) -> &NodeArena {
//!         self.arena
//!     }
//!
//!     fn visit_null(&mut self, _input: ()) {}
//!
//!     fn visit_pattern_placeholder(&mut self, _node: NodeIndex, _pattern: &Arc<Pattern>, _input: ()) {}
//!
//!     fn visit_cast(&mut self, node: NodeIndex, input: ()) {
//!         self.casts += 1;
//!         walk_children(self, node, input)
//!     }
//!
//!     leaf_visits!(visit_token, visit_primitive, visit_null_reference, visit_identifier, visit_this);
//!     walk_visits!(
//!         visit_member_reference, visit_invocation, visit_object_creation, visit_assignment,
//!         visit_conditional, visit_binary_operator, visit_unary_operator, visit_simple_type,
//!         visit_wildcard_type, visit_composed_type, visit_block, visit_expression_statement,
//!         visit_return_statement, visit_variable_declaration,
//!     );
//! }
//! ```

use crate::base::NodeIndex;
use crate::node::{NodeArena, NodeKind};
use crate::pattern::Pattern;
use std::sync::Arc;

// =============================================================================
// Visit results
// =============================================================================

/// Output types that `walk_children` can combine.
///
/// A walk visits children until one produces a stopping output, which is
/// returned as-is; otherwise the walk returns `finished()`.
pub trait VisitResult: Sized {
    fn finished() -> Self;
    fn should_stop(&self) -> bool;
}

impl VisitResult for () {
    fn finished() -> Self {}

    fn should_stop(&self) -> bool {
        false
    }
}

/// Errors stop the walk.
impl<E> VisitResult for Result<(), E> {
    fn finished() -> Self {
        Ok(())
    }

    fn should_stop(&self) -> bool {
        self.is_err()
    }
}

/// The first child producing a value wins.
impl<T> VisitResult for Option<T> {
    fn finished() -> Self {
        None
    }

    fn should_stop(&self) -> bool {
        self.is_some()
    }
}

// =============================================================================
// Visitor trait
// =============================================================================

pub trait AstVisitor: Sized {
    /// Per-call context passed down to children.
    type Input: Clone;
    type Output: VisitResult;

    /// The arena being visited. Visitors that rewrite the tree own a
    /// `&mut NodeArena` and hand out a shared view here.
    fn arena(&self) -> &NodeArena;

    // =========================================================================
    // Special nodes
    // =========================================================================

    fn visit_null(&mut self, input: Self::Input) -> Self::Output;

    fn visit_pattern_placeholder(
        &mut self,
        node: NodeIndex,
        pattern: &Arc<Pattern>,
        input: Self::Input,
    ) -> Self::Output;

    fn visit_token(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;

    // =========================================================================
    // Expressions
    // =========================================================================

    fn visit_primitive(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_null_reference(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_identifier(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_this(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_member_reference(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_invocation(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_object_creation(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_cast(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_assignment(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_conditional(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_binary_operator(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_unary_operator(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;

    // =========================================================================
    // Type syntax
    // =========================================================================

    fn visit_simple_type(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_wildcard_type(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_composed_type(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;

    // =========================================================================
    // Statements
    // =========================================================================

    fn visit_block(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_expression_statement(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_return_statement(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
    fn visit_variable_declaration(&mut self, node: NodeIndex, input: Self::Input) -> Self::Output;
}

// =============================================================================
// Dispatch
// =============================================================================

/// Dispatch `node` to the visitor method for its kind.
pub fn accept<V: AstVisitor>(visitor: &mut V, node: NodeIndex, input: V::Input) -> V::Output {
    let kind = visitor.arena().kind(node);
    match kind {
        NodeKind::Null => visitor.visit_null(input),
        NodeKind::Primitive => visitor.visit_primitive(node, input),
        NodeKind::NullReference => visitor.visit_null_reference(node, input),
        NodeKind::Identifier => visitor.visit_identifier(node, input),
        NodeKind::This => visitor.visit_this(node, input),
        NodeKind::MemberReference => visitor.visit_member_reference(node, input),
        NodeKind::Invocation => visitor.visit_invocation(node, input),
        NodeKind::ObjectCreation => visitor.visit_object_creation(node, input),
        NodeKind::Cast => visitor.visit_cast(node, input),
        NodeKind::Assignment => visitor.visit_assignment(node, input),
        NodeKind::Conditional => visitor.visit_conditional(node, input),
        NodeKind::BinaryOperator => visitor.visit_binary_operator(node, input),
        NodeKind::UnaryOperator => visitor.visit_unary_operator(node, input),
        NodeKind::SimpleType => visitor.visit_simple_type(node, input),
        NodeKind::WildcardType => visitor.visit_wildcard_type(node, input),
        NodeKind::ComposedType => visitor.visit_composed_type(node, input),
        NodeKind::Block => visitor.visit_block(node, input),
        NodeKind::ExpressionStatement => visitor.visit_expression_statement(node, input),
        NodeKind::ReturnStatement => visitor.visit_return_statement(node, input),
        NodeKind::VariableDeclaration => visitor.visit_variable_declaration(node, input),
        NodeKind::Token => visitor.visit_token(node, input),
        NodeKind::PatternPlaceholder => match visitor.arena().pattern(node) {
            Some(pattern) => visitor.visit_pattern_placeholder(node, &pattern, input),
            None => visitor.visit_null(input),
        },
    }
}

/// Visit the children of `node` in role-declaration order, left to right.
///
/// Each child's next sibling is read before the child is visited, so a
/// visitor may replace or remove the child it is visiting.
pub fn walk_children<V: AstVisitor>(visitor: &mut V, node: NodeIndex, input: V::Input) -> V::Output {
    let mut child = visitor.arena().first_child(node);
    while child.is_some() {
        let next = visitor.arena().next_sibling(child);
        let output = accept(visitor, child, input.clone());
        if output.should_stop() {
            return output;
        }
        child = next;
    }
    V::Output::finished()
}

/// Implement the listed visit methods by walking the node's children.
///
/// Every kind must still be named somewhere in the impl, so a new node kind
/// fails to compile until each visitor decides how to handle it.
#[macro_export]
macro_rules! walk_visits {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&mut self, node: $crate::NodeIndex, input: Self::Input) -> Self::Output {
                $crate::walk_children(self, node, input)
            }
        )+
    };
}

/// Implement the listed visit methods as leaves: no descent, `finished()`.
#[macro_export]
macro_rules! leaf_visits {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&mut self, _node: $crate::NodeIndex, _input: Self::Input) -> Self::Output {
                <Self::Output as $crate::VisitResult>::finished()
            }
        )+
    };
}

#[cfg(test)]
#[path = "../tests/visitor_tests.rs"]
mod tests;
