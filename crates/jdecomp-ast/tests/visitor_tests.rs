use super::*;
use crate::error::StructuralError;
use crate::node::{BinaryOperatorType, PrimitiveValue};
use crate::role::Role;
use crate::{leaf_visits, walk_visits};

/// Records the kind of every node it enters, in visit order.
struct KindRecorder<'a> {
    arena: &'a NodeArena,
    kinds: Vec<NodeKind>,
    nulls: usize,
}

impl AstVisitor for KindRecorder<'_> {
    type Input = ();
    type Output = ();

    fn arena(&self) -> &NodeArena {
        self.arena
    }

    fn visit_null(&mut self, _input: ()) {
        self.nulls += 1;
    }

    fn visit_token(&mut self, _node: NodeIndex, _input: ()) {
        self.kinds.push(NodeKind::Token);
    }

    fn visit_identifier(&mut self, node: NodeIndex, input: ()) {
        self.kinds.push(NodeKind::Identifier);
        walk_children(self, node, input)
    }

    fn visit_cast(&mut self, node: NodeIndex, input: ()) {
        self.kinds.push(NodeKind::Cast);
        walk_children(self, node, input)
    }

    fn visit_simple_type(&mut self, node: NodeIndex, input: ()) {
        self.kinds.push(NodeKind::SimpleType);
        walk_children(self, node, input)
    }

    fn visit_return_statement(&mut self, node: NodeIndex, input: ()) {
        self.kinds.push(NodeKind::ReturnStatement);
        walk_children(self, node, input)
    }

    fn visit_pattern_placeholder(&mut self, _node: NodeIndex, _pattern: &Arc<Pattern>, _input: ()) {
        self.kinds.push(NodeKind::PatternPlaceholder);
    }

    walk_visits!(
        visit_primitive,
        visit_null_reference,
        visit_this,
        visit_member_reference,
        visit_invocation,
        visit_object_creation,
        visit_assignment,
        visit_conditional,
        visit_binary_operator,
        visit_unary_operator,
        visit_wildcard_type,
        visit_composed_type,
        visit_block,
        visit_expression_statement,
        visit_variable_declaration,
    );
}

#[test]
fn test_children_visited_in_role_order() {
    let mut arena = NodeArena::new();
    let ty = arena.add_simple_type("int", &[]).unwrap();
    let x = arena.add_identifier("x");
    let cast = arena.add_cast(ty, x).unwrap();
    let ret = arena.add_return(cast).unwrap();

    let mut recorder = KindRecorder {
        arena: &arena,
        kinds: Vec::new(),
        nulls: 0,
    };
    accept(&mut recorder, ret, ());
    assert_eq!(
        recorder.kinds,
        vec![
            NodeKind::ReturnStatement,
            NodeKind::Cast,
            NodeKind::Token,
            NodeKind::SimpleType,
            NodeKind::Token,
            NodeKind::Identifier,
        ]
    );

    accept(&mut recorder, NodeIndex::NONE, ());
    assert_eq!(recorder.nulls, 1);
}

/// Wraps every identifier named `b` in `(Object) b` while walking.
struct WrapB<'a> {
    arena: &'a mut NodeArena,
    seen: Vec<String>,
}

impl AstVisitor for WrapB<'_> {
    type Input = ();
    type Output = Result<(), StructuralError>;

    fn arena(&self) -> &NodeArena {
        self.arena
    }

    fn visit_identifier(&mut self, node: NodeIndex, _input: ()) -> Self::Output {
        let name = self.arena.name(node).unwrap_or_default().to_string();
        if name == "b" {
            self.arena.replace_with(node, |arena, detached| {
                let ty = arena.add_simple_type("Object", &[])?;
                arena.add_cast(ty, detached)
            })?;
        }
        self.seen.push(name);
        Ok(())
    }

    fn visit_null(&mut self, _input: ()) -> Self::Output {
        Ok(())
    }

    fn visit_pattern_placeholder(&mut self, _node: NodeIndex, _pattern: &Arc<Pattern>, _input: ()) -> Self::Output {
        Ok(())
    }

    leaf_visits!(visit_token);

    walk_visits!(
        visit_primitive,
        visit_null_reference,
        visit_this,
        visit_member_reference,
        visit_invocation,
        visit_object_creation,
        visit_cast,
        visit_assignment,
        visit_conditional,
        visit_binary_operator,
        visit_unary_operator,
        visit_simple_type,
        visit_wildcard_type,
        visit_composed_type,
        visit_block,
        visit_expression_statement,
        visit_return_statement,
        visit_variable_declaration,
    );
}

#[test]
fn test_replacing_current_child_does_not_skip_siblings() {
    let mut arena = NodeArena::new();
    let target = arena.add_identifier("f");
    let args: Vec<NodeIndex> = ["a", "b", "c"].iter().map(|n| arena.add_identifier(n)).collect();
    let call = arena.add_invocation(target, &args).unwrap();

    let mut visitor = WrapB {
        arena: &mut arena,
        seen: Vec::new(),
    };
    accept(&mut visitor, call, ()).unwrap();
    assert_eq!(visitor.seen, vec!["f", "a", "b", "c"]);

    let rewritten = arena.children_by_role(call, Role::ARGUMENT).unwrap().to_vec();
    assert_eq!(rewritten.len(), 3);
    assert_eq!(arena.kind(rewritten[1]), NodeKind::Cast);
    assert_eq!(crate::snapshot::debug_string(&arena, call), "f(a, (Object) b, c)");
}

/// Fails on the first `this` it sees.
struct RejectThis<'a> {
    arena: &'a NodeArena,
    visited: usize,
}

impl AstVisitor for RejectThis<'_> {
    type Input = ();
    type Output = Result<(), StructuralError>;

    fn arena(&self) -> &NodeArena {
        self.arena
    }

    fn visit_identifier(&mut self, _node: NodeIndex, _input: ()) -> Self::Output {
        self.visited += 1;
        Ok(())
    }

    fn visit_this(&mut self, node: NodeIndex, _input: ()) -> Self::Output {
        Err(StructuralError::NotAttached { node })
    }

    fn visit_null(&mut self, _input: ()) -> Self::Output {
        Ok(())
    }

    fn visit_pattern_placeholder(&mut self, _node: NodeIndex, _pattern: &Arc<Pattern>, _input: ()) -> Self::Output {
        Ok(())
    }

    leaf_visits!(visit_token);

    walk_visits!(
        visit_primitive,
        visit_null_reference,
        visit_member_reference,
        visit_invocation,
        visit_object_creation,
        visit_cast,
        visit_assignment,
        visit_conditional,
        visit_binary_operator,
        visit_unary_operator,
        visit_simple_type,
        visit_wildcard_type,
        visit_composed_type,
        visit_block,
        visit_expression_statement,
        visit_return_statement,
        visit_variable_declaration,
    );
}

#[test]
fn test_error_output_stops_walk() {
    let mut arena = NodeArena::new();
    let a = arena.add_identifier("a");
    let this = arena.add_this();
    let b = arena.add_identifier("b");
    let first = arena.add_binary(BinaryOperatorType::Add, a, this).unwrap();
    let sum = arena.add_binary(BinaryOperatorType::Add, first, b).unwrap();

    let mut visitor = RejectThis {
        arena: &arena,
        visited: 0,
    };
    let result = accept(&mut visitor, sum, ());
    assert_eq!(result, Err(StructuralError::NotAttached { node: this }));
    assert_eq!(visitor.visited, 1);
}

/// Finds the first literal, pre-order.
struct FirstLiteral<'a> {
    arena: &'a NodeArena,
}

impl AstVisitor for FirstLiteral<'_> {
    type Input = ();
    type Output = Option<NodeIndex>;

    fn arena(&self) -> &NodeArena {
        self.arena
    }

    fn visit_primitive(&mut self, node: NodeIndex, _input: ()) -> Self::Output {
        Some(node)
    }

    fn visit_null(&mut self, _input: ()) -> Self::Output {
        None
    }

    fn visit_pattern_placeholder(&mut self, _node: NodeIndex, _pattern: &Arc<Pattern>, _input: ()) -> Self::Output {
        None
    }

    leaf_visits!(visit_token, visit_null_reference, visit_identifier, visit_this);
    walk_visits!(
        visit_member_reference,
        visit_invocation,
        visit_object_creation,
        visit_cast,
        visit_assignment,
        visit_conditional,
        visit_binary_operator,
        visit_unary_operator,
        visit_simple_type,
        visit_wildcard_type,
        visit_composed_type,
        visit_block,
        visit_expression_statement,
        visit_return_statement,
        visit_variable_declaration,
    );
}

#[test]
fn test_option_output_returns_first_hit() {
    let mut arena = NodeArena::new();
    let x = arena.add_identifier("x");
    let one = arena.add_primitive(PrimitiveValue::Int(1));
    let two = arena.add_primitive(PrimitiveValue::Int(2));
    let inner = arena.add_binary(BinaryOperatorType::Multiply, x, one).unwrap();
    let outer = arena.add_binary(BinaryOperatorType::Add, inner, two).unwrap();

    assert_eq!(accept(&mut FirstLiteral { arena: &arena }, outer, ()), Some(one));
    assert_eq!(accept(&mut FirstLiteral { arena: &arena }, x, ()), None);
}

/// Counts placeholders and passes the nesting depth down as input.
struct DepthRecorder<'a> {
    arena: &'a NodeArena,
    placeholder_depths: Vec<u32>,
}

impl AstVisitor for DepthRecorder<'_> {
    type Input = u32;
    type Output = ();

    fn arena(&self) -> &NodeArena {
        self.arena
    }

    fn visit_pattern_placeholder(&mut self, _node: NodeIndex, pattern: &Arc<Pattern>, depth: u32) {
        assert!(matches!(pattern.as_ref(), Pattern::AnyNode { .. }));
        self.placeholder_depths.push(depth);
    }

    fn visit_unary_operator(&mut self, node: NodeIndex, depth: u32) {
        walk_children(self, node, depth + 1)
    }

    fn visit_null(&mut self, _depth: u32) {}

    leaf_visits!(visit_token);
    walk_visits!(
        visit_primitive,
        visit_null_reference,
        visit_identifier,
        visit_this,
        visit_member_reference,
        visit_invocation,
        visit_object_creation,
        visit_cast,
        visit_assignment,
        visit_conditional,
        visit_binary_operator,
        visit_simple_type,
        visit_wildcard_type,
        visit_composed_type,
        visit_block,
        visit_expression_statement,
        visit_return_statement,
        visit_variable_declaration,
    );
}

#[test]
fn test_placeholder_dispatch_and_input_threading() {
    let mut arena = NodeArena::new();
    let placeholder = arena.add_pattern_placeholder(Pattern::any());
    let inner = arena
        .add_unary(crate::node::UnaryOperatorType::Minus, placeholder)
        .unwrap();
    let outer = arena
        .add_unary(crate::node::UnaryOperatorType::BitNot, inner)
        .unwrap();

    let mut recorder = DepthRecorder {
        arena: &arena,
        placeholder_depths: Vec::new(),
    };
    accept(&mut recorder, outer, 0);
    assert_eq!(recorder.placeholder_depths, vec![2]);
}

/// Counts identifiers but treats casts as leaves.
struct IdentifiersOutsideCasts<'a> {
    arena: &'a NodeArena,
    identifiers: usize,
}

impl AstVisitor for IdentifiersOutsideCasts<'_> {
    type Input = ();
    type Output = ();

    fn arena(&self) -> &NodeArena {
        self.arena
    }

    fn visit_null(&mut self, _input: ()) {}

    fn visit_pattern_placeholder(&mut self, _node: NodeIndex, _pattern: &Arc<Pattern>, _input: ()) {}

    fn visit_identifier(&mut self, _node: NodeIndex, _input: ()) {
        self.identifiers += 1;
    }

    leaf_visits!(visit_token, visit_primitive, visit_null_reference, visit_this, visit_cast);
    walk_visits!(
        visit_member_reference,
        visit_invocation,
        visit_object_creation,
        visit_assignment,
        visit_conditional,
        visit_binary_operator,
        visit_unary_operator,
        visit_simple_type,
        visit_wildcard_type,
        visit_composed_type,
        visit_block,
        visit_expression_statement,
        visit_return_statement,
        visit_variable_declaration,
    );
}

#[test]
fn test_leaf_and_walk_helpers() {
    let mut arena = NodeArena::new();
    let a = arena.add_identifier("a");
    let ty = arena.add_simple_type("int", &[]).unwrap();
    let b = arena.add_identifier("b");
    let cast = arena.add_cast(ty, b).unwrap();
    let sum = arena.add_binary(BinaryOperatorType::Add, a, cast).unwrap();
    let statement = arena.add_expression_statement(sum).unwrap();

    let mut visitor = IdentifiersOutsideCasts {
        arena: &arena,
        identifiers: 0,
    };
    accept(&mut visitor, statement, ());
    assert_eq!(visitor.identifiers, 1);
}
