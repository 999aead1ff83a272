use super::*;
use crate::node::{BinaryOperatorType, NodeKind, PrimitiveValue};

fn call(arena: &mut NodeArena, args: &[NodeIndex]) -> NodeIndex {
    let target = arena.add_identifier("f");
    arena.add_invocation(target, args).unwrap()
}

fn identifiers(arena: &mut NodeArena, names: &[&str]) -> Vec<NodeIndex> {
    names.iter().map(|n| arena.add_identifier(n)).collect()
}

/// `f(<patterns...>)` as a pattern tree.
fn call_pattern(patterns: Vec<Pattern>) -> (NodeArena, NodeIndex) {
    let mut arena = NodeArena::new();
    let args: Vec<NodeIndex> = patterns
        .into_iter()
        .map(|p| arena.add_pattern_placeholder(p))
        .collect();
    let root = call(&mut arena, &args);
    (arena, root)
}

fn names(arena: &NodeArena, m: &Match, group: &str) -> Vec<String> {
    m.get(group)
        .map(|n| crate::snapshot::debug_string(arena, n))
        .collect()
}

// =============================================================================
// Single-node placeholders
// =============================================================================

#[test]
fn test_any_node_rejects_null() {
    let mut arena = NodeArena::new();
    let x = arena.add_identifier("x");
    let mut m = Match::new();

    assert!(!Pattern::any().matches(&arena, NodeIndex::NONE, &mut m));
    assert!(Pattern::any_named("x").matches(&arena, x, &mut m));
    assert_eq!(m.first("x"), Some(x));

    let mut m = Match::new();
    assert!(Pattern::any_or_null("maybe").matches(&arena, NodeIndex::NONE, &mut m));
    assert_eq!(m.first("maybe"), Some(NodeIndex::NONE));
}

#[test]
fn test_typed_node_checks_kind() {
    let mut arena = NodeArena::new();
    let literal = arena.add_primitive(PrimitiveValue::Int(3));
    let ident = arena.add_identifier("x");
    let pattern = Pattern::typed(NodeKind::Primitive, Some("lit"));

    let mut m = Match::new();
    assert!(pattern.matches(&arena, literal, &mut m));
    assert!(!pattern.matches(&arena, ident, &mut m));
    assert_eq!(m.len(), 1);
}

#[test]
fn test_choice_restores_log_between_alternatives() {
    let mut arena = NodeArena::new();
    let ident = arena.add_identifier("x");
    let pattern = Pattern::choice(vec![
        Pattern::named("wrong", Pattern::typed(NodeKind::Primitive, None)),
        Pattern::named("right", Pattern::typed(NodeKind::Identifier, None)),
    ]);

    let mut m = Match::new();
    assert!(pattern.matches(&arena, ident, &mut m));
    assert!(!m.has("wrong"));
    assert_eq!(m.first("right"), Some(ident));
}

#[test]
fn test_failed_named_match_leaves_no_capture() {
    let mut arena = NodeArena::new();
    let ident = arena.add_identifier("x");
    let pattern = Pattern::named("outer", Pattern::typed(NodeKind::This, Some("inner")));

    let mut m = Match::new();
    assert!(!pattern.matches(&arena, ident, &mut m));
    assert!(m.is_empty());
}

// =============================================================================
// Pattern trees
// =============================================================================

#[test]
fn test_subtree_pattern_matches_cast_shape() {
    let mut pattern_arena = NodeArena::new();
    let int_type = pattern_arena.add_simple_type("int", &[]).unwrap();
    let operand = pattern_arena.add_pattern_placeholder(Pattern::any_named("operand"));
    let root = pattern_arena.add_cast(int_type, operand).unwrap();
    let pattern = Pattern::subtree(pattern_arena, root);

    let mut arena = NodeArena::new();
    let ty = arena.add_simple_type("int", &[]).unwrap();
    let b = arena.add_identifier("b");
    let int_cast = arena.add_cast(ty, b).unwrap();
    let ty = arena.add_simple_type("long", &[]).unwrap();
    let c = arena.add_identifier("c");
    let long_cast = arena.add_cast(ty, c).unwrap();

    let mut m = Match::new();
    assert!(pattern.matches(&arena, int_cast, &mut m));
    assert_eq!(m.first("operand"), Some(b));

    let mut m = Match::new();
    assert!(!pattern.matches(&arena, long_cast, &mut m));
}

#[test]
fn test_any_operator_pattern_matches_every_operator() {
    let mut pattern_arena = NodeArena::new();
    let left = pattern_arena.add_pattern_placeholder(Pattern::any_named("left"));
    let right = pattern_arena.add_pattern_placeholder(Pattern::any_named("right"));
    let root = pattern_arena
        .add_binary(BinaryOperatorType::Any, left, right)
        .unwrap();

    let mut arena = NodeArena::new();
    for operator in [BinaryOperatorType::Add, BinaryOperatorType::ShiftLeft] {
        let a = arena.add_identifier("a");
        let b = arena.add_identifier("b");
        let target = arena.add_binary(operator, a, b).unwrap();
        let mut m = Match::new();
        assert!(match_node(&pattern_arena, root, &arena, target, &mut m));
        assert_eq!(m.first("left"), Some(a));
    }
}

#[test]
fn test_backreference_requires_equal_subtree() {
    let mut pattern_arena = NodeArena::new();
    let left = pattern_arena.add_pattern_placeholder(Pattern::any_named("x"));
    let right = pattern_arena.add_pattern_placeholder(Pattern::backreference("x"));
    let root = pattern_arena
        .add_binary(BinaryOperatorType::Subtract, left, right)
        .unwrap();

    let mut arena = NodeArena::new();
    let a1 = arena.add_identifier("a");
    let a2 = arena.add_identifier("a");
    let same = arena.add_binary(BinaryOperatorType::Subtract, a1, a2).unwrap();
    let a3 = arena.add_identifier("a");
    let b = arena.add_identifier("b");
    let different = arena.add_binary(BinaryOperatorType::Subtract, a3, b).unwrap();

    assert!(match_node(&pattern_arena, root, &arena, same, &mut Match::new()));
    assert!(!match_node(&pattern_arena, root, &arena, different, &mut Match::new()));
}

#[test]
fn test_empty_single_role_matches_only_null() {
    let mut pattern_arena = NodeArena::new();
    let bare_return = pattern_arena.add_return(NodeIndex::NONE).unwrap();

    let mut arena = NodeArena::new();
    let empty = arena.add_return(NodeIndex::NONE).unwrap();
    let x = arena.add_identifier("x");
    let with_value = arena.add_return(x).unwrap();

    assert!(match_node(&pattern_arena, bare_return, &arena, empty, &mut Match::new()));
    assert!(!match_node(&pattern_arena, bare_return, &arena, with_value, &mut Match::new()));
}

// =============================================================================
// Collections and backtracking
// =============================================================================

#[test]
fn test_exact_repeat_count() {
    let (pattern_arena, root) = call_pattern(vec![Pattern::repeat_between(Pattern::any(), 2, 2)]);
    let mut arena = NodeArena::new();

    let one = identifiers(&mut arena, &["a"]);
    let two = identifiers(&mut arena, &["a", "b"]);
    let three = identifiers(&mut arena, &["a", "b", "c"]);
    let call_one = call(&mut arena, &one);
    let call_two = call(&mut arena, &two);
    let call_three = call(&mut arena, &three);

    assert!(!match_node(&pattern_arena, root, &arena, call_one, &mut Match::new()));
    assert!(match_node(&pattern_arena, root, &arena, call_two, &mut Match::new()));
    assert!(!match_node(&pattern_arena, root, &arena, call_three, &mut Match::new()));
}

#[test]
fn test_optional_backtracks_when_greedy_choice_fails() {
    let (pattern_arena, root) = call_pattern(vec![
        Pattern::optional(Pattern::any_named("first")),
        Pattern::typed(NodeKind::Identifier, Some("last")),
    ]);
    let mut arena = NodeArena::new();
    let args = identifiers(&mut arena, &["x"]);
    let target = call(&mut arena, &args);

    let mut m = Match::new();
    assert!(match_node(&pattern_arena, root, &arena, target, &mut m));
    assert!(!m.has("first"));
    assert_eq!(m.first("last"), Some(args[0]));
}

#[test]
fn test_ambiguous_split_is_found_by_backtracking() {
    // f(pre*, <literal>, post*) against f(a, 1, b, 2, c): the greedy prefix
    // swallows everything, so the matcher must back off to a valid split.
    let (pattern_arena, root) = call_pattern(vec![
        Pattern::repeat(Pattern::any_named("pre")),
        Pattern::typed(NodeKind::Primitive, Some("lit")),
        Pattern::repeat(Pattern::any_named("post")),
    ]);

    let mut arena = NodeArena::new();
    let a = arena.add_identifier("a");
    let one = arena.add_primitive(PrimitiveValue::Int(1));
    let b = arena.add_identifier("b");
    let two = arena.add_primitive(PrimitiveValue::Int(2));
    let c = arena.add_identifier("c");
    let target = call(&mut arena, &[a, one, b, two, c]);

    let mut m = Match::new();
    assert!(match_node(&pattern_arena, root, &arena, target, &mut m));
    assert_eq!(names(&arena, &m, "pre"), vec!["a", "1", "b"]);
    assert_eq!(m.first("lit"), Some(two));
    assert_eq!(names(&arena, &m, "post"), vec!["c"]);
}

#[test]
fn test_no_split_reports_false() {
    let (pattern_arena, root) = call_pattern(vec![
        Pattern::repeat(Pattern::any()),
        Pattern::typed(NodeKind::Primitive, None),
        Pattern::repeat(Pattern::any()),
    ]);
    let mut arena = NodeArena::new();
    let args = identifiers(&mut arena, &["a", "b", "c"]);
    let target = call(&mut arena, &args);

    let mut m = Match::new();
    assert!(!match_node(&pattern_arena, root, &arena, target, &mut m));
}

#[test]
fn test_collection_match_on_raw_lists() {
    let mut pattern_arena = NodeArena::new();
    let patterns = vec![
        pattern_arena.add_pattern_placeholder(Pattern::any_named("head")),
        pattern_arena.add_pattern_placeholder(Pattern::repeat(Pattern::any_named("tail"))),
    ];
    let mut arena = NodeArena::new();
    let targets = identifiers(&mut arena, &["a", "b", "c"]);

    let mut m = Match::new();
    assert!(matches_collection(&pattern_arena, &patterns, &arena, &targets, &mut m));
    assert_eq!(m.first("head"), Some(targets[0]));
    assert_eq!(m.get("tail").count(), 2);

    assert!(matches_collection(&pattern_arena, &[], &arena, &[], &mut Match::new()));
    assert!(!matches_collection(&pattern_arena, &[], &arena, &targets, &mut Match::new()));
}

// =============================================================================
// Match log and structural equality
// =============================================================================

#[test]
fn test_match_checkpoint_and_restore() {
    let mut m = Match::new();
    let group: std::sync::Arc<str> = "g".into();
    m.add(&group, NodeIndex(1));
    let checkpoint = m.checkpoint();
    m.add(&group, NodeIndex(2));
    assert_eq!(m.last("g"), Some(NodeIndex(2)));

    m.restore(checkpoint);
    assert_eq!(m.len(), 1);
    assert_eq!(m.last("g"), Some(NodeIndex(1)));
}

#[test]
fn test_subtree_equals_ignores_annotations() {
    let mut arena = NodeArena::new();
    let x = arena.add_identifier("x");
    let first = arena.add_unary(crate::node::UnaryOperatorType::Not, x).unwrap();
    let y = arena.add_identifier("x");
    let second = arena.add_unary(crate::node::UnaryOperatorType::Not, y).unwrap();
    arena.set_type_reference(y, jdecomp_metadata::TypeRef::BOOLEAN);

    assert!(subtree_equals(&arena, first, &arena, second));
    assert!(!subtree_equals(&arena, first, &arena, x));
    assert!(subtree_equals(&arena, NodeIndex::NONE, &arena, NodeIndex::NONE));
}
