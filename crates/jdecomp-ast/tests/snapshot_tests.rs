use super::*;
use crate::node::{AssignmentOperatorType, BinaryOperatorType, PrimitiveValue, UnaryOperatorType};

#[test]
fn test_debug_string_for_conversion_shapes() {
    let mut arena = NodeArena::new();
    let b = arena.add_identifier("b");
    let one = arena.add_primitive(PrimitiveValue::Int(1));
    let zero = arena.add_primitive(PrimitiveValue::Int(0));
    let conditional = arena.add_conditional(b, one, zero).unwrap();
    let short = arena.add_simple_type("short", &[]).unwrap();
    let cast = arena.add_cast(short, conditional).unwrap();
    assert_eq!(debug_string(&arena, cast), "(short) (b ? 1 : 0)");

    let i = arena.add_identifier("i");
    let zero_long = arena.add_primitive(PrimitiveValue::Long(0));
    let test = arena.add_binary(BinaryOperatorType::InEquality, i, zero_long).unwrap();
    let flag = arena.add_identifier("flag");
    let assign = arena
        .add_assignment(AssignmentOperatorType::Assign, flag, test)
        .unwrap();
    let stmt = arena.add_expression_statement(assign).unwrap();
    assert_eq!(debug_string(&arena, stmt), "flag = (i != 0L);");
}

#[test]
fn test_debug_string_for_literals() {
    let mut arena = NodeArena::new();
    let cases = [
        (PrimitiveValue::Long(1), "1L"),
        (PrimitiveValue::Float(1.0), "1.0f"),
        (PrimitiveValue::Double(0.0), "0.0"),
        (PrimitiveValue::Boolean(true), "true"),
        (PrimitiveValue::Char(u16::from(b'a')), "'a'"),
        (PrimitiveValue::String("hi".into()), "\"hi\""),
    ];
    for (value, expected) in cases {
        let node = arena.add_primitive(value);
        assert_eq!(debug_string(&arena, node), expected);
    }
    let null = arena.add_null_reference();
    assert_eq!(debug_string(&arena, null), "null");
    assert_eq!(debug_string(&arena, NodeIndex::NONE), "");
}

#[test]
fn test_debug_string_for_types_and_members() {
    let mut arena = NodeArena::new();
    let string = arena.add_simple_type("String", &[]).unwrap();
    let wildcard = arena.add_wildcard_type(WildcardKind::Super, string).unwrap();
    let list = arena.add_simple_type("List", &[wildcard]).unwrap();
    let array = arena.add_composed_type(list, 1).unwrap();
    assert_eq!(debug_string(&arena, array), "List<? super String>[]");

    let this = arena.add_this();
    let object = arena.add_simple_type("Object", &[]).unwrap();
    let cast = arena.add_cast(object, this).unwrap();
    let call = arena.add_method_invocation(cast, "hashCode", &[], &[]).unwrap();
    assert_eq!(debug_string(&arena, call), "(Object) this.hashCode()");

    let ty = arena.add_simple_type("Point", &[]).unwrap();
    let x = arena.add_identifier("x");
    let creation = arena.add_object_creation(ty, &[x]).unwrap();
    let ret = arena.add_return(creation).unwrap();
    let i = arena.add_identifier("i");
    let inc = arena.add_unary(UnaryOperatorType::PostIncrement, i).unwrap();
    let inc_stmt = arena.add_expression_statement(inc).unwrap();
    let block = arena.add_block(&[inc_stmt, ret]).unwrap();
    assert_eq!(debug_string(&arena, block), "{ i++; return new Point(x); }");
}

#[test]
fn test_json_snapshot_omits_tokens() {
    let mut arena = NodeArena::new();
    let int_type = arena.add_simple_type("int", &[]).unwrap();
    let b = arena.add_identifier("b");
    let cast = arena.add_cast(int_type, b).unwrap();

    let json = to_json(&arena, cast);
    assert_eq!(
        json,
        serde_json::json!({
            "kind": "Cast",
            "children": [
                { "kind": "SimpleType", "role": "Type", "text": "int" },
                { "kind": "Identifier", "role": "Expression", "text": "b" }
            ]
        })
    );
}

#[test]
fn test_snapshot_records_operator_text() {
    let mut arena = NodeArena::new();
    let a = arena.add_identifier("a");
    let b = arena.add_identifier("b");
    let shift = arena.add_binary(BinaryOperatorType::UnsignedShiftRight, a, b).unwrap();

    let snapshot = NodeSnapshot::capture(&arena, shift);
    assert_eq!(snapshot.kind, NodeKind::BinaryOperator);
    assert_eq!(snapshot.text.as_deref(), Some(">>>"));
    assert_eq!(snapshot.children.len(), 2);
    assert_eq!(snapshot.children[0].role, Some("Left"));
}
