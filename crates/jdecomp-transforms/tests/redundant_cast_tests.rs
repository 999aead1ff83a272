use super::*;
use crate::context::DecompilerContext;
use crate::test_fixtures::{Fixture, in_block, local};
use jdecomp_ast::{BinaryOperatorType, debug_string};
use jdecomp_metadata::MemberReference;
use std::sync::Arc;

fn redundant(context: &DecompilerContext, arena: &NodeArena, cast: NodeIndex) -> bool {
    is_cast_redundant(&JavaResolver::new(context), arena, cast)
}

#[test]
fn test_identity_cast_is_redundant_anywhere() {
    let f = Fixture::new();
    let context = f.context();
    let mut arena = NodeArena::new();
    let i = local(&mut arena, "i", TypeRef::INT);
    let cast = f.cast(&mut arena, &TypeRef::INT, i);
    let target = local(&mut arena, "g", f.object());
    arena.add_invocation(target, &[cast]).unwrap();

    assert!(redundant(&context, &arena, cast));
}

#[test]
fn test_argument_casts_are_kept() {
    let f = Fixture::new();
    let context = f.context();
    let mut arena = NodeArena::new();
    let i = local(&mut arena, "i", TypeRef::INT);
    let cast = f.cast(&mut arena, &TypeRef::LONG, i);
    let target = local(&mut arena, "g", f.object());
    arena.add_invocation(target, &[cast]).unwrap();

    assert!(!redundant(&context, &arena, cast));
}

#[test]
fn test_nested_integral_casts() {
    let f = Fixture::new();
    let context = f.context();
    let mut arena = NodeArena::new();

    // (byte) (short) x keeps the same low eight bits as (byte) x.
    let x = local(&mut arena, "x", TypeRef::INT);
    let inner = f.cast(&mut arena, &TypeRef::SHORT, x);
    f.cast(&mut arena, &TypeRef::BYTE, inner);
    assert!(redundant(&context, &arena, inner));

    // (int) (short) x sign-extends the low sixteen bits.
    let x = local(&mut arena, "x", TypeRef::INT);
    let inner = f.cast(&mut arena, &TypeRef::SHORT, x);
    f.cast(&mut arena, &TypeRef::INT, inner);
    assert!(!redundant(&context, &arena, inner));

    // (double) (float) i widens i twice without loss only up to float.
    let i = local(&mut arena, "i", TypeRef::INT);
    let inner = f.cast(&mut arena, &TypeRef::FLOAT, i);
    f.cast(&mut arena, &TypeRef::DOUBLE, inner);
    assert!(!redundant(&context, &arena, inner));
}

#[test]
fn test_binary_operand_casts() {
    let f = Fixture::new();
    let context = f.context();
    let mut arena = NodeArena::new();

    let i = local(&mut arena, "i", TypeRef::INT);
    let widened = f.cast(&mut arena, &TypeRef::LONG, i);
    let j = local(&mut arena, "j", TypeRef::LONG);
    arena.add_binary(BinaryOperatorType::Add, widened, j).unwrap();
    assert!(redundant(&context, &arena, widened));

    // i + k is an int addition, (long) i + k is not.
    let i = local(&mut arena, "i", TypeRef::INT);
    let widened = f.cast(&mut arena, &TypeRef::LONG, i);
    let k = local(&mut arena, "k", TypeRef::INT);
    arena.add_binary(BinaryOperatorType::Add, widened, k).unwrap();
    assert!(!redundant(&context, &arena, widened));

    let i = local(&mut arena, "i", TypeRef::INT);
    let widened = f.cast(&mut arena, &TypeRef::LONG, i);
    let j = local(&mut arena, "j", TypeRef::LONG);
    arena.add_binary(BinaryOperatorType::ShiftLeft, widened, j).unwrap();
    assert!(!redundant(&context, &arena, widened));
}

#[test]
fn test_initializer_casts() {
    let f = Fixture::new();
    let context = f.context();
    let mut arena = NodeArena::new();
    let declare = |arena: &mut NodeArena, var_type: TypeRef, cast_type: TypeRef, value: NodeIndex| {
        let cast = f.cast(arena, &cast_type, value);
        let ty = f.type_node(arena, &var_type);
        arena.add_variable_declaration(ty, "v", cast).unwrap();
        cast
    };

    let i = local(&mut arena, "i", TypeRef::INT);
    let cast = declare(&mut arena, TypeRef::LONG, TypeRef::LONG, i);
    assert!(redundant(&context, &arena, cast));

    let five = arena.add_primitive(PrimitiveValue::Int(5));
    let cast = declare(&mut arena, TypeRef::BYTE, TypeRef::BYTE, five);
    assert!(redundant(&context, &arena, cast));

    let big = arena.add_primitive(PrimitiveValue::Int(300));
    let cast = declare(&mut arena, TypeRef::BYTE, TypeRef::BYTE, big);
    assert!(!redundant(&context, &arena, cast));

    let i = local(&mut arena, "i", TypeRef::INT);
    let cast = declare(&mut arena, TypeRef::SHORT, TypeRef::SHORT, i);
    assert!(!redundant(&context, &arena, cast));
}

#[test]
fn test_reference_assignment_casts() {
    let f = Fixture::new();
    let context = f.context();
    let mut arena = NodeArena::new();

    let a = local(&mut arena, "a", TypeRef::class(f.animal));
    let d = local(&mut arena, "d", TypeRef::class(f.dog));
    let upcast = f.cast(&mut arena, &TypeRef::class(f.animal), d);
    arena
        .add_assignment(AssignmentOperatorType::Assign, a, upcast)
        .unwrap();
    assert!(redundant(&context, &arena, upcast));

    let d = local(&mut arena, "d", TypeRef::class(f.dog));
    let a = local(&mut arena, "a", TypeRef::class(f.animal));
    let downcast = f.cast(&mut arena, &TypeRef::class(f.dog), a);
    arena
        .add_assignment(AssignmentOperatorType::Assign, d, downcast)
        .unwrap();
    assert!(!redundant(&context, &arena, downcast));
}

#[test]
fn test_return_uses_current_method() {
    let f = Fixture::new();
    let mut arena = NodeArena::new();
    let c = local(&mut arena, "c", TypeRef::CHAR);
    let cast = f.cast(&mut arena, &TypeRef::INT, c);
    arena.add_return(cast).unwrap();

    assert!(!redundant(&f.context(), &arena, cast));

    let method = MemberReference::method("code", TypeRef::class(f.animal), Vec::new(), TypeRef::INT);
    let context = f.context().in_method(Arc::new(method));
    assert!(redundant(&context, &arena, cast));
}

#[test]
fn test_remove_cast_splices_operand() {
    let f = Fixture::new();
    let mut arena = NodeArena::new();
    let x = local(&mut arena, "x", TypeRef::INT);
    let cast = f.cast(&mut arena, &TypeRef::LONG, x);
    let (block, statement) = in_block(&mut arena, cast);

    let operand = remove_cast(&mut arena, cast).unwrap();
    assert_eq!(operand, x);
    assert_eq!(arena.parent(x), statement);
    assert!(arena.parent(cast).is_none());
    assert_eq!(debug_string(&arena, block), "{ x; }");
}

#[test]
fn test_remove_detached_cast_releases_operand() {
    let f = Fixture::new();
    let mut arena = NodeArena::new();
    let x = local(&mut arena, "x", TypeRef::INT);
    let cast = f.cast(&mut arena, &TypeRef::LONG, x);

    assert_eq!(remove_cast(&mut arena, cast).unwrap(), x);
    assert!(arena.parent(x).is_none());
    assert!(arena.child_by_role(cast, Role::EXPRESSION).unwrap().is_none());
}
