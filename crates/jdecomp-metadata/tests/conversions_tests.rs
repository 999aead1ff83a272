use super::*;
use crate::test_fixtures::Fixture;

#[test]
fn test_primitive_conversions() {
    assert_eq!(
        primitive_conversion(JvmType::Integer, JvmType::Integer),
        ConversionType::Identity
    );
    assert_eq!(
        primitive_conversion(JvmType::Long, JvmType::Integer),
        ConversionType::Implicit
    );
    assert_eq!(
        primitive_conversion(JvmType::Short, JvmType::Integer),
        ConversionType::Explicit
    );
    assert_eq!(
        primitive_conversion(JvmType::Character, JvmType::Short),
        ConversionType::Explicit
    );
    assert_eq!(
        primitive_conversion(JvmType::Integer, JvmType::Boolean),
        ConversionType::None
    );
    assert_eq!(
        primitive_conversion(JvmType::Boolean, JvmType::Double),
        ConversionType::None
    );
    assert_eq!(
        primitive_conversion(JvmType::Integer, JvmType::Void),
        ConversionType::None
    );
}

#[test]
fn test_null_conversions() {
    let fx = Fixture::new();
    assert_eq!(
        get_conversion_type(&fx.catalog, &fx.string(), &TypeRef::Null),
        ConversionType::Implicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &TypeRef::INT, &TypeRef::Null),
        ConversionType::None
    );
}

#[test]
fn test_unboxing_conversions() {
    let fx = Fixture::new();
    let integer = fx.boxed("Integer");

    assert_eq!(
        get_conversion_type(&fx.catalog, &TypeRef::INT, &integer),
        ConversionType::Implicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &TypeRef::LONG, &integer),
        ConversionType::Implicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &TypeRef::SHORT, &integer),
        ConversionType::ExplicitToUnboxed
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &TypeRef::BOOLEAN, &integer),
        ConversionType::None
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &TypeRef::INT, &fx.object()),
        ConversionType::ExplicitToUnboxed
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &TypeRef::DOUBLE, &fx.boxed("Number")),
        ConversionType::ExplicitToUnboxed
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &TypeRef::BOOLEAN, &fx.boxed("Number")),
        ConversionType::None
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &TypeRef::INT, &fx.string()),
        ConversionType::None
    );
}

#[test]
fn test_boxing_conversions() {
    let fx = Fixture::new();

    assert_eq!(
        get_conversion_type(&fx.catalog, &fx.boxed("Integer"), &TypeRef::INT),
        ConversionType::Implicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &fx.object(), &TypeRef::BOOLEAN),
        ConversionType::Implicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &fx.boxed("Number"), &TypeRef::DOUBLE),
        ConversionType::Implicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &fx.boxed("Long"), &TypeRef::INT),
        ConversionType::Explicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &fx.boxed("Integer"), &TypeRef::BOOLEAN),
        ConversionType::None
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &fx.string(), &TypeRef::INT),
        ConversionType::None
    );
}

#[test]
fn test_reference_conversions() {
    let fx = Fixture::new();
    let animal = TypeRef::class(fx.animal);
    let dog = TypeRef::class(fx.dog);
    let cat = TypeRef::class(fx.cat);
    let runnable = TypeRef::class(fx.runnable);

    assert_eq!(
        get_conversion_type(&fx.catalog, &animal, &animal),
        ConversionType::Identity
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &animal, &dog),
        ConversionType::Implicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &dog, &animal),
        ConversionType::Explicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &dog, &cat),
        ConversionType::None
    );
    // Dog is not final, so some subclass could implement Runnable.
    assert_eq!(
        get_conversion_type(&fx.catalog, &runnable, &dog),
        ConversionType::Explicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &runnable, &cat),
        ConversionType::None
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &fx.boxed("Integer"), &fx.string()),
        ConversionType::None
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &fx.object(), &fx.string()),
        ConversionType::Implicit
    );
}

#[test]
fn test_generic_and_variable_conversions() {
    let fx = Fixture::new();
    let t = TypeRef::type_variable("T", None);

    assert_eq!(
        get_conversion_type(&fx.catalog, &fx.string(), &t),
        ConversionType::Explicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &t, &fx.string()),
        ConversionType::Explicit
    );
    assert_eq!(
        get_conversion_type(
            &fx.catalog,
            &fx.array_list_of(fx.string()),
            &fx.list_of(fx.string())
        ),
        ConversionType::Explicit
    );
    assert_eq!(
        get_conversion_type(
            &fx.catalog,
            &fx.list_of(fx.string()),
            &fx.array_list_of(fx.string())
        ),
        ConversionType::Implicit
    );
}

#[test]
fn test_array_conversions() {
    let fx = Fixture::new();
    let animals = TypeRef::array(TypeRef::class(fx.animal));
    let dogs = TypeRef::array(TypeRef::class(fx.dog));

    assert_eq!(
        get_conversion_type(&fx.catalog, &animals, &dogs),
        ConversionType::Implicit
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &dogs, &animals),
        ConversionType::Explicit
    );
    assert_eq!(
        get_conversion_type(
            &fx.catalog,
            &TypeRef::array(TypeRef::LONG),
            &TypeRef::array(TypeRef::INT)
        ),
        ConversionType::None
    );
    assert_eq!(
        get_conversion_type(&fx.catalog, &dogs, &fx.object()),
        ConversionType::Explicit
    );
}

#[test]
fn test_boxing_helpers() {
    let fx = Fixture::new();
    assert_eq!(box_type(&fx.catalog, JvmType::Integer), Some(fx.boxed("Integer")));
    assert_eq!(unboxed_type(&fx.catalog, &fx.boxed("Character")), Some(JvmType::Character));
    assert!(is_boxed_type(&fx.catalog, &fx.boxed("Boolean")));
    assert!(!is_boxed_type(&fx.catalog, &fx.string()));
    assert_eq!(underlying_primitive(&fx.catalog, &TypeRef::SHORT), Some(JvmType::Short));
    assert_eq!(underlying_primitive(&fx.catalog, &fx.boxed("Long")), Some(JvmType::Long));
    assert_eq!(underlying_primitive(&fx.catalog, &TypeRef::VOID), None);
}

#[test]
fn test_conversion_predicates() {
    assert!(ConversionType::Identity.is_implicit());
    assert!(ConversionType::Implicit.is_implicit());
    assert!(!ConversionType::None.is_implicit());
    assert!(ConversionType::ExplicitToUnboxed.is_explicit());
    assert!(!ConversionType::None.is_explicit());
}
