use super::*;

#[test]
fn test_def_id_validity() {
    assert!(!DefId::INVALID.is_valid());
    assert!(DefId(1).is_valid());
    assert!(DefId(100).is_valid());
}

#[test]
fn test_names() {
    let def = TypeDefinition::class("java/util/Map$Entry");
    assert_eq!(def.simple_name(), "Entry");
    assert_eq!(def.package_name(), "java.util");
    assert_eq!(def.full_name(), "java.util.Map.Entry");

    let default_package = TypeDefinition::class("Foo");
    assert_eq!(default_package.simple_name(), "Foo");
    assert_eq!(default_package.package_name(), "");
}

#[test]
fn test_kind_and_flags() {
    let iface = TypeDefinition::interface("java/lang/Runnable");
    assert!(iface.is_interface());
    assert!(iface.flags.contains(TypeFlags::ABSTRACT));
    assert!(!iface.is_final());

    let final_class = TypeDefinition::class("java/lang/String").with_flags(TypeFlags::FINAL);
    assert!(final_class.is_final());
    assert!(final_class.flags.contains(TypeFlags::PUBLIC));

    let enum_def = TypeDefinition::new("zoo/Color", TypeKind::Enum);
    assert!(enum_def.is_final());
}

#[test]
fn test_self_type_of_generic_definition() {
    let owner = DefId(42);
    let def = TypeDefinition::class("java/util/HashMap")
        .with_generic_parameters(vec![GenericParameter::new("K"), GenericParameter::new("V")]);
    assert!(def.is_generic_definition());

    let self_type = def.self_type(owner);
    assert_eq!(
        self_type,
        TypeRef::generic(
            owner,
            vec![
                TypeRef::type_variable("K", Some(owner)),
                TypeRef::type_variable("V", Some(owner)),
            ]
        )
    );

    let plain = TypeDefinition::class("zoo/Dog");
    assert_eq!(plain.self_type(owner), TypeRef::class(owner));
}

#[test]
fn test_members_group_overloads() {
    let owner = DefId(7);
    let mut def = TypeDefinition::class("zoo/Dog");
    def.add_member(Arc::new(MemberReference::method(
        "bark",
        TypeRef::class(owner),
        vec![],
        TypeRef::VOID,
    )));
    def.add_member(Arc::new(MemberReference::method(
        "bark",
        TypeRef::class(owner),
        vec![TypeRef::INT],
        TypeRef::VOID,
    )));
    assert_eq!(def.declared_members("bark").len(), 2);
    assert!(def.declared_members("wag").is_empty());
}
