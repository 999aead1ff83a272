use super::*;

#[test]
fn test_defaults() {
    let settings = DecompilerSettings::default();
    assert!(settings.insert_necessary_conversions);
    assert!(settings.allow_wildcards_in_casts);
    assert_eq!(settings.max_transform_depth, MAX_TRANSFORM_DEPTH);
}

#[test]
fn test_missing_keys_take_defaults() {
    let settings = DecompilerSettings::from_json(r#"{ "allowWildcardsInCasts": false }"#).unwrap();
    assert!(!settings.allow_wildcards_in_casts);
    assert!(settings.insert_necessary_conversions);
    assert_eq!(settings.max_transform_depth, MAX_TRANSFORM_DEPTH);

    let empty = DecompilerSettings::from_json("{}").unwrap();
    assert_eq!(empty, DecompilerSettings::default());
}

#[test]
fn test_camel_case_keys() {
    let settings = DecompilerSettings::from_json(
        r#"{ "insertNecessaryConversions": false, "maxTransformDepth": 12 }"#,
    )
    .unwrap();
    assert!(!settings.insert_necessary_conversions);
    assert_eq!(settings.max_transform_depth, 12);

    let json = settings.to_json().unwrap();
    assert!(json.contains("\"insertNecessaryConversions\": false"));
    assert!(json.contains("\"maxTransformDepth\": 12"));
}

#[test]
fn test_malformed_settings_are_reported() {
    let err = DecompilerSettings::from_json(r#"{ "maxTransformDepth": "deep" }"#).unwrap_err();
    assert!(matches!(err, TransformError::Settings(_)));
    assert!(err.to_string().starts_with("invalid decompiler settings"));

    assert!(DecompilerSettings::from_json("not json").is_err());
}
