use oncoscope_core::catalog::{self, Selection};
use oncoscope_core::error::SchemaError;
use oncoscope_core::field::{FieldDescriptor, FieldSchema, field_key};
use oncoscope_core::schema_doc::parse_schema_document;

#[test]
fn field_key_lowercases_and_collapses_whitespace() {
    assert_eq!(field_key("worst radius"), "worst_radius");
    assert_eq!(field_key("  Worst \t Radius "), "worst_radius");
    assert_eq!(field_key("Mean Concave Points"), "mean_concave_points");
}

#[test]
fn field_key_is_stable_on_derived_keys() {
    let key = field_key("mean fractal dimension");
    assert_eq!(field_key(&key), key);
}

#[test]
fn from_names_preserves_order_and_uses_catalog_labels() {
    let schema = FieldSchema::from_names(["worst radius", "worst texture"]).unwrap();

    let keys: Vec<_> = schema.keys().collect();
    assert_eq!(keys, ["worst_radius", "worst_texture"]);
    assert_eq!(schema.fields()[0].label, "Raio (pior)");
    assert_eq!(schema.fields()[1].hint.as_deref(), Some("25.4"));
    assert_eq!(schema.position("worst_texture"), Some(1));
}

#[test]
fn unknown_names_fall_back_to_raw_label() {
    let schema = FieldSchema::from_names(["Tumour Age"]).unwrap();
    let field = schema.get("tumour_age").unwrap();
    assert_eq!(field.label, "Tumour Age");
    assert_eq!(field.hint, None);
}

#[test]
fn empty_schema_is_rejected() {
    let names: [&str; 0] = [];
    assert!(matches!(
        FieldSchema::from_names(names),
        Err(SchemaError::Empty)
    ));
}

#[test]
fn blank_name_is_rejected() {
    let err = FieldSchema::from_names(["mean radius", "   "]).unwrap_err();
    assert!(matches!(err, SchemaError::BlankName { position: 1 }));
}

#[test]
fn names_colliding_on_key_are_rejected() {
    let err = FieldSchema::from_names(["mean radius", "Mean  Radius"]).unwrap_err();
    match err {
        SchemaError::DuplicateKey { key, .. } => assert_eq!(key, "mean_radius"),
        other => panic!("expected DuplicateKey, got {other:?}"),
    }
}

#[test]
fn explicit_descriptors_are_checked_for_duplicates() {
    let field = FieldDescriptor {
        key: "a".to_string(),
        label: "A".to_string(),
        hint: None,
    };
    assert!(FieldSchema::new(vec![field.clone(), field]).is_err());
}

#[test]
fn catalog_selections() {
    assert_eq!(catalog::FEATURES.len(), 30);
    assert_eq!(Selection::Full.schema().unwrap().len(), 30);

    let top10 = Selection::Top10.schema().unwrap();
    assert_eq!(top10.len(), 10);
    assert_eq!(top10.fields()[0].key, "worst_radius");
    assert_eq!(top10.fields()[9].key, "mean_symmetry");
}

#[test]
fn catalog_lookup_by_key() {
    let entry = catalog::lookup("concave_points_error").unwrap();
    assert_eq!(entry.name, "concave points error");
    assert_eq!(entry.group.title(), "Erro (SE)");
    assert!(catalog::lookup("concave points error").is_none());
}

#[test]
fn metadata_document_with_examples() {
    let text = r#"{
        "selected_features": ["worst radius", "worst texture"],
        "k": 2,
        "threshold": 0.5,
        "examples": {"worst radius": 17.0}
    }"#;

    let schema = parse_schema_document(text).unwrap();
    assert_eq!(schema.len(), 2);
    assert_eq!(schema.fields()[0].hint.as_deref(), Some("17"));
    assert_eq!(schema.fields()[1].hint.as_deref(), Some("25.4"));
}

#[test]
fn bare_array_document() {
    let schema = parse_schema_document(r#"["mean area", "area error"]"#).unwrap();
    let keys: Vec<_> = schema.keys().collect();
    assert_eq!(keys, ["mean_area", "area_error"]);
}

#[test]
fn empty_document_is_a_schema_error() {
    assert!(matches!(
        parse_schema_document(r#"{"selected_features": []}"#),
        Err(SchemaError::Empty)
    ));
    assert!(matches!(
        parse_schema_document("{\"other\": 1}"),
        Err(SchemaError::Parse(_))
    ));
}
