use std::io::Write;

use oncoscope_client::backend::SchemaSource;
use oncoscope_client::error::ClientError;
use oncoscope_client::schema_source::{CatalogSchemaSource, FileSchemaSource};
use oncoscope_core::catalog::Selection;
use oncoscope_core::error::SchemaError;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn loads_selected_features_file() {
    let file = write_temp(r#"{"selected_features": ["worst radius", "worst texture"]}"#);
    let source = FileSchemaSource::new(file.path());

    let schema = source.load().await.unwrap();
    let keys: Vec<_> = schema.keys().collect();
    assert_eq!(keys, ["worst_radius", "worst_texture"]);
    assert_eq!(source.describe(), file.path().display().to_string());
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileSchemaSource::new(dir.path().join("selected_features.json"));

    assert!(matches!(
        source.load().await,
        Err(ClientError::Io { .. })
    ));
}

#[tokio::test]
async fn empty_feature_list_is_schema_error() {
    let file = write_temp(r#"{"selected_features": []}"#);
    let source = FileSchemaSource::new(file.path());

    assert!(matches!(
        source.load().await,
        Err(ClientError::Schema(SchemaError::Empty))
    ));
}

#[tokio::test]
async fn catalog_sources() {
    let full = CatalogSchemaSource::new(Selection::Full).load().await.unwrap();
    assert_eq!(full.len(), 30);

    let top10 = CatalogSchemaSource::default();
    assert_eq!(top10.describe(), "catalog:top10");
    assert_eq!(top10.load().await.unwrap().len(), 10);
}
