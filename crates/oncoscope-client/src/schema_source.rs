use std::path::PathBuf;

use oncoscope_core::catalog::Selection;
use oncoscope_core::field::FieldSchema;
use oncoscope_core::schema_doc::parse_schema_document;
use tracing::info;

use crate::backend::{BoxFuture, SchemaSource};
use crate::error::ClientError;

/// Schema built from the compiled-in feature catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogSchemaSource {
    pub selection: Selection,
}

impl CatalogSchemaSource {
    pub fn new(selection: Selection) -> Self {
        Self { selection }
    }
}

impl SchemaSource for CatalogSchemaSource {
    fn describe(&self) -> String {
        format!("catalog:{:?}", self.selection).to_lowercase()
    }

    fn load(&self) -> BoxFuture<'_, Result<FieldSchema, ClientError>> {
        Box::pin(async move { Ok(self.selection.schema()?) })
    }
}

/// Schema read from a JSON document on disk (see
/// [`oncoscope_core::schema_doc`] for the accepted shapes).
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    pub path: PathBuf,
}

impl FileSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaSource for FileSchemaSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> BoxFuture<'_, Result<FieldSchema, ClientError>> {
        Box::pin(async move {
            let text = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| ClientError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            let schema = parse_schema_document(&text)?;
            info!(path = %self.path.display(), fields = schema.len(), "loaded schema file");
            Ok(schema)
        })
    }
}
