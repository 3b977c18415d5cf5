//! Schema documents: the JSON written next to a trained model that lists the
//! features it expects.
//!
//! Two shapes are accepted:
//!
//! ```text
//! {"selected_features": ["worst radius", ...], "examples": {"worst radius": 16.1}}
//! ["worst radius", "worst texture", ...]
//! ```
//!
//! Extra metadata keys (`k`, `threshold`, ...) are ignored.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::SchemaError;
use crate::field::FieldSchema;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaDocument {
    Metadata {
        selected_features: Vec<String>,
        #[serde(default)]
        examples: Option<BTreeMap<String, f64>>,
    },
    Names(Vec<String>),
}

/// Parse a schema document into an ordered field schema.
pub fn parse_schema_document(text: &str) -> Result<FieldSchema, SchemaError> {
    let document: SchemaDocument = serde_json::from_str(text)?;

    let (names, examples) = match document {
        SchemaDocument::Metadata {
            selected_features,
            examples,
        } => (selected_features, examples.unwrap_or_default()),
        SchemaDocument::Names(names) => (names, BTreeMap::new()),
    };

    let schema = FieldSchema::from_names(&names)?.with_examples(examples);
    tracing::debug!(fields = schema.len(), "parsed schema document");
    Ok(schema)
}
