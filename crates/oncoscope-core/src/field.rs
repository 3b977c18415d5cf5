use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::SchemaError;

/// Derive a stable field key from a raw feature name.
///
/// Lower-cases the name and collapses every run of whitespace into a single
/// `_`, so `"Worst  Radius"` and `"worst radius"` both become `worst_radius`.
/// Already-derived keys map to themselves.
pub fn field_key(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// One input field of the measurement form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable identifier derived with [`field_key`].
    pub key: String,
    /// Display text.
    pub label: String,
    /// Example value shown as a placeholder, if one is known.
    pub hint: Option<String>,
}

/// Ordered, non-empty list of field descriptors with unique keys.
///
/// Order is significant: it is the order of the feature vector sent to the
/// prediction service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    fields: Vec<FieldDescriptor>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (position, field) in fields.iter().enumerate() {
            if field.key.is_empty() {
                return Err(SchemaError::BlankName { position });
            }
            if let Some(first) = seen.insert(field.key.as_str(), field.label.as_str()) {
                return Err(SchemaError::DuplicateKey {
                    key: field.key.clone(),
                    first: first.to_string(),
                    second: field.label.clone(),
                });
            }
        }

        Ok(Self { fields })
    }

    /// Build a schema from raw feature names, in the order given.
    ///
    /// Labels and hints come from the built-in catalog when the name is
    /// known; unknown names use the raw name as label and carry no hint.
    pub fn from_names<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Vec::new();
        for (position, name) in names.into_iter().enumerate() {
            let raw = name.as_ref().trim();
            if raw.is_empty() {
                return Err(SchemaError::BlankName { position });
            }
            let key = field_key(raw);
            let descriptor = match catalog::lookup(&key) {
                Some(entry) => FieldDescriptor {
                    key,
                    label: entry.label.to_string(),
                    hint: Some(entry.demo.to_string()),
                },
                None => FieldDescriptor {
                    key,
                    label: raw.to_string(),
                    hint: None,
                },
            };
            fields.push(descriptor);
        }
        Self::new(fields)
    }

    /// Replace hints with explicit example values. Example names go through
    /// [`field_key`]; names that match no field are ignored.
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        for (name, value) in examples {
            let key = field_key(name.as_ref());
            if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
                field.hint = Some(value.to_string());
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Position of `key` in the feature vector.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }
}
