use tracing::warn;

use crate::error::ValidationError;
use crate::field::{FieldDescriptor, FieldSchema};

/// Current values of the measurement form.
///
/// Values are stored positionally, parallel to the schema, so every field in
/// the schema always has an entry (possibly absent). Validity is derived on
/// demand and never stored.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    schema: Option<FieldSchema>,
    values: Vec<Option<f64>>,
}

impl FormState {
    /// A form with no schema yet. It is never valid until a schema arrives.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(schema: FieldSchema) -> Self {
        let mut form = Self::new();
        form.set_schema(schema);
        form
    }

    /// Replace the schema and reinitialise every value to absent.
    pub fn set_schema(&mut self, schema: FieldSchema) {
        self.values = vec![None; schema.len()];
        self.schema = Some(schema);
    }

    pub fn schema(&self) -> Option<&FieldSchema> {
        self.schema.as_ref()
    }

    fn slot(&mut self, key: &str) -> Result<&mut Option<f64>, ValidationError> {
        let schema = self.schema.as_ref().ok_or(ValidationError::SchemaNotLoaded)?;
        let position = schema
            .position(key)
            .ok_or_else(|| ValidationError::UnknownField(key.to_string()))?;
        Ok(&mut self.values[position])
    }

    /// Set one value. `None` marks the field absent.
    pub fn set_value(&mut self, key: &str, value: Option<f64>) -> Result<(), ValidationError> {
        *self.slot(key)? = value;
        Ok(())
    }

    /// Set one value from user-entered text. Blank text clears the field;
    /// text that does not parse as a number is rejected and the previous
    /// value is kept.
    pub fn set_text(&mut self, key: &str, raw: &str) -> Result<(), ValidationError> {
        let trimmed = raw.trim();
        let value = if trimmed.is_empty() {
            None
        } else {
            let parsed = trimmed
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| ValidationError::NotNumeric {
                    key: key.to_string(),
                    raw: raw.to_string(),
                })?;
            Some(parsed)
        };
        self.set_value(key, value)
    }

    /// Set several values at once. Keys not in the schema are skipped.
    /// Returns how many entries were applied.
    pub fn patch_many<I, S>(&mut self, patch: I) -> usize
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut applied = 0;
        for (key, value) in patch {
            match self.slot(key.as_ref()) {
                Ok(slot) => {
                    *slot = Some(value);
                    applied += 1;
                }
                Err(e) => warn!(key = key.as_ref(), error = %e, "skipping patch entry"),
            }
        }
        applied
    }

    /// Fill every field whose hint is a number with that number.
    pub fn prefill_example(&mut self) -> usize {
        let Some(schema) = self.schema.as_ref() else {
            return 0;
        };
        let patch: Vec<(String, f64)> = schema
            .iter()
            .filter_map(|f| {
                let value = f.hint.as_deref()?.trim().parse::<f64>().ok()?;
                Some((f.key.clone(), value))
            })
            .collect();
        self.patch_many(patch)
    }

    /// Clear all values; the schema is kept.
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|v| *v = None);
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        let position = self.schema.as_ref()?.position(key)?;
        self.values[position]
    }

    /// Descriptors paired with their current values, in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (&FieldDescriptor, Option<f64>)> {
        self.schema
            .iter()
            .flat_map(|schema| schema.iter())
            .zip(self.values.iter().copied())
    }

    pub fn is_field_valid(&self, key: &str) -> bool {
        self.value(key).is_some_and(f64::is_finite)
    }

    /// True iff a schema is loaded and every field holds a finite number.
    pub fn is_valid(&self) -> bool {
        self.schema.is_some() && self.values.iter().all(|v| v.is_some_and(f64::is_finite))
    }

    /// Keys whose value is absent or not finite, in schema order.
    pub fn missing_keys(&self) -> Vec<String> {
        self.entries()
            .filter(|(_, value)| !value.is_some_and(f64::is_finite))
            .map(|(field, _)| field.key.clone())
            .collect()
    }

    /// Materialise the values in schema order.
    ///
    /// Re-checks every value even if `is_valid` was consulted earlier.
    pub fn to_vector(&self) -> Result<Vec<f64>, ValidationError> {
        if self.schema.is_none() {
            return Err(ValidationError::SchemaNotLoaded);
        }
        let missing = self.missing_keys();
        if !missing.is_empty() {
            return Err(ValidationError::Missing { keys: missing });
        }
        Ok(self.values.iter().flatten().copied().collect())
    }
}
