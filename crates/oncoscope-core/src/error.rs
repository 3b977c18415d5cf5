use thiserror::Error;

/// The field schema could not be built, so no form can be initialised from it.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("list of selected features is empty")]
    Empty,

    #[error("feature name at position {position} is blank")]
    BlankName { position: usize },

    #[error("features '{first}' and '{second}' both map to key '{key}'")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("malformed schema document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Form values or user input rejected before any network call is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("no field schema has been loaded yet")]
    SchemaNotLoaded,

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("value '{raw}' for field '{key}' is not a number")]
    NotNumeric { key: String, raw: String },

    #[error("fields missing a numeric value: {}", .keys.join(", "))]
    Missing { keys: Vec<String> },

    #[error("message is {len} characters long; the limit is {max}")]
    MessageTooLong { len: usize, max: usize },
}
