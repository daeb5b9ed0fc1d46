//! Error types for the card seeder

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Card name already exists: {0}")]
    DuplicateName(String),

    #[error("Unrecognized effect kind: {0}")]
    UnrecognizedEffectKind(String),

    #[error("Malformed field '{field}' (value {value:?}): {reason}")]
    MalformedField {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Store write failed for {entity}: {message}")]
    StoreWrite { entity: String, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SeedError {
    /// Shorthand for a field that failed to coerce
    pub fn malformed(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        SeedError::MalformedField {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn store_write(entity: impl Into<String>, message: impl Into<String>) -> Self {
        SeedError::StoreWrite {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Duplicate names are expected during re-runs and are not fatal
    pub fn is_duplicate(&self) -> bool {
        matches!(self, SeedError::DuplicateName(_))
    }
}

pub type Result<T> = std::result::Result<T, SeedError>;
