//! @ai:module:intent Define failure types for building, parsing and printing API errors
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all apierr operations
#[derive(Error, Debug)]
pub enum Error {
    /// The resolved message was missing or was not a string.
    #[error("Message must be a string, got {found}")]
    InvalidMessage { found: &'static str },

    #[error("Invalid status code: {0} (expected 100..=599)")]
    InvalidStatusCode(u16),

    #[error("Unknown error kind: {0}")]
    UnknownKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// @ai:intent Build an InvalidMessage error describing the JSON type that was found
    /// @ai:effects pure
    pub(crate) fn invalid_message(found: Option<&serde_json::Value>) -> Self {
        use serde_json::Value;

        let found = match found {
            None | Some(Value::Null) => "nothing",
            Some(Value::Bool(_)) => "a boolean",
            Some(Value::Number(_)) => "a number",
            Some(Value::String(_)) => "a string",
            Some(Value::Array(_)) => "an array",
            Some(Value::Object(_)) => "an object",
        };
        Error::InvalidMessage { found }
    }

    /// @ai:intent Check whether this is the construction-time type error
    pub fn is_type_error(&self) -> bool {
        matches!(self, Error::InvalidMessage { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
