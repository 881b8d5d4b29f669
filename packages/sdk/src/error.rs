//! SDK error type

use reqwest::StatusCode;
use thiserror::Error;

use crate::codec::SchemaViolation;

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the Beamlit SDK
#[derive(Debug, Error)]
pub enum Error {
    /// Response body did not match the declared schema
    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolation),

    /// Server answered with a status the endpoint does not document
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body is not valid JSON
    #[error("Invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// Body is JSON but not the object/array the endpoint returns
    #[error("Expected a JSON {expected} body, found {found}")]
    BodyShape {
        expected: &'static str,
        found: crate::codec::JsonKind,
    },

    /// Settings could not be loaded or are incomplete
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool construction or invocation failed
    #[error("Tool error: {0}")]
    Tool(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a tool error
    pub fn tool(msg: impl Into<String>) -> Self {
        Error::Tool(msg.into())
    }

    /// Whether the server rejected the call (as opposed to a decode or transport failure)
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self, Error::UnexpectedStatus { .. })
    }

    /// Status code carried by the error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status(),
            _ => None,
        }
    }
}
