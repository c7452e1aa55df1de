//! Defines the custom error types for the application.
//!
//! This uses `thiserror` as specified in `Cargo.toml` for clean,
//! boilerplate-free error handling. Every variant is fatal to the
//! current invocation: the converter has no partial-success mode.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("I/O Error: {1} - {0}")]
    Io(#[source] std::io::Error, String),

    #[error("JSON Error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Missing field `{field}` in {entity}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Field `{field}` in {entity} has the wrong type (expected {expected})")]
    FieldType {
        entity: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid timestamp `{value}` for `{field}` (expected pattern {pattern})")]
    Timestamp {
        field: &'static str,
        value: String,
        pattern: &'static str,
    },

    #[error(
        "documentCreator must encode exactly three creators (person, organization, tool), found {0}"
    )]
    CreatorString(usize),

    #[error("Tag-value parse error at line {line}: {message}")]
    TagValue { line: usize, message: String },

    #[error("License expression error: {0}")]
    LicenseExpression(String),

    #[error(
        "Gateway returned HTTP {status} for {url}\n  request payload: {payload}\n  response body: {body}"
    )]
    Gateway {
        status: u16,
        url: String,
        payload: String,
        body: String,
    },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration Error: {0}")]
    Config(String),
}

// Implement From<io::Error> for easier error handling
impl From<std::io::Error> for ConverterError {
    fn from(err: std::io::Error) -> Self {
        ConverterError::Io(err, "IO operation failed".to_string())
    }
}
