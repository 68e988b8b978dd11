//! Error types for template operations.

use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while reading, writing or resolving templates.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The logical ID is absent, or present with a different `Type`.
    /// Both cases are reported the same way.
    #[error("Resource {logical_id} of type {resource_type} not found")]
    NotFound {
        logical_id: String,
        resource_type: String,
    },

    #[error("Resource {logical_id} does not match the {resource_type} schema: {source}")]
    Schema {
        logical_id: String,
        resource_type: String,
        source: serde_json::Error,
    },

    #[error("Invalid {policy}: {source}")]
    Policy {
        policy: &'static str,
        source: serde_json::Error,
    },

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
