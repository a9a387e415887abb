use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed spec document (YAML): {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("malformed spec document (JSON): {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field: {0}")]
    MissingField(String),
}

#[derive(Debug, Error)]
pub enum NameError {
    #[error("invalid operationId `{operation_id}`: {reason}")]
    InvalidOperationId {
        operation_id: String,
        reason: String,
    },

    #[error("invalid parameter `{name}` in `{operation_id}`: {reason}")]
    InvalidParameterName {
        operation_id: String,
        name: String,
        reason: String,
    },
}

impl NameError {
    pub(crate) fn invalid(operation_id: &str, reason: impl Into<String>) -> Self {
        NameError::InvalidOperationId {
            operation_id: operation_id.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("generation failed: {0}")]
    Other(String),
}
