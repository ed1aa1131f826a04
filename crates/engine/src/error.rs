//! Failure taxonomy for workflow creation.

use std::path::PathBuf;

use logicapp_api::ApiError;
use logicapp_types::{ParseSkuNameError, ParseWorkflowStateError};
use logicapp_util::DocumentError;
use thiserror::Error;

/// Every way a create invocation can fail. Each variant ends the invocation;
/// nothing is retried.
#[derive(Debug, Error)]
pub enum CreateWorkflowError {
    /// Missing or malformed input, detected before any remote call.
    #[error("invalid input: {message}")]
    Validation { message: String },

    /// A definition or parameters file could not be read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A definition or parameters document is malformed.
    #[error("malformed {origin}: {reason}")]
    Parse { origin: String, reason: String },

    /// The service plan's tier has no workflow SKU counterpart.
    #[error(transparent)]
    Mapping(#[from] ParseSkuNameError),

    /// The plan lookup or create call failed.
    #[error(transparent)]
    Remote(#[from] ApiError),
}

impl CreateWorkflowError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<ParseWorkflowStateError> for CreateWorkflowError {
    fn from(error: ParseWorkflowStateError) -> Self {
        Self::validation(error.to_string())
    }
}

impl From<DocumentError> for CreateWorkflowError {
    fn from(error: DocumentError) -> Self {
        match error {
            DocumentError::Io { path, source } => Self::Io { path, source },
            DocumentError::Parse { origin, source } => Self::Parse {
                origin,
                reason: source.to_string(),
            },
            DocumentError::Shape { origin, reason } => Self::Parse { origin, reason },
        }
    }
}
