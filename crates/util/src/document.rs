//! Loading of workflow definition and parameters documents.
//!
//! Documents are JSON. A definition is kept as an opaque tree; a parameters
//! document is reshaped into [`WorkflowParameters`].

use std::fs;
use std::path::{Path, PathBuf};

use logicapp_types::{WorkflowParameter, WorkflowParameters};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Keys a [`WorkflowParameter`] object may carry.
const PARAMETER_KEYS: &[&str] = &["type", "value", "metadata", "description"];

/// Error surfaced when reading or parsing a document fails.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin} is not valid JSON: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin} has an unexpected shape: {reason}")]
    Shape { origin: String, reason: String },
}

impl DocumentError {
    pub fn shape(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Shape {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}

/// Parse document text, labelling failures with `origin` (for example
/// `"inline definition"` or a file path).
pub fn parse_document_text(text: &str, origin: &str) -> Result<Value, DocumentError> {
    serde_json::from_str::<Value>(text).map_err(|source| DocumentError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Read and parse a JSON document from disk.
pub fn read_document_file(path: &Path) -> Result<Value, DocumentError> {
    debug!(path = %path.display(), "reading document file");
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document_text(&content, &path.display().to_string())
}

/// Convert a parameters document into named workflow parameters.
///
/// Accepts either a bare `{ name: entry }` object or a resource-manager
/// parameter file envelope (`{ "$schema": ..., "contentVersion": ...,
/// "parameters": { ... } }`). Entries that are objects built only from
/// `type`/`value`/`metadata`/`description` are taken as-is; any other entry
/// becomes the parameter's `value`.
pub fn to_workflow_parameters(document: Value, origin: &str) -> Result<WorkflowParameters, DocumentError> {
    let Value::Object(object) = document else {
        return Err(DocumentError::shape(origin, "parameters must be a JSON object"));
    };

    let entries = unwrap_parameter_envelope(object);
    let mut parameters = WorkflowParameters::with_capacity(entries.len());
    for (name, entry) in entries {
        let parameter = if is_parameter_object(&entry) {
            serde_json::from_value::<WorkflowParameter>(entry).map_err(|source| DocumentError::Parse {
                origin: format!("{origin} (parameter '{name}')"),
                source,
            })?
        } else {
            WorkflowParameter::from_value(entry)
        };
        parameters.insert(name, parameter);
    }
    Ok(parameters)
}

fn unwrap_parameter_envelope(mut object: Map<String, Value>) -> Map<String, Value> {
    let is_envelope = (object.contains_key("$schema") || object.contains_key("contentVersion"))
        && matches!(object.get("parameters"), Some(Value::Object(_)));
    if is_envelope && let Some(Value::Object(inner)) = object.remove("parameters") {
        return inner;
    }
    object
}

fn is_parameter_object(entry: &Value) -> bool {
    match entry {
        Value::Object(map) => !map.is_empty() && map.keys().all(|key| PARAMETER_KEYS.contains(&key.as_str())),
        _ => false,
    }
}
