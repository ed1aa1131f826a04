//! Where a workflow document comes from.

use std::path::PathBuf;

use crate::ContentLink;

/// One of the mutually exclusive ways a definition or parameters document can
/// be supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Document text given directly on the command line.
    Inline(String),
    /// Path to a local file holding the document.
    File(PathBuf),
    /// Externally hosted document the service fetches itself.
    Link(ContentLink),
}

impl DocumentSource {
    /// Short label used in log lines and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inline(_) => "inline",
            Self::File(_) => "file",
            Self::Link(_) => "link",
        }
    }
}

/// A resolved document: either content to embed in the request or a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowContent<T> {
    Inline(T),
    Link(ContentLink),
}
