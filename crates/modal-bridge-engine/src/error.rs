use std::path::PathBuf;

use crate::Space;

/// Faults raised by a host environment.
///
/// Interactive paths (path completion, mark resolution) downgrade these to
/// empty results; mutating calls report them through [`EditorError::Host`].
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Bad location: offset {offset} length {length} in text of length {len}")]
    BadLocation {
        offset: usize,
        length: usize,
        len: usize,
    },
    #[error("Bad line: {line} (document has {count} lines)")]
    BadLine { line: usize, count: usize },
    #[error("Failed to list directory {path}: {source}")]
    Traversal {
        path: String,
        source: std::io::Error,
    },
    #[error("Not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Faults surfaced by the editor façade.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Operation {operation} is only allowed in {required} space (active: {active})")]
    WrongSpace {
        operation: &'static str,
        required: Space,
        active: Space,
    },
    #[error("end_change() called without a matching begin_change()")]
    UnbalancedChange,
    #[error(transparent)]
    Host(#[from] HostError),
}
