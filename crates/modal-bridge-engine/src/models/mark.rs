use serde::Serialize;

use super::LineInformation;

/// Snapshot of a named mark, resolved from its live position on each read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mark {
    pub name: String,
    pub offset: usize,
    pub line: LineInformation,
}
