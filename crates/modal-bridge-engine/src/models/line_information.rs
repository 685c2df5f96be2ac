use serde::Serialize;

/// Start and length of a line, excluding its delimiter.
///
/// Only comparable with values computed under the same [`crate::Space`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineInformation {
    pub number: usize,
    pub begin_offset: usize,
    pub length: usize,
}

impl LineInformation {
    pub fn new(number: usize, begin_offset: usize, length: usize) -> Self {
        Self {
            number,
            begin_offset,
            length,
        }
    }

    /// Offset just past the last character of the line (before the delimiter)
    pub fn end_offset(&self) -> usize {
        self.begin_offset + self.length
    }
}

/// A line region as reported by a host document, always in model space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub offset: usize,
    pub length: usize,
}

impl Region {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}
