use serde::Serialize;

/// A selected range. `line_wise` is a hint for downstream operators and is
/// not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub start: usize,
    pub length: usize,
    pub line_wise: bool,
}

impl Selection {
    pub fn new(start: usize, length: usize, line_wise: bool) -> Self {
        Self {
            start,
            length,
            line_wise,
        }
    }

    /// Build a selection spanning two offsets given in either order
    pub fn from_offsets(from: usize, to: usize, line_wise: bool) -> Self {
        let start = from.min(to);
        Self::new(start, from.max(to) - start, line_wise)
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
