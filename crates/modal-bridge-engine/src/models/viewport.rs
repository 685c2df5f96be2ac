use serde::Serialize;

/// First and last visible line, in view space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewPortInformation {
    pub top_line: usize,
    pub bottom_line: usize,
}

impl ViewPortInformation {
    pub fn new(top_line: usize, bottom_line: usize) -> Self {
        Self {
            top_line,
            bottom_line,
        }
    }

    pub fn number_of_lines(&self) -> usize {
        self.bottom_line.saturating_sub(self.top_line) + 1
    }
}
