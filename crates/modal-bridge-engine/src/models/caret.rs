use serde::{Deserialize, Serialize};

/// Font measurements a host reports for its text widget, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub average_char_width: u32,
    pub line_height: u32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            average_char_width: 8,
            line_height: 16,
        }
    }
}

/// Caret dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaretSize {
    pub width: u32,
    pub height: u32,
}

impl CaretSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Caret shapes used by the editing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaretShape {
    /// Full-height caret of the host's default width (insert mode)
    Bar,
    /// One character cell (normal mode)
    Block,
    /// Lower half of a character cell (operator-pending mode)
    HalfBlock,
    /// One pixel wide, keeping the current height (visual mode)
    Marker,
}

impl CaretShape {
    /// Resolve the shape to concrete dimensions
    pub fn size(self, metrics: FontMetrics, default_width: u32, current: CaretSize) -> CaretSize {
        match self {
            CaretShape::Bar => CaretSize::new(default_width, metrics.line_height),
            CaretShape::Block => CaretSize::new(metrics.average_char_width, metrics.line_height),
            CaretShape::HalfBlock => {
                CaretSize::new(metrics.average_char_width, metrics.line_height / 2)
            }
            CaretShape::Marker => CaretSize::new(1, current.height),
        }
    }
}
