//! Capabilities a host text editor exposes to the bridge.
//!
//! The façade never reaches into a host directly; it talks to these traits.
//! A host splits into a model-space document ([`TextDocument`]), a view-space
//! widget ([`TextViewer`]) with an optional folding [`Projection`], a native
//! [`UndoManager`] and the [`EditorPart`] lifecycle. [`memory::MemoryEditor`]
//! is an in-memory implementation of all of them.

pub mod memory;

use crate::HostError;
use crate::models::{CaretSize, FindRequest, FontMetrics, Region};

pub use memory::{MemoryEditor, MemoryEditorOptions};

/// Handle to a position the host keeps anchored across edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionId(pub u64);

/// Current state of a tracked position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedPosition {
    pub offset: usize,
    pub deleted: bool,
}

/// Direction of the native indentation shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Left,
    Right,
}

/// The raw document. All offsets and lines are in model space.
pub trait TextDocument {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, offset: usize, length: usize) -> Result<String, HostError>;

    fn replace(&mut self, offset: usize, length: usize, text: &str) -> Result<(), HostError>;

    /// Number of lines; a trailing delimiter opens an empty last line
    fn line_count(&self) -> usize;

    fn line_of_offset(&self, offset: usize) -> Result<usize, HostError>;

    /// Start offset and length (without delimiter) of a line
    fn line_region(&self, line: usize) -> Result<Region, HostError>;

    /// Start tracking `offset` so that it follows subsequent edits
    fn add_position(&mut self, offset: usize) -> Result<PositionId, HostError>;

    fn position(&self, id: PositionId) -> Option<TrackedPosition>;

    fn remove_position(&mut self, id: PositionId);
}

/// Folding capability mapping model coordinates to view coordinates.
///
/// Implementations clamp out-of-range or hidden input rather than failing.
pub trait Projection {
    fn model_offset_to_view(&self, offset: usize) -> usize;
    fn view_offset_to_model(&self, offset: usize) -> usize;
    fn model_line_to_view(&self, line: usize) -> usize;
    fn view_line_to_model(&self, line: usize) -> usize;
}

/// The rendering widget. Offsets and lines are in view space unless stated.
pub trait TextViewer {
    fn view_text(&self, offset: usize, length: usize) -> Result<String, HostError>;
    fn view_len(&self) -> usize;
    fn view_line_count(&self) -> usize;
    fn view_line_at_offset(&self, offset: usize) -> usize;

    fn caret_offset(&self) -> usize;
    fn set_caret_offset(&mut self, offset: usize);
    /// Scroll so that the caret is visible
    fn reveal_caret(&mut self);
    /// Type text at the caret, replacing any selection
    fn insert_at_caret(&mut self, text: &str) -> Result<(), HostError>;

    /// Selected range in model space
    fn selected_range(&self) -> Region;
    fn select_model_range(&mut self, start: usize, length: usize);
    fn select_view_range(&mut self, start: usize, length: usize);

    /// Incremental find starting at a view offset. Selects the match and moves
    /// the caret as a side effect; returns the view offset of the match.
    fn find_and_select(&mut self, offset: usize, request: FindRequest<'_>) -> Option<usize>;
    /// Shift the lines covered by the selection one indentation unit
    fn shift(&mut self, direction: ShiftDirection) -> Result<(), HostError>;
    /// Run the host formatter over the selection
    fn format(&mut self) -> Result<(), HostError>;

    fn top_line(&self) -> usize;
    fn bottom_line(&self) -> usize;
    fn set_top_line(&mut self, line: usize);
    fn set_redraw(&mut self, redraw: bool);

    fn caret_size(&self) -> CaretSize;
    fn set_caret_size(&mut self, size: CaretSize);
    fn font_metrics(&self) -> FontMetrics;

    /// Folding support, if the host has any
    fn projection(&self) -> Option<&dyn Projection>;
}

/// The host's native undo stack.
pub trait UndoManager {
    fn undoable(&self) -> bool;
    fn redoable(&self) -> bool;
    fn undo(&mut self);
    fn redo(&mut self);
    fn begin_compound_change(&mut self);
    fn end_compound_change(&mut self);
}

/// Lifecycle of the editor holding the document.
pub trait EditorPart {
    fn is_dirty(&self) -> bool;
    fn is_editable(&self) -> bool;
    fn save(&mut self) -> Result<(), HostError>;
    fn close(&mut self);
}

/// Everything the editor façade needs from one open editor.
pub trait EditorHost: TextDocument + TextViewer + EditorPart {
    /// Native undo stack; `None` turns the undo façade into no-ops
    fn undo_manager(&mut self) -> Option<&mut dyn UndoManager>;
}
