use crate::editing::{EditorId, Mode};
use crate::models::{
    CaretShape, LineInformation, Mark, Search, SearchResult, Selection, ViewPortInformation,
};
use crate::{EditorError, Space};

/// The contract a modal editing core drives.
///
/// Every offset and line argument and result is read in the active [`Space`].
/// Operations that only make sense in one space fail with
/// [`EditorError::WrongSpace`] instead of reinterpreting their input.
pub trait Platform {
    fn id(&self) -> EditorId;

    // Coordinate space
    fn space(&self) -> Space;
    fn set_space(&mut self, space: Space);
    fn set_default_space(&mut self);

    // Text
    fn text(&self, offset: usize, length: usize) -> Result<String, EditorError>;
    /// Model space only. An offset past the end is clamped to the end.
    fn replace(&mut self, offset: usize, length: usize, text: &str) -> Result<(), EditorError>;
    /// Type at the caret, replacing any selection
    fn insert(&mut self, text: &str) -> Result<(), EditorError>;

    // Caret and lines
    fn position(&self) -> usize;
    fn set_position(&mut self, offset: usize);
    /// Line of the caret
    fn line_information(&self) -> Result<LineInformation, EditorError>;
    fn line_information_at(&self, line: usize) -> Result<LineInformation, EditorError>;
    fn line_information_of_offset(&self, offset: usize) -> Result<LineInformation, EditorError>;
    fn number_of_lines(&self) -> usize;
    fn text_length(&self) -> usize;
    fn horizontal_position(&self) -> usize;
    /// Remember the caret column for vertical motions
    fn update_horizontal_position(&mut self);

    // Selection
    fn selection(&self) -> Option<Selection>;
    /// `None` collapses the selection onto the caret
    fn set_selection(&mut self, selection: Option<Selection>);
    fn set_line_wise_mouse_selection(&mut self, line_wise: bool);

    fn find(&mut self, search: &Search, from: usize) -> SearchResult;

    // Undo
    fn begin_change(&mut self);
    fn end_change(&mut self) -> Result<(), EditorError>;
    fn set_undo_mark(&mut self);
    fn undo(&mut self);
    fn redo(&mut self);

    // Marks
    fn set_mark(&mut self, name: &str);
    fn mark(&mut self, name: &str) -> Option<Mark>;

    // Modes
    fn mode(&self) -> Mode;
    fn to_insert_mode(&mut self);
    fn to_normal_mode(&mut self);
    fn to_operator_pending_mode(&mut self);
    fn to_visual_mode(&mut self);
    fn to_command_line_mode(&mut self);
    fn set_command_line(&mut self, text: &str);
    /// Publish the current mode text again, e.g. when the editor gains focus
    fn activate(&mut self);
    fn set_caret(&mut self, shape: CaretShape);

    // Lifecycle
    /// Succeeds without doing anything when there are no unsaved changes
    fn save(&mut self) -> bool;
    /// Refuses to close unsaved changes unless `force` is set
    fn close(&mut self, force: bool) -> bool;
    fn is_editable(&self) -> bool;

    // Bulk edits
    /// Model space only
    fn shift(&mut self, line: usize, line_count: usize, amount: i32) -> Result<(), EditorError>;
    fn format(&mut self, selection: Option<Selection>) -> Result<(), EditorError>;

    // Viewport
    fn view_port_information(&self) -> ViewPortInformation;
    /// View space only
    fn set_top_line(&mut self, line: usize) -> Result<(), EditorError>;
    fn set_repaint(&mut self, repaint: bool);
}
