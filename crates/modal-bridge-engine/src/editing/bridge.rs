use std::ops::{Deref, DerefMut};

use crate::editing::{
    CoalescerState, EditorId, MarkRegistry, Mode, ModeIndicator, Platform, Translator,
    UndoCoalescer, lines, search, shift,
};
use crate::host::EditorHost;
use crate::models::{
    CaretShape, LineInformation, Mark, Search, SearchResult, Selection, ViewPortInformation,
};
use crate::{EditorError, Space};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CommandLine {
    enabled: bool,
    content: String,
}

/// Façade over one open host editor.
///
/// Holds the host together with the per-editor state the modal core relies
/// on: the active space, marks, undo coalescing, the mode indicator and the
/// line-wise selection hint. Created by [`crate::editing::EditorRegistry`].
pub struct EditorBridge<H: EditorHost> {
    id: EditorId,
    host: H,
    space: Space,
    marks: MarkRegistry,
    undo: UndoCoalescer,
    indicator: ModeIndicator,
    mode: Mode,
    default_caret_width: u32,
    line_wise_selection: bool,
    line_wise_mouse_selection: bool,
    horizontal_position: usize,
    command_line: CommandLine,
}

impl<H: EditorHost> EditorBridge<H> {
    pub fn new(id: EditorId, host: H, indicator: ModeIndicator) -> Self {
        let default_caret_width = host.caret_size().width;
        indicator.set(Mode::Normal.indicator_text());
        Self {
            id,
            host,
            space: Space::Model,
            marks: MarkRegistry::new(),
            undo: UndoCoalescer::new(),
            indicator,
            mode: Mode::Normal,
            default_caret_width,
            line_wise_selection: false,
            line_wise_mouse_selection: false,
            horizontal_position: 0,
            command_line: CommandLine::default(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn undo_state(&self) -> CoalescerState {
        self.undo.state()
    }

    pub fn indicator(&self) -> &ModeIndicator {
        &self.indicator
    }

    /// Command-line content, present only in command-line mode
    pub fn command_line(&self) -> Option<&str> {
        self.command_line
            .enabled
            .then_some(self.command_line.content.as_str())
    }

    pub fn is_line_wise_selection(&self) -> bool {
        self.line_wise_selection
    }

    /// Turn redraw off until the returned guard is dropped
    pub fn suspend_repaint(&mut self) -> RepaintGuard<'_, H> {
        self.set_repaint(false);
        RepaintGuard { bridge: self }
    }

    /// Open a change that ends when the returned guard is dropped
    pub fn change_scope(&mut self) -> ChangeGuard<'_, H> {
        self.begin_change();
        ChangeGuard { bridge: self }
    }

    fn translator(&self) -> Translator<'_> {
        Translator::new(self.host.projection())
    }

    fn require_space(&self, operation: &'static str, required: Space) -> Result<(), EditorError> {
        if self.space == required {
            Ok(())
        } else {
            Err(EditorError::WrongSpace {
                operation,
                required,
                active: self.space,
            })
        }
    }

    fn enter_mode(&mut self, mode: Mode) {
        if let Some(shape) = mode.caret_shape() {
            self.set_caret(shape);
        }
        self.mode = mode;
        self.indicator.set(mode.indicator_text());
    }
}

impl<H: EditorHost> Platform for EditorBridge<H> {
    fn id(&self) -> EditorId {
        self.id
    }

    fn space(&self) -> Space {
        self.space
    }

    fn set_space(&mut self, space: Space) {
        if self.space != space {
            log::debug!("Editor {} now in {space} space", self.id);
        }
        self.space = space;
    }

    fn set_default_space(&mut self) {
        self.set_space(Space::Model);
    }

    fn text(&self, offset: usize, length: usize) -> Result<String, EditorError> {
        Ok(lines::text(&self.host, self.space, offset, length)?)
    }

    fn replace(&mut self, offset: usize, length: usize, text: &str) -> Result<(), EditorError> {
        self.require_space("replace", Space::Model)?;
        let offset = offset.min(self.host.len());
        self.host.replace(offset, length, text)?;
        Ok(())
    }

    fn insert(&mut self, text: &str) -> Result<(), EditorError> {
        self.host.insert_at_caret(text)?;
        Ok(())
    }

    fn position(&self) -> usize {
        self.translator()
            .view_offset_into(self.space, self.host.caret_offset())
    }

    fn set_position(&mut self, offset: usize) {
        let view_offset = self.translator().view_offset_from(self.space, offset);
        self.host.set_caret_offset(view_offset);
        self.host.reveal_caret();
    }

    fn line_information(&self) -> Result<LineInformation, EditorError> {
        self.line_information_of_offset(self.position())
    }

    fn line_information_at(&self, line: usize) -> Result<LineInformation, EditorError> {
        Ok(lines::line_information(&self.host, self.space, line)?)
    }

    fn line_information_of_offset(&self, offset: usize) -> Result<LineInformation, EditorError> {
        Ok(lines::line_information_of_offset(
            &self.host, self.space, offset,
        )?)
    }

    fn number_of_lines(&self) -> usize {
        lines::line_count(&self.host, self.space)
    }

    fn text_length(&self) -> usize {
        lines::text_length(&self.host, self.space)
    }

    fn horizontal_position(&self) -> usize {
        self.horizontal_position
    }

    fn update_horizontal_position(&mut self) {
        match self.line_information() {
            Ok(line) => {
                self.horizontal_position = self.position().saturating_sub(line.begin_offset);
            }
            Err(e) => log::warn!("Keeping horizontal position: {e}"),
        }
    }

    fn selection(&self) -> Option<Selection> {
        let range = self.host.selected_range();
        if range.length == 0 {
            return None;
        }
        let translator = self.translator();
        Some(Selection::from_offsets(
            translator.offset_into(self.space, range.offset),
            translator.offset_into(self.space, range.end()),
            self.line_wise_selection,
        ))
    }

    fn set_selection(&mut self, selection: Option<Selection>) {
        match selection {
            Some(selection) => {
                match self.space {
                    Space::Model => self
                        .host
                        .select_model_range(selection.start, selection.length),
                    Space::View => self
                        .host
                        .select_view_range(selection.start, selection.length),
                }
                self.line_wise_selection = selection.line_wise;
            }
            None => {
                let caret = self.host.caret_offset();
                self.host.set_caret_offset(caret);
            }
        }
    }

    fn set_line_wise_mouse_selection(&mut self, line_wise: bool) {
        self.line_wise_mouse_selection = line_wise;
    }

    fn find(&mut self, search: &Search, from: usize) -> SearchResult {
        search::find(&mut self.host, self.space, search, from)
    }

    fn begin_change(&mut self) {
        self.undo.begin_change(self.host.undo_manager());
    }

    fn end_change(&mut self) -> Result<(), EditorError> {
        self.undo.end_change(self.host.undo_manager())
    }

    fn set_undo_mark(&mut self) {
        self.undo.set_undo_mark(self.host.undo_manager());
    }

    fn undo(&mut self) {
        self.undo.undo(self.host.undo_manager());
    }

    fn redo(&mut self) {
        self.undo.redo(self.host.undo_manager());
    }

    fn set_mark(&mut self, name: &str) {
        let offset = self.translator().to_model_offset(self.host.caret_offset());
        if let Err(e) = self.marks.set(&mut self.host, name, offset) {
            log::warn!("Failed to set mark {name:?} at {offset}: {e}");
        }
    }

    fn mark(&mut self, name: &str) -> Option<Mark> {
        let model_offset = self.marks.resolve(&mut self.host, name)?;
        let offset = self.translator().offset_into(self.space, model_offset);
        match lines::line_information_of_offset(&self.host, self.space, offset) {
            Ok(line) => Some(Mark {
                name: name.to_string(),
                offset,
                line,
            }),
            Err(e) => {
                log::warn!("Mark {name:?} could not be resolved: {e}");
                None
            }
        }
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn to_insert_mode(&mut self) {
        self.command_line.enabled = false;
        self.line_wise_selection = self.line_wise_mouse_selection;
        self.enter_mode(Mode::Insert);
    }

    fn to_normal_mode(&mut self) {
        self.command_line.enabled = false;
        self.line_wise_selection = self.line_wise_mouse_selection;
        self.enter_mode(Mode::Normal);
    }

    fn to_operator_pending_mode(&mut self) {
        self.enter_mode(Mode::OperatorPending);
    }

    fn to_visual_mode(&mut self) {
        self.line_wise_selection = false;
        self.enter_mode(Mode::Visual);
    }

    fn to_command_line_mode(&mut self) {
        self.command_line.enabled = true;
        self.enter_mode(Mode::CommandLine);
    }

    fn set_command_line(&mut self, text: &str) {
        self.command_line.content = text.to_string();
    }

    fn activate(&mut self) {
        self.indicator.set(self.mode.indicator_text());
    }

    fn set_caret(&mut self, shape: CaretShape) {
        let size = shape.size(
            self.host.font_metrics(),
            self.default_caret_width,
            self.host.caret_size(),
        );
        self.host.set_caret_size(size);
    }

    fn save(&mut self) -> bool {
        if !self.host.is_dirty() {
            return true;
        }
        match self.host.save() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save editor {}: {e}", self.id);
                false
            }
        }
    }

    fn close(&mut self, force: bool) -> bool {
        if force || !self.host.is_dirty() {
            self.host.close();
            true
        } else {
            false
        }
    }

    fn is_editable(&self) -> bool {
        self.host.is_editable()
    }

    fn shift(&mut self, line: usize, line_count: usize, amount: i32) -> Result<(), EditorError> {
        self.require_space("shift", Space::Model)?;
        let mut scope = self.change_scope();
        shift::shift_lines(&mut scope.host, line, line_count, amount)?;
        Ok(())
    }

    fn format(&mut self, selection: Option<Selection>) -> Result<(), EditorError> {
        let mut scope = self.change_scope();
        if selection.is_some() {
            scope.set_selection(selection);
        }
        scope.host.format()?;
        Ok(())
    }

    fn view_port_information(&self) -> ViewPortInformation {
        ViewPortInformation::new(self.host.top_line(), self.host.bottom_line())
    }

    fn set_top_line(&mut self, line: usize) -> Result<(), EditorError> {
        self.require_space("set_top_line", Space::View)?;
        self.host.set_top_line(line);
        Ok(())
    }

    fn set_repaint(&mut self, repaint: bool) {
        self.host.set_redraw(repaint);
    }
}

/// Redraw stays off while this guard lives
pub struct RepaintGuard<'a, H: EditorHost> {
    bridge: &'a mut EditorBridge<H>,
}

impl<H: EditorHost> Drop for RepaintGuard<'_, H> {
    fn drop(&mut self) {
        self.bridge.set_repaint(true);
    }
}

impl<H: EditorHost> Deref for RepaintGuard<'_, H> {
    type Target = EditorBridge<H>;

    fn deref(&self) -> &Self::Target {
        &*self.bridge
    }
}

impl<H: EditorHost> DerefMut for RepaintGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.bridge
    }
}

/// Edits made through this guard form one undo step
pub struct ChangeGuard<'a, H: EditorHost> {
    bridge: &'a mut EditorBridge<H>,
}

impl<H: EditorHost> Drop for ChangeGuard<'_, H> {
    fn drop(&mut self) {
        if let Err(e) = self.bridge.end_change() {
            log::error!("Change scope closed unbalanced: {e}");
        }
    }
}

impl<H: EditorHost> Deref for ChangeGuard<'_, H> {
    type Target = EditorBridge<H>;

    fn deref(&self) -> &Self::Target {
        &*self.bridge
    }
}

impl<H: EditorHost> DerefMut for ChangeGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.bridge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryEditor, MemoryEditorOptions, TextViewer};
    use crate::models::CaretSize;
    use crate::tests::{bridge, folded_bridge};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replace_rejected_in_view_space() {
        let mut editor = bridge("abc");
        editor.set_space(Space::View);

        let result = editor.replace(0, 1, "x");

        assert!(matches!(
            result,
            Err(EditorError::WrongSpace {
                operation: "replace",
                required: Space::Model,
                active: Space::View
            })
        ));
        assert_eq!(editor.host().text(), "abc");
    }

    #[test]
    fn test_replace_clamps_offset_to_end() {
        let mut editor = bridge("abc");
        editor.replace(99, 0, "!").unwrap();
        assert_eq!(editor.host().text(), "abc!");
    }

    #[test]
    fn test_replace_reports_bad_length() {
        let mut editor = bridge("abc");
        let result = editor.replace(1, 10, "x");
        assert!(matches!(result, Err(EditorError::Host(_))));
    }

    #[test]
    fn test_position_per_space() {
        let mut editor = folded_bridge();
        editor.set_position(19);
        assert_eq!(editor.position(), 19);

        editor.set_space(Space::View);
        assert_eq!(editor.position(), 9);
    }

    #[test]
    fn test_selection_none_collapses_to_caret() {
        let mut editor = bridge("alpha beta");
        editor.set_selection(Some(Selection::new(2, 4, false)));
        assert_eq!(editor.selection(), Some(Selection::new(2, 4, false)));

        editor.set_space(Space::View);
        editor.set_selection(None);

        assert_eq!(editor.selection(), None);
        assert_eq!(editor.position(), 6);
    }

    #[test]
    fn test_selection_translates_to_view() {
        let mut editor = folded_bridge();
        editor.set_selection(Some(Selection::new(19, 4, true)));

        editor.set_space(Space::View);

        assert_eq!(editor.selection(), Some(Selection::new(9, 4, true)));
    }

    #[test]
    fn test_mode_changes_shape_caret_and_indicator() {
        let mut editor = bridge("text");
        assert_eq!(editor.indicator().text(), "-- NORMAL --");

        editor.to_insert_mode();
        assert_eq!(editor.host().caret_size(), CaretSize::new(2, 16));
        assert_eq!(editor.indicator().text(), "-- INSERT --");

        editor.to_normal_mode();
        assert_eq!(editor.host().caret_size(), CaretSize::new(8, 16));

        editor.to_operator_pending_mode();
        assert_eq!(editor.host().caret_size(), CaretSize::new(8, 8));
        assert_eq!(editor.indicator().text(), "-- OPERATOR --");

        editor.to_visual_mode();
        assert_eq!(editor.host().caret_size(), CaretSize::new(1, 8));
        assert_eq!(editor.indicator().text(), "-- VISUAL --");
    }

    #[test]
    fn test_mode_changes_never_move_caret() {
        let mut editor = bridge("some text");
        editor.set_position(5);

        editor.to_insert_mode();
        editor.to_visual_mode();
        editor.to_normal_mode();

        assert_eq!(editor.position(), 5);
    }

    #[test]
    fn test_line_wise_hint_follows_mouse_selection() {
        let mut editor = bridge("text");
        editor.set_line_wise_mouse_selection(true);

        editor.to_insert_mode();
        assert!(editor.is_line_wise_selection());

        editor.to_visual_mode();
        assert!(!editor.is_line_wise_selection());

        editor.to_normal_mode();
        assert!(editor.is_line_wise_selection());
    }

    #[test]
    fn test_command_line_only_visible_in_command_mode() {
        let mut editor = bridge("text");
        editor.to_command_line_mode();
        editor.set_command_line(":w");
        assert_eq!(editor.command_line(), Some(":w"));
        assert_eq!(editor.indicator().text(), "-- COMMAND --");

        editor.to_normal_mode();
        assert_eq!(editor.command_line(), None);
    }

    #[test]
    fn test_activate_republishes_mode_text() {
        let mut editor = bridge("text");
        editor.to_insert_mode();
        editor.indicator().set("something else");

        editor.activate();

        assert_eq!(editor.indicator().text(), "-- INSERT --");
    }

    #[test]
    fn test_save_without_changes_is_a_no_op_success() {
        let mut editor = bridge("text");
        assert!(editor.save());
        assert_eq!(editor.host().save_count(), 0);

        editor.replace(0, 0, "more ").unwrap();
        assert!(editor.save());
        assert_eq!(editor.host().save_count(), 1);
    }

    #[test]
    fn test_close_refuses_dirty_editor_unless_forced() {
        let mut editor = bridge("text");
        editor.replace(0, 0, "x").unwrap();

        assert!(!editor.close(false));
        assert!(!editor.host().is_closed());
        assert!(editor.close(true));
        assert!(editor.host().is_closed());
    }

    #[test]
    fn test_shift_in_view_space_fails_fast() {
        let mut editor = bridge("a\nb");
        editor.set_space(Space::View);

        let result = editor.shift(0, 1, 1);

        assert!(matches!(result, Err(EditorError::WrongSpace { .. })));
        assert!(editor.host().shift_calls().is_empty());
        assert_eq!(editor.undo_state(), CoalescerState::Idle);
    }

    #[test]
    fn test_failed_shift_releases_undo_lock() {
        let mut editor = bridge("a\nb");

        let result = editor.shift(1, 5, 1);

        assert!(matches!(result, Err(EditorError::Host(_))));
        assert_eq!(editor.undo_state(), CoalescerState::Idle);
    }

    #[test]
    fn test_set_top_line_requires_view_space() {
        let mut editor = bridge("a\nb\nc\nd");
        assert!(editor.set_top_line(2).is_err());

        editor.set_space(Space::View);
        editor.set_top_line(2).unwrap();

        assert_eq!(editor.view_port_information().top_line, 2);
    }

    #[test]
    fn test_repaint_guard_restores_redraw() {
        let mut editor = bridge("text");
        {
            let mut guard = editor.suspend_repaint();
            assert!(!guard.host().redraw_enabled());
            guard.replace(0, 0, "more ").unwrap();
        }
        assert!(editor.host().redraw_enabled());
    }

    #[test]
    fn test_change_scope_groups_edits() {
        let mut editor = bridge("text");
        {
            let mut scope = editor.change_scope();
            scope.replace(0, 0, "a").unwrap();
            scope.replace(0, 0, "b").unwrap();
            assert_eq!(scope.undo_state(), CoalescerState::Locked);
        }
        assert_eq!(editor.host().undo_depth(), 1);

        editor.undo();
        assert_eq!(editor.host().text(), "text");
    }

    #[test]
    fn test_format_is_one_undo_step() {
        let mut editor = bridge("a  \nb  \nc");
        editor.format(None).unwrap();
        assert_eq!(editor.host().text(), "a\nb\nc");

        editor.undo();
        assert_eq!(editor.host().text(), "a  \nb  \nc");
    }

    #[test]
    fn test_horizontal_position_tracks_column() {
        let mut editor = bridge("first\nsecond");
        editor.set_position(9);

        editor.update_horizontal_position();

        assert_eq!(editor.horizontal_position(), 3);
    }

    #[test]
    fn test_without_native_undo_everything_is_a_no_op() {
        let options = MemoryEditorOptions {
            undo: false,
            ..MemoryEditorOptions::default()
        };
        let mut editor = EditorBridge::new(
            EditorId::new(),
            MemoryEditor::with_options("abc", options),
            ModeIndicator::default(),
        );

        editor.begin_change();
        editor.replace(0, 0, "x").unwrap();
        editor.end_change().unwrap();
        editor.undo();

        assert_eq!(editor.host().text(), "xabc");
    }

    #[test]
    fn test_offsets_inside_character_are_rejected() {
        // "é" spans bytes 0..2
        let mut editor = bridge("é\nb");

        assert!(matches!(editor.line_information_of_offset(1), Err(EditorError::Host(_))));
        assert!(matches!(editor.text(1, 1), Err(EditorError::Host(_))));
        assert!(matches!(editor.replace(1, 0, "x"), Err(EditorError::Host(_))));
        assert_eq!(editor.line_information_of_offset(3).unwrap().number, 1);

        editor.set_position(1);
        editor.insert("x").unwrap();

        assert_eq!(editor.host().text(), "xé\nb");
    }

    #[test]
    fn test_is_editable_reflects_host() {
        let options = MemoryEditorOptions {
            editable: false,
            ..MemoryEditorOptions::default()
        };
        let editor = EditorBridge::new(
            EditorId::new(),
            MemoryEditor::with_options("abc", options),
            ModeIndicator::default(),
        );
        assert!(!editor.is_editable());
    }
}
