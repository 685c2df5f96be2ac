//! In-memory host editor.
//!
//! `MemoryEditor` keeps the document in a single `xi_rope::Rope`. Every edit
//! is compiled to a delta; tracked positions, folds, the caret and the
//! selection are carried through that delta, so they stay anchored to the
//! text they point at. Collapsed folds provide a real model/view projection.

mod history;
mod projection;

use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

use regex::Regex;
use xi_rope::Rope;
use xi_rope::delta::{Builder, Transformer};
use xi_rope::tree::Cursor;

use crate::HostError;
use crate::host::{
    EditorHost, EditorPart, PositionId, Projection, ShiftDirection, TextDocument, TextViewer,
    TrackedPosition, UndoManager,
};
use crate::models::{CaretSize, FindRequest, FontMetrics, Region};

use history::{EditRecord, NativeHistory};
pub use projection::Fold;
use projection::{ProjectionMap, transform_folds};

/// Presentation and behaviour settings of a [`MemoryEditor`]
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryEditorOptions {
    pub font: FontMetrics,
    pub caret_width: u32,
    /// Unit inserted by a right shift
    pub indent: String,
    /// Spaces removed by a left shift when a line is not tab-indented
    pub tab_width: usize,
    pub visible_lines: usize,
    pub editable: bool,
    /// Whether the editor exposes a native undo manager
    pub undo: bool,
}

impl Default for MemoryEditorOptions {
    fn default() -> Self {
        Self {
            font: FontMetrics::default(),
            caret_width: 2,
            indent: "\t".to_string(),
            tab_width: 4,
            visible_lines: 40,
            editable: true,
            undo: true,
        }
    }
}

pub struct MemoryEditor {
    buffer: Rope,
    options: MemoryEditorOptions,
    folds: Vec<Fold>,
    map: ProjectionMap,
    positions: BTreeMap<PositionId, TrackedPosition>,
    next_position: u64,
    history: NativeHistory,
    /// Caret as a model offset, so fold changes never move it
    caret: usize,
    /// Selection in model space; empty when nothing is selected
    selection: Range<usize>,
    top_line: usize,
    redraw: bool,
    caret_size: CaretSize,
    dirty: bool,
    closed: bool,
    path: Option<PathBuf>,
    shift_calls: Vec<ShiftDirection>,
    save_count: usize,
}

impl MemoryEditor {
    pub fn new(text: &str) -> Self {
        Self::with_options(text, MemoryEditorOptions::default())
    }

    pub fn with_options(text: &str, options: MemoryEditorOptions) -> Self {
        let buffer = Rope::from(text);
        let map = ProjectionMap::build(&buffer, &[]);
        let caret_size = CaretSize::new(options.caret_width, options.font.line_height);
        Self {
            buffer,
            options,
            folds: Vec::new(),
            map,
            positions: BTreeMap::new(),
            next_position: 0,
            history: NativeHistory::default(),
            caret: 0,
            selection: 0..0,
            top_line: 0,
            redraw: true,
            caret_size,
            dirty: false,
            closed: false,
            path: None,
            shift_calls: Vec::new(),
            save_count: 0,
        }
    }

    /// Create an editor from raw bytes, which must be UTF-8
    pub fn from_bytes(bytes: &[u8], options: MemoryEditorOptions) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::with_options(text, options))
    }

    /// Load a file; saving writes back to the same path
    pub fn open(path: &Path, options: MemoryEditorOptions) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)?;
        let mut editor = Self::from_bytes(&bytes, options)?;
        editor.path = Some(path.to_path_buf());
        Ok(editor)
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn options(&self) -> &MemoryEditorOptions {
        &self.options
    }

    /// Define a fold over lines `first..=last` and collapse it.
    ///
    /// Returns the index of the new fold.
    pub fn collapse_lines(&mut self, first: usize, last: usize) -> Result<usize, HostError> {
        let count = self.line_count();
        if first >= last || last >= count {
            return Err(HostError::BadLine { line: last, count });
        }
        let start = self.line_region(first)?.offset;
        let end = self.line_region(last)?.end();
        self.folds.push(Fold {
            range: start..end,
            collapsed: true,
        });
        self.rebuild_projection();
        Ok(self.folds.len() - 1)
    }

    pub fn expand(&mut self, fold: usize) {
        if let Some(fold) = self.folds.get_mut(fold) {
            fold.collapsed = false;
        }
        self.rebuild_projection();
    }

    pub fn collapse(&mut self, fold: usize) {
        if let Some(fold) = self.folds.get_mut(fold) {
            fold.collapsed = true;
        }
        self.rebuild_projection();
    }

    pub fn expand_all(&mut self) {
        for fold in &mut self.folds {
            fold.collapsed = false;
        }
        self.rebuild_projection();
    }

    pub fn folds(&self) -> &[Fold] {
        &self.folds
    }

    /// Every native shift invocation, oldest first
    pub fn shift_calls(&self) -> &[ShiftDirection] {
        &self.shift_calls
    }

    /// Number of steps on the native undo stack
    pub fn undo_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn redraw_enabled(&self) -> bool {
        self.redraw
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }

    fn rebuild_projection(&mut self) {
        self.map = ProjectionMap::build(&self.buffer, &self.folds);
    }

    /// Both ends must lie inside the text and on character boundaries
    fn check_range(&self, offset: usize, length: usize) -> Result<(), HostError> {
        let len = self.buffer.len();
        if offset > len
            || length > len - offset
            || !self.is_char_boundary(offset)
            || !self.is_char_boundary(offset + length)
        {
            return Err(HostError::BadLocation {
                offset,
                length,
                len,
            });
        }
        Ok(())
    }

    /// `offset` must not exceed the length
    fn is_char_boundary(&self, offset: usize) -> bool {
        Cursor::new(&self.buffer, offset)
            .get_leaf()
            .is_none_or(|(leaf, within)| leaf.is_char_boundary(within))
    }

    /// Nearest character boundary at or before `offset`
    fn floor_char_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.buffer.len());
        while !self.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Apply one replacement, carrying every anchored offset through it
    fn apply_edit(
        &mut self,
        offset: usize,
        length: usize,
        text: &str,
        record: bool,
    ) -> Result<(), HostError> {
        self.check_range(offset, length)?;
        let removed_range = offset..offset + length;
        let removed = self.buffer.slice_to_cow(removed_range.clone()).into_owned();

        let mut builder = Builder::new(self.buffer.len());
        builder.replace(removed_range.clone(), Rope::from(text));
        let delta = builder.build();

        let mut transformer = Transformer::new(&delta);
        for position in self.positions.values_mut().filter(|p| !p.deleted) {
            if removed_range.contains(&position.offset) {
                position.deleted = true;
            } else {
                position.offset = transformer.transform(position.offset, true);
            }
        }
        self.caret = transformer.transform(self.caret, true);
        let start = transformer.transform(self.selection.start, false);
        let end = transformer.transform(self.selection.end, true);
        self.selection = start.min(end)..end.max(start);

        self.buffer = delta.apply(&self.buffer);
        transform_folds(&mut self.folds, &delta, self.buffer.len());
        self.rebuild_projection();

        if record {
            self.history.record(EditRecord {
                offset,
                removed,
                inserted: text.to_string(),
            });
        }
        self.dirty = true;
        Ok(())
    }

    /// Model lines touched by the selection; a selection ending at column 0
    /// of a later line does not include that line
    fn selected_lines(&self) -> Range<usize> {
        let first = self.buffer.line_of_offset(self.selection.start);
        let mut last = self.buffer.line_of_offset(self.selection.end);
        if last > first && self.buffer.offset_of_line(last) == self.selection.end {
            last -= 1;
        }
        first..last + 1
    }

    fn line_text(&self, line: usize) -> Result<(Region, String), HostError> {
        let region = self.line_region(line)?;
        let text = self.get(region.offset, region.length)?;
        Ok((region, text))
    }

    fn shift_line(&mut self, line: usize, direction: ShiftDirection) -> Result<(), HostError> {
        let (region, text) = self.line_text(line)?;
        match direction {
            ShiftDirection::Right => {
                let indent = self.options.indent.clone();
                self.apply_edit(region.offset, 0, &indent, true)
            }
            ShiftDirection::Left => {
                let width = if text.starts_with('\t') {
                    1
                } else if text.starts_with(self.options.indent.as_str()) {
                    self.options.indent.len()
                } else {
                    text.chars()
                        .take(self.options.tab_width)
                        .take_while(|&c| c == ' ')
                        .count()
                };
                if width == 0 {
                    return Ok(());
                }
                self.apply_edit(region.offset, width, "", true)
            }
        }
    }

    fn replay(&mut self, group: &[EditRecord], backward: bool) {
        let apply = |editor: &mut Self, offset: usize, length: usize, text: &str| {
            if let Err(e) = editor.apply_edit(offset, length, text, false) {
                log::warn!("Failed to replay edit at {offset}: {e}");
            }
        };
        if backward {
            for edit in group.iter().rev() {
                apply(self, edit.offset, edit.inserted.len(), &edit.removed);
            }
        } else {
            for edit in group {
                apply(self, edit.offset, edit.removed.len(), &edit.inserted);
            }
        }
        if let Some(first) = group.first() {
            self.caret = first.offset.min(self.buffer.len());
            self.selection = self.caret..self.caret;
        }
    }
}

/// Last match starting at or before `offset`, overlapping matches included
fn last_match_starting_by(regex: &Regex, text: &str, offset: usize) -> Option<Range<usize>> {
    let mut last = None;
    let mut from = 0;
    while let Some(found) = regex.find_at(text, from) {
        if found.start() > offset {
            break;
        }
        let next_char = text[found.start()..].chars().next().map_or(1, char::len_utf8);
        from = found.start() + next_char;
        last = Some(found.range());
        if from > text.len() {
            break;
        }
    }
    last
}

impl TextDocument for MemoryEditor {
    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn get(&self, offset: usize, length: usize) -> Result<String, HostError> {
        self.check_range(offset, length)?;
        Ok(self.buffer.slice_to_cow(offset..offset + length).into_owned())
    }

    fn replace(&mut self, offset: usize, length: usize, text: &str) -> Result<(), HostError> {
        self.apply_edit(offset, length, text, true)
    }

    fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }

    fn line_of_offset(&self, offset: usize) -> Result<usize, HostError> {
        self.check_range(offset, 0)?;
        Ok(self.buffer.line_of_offset(offset))
    }

    fn line_region(&self, line: usize) -> Result<Region, HostError> {
        let count = self.line_count();
        if line >= count {
            return Err(HostError::BadLine { line, count });
        }
        let start = self.buffer.offset_of_line(line);
        let end = if line + 1 < count {
            self.buffer.offset_of_line(line + 1) - 1
        } else {
            self.buffer.len()
        };
        Ok(Region::new(start, end - start))
    }

    fn add_position(&mut self, offset: usize) -> Result<PositionId, HostError> {
        self.check_range(offset, 0)?;
        let id = PositionId(self.next_position);
        self.next_position += 1;
        self.positions.insert(
            id,
            TrackedPosition {
                offset,
                deleted: false,
            },
        );
        Ok(id)
    }

    fn position(&self, id: PositionId) -> Option<TrackedPosition> {
        self.positions.get(&id).copied()
    }

    fn remove_position(&mut self, id: PositionId) {
        self.positions.remove(&id);
    }
}

impl Projection for MemoryEditor {
    fn model_offset_to_view(&self, offset: usize) -> usize {
        self.map.model_offset_to_view(offset)
    }

    fn view_offset_to_model(&self, offset: usize) -> usize {
        self.map.view_offset_to_model(offset)
    }

    fn model_line_to_view(&self, line: usize) -> usize {
        self.map.model_line_to_view(line)
    }

    fn view_line_to_model(&self, line: usize) -> usize {
        self.map.view_line_to_model(line)
    }
}

impl TextViewer for MemoryEditor {
    fn view_text(&self, offset: usize, length: usize) -> Result<String, HostError> {
        let text = self.map.view_string(&self.buffer);
        text.get(offset..offset.saturating_add(length))
            .map(str::to_string)
            .ok_or(HostError::BadLocation {
                offset,
                length,
                len: text.len(),
            })
    }

    fn view_len(&self) -> usize {
        self.map.view_len()
    }

    fn view_line_count(&self) -> usize {
        self.map.view_line_count()
    }

    fn view_line_at_offset(&self, offset: usize) -> usize {
        self.map.view_line_at_offset(offset)
    }

    fn caret_offset(&self) -> usize {
        self.map.model_offset_to_view(self.caret)
    }

    fn set_caret_offset(&mut self, offset: usize) {
        self.caret = self.floor_char_boundary(self.map.view_offset_to_model(offset));
        self.selection = self.caret..self.caret;
    }

    fn reveal_caret(&mut self) {
        let line = self.map.view_line_at_offset(self.caret_offset());
        let visible = self.options.visible_lines.max(1);
        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + visible {
            self.top_line = line + 1 - visible;
        }
    }

    fn insert_at_caret(&mut self, text: &str) -> Result<(), HostError> {
        let selection = self.selection.clone();
        let (offset, length) = if selection.is_empty() {
            (self.caret, 0)
        } else {
            (selection.start, selection.len())
        };
        self.apply_edit(offset, length, text, true)?;
        self.caret = offset + text.len();
        self.selection = self.caret..self.caret;
        Ok(())
    }

    fn selected_range(&self) -> Region {
        Region::new(self.selection.start, self.selection.len())
    }

    fn select_model_range(&mut self, start: usize, length: usize) {
        let end = self.floor_char_boundary(start.saturating_add(length));
        let start = self.floor_char_boundary(start);
        self.selection = start..end;
        self.caret = end;
    }

    fn select_view_range(&mut self, start: usize, length: usize) {
        let model_start = self.map.view_offset_to_model(start);
        let model_end = self.map.view_offset_to_model(start.saturating_add(length));
        self.select_model_range(model_start, model_end.saturating_sub(model_start));
    }

    fn find_and_select(&mut self, offset: usize, request: FindRequest<'_>) -> Option<usize> {
        if request.keyword.is_empty() {
            return None;
        }
        let mut pattern = regex::escape(request.keyword);
        if request.whole_word {
            pattern = format!(r"\b{pattern}\b");
        }
        if !request.case_sensitive {
            pattern = format!("(?i){pattern}");
        }
        let regex = match Regex::new(&pattern) {
            Ok(regex) => regex,
            Err(e) => {
                log::warn!("Invalid search pattern {pattern:?}: {e}");
                return None;
            }
        };

        let text = self.map.view_string(&self.buffer);
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        let found = if request.forward {
            regex.find_at(&text, offset).map(|m| m.range())
        } else {
            last_match_starting_by(&regex, &text, offset)
        }?;

        self.select_view_range(found.start, found.len());
        self.reveal_caret();
        Some(found.start)
    }

    fn shift(&mut self, direction: ShiftDirection) -> Result<(), HostError> {
        self.shift_calls.push(direction);
        for line in self.selected_lines() {
            self.shift_line(line, direction)?;
        }
        Ok(())
    }

    fn format(&mut self) -> Result<(), HostError> {
        let lines = if self.selection.is_empty() {
            0..self.line_count()
        } else {
            self.selected_lines()
        };
        for line in lines {
            let (region, text) = self.line_text(line)?;
            let trimmed = text.trim_end().len();
            if trimmed < text.len() {
                self.apply_edit(region.offset + trimmed, text.len() - trimmed, "", true)?;
            }
        }
        Ok(())
    }

    fn top_line(&self) -> usize {
        self.top_line
    }

    fn bottom_line(&self) -> usize {
        let last = self.map.view_line_count().saturating_sub(1);
        (self.top_line + self.options.visible_lines.max(1) - 1).min(last)
    }

    fn set_top_line(&mut self, line: usize) {
        self.top_line = line.min(self.map.view_line_count().saturating_sub(1));
    }

    fn set_redraw(&mut self, redraw: bool) {
        self.redraw = redraw;
    }

    fn caret_size(&self) -> CaretSize {
        self.caret_size
    }

    fn set_caret_size(&mut self, size: CaretSize) {
        self.caret_size = size;
    }

    fn font_metrics(&self) -> FontMetrics {
        self.options.font
    }

    fn projection(&self) -> Option<&dyn Projection> {
        Some(self)
    }
}

impl UndoManager for MemoryEditor {
    fn undoable(&self) -> bool {
        self.history.can_undo()
    }

    fn redoable(&self) -> bool {
        self.history.can_redo()
    }

    fn undo(&mut self) {
        if let Some(group) = self.history.take_undo() {
            self.replay(&group, true);
            self.history.push_redo(group);
        }
    }

    fn redo(&mut self) {
        if let Some(group) = self.history.take_redo() {
            self.replay(&group, false);
            self.history.push_undo(group);
        }
    }

    fn begin_compound_change(&mut self) {
        self.history.begin_compound();
    }

    fn end_compound_change(&mut self) {
        self.history.end_compound();
    }
}

impl EditorPart for MemoryEditor {
    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn is_editable(&self) -> bool {
        self.options.editable
    }

    fn save(&mut self) -> Result<(), HostError> {
        if let Some(path) = &self.path {
            std::fs::write(path, self.buffer.to_string())?;
        }
        self.dirty = false;
        self.save_count += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

impl EditorHost for MemoryEditor {
    fn undo_manager(&mut self) -> Option<&mut dyn UndoManager> {
        if self.options.undo {
            Some(self)
        } else {
            None
        }
    }
}
