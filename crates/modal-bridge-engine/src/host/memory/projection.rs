use std::ops::Range;

use xi_rope::delta::Transformer;
use xi_rope::{Delta, Rope, RopeInfo};

/// A collapsible region over whole lines.
///
/// Stored as model offsets (start of the header line to the end of the last
/// line's content) so it can be carried through edits like any other range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub range: Range<usize>,
    pub collapsed: bool,
}

/// One visible model line and its place in the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    model_line: usize,
    model_start: usize,
    /// Length including the line delimiter
    len: usize,
    /// Length without the line delimiter
    content_len: usize,
    view_start: usize,
}

/// Model/view mapping for the current fold state, rebuilt after every edit
/// or fold change.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProjectionMap {
    segments: Vec<Segment>,
    model_len: usize,
    view_len: usize,
}

impl ProjectionMap {
    pub(crate) fn build(buffer: &Rope, folds: &[Fold]) -> Self {
        let model_len = buffer.len();
        let line_count = buffer.line_of_offset(model_len) + 1;

        let mut hidden = vec![false; line_count];
        for fold in folds.iter().filter(|fold| fold.collapsed) {
            let first = buffer.line_of_offset(fold.range.start.min(model_len));
            let last = buffer.line_of_offset(fold.range.end.min(model_len));
            for flag in hidden.iter_mut().take(last + 1).skip(first + 1) {
                *flag = true;
            }
        }

        let mut segments = Vec::with_capacity(line_count);
        let mut view_start = 0;
        for (line, is_hidden) in hidden.iter().enumerate() {
            if *is_hidden {
                continue;
            }
            let model_start = buffer.offset_of_line(line);
            let is_last = line + 1 == line_count;
            let end = if is_last {
                model_len
            } else {
                buffer.offset_of_line(line + 1)
            };
            let len = end - model_start;
            segments.push(Segment {
                model_line: line,
                model_start,
                len,
                content_len: if is_last { len } else { len - 1 },
                view_start,
            });
            view_start += len;
        }

        Self {
            segments,
            model_len,
            view_len: view_start,
        }
    }

    pub(crate) fn view_len(&self) -> usize {
        self.view_len
    }

    pub(crate) fn view_line_count(&self) -> usize {
        self.segments.len()
    }

    /// Hidden offsets land at the end of the fold's header line
    pub(crate) fn model_offset_to_view(&self, offset: usize) -> usize {
        let offset = offset.min(self.model_len);
        let segment = self.segment_by(|segment| segment.model_start <= offset);
        let within = offset - segment.model_start;
        if within <= segment.content_len {
            segment.view_start + within
        } else {
            segment.view_start + segment.content_len
        }
    }

    pub(crate) fn view_offset_to_model(&self, offset: usize) -> usize {
        let offset = offset.min(self.view_len);
        let segment = self.segment_by(|segment| segment.view_start <= offset);
        segment.model_start + (offset - segment.view_start).min(segment.len)
    }

    /// Hidden lines land on the fold's header line
    pub(crate) fn model_line_to_view(&self, line: usize) -> usize {
        self.index_by(|segment| segment.model_line <= line)
    }

    pub(crate) fn view_line_to_model(&self, line: usize) -> usize {
        let index = line.min(self.segments.len().saturating_sub(1));
        self.segments.get(index).map_or(0, |segment| segment.model_line)
    }

    pub(crate) fn view_line_at_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.view_len);
        self.index_by(|segment| segment.view_start <= offset)
    }

    /// The rendered text: every visible line concatenated
    pub(crate) fn view_string(&self, buffer: &Rope) -> String {
        let mut text = String::with_capacity(self.view_len);
        for segment in &self.segments {
            let range = segment.model_start..segment.model_start + segment.len;
            text.push_str(&buffer.slice_to_cow(range));
        }
        text
    }

    fn index_by(&self, predicate: impl Fn(&Segment) -> bool) -> usize {
        self.segments.partition_point(predicate).saturating_sub(1)
    }

    fn segment_by(&self, predicate: impl Fn(&Segment) -> bool) -> Segment {
        self.segments
            .get(self.index_by(predicate))
            .copied()
            .unwrap_or(Segment {
                model_line: 0,
                model_start: 0,
                len: 0,
                content_len: 0,
                view_start: 0,
            })
    }
}

/// Carry fold ranges through an edit, dropping folds whose text vanished
pub(crate) fn transform_folds(folds: &mut Vec<Fold>, delta: &Delta<RopeInfo>, new_len: usize) {
    let mut transformer = Transformer::new(delta);
    for fold in folds.iter_mut() {
        let start = transformer.transform(fold.range.start, true);
        let end = transformer.transform(fold.range.end, false);
        let start = start.min(new_len);
        fold.range = start..end.min(new_len).max(start);
    }
    folds.retain(|fold| fold.range.start < fold.range.end);
}
