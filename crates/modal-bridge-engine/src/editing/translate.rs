use crate::Space;
use crate::host::Projection;

/// Converts offsets and lines between model and view space.
///
/// A host without folding support yields the identity mapping. Results are
/// only valid until the next document mutation.
#[derive(Clone, Copy)]
pub struct Translator<'a> {
    projection: Option<&'a dyn Projection>,
}

impl<'a> Translator<'a> {
    pub fn new(projection: Option<&'a dyn Projection>) -> Self {
        Self { projection }
    }

    /// A translator that never changes its input
    pub fn identity() -> Self {
        Self { projection: None }
    }

    pub fn to_view_offset(&self, model_offset: usize) -> usize {
        self.projection
            .map_or(model_offset, |p| p.model_offset_to_view(model_offset))
    }

    pub fn to_model_offset(&self, view_offset: usize) -> usize {
        self.projection
            .map_or(view_offset, |p| p.view_offset_to_model(view_offset))
    }

    pub fn to_view_line(&self, model_line: usize) -> usize {
        self.projection
            .map_or(model_line, |p| p.model_line_to_view(model_line))
    }

    pub fn to_model_line(&self, view_line: usize) -> usize {
        self.projection
            .map_or(view_line, |p| p.view_line_to_model(view_line))
    }

    /// Express a model offset in `space`
    pub fn offset_into(&self, space: Space, model_offset: usize) -> usize {
        match space {
            Space::Model => model_offset,
            Space::View => self.to_view_offset(model_offset),
        }
    }

    /// Express an offset given in `space` as a model offset
    pub fn offset_from(&self, space: Space, offset: usize) -> usize {
        match space {
            Space::Model => offset,
            Space::View => self.to_model_offset(offset),
        }
    }

    /// Express a view offset in `space`
    pub fn view_offset_into(&self, space: Space, view_offset: usize) -> usize {
        match space {
            Space::Model => self.to_model_offset(view_offset),
            Space::View => view_offset,
        }
    }

    /// Express an offset given in `space` as a view offset
    pub fn view_offset_from(&self, space: Space, offset: usize) -> usize {
        match space {
            Space::Model => self.to_view_offset(offset),
            Space::View => offset,
        }
    }
}
