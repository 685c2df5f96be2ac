use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::CaretShape;

/// Identity of one open editor, used to key façades and their indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditorId(Uuid);

impl EditorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EditorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EditorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Editing mode as far as this layer is concerned: it only drives the caret
/// shape and the indicator text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Visual,
    OperatorPending,
    CommandLine,
}

impl Mode {
    pub fn indicator_text(self) -> &'static str {
        match self {
            Mode::Normal => "-- NORMAL --",
            Mode::Insert => "-- INSERT --",
            Mode::Visual => "-- VISUAL --",
            Mode::OperatorPending => "-- OPERATOR --",
            Mode::CommandLine => "-- COMMAND --",
        }
    }

    /// Command-line mode keeps whatever caret the previous mode left
    pub fn caret_shape(self) -> Option<CaretShape> {
        match self {
            Mode::Normal => Some(CaretShape::Block),
            Mode::Insert => Some(CaretShape::Bar),
            Mode::Visual => Some(CaretShape::Marker),
            Mode::OperatorPending => Some(CaretShape::HalfBlock),
            Mode::CommandLine => None,
        }
    }
}

/// Handle to the mode text shown for one editor.
///
/// Clones share the same text; the registry and the façade each hold one.
#[derive(Debug, Clone, Default)]
pub struct ModeIndicator {
    text: Rc<RefCell<String>>,
}

impl ModeIndicator {
    pub fn set(&self, text: &str) {
        let mut current = self.text.borrow_mut();
        current.clear();
        current.push_str(text);
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

/// Mode indicators of every open editor, keyed by editor identity
#[derive(Debug, Default)]
pub struct StatusRegistry {
    indicators: HashMap<EditorId, ModeIndicator>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the indicator for `id`, or hand out the existing one
    pub fn register(&mut self, id: EditorId) -> ModeIndicator {
        self.indicators.entry(id).or_default().clone()
    }

    pub fn get(&self, id: EditorId) -> Option<&ModeIndicator> {
        self.indicators.get(&id)
    }

    pub fn text(&self, id: EditorId) -> Option<String> {
        self.indicators.get(&id).map(ModeIndicator::text)
    }

    pub fn remove(&mut self, id: EditorId) -> Option<ModeIndicator> {
        self.indicators.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}
