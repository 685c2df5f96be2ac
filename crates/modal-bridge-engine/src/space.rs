use serde::{Deserialize, Serialize};

/// Coordinate system that offsets and line numbers are expressed in.
///
/// `Model` addresses the raw document and ignores folding. `View` addresses
/// the rendered text, where collapsed regions are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Space {
    #[default]
    Model,
    View,
}

impl std::fmt::Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Space::Model => f.write_str("model"),
            Space::View => f.write_str("view"),
        }
    }
}
