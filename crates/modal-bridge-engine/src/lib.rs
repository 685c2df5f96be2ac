pub mod editing;
pub mod error;
pub mod files;
pub mod host;
pub mod models;
pub mod space;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{EditorBridge, EditorId, EditorRegistry, Mode, Platform, Translator};
pub use error::*;
pub use files::{FileService, FsWorkspace, PathCompleter};
pub use host::{EditorHost, MemoryEditor, MemoryEditorOptions};
pub use space::Space;
