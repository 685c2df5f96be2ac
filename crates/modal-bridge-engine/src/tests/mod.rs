use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::editing::{EditorBridge, EditorId, ModeIndicator};
use crate::host::MemoryEditor;

/// Text with five lines; [`folded_bridge`] hides lines 1 to 3
pub const FOLD_TEXT: &str = "zero\none\ntwo\nthree\nfour";

/// A façade over an in-memory editor holding `text`
pub fn bridge(text: &str) -> EditorBridge<MemoryEditor> {
    EditorBridge::new(
        EditorId::new(),
        MemoryEditor::new(text),
        ModeIndicator::default(),
    )
}

/// A façade over [`FOLD_TEXT`] with lines 1 to 3 collapsed under "one"
pub fn folded_bridge() -> EditorBridge<MemoryEditor> {
    let mut editor = MemoryEditor::new(FOLD_TEXT);
    editor.collapse_lines(1, 3).unwrap();
    EditorBridge::new(EditorId::new(), editor, ModeIndicator::default())
}

/// Create a temporary project directory
pub fn create_test_project() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create `relative` (and its parent directories) inside `root`
pub fn create_test_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// `src/main.txt`, `src/main2.txt`, `src/lib/` plus a few extra entries
pub fn create_completion_tree() -> TempDir {
    let project = create_test_project();
    let root = project.path();
    create_test_file(root, "src/main.txt", "main");
    create_test_file(root, "src/main2.txt", "main two");
    create_test_file(root, "src/lib/mod.txt", "module");
    create_test_file(root, "src/lib/more.txt", "more");
    create_test_file(root, "README.txt", "readme");
    create_test_file(root, "docs/manual.txt", "manual");
    project
}
