use std::fs;
use std::path::{Path, PathBuf};

use relative_path::{RelativePath, RelativePathBuf};

use crate::HostError;
use crate::files::{DirEntry, DirectoryHost, EntryKind, Workbench};
use crate::host::{EditorPart, MemoryEditor, MemoryEditorOptions};

/// A project directory on disk with files opened into [`MemoryEditor`]s.
///
/// Directory members are listed sorted by name.
pub struct FsWorkspace {
    root: PathBuf,
    options: MemoryEditorOptions,
    editors: Vec<(RelativePathBuf, MemoryEditor)>,
    active: Option<usize>,
}

impl FsWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_options(root, MemoryEditorOptions::default())
    }

    /// Editors opened from this workspace use `options`
    pub fn with_options(root: impl Into<PathBuf>, options: MemoryEditorOptions) -> Self {
        Self {
            root: root.into(),
            options,
            editors: Vec::new(),
            active: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn open_paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.editors.iter().map(|(path, _)| path.as_relative_path())
    }

    pub fn editor(&self, path: &RelativePath) -> Option<&MemoryEditor> {
        self.editors
            .iter()
            .find(|(open, _)| open.as_relative_path() == path)
            .map(|(_, editor)| editor)
    }

    pub fn active(&self) -> Option<&MemoryEditor> {
        self.active
            .and_then(|index| self.editors.get(index))
            .map(|(_, editor)| editor)
    }

    pub fn active_mut(&mut self) -> Option<&mut MemoryEditor> {
        self.active
            .and_then(|index| self.editors.get_mut(index))
            .map(|(_, editor)| editor)
    }
}

impl DirectoryHost for FsWorkspace {
    fn members(&self, dir: &RelativePath) -> Result<Vec<DirEntry>, HostError> {
        let traversal = |source| HostError::Traversal {
            path: dir.to_string(),
            source,
        };
        let mut members = Vec::new();
        for entry in fs::read_dir(dir.to_path(&self.root)).map_err(traversal)? {
            let entry = entry.map_err(traversal)?;
            let kind = if entry.file_type().map_err(traversal)?.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            members.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(members)
    }

    fn exists(&self, path: &RelativePath) -> bool {
        path.to_path(&self.root).exists()
    }
}

impl Workbench for FsWorkspace {
    fn current_file(&self) -> Option<RelativePathBuf> {
        self.active
            .and_then(|index| self.editors.get(index))
            .map(|(path, _)| path.clone())
    }

    fn open_editor(&mut self, path: &RelativePath) -> Result<(), HostError> {
        if let Some(index) = self
            .editors
            .iter()
            .position(|(open, _)| open.as_relative_path() == path)
        {
            self.active = Some(index);
            return Ok(());
        }
        let absolute_path = path.to_path(&self.root);
        if !absolute_path.is_file() {
            return Err(HostError::NotFound(absolute_path));
        }
        let editor = MemoryEditor::open(&absolute_path, self.options.clone())
            .map_err(|e| HostError::Io(std::io::Error::other(format!("{e:#}"))))?;
        log::debug!("Opened {path}");
        self.editors.push((path.to_relative_path_buf(), editor));
        self.active = Some(self.editors.len() - 1);
        Ok(())
    }

    fn save_all(&mut self) -> Result<(), HostError> {
        for (_, editor) in self.editors.iter_mut().filter(|(_, e)| e.is_dirty()) {
            EditorPart::save(editor)?;
        }
        Ok(())
    }

    fn active_editor(&self) -> Option<&dyn EditorPart> {
        self.active().map(|editor| editor as &dyn EditorPart)
    }

    fn active_editor_mut(&mut self) -> Option<&mut dyn EditorPart> {
        self.active_mut().map(|editor| editor as &mut dyn EditorPart)
    }
}
