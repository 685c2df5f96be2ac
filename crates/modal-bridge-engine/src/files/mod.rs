//! File navigation for the command line: prefix completion over a directory
//! tree and opening files in the host.
//!
//! Paths are project relative ([`relative_path::RelativePath`]). A host only
//! has to list directories ([`DirectoryHost`]); opening and saving editors
//! needs the richer [`Workbench`].

pub mod completion;
pub mod service;
pub mod workspace;

use relative_path::{RelativePath, RelativePathBuf};
use serde::Serialize;

use crate::HostError;
use crate::host::EditorPart;

pub use completion::PathCompleter;
pub use service::FileService;
pub use workspace::FsWorkspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    File,
    Directory,
}

/// One member of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Name as completion shows it; directories end in `/`
    pub fn display_name(&self) -> String {
        match self.kind {
            EntryKind::File => self.name.clone(),
            EntryKind::Directory => format!("{}/", self.name),
        }
    }
}

/// Directory listing capability of a host
pub trait DirectoryHost {
    /// Members of `dir` in the host's natural order
    fn members(&self, dir: &RelativePath) -> Result<Vec<DirEntry>, HostError>;

    fn exists(&self, path: &RelativePath) -> bool;
}

/// A host that can also open files in editors and track the active one
pub trait Workbench: DirectoryHost {
    /// File shown in the active editor
    fn current_file(&self) -> Option<RelativePathBuf>;

    /// Open `path` in an editor and make it active
    fn open_editor(&mut self, path: &RelativePath) -> Result<(), HostError>;

    fn save_all(&mut self) -> Result<(), HostError>;

    fn active_editor(&self) -> Option<&dyn EditorPart>;

    fn active_editor_mut(&mut self) -> Option<&mut dyn EditorPart>;
}
