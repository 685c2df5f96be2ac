use std::collections::HashSet;

use relative_path::{RelativePath, RelativePathBuf};

use crate::files::{PathCompleter, Workbench};

/// File commands of the command line: completion, lookup, opening and
/// saving, on top of a [`Workbench`].
///
/// Completion start directories are strings as typed: `""` and `"/"` name
/// the project root, `"."` the directory of the current file, anything else
/// a project-relative folder. Search paths differ only in reading `""` as the
/// current file's directory.
pub struct FileService<W: Workbench> {
    workbench: W,
}

impl<W: Workbench> FileService<W> {
    pub fn new(workbench: W) -> Self {
        Self { workbench }
    }

    pub fn workbench(&self) -> &W {
        &self.workbench
    }

    pub fn workbench_mut(&mut self) -> &mut W {
        &mut self.workbench
    }

    /// Next file or directory completing `prefix`.
    ///
    /// A leading `/` searches from the project root whatever `start_dir`
    /// says, and is kept on the result.
    pub fn file_path_match(
        &self,
        prefix: &str,
        previous: Option<&str>,
        start_dir: &str,
    ) -> String {
        let completer = PathCompleter::new(&self.workbench);
        match prefix.strip_prefix('/') {
            Some(relative) => {
                let previous = previous.map(|p| p.strip_prefix('/').unwrap_or(p));
                let found = completer.next_match(RelativePath::new(""), relative, previous);
                format!("/{found}")
            }
            None => completer.next_match(&self.start_dir(start_dir), prefix, previous),
        }
    }

    /// Like [`Self::file_path_match`] but skips files.
    ///
    /// Returns `prefix` when no directory matches.
    pub fn dir_path_match(
        &self,
        prefix: &str,
        previous: Option<&str>,
        start_dir: &str,
    ) -> String {
        let mut previous = previous.map(str::to_string);
        let mut seen = HashSet::new();
        loop {
            let found = self.file_path_match(prefix, previous.as_deref(), start_dir);
            if found == prefix || found.ends_with('/') {
                return found;
            }
            // Completion wraps around, so a repeat means only files match
            if !seen.insert(found.clone()) {
                return prefix.to_string();
            }
            previous = Some(found);
        }
    }

    /// Complete `filename` in the first of `paths` that has a match
    pub fn find_file_in_path<S: AsRef<str>>(
        &self,
        filename: &str,
        previous: Option<&str>,
        paths: &[S],
    ) -> String {
        let completer = PathCompleter::new(&self.workbench);
        paths
            .iter()
            .map(|path| completer.next_match(&self.search_dir(path.as_ref()), filename, previous))
            .find(|found| found != filename)
            .unwrap_or_else(|| filename.to_string())
    }

    /// Open `filename` from the first of `paths` containing it, or as given
    pub fn find_and_open_file<S: AsRef<str>>(&mut self, filename: &str, paths: &[S]) -> bool {
        let found = paths
            .iter()
            .map(|path| self.search_dir(path.as_ref()).join(filename))
            .find(|candidate| self.workbench.exists(candidate));
        match found {
            Some(path) => self.open_file(path.as_str()),
            None => self.open_file(filename),
        }
    }

    /// Open a project-relative file; `./name` is relative to the current
    /// file's directory
    pub fn open_file(&mut self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        let path = match path.strip_prefix("./") {
            Some(rest) => self.current_dir().join(rest),
            None => RelativePathBuf::from(path.trim_start_matches('/')),
        };
        if !self.workbench.exists(&path) {
            log::debug!("Not opening {path}: no such file");
            return false;
        }
        match self.workbench.open_editor(&path) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to open {path}: {e}");
                false
            }
        }
    }

    /// Project-relative directory of the current file
    pub fn current_file_path(&self) -> String {
        self.current_dir().to_string()
    }

    /// Save the active editor; true only if it had changes and was saved
    pub fn save(&mut self) -> bool {
        let Some(editor) = self.workbench.active_editor_mut() else {
            return false;
        };
        if !(editor.is_dirty() && editor.is_editable()) {
            return false;
        }
        match editor.save() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save: {e}");
                false
            }
        }
    }

    pub fn save_all(&mut self) -> bool {
        match self.workbench.save_all() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save all editors: {e}");
                false
            }
        }
    }

    /// Close the active editor; unsaved changes need `force`
    pub fn close(&mut self, force: bool) -> bool {
        match self.workbench.active_editor_mut() {
            Some(editor) if force || !editor.is_dirty() => {
                editor.close();
                true
            }
            _ => false,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.workbench
            .active_editor()
            .is_some_and(|editor| editor.is_editable())
    }

    fn current_dir(&self) -> RelativePathBuf {
        self.workbench
            .current_file()
            .and_then(|file| file.parent().map(RelativePath::to_relative_path_buf))
            .unwrap_or_else(RelativePathBuf::new)
    }

    fn start_dir(&self, dir: &str) -> RelativePathBuf {
        match dir {
            "" | "/" => RelativePathBuf::new(),
            "." => self.current_dir(),
            folder => RelativePathBuf::from(folder.trim_matches('/')),
        }
    }

    /// Search paths read `""` as the current directory, unlike start dirs
    fn search_dir(&self, dir: &str) -> RelativePathBuf {
        match dir {
            "/" => RelativePathBuf::new(),
            "" | "." => self.current_dir(),
            folder => RelativePathBuf::from(folder.trim_matches('/')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::FsWorkspace;
    use crate::host::TextDocument;
    use crate::tests::create_completion_tree;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn service(root: &std::path::Path) -> FileService<FsWorkspace> {
        FileService::new(FsWorkspace::new(root))
    }

    #[rstest]
    #[case("", "R", "README.txt")]
    #[case("/", "R", "README.txt")]
    #[case("src", "ma", "main.txt")]
    #[case("src/lib", "mo", "mod.txt")]
    fn test_start_dir_resolution(
        #[case] start_dir: &str,
        #[case] prefix: &str,
        #[case] expected: &str,
    ) {
        let project = create_completion_tree();
        let files = service(project.path());

        assert_eq!(files.file_path_match(prefix, None, start_dir), expected);
    }

    #[test]
    fn test_dot_starts_in_current_file_directory() {
        let project = create_completion_tree();
        let mut files = service(project.path());
        assert!(files.open_file("src/lib/mod.txt"));

        assert_eq!(files.file_path_match("mo", Some("mod.txt"), "."), "more.txt");
        assert_eq!(files.current_file_path(), "src/lib");
    }

    #[test]
    fn test_absolute_prefix_ignores_start_dir() {
        let project = create_completion_tree();
        let files = service(project.path());

        assert_eq!(files.file_path_match("/src/ma", None, "docs"), "/src/main.txt");
        assert_eq!(
            files.file_path_match("/src/ma", Some("/src/main.txt"), "docs"),
            "/src/main2.txt"
        );
        assert_eq!(files.file_path_match("/zz", None, "docs"), "/zz");
    }

    #[test]
    fn test_dir_path_match_skips_files() {
        let project = create_completion_tree();
        let files = service(project.path());

        assert_eq!(files.dir_path_match("", None, ""), "docs/");
        assert_eq!(files.dir_path_match("", Some("docs/"), ""), "src/");
        assert_eq!(files.dir_path_match("src/", None, ""), "src/lib/");
    }

    #[test]
    fn test_dir_path_match_with_only_files_returns_prefix() {
        let project = create_completion_tree();
        let files = service(project.path());

        assert_eq!(files.dir_path_match("ma", None, "src"), "ma");
    }

    #[test]
    fn test_find_file_in_path_uses_first_matching_dir() {
        let project = create_completion_tree();
        let files = service(project.path());

        assert_eq!(files.find_file_in_path("ma", None, &["docs", "src"]), "manual.txt");
        assert_eq!(files.find_file_in_path("main2", None, &["docs", "src"]), "main2.txt");
        assert_eq!(files.find_file_in_path("zz", None, &["docs", "src"]), "zz");
    }

    #[test]
    fn test_find_and_open_file() {
        let project = create_completion_tree();
        let mut files = service(project.path());

        assert!(files.find_and_open_file("more.txt", &["src", "src/lib"]));
        assert_eq!(
            files.workbench().current_file(),
            Some(RelativePathBuf::from("src/lib/more.txt"))
        );
        assert!(!files.find_and_open_file("ghost.txt", &["src"]));
    }

    #[test]
    fn test_open_file_relative_to_current() {
        let project = create_completion_tree();
        let mut files = service(project.path());

        assert!(!files.open_file(""));
        assert!(!files.open_file("missing.txt"));
        assert!(files.open_file("src/main.txt"));
        assert!(files.open_file("./main2.txt"));

        assert_eq!(
            files.workbench().current_file(),
            Some(RelativePathBuf::from("src/main2.txt"))
        );
    }

    #[test]
    fn test_save_only_reports_real_saves() {
        let project = create_completion_tree();
        let mut files = service(project.path());
        assert!(!files.save());

        files.open_file("README.txt");
        assert!(!files.save());

        files
            .workbench_mut()
            .active_mut()
            .unwrap()
            .replace(0, 0, "# ")
            .unwrap();
        assert!(files.save());
        assert_eq!(
            std::fs::read_to_string(project.path().join("README.txt")).unwrap(),
            "# readme"
        );
        assert!(files.save_all());
    }

    #[test]
    fn test_close_and_editable() {
        let project = create_completion_tree();
        let mut files = service(project.path());
        assert!(!files.is_editable());
        assert!(!files.close(false));

        files.open_file("README.txt");
        assert!(files.is_editable());
        files
            .workbench_mut()
            .active_mut()
            .unwrap()
            .replace(0, 0, "x")
            .unwrap();

        assert!(!files.close(false));
        assert!(files.close(true));
        assert!(files.workbench().active().unwrap().is_closed());
    }
}
