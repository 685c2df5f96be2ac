use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project directory for path completion; the working directory if unset
    pub project_root: Option<PathBuf>,
    /// Directories searched when looking a file up by name
    pub search_paths: Vec<String>,
    pub editor: EditorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_root: None,
            search_paths: vec![".".to_string()],
            editor: EditorConfig::default(),
        }
    }
}

/// Settings of editors opened from the command line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Inserted by a right shift
    pub indent: String,
    /// Spaces a left shift may remove
    pub tab_width: usize,
    pub visible_lines: usize,
    pub char_width: u32,
    pub line_height: u32,
    pub caret_width: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            tab_width: 4,
            visible_lines: 40,
            char_width: 8,
            line_height: 16,
            caret_width: 2,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.project_root = config
            .project_root
            .map(|root| Self::expand_path(&root).unwrap_or(root));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/modal-bridge");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Project root to complete paths in, falling back to `fallback`
    pub fn project_root_or(&self, fallback: &Path) -> PathBuf {
        self.project_root
            .clone()
            .unwrap_or_else(|| fallback.to_path_buf())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/modal-bridge/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.search_paths, vec!["."]);
        assert_eq!(config.editor.indent, "\t");
        assert_eq!(config.editor.tab_width, 4);
    }

    #[test]
    fn test_partial_editor_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
search_paths = ["src", "/"]

[editor]
indent = "    "
caret_width = 1
"#,
        )
        .unwrap();

        assert_eq!(config.search_paths, vec!["src", "/"]);
        assert_eq!(config.editor.indent, "    ");
        assert_eq!(config.editor.caret_width, 1);
        assert_eq!(config.editor.visible_lines, 40);
        assert_eq!(config.editor.line_height, 16);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "search_paths = [").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config {
            project_root: Some(PathBuf::from("/tmp/project")),
            search_paths: vec!["src".to_string(), "docs".to_string()],
            ..Config::default()
        };
        test_config.editor.tab_width = 2;

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_project_root_with_env_var_is_expanded_on_load() {
        unsafe {
            env::set_var("MODAL_BRIDGE_TEST_ROOT", "/custom/projects");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "project_root = \"$MODAL_BRIDGE_TEST_ROOT/app\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.project_root, Some(PathBuf::from("/custom/projects/app")));
        unsafe {
            env::remove_var("MODAL_BRIDGE_TEST_ROOT");
        }
    }

    #[test]
    fn test_project_root_or_falls_back() {
        let config = Config::default();
        assert_eq!(
            config.project_root_or(Path::new("/work")),
            PathBuf::from("/work")
        );
    }
}
