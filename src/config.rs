use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{GardenError, Result, Theme};

/// File name of the notes blob inside the data directory.
pub const NOTES_FILE: &str = "digital-garden-notes.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the notes blob
    pub data_dir: PathBuf,

    /// Selected colour theme
    #[serde(default)]
    pub theme: Theme,

    /// Editor command, falls back to $EDITOR
    #[serde(default)]
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".digital-garden"));

        Self {
            data_dir,
            theme: Theme::default(),
            editor_command: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "digital-garden")
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from(".digital-garden").join("config.json"))
    }

    /// Loads the config at `path`, writing defaults there if it is missing.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, writing defaults", path.display());
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        debug!("Loading config from {}", path.display());
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            error!("Malformed config {}: {}", path.display(), e);
            GardenError::ConfigError {
                message: format!("{}: {}", path.display(), e),
            }
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                error!("Failed to create config directory {}: {}", parent.display(), e);
                GardenError::DirectoryError {
                    path: parent.to_path_buf(),
                }
            })?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Path of the notes blob.
    pub fn notes_file(&self) -> PathBuf {
        self.data_dir.join(NOTES_FILE)
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -t".to_string()
        } else {
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_config_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn partial_config_uses_field_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "data_dir": "/tmp/garden" }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/garden"));
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.editor_command, None);
        assert_eq!(config.notes_file(), PathBuf::from("/tmp/garden").join(NOTES_FILE));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(GardenError::ConfigError { .. })
        ));
    }

    #[test]
    fn configured_editor_wins() {
        let config = Config {
            editor_command: Some("code --wait".to_string()),
            ..Config::default()
        };
        assert_eq!(config.get_editor_command(), "code --wait");
    }
}
