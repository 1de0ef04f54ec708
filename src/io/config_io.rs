use std::fs;
use std::path::{Path, PathBuf};

use crate::io::board_io::BoardPaths;
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::config::BoardConfig;

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read the config file. A missing file is not an error and yields defaults.
pub fn read_config(path: &Path) -> Result<BoardConfig, ConfigError> {
    if !path.exists() {
        return Ok(BoardConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Config for the TUI: a bad file falls back to defaults and is logged.
pub fn load_config_or_default(paths: &BoardPaths) -> BoardConfig {
    let path = paths.config_file();
    match read_config(&path) {
        Ok(config) => config,
        Err(err) => {
            recovery::log_recovery(
                &paths.dir,
                RecoveryEntry::now(RecoveryCategory::Config, "config ignored")
                    .field("File", path.display())
                    .body(err.to_string()),
            );
            BoardConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(&tmp.path().join("taskboard.toml")).unwrap();
        assert!(config.ui.mouse);
    }

    #[test]
    fn test_read_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("taskboard.toml");
        fs::write(&path, "[ui]\nshow_key_hints = false\n").unwrap();
        let config = read_config(&path).unwrap();
        assert!(!config.ui.show_key_hints);
        assert!(config.ui.mouse);
    }

    #[test]
    fn test_bad_config_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("taskboard.toml");
        fs::write(&path, "[ui\nmouse = ").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_bad_config_falls_back_and_logs() {
        let tmp = TempDir::new().unwrap();
        let paths = BoardPaths::new(tmp.path().join("tasks.json"));
        fs::write(paths.config_file(), "[ui]\nmouse = \"sometimes\"\n").unwrap();

        let config = load_config_or_default(&paths);
        assert!(config.ui.mouse);

        let entries = recovery::read_recovery_entries(&paths.dir, None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, RecoveryCategory::Config);
    }
}
