//! User settings, read from `config.json` in the config directory.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use sylva_lib::TreeConfig;

use crate::error::AppError;
use crate::theme::Theme;

/// Settings file contents. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial theme.
    pub theme: Theme,
    /// Tree view configuration.
    pub tree: TreeConfig,
}

impl Settings {
    /// Loads settings from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(AppError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&text)
    }

    /// Parses settings JSON.
    pub fn parse(text: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Tree config adjusted for a terminal: one cell per row.
    pub fn terminal_tree_config(&self) -> TreeConfig {
        self.tree.clone().with_row_height(1)
    }
}

#[cfg(test)]
mod tests {
    use sylva_lib::{MatchMode, RenderMode};

    use super::*;

    #[test]
    fn test_parse_partial() {
        let settings =
            Settings::parse(r#"{"theme": "neon", "tree": {"mode": "virtual", "match_mode": "fuzzy"}}"#)
                .unwrap();
        assert_eq!(settings.theme, Theme::Neon);
        assert_eq!(settings.tree.mode, RenderMode::Virtual);
        assert_eq!(settings.tree.match_mode, MatchMode::Fuzzy);
        assert_eq!(settings.tree.overscan_after, 15);
    }

    #[test]
    fn test_terminal_rows_are_one_cell() {
        let settings = Settings::default();
        assert_eq!(settings.tree.row_height, 26);
        assert_eq!(settings.terminal_tree_config().row_height, 1);
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("sylva-definitely-missing/config.json");
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(Settings::parse("{"), Err(AppError::Settings(_))));
    }
}
