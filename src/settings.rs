//! User settings stored as settings.json in the app data directory

use crate::constants::APP_NAME;
use crate::convert::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Paths
    pub export_path: Option<String>,

    // Format selection, stored as its tag so an unknown value only loses the format
    pub remember_format: bool,
    pub last_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            export_path: None,
            remember_format: false,
            last_format: OutputFormat::default().to_string(),
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Format tag a new session should start with, if one is remembered
    pub fn remembered_format(&self) -> Option<&str> {
        self.remember_format.then_some(self.last_format.as_str())
    }

    pub fn export_path_or_default(&self) -> PathBuf {
        self.export_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::download_dir()
                    .or_else(dirs::home_dir)
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(APP_NAME)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "last_format": "webp", "remember_format": true }"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.remembered_format(), Some("webp"));
        assert_eq!(settings.export_path, None);
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            export_path: Some("/tmp/exports".into()),
            window_w: Some(900.0),
            ..Settings::default()
        };
        settings.save(dir.path());
        assert_eq!(Settings::load(dir.path()), settings);
    }

    #[test]
    fn format_is_ignored_unless_remembered() {
        let settings = Settings {
            last_format: "mp4".into(),
            ..Settings::default()
        };
        assert_eq!(settings.remembered_format(), None);
        assert_eq!(Settings::default().last_format, "pdf");
    }

    #[test]
    fn unknown_format_tag_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "last_format": "gif", "remember_format": true, "export_path": "/data/out" }"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.remembered_format(), Some("gif"));
        assert_eq!(settings.export_path.as_deref(), Some("/data/out"));
    }

    #[test]
    fn explicit_export_path_is_used() {
        let settings = Settings {
            export_path: Some("/data/out".into()),
            ..Settings::default()
        };
        assert_eq!(settings.export_path_or_default(), PathBuf::from("/data/out"));
    }
}
