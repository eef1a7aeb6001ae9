//! User settings stored as settings.json in the app data directory

use crate::constants::{DEFAULT_API_URL, DEFAULT_PORTFOLIO_NAME};
use crate::types::GenerationSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Service
    pub api_url: String,

    // Form defaults
    pub generation: GenerationSettings,
    pub enhance_prompt: bool,
    pub show_advanced: bool,

    // Export
    pub export_path: Option<String>,
    pub portfolio_name: String,

    /// Route of the page open at exit, restored on launch
    pub last_route: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            api_url: DEFAULT_API_URL.to_string(),
            generation: GenerationSettings::default(),
            enhance_prompt: true,
            show_advanced: false,
            export_path: None,
            portfolio_name: DEFAULT_PORTFOLIO_NAME.to_string(),
            last_route: "/".to_string(),
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

    /// Folder offered first in save dialogs
    pub fn export_path_or_default(&self) -> PathBuf {
        self.export_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::picture_dir()
                    .or_else(dirs::download_dir)
                    .unwrap_or_else(|| PathBuf::from("."))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.generation, GenerationSettings::default());
        assert!(settings.enhance_prompt);
        assert_eq!(settings.last_route, "/");
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.api_url = "http://gpu-box:5000".into();
        settings.generation.seed = Some(1234);
        settings.export_path = Some("/tmp/art".into());
        settings.last_route = "/gallery".into();
        settings.save(dir.path());

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.api_url, "http://gpu-box:5000");
        assert_eq!(loaded.generation.seed, Some(1234));
        assert_eq!(loaded.export_path_or_default(), PathBuf::from("/tmp/art"));
        assert_eq!(loaded.last_route, "/gallery");
    }

    #[test]
    fn partial_and_corrupt_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"enhance_prompt":false}"#).unwrap();
        let partial = Settings::load(dir.path());
        assert!(!partial.enhance_prompt);
        assert_eq!(partial.api_url, DEFAULT_API_URL);

        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        assert!(Settings::load(dir.path()).enhance_prompt);
    }
}
