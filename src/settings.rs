//! User settings stored as settings.json in the app data directory

use crate::api::{normalize_base_url, ApiError};
use crate::constants::{BASE_URL_ENV, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Service
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,

    // Paths
    pub last_open_dir: Option<String>,
}

/// Where the effective base url came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUrlSource {
    Environment,
    Settings,
    Default,
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

    /// Effective base url, reading the override from the process environment.
    pub fn resolve_base_url(&self) -> (String, BaseUrlSource) {
        self.resolve_base_url_with(std::env::var(BASE_URL_ENV).ok())
    }

    /// Precedence: non-empty valid env override, then the saved value, then the default.
    pub fn resolve_base_url_with(&self, env_override: Option<String>) -> (String, BaseUrlSource) {
        if let Some(raw) = env_override.filter(|v| !v.trim().is_empty()) {
            match normalize_base_url(&raw) {
                Ok(url) => return (url, BaseUrlSource::Environment),
                Err(e) => warn!(error = %e, var = BASE_URL_ENV, "Ignoring base url override"),
            }
        }
        if let Some(raw) = self.base_url.as_deref() {
            match normalize_base_url(raw) {
                Ok(url) => return (url, BaseUrlSource::Settings),
                Err(e) => warn!(error = %e, "Ignoring saved base url"),
            }
        }
        (DEFAULT_BASE_URL.to_string(), BaseUrlSource::Default)
    }

    /// Validate and store a new base url typed by the user.
    pub fn set_base_url(&mut self, raw: &str) -> Result<(), ApiError> {
        let url = normalize_base_url(raw)?;
        self.base_url = Some(url);
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }

    pub fn open_dir_or_default(&self) -> PathBuf {
        self.last_open_dir
            .as_ref()
            .map(PathBuf::from)
            .filter(|p| p.is_dir())
            .or_else(dirs::document_dir)
            .unwrap_or_else(|| PathBuf::from("."))
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
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"base_url":"http://10.0.0.5:9000"}"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.base_url.as_deref(), Some("http://10.0.0.5:9000"));
        assert_eq!(settings.window_w, None);
        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.set_base_url("https://qa.example.com/").unwrap();
        settings.request_timeout_secs = Some(120);
        settings.window_w = Some(720.0);
        settings.save(dir.path());

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded, settings);
        assert_eq!(loaded.base_url.as_deref(), Some("https://qa.example.com"));
        assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn base_url_precedence() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.resolve_base_url_with(None),
            ("http://localhost:8000".to_string(), BaseUrlSource::Default)
        );

        settings.base_url = Some("http://saved:8000/".into());
        assert_eq!(
            settings.resolve_base_url_with(None),
            ("http://saved:8000".to_string(), BaseUrlSource::Settings)
        );
        assert_eq!(
            settings.resolve_base_url_with(Some("   ".into())),
            ("http://saved:8000".to_string(), BaseUrlSource::Settings)
        );
        assert_eq!(
            settings.resolve_base_url_with(Some("http://env:1234".into())),
            ("http://env:1234".to_string(), BaseUrlSource::Environment)
        );
        assert_eq!(
            settings.resolve_base_url_with(Some("garbage".into())),
            ("http://saved:8000".to_string(), BaseUrlSource::Settings)
        );
    }

    #[test]
    fn invalid_base_url_is_not_stored() {
        let mut settings = Settings::default();
        assert!(settings.set_base_url("localhost:8000").is_err());
        assert_eq!(settings.base_url, None);
    }

    #[test]
    fn zero_timeout_means_none() {
        let settings = Settings {
            request_timeout_secs: Some(0),
            ..Settings::default()
        };
        assert_eq!(settings.request_timeout(), None);
    }
}
