// src/config/mod.rs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::file::settings::SettingsFileHandler;
use crate::file::FileHandler;

pub const APP_DIR: &str = "sentiment-desk";
pub const CONFIG_FILE: &str = "config.ron";
pub const ENV_PREFIX: &str = "SENTIMENT_DESK";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub analyze_text: String,
    pub analyze: String,
    pub analyze_text_batch: String,
    pub macro_f1: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            analyze_text: "/api/analyze_text".to_string(),
            analyze: "/api/analyze".to_string(),
            analyze_text_batch: "/api/analyze_text_batch".to_string(),
            macro_f1: "/api/macro_f1".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub backend_url: String,
    pub endpoints: Endpoints,
    // None means requests wait as long as the backend takes
    pub timeout_secs: Option<u64>,
    pub export_file_name: String,
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".to_string(),
            endpoints: Endpoints::default(),
            timeout_secs: None,
            export_file_name: "analysis_results.csv".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Joins the base URL and an endpoint path without doubling slashes.
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.backend_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// The RON file at `path` (fields it omits keep their defaults), then
    /// `SENTIMENT_DESK__*` environment variables on top.
    pub fn load_from(path: &Path) -> Result<Self> {
        let file_config = if path.exists() {
            SettingsFileHandler::new().load(path)?
        } else {
            Self::default()
        };

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&file_config)?)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Loads from the platform config directory, writing the defaults there
    /// on first start. Any failure falls back to the defaults.
    pub fn load_or_default() -> (Self, ConfigOrigin) {
        let Some(path) = Self::default_path() else {
            return (
                Self::default(),
                ConfigOrigin::Defaults("no config directory on this platform".to_string()),
            );
        };

        let mut created = false;
        if !path.exists() {
            if let Err(e) = SettingsFileHandler::new().save(&Self::default(), &path) {
                return (
                    Self::default(),
                    ConfigOrigin::Defaults(format!("could not write {}: {}", path.display(), e)),
                );
            }
            created = true;
        }

        match Self::load_from(&path) {
            Ok(config) => (config, ConfigOrigin::File { path, created }),
            Err(e) => (
                Self::default(),
                ConfigOrigin::Defaults(format!("could not read {}: {}", path.display(), e)),
            ),
        }
    }
}

/// Where the running configuration came from. Logged once tracing is up.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigOrigin {
    File { path: PathBuf, created: bool },
    Defaults(String),
}
