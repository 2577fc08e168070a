use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::api::TMDB_HOST;
use crate::app::models::MovieListKind;

const APP_DIR: &str = "cinefeed";

pub const API_KEY_VAR: &str = "TMDB_API_KEY";
pub const LANGUAGE_VAR: &str = "CINEFEED_LANGUAGE";
pub const API_HOST_VAR: &str = "CINEFEED_API_HOST";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub api_key: Option<String>,
    pub language: String,
    pub api_host: String,
    pub lists: Vec<MovieListKind>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            language: "ko-KR".to_string(),
            api_host: TMDB_HOST.to_string(),
            lists: vec![MovieListKind::Upcoming, MovieListKind::Popular],
            request_timeout_secs: None,
        }
    }
}

impl CatalogSettings {
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join(APP_DIR).join("config.toml")
    }

    // A missing file is not an error, defaults are used instead
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        let mut settings = if path.exists() {
            debug!("reading settings from {}", path.display());
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        settings.apply_env(|name| env::var(name).ok());
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = var(API_KEY_VAR).filter(|key| !key.is_empty()) {
            self.api_key = Some(api_key);
        }
        if let Some(language) = var(LANGUAGE_VAR) {
            self.language = language;
        }
        if let Some(host) = var(API_HOST_VAR) {
            self.api_host = host;
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.language.trim().is_empty() {
            return Err(SettingsError::Invalid("language must not be empty".to_string()));
        }
        if self.api_host.trim().is_empty() {
            return Err(SettingsError::Invalid("api_host must not be empty".to_string()));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(SettingsError::Invalid(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
