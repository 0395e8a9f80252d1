use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use analyzer_engine::{ApiVariant, ClientSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::{LogDestination, LogLevel, LogSettings, DEFAULT_LOG_FILE};

pub const BACKEND_URL_ENV: &str = "ANALYZER_BACKEND_URL";

/// Endpoint shape, as spelled in the config file and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum ApiVariantSetting {
    /// GET {backend}/analyze?url=...
    #[default]
    QueryGet,
    /// POST {backend}/api/analyze with a JSON body
    JsonPost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub api_variant: ApiVariantSetting,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
    pub log_level: LogLevel,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            backend_url: client.base_url,
            api_variant: ApiVariantSetting::default(),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_response_bytes: client.max_bytes,
            log_destination: LogDestination::default(),
            log_level: LogLevel::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Applies environment overrides. `lookup` is `std::env::var` in
    /// production.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.backend_url = url;
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.backend_url.clone(),
            api_variant: map_variant(self.api_variant),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            destination: self.log_destination,
            level: self.log_level,
            file: self.log_file.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Reads the RON config at `path`. `Ok(None)` means there is no file.
///
/// This runs before the logger exists, so nothing is logged here; the caller
/// falls back to defaults on error and reports it once logging is up.
pub fn load_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn map_variant(variant: ApiVariantSetting) -> ApiVariant {
    match variant {
        ApiVariantSetting::QueryGet => ApiVariant::QueryGet,
        ApiVariantSetting::JsonPost => ApiVariant::JsonPost,
    }
}
