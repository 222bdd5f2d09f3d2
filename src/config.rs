//! API key and endpoint configuration.
//!
//! The key is looked up, in order, from the command line, the `NASA_API_KEY`
//! environment variable, and a small JSON file on disk:
//! ```json
//! { "api_key": "abc123" }
//! ```
//! NASA's rate-limited `DEMO_KEY` is used when none of them has one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

use crate::error::ConfigError;
use crate::fetch::DEFAULT_FEED_URL;

pub const DEMO_KEY: &str = "DEMO_KEY";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const API_KEY_ENV: &str = "NASA_API_KEY";
pub const FEED_URL_ENV: &str = "NEO_FEED_URL";

/// Contents of the key file.
#[derive(Default, Serialize, Deserialize)]
pub struct KeyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl KeyConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            source,
            path: path.to_path_buf(),
        })
    }

    /// A missing file is normal; an unreadable one is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable config file");
                Self::default()
            }
        }
    }

    pub fn with_key(key: &str) -> Self {
        Self {
            api_key: Some(key.trim().to_string()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let body = serde_json::to_string(self).map_err(|source| ConfigError::Parse {
            source,
            path: path.to_path_buf(),
        })?;
        std::fs::write(path, body).map_err(|source| ConfigError::Io {
            source,
            path: path.to_path_buf(),
        })
    }
}

/// Where the active key came from. Safe to log, unlike the key itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Flag,
    Env,
    ConfigFile,
    Demo,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeySource::Flag => "command line",
            KeySource::Env => API_KEY_ENV,
            KeySource::ConfigFile => "config file",
            KeySource::Demo => DEMO_KEY,
        };
        f.write_str(name)
    }
}

/// Picks the first non-blank key among the candidates.
pub fn resolve_api_key(
    flag: Option<&str>,
    env: Option<&str>,
    config: &KeyConfig,
) -> (String, KeySource) {
    let candidates = [
        (flag, KeySource::Flag),
        (env, KeySource::Env),
        (config.api_key.as_deref(), KeySource::ConfigFile),
    ];

    candidates
        .into_iter()
        .find_map(|(key, source)| {
            key.map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| (k.to_string(), source))
        })
        .unwrap_or_else(|| (DEMO_KEY.to_string(), KeySource::Demo))
}

/// Feed endpoint, overridable for mirrors and tests.
pub fn feed_endpoint(env: Option<&str>) -> String {
    env.map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_FEED_URL)
        .to_string()
}
