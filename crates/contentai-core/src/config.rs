use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

/// Environment variables consulted for the base URL, in priority order
pub const API_URL_ENV_VARS: [&str; 2] = ["CONTENTAI_BACKEND_URL", "VITE_BACKEND_URL"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::get_config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(io_err)
    }

    /// Refuses to overwrite a config file it cannot parse
    pub fn save_api_base_url(url: &str) -> Result<PathBuf, ConfigError> {
        let path = Self::get_config_path()?;
        Self::save_api_base_url_to(url, &path)?;
        Ok(path)
    }

    pub fn save_api_base_url_to(url: &str, path: &Path) -> Result<(), ConfigError> {
        let mut config = Self::load_from(path)?;
        config.api_base_url = Some(normalize_url(url));
        config.save_to(path)
    }

    /// Base URL from `cli_override`, the environment, this config, then the default
    pub fn resolve_api_base_url(&self, cli_override: Option<String>) -> String {
        self.resolve_with(cli_override, env_url(|name| std::env::var(name).ok()))
    }

    /// Precedence: `cli_override`, `env_value`, config file, default. Blank values are skipped.
    pub fn resolve_with(&self, cli_override: Option<String>, env_value: Option<String>) -> String {
        [cli_override, env_value, self.api_base_url.clone()]
            .into_iter()
            .flatten()
            .map(|url| normalize_url(&url))
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    fn get_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("contentai").join("config.json"))
    }
}

/// First non-blank value among [`API_URL_ENV_VARS`], looked up through `get`
fn env_url(get: impl Fn(&str) -> Option<String>) -> Option<String> {
    API_URL_ENV_VARS
        .iter()
        .filter_map(|name| get(name))
        .find(|value| !value.trim().is_empty())
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
