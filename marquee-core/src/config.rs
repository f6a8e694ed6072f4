use crate::omdb::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Stand-in for a "popular" listing; OMDb has no trending endpoint.
pub const DEFAULT_POPULAR_TERM: &str = "star wars";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No OMDb API key configured (set MARQUEE_OMDB_API_KEY or omdb_api_key in {0})")]
    MissingApiKey(String),
}

/// YAML config file structure (`~/.marquee/config.yaml`)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConfigYaml {
    #[serde(default)]
    pub omdb_api_key: Option<String>,
    #[serde(default)]
    pub omdb_base_url: Option<String>,
    #[serde(default)]
    pub popular_term: Option<String>,
}

/// Values read from `MARQUEE_*` environment variables. These win over the file.
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    omdb_api_key: Option<String>,
    omdb_base_url: Option<String>,
    popular_term: Option<String>,
}

impl EnvOverrides {
    fn read() -> Self {
        Self {
            omdb_api_key: env_var("MARQUEE_OMDB_API_KEY"),
            omdb_base_url: env_var("MARQUEE_OMDB_BASE_URL"),
            popular_term: env_var("MARQUEE_POPULAR_TERM"),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Application configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub omdb_api_key: String,
    pub omdb_base_url: String,
    /// Search term used by the "popular" listing
    pub popular_term: String,
}

impl Config {
    pub fn is_dev_mode() -> bool {
        std::env::var("MARQUEE_DEV_MODE").is_ok() || dotenvy::dotenv().is_ok()
    }

    pub fn load() -> Result<Self, ConfigError> {
        if Self::is_dev_mode() {
            info!("Dev mode activated - loading from .env");
            Self::resolve(ConfigYaml::default(), EnvOverrides::read(), ".env")
        } else {
            let path = Self::config_path()?;
            info!("Production mode - loading from {}", path.display());
            let yaml = if path.exists() {
                Self::read_yaml(&path)?
            } else {
                ConfigYaml::default()
            };
            Self::resolve(yaml, EnvOverrides::read(), &path.display().to_string())
        }
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConfigError::Config("Failed to get home directory".to_string()))?;
        Ok(home.join(".marquee").join("config.yaml"))
    }

    pub fn read_yaml(path: &Path) -> Result<ConfigYaml, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    fn resolve(yaml: ConfigYaml, env: EnvOverrides, source: &str) -> Result<Self, ConfigError> {
        let omdb_api_key = env
            .omdb_api_key
            .or(yaml.omdb_api_key.filter(|k| !k.is_empty()))
            .ok_or_else(|| ConfigError::MissingApiKey(source.to_string()))?;
        Ok(Self {
            omdb_api_key,
            omdb_base_url: env
                .omdb_base_url
                .or(yaml.omdb_base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            popular_term: env
                .popular_term
                .or(yaml.popular_term)
                .unwrap_or_else(|| DEFAULT_POPULAR_TERM.to_string()),
        })
    }
}
