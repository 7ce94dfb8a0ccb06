use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_INVENTORY_PATH: &str = "estoque.json";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("PORT must be a valid number, got '{0}'")]
    InvalidPort(String),
    #[error("INVENTORY_BASE_URL must be an absolute URL, got '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Where relative inventory paths are fetched from.
    pub inventory_base_url: Option<Url>,
    pub inventory_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8080,
        };
        let inventory_base_url = lookup("INVENTORY_BASE_URL")
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
                    value: raw.clone(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;
        let inventory_path =
            lookup("INVENTORY_PATH").unwrap_or_else(|| DEFAULT_INVENTORY_PATH.to_string());

        Ok(Self {
            database_url,
            host,
            port,
            inventory_base_url,
            inventory_path,
        })
    }
}
