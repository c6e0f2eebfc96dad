//! Runtime configuration.
//!
//! Everything has a default; an optional TOML file overrides any subset of it.
//! The API key is never part of the file and is read from the environment.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.apollo.io";
pub const DEFAULT_API_KEY_ENV: &str = "APOLLO_API_KEY";
pub const DEFAULT_LOCKED_SENTINEL: &str = "email_not_unlocked@domain.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid URL in '{field}': {url}")]
    InvalidUrl { field: String, url: String },

    #[error("Configuration field '{field}' cannot be empty")]
    EmptyRequired { field: String },

    #[error("Configuration field '{field}' must be greater than zero")]
    ZeroValue { field: String },

    #[error("API key not set: export {0} or add it to a .env file")]
    MissingApiKey(String),
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct EnricherConfig {
    pub api: ApiConfig,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Placeholder the search API puts in `email` for locked addresses.
    pub locked_email_sentinel: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            locked_email_sentinel: DEFAULT_LOCKED_SENTINEL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// How candidates are collected for a company.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPolicy {
    /// One oversized page, ranked by title preference, top-N kept.
    #[default]
    Ranked,
    /// Walk result pages in API order until empty, `max_pages` or the cap.
    Paginated,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Title substrings in priority order, matched case-insensitively.
    pub preferred_titles: Vec<String>,
    pub max_contacts: usize,
    /// Ranked policy asks for `max_contacts * pool_multiplier` candidates.
    pub pool_multiplier: usize,
    pub policy: ResolutionPolicy,
    /// Page size for the paginated policy.
    pub per_page: usize,
    pub max_pages: u32,
    pub search_delay_ms: u64,
    /// Send the preference list as `person_titles[]` so the API pre-filters.
    pub filter_titles_server_side: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            preferred_titles: vec!["Founder".to_string(), "Growth".to_string()],
            max_contacts: 3,
            pool_multiplier: 3,
            policy: ResolutionPolicy::Ranked,
            per_page: 25,
            max_pages: 10,
            search_delay_ms: 1000,
            filter_titles_server_side: false,
        }
    }
}

impl ResolverConfig {
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    pub fn ranked_pool_size(&self) -> usize {
        self.max_contacts.saturating_mul(self.pool_multiplier)
    }
}

impl EnricherConfig {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::FileNotFound(p.to_path_buf()));
                }
                let content = fs::read_to_string(p)?;
                toml::from_str(&content)?
            }
            None => EnricherConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if Url::parse(&self.api.base_url).is_err() {
            return Err(ConfigError::InvalidUrl {
                field: "api.base_url".to_string(),
                url: self.api.base_url.clone(),
            });
        }
        if self.api.api_key_env.trim().is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "api.api_key_env".to_string(),
            });
        }
        if self.api.locked_email_sentinel.trim().is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "api.locked_email_sentinel".to_string(),
            });
        }

        let positive = [
            ("resolver.max_contacts", self.resolver.max_contacts),
            ("resolver.pool_multiplier", self.resolver.pool_multiplier),
            ("resolver.per_page", self.resolver.per_page),
            ("resolver.max_pages", self.resolver.max_pages as usize),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::ZeroValue {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(ConfigError::MissingApiKey(self.api.api_key_env.clone())),
        }
    }
}
