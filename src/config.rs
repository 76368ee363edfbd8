use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::error::{FeedError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub feed: FeedConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

/// Locations for the two interchangeable cache backends. The composition
/// layer decides which one to wire up.
#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    pub file_path: PathBuf,
    pub sqlite_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            FeedError::Config(format!("Failed to read config file '{config_path}': {e}"))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
