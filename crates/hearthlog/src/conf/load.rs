//! Load — config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::{OutputFormat, ReaderConfig};

impl ReaderConfig {
    /// Load configuration from file, then apply environment overrides.
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("HEARTHLOG_CONFIG_FILE")
            .unwrap_or_else(|_| "hearthlog.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: ReaderConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply `HEARTHLOG_*` overrides found through `lookup`.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("HEARTHLOG_LOG_PATH") {
            self.log_path = path;
        }
        if let Some(follow) = lookup("HEARTHLOG_FOLLOW") {
            match follow.parse() {
                Ok(follow) => self.follow = follow,
                Err(_) => tracing::warn!("Ignoring HEARTHLOG_FOLLOW={}: expected true or false", follow),
            }
        }
        if let Some(interval) = lookup("HEARTHLOG_POLL_INTERVAL_MS") {
            match interval.parse() {
                Ok(ms) => self.poll_interval_ms = ms,
                Err(_) => tracing::warn!("Ignoring HEARTHLOG_POLL_INTERVAL_MS={}: not a number", interval),
            }
        }
        if let Some(output) = lookup("HEARTHLOG_OUTPUT") {
            match output.parse::<OutputFormat>() {
                Ok(format) => self.output = format,
                Err(e) => tracing::warn!("Ignoring HEARTHLOG_OUTPUT: {}", e),
            }
        }
        if let Some(pattern) = lookup("HEARTHLOG_FILTER") {
            self.filter.pattern = Some(pattern);
        }
    }
}
