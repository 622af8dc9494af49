use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::MatchingOptions;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    /// Largest accepted JSON request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_max_body_bytes() -> usize { 4 * 1024 * 1024 }

/// Server-wide matching defaults; requests may override the scoring fields
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_name_weight")]
    pub name_weight: f64,
    #[serde(default = "default_date_weight")]
    pub date_weight: f64,
    #[serde(default = "default_fuzzy_date_matching")]
    pub fuzzy_date_matching: bool,
    /// Upper bound on the length of each candidate list in a request
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            name_weight: default_name_weight(),
            date_weight: default_date_weight(),
            fuzzy_date_matching: default_fuzzy_date_matching(),
            max_candidates: default_max_candidates(),
        }
    }
}

impl MatchingSettings {
    pub fn options(&self) -> MatchingOptions {
        MatchingOptions {
            threshold: self.threshold,
            name_weight: self.name_weight,
            date_weight: self.date_weight,
            fuzzy_date_matching: self.fuzzy_date_matching,
        }
    }
}

fn default_threshold() -> f64 { 0.7 }
fn default_name_weight() -> f64 { 0.5 }
fn default_date_weight() -> f64 { 0.5 }
fn default_fuzzy_date_matching() -> bool { true }
fn default_max_candidates() -> usize { 5000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// One of "json", "pretty" or "compact"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MATCHER_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCHER__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject matching defaults outside [0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.matching;
        for (key, value) in [
            ("matching.threshold", m.threshold),
            ("matching.name_weight", m.name_weight),
            ("matching.date_weight", m.date_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Message(format!(
                    "{} must be between 0 and 1, got {}",
                    key, value
                )));
            }
        }

        if !matches!(self.logging.format.as_str(), "json" | "pretty" | "compact") {
            return Err(ConfigError::Message(format!(
                "logging.format must be json, pretty or compact, got {}",
                self.logging.format
            )));
        }

        if m.max_candidates == 0 {
            return Err(ConfigError::Message(
                "matching.max_candidates must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("MATCHER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
