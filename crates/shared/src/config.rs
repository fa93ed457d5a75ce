//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Reconciliation matching thresholds.
    #[serde(default)]
    pub matching: MatchingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Confidence thresholds used when proposing and auto-selecting matches.
///
/// Both thresholds are exclusive: a candidate needs a confidence strictly
/// greater than the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MatchingConfig {
    /// Minimum confidence for a pair to be proposed at all.
    #[serde(default = "default_candidate_threshold")]
    pub candidate_threshold: u8,
    /// Confidence above which a candidate is pre-selected for the reviewer.
    #[serde(default = "default_auto_select_threshold")]
    pub auto_select_threshold: u8,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            candidate_threshold: default_candidate_threshold(),
            auto_select_threshold: default_auto_select_threshold(),
        }
    }
}

fn default_candidate_threshold() -> u8 {
    60
}

fn default_auto_select_threshold() -> u8 {
    80
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MAPLEBOOKS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
