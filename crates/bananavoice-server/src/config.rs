//! Server configuration loading from file and environment variables.

use bananavoice_cost::{
    CostError, PricingTable, DEFAULT_BASELINE_STT_RATE, DEFAULT_LLM_RATE, DEFAULT_STT_RATE,
    DEFAULT_TRANSPORT_RATE, DEFAULT_TTS_RATE,
};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Per-minute rates of the billed voice services.
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "bananavoice_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Per-minute unit prices, in dollars.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_transport_rate")]
    pub transport_per_minute: f64,

    #[serde(default = "default_stt_rate")]
    pub stt_per_minute: f64,

    #[serde(default = "default_llm_rate")]
    pub llm_per_minute: f64,

    #[serde(default = "default_tts_rate")]
    pub tts_per_minute: f64,

    /// Speech-to-text rate that savings are reported against.
    #[serde(default = "default_baseline_stt_rate")]
    pub baseline_stt_per_minute: f64,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_transport_rate() -> f64 {
    DEFAULT_TRANSPORT_RATE
}

fn default_stt_rate() -> f64 {
    DEFAULT_STT_RATE
}

fn default_llm_rate() -> f64 {
    DEFAULT_LLM_RATE
}

fn default_tts_rate() -> f64 {
    DEFAULT_TTS_RATE
}

fn default_baseline_stt_rate() -> f64 {
    DEFAULT_BASELINE_STT_RATE
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            transport_per_minute: default_transport_rate(),
            stt_per_minute: default_stt_rate(),
            llm_per_minute: default_llm_rate(),
            tts_per_minute: default_tts_rate(),
            baseline_stt_per_minute: default_baseline_stt_rate(),
        }
    }
}

impl PricingConfig {
    /// Builds the validated pricing table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Pricing` if any rate is negative or not finite.
    pub fn to_table(&self) -> Result<PricingTable, ConfigError> {
        let table = PricingTable::new(
            self.transport_per_minute,
            self.stt_per_minute,
            self.llm_per_minute,
            self.tts_per_minute,
        )?;
        bananavoice_cost::validate_rate("baseline speech-to-text", self.baseline_stt_per_minute)?;
        Ok(table)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configured rate is not a valid unit price.
    #[error("invalid pricing: {0}")]
    Pricing(#[from] CostError),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `BANANAVOICE_HOST` overrides `server.host`
/// - `BANANAVOICE_PORT` overrides `server.port`
/// - `BANANAVOICE_LOG_LEVEL` overrides `logging.level`
/// - `BANANAVOICE_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `BANANAVOICE_RATE_TRANSPORT`, `BANANAVOICE_RATE_STT`, `BANANAVOICE_RATE_LLM`,
///   `BANANAVOICE_RATE_TTS` and `BANANAVOICE_RATE_BASELINE_STT` override the
///   matching `pricing` entries
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed, or
/// if the resulting rates are invalid.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config);
    config.pricing.to_table()?;

    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(host) = std::env::var("BANANAVOICE_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("BANANAVOICE_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(level) = std::env::var("BANANAVOICE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("BANANAVOICE_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    let pricing = &mut config.pricing;
    for (var, rate) in [
        ("BANANAVOICE_RATE_TRANSPORT", &mut pricing.transport_per_minute),
        ("BANANAVOICE_RATE_STT", &mut pricing.stt_per_minute),
        ("BANANAVOICE_RATE_LLM", &mut pricing.llm_per_minute),
        ("BANANAVOICE_RATE_TTS", &mut pricing.tts_per_minute),
        ("BANANAVOICE_RATE_BASELINE_STT", &mut pricing.baseline_stt_per_minute),
    ] {
        if let Ok(value) = std::env::var(var) {
            match value.parse() {
                Ok(parsed) => *rate = parsed,
                Err(_) => tracing::warn!(var, value = %value, "ignoring unparsable rate override"),
            }
        }
    }
}
