//! Configuration management for pos-sim

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::DEFAULT_RETENTION_DAYS;
use crate::pos::{OrderKind, Price};

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "POS_SIM_CONFIG";

/// Config file looked up in the working directory when the env var is unset
pub const DEFAULT_CONFIG_FILE: &str = "pos-sim.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log directory, active log name and retention
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Simulated backend behaviour
    #[serde(default)]
    pub pos: PosConfig,

    /// The order and product sent through each backend
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Log sink and rotation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory holding the active log and its dated archives (default: logs)
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,

    /// File name of the active log inside `logs_dir` (default: app.log)
    #[serde(default = "default_active_log")]
    pub active_log: String,

    /// Archives older than this many days are deleted (default: 5)
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,

    /// Filter level used when RUST_LOG is unset (default: info)
    #[serde(default = "default_level")]
    pub level: String,
}

/// Simulated POS provider settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PosConfig {
    /// Seed for reproducible success/failure draws. Unset means thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Demo transaction contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub order_kind: OrderKind,

    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Product price in cents (default: 1599 = $15.99)
    #[serde(default = "default_product_price_cents")]
    pub product_price_cents: u64,
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_active_log() -> String {
    "app.log".to_string()
}

fn default_retention_days() -> u64 {
    DEFAULT_RETENTION_DAYS
}

fn default_level() -> String {
    "info".to_string()
}

fn default_product_name() -> String {
    "Margherita Pizza".to_string()
}

fn default_product_price_cents() -> u64 {
    1599
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            logs_dir: default_logs_dir(),
            active_log: default_active_log(),
            retention_days: default_retention_days(),
            level: default_level(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            order_kind: OrderKind::default(),
            product_name: default_product_name(),
            product_price_cents: default_product_price_cents(),
        }
    }
}

impl LoggingConfig {
    /// Full path of the active log file
    pub fn active_log_path(&self) -> PathBuf {
        self.logs_dir.join(&self.active_log)
    }
}

impl DemoConfig {
    pub fn product_price(&self) -> Price {
        Price::from_cents(self.product_price_cents)
    }
}

impl Config {
    /// Load configuration from the default location, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific file, or return defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.logging.logs_dir).with_context(|| {
            format!(
                "Failed to create logs directory {}",
                self.logging.logs_dir.display()
            )
        })
    }
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
