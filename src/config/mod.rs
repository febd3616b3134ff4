//! Configuration for the dashboard client
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/reqlytics/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod checkout;
mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use checkout::{CheckoutConfig, FileCheckout};
pub use logging::{FileLogging, LogRotation, LoggingConfig};

use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default service endpoint
const DEFAULT_BASE_URL: &str = "https://api.reqlytics.dev";

/// Default stats polling interval in seconds
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Reqlytics service
    pub base_url: String,

    /// Seconds between stats polls
    pub poll_interval_secs: u64,

    /// Whether to run the TUI (disabled for headless mode)
    pub enable_tui: bool,

    /// Theme name: "dark" or "light"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Checkout gateway configuration
    pub checkout: CheckoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            enable_tui: true,
            theme: "dark".to_string(),
            logging: LoggingConfig::default(),
            checkout: CheckoutConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub base_url: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub theme: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [checkout] section
    pub checkout: Option<FileCheckout>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/reqlytics/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("reqlytics").join("config.toml"))
    }

    /// Create the config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists.
    ///
    /// A config file that exists but cannot be parsed fails fast with a
    /// clear message instead of silently falling back to defaults while the
    /// user debugs the wrong thing.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: failed to parse config file {}", path.display());
                    eprintln!("  {}", e);
                    eprintln!("  To reset, run: reqlytics config --reset");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("Error: cannot read config file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // Base URL: env > file > default
        let base_url = std::env::var("REQLYTICS_BASE_URL")
            .ok()
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // A trailing slash would double up against the request paths
        let base_url = base_url.trim_end_matches('/').to_string();

        // Poll interval: env > file > default
        let poll_interval_secs = std::env::var("REQLYTICS_POLL_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.poll_interval_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
            .max(1);

        // TUI toggle: env only (runtime flag)
        let enable_tui = std::env::var("REQLYTICS_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Theme: env > file > default
        let theme = std::env::var("REQLYTICS_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or_else(|| "dark".to_string());

        let logging = LoggingConfig::from_file(file.logging);

        // Checkout: env var for the public key takes precedence
        let paystack_key = std::env::var("REQLYTICS_PAYSTACK_PUBLIC_KEY").ok();
        let checkout = CheckoutConfig::from_file(file.checkout, paystack_key);

        Self {
            base_url,
            poll_interval_secs,
            enable_tui,
            theme,
            logging,
            checkout,
        }
    }
}
