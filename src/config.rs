// File: ./src/config.rs
// Handles configuration loading and defaults.
use anyhow::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_check_time() -> String {
    "09:30".to_string()
}
fn default_connectivity_url() -> String {
    "https://www.google.com".to_string()
}
fn default_connectivity_timeout() -> u64 {
    10
}
fn default_connectivity_retry() -> u64 {
    60
}
fn default_fetch_timeout() -> u64 {
    15
}
fn default_notify_pacing() -> u64 {
    2
}
fn default_notification_timeout() -> u64 {
    10
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Direct-download URL of the JSON reminder document.
    pub url: String,
    /// Local wall-clock time ("HH:MM") of the daily check in scheduled mode.
    #[serde(default = "default_check_time")]
    pub check_time: String,
    /// Endpoint probed to decide whether the network is reachable.
    #[serde(default = "default_connectivity_url")]
    pub connectivity_url: String,
    #[serde(default = "default_connectivity_timeout")]
    pub connectivity_timeout_secs: u64,
    #[serde(default = "default_connectivity_retry")]
    pub connectivity_retry_secs: u64,
    /// Overall bound on the connectivity wait. Absent means wait forever.
    #[serde(default)]
    pub connectivity_deadline_secs: Option<u64>,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
    /// Pause inserted between successive notifications.
    #[serde(default = "default_notify_pacing")]
    pub notify_pacing_secs: u64,
    /// How long each notification stays on screen.
    #[serde(default = "default_notification_timeout")]
    pub notification_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            // Match the serde defaults
            check_time: default_check_time(),
            connectivity_url: default_connectivity_url(),
            connectivity_timeout_secs: 10,
            connectivity_retry_secs: 60,
            connectivity_deadline_secs: None,
            fetch_timeout_secs: 15,
            notify_pacing_secs: 2,
            notification_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Default config file location (the platform config dir, e.g.
    /// `~/.config/rappel/config.toml` on Linux).
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "trougnouf", "rappel")
            .ok_or_else(|| anyhow::anyhow!("Could not determine a config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load the configuration from `path`, or from the default location.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        // Explicitly detect missing file so callers (onboarding hint) can behave accordingly.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        // Read the file with contextualized error (covers permission/IO issues).
        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        Self::from_toml(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })
    }

    /// Parse a TOML document into a configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.url.is_empty() {
            return Err(anyhow::anyhow!("'url' must not be empty"));
        }
        Ok(config)
    }

    /// Helper to detect whether an anyhow::Error indicates that the config
    /// file was missing, so the binary can print an onboarding hint instead
    /// of a parse error.
    pub fn is_missing_config_error(err: &Error) -> bool {
        // Fast textual check for the explicit not-found message.
        if err.to_string().contains("Config file not found") {
            return true;
        }

        // Walk the error chain and look for an underlying IO NotFound.
        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }
}
