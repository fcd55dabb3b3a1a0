use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{PasswordyError, Result};

/// Client configuration, loaded from `~/.config/passwordy/config.toml`.
///
/// Every field has a sensible default so Passwordy works out-of-the-box
/// against a local server without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root URL of the vault server (scheme + host + port).
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Path prefix every API route lives under.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Username used when none is given on the command line.
    #[serde(default)]
    pub username: Option<String>,

    /// How long the "copied" marker stays lit after a copy.
    #[serde(default = "default_copied_indicator_secs")]
    pub copied_indicator_secs: u64,

    /// Length of generated passwords.
    #[serde(default = "default_password_length")]
    pub password_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_copied_indicator_secs() -> u64 {
    2
}

fn default_password_length() -> usize {
    crate::generator::DEFAULT_LENGTH
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            api_prefix: default_api_prefix(),
            timeout_secs: default_timeout_secs(),
            username: None,
            copied_indicator_secs: default_copied_indicator_secs(),
            password_length: default_password_length(),
        }
    }
}

impl Settings {
    /// Name of the config file inside the config directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<config_dir>/config.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        Self::load_file(&config_dir.join(Self::FILE_NAME))
    }

    /// Load settings from an explicit file path.
    ///
    /// A missing file yields defaults; a file that exists but cannot be
    /// parsed (or holds invalid values) is an error.
    pub fn load_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)?;

        let mut settings: Settings = toml::from_str(&contents).map_err(|e| {
            PasswordyError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.server_url = normalize_server_url(&settings.server_url)?;
        Ok(settings)
    }

    /// The default config directory: `$HOME/.config/passwordy`.
    pub fn default_dir() -> Option<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()?;
        Some(PathBuf::from(home).join(".config").join("passwordy"))
    }

    /// Replace the server URL (from `--server` or `PASSWORDY_SERVER`).
    pub fn with_server_url(mut self, url: &str) -> Result<Self> {
        self.server_url = normalize_server_url(url)?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn copied_window(&self) -> Duration {
        Duration::from_secs(self.copied_indicator_secs)
    }
}

/// Require an http(s) scheme and strip trailing slashes so that
/// `server_url + path` never produces `//`.
pub fn normalize_server_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(PasswordyError::ConfigError(format!(
            "server URL '{trimmed}' must start with http:// or https://"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

// ── Tests ────────────────────────────────────────────────────────────
