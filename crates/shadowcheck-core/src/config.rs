//! Configuration management for shadowcheck.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Credentials are only ever read from the
//! environment and are never written back to disk.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Credential string that is wiped on drop and redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wrap a credential.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Borrow the raw credential for use in a request.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Main application configuration.
///
/// This is loaded from `~/.config/shadowcheck/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Structured API settings
    pub api: ApiConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Human-verification settings
    pub verification: VerificationConfig,
    /// HTTP server settings
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from the XDG path, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `X_BEARER_TOKEN`: API bearer credential
    /// - `RECAPTCHA_SECRET_KEY`: human-verification secret
    /// - `PORT`: listen port
    /// - `SHADOWCHECK_API_BASE_URL`: API base URL
    /// - `SHADOWCHECK_HEADLESS`: browser headless mode (true/false)
    /// - `SHADOWCHECK_CHROME_PATH`: Chromium executable
    /// - `SHADOWCHECK_LOG`: default log filter
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a map in tests).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("X_BEARER_TOKEN").filter(|v| !v.is_empty()) {
            self.api.bearer_token = Some(Secret::new(token));
            tracing::debug!("Loaded api.bearer_token from env");
        }

        if let Some(secret) = lookup("RECAPTCHA_SECRET_KEY").filter(|v| !v.is_empty()) {
            self.verification.secret = Some(Secret::new(secret));
            tracing::debug!("Loaded verification.secret from env");
        }

        if let Some(val) = lookup("PORT") {
            match val.parse() {
                Ok(port) => {
                    self.server.port = port;
                    tracing::debug!("Override server.port from env: {}", port);
                }
                Err(_) => tracing::warn!("Ignoring unparseable PORT value: {}", val),
            }
        }

        if let Some(url) = lookup("SHADOWCHECK_API_BASE_URL") {
            tracing::debug!("Override api.base_url from env: {}", url);
            self.api.base_url = url;
        }

        if let Some(val) = lookup("SHADOWCHECK_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(path) = lookup("SHADOWCHECK_CHROME_PATH") {
            tracing::debug!("Override browser.chrome_executable from env: {}", path);
            self.browser.chrome_executable = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("SHADOWCHECK_LOG") {
            self.server.log_level = filter;
        }
    }

    /// Check the values the detection pipeline cannot run without.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api.bearer_token.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "api.bearer_token".to_string(),
                reason: "X_BEARER_TOKEN is not set".to_string(),
            });
        }

        let timeouts = [
            ("api.timeout_secs", self.api.timeout_secs),
            ("api.connect_timeout_secs", self.api.connect_timeout_secs),
            ("browser.page_load_timeout_secs", self.browser.page_load_timeout_secs),
            ("browser.wait_timeout_secs", self.browser.wait_timeout_secs),
            ("browser.launch_timeout_secs", self.browser.launch_timeout_secs),
            ("verification.timeout_secs", self.verification.timeout_secs),
        ];
        for (field, value) in timeouts {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "timeout must be greater than zero".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist. Secrets are skipped.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/shadowcheck/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "shadowcheck", "shadowcheck")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Structured API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the platform API
    pub base_url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// TCP/TLS connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Bearer credential (env only)
    #[serde(skip)]
    pub bearer_token: Option<Secret>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.x.com".to_string(),
            timeout_secs: 15,
            connect_timeout_secs: 10,
            bearer_token: None,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Public web surface the observational probes visit
    pub web_base_url: String,
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Page load timeout in seconds
    pub page_load_timeout_secs: u64,
    /// Timeout for waiting on a single element, in seconds
    pub wait_timeout_secs: u64,
    /// Time given to the type-ahead suggestions to render, in milliseconds
    pub suggestion_settle_ms: u64,
    /// Browser launch timeout in seconds
    pub launch_timeout_secs: u64,
    /// Fixed user agent; a realistic desktop one is picked when unset
    pub user_agent: Option<String>,
    /// Explicit Chromium executable; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            web_base_url: "https://x.com".to_string(),
            headless: true,
            window_width: 1920,
            window_height: 1080,
            page_load_timeout_secs: 30,
            wait_timeout_secs: 10,
            suggestion_settle_ms: 2000,
            launch_timeout_secs: 30,
            user_agent: None,
            chrome_executable: None,
        }
    }
}

/// Human-verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Token verification endpoint
    pub verify_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Verification secret (env only)
    #[serde(skip)]
    pub secret: Option<Secret>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            verify_url: "https://www.google.com/recaptcha/api/siteverify".to_string(),
            timeout_secs: 10,
            secret: None,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info,shadowcheck=debug".to_string(),
        }
    }
}
