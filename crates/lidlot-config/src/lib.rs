//! Shared configuration for the lidlot CLI and TUI.
//!
//! TOML file + `LIDLOT_*` environment, layered over built-in defaults with
//! figment, and translation to the `lidlot_core` controller and transport
//! settings. Both binaries depend on this crate; the CLI applies its global
//! flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use lidlot_core::{
    CodePolicy, CoreError, DEFAULT_VALID_CODE, EntryConfig, PolicyKind, SpinTiming, TlsMode,
    TransportConfig,
};

/// Prefix of the environment variables read on top of the file.
pub const ENV_PREFIX: &str = "LIDLOT_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    fn from_core(field: &str, err: CoreError) -> Self {
        match err {
            CoreError::Config { field, reason } => Self::Validation { field, reason },
            other => Self::validation(field, other.to_string()),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub lottery: LotterySettings,
}

/// Where the lottery server lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Base URL of the server (e.g. "https://lottery.example.com").
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

/// Code validation and reel animation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LotterySettings {
    #[serde(default)]
    pub policy: PolicyKind,

    /// The one code accepted under the strict policy.
    #[serde(default = "default_valid_code")]
    pub valid_code: String,

    /// Codes accepted under the allow-list policy.
    #[serde(default = "default_accepted_codes")]
    pub accepted_codes: Vec<String>,

    /// Spin duration in milliseconds.
    #[serde(default = "default_spin_ms")]
    pub spin_ms: u64,

    /// Milliseconds between two reel frames.
    #[serde(default = "default_spin_interval_ms")]
    pub spin_interval_ms: u64,
}

impl Default for LotterySettings {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            valid_code: default_valid_code(),
            accepted_codes: default_accepted_codes(),
            spin_ms: default_spin_ms(),
            spin_interval_ms: default_spin_interval_ms(),
        }
    }
}

fn default_url() -> String {
    "http://127.0.0.1:8000".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_valid_code() -> String {
    DEFAULT_VALID_CODE.into()
}
fn default_accepted_codes() -> Vec<String> {
    vec![DEFAULT_VALID_CODE.into()]
}
fn default_spin_ms() -> u64 {
    1400
}
fn default_spin_interval_ms() -> u64 {
    80
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Check everything the controllers would otherwise reject later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server_url()?;
        if self.server.timeout == 0 {
            return Err(ConfigError::validation(
                "server.timeout",
                "must be at least 1 second",
            ));
        }
        if self.lottery.spin_interval_ms == 0 {
            return Err(ConfigError::validation(
                "lottery.spin_interval_ms",
                "must be greater than zero",
            ));
        }
        self.code_policy()?;
        Ok(())
    }

    /// Parsed server base URL. Only http and https are accepted.
    pub fn server_url(&self) -> Result<Url, ConfigError> {
        let url: Url = self
            .server
            .url
            .parse()
            .map_err(|e| ConfigError::validation("server.url", format!("{e}: {}", self.server.url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::validation(
                "server.url",
                format!("expected http or https, got '{other}'"),
            )),
        }
    }

    /// The validation policy selected by `lottery.policy`.
    pub fn code_policy(&self) -> Result<CodePolicy, ConfigError> {
        match self.lottery.policy {
            PolicyKind::Strict => CodePolicy::strict(self.lottery.valid_code.clone())
                .map_err(|e| ConfigError::from_core("lottery.valid_code", e)),
            PolicyKind::AllowList => CodePolicy::allow_list(self.lottery.accepted_codes.iter().cloned())
                .map_err(|e| ConfigError::from_core("lottery.accepted_codes", e)),
        }
    }

    pub fn spin_timing(&self) -> SpinTiming {
        SpinTiming {
            duration: Duration::from_millis(self.lottery.spin_ms),
            interval: Duration::from_millis(self.lottery.spin_interval_ms),
        }
    }

    /// Settings for an `EntryController`.
    pub fn entry_config(&self) -> Result<EntryConfig, ConfigError> {
        if self.lottery.spin_interval_ms == 0 {
            return Err(ConfigError::validation(
                "lottery.spin_interval_ms",
                "must be greater than zero",
            ));
        }
        Ok(EntryConfig {
            policy: self.code_policy()?,
            spin: self.spin_timing(),
        })
    }

    /// HTTP transport settings.
    pub fn transport_config(&self) -> TransportConfig {
        let tls = if self.server.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.server.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.server.timeout),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "lidlot", "lidlot").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("lidlot");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Defaults, then the TOML file at `path`, then `LIDLOT_*` variables
/// (`__` separates nesting: `LIDLOT_SERVER__URL`).
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment. A missing file is fine.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

/// Load config, returning a default if anything fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
