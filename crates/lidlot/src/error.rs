//! CLI error types with miette diagnostics.
//!
//! Maps config, API and core errors into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use lidlot_config::ConfigError;
use lidlot_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const REJECTED: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const CONFIG: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the lottery server at {url}")]
    #[diagnostic(
        code(lidlot::connection_failed),
        help(
            "Check that the server is running and accessible.\n\
             Reason: {reason}\n\
             Try: lidlot health --server {url}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("TLS setup failed for {url}")]
    #[diagnostic(
        code(lidlot::tls_error),
        help(
            "{reason}\n\
             Use --insecure (-k) to accept a self-signed certificate, or set server.ca_cert."
        )
    )]
    TlsError { url: String, reason: String },

    #[error("Server answered {status}")]
    #[diagnostic(code(lidlot::http_error), help("{body}"))]
    Http { status: u16, body: String },

    #[error("The server reported it is not healthy")]
    #[diagnostic(code(lidlot::unhealthy))]
    Unhealthy,

    // ── Lottery ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(lidlot::rejected))]
    Rejected {
        message: String,
        #[help]
        detail: Option<String>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lidlot::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(lidlot::config),
        help("Inspect the resolved settings with: lidlot config show")
    )]
    Config(Box<ConfigError>),

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(lidlot::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(lidlot::core))]
    Core(CoreError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not encode JSON output: {0}")]
    #[diagnostic(code(lidlot::json))]
    Json(#[from] serde_json::Error),

    #[error("Could not encode TOML output: {0}")]
    #[diagnostic(code(lidlot::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } | Self::Http { .. } => {
                exit_code::CONNECTION
            }
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Config(_) | Self::ConfigExists { .. } => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }

    /// Local or server-side rejection with an optional detail line.
    pub fn rejected(message: &str, detail: Option<&str>) -> Self {
        Self::Rejected {
            message: message.to_owned(),
            detail: detail.filter(|d| !d.is_empty()).map(str::to_owned),
        }
    }

    /// Translate a transport failure against `url`.
    pub fn from_api(err: lidlot_core::ApiError, url: &str) -> Self {
        match err {
            lidlot_core::ApiError::Http { status, body } => Self::Http { status, body },
            lidlot_core::ApiError::Tls(reason) => Self::TlsError {
                url: url.to_owned(),
                reason,
            },
            other => Self::ConnectionFailed {
                url: url.to_owned(),
                reason: other.to_string(),
            },
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCode { code } => Self::Validation {
                field: "code".into(),
                reason: format!("'{code}' is not a 4-digit code"),
            },
            CoreError::Config { field, reason } => Self::Validation { field, reason },
            other => Self::Core(other),
        }
    }
}
