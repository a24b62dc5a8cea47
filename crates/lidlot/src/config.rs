//! CLI configuration, a thin wrapper around `lidlot_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--server, --timeout, etc.).

use std::path::PathBuf;

use lidlot_core::{LotteryClient, PolicyKind};

use crate::cli::{GlobalOpts, PolicyArg};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use lidlot_config::{Config, config_path, load_config_from, save_config_to};

// ── CLI-specific helpers ────────────────────────────────────────────

/// The config file in effect: `--config` or the platform default.
pub fn active_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load file + env, apply flag overrides, and validate.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config_from(&active_path(global))?;
    apply_overrides(&mut cfg, global);
    cfg.validate()?;
    Ok(cfg)
}

/// CLI flags take priority over file and environment values.
pub fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.server {
        cfg.server.url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.server.timeout = timeout;
    }
    if global.insecure {
        cfg.server.insecure = true;
    }
    if let Some(policy) = global.policy {
        cfg.lottery.policy = match policy {
            PolicyArg::Strict => PolicyKind::Strict,
            PolicyArg::AllowList => PolicyKind::AllowList,
        };
    }
}

/// HTTP client for the configured server.
pub fn build_client(cfg: &Config) -> Result<LotteryClient, CliError> {
    let url = cfg.server_url()?;
    LotteryClient::new(url, &cfg.transport_config())
        .map_err(|e| CliError::from_api(e, &cfg.server.url))
}
