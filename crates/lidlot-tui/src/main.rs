//! `lidlot-tui`: terminal front end for the lid-code lottery.
//!
//! Built on [ratatui](https://ratatui.rs). Two tabs: the Lottery tab runs
//! the entry flow (code boxes, reels, coupon with a QR code) and the Redeem
//! tab runs the redemption form. Each controller from `lidlot-core` lives in
//! its own task; see [`data_bridge`].
//!
//! Logs are written to a file (default `$TMPDIR/lidlot-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use lidlot_core::LotteryClient;

use crate::app::App;
use crate::data_bridge::BridgeConfig;

/// Terminal client for the lid-code lottery.
#[derive(Parser, Debug)]
#[command(name = "lidlot-tui", version, about)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, env = "LIDLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Lottery server base URL (overrides config)
    #[arg(short = 'S', long, env = "LIDLOT_URL")]
    server: Option<String>,

    /// Link whose `code` query parameter pre-fills the code boxes
    #[arg(long)]
    link: Option<Url>,

    /// Log file path (defaults to $TMPDIR/lidlot-tui.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr; that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "lidlot_tui={log_level},lidlot_core={log_level},lidlot_api={log_level}"
        ))
    });

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("lidlot-tui.log"));
    let log_dir = log_file
        .parent()
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("lidlot-tui.log"))
        .to_owned();

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve settings (file + env, then flags) into the bridge configuration.
fn build_bridge_config(cli: &Cli) -> Result<BridgeConfig> {
    let path = cli.config.clone().unwrap_or_else(lidlot_config::config_path);
    let mut cfg = lidlot_config::load_config_from(&path)
        .wrap_err_with(|| format!("loading {}", path.display()))?;
    if let Some(ref url) = cli.server {
        cfg.server.url.clone_from(url);
    }
    cfg.validate().wrap_err("invalid configuration")?;

    let client = LotteryClient::new(cfg.server_url()?, &cfg.transport_config())
        .wrap_err("building HTTP client")?;

    Ok(BridgeConfig {
        client,
        entry: cfg.entry_config()?,
        link: cli.link.clone(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    // Fail before touching the terminal if the settings are unusable
    let bridge = build_bridge_config(&cli)?;

    info!(
        server = %bridge.client.base_url(),
        policy = %bridge.entry.policy.kind(),
        "starting lidlot-tui"
    );

    let mut app = App::new(bridge);
    app.run().await?;

    Ok(())
}
