//! Clap derive structures for the `lidlot` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lidlot -- play the lid-code lottery and redeem coupons
#[derive(Debug, Parser)]
#[command(
    name = "lidlot",
    version,
    about = "Play the lid-code lottery and redeem coupons from the command line",
    long_about = "Client for the lid-code promotional lottery.\n\n\
        Submit the 4-digit code printed on a bottle lid, watch the reels, and\n\
        get a coupon with a QR code on a win. Store staff redeem coupons by token.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long, env = "LIDLOT_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Lottery server base URL (overrides config)
    #[arg(long, short = 'S', env = "LIDLOT_URL", global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Code validation policy (overrides config)
    #[arg(long, global = true)]
    pub policy: Option<PolicyArg>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LIDLOT_OUTPUT",
        default_value = "text",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output, Color & Policy Enums ─────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines (default, interactive)
    Text,
    /// Pretty-printed JSON of the server response
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Submit only the one valid code
    Strict,
    /// Submit any listed code; membership checked on submit
    AllowList,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a lid code and draw
    #[command(alias = "p")]
    Play(PlayArgs),

    /// Redeem a coupon token
    #[command(alias = "r")]
    Redeem(RedeemArgs),

    /// Check that the server is up
    Health,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Play ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// The 4-digit code printed on the lid
    pub code: Option<String>,

    /// Link carrying the code in its `code` query parameter
    #[arg(long, value_name = "URL", conflicts_with = "code")]
    pub link: Option<String>,

    /// Don't render the coupon after a win
    #[arg(long)]
    pub no_coupon: bool,
}

// ── Redeem ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RedeemArgs {
    /// Coupon token as shown under the QR code
    pub token: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
