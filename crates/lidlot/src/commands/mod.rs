//! Command dispatch: bridges CLI args -> core controllers -> output formatting.

pub mod config_cmd;
pub mod health;
pub mod play;
pub mod redeem;

use lidlot_core::LotteryClient;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;
use crate::output::Printer;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: LotteryClient,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let printer = Printer::new(global.output, global.color, global.quiet);
    match cmd {
        Command::Play(args) => play::handle(client, cfg, args, printer).await,
        Command::Redeem(args) => redeem::handle(client, args, printer).await,
        Command::Health => health::handle(&client, printer).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
