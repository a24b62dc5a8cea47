//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            output::print_output(&config::active_path(global).display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Init { force } => init(global, force),
    }
}

/// Resolved settings: file, environment and flags applied.
fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_from(&config::active_path(global))?;
    config::apply_overrides(&mut cfg, global);

    let rendered = match global.output {
        OutputFormat::Text => toml::to_string_pretty(&cfg)?,
        OutputFormat::Json => output::render_json(&cfg)?,
    };
    output::print_output(rendered.trim_end(), global.quiet);
    Ok(())
}

fn init(global: &GlobalOpts, force: bool) -> Result<(), CliError> {
    let path = config::active_path(global);
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.display().to_string(),
        });
    }

    let mut cfg = Config::default();
    config::apply_overrides(&mut cfg, global);
    cfg.validate()?;
    config::save_config_to(&cfg, &path)?;

    output::print_output(&format!("Wrote {}", path.display()), global.quiet);
    Ok(())
}
