//! Output formatting: text and JSON.
//!
//! Text lines are colored with owo-colors when enabled; JSON is the raw
//! server response via serde.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;

use lidlot_core::{REEL_COUNT, Tone};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Text printer bound to the global output flags.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Printer {
    pub fn new(format: OutputFormat, color: ColorMode, quiet: bool) -> Self {
        Self {
            format,
            color: should_color(color),
            quiet,
        }
    }

    /// Whether human-readable lines go to stdout.
    pub fn text(&self) -> bool {
        self.format == OutputFormat::Text && !self.quiet
    }

    /// Print one rendered block, respecting quiet mode.
    pub fn print(&self, output: &str) {
        print_output(output, self.quiet);
    }

    /// Print `data` as JSON when `--output json` is selected.
    pub fn print_json<T: serde::Serialize + ?Sized>(&self, data: &T) -> Result<(), CliError> {
        if self.format == OutputFormat::Json {
            print_output(&render_json(data)?, self.quiet);
        }
        Ok(())
    }

    /// A result headline in the tone of the outcome.
    pub fn headline(&self, message: &str, tone: Tone) -> String {
        if !self.color {
            return message.to_owned();
        }
        match tone {
            Tone::Success => message.green().bold().to_string(),
            Tone::Neutral => message.bold().to_string(),
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_owned()
        }
    }
}

/// `[ 7 | 7 | 7 ]`
pub fn reels_line(digits: [u8; REEL_COUNT]) -> String {
    let cells: Vec<String> = digits.iter().map(u8::to_string).collect();
    format!("[ {} ]", cells.join(" | "))
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Pretty-printed JSON.
pub fn render_json<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reels_are_boxed_and_separated() {
        assert_eq!(reels_line([7, 7, 5]), "[ 7 | 7 | 5 ]");
    }

    #[test]
    fn headline_is_plain_without_color() {
        let printer = Printer {
            format: OutputFormat::Text,
            color: false,
            quiet: false,
        };
        assert_eq!(printer.headline("当たり！", Tone::Success), "当たり！");
    }

    #[test]
    fn json_mode_disables_text() {
        let printer = Printer {
            format: OutputFormat::Json,
            color: false,
            quiet: false,
        };
        assert!(!printer.text());
    }
}
