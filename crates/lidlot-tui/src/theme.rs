//! SilkCircuit Neon palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

// ── Lottery ───────────────────────────────────────────────────────────

/// A code box holding a digit.
pub fn code_filled() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// An empty code box.
pub fn code_empty() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Inline validation error.
pub fn error_text() -> Style {
    Style::default().fg(ERROR_RED)
}

/// The submit affordance, enabled or not.
pub fn submit(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(SUCCESS_GREEN)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(BORDER_GRAY)
            .add_modifier(Modifier::DIM)
    }
}

/// A reel digit; yellow while the reels turn.
pub fn reel(spinning: bool) -> Style {
    let fg = if spinning { ELECTRIC_YELLOW } else { CORAL };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Result headline.
pub fn headline() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

/// Secondary text (details, expiry).
pub fn detail() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Redemption result line. Only a successful redemption is colored.
pub fn redeem_result(success: bool) -> Style {
    if success {
        Style::default()
            .fg(SUCCESS_GREEN)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM_WHITE)
    }
}
