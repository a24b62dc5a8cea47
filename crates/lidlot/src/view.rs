//! Terminal views for the controllers.
//!
//! The entry view keeps the latest state for the command to report and
//! shows the reels on an indicatif spinner while they turn. The coupon is
//! printed as soon as the controller opens the coupon screen.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use lidlot_core::{
    CODE_LEN, CouponDisplay, EntryView, NEUTRAL_REELS, REEL_COUNT, RedeemView, ReelDisplay,
    Screen, Tone, messages,
};

use crate::output::{Printer, reels_line};

// ── Entry ────────────────────────────────────────────────────────────

pub struct ConsoleView {
    printer: Printer,
    spinner: Option<ProgressBar>,
    pub reels: [u8; REEL_COUNT],
    pub input_error: Option<String>,
    pub message: String,
    pub detail: String,
}

impl ConsoleView {
    pub fn new(printer: Printer) -> Self {
        Self {
            printer,
            spinner: None,
            reels: NEUTRAL_REELS,
            input_error: None,
            message: String::new(),
            detail: String::new(),
        }
    }

    fn start_spinner(&mut self) {
        let spinner = if self.printer.text() {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(80));
            pb
        } else {
            ProgressBar::hidden()
        };
        spinner.set_message(format!("{} {}", reels_line(self.reels), messages::DRAWING));
        self.spinner = Some(spinner);
    }
}

impl ReelDisplay for ConsoleView {
    fn set_reels(&mut self, digits: [u8; REEL_COUNT]) {
        self.reels = digits;
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(format!("{} {}", reels_line(digits), messages::DRAWING));
        }
    }

    fn set_spinning(&mut self, spinning: bool) {
        if spinning {
            self.start_spinner();
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl EntryView for ConsoleView {
    fn show_screen(&mut self, screen: Screen) {
        debug!(%screen, "screen");
    }

    fn render_code(&mut self, boxes: [Option<char>; CODE_LEN]) {
        let code: String = boxes.iter().map(|b| b.unwrap_or('_')).collect();
        debug!(%code, "code");
    }

    fn set_input_error(&mut self, message: Option<&str>) {
        self.input_error = message.map(str::to_owned);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        debug!(enabled, "submit");
    }

    fn set_result(&mut self, message: &str, detail: &str) {
        message.clone_into(&mut self.message);
        detail.clone_into(&mut self.detail);
    }

    fn set_coupon_action_visible(&mut self, _visible: bool) {}

    fn show_coupon(&mut self, coupon: &CouponDisplay) {
        if !self.printer.text() {
            return;
        }
        if coupon.token.is_empty() {
            return;
        }
        self.printer.print(&coupon.qr);
        self.printer.print(&coupon.token);
        if !coupon.expiry.is_empty() {
            self.printer.print(&self.printer.dim(&coupon.expiry));
        }
    }
}

// ── Redemption ───────────────────────────────────────────────────────

/// Keeps the last result line and its tone.
#[derive(Debug, Default)]
pub struct ConsoleRedeemView {
    pub message: String,
    pub tone: Tone,
}

impl RedeemView for ConsoleRedeemView {
    fn set_result(&mut self, message: &str, tone: Tone) {
        debug!(message, ?tone, "redeem result");
        message.clone_into(&mut self.message);
        self.tone = tone;
    }
}
