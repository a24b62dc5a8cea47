// ── Entry controller ──
//
// Owns the code-entry screen, the play request, the result screen with its
// reel animation, and the coupon screen. All rendering goes through the
// injected `EntryView`, so the state machine runs the same under the CLI,
// the TUI, and the unit tests.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use lidlot_api::{PlayResponse, PlayStatus};

use crate::backend::LotteryBackend;
use crate::code::{CODE_LEN, CodePolicy, EntryCode, PolicyKind, is_well_formed};
use crate::coupon::{Coupon, CouponDisplay, QrEncoder};
use crate::error::CoreError;
use crate::messages;
use crate::reels::{
    NEUTRAL_REELS, ReelDisplay, SlotReels, SpinTiming, WINNING_REELS, losing_digits,
};

/// Name of the URL query parameter that pre-fills the code.
pub const CODE_QUERY_PARAM: &str = "code";

// ── Screens ──────────────────────────────────────────────────────────

/// The three screens of the entry flow. Exactly one is active.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Screen {
    #[default]
    Input,
    Result,
    Coupon,
}

// ── Input events ─────────────────────────────────────────────────────

/// On-screen keypad buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKey {
    Digit(char),
    Back,
    Clear,
}

impl KeypadKey {
    /// Parse a keypad `data-key` value: `"0"`..`"9"`, `"back"` or `"clear"`.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "back" => Some(Self::Back),
            "clear" => Some(Self::Clear),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Some(Self::Digit(c)),
                    _ => None,
                }
            }
        }
    }
}

/// Physical keyboard keys the entry screen reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
}

// ── View ─────────────────────────────────────────────────────────────

/// Named accessors for everything the entry flow draws.
pub trait EntryView: ReelDisplay {
    /// Activate one screen and deactivate the others.
    fn show_screen(&mut self, screen: Screen);

    /// Redraw the four code boxes.
    fn render_code(&mut self, boxes: [Option<char>; CODE_LEN]);

    /// Inline error under the code boxes; `None` hides it.
    fn set_input_error(&mut self, message: Option<&str>);

    fn set_submit_enabled(&mut self, enabled: bool);

    /// Headline and detail line of the result screen.
    fn set_result(&mut self, message: &str, detail: &str);

    /// Show or hide the "show coupon" action on the result screen.
    fn set_coupon_action_visible(&mut self, visible: bool);

    /// Fill the coupon screen.
    fn show_coupon(&mut self, coupon: &CouponDisplay);
}

// ── Outcome ──────────────────────────────────────────────────────────

/// What a call to [`EntryController::play`] ended with.
#[derive(Debug)]
pub enum PlayOutcome {
    /// Rejected locally; no request was sent.
    Rejected,
    /// The request failed in transport or with a non-2xx status.
    NetworkError(lidlot_api::Error),
    /// The server answered.
    Answered(PlayResponse),
}

impl PlayOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Self::Answered(r) if r.status == PlayStatus::Win)
    }
}

// ── Config ───────────────────────────────────────────────────────────

/// Tunables for an [`EntryController`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryConfig {
    pub policy: CodePolicy,
    pub spin: SpinTiming,
}

// ── Controller ───────────────────────────────────────────────────────

/// The entry-screen state machine.
pub struct EntryController<V, B, Q> {
    view: V,
    backend: B,
    encoder: Q,
    policy: CodePolicy,
    reels: SlotReels,
    rng: StdRng,
    code: EntryCode,
    screen: Screen,
    coupon: Option<Coupon>,
    coupon_action_visible: bool,
    submit_enabled: bool,
}

impl<V, B, Q> EntryController<V, B, Q>
where
    V: EntryView,
    B: LotteryBackend,
    Q: QrEncoder,
{
    /// Build the controller and draw the initial input screen.
    pub fn new(view: V, backend: B, encoder: Q, config: EntryConfig) -> Self {
        let mut controller = Self {
            view,
            backend,
            encoder,
            policy: config.policy,
            reels: SlotReels::new(config.spin),
            rng: StdRng::from_entropy(),
            code: EntryCode::new(),
            screen: Screen::Input,
            coupon: None,
            coupon_action_visible: false,
            submit_enabled: false,
        };
        controller.view.show_screen(Screen::Input);
        controller.view.set_coupon_action_visible(false);
        controller.render_code();
        controller
    }

    /// Replace the random source (deterministic reels in tests).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn code(&self) -> &EntryCode {
        &self.code
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Coupon retained from the last win.
    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn policy(&self) -> &CodePolicy {
        &self.policy
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    // ── Screens ──────────────────────────────────────────────────────

    fn switch_screen(&mut self, screen: Screen) {
        debug!(from = %self.screen, to = %screen, "switching screen");
        self.screen = screen;
        self.view.show_screen(screen);
    }

    // ── Code entry ───────────────────────────────────────────────────

    pub fn add_digit(&mut self, digit: char) {
        if self.code.push(digit) {
            self.render_code();
        }
    }

    pub fn remove_digit(&mut self) {
        self.code.pop();
        self.render_code();
    }

    pub fn clear_code(&mut self) {
        self.code.clear();
        self.render_code();
    }

    /// A click on the on-screen keypad.
    pub fn press_keypad(&mut self, key: KeypadKey) {
        match key {
            KeypadKey::Digit(d) => self.add_digit(d),
            KeypadKey::Back => self.remove_digit(),
            KeypadKey::Clear => self.clear_code(),
        }
    }

    /// Keyboard shortcuts, honoured only while the input screen is active.
    pub async fn handle_key(&mut self, key: Key) -> Option<PlayOutcome> {
        if self.screen != Screen::Input {
            return None;
        }
        match key {
            Key::Char(c) if c.is_ascii_digit() => self.add_digit(c),
            Key::Char(_) => {}
            Key::Backspace => self.remove_digit(),
            Key::Enter => return Some(self.play().await),
        }
        None
    }

    /// Pre-fill from a code taken from outside (a link). Only accepted codes
    /// are applied.
    pub fn prefill(&mut self, code: &str) -> bool {
        if !self.policy.accepts(code) || self.code.set(code).is_err() {
            debug!(code, "ignoring pre-fill code");
            return false;
        }
        self.render_code();
        true
    }

    /// Pre-fill from the `code` query parameter of a link.
    pub fn prefill_from_url(&mut self, url: &Url) -> bool {
        url.query_pairs()
            .find(|(name, _)| name == CODE_QUERY_PARAM)
            .is_some_and(|(_, value)| self.prefill(&value))
    }

    fn render_code(&mut self) {
        self.view.render_code(self.code.boxes());
        match self.policy.kind() {
            PolicyKind::Strict => {
                self.validate_strict(false);
            }
            PolicyKind::AllowList => {
                self.view.set_input_error(None);
                self.refresh_submit();
            }
        }
    }

    /// Strict policy: recompute the inline error and the submit state.
    /// The error shows once the code is complete, or right away if forced.
    fn validate_strict(&mut self, force_message: bool) -> bool {
        let valid = self.policy.accepts(self.code.as_str());
        let show_error = !valid && (force_message || self.code.is_complete());
        self.view
            .set_input_error(show_error.then_some(messages::INVALID_CODE));
        self.set_submit_enabled(valid);
        valid
    }

    /// Allow-list policy: membership is checked only at submit time.
    fn validate_allow_list(&mut self) -> bool {
        if !is_well_formed(self.code.as_str()) {
            return false;
        }
        if !self.policy.accepts(self.code.as_str()) {
            self.view.set_input_error(Some(messages::INVALID_CODE));
            return false;
        }
        true
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
        self.view.set_submit_enabled(enabled);
    }

    fn refresh_submit(&mut self) {
        let enabled = self.policy.submit_enabled(&self.code);
        self.set_submit_enabled(enabled);
    }

    // ── Play ─────────────────────────────────────────────────────────

    /// Submit the current code.
    ///
    /// Strict policy: the animation and the request run concurrently and
    /// are joined. Allow-list policy: the response comes first and the
    /// animation only runs for a playable (win/lose) answer.
    pub async fn play(&mut self) -> PlayOutcome {
        let allowed = match self.policy.kind() {
            PolicyKind::Strict => self.validate_strict(true),
            PolicyKind::AllowList => self.validate_allow_list(),
        };
        if !allowed {
            debug!(code = %self.code, "play rejected locally");
            return PlayOutcome::Rejected;
        }

        self.begin_play();
        let code = self.code.as_str().to_owned();
        info!(code = %code, policy = %self.policy.kind(), "submitting play");

        let response = match self.policy.kind() {
            PolicyKind::Strict => {
                let ((), response) = tokio::join!(
                    self.reels.spin(&mut self.view, &mut self.rng),
                    self.backend.play(&code),
                );
                response
            }
            PolicyKind::AllowList => {
                let response = self.backend.play(&code).await;
                if matches!(&response, Ok(r) if matches!(r.status, PlayStatus::Win | PlayStatus::Lose))
                {
                    self.reels.spin(&mut self.view, &mut self.rng).await;
                }
                response
            }
        };

        match response {
            Ok(response) => {
                self.finish(&response);
                PlayOutcome::Answered(response)
            }
            Err(e) => {
                warn!(error = %e, transient = e.is_transient(), "play request failed");
                self.view.set_reels(NEUTRAL_REELS);
                self.view
                    .set_result(messages::NETWORK_TITLE, messages::NETWORK_DETAIL);
                self.refresh_submit();
                PlayOutcome::NetworkError(e)
            }
        }
    }

    /// A press of the submit button. Ignored while the button is disabled
    /// or hidden.
    pub async fn press_submit(&mut self) -> Option<PlayOutcome> {
        if self.screen != Screen::Input || !self.submit_enabled {
            return None;
        }
        Some(self.play().await)
    }

    fn begin_play(&mut self) {
        self.set_submit_enabled(false);
        self.view.set_result(messages::DRAWING, "");
        self.coupon = None;
        self.coupon_action_visible = false;
        self.view.set_coupon_action_visible(false);
        self.switch_screen(Screen::Result);
    }

    fn finish(&mut self, response: &PlayResponse) {
        info!(status = %response.status, "play finished");
        match response.status {
            PlayStatus::Win => {
                self.view.set_reels(WINNING_REELS);
                self.view.set_result(
                    messages::WIN_TITLE,
                    response.message().unwrap_or(messages::WIN_DETAIL),
                );
                self.coupon = response.coupon_token.clone().map(|token| Coupon {
                    token,
                    expires_at: response.expires_at.clone(),
                });
                self.coupon_action_visible = true;
                self.view.set_coupon_action_visible(true);
            }
            PlayStatus::Lose => {
                let digits = losing_digits(&mut self.rng);
                self.view.set_reels(digits);
                self.view.set_result(
                    messages::LOSE_TITLE,
                    response.message().unwrap_or(messages::LOSE_DETAIL),
                );
            }
            PlayStatus::Invalid | PlayStatus::Other => {
                self.view.set_reels(NEUTRAL_REELS);
                self.view.set_result(
                    messages::INVALID_TITLE,
                    response.message().unwrap_or(messages::INVALID_DETAIL),
                );
                self.refresh_submit();
            }
        }
    }

    // ── Result / coupon actions ──────────────────────────────────────

    /// The "show coupon" action. Returns `false` unless the last play was a win.
    pub fn show_coupon(&mut self) -> Result<bool, CoreError> {
        if !self.coupon_action_visible {
            return Ok(false);
        }
        let display = match &self.coupon {
            Some(coupon) => coupon.render(&self.encoder)?,
            None => CouponDisplay::default(),
        };
        self.view.show_coupon(&display);
        self.switch_screen(Screen::Coupon);
        Ok(true)
    }

    /// "Try again" on the result screen.
    pub fn retry(&mut self) {
        self.clear_code();
        self.switch_screen(Screen::Input);
    }

    /// "Back" on the coupon screen.
    pub fn back_home(&mut self) {
        self.clear_code();
        self.switch_screen(Screen::Input);
    }
}
