// Shared fakes for the controller tests.
#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Mutex;
use std::time::Duration;

use lidlot_api::{Error, PlayResponse, PlayStatus, RedeemResponse, RedeemStatus};
use lidlot_core::{
    CODE_LEN, CouponDisplay, EntryView, LotteryBackend, REEL_COUNT, RedeemView, ReelDisplay,
    Screen, Tone,
};

// ── View ────────────────────────────────────────────────────────────

/// Keeps the latest value written through every view accessor.
#[derive(Debug, Default, Clone)]
pub struct RecordingView {
    pub screen: Option<Screen>,
    pub screens: Vec<Screen>,
    pub boxes: [Option<char>; CODE_LEN],
    pub input_error: Option<String>,
    pub submit_enabled: bool,
    pub message: String,
    pub detail: String,
    pub coupon_action_visible: bool,
    pub coupon: Option<CouponDisplay>,
    pub reels: [u8; REEL_COUNT],
    pub spinning: bool,
    pub spin_frames: usize,
}

impl ReelDisplay for RecordingView {
    fn set_reels(&mut self, digits: [u8; REEL_COUNT]) {
        if self.spinning {
            self.spin_frames += 1;
        }
        self.reels = digits;
    }

    fn set_spinning(&mut self, spinning: bool) {
        self.spinning = spinning;
    }
}

impl EntryView for RecordingView {
    fn show_screen(&mut self, screen: Screen) {
        self.screen = Some(screen);
        self.screens.push(screen);
    }

    fn render_code(&mut self, boxes: [Option<char>; CODE_LEN]) {
        self.boxes = boxes;
    }

    fn set_input_error(&mut self, message: Option<&str>) {
        self.input_error = message.map(str::to_owned);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_result(&mut self, message: &str, detail: &str) {
        message.clone_into(&mut self.message);
        detail.clone_into(&mut self.detail);
    }

    fn set_coupon_action_visible(&mut self, visible: bool) {
        self.coupon_action_visible = visible;
    }

    fn show_coupon(&mut self, coupon: &CouponDisplay) {
        self.coupon = Some(coupon.clone());
    }
}

#[derive(Debug, Default, Clone)]
pub struct RedeemRecorder {
    pub results: Vec<(String, Tone)>,
}

impl RedeemRecorder {
    pub fn last(&self) -> Option<(&str, Tone)> {
        self.results.last().map(|(m, t)| (m.as_str(), *t))
    }
}

impl RedeemView for RedeemRecorder {
    fn set_result(&mut self, message: &str, tone: Tone) {
        self.results.push((message.to_owned(), tone));
    }
}

// ── Backend ─────────────────────────────────────────────────────────

/// Scripted backend. `Err(status)` replies fail as a non-2xx answer.
pub struct FakeBackend {
    pub play_reply: Mutex<Result<PlayResponse, u16>>,
    pub redeem_reply: Mutex<Result<RedeemResponse, u16>>,
    pub play_calls: Mutex<Vec<String>>,
    pub redeem_calls: Mutex<Vec<String>>,
    pub delay: Duration,
}

impl FakeBackend {
    pub fn replying(status: PlayStatus) -> Self {
        Self::with_play(Ok(PlayResponse {
            status,
            ..PlayResponse::default()
        }))
    }

    pub fn with_play(reply: Result<PlayResponse, u16>) -> Self {
        Self {
            play_reply: Mutex::new(reply),
            redeem_reply: Mutex::new(Ok(RedeemResponse::default())),
            play_calls: Mutex::new(Vec::new()),
            redeem_calls: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    pub fn with_redeem(status: RedeemStatus) -> Self {
        let backend = Self::replying(PlayStatus::Other);
        *backend.redeem_reply.lock().unwrap() = Ok(RedeemResponse {
            status,
            message: None,
        });
        backend
    }

    pub fn failing(status: u16) -> Self {
        let backend = Self::with_play(Err(status));
        *backend.redeem_reply.lock().unwrap() = Err(status);
        backend
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn play_calls(&self) -> Vec<String> {
        self.play_calls.lock().unwrap().clone()
    }

    pub fn redeem_calls(&self) -> Vec<String> {
        self.redeem_calls.lock().unwrap().clone()
    }
}

fn http_error(status: u16) -> Error {
    Error::Http {
        status,
        body: String::new(),
    }
}

impl LotteryBackend for FakeBackend {
    async fn play(&self, lid_code: &str) -> Result<PlayResponse, Error> {
        self.play_calls.lock().unwrap().push(lid_code.to_owned());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let reply = self.play_reply.lock().unwrap().clone();
        reply.map_err(http_error)
    }

    async fn redeem(&self, coupon_token: &str) -> Result<RedeemResponse, Error> {
        self.redeem_calls.lock().unwrap().push(coupon_token.to_owned());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let reply = self.redeem_reply.lock().unwrap().clone();
        reply.map_err(http_error)
    }
}
