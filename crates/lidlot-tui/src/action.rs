//! All possible UI actions. Actions are the sole mechanism for state mutation.

use lidlot_core::{
    CODE_LEN, CouponDisplay, EntryCommand, REEL_COUNT, RedeemCommand, Screen, Tone,
};

use crate::screen::ScreenId;

/// One view call made by the entry controller, replayed on the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryUpdate {
    Screen(Screen),
    Code([Option<char>; CODE_LEN]),
    InputError(Option<String>),
    SubmitEnabled(bool),
    Result { message: String, detail: String },
    CouponAction(bool),
    Coupon(CouponDisplay),
    Reels([u8; REEL_COUNT]),
    Spinning(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Lifecycle ────────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ───────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Commands to the controller tasks ─────────────────────────────
    Entry(EntryCommand),
    Redeem(RedeemCommand),

    // ── Updates from the controller tasks ────────────────────────────
    EntryUpdated(EntryUpdate),
    RedeemResult { message: String, tone: Tone },
}
