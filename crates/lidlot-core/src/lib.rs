//! Controller layer between `lidlot-api` and UI front ends (CLI / TUI).
//!
//! - **[`EntryController`]**: the three-screen entry flow: code entry on a
//!   numeric keypad, the play request joined with the slot-reel animation,
//!   and the coupon screen with its QR code.
//!
//! - **[`RedemptionController`]**: the single-screen coupon redemption form.
//!
//! - **Views** ([`EntryView`], [`RedeemView`], [`ReelDisplay`]): injected
//!   rendering seams. Controllers never know what draws them.
//!
//! - **[`LotteryBackend`]**: the two server endpoints, implemented by
//!   [`lidlot_api::LotteryClient`] and by in-memory fakes in tests.
//!
//! - **Sessions** ([`EntryCommand`], [`RedeemCommand`]): typed commands
//!   processed in order by a controller running in its own task.

pub mod backend;
pub mod code;
pub mod coupon;
pub mod entry;
pub mod error;
pub mod messages;
pub mod redeem;
pub mod reels;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::LotteryBackend;
pub use code::{CODE_LEN, CodePolicy, DEFAULT_VALID_CODE, EntryCode, PolicyKind};
pub use coupon::{
    Coupon, CouponDisplay, QrEncoder, SvgQrEncoder, UnicodeQrEncoder, format_expiry,
};
pub use entry::{
    EntryConfig, EntryController, EntryView, Key, KeypadKey, PlayOutcome, Screen,
};
pub use error::CoreError;
pub use redeem::{RedeemOutcome, RedeemView, RedemptionController, Tone};
pub use reels::{NEUTRAL_REELS, REEL_COUNT, ReelDisplay, SlotReels, SpinTiming, WINNING_REELS};
pub use session::{EntryCommand, RedeemCommand};

// Wire types consumers need alongside the controllers.
pub use lidlot_api::{
    Error as ApiError, HealthResponse, LotteryClient, PlayResponse, PlayStatus, RedeemResponse,
    RedeemStatus, TlsMode, TransportConfig,
};
