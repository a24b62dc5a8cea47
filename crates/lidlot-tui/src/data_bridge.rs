//! Data bridge: runs the core controllers behind the TUI action loop.
//!
//! Each controller lives in its own background task, fed commands over an
//! `mpsc` channel. Its view is a channel too: every view call becomes an
//! [`Action`] that the app loop hands to the matching screen. Both tasks
//! stop on cancellation or when the command sender is dropped.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use lidlot_core::{
    CODE_LEN, CouponDisplay, EntryCommand, EntryConfig, EntryController, EntryView,
    LotteryClient, REEL_COUNT, RedeemCommand, RedeemView, RedemptionController, ReelDisplay,
    Screen, Tone, UnicodeQrEncoder,
};

use crate::action::{Action, EntryUpdate};

/// Everything needed to start the controllers.
pub struct BridgeConfig {
    pub client: LotteryClient,
    pub entry: EntryConfig,
    /// Link whose `code` parameter pre-fills the entry screen.
    pub link: Option<Url>,
}

/// Command senders for the running controller tasks.
pub struct ControllerHandles {
    pub entry: mpsc::UnboundedSender<EntryCommand>,
    pub redeem: mpsc::UnboundedSender<RedeemCommand>,
}

// ── Views ────────────────────────────────────────────────────────────

/// Entry view that forwards every call to the app loop.
pub struct ChannelEntryView {
    tx: mpsc::UnboundedSender<Action>,
}

impl ChannelEntryView {
    pub fn new(tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { tx }
    }

    fn send(&self, update: EntryUpdate) {
        // The app loop is gone only while shutting down.
        let _ = self.tx.send(Action::EntryUpdated(update));
    }
}

impl ReelDisplay for ChannelEntryView {
    fn set_reels(&mut self, digits: [u8; REEL_COUNT]) {
        self.send(EntryUpdate::Reels(digits));
    }

    fn set_spinning(&mut self, spinning: bool) {
        self.send(EntryUpdate::Spinning(spinning));
    }
}

impl EntryView for ChannelEntryView {
    fn show_screen(&mut self, screen: Screen) {
        self.send(EntryUpdate::Screen(screen));
    }

    fn render_code(&mut self, boxes: [Option<char>; CODE_LEN]) {
        self.send(EntryUpdate::Code(boxes));
    }

    fn set_input_error(&mut self, message: Option<&str>) {
        self.send(EntryUpdate::InputError(message.map(str::to_owned)));
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.send(EntryUpdate::SubmitEnabled(enabled));
    }

    fn set_result(&mut self, message: &str, detail: &str) {
        self.send(EntryUpdate::Result {
            message: message.to_owned(),
            detail: detail.to_owned(),
        });
    }

    fn set_coupon_action_visible(&mut self, visible: bool) {
        self.send(EntryUpdate::CouponAction(visible));
    }

    fn show_coupon(&mut self, coupon: &CouponDisplay) {
        self.send(EntryUpdate::Coupon(coupon.clone()));
    }
}

/// Redeem view that forwards results to the app loop.
pub struct ChannelRedeemView {
    tx: mpsc::UnboundedSender<Action>,
}

impl ChannelRedeemView {
    pub fn new(tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { tx }
    }
}

impl RedeemView for ChannelRedeemView {
    fn set_result(&mut self, message: &str, tone: Tone) {
        let _ = self.tx.send(Action::RedeemResult {
            message: message.to_owned(),
            tone,
        });
    }
}

// ── Tasks ────────────────────────────────────────────────────────────

/// Start both controller tasks and return their command senders.
pub fn spawn_controllers(
    config: BridgeConfig,
    action_tx: &mpsc::UnboundedSender<Action>,
    cancel: &CancellationToken,
) -> ControllerHandles {
    let BridgeConfig {
        client,
        entry,
        link,
    } = config;

    let (entry_tx, entry_rx) = mpsc::unbounded_channel();
    let mut controller = EntryController::new(
        ChannelEntryView::new(action_tx.clone()),
        client.clone(),
        UnicodeQrEncoder,
        entry,
    );
    if let Some(link) = link {
        let applied = controller.prefill_from_url(&link);
        info!(%link, applied, "pre-fill from link");
    }
    let entry_cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            () = entry_cancel.cancelled() => debug!("entry controller cancelled"),
            _ = controller.run(entry_rx) => {}
        }
    });

    let (redeem_tx, redeem_rx) = mpsc::unbounded_channel();
    let controller = RedemptionController::new(ChannelRedeemView::new(action_tx.clone()), client);
    let redeem_cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            () = redeem_cancel.cancelled() => debug!("redeem controller cancelled"),
            _ = controller.run(redeem_rx) => {}
        }
    });

    ControllerHandles {
        entry: entry_tx,
        redeem: redeem_tx,
    }
}
