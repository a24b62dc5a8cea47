// ── Controller sessions ──
//
// Interactive front ends run each controller in its own task and feed it
// typed commands over an `mpsc` channel. Commands are processed strictly in
// order, so anything sent while a play is in flight is handled after it
// finishes and sees the result screen.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::backend::LotteryBackend;
use crate::coupon::QrEncoder;
use crate::entry::{EntryController, EntryView, Key, KeypadKey, PlayOutcome};
use crate::redeem::{RedeemOutcome, RedeemView, RedemptionController};

/// Everything a user can do on the entry flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryCommand {
    Keypad(KeypadKey),
    Key(Key),
    Submit,
    ShowCoupon,
    Retry,
    BackHome,
    /// Pre-fill from a link's `code` query value.
    Prefill(String),
}

/// Everything a user can do on the redemption form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemCommand {
    Redeem(String),
}

impl<V, B, Q> EntryController<V, B, Q>
where
    V: EntryView,
    B: LotteryBackend,
    Q: QrEncoder,
{
    /// Apply one command. Returns the play outcome when the command
    /// submitted the code.
    pub async fn dispatch(&mut self, command: EntryCommand) -> Option<PlayOutcome> {
        debug!(?command, screen = %self.screen(), "entry command");
        match command {
            EntryCommand::Keypad(key) => self.press_keypad(key),
            EntryCommand::Key(key) => return self.handle_key(key).await,
            EntryCommand::Submit => return self.press_submit().await,
            EntryCommand::ShowCoupon => {
                if let Err(e) = self.show_coupon() {
                    warn!(error = %e, "could not render coupon");
                }
            }
            EntryCommand::Retry => self.retry(),
            EntryCommand::BackHome => self.back_home(),
            EntryCommand::Prefill(code) => {
                self.prefill(&code);
            }
        }
        None
    }

    /// Process commands until the sender side is dropped, then hand the
    /// controller back.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<EntryCommand>) -> Self {
        while let Some(command) = commands.recv().await {
            self.dispatch(command).await;
        }
        debug!("entry command channel closed");
        self
    }
}

impl<V, B> RedemptionController<V, B>
where
    V: RedeemView,
    B: LotteryBackend,
{
    pub async fn dispatch(&mut self, command: RedeemCommand) -> RedeemOutcome {
        match command {
            RedeemCommand::Redeem(token) => self.redeem(&token).await,
        }
    }

    /// Process commands until the sender side is dropped.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<RedeemCommand>) -> Self {
        while let Some(command) = commands.recv().await {
            self.dispatch(command).await;
        }
        debug!("redeem command channel closed");
        self
    }
}
