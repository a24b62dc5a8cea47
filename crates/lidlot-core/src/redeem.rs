// ── Redemption controller ──
//
// Single-screen form: trim the token, post it, show one of the fixed
// outcome messages.

use serde::Serialize;
use tracing::{info, warn};

use lidlot_api::{RedeemResponse, RedeemStatus};

use crate::backend::LotteryBackend;
use crate::messages;

/// Styling of the result line. Only a successful redemption is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Tone {
    #[default]
    Neutral,
    Success,
}

pub trait RedeemView {
    fn set_result(&mut self, message: &str, tone: Tone);
}

/// What a call to [`RedemptionController::redeem`] ended with.
#[derive(Debug)]
pub enum RedeemOutcome {
    /// Empty token; no request was sent.
    Empty,
    NetworkError(lidlot_api::Error),
    Answered(RedeemResponse),
}

/// Message and tone for a server answer.
pub fn outcome_message(status: RedeemStatus) -> (&'static str, Tone) {
    match status {
        RedeemStatus::Ok => (messages::REDEEM_OK, Tone::Success),
        RedeemStatus::AlreadyRedeemed => (messages::REDEEM_ALREADY, Tone::Neutral),
        RedeemStatus::Expired => (messages::REDEEM_EXPIRED, Tone::Neutral),
        RedeemStatus::Other => (messages::REDEEM_INVALID, Tone::Neutral),
    }
}

pub struct RedemptionController<V, B> {
    view: V,
    backend: B,
}

impl<V, B> RedemptionController<V, B>
where
    V: RedeemView,
    B: LotteryBackend,
{
    pub fn new(view: V, backend: B) -> Self {
        Self { view, backend }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Redeem `token` after trimming surrounding whitespace.
    pub async fn redeem(&mut self, token: &str) -> RedeemOutcome {
        let token = token.trim();
        if token.is_empty() {
            self.view.set_result(messages::REDEEM_EMPTY, Tone::Neutral);
            return RedeemOutcome::Empty;
        }

        self.view.set_result(messages::REDEEM_CHECKING, Tone::Neutral);
        match self.backend.redeem(token).await {
            Ok(response) => {
                info!(status = %response.status, "redeem finished");
                let (message, tone) = outcome_message(response.status);
                self.view.set_result(message, tone);
                RedeemOutcome::Answered(response)
            }
            Err(e) => {
                warn!(error = %e, transient = e.is_transient(), "redeem request failed");
                self.view.set_result(messages::REDEEM_NETWORK, Tone::Neutral);
                RedeemOutcome::NetworkError(e)
            }
        }
    }
}
