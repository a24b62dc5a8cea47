// ── Backend seam ──
//
// The controllers talk to the server through this trait so they can be
// driven by the real HTTP client or by an in-memory fake.

use std::future::Future;
use std::sync::Arc;

use lidlot_api::{Error, LotteryClient, PlayResponse, RedeemResponse};

/// The two lottery endpoints.
pub trait LotteryBackend: Send + Sync {
    /// Submit a lid code.
    fn play(&self, lid_code: &str) -> impl Future<Output = Result<PlayResponse, Error>> + Send;

    /// Redeem a coupon token.
    fn redeem(
        &self,
        coupon_token: &str,
    ) -> impl Future<Output = Result<RedeemResponse, Error>> + Send;
}

impl LotteryBackend for LotteryClient {
    async fn play(&self, lid_code: &str) -> Result<PlayResponse, Error> {
        LotteryClient::play(self, lid_code).await
    }

    async fn redeem(&self, coupon_token: &str) -> Result<RedeemResponse, Error> {
        LotteryClient::redeem(self, coupon_token).await
    }
}

impl<B: LotteryBackend> LotteryBackend for Arc<B> {
    fn play(&self, lid_code: &str) -> impl Future<Output = Result<PlayResponse, Error>> + Send {
        (**self).play(lid_code)
    }

    fn redeem(
        &self,
        coupon_token: &str,
    ) -> impl Future<Output = Result<RedeemResponse, Error>> + Send {
        (**self).redeem(coupon_token)
    }
}
