// Lottery API HTTP client
//
// Wraps `reqwest::Client` with URL construction and response decoding for
// the two lottery endpoints plus the health check. Any non-2xx answer is
// surfaced as `Error::Http`; business outcomes come back as response enums.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{
    HealthResponse, PlayRequest, PlayResponse, RedeemRequest, RedeemResponse,
};
use crate::transport::TransportConfig;

/// Maximum number of body bytes echoed back inside error messages.
const BODY_PREVIEW: usize = 200;

/// HTTP client for the lottery backend.
///
/// Cheap to clone: `reqwest::Client` is internally reference counted.
#[derive(Debug, Clone)]
pub struct LotteryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LotteryClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// The `base_url` is the server root (e.g. `https://lottery.example.com`);
    /// endpoint paths are appended to it.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `POST /api/play` with the entered lid code.
    pub async fn play(&self, lid_code: &str) -> Result<PlayResponse, Error> {
        let url = self.endpoint("api/play")?;
        let body = PlayRequest {
            lid_code: lid_code.to_owned(),
        };
        let response: PlayResponse = self.post(url, &body).await?;
        debug!(status = %response.status, "play response");
        Ok(response)
    }

    /// `POST /api/redeem` with a coupon token.
    pub async fn redeem(&self, coupon_token: &str) -> Result<RedeemResponse, Error> {
        let url = self.endpoint("api/redeem")?;
        let body = RedeemRequest {
            coupon_token: coupon_token.to_owned(),
        };
        let response: RedeemResponse = self.post(url, &body).await?;
        debug!(status = %response.status, "redeem response");
        Ok(response)
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse, Error> {
        let url = self.endpoint("health")?;
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::decode(resp).await
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{path}`, tolerating a trailing slash on the base.
    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;
        trace!(%status, body_len = body.len(), "response received");

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: preview(&body).to_owned(),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREVIEW) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = LotteryClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://lottery.example.com/").expect("valid url"),
        );
        let url = client.endpoint("api/play").expect("valid endpoint");
        assert_eq!(url.as_str(), "https://lottery.example.com/api/play");
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let client = LotteryClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://example.com/campaign").expect("valid url"),
        );
        let url = client.endpoint("api/redeem").expect("valid endpoint");
        assert_eq!(url.as_str(), "https://example.com/campaign/api/redeem");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "番".repeat(300);
        assert_eq!(preview(&body).chars().count(), BODY_PREVIEW);
        assert_eq!(preview("short"), "short");
    }
}
