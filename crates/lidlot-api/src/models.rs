// Wire types for the lottery backend.
//
// Status fields are closed enums with a catch-all variant so that unknown
// or missing statuses deserialize instead of failing.

use serde::{Deserialize, Serialize};

// ── Play ─────────────────────────────────────────────────────────────

/// Body of `POST /api/play`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    pub lid_code: String,
}

/// Outcome reported by `POST /api/play`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayStatus {
    Win,
    Lose,
    Invalid,
    /// Anything the client does not recognise, including a missing field.
    #[default]
    #[serde(other)]
    Other,
}

/// Response of `POST /api/play`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayResponse {
    #[serde(default)]
    pub status: PlayStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_token: Option<String>,
    /// ISO-8601 timestamp, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl PlayResponse {
    /// Server message, ignoring empty strings.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

// ── Redeem ───────────────────────────────────────────────────────────

/// Body of `POST /api/redeem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemRequest {
    pub coupon_token: String,
}

/// Outcome reported by `POST /api/redeem`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RedeemStatus {
    Ok,
    AlreadyRedeemed,
    Expired,
    #[default]
    #[serde(other)]
    Other,
}

/// Response of `POST /api/redeem`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RedeemResponse {
    #[serde(default)]
    pub status: RedeemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ── Health ───────────────────────────────────────────────────────────

/// Response of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_request_uses_lid_code_field() {
        let body = serde_json::to_value(PlayRequest {
            lid_code: "2026".into(),
        })
        .expect("serializes");
        assert_eq!(body, serde_json::json!({ "lid_code": "2026" }));
    }

    #[test]
    fn win_response_keeps_coupon_fields() {
        let resp: PlayResponse = serde_json::from_str(
            r#"{"status":"win","message":"当選しました！","coupon_token":"abc.def","expires_at":"2026-10-26T00:00:00+00:00"}"#,
        )
        .expect("parses");
        assert_eq!(resp.status, PlayStatus::Win);
        assert_eq!(resp.coupon_token.as_deref(), Some("abc.def"));
        assert_eq!(resp.expires_at.as_deref(), Some("2026-10-26T00:00:00+00:00"));
    }

    #[test]
    fn unknown_and_missing_status_map_to_other() {
        let unknown: PlayResponse =
            serde_json::from_str(r#"{"status":"jackpot"}"#).expect("parses");
        assert_eq!(unknown.status, PlayStatus::Other);

        let missing: RedeemResponse = serde_json::from_str("{}").expect("parses");
        assert_eq!(missing.status, RedeemStatus::Other);
    }

    #[test]
    fn redeem_statuses_are_snake_case() {
        let resp: RedeemResponse =
            serde_json::from_str(r#"{"status":"already_redeemed"}"#).expect("parses");
        assert_eq!(resp.status, RedeemStatus::AlreadyRedeemed);
        assert_eq!(resp.status.to_string(), "already_redeemed");
    }

    #[test]
    fn empty_message_is_treated_as_absent() {
        let resp = PlayResponse {
            status: PlayStatus::Lose,
            message: Some(String::new()),
            ..PlayResponse::default()
        };
        assert_eq!(resp.message(), None);
    }
}
