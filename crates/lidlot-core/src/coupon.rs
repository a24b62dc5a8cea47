//! Coupon retained after a win and its rendered form.
//!
//! QR drawing is delegated to the `qrcode` crate behind [`QrEncoder`], so
//! front ends pick the markup they can display (SVG for documents, Unicode
//! half blocks for terminals).

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};
use serde::Serialize;

use crate::error::CoreError;

/// Prefix of the human-readable expiry line.
pub const EXPIRY_LABEL: &str = "有効期限";

/// Token and expiry handed out by the server on a win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coupon {
    pub token: String,
    /// ISO-8601 timestamp exactly as the server sent it.
    pub expires_at: Option<String>,
}

/// Everything the coupon screen shows. The default is the blank screen
/// shown for a win that came without a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CouponDisplay {
    /// Encoder-specific QR markup.
    pub qr: String,
    pub token: String,
    /// Empty when the expiry is missing or unparseable.
    pub expiry: String,
}

// ── QR encoding ──────────────────────────────────────────────────────

/// External 2-D barcode collaborator: `encode(text) -> markup`.
pub trait QrEncoder {
    fn encode(&self, text: &str) -> Result<String, CoreError>;
}

fn qr(text: &str) -> Result<QrCode, CoreError> {
    Ok(QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)?)
}

/// Scalable SVG markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgQrEncoder;

impl QrEncoder for SvgQrEncoder {
    fn encode(&self, text: &str) -> Result<String, CoreError> {
        Ok(qr(text)?
            .render::<svg::Color<'_>>()
            .quiet_zone(true)
            .build())
    }
}

/// Unicode half-block rendering for terminals, two modules per character
/// cell vertically.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeQrEncoder;

impl QrEncoder for UnicodeQrEncoder {
    fn encode(&self, text: &str) -> Result<String, CoreError> {
        // Inverted colours read better on dark terminal backgrounds.
        Ok(qr(text)?
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(true)
            .build())
    }
}

// ── Expiry ───────────────────────────────────────────────────────────

/// `有効期限: 2026/10/26 9:00:00` in the local time zone, or an empty
/// string when `iso` is absent or unparseable.
pub fn format_expiry(iso: Option<&str>) -> String {
    format_expiry_in(iso, &Local)
}

/// [`format_expiry`] for an explicit time zone.
pub fn format_expiry_in<Tz>(iso: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(at) = iso.and_then(|s| parse_timestamp(s.trim(), tz)) else {
        return String::new();
    };
    format!("{EXPIRY_LABEL}: {}", at.format("%Y/%-m/%-d %-H:%M:%S"))
}

/// RFC 3339 first, then the shorter ISO 8601 forms: times without seconds
/// and bare dates. A bare date is UTC midnight; a time without an offset is
/// local time.
fn parse_timestamp<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Some(at.with_timezone(tz));
    }
    let zoned = match s.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_owned(),
    };
    if let Ok(at) = DateTime::parse_from_str(&zoned, "%Y-%m-%dT%H:%M%:z") {
        return Some(at.with_timezone(tz));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).with_timezone(tz));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()?;
    tz.from_local_datetime(&naive).earliest()
}

impl Coupon {
    /// Render this coupon for display.
    pub fn render<E: QrEncoder + ?Sized>(&self, encoder: &E) -> Result<CouponDisplay, CoreError> {
        Ok(CouponDisplay {
            qr: encoder.encode(&self.token)?,
            token: self.token.clone(),
            expiry: format_expiry(self.expires_at.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).expect("valid offset")
    }

    #[test]
    fn expiry_is_formatted_in_the_given_zone() {
        let line = format_expiry_in(Some("2026-10-26T00:05:03.123456+00:00"), &jst());
        assert_eq!(line, "有効期限: 2026/10/26 9:05:03");
    }

    #[test]
    fn expiry_without_offset_is_local() {
        let line = format_expiry_in(Some("2026-01-02T13:00:00"), &jst());
        assert_eq!(line, "有効期限: 2026/1/2 13:00:00");
    }

    #[test]
    fn expiry_accepts_short_iso_forms() {
        let at = |s| format_expiry_in(Some(s), &jst());
        assert_eq!(at("2026-10-26T09:00Z"), "有効期限: 2026/10/26 18:00:00");
        assert_eq!(at("2026-10-26T09:00+09:00"), "有効期限: 2026/10/26 9:00:00");
        assert_eq!(at("2026-10-26T09:00"), "有効期限: 2026/10/26 9:00:00");
        assert_eq!(at("2026-10-26"), "有効期限: 2026/10/26 9:00:00");
    }

    #[test]
    fn missing_or_garbage_expiry_is_blank() {
        assert_eq!(format_expiry_in(None, &jst()), "");
        assert_eq!(format_expiry_in(Some(""), &jst()), "");
        assert_eq!(format_expiry_in(Some("next tuesday"), &jst()), "");
    }

    #[test]
    fn svg_encoder_emits_svg_markup() {
        let svg = SvgQrEncoder.encode("token-123").expect("encodes");
        assert!(svg.contains("<svg"), "{svg}");
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn unicode_encoder_emits_block_rows() {
        let text = UnicodeQrEncoder.encode("token-123").expect("encodes");
        assert!(text.lines().count() > 10);
        assert!(text.chars().any(|c| matches!(c, '█' | '▀' | '▄')));
    }

    #[test]
    fn render_uses_token_and_encoder() {
        struct Echo;
        impl QrEncoder for Echo {
            fn encode(&self, text: &str) -> Result<String, CoreError> {
                Ok(format!("QR[{text}]"))
            }
        }

        let coupon = Coupon {
            token: "abc.def".into(),
            expires_at: None,
        };
        let display = coupon.render(&Echo).expect("renders");
        assert_eq!(display.qr, "QR[abc.def]");
        assert_eq!(display.token, "abc.def");
        assert_eq!(display.expiry, "");
    }
}
