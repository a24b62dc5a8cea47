// ── Core error types ──
//
// Errors surfaced by the controllers and their collaborators. Transport
// failures travel inside the play/redeem outcomes; business rejections are
// never errors (they are rendered as messages).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation ───────────────────────────────────────────────────
    #[error("invalid lid code '{code}': expected exactly 4 digits")]
    InvalidCode { code: String },

    // ── Presentation ─────────────────────────────────────────────────
    #[error("QR encoding failed: {message}")]
    QrEncoding { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("invalid {field}: {reason}")]
    Config { field: String, reason: String },
}

impl From<qrcode::types::QrError> for CoreError {
    fn from(err: qrcode::types::QrError) -> Self {
        Self::QrEncoding {
            message: err.to_string(),
        }
    }
}
