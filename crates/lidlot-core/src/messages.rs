//! User-facing strings.

// ── Entry ────────────────────────────────────────────────────────────

pub const INVALID_CODE: &str = "番号が無効です";
pub const DRAWING: &str = "抽選中...";

pub const WIN_TITLE: &str = "当たり！";
pub const WIN_DETAIL: &str = "おめでとうございます！";

pub const LOSE_TITLE: &str = "残念...";
pub const LOSE_DETAIL: &str = "また挑戦してください。";

pub const INVALID_TITLE: &str = "無効";
pub const INVALID_DETAIL: &str = "識別番号を確認してください。";

pub const NETWORK_TITLE: &str = "通信エラー";
pub const NETWORK_DETAIL: &str = "時間をおいて再試行してください。";

// ── Redemption ───────────────────────────────────────────────────────

pub const REDEEM_EMPTY: &str = "トークンを入力してください。";
pub const REDEEM_CHECKING: &str = "確認中...";
pub const REDEEM_OK: &str = "引換完了しました。";
pub const REDEEM_ALREADY: &str = "既に引換済みです。";
pub const REDEEM_EXPIRED: &str = "有効期限切れです。";
pub const REDEEM_INVALID: &str = "無効なクーポンです。";
pub const REDEEM_NETWORK: &str = "通信エラー。再試行してください。";
