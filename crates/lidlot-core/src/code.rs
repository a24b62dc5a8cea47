//! Entry code buffer and the policies that decide which codes may be played.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of digits in a lid code.
pub const CODE_LEN: usize = 4;

/// The single code accepted by the strict policy unless configured otherwise.
pub const DEFAULT_VALID_CODE: &str = "2026";

/// `true` if `code` is exactly four ASCII digits.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

// ── EntryCode ────────────────────────────────────────────────────────

/// Digits typed so far. Never longer than [`CODE_LEN`], never holds a
/// non-digit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCode(String);

impl EntryCode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. Returns `false` (and leaves the code untouched) for
    /// non-digits or when the code is already full.
    pub fn push(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() || self.is_complete() {
            return false;
        }
        self.0.push(digit);
        true
    }

    /// Remove the last digit, if any.
    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Replace the whole code. Only well-formed codes are accepted.
    pub fn set(&mut self, code: &str) -> Result<(), CoreError> {
        if !is_well_formed(code) {
            return Err(CoreError::InvalidCode {
                code: code.to_owned(),
            });
        }
        code.clone_into(&mut self.0);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() == CODE_LEN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Contents of the four display boxes, left to right.
    pub fn boxes(&self) -> [Option<char>; CODE_LEN] {
        let mut boxes = [None; CODE_LEN];
        for (slot, c) in boxes.iter_mut().zip(self.0.chars()) {
            *slot = Some(c);
        }
        boxes
    }
}

impl fmt::Display for EntryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── CodePolicy ───────────────────────────────────────────────────────

/// Which validation policy is in force.
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
    strum::EnumString,
    strum::VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PolicyKind {
    /// Submit is enabled only for the one valid code.
    #[default]
    Strict,
    /// Submit is enabled for any complete code; membership is checked on submit.
    AllowList,
}

/// The set of codes the client lets through to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodePolicy {
    Strict { code: String },
    AllowList { codes: BTreeSet<String> },
}

impl Default for CodePolicy {
    fn default() -> Self {
        Self::Strict {
            code: DEFAULT_VALID_CODE.to_owned(),
        }
    }
}

impl CodePolicy {
    /// Strict-equality policy for a single code.
    pub fn strict(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        if !is_well_formed(&code) {
            return Err(CoreError::InvalidCode { code });
        }
        Ok(Self::Strict { code })
    }

    /// Allow-list policy. The list must be non-empty and every entry well formed.
    pub fn allow_list<I, S>(codes: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for code in codes {
            let code = code.into();
            if !is_well_formed(&code) {
                return Err(CoreError::InvalidCode { code });
            }
            set.insert(code);
        }
        if set.is_empty() {
            return Err(CoreError::Config {
                field: "accepted_codes".into(),
                reason: "allow-list policy needs at least one code".into(),
            });
        }
        Ok(Self::AllowList { codes: set })
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Strict { .. } => PolicyKind::Strict,
            Self::AllowList { .. } => PolicyKind::AllowList,
        }
    }

    /// Membership in the accepted set.
    pub fn accepts(&self, code: &str) -> bool {
        if !is_well_formed(code) {
            return false;
        }
        match self {
            Self::Strict { code: valid } => code == valid,
            Self::AllowList { codes } => codes.contains(code),
        }
    }

    /// Whether the submit affordance is enabled for the current code.
    pub fn submit_enabled(&self, code: &EntryCode) -> bool {
        match self {
            Self::Strict { .. } => self.accepts(code.as_str()),
            Self::AllowList { .. } => is_well_formed(code.as_str()),
        }
    }
}
