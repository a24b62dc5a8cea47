//! Tab identifiers.

use std::fmt;

/// Identifies each TUI tab, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Lottery, // 1
    Redeem, // 2
}

impl ScreenId {
    /// All tabs in tab-bar order.
    pub const ALL: [ScreenId; 2] = [Self::Lottery, Self::Redeem];

    /// Numeric key for this tab.
    pub fn number(self) -> u8 {
        match self {
            Self::Lottery => 1,
            Self::Redeem => 2,
        }
    }

    /// Tab from a numeric key. Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Lottery),
            2 => Some(Self::Redeem),
            _ => None,
        }
    }

    /// Next tab in order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tab in order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Lottery => "Lottery",
            Self::Redeem => "Redeem",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(3), None);
    }

    #[test]
    fn cycling_wraps() {
        assert_eq!(ScreenId::Lottery.next(), ScreenId::Redeem);
        assert_eq!(ScreenId::Redeem.next(), ScreenId::Lottery);
        assert_eq!(ScreenId::Lottery.prev(), ScreenId::Redeem);
    }
}
