//! The three slot reels.

use ratatui::text::{Line, Span};

use lidlot_core::REEL_COUNT;

use crate::theme;

/// `┃ 7 ┃ 7 ┃ 7 ┃`
pub fn reels_line(digits: [u8; REEL_COUNT], spinning: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(REEL_COUNT * 2 + 1);
    spans.push(Span::styled("┃", theme::border_default()));
    for digit in digits {
        spans.push(Span::styled(format!(" {digit} "), theme::reel(spinning)));
        spans.push(Span::styled("┃", theme::border_default()));
    }
    Line::from(spans)
}
