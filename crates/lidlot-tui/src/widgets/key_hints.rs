//! Inline key hints (`c coupon  r retry`).

use ratatui::text::{Line, Span};

use crate::theme;

/// Renders `(key, label)` pairs with the key highlighted.
pub fn key_hints_line<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 3);

    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::key_hint()));
        }
        spans.push(Span::styled(*key, theme::key_hint_key()));
        spans.push(Span::styled(format!(" {label}"), theme::key_hint()));
    }

    Line::from(spans)
}
