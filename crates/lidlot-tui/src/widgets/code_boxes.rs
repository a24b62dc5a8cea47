//! The four code boxes of the entry screen.

use ratatui::text::{Line, Span};

use lidlot_core::CODE_LEN;

use crate::theme;

/// `[2][0][ ][ ]` with filled boxes highlighted.
pub fn code_boxes_line(boxes: [Option<char>; CODE_LEN]) -> Line<'static> {
    let mut spans = Vec::with_capacity(CODE_LEN * 2);
    for (i, slot) in boxes.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(match slot {
            Some(digit) => Span::styled(format!(" {digit} "), theme::code_filled()),
            None => Span::styled(" _ ", theme::code_empty()),
        });
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_digits_and_placeholders() {
        let line = code_boxes_line([Some('2'), Some('0'), None, None]);
        assert_eq!(line.to_string(), " 2   0   _   _ ");
        assert_eq!(line.spans[0].style, theme::code_filled());
        assert_eq!(line.spans[6].style, theme::code_empty());
    }
}
