//! Redeem screen: staff enter a coupon token and submit it.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_input::{Input, InputRequest};

use lidlot_core::{RedeemCommand, Tone};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct RedeemScreen {
    input: Input,
    result: Option<(String, Tone)>,
}

impl RedeemScreen {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            result: None,
        }
    }

    fn request(key: KeyEvent) -> Option<InputRequest> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => Some(InputRequest::DeleteLine),
            KeyCode::Char(c) if !ctrl => Some(InputRequest::InsertChar(c)),
            KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
            KeyCode::Delete => Some(InputRequest::DeleteNextChar),
            KeyCode::Left => Some(InputRequest::GoToPrevChar),
            KeyCode::Right => Some(InputRequest::GoToNextChar),
            KeyCode::Home => Some(InputRequest::GoToStart),
            KeyCode::End => Some(InputRequest::GoToEnd),
            _ => None,
        }
    }
}

impl Default for RedeemScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RedeemScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Enter {
            return Ok(Some(Action::Redeem(RedeemCommand::Redeem(
                self.input.value().to_owned(),
            ))));
        }
        if let Some(request) = Self::request(key) {
            self.input.handle(request);
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::RedeemResult { message, tone } = action {
            self.result = Some((message.clone(), *tone));
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Redeem ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled("  Token", Style::default().fg(theme::NEON_CYAN))),
            layout[1],
        );

        let field = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let field_inner = field.inner(layout[2]);
        frame.render_widget(field, layout[2]);

        let width = usize::from(field_inner.width.max(1)) - 1;
        let scroll = self.input.visual_scroll(width);
        frame.render_widget(
            Paragraph::new(Span::styled(
                self.input.value(),
                Style::default().fg(theme::NEON_CYAN),
            ))
            .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX))),
            field_inner,
        );
        let cursor = self.input.visual_cursor().saturating_sub(scroll);
        frame.set_cursor_position((
            field_inner.x + u16::try_from(cursor).unwrap_or(0),
            field_inner.y,
        ));

        if let Some((message, tone)) = &self.result {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    message.as_str(),
                    theme::redeem_result(*tone == Tone::Success),
                ))
                .alignment(Alignment::Center),
                layout[4],
            );
        }
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn hints(&self) -> &'static str {
        "Enter redeem  Ctrl+U clear  Tab switch  Ctrl+C quit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidlot_core::messages;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut RedeemScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key_event(key(KeyCode::Char(c))).expect("key");
        }
    }

    #[test]
    fn enter_submits_raw_value() {
        let mut screen = RedeemScreen::new();
        type_text(&mut screen, " ABC123 ");

        let action = screen.handle_key_event(key(KeyCode::Enter)).expect("key");
        assert_eq!(
            action,
            Some(Action::Redeem(RedeemCommand::Redeem(" ABC123 ".into())))
        );
    }

    #[test]
    fn editing_keys_change_the_value() {
        let mut screen = RedeemScreen::new();
        type_text(&mut screen, "ABCD");
        screen.handle_key_event(key(KeyCode::Backspace)).expect("key");
        assert_eq!(screen.input.value(), "ABC");

        screen
            .handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL))
            .expect("key");
        assert_eq!(screen.input.value(), "");
    }

    #[test]
    fn keeps_last_result() {
        let mut screen = RedeemScreen::new();
        screen
            .update(&Action::RedeemResult {
                message: messages::REDEEM_OK.into(),
                tone: Tone::Success,
            })
            .expect("update");

        assert_eq!(
            screen.result,
            Some((messages::REDEEM_OK.to_owned(), Tone::Success))
        );
    }
}
