//! Lottery screen: code entry, slot reels, coupon.
//!
//! Holds a mirror of what the entry controller last told its view. Keys
//! become [`EntryCommand`]s; the controller answers with
//! [`EntryUpdate`]s that land here through `update`.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use lidlot_core::{
    CODE_LEN, CouponDisplay, EntryCommand, Key, KeypadKey, NEUTRAL_REELS, REEL_COUNT, Screen,
    messages,
};

use crate::action::{Action, EntryUpdate};
use crate::component::Component;
use crate::theme;
use crate::widgets::code_boxes::code_boxes_line;
use crate::widgets::key_hints::key_hints_line;
use crate::widgets::reels::reels_line;

pub struct LotteryScreen {
    screen: Screen,
    code: [Option<char>; CODE_LEN],
    input_error: Option<String>,
    submit_enabled: bool,
    message: String,
    detail: String,
    coupon_action: bool,
    coupon: Option<CouponDisplay>,
    reels: [u8; REEL_COUNT],
    spinning: bool,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl LotteryScreen {
    pub fn new() -> Self {
        Self {
            screen: Screen::Input,
            code: [None; CODE_LEN],
            input_error: None,
            submit_enabled: false,
            message: String::new(),
            detail: String::new(),
            coupon_action: false,
            coupon: None,
            reels: NEUTRAL_REELS,
            spinning: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn apply(&mut self, update: &EntryUpdate) {
        match update {
            EntryUpdate::Screen(screen) => self.screen = *screen,
            EntryUpdate::Code(code) => self.code = *code,
            EntryUpdate::InputError(err) => self.input_error.clone_from(err),
            EntryUpdate::SubmitEnabled(enabled) => self.submit_enabled = *enabled,
            EntryUpdate::Result { message, detail } => {
                self.message.clone_from(message);
                self.detail.clone_from(detail);
            }
            EntryUpdate::CouponAction(visible) => self.coupon_action = *visible,
            EntryUpdate::Coupon(coupon) => self.coupon = Some(coupon.clone()),
            EntryUpdate::Reels(digits) => self.reels = *digits,
            EntryUpdate::Spinning(spinning) => self.spinning = *spinning,
        }
    }

    fn key_command(&self, key: KeyEvent) -> Option<EntryCommand> {
        match self.screen {
            Screen::Input => match key.code {
                KeyCode::Char(c) => Some(EntryCommand::Key(Key::Char(c))),
                KeyCode::Backspace => Some(EntryCommand::Key(Key::Backspace)),
                KeyCode::Enter => Some(EntryCommand::Key(Key::Enter)),
                KeyCode::Delete => Some(EntryCommand::Keypad(KeypadKey::Clear)),
                _ => None,
            },
            Screen::Result => match key.code {
                KeyCode::Char('c') if self.coupon_action => Some(EntryCommand::ShowCoupon),
                KeyCode::Char('r') if !self.spinning => Some(EntryCommand::Retry),
                _ => None,
            },
            Screen::Coupon => match key.code {
                KeyCode::Char('h') | KeyCode::Esc => Some(EntryCommand::BackHome),
                _ => None,
            },
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled("4桁の番号を入力してください", theme::detail()))
                .alignment(Alignment::Center),
            layout[1],
        );
        frame.render_widget(
            Paragraph::new(code_boxes_line(self.code)).alignment(Alignment::Center),
            layout[2],
        );
        if let Some(err) = &self.input_error {
            frame.render_widget(
                Paragraph::new(Span::styled(err.as_str(), theme::error_text()))
                    .alignment(Alignment::Center),
                layout[3],
            );
        }
        frame.render_widget(
            Paragraph::new(Span::styled("[ Enter 抽選 ]", theme::submit(self.submit_enabled)))
                .alignment(Alignment::Center),
            layout[4],
        );
        frame.render_widget(
            Paragraph::new(key_hints_line(&[
                ("0-9", "入力"),
                ("Bksp", "1文字削除"),
                ("Del", "クリア"),
            ]))
            .alignment(Alignment::Center),
            layout[6],
        );
    }

    fn render_result(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(reels_line(self.reels, self.spinning)).alignment(Alignment::Center),
            layout[1],
        );

        if self.spinning {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(messages::DRAWING)
                .style(Style::default().fg(theme::NEON_CYAN))
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            let [centered] = Layout::horizontal([Constraint::Length(16)])
                .flex(Flex::Center)
                .areas(layout[2]);
            frame.render_stateful_widget(throbber, centered, &mut self.throbber_state.clone());
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled(self.message.as_str(), theme::headline()))
                    .alignment(Alignment::Center),
                layout[2],
            );
        }

        frame.render_widget(
            Paragraph::new(Span::styled(self.detail.as_str(), theme::detail()))
                .alignment(Alignment::Center),
            layout[3],
        );

        let hints: &[(&str, &str)] = if self.spinning {
            &[]
        } else if self.coupon_action {
            &[("c", "クーポン"), ("r", "もう一度")]
        } else {
            &[("r", "もう一度")]
        };
        frame.render_widget(
            Paragraph::new(key_hints_line(hints)).alignment(Alignment::Center),
            layout[4],
        );
    }

    fn render_coupon(&self, frame: &mut Frame, area: Rect) {
        let Some(coupon) = &self.coupon else {
            return;
        };

        let mut text = Text::from(coupon.qr.as_str());
        text.push_line(Line::default());
        text.push_line(Line::styled(coupon.token.clone(), theme::title_style()));
        if !coupon.expiry.is_empty() {
            text.push_line(Line::styled(coupon.expiry.clone(), theme::detail()));
        }
        text.push_line(Line::default());
        text.push_line(key_hints_line(&[("h", "ホームへ")]));

        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
    }
}

impl Default for LotteryScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for LotteryScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(self.key_command(key).map(Action::Entry))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::EntryUpdated(update) => self.apply(update),
            Action::Tick if self.spinning => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Lottery ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.screen {
            Screen::Input => self.render_input(frame, inner),
            Screen::Result => self.render_result(frame, inner),
            Screen::Coupon => self.render_coupon(frame, inner),
        }
    }

    fn captures_input(&self) -> bool {
        self.screen == Screen::Input
    }

    fn hints(&self) -> &'static str {
        match self.screen {
            Screen::Input => "0-9 enter  Bksp delete  Del clear  Enter draw  Tab switch  Ctrl+C quit",
            Screen::Result if self.spinning => "Tab switch  q quit",
            Screen::Result => "c coupon  r retry  Tab switch  q quit",
            Screen::Coupon => "h home  Tab switch  q quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn on(screen: &mut LotteryScreen, update: EntryUpdate) {
        screen
            .update(&Action::EntryUpdated(update))
            .expect("update");
    }

    fn press(screen: &mut LotteryScreen, code: KeyCode) -> Option<Action> {
        screen.handle_key_event(key(code)).expect("key")
    }

    fn rendered(screen: &LotteryScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).expect("terminal");
        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn input_keys_become_entry_commands() {
        let mut screen = LotteryScreen::new();

        assert_eq!(
            press(&mut screen, KeyCode::Char('7')),
            Some(Action::Entry(EntryCommand::Key(Key::Char('7'))))
        );
        assert_eq!(
            press(&mut screen, KeyCode::Backspace),
            Some(Action::Entry(EntryCommand::Key(Key::Backspace)))
        );
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::Entry(EntryCommand::Key(Key::Enter)))
        );
        assert_eq!(
            press(&mut screen, KeyCode::Delete),
            Some(Action::Entry(EntryCommand::Keypad(KeypadKey::Clear)))
        );
        assert!(screen.captures_input());
    }

    #[test]
    fn coupon_key_needs_visible_action() {
        let mut screen = LotteryScreen::new();
        on(&mut screen, EntryUpdate::Screen(Screen::Result));

        assert_eq!(press(&mut screen, KeyCode::Char('c')), None);
        assert_eq!(
            press(&mut screen, KeyCode::Char('r')),
            Some(Action::Entry(EntryCommand::Retry))
        );
        assert!(!screen.captures_input());

        on(&mut screen, EntryUpdate::CouponAction(true));
        assert_eq!(
            press(&mut screen, KeyCode::Char('c')),
            Some(Action::Entry(EntryCommand::ShowCoupon))
        );
    }

    #[test]
    fn retry_waits_for_the_reels_to_stop() {
        let mut screen = LotteryScreen::new();
        on(&mut screen, EntryUpdate::Screen(Screen::Result));
        on(&mut screen, EntryUpdate::Spinning(true));

        assert_eq!(press(&mut screen, KeyCode::Char('r')), None);
        assert!(!screen.hints().contains("retry"));
        // Wide glyphs leave a blank cell behind them.
        assert!(!rendered(&screen).replace(' ', "").contains("もう一度"));

        on(&mut screen, EntryUpdate::Spinning(false));
        assert_eq!(
            press(&mut screen, KeyCode::Char('r')),
            Some(Action::Entry(EntryCommand::Retry))
        );
        assert!(screen.hints().contains("r retry"));
        assert!(rendered(&screen).replace(' ', "").contains("もう一度"));
    }

    #[test]
    fn coupon_screen_goes_home() {
        let mut screen = LotteryScreen::new();
        on(&mut screen, EntryUpdate::Screen(Screen::Coupon));

        assert_eq!(
            press(&mut screen, KeyCode::Esc),
            Some(Action::Entry(EntryCommand::BackHome))
        );
        assert_eq!(press(&mut screen, KeyCode::Char('7')), None);
    }

    #[test]
    fn mirrors_controller_updates() {
        let mut screen = LotteryScreen::new();
        on(&mut screen, EntryUpdate::Code([Some('2'), Some('0'), None, None]));
        on(
            &mut screen,
            EntryUpdate::InputError(Some(messages::INVALID_CODE.into())),
        );
        on(&mut screen, EntryUpdate::Reels([7, 7, 7]));

        assert_eq!(screen.code, [Some('2'), Some('0'), None, None]);
        assert_eq!(screen.input_error.as_deref(), Some(messages::INVALID_CODE));
        assert_eq!(screen.reels, [7, 7, 7]);

        on(&mut screen, EntryUpdate::InputError(None));
        assert_eq!(screen.input_error, None);
    }

    #[test]
    fn renders_entered_digits() {
        let mut screen = LotteryScreen::new();
        on(&mut screen, EntryUpdate::Code([Some('2'), Some('0'), Some('2'), None]));

        let out = rendered(&screen);
        assert!(out.contains(" 2   0   2   _ "), "{out}");
        assert!(out.contains("Lottery"));
    }

    #[test]
    fn renders_result_reels_and_message() {
        let mut screen = LotteryScreen::new();
        on(&mut screen, EntryUpdate::Screen(Screen::Result));
        on(&mut screen, EntryUpdate::Reels([7, 7, 7]));
        on(
            &mut screen,
            EntryUpdate::Result {
                message: "WIN".into(),
                detail: "congrats".into(),
            },
        );

        let out = rendered(&screen);
        assert!(out.contains("┃ 7 ┃ 7 ┃ 7 ┃"), "{out}");
        assert!(out.contains("WIN"));
        assert!(out.contains("congrats"));
    }

    #[test]
    fn renders_coupon_token() {
        let mut screen = LotteryScreen::new();
        on(&mut screen, EntryUpdate::Screen(Screen::Coupon));
        on(
            &mut screen,
            EntryUpdate::Coupon(CouponDisplay {
                qr: "##".into(),
                token: "TOKEN-1".into(),
                expiry: String::new(),
            }),
        );

        let out = rendered(&screen);
        assert!(out.contains("TOKEN-1"), "{out}");
    }
}
