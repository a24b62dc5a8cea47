//! Application core: the event loop and action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge::{BridgeConfig, ControllerHandles, spawn_controllers};
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// Current active tab.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Server base URL shown in the status bar.
    server: String,
    /// Consumed when the controllers start.
    bridge: Option<BridgeConfig>,
    /// Command senders of the running controllers.
    handles: Option<ControllerHandles>,
    /// Action sender shared with views and screens.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Drained by the main loop.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancels the controller tasks on exit.
    cancel: CancellationToken,
}

impl App {
    pub fn new(bridge: BridgeConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            active_screen: ScreenId::default(),
            screens: create_screens().into_iter().collect(),
            running: true,
            help_visible: false,
            server: bridge.client.base_url().to_string(),
            bridge: Some(bridge),
            handles: None,
            action_tx,
            action_rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        if let Some(bridge) = self.bridge.take() {
            self.handles = Some(spawn_controllers(bridge, &self.action_tx, &self.cancel));
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// everything else goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        match key.code {
            KeyCode::Tab => return Ok(Some(Action::SwitchScreen(self.active_screen.next()))),
            KeyCode::BackTab => return Ok(Some(Action::SwitchScreen(self.active_screen.prev()))),
            _ => {}
        }

        let Some(screen) = self.screens.get_mut(&self.active_screen) else {
            return Ok(None);
        };

        if !screen.captures_input() && key.modifiers == KeyModifiers::NONE {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                KeyCode::Char(c @ '1'..='9') => {
                    let target = c
                        .to_digit(10)
                        .and_then(|n| u8::try_from(n).ok())
                        .and_then(ScreenId::from_number);
                    if let Some(target) = target {
                        return Ok(Some(Action::SwitchScreen(target)));
                    }
                }
                _ => {}
            }
        }

        screen.handle_key_event(key)
    }

    /// Update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    self.active_screen = *target;
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Render | Action::Resize(..) => {}

            Action::Entry(command) => {
                if let Some(handles) = &self.handles {
                    if handles.entry.send(command.clone()).is_err() {
                        warn!("entry controller is gone");
                    }
                }
            }

            Action::Redeem(command) => {
                if let Some(handles) = &self.handles {
                    if handles.redeem.send(command.clone()).is_err() {
                        warn!("redeem controller is gone");
                    }
                }
            }

            // Controller updates and ticks go to every screen; each picks
            // out what it mirrors.
            Action::Tick | Action::EntryUpdated(_) | Action::RedeemResult { .. } => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Server URL plus the active screen's key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = self
            .screens
            .get(&self.active_screen)
            .map_or("", |screen| screen.hints());

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(self.server.as_str(), Style::default().fg(theme::NEON_CYAN)),
            Span::styled(format!(" │ {hints}"), theme::key_hint()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 52u16.min(area.width.saturating_sub(4));
        let help_height = 17u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_HIGHLIGHT));

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let row = |key: &'static str, label: &'static str| {
            Line::from(vec![
                Span::styled(key, theme::key_hint_key()),
                Span::styled(label, theme::key_hint()),
            ])
        };
        let heading = |title: &'static str| {
            Line::from(Span::styled(title, Style::default().fg(theme::NEON_CYAN)))
        };

        let help_text = vec![
            Line::from(""),
            heading("  Lottery"),
            row("  0-9       ", "Enter code digit"),
            row("  Bksp/Del  ", "Delete digit / clear"),
            row("  Enter     ", "Draw"),
            row("  c / r     ", "Show coupon / retry"),
            row("  h         ", "Back to home"),
            Line::from(""),
            heading("  Redeem"),
            row("  Enter     ", "Redeem token"),
            row("  Ctrl+U    ", "Clear token"),
            Line::from(""),
            heading("  Global"),
            row("  Tab 1-2   ", "Switch tab"),
            row("  q Ctrl+C  ", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "                 Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
