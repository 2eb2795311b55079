//! Application state and main UI controller

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use hk_core::AUTOSAVE_INTERVAL_SECS;
use hk_core::player::Variant;
use hk_core::session::{Screen, Session};

use crate::audio::AudioSink;
use crate::input::key_to_command;
use crate::theme::Theme;
use crate::widgets::{BattleWidget, FieldWidget, MessageWindow, StatusWidget};

/// Gameplay hints shown on the help screen
const HINTS: &[&str] = &[
    "Press Space to examine whatever is nearby.",
    "The river can only be crossed at the bridge.",
    "The church restores your HP and MP for free.",
    "The general store tops up your MP.",
    "Treasure chests only open once.",
    "Leveling up fully restores you.",
];

/// UI mode - what the app is currently displaying/waiting for
#[derive(Debug, Clone)]
pub enum UiMode {
    /// Normal gameplay
    Normal,
    /// Editing player settings (title screen only)
    Settings(SettingsState),
    /// Showing help and hints
    Help,
    /// Showing the message history
    History,
}

/// In-progress settings edits, applied on Enter
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub name: String,
    pub variant: Variant,
    pub volume: u8,
}

/// Application state
pub struct App {
    session: Session,
    theme: Theme,
    mode: UiMode,
    audio: Box<dyn AudioSink>,
    should_quit: bool,
    /// Milliseconds since the last autosave
    autosave_accum_ms: u64,
}

impl App {
    pub fn new(session: Session, theme: Theme, audio: Box<dyn AudioSink>) -> Self {
        Self {
            session,
            theme,
            mode: UiMode::Normal,
            audio,
            should_quit: false,
            autosave_accum_ms: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        match &mut self.mode {
            UiMode::Help | UiMode::History => {
                self.mode = UiMode::Normal;
            }
            UiMode::Settings(state) => match key.code {
                KeyCode::Esc => self.mode = UiMode::Normal,
                KeyCode::Enter => {
                    let state = state.clone();
                    self.apply_settings(state);
                    self.mode = UiMode::Normal;
                }
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    state.variant = match state.variant {
                        Variant::Boy => Variant::Girl,
                        Variant::Girl => Variant::Boy,
                    };
                }
                KeyCode::Up => state.volume = (state.volume + 10).min(100),
                KeyCode::Down => state.volume = state.volume.saturating_sub(10),
                KeyCode::Backspace => {
                    state.name.pop();
                }
                KeyCode::Char(c) if state.name.len() < 16 => state.name.push(c),
                _ => {}
            },
            UiMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('p') {
                self.mode = UiMode::History;
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.mode = UiMode::Help;
                return;
            }
            KeyCode::Char('s') if self.session.screen() == Screen::Title => {
                self.mode = UiMode::Settings(SettingsState {
                    name: self.session.player().name.clone(),
                    variant: self.session.player().variant,
                    volume: self.audio.volume(),
                });
                return;
            }
            _ => {}
        }

        // The hidden developer recognizer sees every typed character,
        // independently of the command routing below.
        #[cfg(feature = "cheats")]
        if let KeyCode::Char(c) = key.code {
            self.session.type_char(c);
        }

        if let Some(cmd) = key_to_command(key, self.session.in_battle()) {
            self.session.dispatch(cmd);
        }
    }

    fn apply_settings(&mut self, state: SettingsState) {
        let player = self.session.player_mut();
        player.name = if state.name.trim().is_empty() {
            "Kakeru".to_string()
        } else {
            state.name
        };
        player.variant = state.variant;
        self.audio.set_volume(state.volume);
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Advance the session clock, drain audio cues, and pump the autosave.
    pub fn tick(&mut self, elapsed_ms: u64) {
        self.session.advance(elapsed_ms);

        for signal in self.session.take_audio() {
            self.audio.handle(signal);
        }

        self.autosave_accum_ms += elapsed_ms;
        if self.autosave_accum_ms >= AUTOSAVE_INTERVAL_SECS * 1000 {
            self.autosave_accum_ms = 0;
            if self.session.screen() == Screen::Field {
                self.autosave();
            }
        }
    }

    /// Best-effort snapshot of the player; failures are logged and swallowed.
    fn autosave(&self) {
        let player = self.session.player();
        let path = hk_save::default_save_path(&player.name);
        if let Err(err) = hk_save::save_snapshot(player, &path) {
            tracing::warn!(%err, "autosave failed");
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn render(&self, frame: &mut Frame) {
        match self.session.screen() {
            Screen::Title => self.render_title(frame),
            Screen::Field => self.render_field(frame),
        }

        match &self.mode {
            UiMode::Settings(state) => self.render_settings(frame, state),
            UiMode::Help => self.render_help(frame),
            UiMode::History => self.render_history(frame),
            UiMode::Normal => {}
        }
    }

    fn render_title(&self, frame: &mut Frame) {
        let area = frame.area();
        let lines = vec![
            Line::raw(""),
            Line::styled(
                "HIKARI NO OUKOKU",
                Style::default().fg(self.theme.accent).bold(),
            ),
            Line::styled("~ Kingdom of Light ~", Style::default().fg(self.theme.text)),
            Line::raw(""),
            Line::styled(
                "Press Enter to begin",
                Style::default().fg(self.theme.text),
            ),
            Line::raw(""),
            Line::styled(
                "[s] settings   [?] help   [Esc] quit",
                Style::default().fg(self.theme.text_dim),
            ),
        ];
        frame.render_widget(
            Paragraph::new(lines).centered().block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border)),
            ),
            area,
        );
    }

    fn render_field(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(4),
            ])
            .split(frame.area());

        frame.render_widget(StatusWidget::new(self.session.player(), self.theme), chunks[0]);

        if let Some(battle) = self.session.battle() {
            frame.render_widget(BattleWidget::new(battle, self.theme), chunks[1]);
        } else {
            frame.render_widget(
                FieldWidget::new(self.session.map(), self.session.player(), self.theme),
                chunks[1],
            );
        }

        if let Some(line) = self.session.current_message() {
            frame.render_widget(MessageWindow::new(line, self.theme), chunks[2]);
        } else {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    "arrows/wasd move   Space examine   [?] help   [Esc] quit",
                    Style::default().fg(self.theme.text_dim),
                )),
                chunks[2],
            );
        }
    }

    fn render_settings(&self, frame: &mut Frame, state: &SettingsState) {
        let area = centered_rect(50, 40, frame.area());
        let variant = match state.variant {
            Variant::Boy => "boy",
            Variant::Girl => "girl",
        };
        let lines = vec![
            Line::raw(format!("Name:    {}_", state.name)),
            Line::raw(format!("Avatar:  {variant}  (Tab to switch)")),
            Line::raw(format!("Volume:  {}%  (Up/Down)", state.volume)),
            Line::raw(""),
            Line::styled(
                "Enter to save, Esc to cancel",
                Style::default().fg(self.theme.text_dim),
            ),
        ];
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border_accent))
                    .title(" Settings "),
            ),
            area,
        );
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(60, 60, frame.area());
        let mut lines = vec![
            Line::styled("Controls", Style::default().fg(self.theme.accent).bold()),
            Line::raw("  arrows / wasd   move"),
            Line::raw("  Space / Enter   examine, advance messages"),
            Line::raw("  a s i f         battle actions"),
            Line::raw("  Ctrl+P          message history"),
            Line::raw(""),
            Line::styled("Hints", Style::default().fg(self.theme.accent).bold()),
        ];
        for hint in HINTS {
            lines.push(Line::raw(format!("  {hint}")));
        }
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border_accent))
                    .title(" Help "),
            ),
            area,
        );
    }

    fn render_history(&self, frame: &mut Frame) {
        let area = centered_rect(70, 70, frame.area());
        let visible = (area.height as usize).saturating_sub(2);
        let history = self.session.history();
        let start = history.len().saturating_sub(visible);
        let lines: Vec<Line> = history[start..]
            .iter()
            .map(|l| Line::styled(l.as_str(), Style::default().fg(self.theme.text)))
            .collect();
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border))
                    .title(" Messages "),
            ),
            area,
        );
    }
}

/// Centered sub-rectangle, as a percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
