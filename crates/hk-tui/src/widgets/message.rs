//! Modal message window
//!
//! Shows one line at a time; while open, the session suppresses movement
//! and battle actions until the player pages through.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::theme::Theme;

pub struct MessageWindow<'a> {
    line: &'a str,
    theme: Theme,
}

impl<'a> MessageWindow<'a> {
    pub fn new(line: &'a str, theme: Theme) -> Self {
        Self { line, theme }
    }
}

impl Widget for MessageWindow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::styled(self.line, Style::default().fg(self.theme.text)),
            Line::styled("(Space)", Style::default().fg(self.theme.text_dim)),
        ];
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border)),
            )
            .render(area, buf);
    }
}
