//! Status line widget

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use hk_core::EXP_PER_LEVEL;
use hk_core::player::Player;

use crate::theme::Theme;

/// Single-line player status: name, level, vitals, progress to next level
pub struct StatusWidget<'a> {
    player: &'a Player,
    theme: Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(player: &'a Player, theme: Theme) -> Self {
        Self { player, theme }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.player;
        let line = format!(
            "{}  Lv:{}  HP:{}/{}  MP:{}/{}  Exp:{}/{}",
            p.name,
            p.level,
            p.hp,
            p.max_hp,
            p.mp,
            p.max_mp,
            p.exp,
            p.level * EXP_PER_LEVEL,
        );
        buf.set_string(area.x, area.y, &line, Style::default().fg(self.theme.text));
    }
}
