//! Battle view widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use hk_core::battle::{Battle, BattlePhase};

use crate::theme::Theme;

/// The battle screen: enemy panel plus the action menu
pub struct BattleWidget<'a> {
    battle: &'a Battle,
    theme: Theme,
}

impl<'a> BattleWidget<'a> {
    pub fn new(battle: &'a Battle, theme: Theme) -> Self {
        Self { battle, theme }
    }
}

impl Widget for BattleWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let enemy = &self.battle.enemy;
        let archetype = enemy.kind.archetype();

        let actions = match self.battle.phase {
            BattlePhase::PlayerTurn => {
                Line::from(vec![
                    Span::styled("[a]", Style::default().fg(self.theme.accent)),
                    Span::raw(" Attack  "),
                    Span::styled("[s]", Style::default().fg(self.theme.accent)),
                    Span::raw(" Skill  "),
                    Span::styled("[i]", Style::default().fg(self.theme.accent)),
                    Span::raw(" Item  "),
                    Span::styled("[f]", Style::default().fg(self.theme.accent)),
                    Span::raw(" Flee"),
                ])
            }
            BattlePhase::EnemyPending => Line::styled(
                format!("The {} is about to strike...", enemy.name()),
                Style::default().fg(self.theme.text_dim),
            ),
            BattlePhase::Over => Line::raw(""),
        };

        let lines = vec![
            Line::styled(
                format!("{}  ({})", enemy.name(), archetype.glyph),
                Style::default().fg(self.theme.bad).bold(),
            ),
            Line::styled(
                format!("HP: {}/{}", enemy.display_hp(), archetype.base_hp),
                Style::default().fg(self.theme.text),
            ),
            Line::raw(""),
            actions,
        ];

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.bad))
                    .title(" Battle "),
            )
            .render(area, buf);
    }
}
