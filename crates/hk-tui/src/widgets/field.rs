//! Field map widget
//!
//! Renders the 400x400 world as a 10x10 glyph grid, one cell per movement
//! step. Terrain is sampled at cell centers, so the river band and the
//! bridge gap land on whole cells.

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use hk_core::map::WorldMap;
use hk_core::player::{Direction, Player};
use hk_core::{
    BRIDGE_X_MAX, BRIDGE_X_MIN, FIELD_HEIGHT, FIELD_WIDTH, RIVER_Y_MAX, RIVER_Y_MIN, STEP_SIZE,
};

use crate::theme::Theme;

const COLS: i32 = FIELD_WIDTH / STEP_SIZE;
const ROWS: i32 = FIELD_HEIGHT / STEP_SIZE;

pub struct FieldWidget<'a> {
    map: &'a WorldMap,
    player: &'a Player,
    theme: Theme,
}

impl<'a> FieldWidget<'a> {
    pub fn new(map: &'a WorldMap, player: &'a Player, theme: Theme) -> Self {
        Self { map, player, theme }
    }

    fn player_glyph(&self) -> char {
        match self.player.facing {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }
}

impl Widget for FieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let player_cell = (self.player.pos.x / STEP_SIZE, self.player.pos.y / STEP_SIZE);

        for row in 0..ROWS {
            if row as u16 >= area.height {
                break;
            }
            for col in 0..COLS {
                // Each cell draws two columns wide to keep a square-ish aspect.
                let x = area.x + (col as u16) * 2;
                let y = area.y + row as u16;
                if x + 1 >= area.right() {
                    break;
                }

                let center_x = col * STEP_SIZE + STEP_SIZE / 2;
                let center_y = row * STEP_SIZE + STEP_SIZE / 2;
                let in_river = (RIVER_Y_MIN..=RIVER_Y_MAX).contains(&center_y);
                let on_bridge = (BRIDGE_X_MIN..=BRIDGE_X_MAX).contains(&center_x);

                let event_glyph = self
                    .map
                    .events()
                    .iter()
                    .find(|ev| (ev.pos.x / STEP_SIZE, ev.pos.y / STEP_SIZE) == (col, row))
                    .map(|ev| ev.kind.glyph());

                let (glyph, color) = if (col, row) == player_cell {
                    (self.player_glyph(), self.theme.field_player)
                } else if let Some(glyph) = event_glyph {
                    (glyph, self.theme.field_event)
                } else if in_river && on_bridge {
                    ('=', self.theme.field_bridge)
                } else if in_river {
                    ('~', self.theme.field_water)
                } else {
                    ('.', self.theme.field_floor)
                };

                buf.set_string(x, y, glyph.to_string(), Style::default().fg(color));
            }
        }
    }
}
