//! The world map: field bounds, river terrain, and the field-event table.

use crate::consts::{
    BRIDGE_X_MAX, BRIDGE_X_MIN, FIELD_HEIGHT, FIELD_WIDTH, RIVER_Y_MAX, RIVER_Y_MIN, SPRITE_SIZE,
    TRIGGER_RADIUS,
};
use crate::enemy::EnemyKind;
use crate::player::Position;

/// Static message lines attached to a field event
pub type Lines = &'static [&'static str];

/// What a treasure chest restores; the resource is determined by this
/// variant, never by the chest's message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreasureReward {
    Hp(i32),
    Mp(i32),
}

/// The closed set of field-event types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Town(Lines),
    Shop(Lines),
    Church(Lines),
    Mountain(Lines),
    Cave(Lines),
    Bridge(Lines),
    Forest(Lines),
    Battle(EnemyKind),
    Dungeon(EnemyKind),
    Treasure {
        reward: TreasureReward,
        lines: Lines,
        /// Exactly one lifecycle transition: unopened -> opened
        opened: bool,
    },
}

impl EventKind {
    /// Map glyph for glyph-based frontends
    pub fn glyph(&self) -> char {
        match self {
            EventKind::Town(_) => 'T',
            EventKind::Shop(_) => '$',
            EventKind::Church(_) => '+',
            EventKind::Mountain(_) => '^',
            EventKind::Cave(_) => 'o',
            EventKind::Bridge(_) => '=',
            EventKind::Forest(_) => '&',
            EventKind::Battle(kind) | EventKind::Dungeon(kind) => kind.archetype().glyph,
            EventKind::Treasure { opened, .. } => {
                if *opened {
                    '.'
                } else {
                    '*'
                }
            }
        }
    }
}

/// A fixed-position interactable trigger on the world map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEvent {
    pub pos: Position,
    pub kind: EventKind,
}

/// The explorable field: fixed bounds, the river, and the event table
#[derive(Debug, Clone)]
pub struct WorldMap {
    events: Vec<FieldEvent>,
}

impl WorldMap {
    /// The reference field layout
    pub fn standard() -> Self {
        use EventKind::*;
        let at = Position::new;
        Self {
            events: vec![
                // The town cluster
                FieldEvent {
                    pos: at(80, 80),
                    kind: Town(&["Welcome to the town of Hikari!", "It is a peaceful place."]),
                },
                FieldEvent {
                    pos: at(100, 80),
                    kind: Shop(&["This is the general store!", "You picked up a recovery item!"]),
                },
                FieldEvent {
                    pos: at(120, 80),
                    kind: Church(&["This is the church.", "Your HP and MP are fully restored!"]),
                },
                // The mountains
                FieldEvent {
                    pos: at(300, 60),
                    kind: Mountain(&["A tall mountain.", "What a wonderful view!"]),
                },
                FieldEvent {
                    pos: at(320, 60),
                    kind: Cave(&[
                        "You found a cave in the mountainside!",
                        "It looks dark and scary inside...",
                        "Are you brave enough to go in?",
                    ]),
                },
                // The river crossing
                FieldEvent {
                    pos: at(200, 210),
                    kind: Bridge(&["A beautiful stone bridge.", "You can cross the river here."]),
                },
                // The Demon King's lair
                FieldEvent {
                    pos: at(350, 280),
                    kind: Dungeon(EnemyKind::DemonKing),
                },
                FieldEvent {
                    pos: at(220, 300),
                    kind: Forest(&["A deep forest.", "You can hear little birds singing."]),
                },
                // Fixed battles
                FieldEvent {
                    pos: at(120, 160),
                    kind: Battle(EnemyKind::Slime),
                },
                FieldEvent {
                    pos: at(280, 140),
                    kind: Battle(EnemyKind::Goblin),
                },
                FieldEvent {
                    pos: at(80, 320),
                    kind: Battle(EnemyKind::Slime),
                },
                // Treasure chests
                FieldEvent {
                    pos: at(50, 50),
                    kind: Treasure {
                        reward: TreasureReward::Mp(10),
                        lines: &["You found a sparkling treasure chest!", "Your MP recovered by 10!"],
                        opened: false,
                    },
                },
                FieldEvent {
                    pos: at(380, 320),
                    kind: Treasure {
                        reward: TreasureReward::Hp(20),
                        lines: &["You found an old treasure chest!", "Your HP recovered by 20!"],
                        opened: false,
                    },
                },
            ],
        }
    }

    /// Clamp a position so the sprite stays within the field bounds
    pub fn clamp(pos: Position) -> Position {
        Position::new(
            pos.x.clamp(0, FIELD_WIDTH - SPRITE_SIZE),
            pos.y.clamp(0, FIELD_HEIGHT - SPRITE_SIZE),
        )
    }

    /// The river blocks movement except through the bridge gap.
    ///
    /// Checked after bounds clamping and independently of the event table.
    pub fn is_blocked(&self, pos: Position) -> bool {
        (RIVER_Y_MIN..=RIVER_Y_MAX).contains(&pos.y)
            && !(BRIDGE_X_MIN..=BRIDGE_X_MAX).contains(&pos.x)
    }

    /// Indices of events within the trigger radius of a position.
    ///
    /// Returns an empty vec when none match; never errors.
    pub fn events_near(&self, pos: Position) -> Vec<usize> {
        self.events
            .iter()
            .enumerate()
            .filter(|(_, ev)| pos.distance(ev.pos) < TRIGGER_RADIUS)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn events(&self) -> &[FieldEvent] {
        &self.events
    }

    pub fn event_mut(&mut self, idx: usize) -> &mut FieldEvent {
        &mut self.events[idx]
    }
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{STEP_SIZE, TRIGGER_RADIUS};
    use proptest::prelude::*;

    #[test]
    fn clamp_keeps_sprite_on_field() {
        assert_eq!(WorldMap::clamp(Position::new(-40, 500)), Position::new(0, 360));
        assert_eq!(WorldMap::clamp(Position::new(200, 250)), Position::new(200, 250));
    }

    #[test]
    fn river_blocks_except_bridge() {
        let map = WorldMap::standard();
        assert!(map.is_blocked(Position::new(120, 200)));
        assert!(map.is_blocked(Position::new(280, 240)));
        assert!(!map.is_blocked(Position::new(160, 200)));
        assert!(!map.is_blocked(Position::new(240, 240)));
        assert!(!map.is_blocked(Position::new(120, 160)));
        assert!(!map.is_blocked(Position::new(120, 280)));
    }

    #[test]
    fn events_near_uses_euclidean_radius() {
        let map = WorldMap::standard();
        // Standing on the town tile reaches the shop (20 away) and the
        // church (40 away) but not the chest at (50,50).
        let near = map.events_near(Position::new(80, 80));
        let kinds: Vec<_> = near
            .iter()
            .map(|&i| map.events()[i].kind.glyph())
            .collect();
        assert!(kinds.contains(&'T'));
        assert!(kinds.contains(&'$'));
        assert!(kinds.contains(&'+'));
        assert!(!kinds.contains(&'*'));
    }

    #[test]
    fn empty_when_nothing_in_reach() {
        let map = WorldMap::standard();
        assert!(map.events_near(Position::new(0, 360)).is_empty());
    }

    proptest! {
        // Any clamped, river-checked step stays on the field and out of the
        // water except through the bridge gap.
        #[test]
        fn steps_never_escape_bounds_or_enter_river(
            x in -200..600i32,
            y in -200..600i32,
            dx in -1..=1i32,
            dy in -1..=1i32,
        ) {
            let map = WorldMap::standard();
            let from = Position::new(x, y);
            let target = WorldMap::clamp(Position::new(
                from.x + dx * STEP_SIZE,
                from.y + dy * STEP_SIZE,
            ));
            if !map.is_blocked(target) {
                prop_assert!((0..=360).contains(&target.x));
                prop_assert!((0..=360).contains(&target.y));
                if (200..=240).contains(&target.y) {
                    prop_assert!((160..=240).contains(&target.x));
                }
            }
        }

        #[test]
        fn events_near_matches_distance_metric(x in 0..=360i32, y in 0..=360i32) {
            let map = WorldMap::standard();
            let pos = Position::new(x, y);
            let near = map.events_near(pos);
            for (idx, ev) in map.events().iter().enumerate() {
                prop_assert_eq!(near.contains(&idx), pos.distance(ev.pos) < TRIGGER_RADIUS);
            }
        }
    }
}
