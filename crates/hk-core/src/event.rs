//! The field-event engine: resolves a triggered event into state effects
//! and message lines.

use crate::consts::SHOP_MP_RESTORE;
use crate::enemy::EnemyKind;
use crate::map::{EventKind, FieldEvent, TreasureReward};
use crate::player::Player;

/// Non-message effect of triggering a field event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Nothing,
    StartBattle(EnemyKind),
}

/// Resolve one triggered event against the player.
///
/// Dispatch is exhaustive over the closed `EventKind` set; no event errors.
/// Treasure is idempotent: the first trigger grants the reward and flips the
/// chest open, later triggers do nothing at all.
pub fn trigger(event: &mut FieldEvent, player: &mut Player) -> (EventOutcome, Vec<String>) {
    match &mut event.kind {
        EventKind::Town(lines)
        | EventKind::Mountain(lines)
        | EventKind::Bridge(lines)
        | EventKind::Forest(lines)
        | EventKind::Cave(lines) => (EventOutcome::Nothing, to_owned(lines)),

        EventKind::Shop(lines) => {
            player.restore_mp(SHOP_MP_RESTORE);
            (EventOutcome::Nothing, to_owned(lines))
        }

        EventKind::Church(lines) => {
            player.full_restore();
            (EventOutcome::Nothing, to_owned(lines))
        }

        EventKind::Treasure {
            reward,
            lines,
            opened,
        } => {
            if *opened {
                return (EventOutcome::Nothing, Vec::new());
            }
            match *reward {
                TreasureReward::Hp(amount) => player.heal(amount),
                TreasureReward::Mp(amount) => player.restore_mp(amount),
            }
            *opened = true;
            (EventOutcome::Nothing, to_owned(lines))
        }

        EventKind::Battle(kind) | EventKind::Dungeon(kind) => {
            (EventOutcome::StartBattle(*kind), Vec::new())
        }
    }
}

fn to_owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_string()).collect()
}
