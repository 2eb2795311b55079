//! The enemy catalog: archetypes and battle-scoped instances.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::rng::GameRng;

/// Immutable stats template for one enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Archetype {
    pub name: &'static str,
    /// Leading article for battle messages ("A Slime", "The Demon King")
    pub article: &'static str,
    /// Map/battle glyph used by glyph-based frontends
    pub glyph: char,
    pub base_hp: i32,
    pub attack: i32,
    pub exp_reward: u32,
}

/// The closed set of enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum EnemyKind {
    Slime,
    Goblin,
    DemonKing,
}

const SLIME: Archetype = Archetype {
    name: "Slime",
    article: "A",
    glyph: 's',
    base_hp: 30,
    attack: 8,
    exp_reward: 15,
};

const GOBLIN: Archetype = Archetype {
    name: "Goblin",
    article: "A",
    glyph: 'g',
    base_hp: 45,
    attack: 12,
    exp_reward: 25,
};

const DEMON_KING: Archetype = Archetype {
    name: "Demon King",
    article: "The",
    glyph: 'D',
    base_hp: 150,
    attack: 25,
    exp_reward: 100,
};

impl EnemyKind {
    /// Static stats for this archetype
    pub const fn archetype(self) -> &'static Archetype {
        match self {
            EnemyKind::Slime => &SLIME,
            EnemyKind::Goblin => &GOBLIN,
            EnemyKind::DemonKing => &DEMON_KING,
        }
    }

    /// Whether defeating this archetype completes the game
    pub const fn is_final_boss(self) -> bool {
        matches!(self, EnemyKind::DemonKing)
    }

    /// Pick a random non-boss archetype for a field encounter
    pub fn random_encounter(rng: &mut GameRng) -> Self {
        const ROSTER: [EnemyKind; 2] = [EnemyKind::Slime, EnemyKind::Goblin];
        ROSTER[rng.rn2(ROSTER.len() as u32) as usize]
    }
}

/// A battle-scoped enemy: an archetype plus mutable hp
///
/// Created when a battle starts and discarded when it ends. `hp` may go
/// negative transiently to signal defeat; `display_hp` clamps for the UI.
#[derive(Debug, Clone)]
pub struct EnemyInstance {
    pub kind: EnemyKind,
    pub hp: i32,
}

impl EnemyInstance {
    pub fn spawn(kind: EnemyKind) -> Self {
        Self {
            kind,
            hp: kind.archetype().base_hp,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.archetype().name
    }

    pub fn article(&self) -> &'static str {
        self.kind.archetype().article
    }

    pub fn attack(&self) -> i32 {
        self.kind.archetype().attack
    }

    pub fn exp_reward(&self) -> u32 {
        self.kind.archetype().exp_reward
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.hp -= damage;
    }

    pub const fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Hp clamped to zero for display
    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn catalog_stats() {
        let slime = EnemyKind::Slime.archetype();
        assert_eq!((slime.base_hp, slime.attack, slime.exp_reward), (30, 8, 15));
        let goblin = EnemyKind::Goblin.archetype();
        assert_eq!((goblin.base_hp, goblin.attack, goblin.exp_reward), (45, 12, 25));
        let boss = EnemyKind::DemonKing.archetype();
        assert_eq!((boss.base_hp, boss.attack, boss.exp_reward), (150, 25, 100));
    }

    #[test]
    fn exactly_one_final_boss() {
        let bosses: Vec<_> = EnemyKind::iter().filter(|k| k.is_final_boss()).collect();
        assert_eq!(bosses, vec![EnemyKind::DemonKing]);
    }

    #[test]
    fn instance_defeat_and_display_clamp() {
        let mut e = EnemyInstance::spawn(EnemyKind::Slime);
        assert!(!e.is_defeated());
        e.take_damage(35);
        assert!(e.is_defeated());
        assert_eq!(e.hp, -5);
        assert_eq!(e.display_hp(), 0);
    }

    #[test]
    fn random_encounter_never_rolls_the_boss() {
        let mut rng = GameRng::new(99);
        for _ in 0..1000 {
            assert!(!EnemyKind::random_encounter(&mut rng).is_final_boss());
        }
    }
}
