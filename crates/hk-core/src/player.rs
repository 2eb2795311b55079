//! The player character: identity, position, vitals, and progression.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::consts::{
    EXP_PER_LEVEL, LEVEL_HP_GAIN, LEVEL_MP_GAIN, START_HP, START_MP, START_X, START_Y,
};

/// Position on the field, in world units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position
    pub fn distance(&self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Facing / movement direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit delta (dx, dy); multiply by the step size to move
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Presentation variant for the player avatar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    Boy,
    Girl,
}

/// The player character
///
/// Owned by the session; mutated by the event and battle engines. Vitals are
/// always kept clamped: `0 <= hp <= max_hp`, `0 <= mp <= max_mp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub variant: Variant,

    pub pos: Position,
    pub facing: Direction,

    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,

    pub level: u32,
    pub exp: u32,
}

impl Player {
    /// Create a fresh level-1 player at the starting position
    pub fn new(name: impl Into<String>, variant: Variant) -> Self {
        Self {
            name: name.into(),
            variant,
            pos: Position::new(START_X, START_Y),
            facing: Direction::Down,
            hp: START_HP,
            max_hp: START_HP,
            mp: START_MP,
            max_mp: START_MP,
            level: 1,
            exp: 0,
        }
    }

    /// Restore hp, clamped to the maximum
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Restore mp, clamped to the maximum
    pub fn restore_mp(&mut self, amount: i32) {
        self.mp = (self.mp + amount).min(self.max_mp);
    }

    /// Fully restore both hp and mp
    pub fn full_restore(&mut self) {
        self.hp = self.max_hp;
        self.mp = self.max_mp;
    }

    /// Spend mp for a skill; returns false (and spends nothing) if short
    pub fn spend_mp(&mut self, cost: i32) -> bool {
        if self.mp < cost {
            return false;
        }
        self.mp -= cost;
        true
    }

    /// Take damage, clamped at zero
    pub fn take_damage(&mut self, damage: i32) {
        self.hp = (self.hp - damage).max(0);
    }

    /// Player hp has hit zero and the revival rule applies
    pub const fn is_felled(&self) -> bool {
        self.hp == 0
    }

    /// The revival rule: defeat is never fatal, hp comes back as 1
    pub fn revive(&mut self) {
        self.hp = 1;
    }

    /// Grant victory experience and evaluate the level-up threshold once.
    ///
    /// Returns true if a level-up happened. The threshold (`level * 100`) is
    /// checked a single time per call even when the new total overshoots
    /// several thresholds; exp resets to 0 on level-up either way.
    pub fn grant_exp(&mut self, amount: u32) -> bool {
        self.exp = self.exp.saturating_add(amount);
        if self.exp >= self.level * EXP_PER_LEVEL {
            self.level += 1;
            self.max_hp += LEVEL_HP_GAIN;
            self.max_mp += LEVEL_MP_GAIN;
            self.full_restore();
            self.exp = 0;
            return true;
        }
        false
    }

    /// Reset vitals, position, and progression for a new game,
    /// preserving name and variant
    pub fn reset_for_new_game(&mut self) {
        let name = core::mem::take(&mut self.name);
        let variant = self.variant;
        *self = Player::new(name, variant);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new("Kakeru", Variant::Boy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heal_clamps_to_max() {
        let mut p = Player::default();
        p.hp = 90;
        p.heal(20);
        assert_eq!(p.hp, p.max_hp);
    }

    #[test]
    fn spend_mp_rejects_when_short() {
        let mut p = Player::default();
        p.mp = 4;
        assert!(!p.spend_mp(5));
        assert_eq!(p.mp, 4);
        assert!(p.spend_mp(4));
        assert_eq!(p.mp, 0);
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut p = Player::default();
        p.take_damage(1000);
        assert_eq!(p.hp, 0);
        assert!(p.is_felled());
        p.revive();
        assert_eq!(p.hp, 1);
    }

    #[test]
    fn level_up_applies_gains_and_resets_exp() {
        let mut p = Player::default();
        p.hp = 30;
        p.mp = 10;
        assert!(p.grant_exp(100));
        assert_eq!(p.level, 2);
        assert_eq!(p.max_hp, START_HP + LEVEL_HP_GAIN);
        assert_eq!(p.max_mp, START_MP + LEVEL_MP_GAIN);
        assert_eq!(p.hp, p.max_hp);
        assert_eq!(p.mp, p.max_mp);
        assert_eq!(p.exp, 0);
    }

    #[test]
    fn below_threshold_accumulates() {
        let mut p = Player::default();
        assert!(!p.grant_exp(55));
        assert_eq!(p.level, 1);
        assert_eq!(p.exp, 55);
    }

    #[test]
    fn overshoot_levels_only_once() {
        // 350 exp crosses the level-1 and would-be level-2 thresholds, but a
        // single victory yields a single level-up.
        let mut p = Player::default();
        assert!(p.grant_exp(350));
        assert_eq!(p.level, 2);
        assert_eq!(p.exp, 0);
    }

    #[test]
    fn reset_preserves_identity() {
        let mut p = Player::new("Hana", Variant::Girl);
        p.level = 5;
        p.exp = 40;
        p.pos = Position::new(0, 0);
        p.take_damage(50);
        p.reset_for_new_game();
        assert_eq!(p.name, "Hana");
        assert_eq!(p.variant, Variant::Girl);
        assert_eq!(p.level, 1);
        assert_eq!(p.exp, 0);
        assert_eq!(p.hp, START_HP);
        assert_eq!(p.pos, Position::new(START_X, START_Y));
    }
}
