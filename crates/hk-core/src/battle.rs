//! The battle engine: a state machine over a single active encounter.
//!
//! The session owns the pacing: a turn-consuming player action reports
//! `EnemyPending` and the session schedules the strike as a timed
//! transition; `enemy_strike` resolves it when the timer fires.

use crate::consts::{
    ATTACK_DMG_MAX, ATTACK_DMG_MIN, ENEMY_DMG_BASE, FLEE_CHANCE, ITEM_HEAL, SKILL_DMG_MAX,
    SKILL_DMG_MIN, SKILL_MP_COST,
};
use crate::enemy::{EnemyInstance, EnemyKind};
use crate::player::Player;
use crate::rng::GameRng;

/// Phase of the active encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    /// Waiting for a player action
    PlayerTurn,
    /// A player turn was consumed; the enemy strike is scheduled
    EnemyPending,
    /// The encounter has been decided
    Over,
}

/// The player's mutually exclusive battle actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    Attack,
    Skill,
    Item,
    Flee,
}

/// What the session must do after a player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Turn consumed; schedule the enemy strike
    EnemyPending,
    /// The enemy fell; victory has been processed
    Victory { leveled: bool, final_boss: bool },
    /// Fled successfully; the battle is over with no retaliation
    Fled,
    /// The action was a no-op; still the player's turn
    Rejected,
}

/// Result of the enemy strike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeOutcome {
    /// Back to the player's turn
    Continue,
    /// The player fell and was revived at 1 hp; the battle is over
    PlayerFelled,
}

/// A single active encounter
#[derive(Debug, Clone)]
pub struct Battle {
    pub enemy: EnemyInstance,
    pub phase: BattlePhase,
}

impl Battle {
    /// Instantiate the enemy and emit the entrance line
    pub fn start(kind: EnemyKind) -> (Self, Vec<String>) {
        let enemy = EnemyInstance::spawn(kind);
        let entrance = format!("{} {} appears!", enemy.article(), enemy.name());
        (
            Self {
                enemy,
                phase: BattlePhase::PlayerTurn,
            },
            vec![entrance],
        )
    }

    /// Resolve one player action.
    ///
    /// Outside `PlayerTurn` this is a silent no-op; the caller pre-validates
    /// but the gate holds regardless.
    pub fn player_turn(
        &mut self,
        action: BattleAction,
        player: &mut Player,
        rng: &mut GameRng,
    ) -> (TurnOutcome, Vec<String>) {
        if self.phase != BattlePhase::PlayerTurn {
            return (TurnOutcome::Rejected, Vec::new());
        }

        match action {
            BattleAction::Attack => {
                let damage = rng.range(ATTACK_DMG_MIN, ATTACK_DMG_MAX);
                self.enemy.take_damage(damage);
                let mut lines = vec![
                    format!("{} attacks!", player.name),
                    format!("{damage} damage!"),
                ];
                let outcome = self.after_hit(player, &mut lines);
                (outcome, lines)
            }
            BattleAction::Skill => {
                if !player.spend_mp(SKILL_MP_COST) {
                    // Rejected: the enemy's turn is not consumed.
                    return (TurnOutcome::Rejected, vec!["Not enough MP!".to_string()]);
                }
                let damage = rng.range(SKILL_DMG_MIN, SKILL_DMG_MAX);
                self.enemy.take_damage(damage);
                let mut lines = vec![
                    format!("{}'s Insight Beam!", player.name),
                    format!("{damage} damage!"),
                ];
                let outcome = self.after_hit(player, &mut lines);
                (outcome, lines)
            }
            BattleAction::Item => {
                player.heal(ITEM_HEAL);
                self.phase = BattlePhase::EnemyPending;
                (
                    TurnOutcome::EnemyPending,
                    vec![
                        "You eat a snack!".to_string(),
                        format!("Recovered {ITEM_HEAL} HP!"),
                    ],
                )
            }
            BattleAction::Flee => {
                if rng.chance(FLEE_CHANCE) {
                    self.phase = BattlePhase::Over;
                    (TurnOutcome::Fled, vec!["You got away safely!".to_string()])
                } else {
                    self.phase = BattlePhase::EnemyPending;
                    (
                        TurnOutcome::EnemyPending,
                        vec!["You couldn't escape!".to_string()],
                    )
                }
            }
        }
    }

    /// Shared post-damage step for attack and skill: victory processing
    /// preempts the enemy turn when the enemy has fallen.
    fn after_hit(&mut self, player: &mut Player, lines: &mut Vec<String>) -> TurnOutcome {
        if !self.enemy.is_defeated() {
            self.phase = BattlePhase::EnemyPending;
            return TurnOutcome::EnemyPending;
        }

        let exp = self.enemy.exp_reward();
        lines.push(format!("You defeated the {}!", self.enemy.name()));
        lines.push(format!("You gained {exp} experience!"));

        let leveled = player.grant_exp(exp);
        if leveled {
            lines.push("Level up!".to_string());
        }

        let final_boss = self.enemy.kind.is_final_boss();
        if final_boss {
            lines.push("You did it! The Demon King is defeated!".to_string());
            lines.push("Peace has returned to the Kingdom of Light!".to_string());
        }

        self.phase = BattlePhase::Over;
        (TurnOutcome::Victory { leveled, final_boss })
    }

    /// Resolve the scheduled enemy strike.
    ///
    /// Damage is uniform in `[5, 5 + attack - 1]`. If the player falls, the
    /// revival rule clamps hp to 1 and the battle force-ends.
    pub fn enemy_strike(
        &mut self,
        player: &mut Player,
        rng: &mut GameRng,
    ) -> (StrikeOutcome, Vec<String>) {
        if self.phase != BattlePhase::EnemyPending {
            return (StrikeOutcome::Continue, Vec::new());
        }

        let damage = ENEMY_DMG_BASE + rng.rn2(self.enemy.attack() as u32) as i32;
        player.take_damage(damage);

        let mut lines = vec![
            format!("{} {} attacks!", self.enemy.article(), self.enemy.name()),
            format!("You took {damage} damage!"),
        ];

        if player.is_felled() {
            player.revive();
            lines.push("You collapsed...".to_string());
            lines.push("But your friends cheered you back to your feet!".to_string());
            self.phase = BattlePhase::Over;
            return (StrikeOutcome::PlayerFelled, lines);
        }

        self.phase = BattlePhase::PlayerTurn;
        (StrikeOutcome::Continue, lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn battle(kind: EnemyKind) -> Battle {
        Battle::start(kind).0
    }

    #[test]
    fn entrance_message_names_the_enemy() {
        let (_, lines) = Battle::start(EnemyKind::Slime);
        assert_eq!(lines, vec!["A Slime appears!".to_string()]);
        let (_, lines) = Battle::start(EnemyKind::DemonKing);
        assert_eq!(lines, vec!["The Demon King appears!".to_string()]);
    }

    #[test]
    fn attack_consumes_turn_until_enemy_falls() {
        let mut b = battle(EnemyKind::DemonKing);
        let mut p = Player::default();
        let mut rng = GameRng::new(1);
        let (outcome, _) = b.player_turn(BattleAction::Attack, &mut p, &mut rng);
        // 150 hp cannot fall to a single 10..=24 hit.
        assert_eq!(outcome, TurnOutcome::EnemyPending);
        assert_eq!(b.phase, BattlePhase::EnemyPending);
    }

    #[test]
    fn victory_preempts_the_enemy_turn() {
        let mut b = battle(EnemyKind::Slime);
        b.enemy.hp = 1;
        let mut p = Player::default();
        let mut rng = GameRng::new(1);
        let (outcome, lines) = b.player_turn(BattleAction::Attack, &mut p, &mut rng);
        assert_eq!(
            outcome,
            TurnOutcome::Victory {
                leveled: false,
                final_boss: false
            }
        );
        assert_eq!(b.phase, BattlePhase::Over);
        assert!(lines.iter().any(|l| l == "You defeated the Slime!"));
        assert_eq!(p.exp, 15);
    }

    #[test]
    fn skill_without_mp_is_a_no_op_turn() {
        let mut b = battle(EnemyKind::Slime);
        let mut p = Player::default();
        p.mp = SKILL_MP_COST - 1;
        let mut rng = GameRng::new(1);
        let (outcome, lines) = b.player_turn(BattleAction::Skill, &mut p, &mut rng);
        assert_eq!(outcome, TurnOutcome::Rejected);
        assert_eq!(lines, vec!["Not enough MP!".to_string()]);
        // Still the player's turn and the enemy is untouched.
        assert_eq!(b.phase, BattlePhase::PlayerTurn);
        assert_eq!(b.enemy.hp, 30);
        assert_eq!(p.mp, SKILL_MP_COST - 1);
    }

    #[test]
    fn skill_spends_mp() {
        let mut b = battle(EnemyKind::DemonKing);
        let mut p = Player::default();
        let mut rng = GameRng::new(1);
        let (outcome, _) = b.player_turn(BattleAction::Skill, &mut p, &mut rng);
        assert_eq!(outcome, TurnOutcome::EnemyPending);
        assert_eq!(p.mp, 50 - SKILL_MP_COST);
    }

    #[test]
    fn item_heals_and_consumes_the_turn() {
        let mut b = battle(EnemyKind::Slime);
        let mut p = Player::default();
        p.hp = 50;
        let mut rng = GameRng::new(1);
        let (outcome, _) = b.player_turn(BattleAction::Item, &mut p, &mut rng);
        assert_eq!(outcome, TurnOutcome::EnemyPending);
        assert_eq!(p.hp, 70);
    }

    #[test]
    fn actions_outside_player_turn_are_ignored() {
        let mut b = battle(EnemyKind::Slime);
        b.phase = BattlePhase::EnemyPending;
        let mut p = Player::default();
        let mut rng = GameRng::new(1);
        let (outcome, lines) = b.player_turn(BattleAction::Attack, &mut p, &mut rng);
        assert_eq!(outcome, TurnOutcome::Rejected);
        assert!(lines.is_empty());
        assert_eq!(b.enemy.hp, 30);
    }

    #[test]
    fn revival_clamps_hp_to_one_and_ends_the_battle() {
        let mut b = battle(EnemyKind::Goblin);
        b.phase = BattlePhase::EnemyPending;
        let mut p = Player::default();
        p.hp = 1;
        let mut rng = GameRng::new(1);
        let (outcome, lines) = b.enemy_strike(&mut p, &mut rng);
        assert_eq!(outcome, StrikeOutcome::PlayerFelled);
        assert_eq!(p.hp, 1);
        assert_eq!(b.phase, BattlePhase::Over);
        assert!(lines.iter().any(|l| l == "You collapsed..."));
    }

    #[test]
    fn strike_outside_enemy_pending_is_ignored() {
        let mut b = battle(EnemyKind::Goblin);
        let mut p = Player::default();
        let mut rng = GameRng::new(1);
        let (outcome, lines) = b.enemy_strike(&mut p, &mut rng);
        assert_eq!(outcome, StrikeOutcome::Continue);
        assert!(lines.is_empty());
        assert_eq!(p.hp, 100);
    }

    #[test]
    fn boss_victory_reports_the_final_boss() {
        let mut b = battle(EnemyKind::DemonKing);
        b.enemy.hp = 1;
        let mut p = Player::default();
        let mut rng = GameRng::new(1);
        let (outcome, lines) = b.player_turn(BattleAction::Attack, &mut p, &mut rng);
        match outcome {
            TurnOutcome::Victory { leveled, final_boss } => {
                assert!(leveled); // 100 exp crosses the level-1 threshold
                assert!(final_boss);
            }
            other => panic!("expected victory, got {other:?}"),
        }
        assert!(lines.iter().any(|l| l.contains("Peace has returned")));
    }

    #[test]
    fn flee_rate_converges() {
        let mut rng = GameRng::new(2024);
        let mut successes = 0u32;
        const TRIALS: u32 = 10_000;
        for _ in 0..TRIALS {
            let mut b = battle(EnemyKind::Slime);
            let mut p = Player::default();
            let (outcome, _) = b.player_turn(BattleAction::Flee, &mut p, &mut rng);
            match outcome {
                TurnOutcome::Fled => {
                    successes += 1;
                    assert_eq!(b.phase, BattlePhase::Over);
                }
                TurnOutcome::EnemyPending => {
                    assert_eq!(b.phase, BattlePhase::EnemyPending);
                }
                other => panic!("unexpected flee outcome {other:?}"),
            }
        }
        let rate = f64::from(successes) / f64::from(TRIALS);
        assert!((rate - FLEE_CHANCE).abs() < 0.02, "rate was {rate}");
    }

    proptest! {
        #[test]
        fn attack_damage_stays_in_range(seed in any::<u64>()) {
            let mut b = battle(EnemyKind::DemonKing);
            let mut p = Player::default();
            let mut rng = GameRng::new(seed);
            b.player_turn(BattleAction::Attack, &mut p, &mut rng);
            let dealt = 150 - b.enemy.hp;
            prop_assert!((ATTACK_DMG_MIN..=ATTACK_DMG_MAX).contains(&dealt));
        }

        #[test]
        fn skill_damage_stays_in_range(seed in any::<u64>()) {
            let mut b = battle(EnemyKind::DemonKing);
            let mut p = Player::default();
            let mut rng = GameRng::new(seed);
            b.player_turn(BattleAction::Skill, &mut p, &mut rng);
            let dealt = 150 - b.enemy.hp;
            prop_assert!((SKILL_DMG_MIN..=SKILL_DMG_MAX).contains(&dealt));
        }

        #[test]
        fn enemy_damage_stays_in_range(seed in any::<u64>()) {
            let mut b = battle(EnemyKind::Goblin);
            b.phase = BattlePhase::EnemyPending;
            let mut p = Player::default();
            let mut rng = GameRng::new(seed);
            b.enemy_strike(&mut p, &mut rng);
            let taken = 100 - p.hp;
            let attack = EnemyKind::Goblin.archetype().attack;
            prop_assert!((ENEMY_DMG_BASE..=ENEMY_DMG_BASE + attack - 1).contains(&taken));
        }
    }
}
