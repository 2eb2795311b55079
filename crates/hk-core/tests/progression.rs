//! Progression across several battles: exp accumulates between victories
//! and the level-up threshold is evaluated once per victory.

use hk_core::GameRng;
use hk_core::battle::{Battle, BattleAction, TurnOutcome};
use hk_core::enemy::EnemyKind;
use hk_core::player::Player;

/// Win one battle by whittling the enemy down to 1 hp first, so the final
/// blow lands regardless of the damage roll.
fn win_battle(kind: EnemyKind, player: &mut Player, rng: &mut GameRng) -> TurnOutcome {
    let (mut battle, _) = Battle::start(kind);
    battle.enemy.hp = 1;
    let (outcome, _) = battle.player_turn(BattleAction::Attack, player, rng);
    outcome
}

#[test]
fn two_slimes_and_a_goblin_leave_level_one() {
    let mut player = Player::default();
    let mut rng = GameRng::new(11);

    for kind in [EnemyKind::Slime, EnemyKind::Slime, EnemyKind::Goblin] {
        let outcome = win_battle(kind, &mut player, &mut rng);
        assert!(matches!(
            outcome,
            TurnOutcome::Victory { leveled: false, .. }
        ));
    }

    // 15 + 15 + 25 = 55, short of the level-1 threshold of 100.
    assert_eq!(player.level, 1);
    assert_eq!(player.exp, 55);
}

#[test]
fn the_victory_that_crosses_the_threshold_levels_exactly_once() {
    let mut player = Player::default();
    let mut rng = GameRng::new(11);

    for kind in [EnemyKind::Slime, EnemyKind::Slime, EnemyKind::Goblin] {
        win_battle(kind, &mut player, &mut rng);
    }
    assert_eq!(player.exp, 55);

    // The boss reward (100) takes the total to 155: one level-up, exp back
    // to zero, no cascade to the level-2 threshold.
    let outcome = win_battle(EnemyKind::DemonKing, &mut player, &mut rng);
    assert!(matches!(
        outcome,
        TurnOutcome::Victory {
            leveled: true,
            final_boss: true
        }
    ));
    assert_eq!(player.level, 2);
    assert_eq!(player.exp, 0);
    assert_eq!(player.hp, player.max_hp);
    assert_eq!(player.mp, player.max_mp);
}
