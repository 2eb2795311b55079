//! Fixed tuning constants for the field and the battle rules.

/// Field dimensions in world units
pub const FIELD_WIDTH: i32 = 400;
pub const FIELD_HEIGHT: i32 = 400;

/// Square character footprint; positions clamp so the sprite stays on the field
pub const SPRITE_SIZE: i32 = 40;

/// Distance covered by one movement step
pub const STEP_SIZE: i32 = 40;

/// Interaction reach when checking for nearby field events (Euclidean)
pub const TRIGGER_RADIUS: f64 = 50.0;

/// River band (inclusive on both edges)
pub const RIVER_Y_MIN: i32 = 200;
pub const RIVER_Y_MAX: i32 = 240;

/// Bridge gap across the river (inclusive)
pub const BRIDGE_X_MIN: i32 = 160;
pub const BRIDGE_X_MAX: i32 = 240;

/// Player starting state
pub const START_X: i32 = 200;
pub const START_Y: i32 = 250;
pub const START_HP: i32 = 100;
pub const START_MP: i32 = 50;

/// Player attack damage, inclusive range
pub const ATTACK_DMG_MIN: i32 = 10;
pub const ATTACK_DMG_MAX: i32 = 24;

/// Skill damage, inclusive range
pub const SKILL_DMG_MIN: i32 = 15;
pub const SKILL_DMG_MAX: i32 = 34;
pub const SKILL_MP_COST: i32 = 5;

/// Battle item heal amount
pub const ITEM_HEAL: i32 = 20;

/// Enemy strike damage floor; the ceiling is floor + attack - 1
pub const ENEMY_DMG_BASE: i32 = 5;

/// Probability that fleeing a battle succeeds
pub const FLEE_CHANCE: f64 = 0.7;

/// Probability of a random encounter per successful field step
pub const ENCOUNTER_CHANCE: f64 = 0.05;

/// Experience threshold factor: a victory at level L levels up at L * 100 exp
pub const EXP_PER_LEVEL: u32 = 100;
pub const LEVEL_HP_GAIN: i32 = 20;
pub const LEVEL_MP_GAIN: i32 = 10;

/// MP restored by visiting the shop
pub const SHOP_MP_RESTORE: i32 = 15;

/// Presentation pacing delays, on the session's logical millisecond clock
pub const ENEMY_STRIKE_DELAY_MS: u64 = 2000;
pub const BATTLE_CLEANUP_DELAY_MS: u64 = 1000;
pub const GAME_COMPLETE_DELAY_MS: u64 = 3000;
pub const TITLE_RESET_DELAY_MS: u64 = 8000;

/// Autosave cadence, pumped by the frontend
pub const AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Rolling cheat buffer resets once it grows past this
pub const CHEAT_BUFFER_CAP: usize = 20;
