//! The session controller: screen/mode transitions, command routing, the
//! modal message queue, and timed presentation pacing.

use serde::{Deserialize, Serialize};

use crate::battle::{Battle, BattleAction, BattlePhase, StrikeOutcome, TurnOutcome};
#[cfg(feature = "cheats")]
use crate::cheat::{CheatCommand, CheatRecognizer};
use crate::consts::{
    BATTLE_CLEANUP_DELAY_MS, ENCOUNTER_CHANCE, ENEMY_STRIKE_DELAY_MS, GAME_COMPLETE_DELAY_MS,
    STEP_SIZE, TITLE_RESET_DELAY_MS,
};
use crate::enemy::EnemyKind;
use crate::event::{self, EventOutcome};
use crate::map::WorldMap;
use crate::player::{Direction, Player, Position};
use crate::rng::GameRng;

const OPENING: &[&str] = &[
    "One day, in the middle of class...",
    "Your tablet began to glow!",
    "You were whisked away to another world!",
    "Your adventure begins!",
];

const RIVER_BLOCKED: &[&str] = &["You cannot cross the river!", "Look for a bridge."];

const ENDING: &[&str] = &[
    "You did it! The Demon King is defeated!",
    "Peace has returned to the Kingdom of Light!",
    "But the most precious thing of all...",
    "...was the friendship we shared!",
    "~ The End ~",
    "Thank you for playing!",
];

/// Current top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Title,
    Field,
}

/// Abstract input fed to the session; concrete key bindings are a
/// frontend concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Check for nearby field events / advance the message window
    Interact,
    /// Title-screen confirm / advance the message window
    Confirm,
    Attack,
    Skill,
    Item,
    Flee,
}

/// Sound effect cues, fire-and-forget for the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Move,
    Attack,
    Victory,
}

/// Audio requests drained by the frontend; playback can never fail the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSignal {
    FieldTheme,
    BattleTheme,
    Silence,
    Cue(SoundCue),
}

/// What a pending timed transition will do when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Resolve the scheduled enemy strike
    EnemyStrike,
    /// Battle presentation is torn down; field theme resumes
    BattleCleanup,
    /// Show the game-completion narration
    GameComplete,
    /// Reset the player and return to the title screen
    TitleReset,
}

/// A cancellable timed transition on the session's logical clock.
///
/// Exactly one may be armed at a time; arming another replaces it, which is
/// what cancels a stale enemy strike when a battle ends early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub fire_at_ms: u64,
    pub kind: TransitionKind,
}

/// Session options
#[derive(Debug, Clone, Copy)]
pub struct Flags {
    /// Roll for random field encounters after each successful step
    pub random_encounters: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            random_encounters: true,
        }
    }
}

/// The single owned aggregate of game state.
///
/// All mutation funnels through `dispatch` (player commands) and `advance`
/// (the logical clock); the frontend only reads.
#[derive(Debug)]
pub struct Session {
    map: WorldMap,
    player: Player,
    rng: GameRng,
    pub flags: Flags,

    screen: Screen,
    battle: Option<Battle>,

    messages: Vec<String>,
    cursor: usize,
    history: Vec<String>,

    clock_ms: u64,
    pending: Option<PendingTransition>,

    audio: Vec<AudioSignal>,

    #[cfg(feature = "cheats")]
    cheats: CheatRecognizer,
}

impl Session {
    pub fn new(player: Player, rng: GameRng) -> Self {
        Self {
            map: WorldMap::standard(),
            player,
            rng,
            flags: Flags::default(),
            screen: Screen::Title,
            battle: None,
            messages: Vec::new(),
            cursor: 0,
            history: Vec::new(),
            clock_ms: 0,
            pending: None,
            audio: Vec::new(),
            #[cfg(feature = "cheats")]
            cheats: CheatRecognizer::new(),
        }
    }

    // ------------------------------------------------------------------
    // Read access for the frontend
    // ------------------------------------------------------------------

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player access for the settings surface (rename, variant)
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn in_battle(&self) -> bool {
        self.battle.is_some()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// The line the message window is currently showing
    pub fn current_message(&self) -> Option<&str> {
        self.messages.get(self.cursor).map(String::as_str)
    }

    /// The modal message window is open; movement and battle actions are
    /// suppressed until the queue drains.
    pub fn message_open(&self) -> bool {
        self.cursor < self.messages.len()
    }

    /// Drain the audio cue queue
    pub fn take_audio(&mut self) -> Vec<AudioSignal> {
        core::mem::take(&mut self.audio)
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Route one abstract command based on the current screen, battle flag,
    /// and message modality. Invalid input is silently ignored.
    pub fn dispatch(&mut self, cmd: Command) {
        if self.message_open() {
            if matches!(cmd, Command::Confirm | Command::Interact) {
                self.advance_message();
            }
            return;
        }

        match self.screen {
            Screen::Title => {
                if matches!(cmd, Command::Confirm) {
                    self.start_game();
                }
            }
            Screen::Field => {
                if self.in_battle() {
                    match cmd {
                        Command::Attack => self.battle_action(BattleAction::Attack),
                        Command::Skill => self.battle_action(BattleAction::Skill),
                        Command::Item => self.battle_action(BattleAction::Item),
                        Command::Flee => self.battle_action(BattleAction::Flee),
                        _ => {}
                    }
                } else {
                    match cmd {
                        Command::Move(dir) => self.step(dir),
                        Command::Interact | Command::Confirm => self.check_events(),
                        _ => {}
                    }
                }
            }
        }
    }

    /// Step the message window forward; returns the newly current line, or
    /// `None` once the queue is exhausted (the window closes).
    pub fn advance_message(&mut self) -> Option<&str> {
        if self.cursor < self.messages.len() {
            self.cursor += 1;
        }
        if self.cursor >= self.messages.len() {
            self.messages.clear();
            self.cursor = 0;
            return None;
        }
        self.messages.get(self.cursor).map(String::as_str)
    }

    /// Feed one typed character to the hidden developer-command recognizer.
    ///
    /// Kept apart from `dispatch`: normal routing never sees these.
    #[cfg(feature = "cheats")]
    pub fn type_char(&mut self, c: char) {
        if let Some(cmd) = self.cheats.push(c) {
            self.apply_cheat(cmd);
        }
    }

    // ------------------------------------------------------------------
    // The logical clock
    // ------------------------------------------------------------------

    /// Advance the logical clock and fire any due timed transition.
    ///
    /// Chained transitions (completion -> title reset) fire in the same call
    /// when a large step covers both.
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.clock_ms += elapsed_ms;
        loop {
            let due = match self.pending {
                Some(t) if t.fire_at_ms <= self.clock_ms => self.pending.take().unwrap(),
                _ => break,
            };
            self.fire(due.kind);
        }
    }

    fn arm(&mut self, kind: TransitionKind, delay_ms: u64) {
        self.pending = Some(PendingTransition {
            fire_at_ms: self.clock_ms + delay_ms,
            kind,
        });
    }

    fn fire(&mut self, kind: TransitionKind) {
        match kind {
            TransitionKind::EnemyStrike => {
                // The slot is cancelled whenever a battle ends, so an armed
                // strike always has a live battle; the guard is the same
                // state-gating the engine applies everywhere.
                if let Some(battle) = self.battle.as_mut() {
                    let (outcome, lines) = battle.enemy_strike(&mut self.player, &mut self.rng);
                    self.show(lines);
                    if outcome == StrikeOutcome::PlayerFelled {
                        self.end_battle(false);
                    }
                }
            }
            TransitionKind::BattleCleanup => {
                self.audio.push(AudioSignal::FieldTheme);
            }
            TransitionKind::GameComplete => {
                self.audio.push(AudioSignal::FieldTheme);
                self.game_complete();
            }
            TransitionKind::TitleReset => {
                self.player.reset_for_new_game();
                self.screen = Screen::Title;
                // Any un-paged ending lines die with the game screen.
                self.messages.clear();
                self.cursor = 0;
                self.audio.push(AudioSignal::Silence);
            }
        }
    }

    // ------------------------------------------------------------------
    // Field
    // ------------------------------------------------------------------

    fn start_game(&mut self) {
        self.screen = Screen::Field;
        self.audio.push(AudioSignal::FieldTheme);
        self.show_static(OPENING);
    }

    fn step(&mut self, dir: Direction) {
        self.player.facing = dir;
        let (dx, dy) = dir.delta();
        let target = WorldMap::clamp(Position::new(
            self.player.pos.x + dx * STEP_SIZE,
            self.player.pos.y + dy * STEP_SIZE,
        ));
        if self.map.is_blocked(target) {
            self.show_static(RIVER_BLOCKED);
            return;
        }
        self.player.pos = target;
        self.audio.push(AudioSignal::Cue(SoundCue::Move));

        if self.flags.random_encounters && self.rng.chance(ENCOUNTER_CHANCE) {
            let kind = EnemyKind::random_encounter(&mut self.rng);
            self.start_battle(kind);
        }
    }

    fn check_events(&mut self) {
        for idx in self.map.events_near(self.player.pos) {
            let (outcome, lines) = event::trigger(self.map.event_mut(idx), &mut self.player);
            self.show(lines);
            if let EventOutcome::StartBattle(kind) = outcome {
                self.start_battle(kind);
                break;
            }
        }
    }

    // ------------------------------------------------------------------
    // Battle
    // ------------------------------------------------------------------

    fn start_battle(&mut self, kind: EnemyKind) {
        self.pending = None;
        let (battle, lines) = Battle::start(kind);
        self.battle = Some(battle);
        self.show(lines);
        self.audio.push(AudioSignal::BattleTheme);
    }

    fn battle_action(&mut self, action: BattleAction) {
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        if battle.phase != BattlePhase::PlayerTurn {
            return;
        }

        let (outcome, lines) = battle.player_turn(action, &mut self.player, &mut self.rng);
        self.show(lines);

        if matches!(action, BattleAction::Attack | BattleAction::Skill)
            && outcome != TurnOutcome::Rejected
        {
            self.audio.push(AudioSignal::Cue(SoundCue::Attack));
        }

        match outcome {
            TurnOutcome::EnemyPending => {
                self.arm(TransitionKind::EnemyStrike, ENEMY_STRIKE_DELAY_MS);
            }
            TurnOutcome::Victory { leveled, final_boss } => {
                if leveled {
                    self.audio.push(AudioSignal::Cue(SoundCue::Victory));
                }
                self.end_battle(final_boss);
            }
            TurnOutcome::Fled => self.end_battle(false),
            TurnOutcome::Rejected => {}
        }
    }

    /// Clear the encounter and schedule what follows it. Replacing the
    /// pending slot here is what cancels a stale enemy strike.
    fn end_battle(&mut self, final_boss: bool) {
        self.battle = None;
        if final_boss {
            self.arm(TransitionKind::GameComplete, GAME_COMPLETE_DELAY_MS);
        } else {
            self.arm(TransitionKind::BattleCleanup, BATTLE_CLEANUP_DELAY_MS);
        }
    }

    fn game_complete(&mut self) {
        self.show_static(ENDING);
        self.arm(TransitionKind::TitleReset, TITLE_RESET_DELAY_MS);
    }

    #[cfg(feature = "cheats")]
    fn apply_cheat(&mut self, cmd: CheatCommand) {
        match cmd {
            CheatCommand::Boss => {
                if self.screen == Screen::Field && !self.in_battle() {
                    self.start_battle(EnemyKind::DemonKing);
                }
            }
            CheatCommand::Heal => self.player.full_restore(),
            CheatCommand::Win => {
                if self.screen == Screen::Field {
                    self.battle = None;
                    self.game_complete();
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    fn show(&mut self, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        if !self.message_open() {
            self.messages.clear();
            self.cursor = 0;
        }
        for line in lines {
            self.history.push(line.clone());
            self.messages.push(line);
        }
    }

    fn show_static(&mut self, lines: &[&str]) {
        self.show(lines.iter().map(|l| (*l).to_string()).collect());
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Player::default(), GameRng::from_entropy())
    }
}
