//! Hidden developer commands: a rolling-buffer recognizer over typed
//! characters, kept apart from normal command routing.

use crate::consts::CHEAT_BUFFER_CAP;

/// Privileged developer actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheatCommand {
    /// Force-start the final battle
    Boss,
    /// Fully restore hp and mp
    Heal,
    /// Force the game-completion sequence
    Win,
}

const TRIGGERS: [(&str, CheatCommand); 3] = [
    ("boss", CheatCommand::Boss),
    ("heal", CheatCommand::Heal),
    ("win", CheatCommand::Win),
];

/// Rolling buffer of recently typed characters
#[derive(Debug, Clone, Default)]
pub struct CheatRecognizer {
    buf: String,
}

impl CheatRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one typed character; returns a command when a trigger substring
    /// appears in the buffer. The buffer clears on a match and resets when
    /// it grows past the cap.
    pub fn push(&mut self, c: char) -> Option<CheatCommand> {
        self.buf.push(c);
        for (pattern, command) in TRIGGERS {
            if self.buf.contains(pattern) {
                self.buf.clear();
                return Some(command);
            }
        }
        if self.buf.len() > CHEAT_BUFFER_CAP {
            self.buf.clear();
        }
        None
    }
}
