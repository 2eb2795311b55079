//! hk-core: Core game logic for Hikari
//!
//! This crate contains all game logic with no I/O dependencies.
//! The terminal frontend and the save system consume it; rendering, audio
//! playback, raw input, and persistence live outside.

pub mod battle;
#[cfg(feature = "cheats")]
pub mod cheat;
pub mod enemy;
pub mod event;
pub mod map;
pub mod player;
pub mod session;

mod consts;
mod rng;

pub use consts::*;
pub use rng::GameRng;
