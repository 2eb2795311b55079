//! hk-tui: Terminal UI layer using ratatui
//!
//! Presentation only: renders session state, maps keys to abstract
//! commands, and hosts the fire-and-forget audio sink and autosave pump.

pub mod app;
pub mod audio;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::{App, UiMode};
pub use audio::{AudioSink, TracingAudio};
pub use theme::Theme;
