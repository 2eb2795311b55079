//! Audio sink for the core's fire-and-forget cue queue.
//!
//! Playback can never fail the game logic: a sink that cannot play simply
//! records the request and moves on.

use hk_core::session::{AudioSignal, SoundCue};

/// Consumer of drained audio signals. Implementations must be infallible
/// from the caller's point of view.
pub trait AudioSink {
    fn handle(&mut self, signal: AudioSignal);

    /// Current volume as a 0-100 percentage
    fn volume(&self) -> u8 {
        100
    }

    /// Sinks without volume control ignore this
    fn set_volume(&mut self, _volume: u8) {}
}

/// Default sink: no audio device, logs each request at debug level.
///
/// Keeps the volume setting so a real backend can be swapped in without
/// touching the app.
#[derive(Debug)]
pub struct TracingAudio {
    volume: u8,
}

impl TracingAudio {
    /// Volume is a 0-100 percentage
    pub fn new(volume: u8) -> Self {
        Self {
            volume: volume.min(100),
        }
    }

}

impl AudioSink for TracingAudio {
    fn volume(&self) -> u8 {
        self.volume
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }

    fn handle(&mut self, signal: AudioSignal) {
        match signal {
            AudioSignal::FieldTheme => tracing::debug!(volume = self.volume, "bgm: field theme"),
            AudioSignal::BattleTheme => tracing::debug!(volume = self.volume, "bgm: battle theme"),
            AudioSignal::Silence => tracing::debug!("bgm: stop"),
            AudioSignal::Cue(SoundCue::Move) => tracing::debug!("cue: move"),
            AudioSignal::Cue(SoundCue::Attack) => tracing::debug!("cue: attack"),
            AudioSignal::Cue(SoundCue::Victory) => tracing::debug!("cue: victory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_clamps_to_percentage() {
        let mut sink = TracingAudio::new(200);
        assert_eq!(AudioSink::volume(&sink), 100);
        sink.set_volume(42);
        assert_eq!(AudioSink::volume(&sink), 42);
    }
}
