//! Sound cue dispatch
//!
//! The simulation only names cues; turning them into sound is the host's
//! job. `AudioManager` applies volume and mute, then hands audible cues to a
//! [`CueSink`].

use crate::settings::Settings;
use crate::sim::SoundCue;

/// Something that can play a cue at a given volume
pub trait CueSink {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Sink that writes cues to the log
#[derive(Debug, Default)]
pub struct LogSink;

impl CueSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("cue {:?} at {:.2}", cue, volume);
    }
}

/// Sink that remembers what it was asked to play
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<(SoundCue, f32)>,
}

impl CueSink for RecordingSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        self.played.push((cue, volume));
    }
}

/// Audio manager for the game
pub struct AudioManager<S: CueSink = LogSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager<LogSink> {
    fn default() -> Self {
        Self::new(LogSink)
    }
}

impl<S: CueSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volume and mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a single cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }

    /// Play every cue a frame produced, in order
    pub fn play_all(&mut self, cues: &[SoundCue]) {
        for &cue in cues {
            self.play(cue);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
