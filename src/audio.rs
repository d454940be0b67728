//! Audio cues
//!
//! The simulation only emits `GameEvent`s. This module turns them into
//! sound and music cues and hands those to an `AudioSink`; the actual mixer
//! lives outside the crate.

use crate::sim::{GameEvent, ItemKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Gem collected
    Gem,
}

/// One instruction for the audio backend
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCue {
    Play { effect: SoundEffect, volume: f32 },
    /// Loop a music track from the start
    StartMusic { track: String, volume: f32 },
    StopMusic,
}

/// Audio backend seam
pub trait AudioSink {
    fn cue(&mut self, cue: AudioCue);
}

/// Sink that only logs; used by the headless runner
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn cue(&mut self, cue: AudioCue) {
        log::debug!("audio: {:?}", cue);
    }
}

/// Sink that records cues, for tests and replays
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub cues: Vec<AudioCue>,
}

impl AudioSink for RecordingSink {
    fn cue(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}

/// Map a simulation event to its sound effect, if it has one
pub fn effect_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Jumped => Some(SoundEffect::Jump),
        GameEvent::ItemCollected {
            kind: ItemKind::Gem,
            ..
        } => Some(SoundEffect::Gem),
        _ => None,
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Forward one frame's events; `music` is the current level's track
    pub fn handle(&mut self, events: &[GameEvent], music: Option<&str>) {
        for event in events {
            if let Some(effect) = effect_for(event) {
                let volume = self.effective_volume(self.sfx_volume);
                if volume > 0.0 {
                    self.sink.cue(AudioCue::Play { effect, volume });
                }
                continue;
            }

            match event {
                GameEvent::MusicStarted => {
                    if let Some(track) = music {
                        let volume = self.effective_volume(self.music_volume);
                        self.sink.cue(AudioCue::StartMusic {
                            track: track.to_string(),
                            volume,
                        });
                    }
                }
                GameEvent::MusicStopped => self.sink.cue(AudioCue::StopMusic),
                _ => {}
            }
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
