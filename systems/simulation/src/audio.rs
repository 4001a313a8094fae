use medieval_rpg_core::SoundCue;
use thiserror::Error;

/// Failure reported by an audio backend.
#[derive(Debug, Error)]
#[error("could not play `{cue}`: {reason}")]
pub struct AudioError {
    cue: &'static str,
    reason: String,
}

impl AudioError {
    /// Creates an error for the provided cue.
    #[must_use]
    pub fn new(cue: SoundCue, reason: impl Into<String>) -> Self {
        Self {
            cue: cue.name(),
            reason: reason.into(),
        }
    }
}

/// Destination for the sound cues emitted by the world.
pub trait AudioSink {
    /// Plays the provided cue.
    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError>;
}

/// Audio sink that discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silence;

impl AudioSink for Silence {
    fn play(&mut self, _cue: SoundCue) -> Result<(), AudioError> {
        Ok(())
    }
}
