//! Sound cue dispatch
//!
//! Playback lives outside the gameplay crates. Components only name the cue
//! they want played once.

use serde::{Deserialize, Serialize};

/// One-shot sound cues raised by gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Rifle discharge
    RifleShot,
    /// Pistol discharge
    PistolShot,
    /// Shotgun discharge
    ShotgunShot,
    /// Grapple hook latched onto a surface
    Grapple,
}

impl SoundCue {
    /// Stable name of the cue, as used by audio banks
    pub fn name(&self) -> &'static str {
        match self {
            Self::RifleShot => "RifleShot",
            Self::PistolShot => "PistolShot",
            Self::ShotgunShot => "ShotgunShot",
            Self::Grapple => "Grapple",
        }
    }
}

/// Receives sound cues
pub trait SoundSink {
    /// Play a cue once
    fn play(&mut self, cue: SoundCue);
}

/// Collects cues in order; the host drains it after each tick
impl SoundSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl SoundSink for Silence {
    fn play(&mut self, _cue: SoundCue) {}
}
