//! # tether_core - Shared Gameplay Primitives
//!
//! The seams between the gameplay crates. Nothing in here owns game state;
//! it only names the collaborators that components receive at construction
//! or per call, so each component can be driven by fakes in tests.
//!
//! - [`EntityId`] identifies anything the physics world knows about
//! - [`SoundSink`] receives one-shot sound cues
//! - [`KillCounter`] receives enemy kills
//! - [`FovTarget`] receives camera field-of-view requests
//! - [`PlayerMotor`] is the narrow view of the player that weapons use
//! - [`View`] is the camera frame weapons and the grapple aim along

pub mod audio;
pub mod id;
pub mod motor;
pub mod score;
pub mod view;

pub use audio::*;
pub use id::*;
pub use motor::*;
pub use score::*;
pub use view::*;

pub use glam::{Quat, Vec2, Vec3};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::audio::{SoundCue, SoundSink};
    pub use crate::id::{EntityId, IdGenerator};
    pub use crate::motor::{FovTarget, PlayerMotor};
    pub use crate::score::{KillCounter, KillTally};
    pub use crate::view::View;
    pub use glam::{Quat, Vec2, Vec3};
}
