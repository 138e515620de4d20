//! # tether_player - Rigidbody Player Controller
//!
//! First-person movement with a grapple, built on the narrow
//! [`PhysicsBackend`](tether_physics::PhysicsBackend) interface.
//!
//! ## Phases
//!
//! The host drives the controller in three phases per frame:
//!
//! 1. [`PlayerController::frame_update`] latches input, handles sprint and
//!    the jump buffer, and self-heals the grapple state.
//! 2. [`PlayerController::fixed_update`] runs once per fixed physics step:
//!    ground check, then the handlers of the current [`GrappleState`].
//! 3. [`PlayerController::late_update`] applies mouse look.
//!
//! Contacts drained from the physics world after each step go to
//! [`PlayerController::handle_contact`].
//!
//! ## Example
//!
//! ```ignore
//! use tether_player::prelude::*;
//!
//! let mut player = PlayerController::new(id, Vec3::new(0.0, 1.0, 0.0), PlayerConfig::default())?;
//! physics.spawn(player.body(), player.body_desc())?;
//!
//! player.frame_update(&input, dt);
//! let mut ctx = PlayerContext { physics: &mut physics, fov: &mut camera, sounds: &mut sounds };
//! player.fixed_update(&mut ctx, fixed_dt)?;
//! player.late_update();
//! ```

pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod grapple;
pub mod input;
pub mod movement;
pub mod respawn;

pub use camera::CameraRig;
pub use config::PlayerConfig;
pub use controller::{PlayerContext, PlayerController};
pub use error::{PlayerError, Result};
pub use grapple::{GrappleState, GrappleStateMachine, RopeVisual};
pub use input::PlayerInput;
pub use movement::MovementController;
pub use respawn::{Checkpoint, RespawnTracker};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::camera::CameraRig;
    pub use crate::config::PlayerConfig;
    pub use crate::controller::{PlayerContext, PlayerController};
    pub use crate::error::{PlayerError, Result};
    pub use crate::grapple::{GrappleState, RopeVisual};
    pub use crate::input::PlayerInput;
    pub use crate::respawn::Checkpoint;
}
