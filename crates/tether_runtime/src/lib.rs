//! # tether_runtime - Game Loop and Sandbox
//!
//! Wires the player, the weapons and the physics world together behind a
//! single tick scheduler.
//!
//! ## Example
//!
//! ```ignore
//! use tether_runtime::prelude::*;
//!
//! let config = GameConfig::load_or_default("tether.toml")?;
//! let world = PhysicsWorld::new(config.physics.clone())?;
//! let mut game = Game::new(world, config, Vec3::new(0.0, 2.0, 0.0))?;
//! game.spawn_target(Vec3::new(0.0, 1.0, 12.0), 50.0)?;
//!
//! loop {
//!     let report = game.tick(&input, dt, &mut hud, &mut sounds)?;
//! }
//! ```

pub mod config;
pub mod frame;
pub mod game;
pub mod hud;
pub mod input;
pub mod loadout;

pub mod prelude {
    pub use crate::config::{
        ConfigError, ConfigResult, GameConfig, HudConfig, WeaponOverrides, WeaponsConfig,
    };
    pub use crate::frame::FrameTiming;
    pub use crate::game::{Game, GameError, Result, TickReport};
    pub use crate::hud::{HudSink, HudText};
    pub use crate::input::GameInput;
    pub use crate::loadout::{Loadout, Slot};
    pub use glam::{Vec2, Vec3};
}

pub use prelude::*;
