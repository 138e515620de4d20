//! Tether Physics - narrow physics interface with a Rapier 3D world
//!
//! Gameplay crates talk to physics only through [`PhysicsBackend`]. The
//! production implementation is [`PhysicsWorld`]; tests use
//! `MockPhysics` (feature `mock`).
//!
//! # Architecture
//!
//! ```text
//!   PlayerController   WeaponHitscan   Game
//!          │                 │           │
//!          └────────┬────────┴───────────┘
//!                   ▼
//!           dyn PhysicsBackend
//!            ┌──────┴───────┐
//!            ▼              ▼
//!      PhysicsWorld    MockPhysics
//!       (rapier3d)     (tests only)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tether_physics::prelude::*;
//!
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default())?;
//! physics.spawn(
//!     EntityId::new(1),
//!     BodyDesc::fixed(Shape::cuboid(50.0, 0.5, 50.0)).with_layer(CollisionLayer::GROUND),
//! )?;
//!
//! let grounded = physics.sphere_overlap(
//!     Vec3::new(0.0, 0.55, 0.0),
//!     0.1,
//!     LayerMask::only(CollisionLayer::GROUND),
//! );
//! physics.step(0.02);
//! ```

pub mod backend;
pub mod body;
pub mod config;
pub mod error;
pub mod events;
pub mod layers;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod query;
pub mod world;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::backend::PhysicsBackend;
    pub use crate::body::{BodyDesc, BodyKind, Shape};
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::events::{ContactEvent, ContactKind, ContactParty};
    pub use crate::layers::{CollisionLayer, LayerMask, Tag};
    #[cfg(any(test, feature = "mock"))]
    pub use crate::mock::MockPhysics;
    pub use crate::query::RaycastHit;
    pub use crate::world::PhysicsWorld;
    pub use glam::Vec3;
    pub use tether_core::EntityId;
}

pub use prelude::*;
