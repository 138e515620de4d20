//! The narrow interface gameplay code consumes

use crate::body::BodyDesc;
use crate::error::Result;
use crate::events::ContactEvent;
use crate::layers::LayerMask;
use crate::query::RaycastHit;
use glam::Vec3;
use tether_core::EntityId;

/// Everything the gameplay crates need from a physics engine.
///
/// Bodies are addressed by [`EntityId`]. Operations on an unknown entity
/// return [`PhysicsError::BodyNotFound`](crate::error::PhysicsError::BodyNotFound);
/// queries never fail, a miss is `None`/`false`.
pub trait PhysicsBackend {
    /// Create a body with a single collider for `entity`
    fn spawn(&mut self, entity: EntityId, desc: BodyDesc) -> Result<()>;

    /// Remove the body of `entity`, if any
    fn remove_entity(&mut self, entity: EntityId);

    /// Whether `entity` has a body
    fn contains(&self, entity: EntityId) -> bool;

    /// World position of the body
    fn position(&self, entity: EntityId) -> Result<Vec3>;

    /// Teleport the body
    fn set_position(&mut self, entity: EntityId, position: Vec3) -> Result<()>;

    /// Linear velocity of the body
    fn velocity(&self, entity: EntityId) -> Result<Vec3>;

    /// Overwrite the linear velocity of the body
    fn set_velocity(&mut self, entity: EntityId, velocity: Vec3) -> Result<()>;

    /// Apply an instantaneous impulse (mass-scaled velocity change)
    fn apply_impulse(&mut self, entity: EntityId, impulse: Vec3) -> Result<()>;

    /// Accelerate the body during the next step, independent of its mass
    fn add_acceleration(&mut self, entity: EntityId, acceleration: Vec3) -> Result<()>;

    /// Cast a ray and return the closest solid hit on a layer in `mask`
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit>;

    /// Whether a sphere overlaps any solid collider on a layer in `mask`
    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;

    /// Advance the simulation by exactly one step of `dt` seconds
    fn step(&mut self, dt: f32);

    /// Take the contact notifications produced since the last drain
    fn drain_contacts(&mut self) -> Vec<ContactEvent>;
}
