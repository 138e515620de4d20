//! Narrow views of the player and camera used across crates

use glam::Vec3;

/// Receives camera field-of-view requests.
///
/// Implementors must converge toward the requested value over time rather
/// than snapping to it.
pub trait FovTarget {
    /// Request a new target field of view in degrees
    fn set_target_fov(&mut self, fov: f32);
}

/// The part of the player controller that weapons are allowed to touch
pub trait PlayerMotor {
    /// Whether the last ground check found ground under the player
    fn is_grounded(&self) -> bool;

    /// Override the pending movement direction
    fn set_move_direction(&mut self, direction: Vec3);

    /// Override the airborne speed cap
    fn set_max_air_speed(&mut self, speed: f32);
}
