//! Physics query results

use crate::layers::Tag;
use glam::{Quat, Vec3};
use tether_core::EntityId;

/// Result of a raycast query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The entity that was hit
    pub entity: EntityId,
    /// Hit point in world space
    pub point: Vec3,
    /// Surface normal at hit point
    pub normal: Vec3,
    /// Distance from ray origin
    pub distance: f32,
    /// Gameplay tag of the entity
    pub tag: Tag,
    /// Whether the entity has a dynamic body that reacts to impulses
    pub dynamic: bool,
}

impl RaycastHit {
    /// Rotation that points +Z along the surface normal, for spawning
    /// effects flush with the hit surface
    pub fn surface_rotation(&self) -> Quat {
        let normal = self.normal.normalize_or_zero();
        if normal == Vec3::ZERO {
            return Quat::IDENTITY;
        }
        Quat::from_rotation_arc(Vec3::Z, normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_surface_rotation_faces_normal() {
        let hit = RaycastHit {
            entity: EntityId::new(1),
            point: Vec3::ZERO,
            normal: Vec3::Y,
            distance: 1.0,
            tag: Tag::Untagged,
            dynamic: false,
        };
        let facing = hit.surface_rotation() * Vec3::Z;
        assert_relative_eq!(facing.y, 1.0, epsilon = 1e-5);
    }
}
