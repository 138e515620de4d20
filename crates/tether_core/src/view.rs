//! First-person view frame

use glam::{Quat, Vec3};

/// Camera origin and orientation in world space.
///
/// Local +Z is forward, +X is right and +Y is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Eye position
    pub origin: Vec3,
    /// Camera rotation
    pub rotation: Quat,
}

impl View {
    /// Create a view
    pub fn new(origin: Vec3, rotation: Quat) -> Self {
        Self { origin, rotation }
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Unit right axis
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Unit up axis
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

impl Default for View {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}
