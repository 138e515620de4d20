//! Body descriptions used to populate a physics world

use crate::layers::{CollisionLayer, Tag};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Type of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// Never moves, infinite mass
    Static,
    /// Fully simulated
    #[default]
    Dynamic,
    /// Moved by user code, pushes dynamic bodies
    Kinematic,
}

/// Collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Sphere
    Sphere { radius: f32 },
    /// Axis-aligned box
    Box { half_extents: Vec3 },
    /// Capsule along the Y axis
    CapsuleY { half_height: f32, radius: f32 },
}

impl Shape {
    /// Create a sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Create a box shape
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Box {
            half_extents: Vec3::new(hx, hy, hz),
        }
    }

    /// Create a Y capsule shape
    pub fn capsule_y(half_height: f32, radius: f32) -> Self {
        Self::CapsuleY { half_height, radius }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::Sphere { radius: 0.5 }
    }
}

/// Description of a body and its single collider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Type of rigid body
    pub kind: BodyKind,
    /// Collision shape
    pub shape: Shape,
    /// Initial position
    pub position: Vec3,
    /// Gameplay tag reported with hits and contacts
    pub tag: Tag,
    /// Collision layer used by query masks
    pub layer: CollisionLayer,
    /// Sensor colliders report triggers instead of colliding
    pub sensor: bool,
    /// Mass (if 0, calculated from the collider)
    pub mass: f32,
    /// Keep the body upright
    pub lock_rotations: bool,
    /// Gravity scale (0 = no gravity, 1 = normal)
    pub gravity_scale: f32,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            kind: BodyKind::Dynamic,
            shape: Shape::default(),
            position: Vec3::ZERO,
            tag: Tag::Untagged,
            layer: CollisionLayer::DEFAULT,
            sensor: false,
            mass: 0.0,
            lock_rotations: false,
            gravity_scale: 1.0,
        }
    }
}

impl BodyDesc {
    /// Create a static body description
    pub fn fixed(shape: Shape) -> Self {
        Self {
            kind: BodyKind::Static,
            shape,
            ..Default::default()
        }
    }

    /// Create a dynamic body description
    pub fn dynamic(shape: Shape) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            shape,
            ..Default::default()
        }
    }

    /// Create a static sensor volume
    pub fn sensor(shape: Shape) -> Self {
        Self {
            kind: BodyKind::Static,
            shape,
            sensor: true,
            layer: CollisionLayer::TRIGGERS,
            ..Default::default()
        }
    }

    /// Upright dynamic capsule for the player
    pub fn player(position: Vec3) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            shape: Shape::capsule_y(0.5, 0.5),
            position,
            tag: Tag::Player,
            layer: CollisionLayer::PLAYER,
            mass: 1.0,
            lock_rotations: true,
            ..Default::default()
        }
    }

    /// Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set tag
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    /// Set collision layer
    pub fn with_layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Set mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set gravity scale
    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }
}
