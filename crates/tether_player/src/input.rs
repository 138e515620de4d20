//! Per-frame player input

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Raw player input sampled once per frame.
///
/// Button fields are edges: true only on the frame the button went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Strafe (x, +right) and forward (y, +forward) axes in [-1, 1]
    pub movement: Vec2,
    /// Mouse delta (x, +right) and (y, +up)
    pub look: Vec2,
    /// Sprint held
    pub sprint: bool,
    /// Jump pressed
    pub jump: bool,
    /// Grapple pressed
    pub grapple: bool,
}

impl PlayerInput {
    /// Input that only moves
    pub fn moving(x: f32, y: f32) -> Self {
        Self {
            movement: Vec2::new(x, y),
            ..Default::default()
        }
    }

    /// Local-space move intent, normalized
    pub fn move_intent(&self) -> Vec3 {
        Vec3::new(self.movement.x, 0.0, self.movement.y).normalize_or_zero()
    }
}
