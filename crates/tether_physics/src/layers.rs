//! Collision layers, query masks and entity tags

use serde::{Deserialize, Serialize};

/// A collision layer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionLayer(pub u32);

impl CollisionLayer {
    /// Default layer
    pub const DEFAULT: Self = Self(0);
    /// Player body
    pub const PLAYER: Self = Self(1);
    /// Enemy targets
    pub const ENEMIES: Self = Self(2);
    /// Walkable ground
    pub const GROUND: Self = Self(3);
    /// Surfaces the grapple can latch onto
    pub const GRAPPLE: Self = Self(4);
    /// Trigger/sensor volumes
    pub const TRIGGERS: Self = Self(5);
    /// Kill floor below the course
    pub const OUT_OF_BOUNDS: Self = Self(6);

    /// Create a custom layer
    pub const fn custom(id: u32) -> Self {
        Self(id)
    }

    /// Get the layer as a bitmask
    pub const fn as_mask(&self) -> u32 {
        1 << self.0
    }
}

impl Default for CollisionLayer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Set of layers a query is allowed to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Every layer
    pub const ALL: Self = Self(u32::MAX);
    /// No layer
    pub const NONE: Self = Self(0);

    /// Mask containing a single layer
    pub const fn only(layer: CollisionLayer) -> Self {
        Self(layer.as_mask())
    }

    /// Mask containing the given layers
    pub fn from_layers(layers: &[CollisionLayer]) -> Self {
        Self(layers.iter().fold(0u32, |acc, l| acc | l.as_mask()))
    }

    /// Add a layer
    pub const fn with(self, layer: CollisionLayer) -> Self {
        Self(self.0 | layer.as_mask())
    }

    /// Remove a layer
    pub const fn without(self, layer: CollisionLayer) -> Self {
        Self(self.0 & !layer.as_mask())
    }

    /// Whether the mask contains a layer
    pub const fn contains(&self, layer: CollisionLayer) -> bool {
        self.0 & layer.as_mask() != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Gameplay category of an entity, reported with hits and contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tag {
    /// No gameplay meaning
    #[default]
    Untagged,
    /// The player body
    Player,
    /// A damageable target
    Enemy,
    /// A checkpoint trigger
    Checkpoint,
    /// The out-of-bounds volume
    OutOfBounds,
}
