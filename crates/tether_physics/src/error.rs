//! Error types for the physics layer

use tether_core::EntityId;
use thiserror::Error;

/// Physics integration errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// No rigid body registered for the entity
    #[error("Rigid body not found for entity {0}")]
    BodyNotFound(EntityId),

    /// The entity already has a body
    #[error("Entity {0} already has a physics body")]
    DuplicateEntity(EntityId),

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
