//! Player error types

use tether_physics::PhysicsError;
use thiserror::Error;

/// Player controller errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The player body is missing or a physics call failed
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// Invalid tuning values
    #[error("Invalid player configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
