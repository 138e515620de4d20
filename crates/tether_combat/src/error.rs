//! Combat error types

use tether_physics::PhysicsError;
use thiserror::Error;

/// Combat errors
#[derive(Debug, Error)]
pub enum CombatError {
    /// A body touched by a shot or launch is missing
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),
}

/// Result type for combat operations
pub type Result<T> = std::result::Result<T, CombatError>;
