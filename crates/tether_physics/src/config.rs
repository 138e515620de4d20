//! Physics configuration

use crate::error::{PhysicsError, Result};
use serde::{Deserialize, Serialize};

/// Physics world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 in Y)
    pub gravity: [f32; 3],

    /// Fixed timestep for physics simulation
    pub timestep: f32,

    /// Maximum number of fixed steps per frame
    pub max_substeps: u32,

    /// Solver iterations
    pub solver_iterations: usize,

    /// Enable continuous collision detection on dynamic bodies
    pub ccd_enabled: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            timestep: 0.02,
            max_substeps: 4,
            solver_iterations: 4,
            ccd_enabled: true,
        }
    }
}

impl PhysicsConfig {
    /// Configuration without gravity, used by deterministic tests
    pub fn weightless() -> Self {
        Self {
            gravity: [0.0, 0.0, 0.0],
            ..Default::default()
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, x: f32, y: f32, z: f32) -> Self {
        self.gravity = [x, y, z];
        self
    }

    /// Set timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Reject values the fixed-step loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.timestep > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        if self.max_substeps == 0 {
            return Err(PhysicsError::InvalidConfig(
                "max_substeps must be at least 1".to_string(),
            ));
        }
        if self.solver_iterations == 0 {
            return Err(PhysicsError::InvalidConfig(
                "solver_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PhysicsConfig::default().validate().is_ok());
        assert!(PhysicsConfig::weightless().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_timestep() {
        let config = PhysicsConfig::default().with_timestep(0.0);
        assert!(matches!(config.validate(), Err(PhysicsError::InvalidConfig(_))));
    }
}
