//! Player tuning

use crate::error::{PlayerError, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Movement, camera and grapple tuning for the player controller.
///
/// Speeds are in units per second, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    // Move speeds
    pub walk_speed: f32,
    pub sprint_speed: f32,
    /// Acceleration applied while airborne with input
    pub air_speed: f32,
    /// Initial airborne speed cap
    pub max_air_speed: f32,

    // Jump
    /// Upward impulse of a jump
    pub jump_force: f32,
    /// Seconds after leaving the ground during which a jump is still honored
    pub jump_buffer_time: f32,

    // Camera
    pub sensitivity: f32,
    /// Pitch limit either side of the horizon
    pub camera_clamp: f32,
    pub normal_fov: f32,
    pub grapple_fov: f32,
    /// Rate constant of the FOV smoothing
    pub fov_smoothing: f32,
    /// Camera height above the body center
    pub eye_height: f32,

    // Grapple
    pub grapple_range: f32,
    pub grapple_speed_multiplier: f32,
    pub min_grapple_speed: f32,
    pub max_grapple_speed: f32,
    /// Rope growth while thrown
    pub grapple_throw_speed: f32,
    /// Distance to the target at which the pull ends
    pub grapple_arrive_distance: f32,
    /// Airborne speed cap restored when the grapple stops
    pub grapple_release_air_speed: f32,

    // Ground check
    pub ground_check_radius: f32,
    /// Ground probe position relative to the body center
    pub ground_check_offset: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 8.0,
            sprint_speed: 12.0,
            air_speed: 7.0,
            max_air_speed: 20.0,
            jump_force: 6.0,
            jump_buffer_time: 0.2,
            sensitivity: 1.0,
            camera_clamp: 90.0,
            normal_fov: 80.0,
            grapple_fov: 100.0,
            fov_smoothing: 4.0,
            eye_height: 0.6,
            grapple_range: 40.0,
            grapple_speed_multiplier: 1.0,
            min_grapple_speed: 5.0,
            max_grapple_speed: 40.0,
            grapple_throw_speed: 50.0,
            grapple_arrive_distance: 1.0,
            grapple_release_air_speed: 20.0,
            ground_check_radius: 0.1,
            ground_check_offset: Vec3::new(0.0, -1.0, 0.0),
        }
    }
}

impl PlayerConfig {
    /// Set walk and sprint speeds
    pub fn with_speeds(mut self, walk: f32, sprint: f32) -> Self {
        self.walk_speed = walk;
        self.sprint_speed = sprint;
        self
    }

    /// Set the grapple pull speed range
    pub fn with_grapple_speeds(mut self, min: f32, max: f32) -> Self {
        self.min_grapple_speed = min;
        self.max_grapple_speed = max;
        self
    }

    /// Set the grapple range
    pub fn with_grapple_range(mut self, range: f32) -> Self {
        self.grapple_range = range;
        self
    }

    /// Set the jump buffer window
    pub fn with_jump_buffer(mut self, seconds: f32) -> Self {
        self.jump_buffer_time = seconds;
        self
    }

    /// Reject tuning the controller cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.min_grapple_speed > 0.0) {
            return Err(PlayerError::InvalidConfig(format!(
                "min_grapple_speed must be positive, got {}",
                self.min_grapple_speed
            )));
        }
        if self.min_grapple_speed > self.max_grapple_speed {
            return Err(PlayerError::InvalidConfig(format!(
                "min_grapple_speed {} exceeds max_grapple_speed {}",
                self.min_grapple_speed, self.max_grapple_speed
            )));
        }
        if !(self.grapple_throw_speed > 0.0) {
            return Err(PlayerError::InvalidConfig(
                "grapple_throw_speed must be positive".to_string(),
            ));
        }
        if self.grapple_range < 0.0 || self.ground_check_radius < 0.0 {
            return Err(PlayerError::InvalidConfig(
                "ranges and radii cannot be negative".to_string(),
            ));
        }
        if !(0.0..=180.0).contains(&self.camera_clamp) {
            return Err(PlayerError::InvalidConfig(format!(
                "camera_clamp must be within 0..=180 degrees, got {}",
                self.camera_clamp
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PlayerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_min_grapple_speed() {
        let config = PlayerConfig::default().with_grapple_speeds(0.0, 40.0);
        assert!(matches!(config.validate(), Err(PlayerError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_inverted_grapple_speeds() {
        let config = PlayerConfig::default().with_grapple_speeds(50.0, 40.0);
        assert!(config.validate().is_err());
    }
}
