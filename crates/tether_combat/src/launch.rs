//! Shotgun recoil launch

use crate::error::Result;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tether_core::{EntityId, PlayerMotor, View};
use tether_physics::PhysicsBackend;

/// Recoil launch tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Impulse magnitude, applied against the view direction
    pub force: f32,
    /// Airborne speed cap for the rest of the flight
    pub air_speed: f32,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            force: 15.0,
            air_speed: 15.0,
        }
    }
}

/// Launch an airborne player away from where they are looking.
///
/// Grounded players are not launched. Returns whether the launch happened.
pub fn launch_player(
    physics: &mut dyn PhysicsBackend,
    body: EntityId,
    motor: &mut dyn PlayerMotor,
    view: &View,
    config: &LaunchConfig,
) -> Result<bool> {
    if motor.is_grounded() {
        return Ok(false);
    }

    physics.set_velocity(body, Vec3::ZERO)?;
    motor.set_move_direction(Vec3::ZERO);
    physics.apply_impulse(body, -view.forward() * config.force)?;
    motor.set_max_air_speed(config.air_speed);

    log::debug!("Shotgun launch of {}", body);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Quat;
    use tether_physics::{BodyDesc, MockPhysics};

    #[derive(Default)]
    struct Motor {
        grounded: bool,
        direction: Option<Vec3>,
        max_air: Option<f32>,
    }

    impl PlayerMotor for Motor {
        fn is_grounded(&self) -> bool {
            self.grounded
        }

        fn set_move_direction(&mut self, direction: Vec3) {
            self.direction = Some(direction);
        }

        fn set_max_air_speed(&mut self, speed: f32) {
            self.max_air = Some(speed);
        }
    }

    fn setup() -> (MockPhysics, EntityId) {
        let mut physics = MockPhysics::new();
        let body = EntityId::new(1);
        physics.spawn(body, BodyDesc::player(Vec3::ZERO)).unwrap();
        physics.set_velocity(body, Vec3::new(3.0, -4.0, 1.0)).unwrap();
        (physics, body)
    }

    #[test]
    fn test_airborne_launch_replaces_velocity() {
        let (mut physics, body) = setup();
        let mut motor = Motor::default();
        // Looking straight down
        let view = View::new(Vec3::ZERO, Quat::from_rotation_x(std::f32::consts::FRAC_PI_2));

        let launched =
            launch_player(&mut physics, body, &mut motor, &view, &LaunchConfig::default()).unwrap();

        assert!(launched);
        let velocity = physics.velocity(body).unwrap();
        assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(velocity.y, 15.0, epsilon = 1e-4);
        assert_relative_eq!(velocity.z, 0.0, epsilon = 1e-4);
        assert_eq!(motor.direction, Some(Vec3::ZERO));
        assert_eq!(motor.max_air, Some(15.0));
    }

    #[test]
    fn test_grounded_is_not_launched() {
        let (mut physics, body) = setup();
        let mut motor = Motor {
            grounded: true,
            ..Default::default()
        };

        let launched = launch_player(
            &mut physics,
            body,
            &mut motor,
            &View::default(),
            &LaunchConfig::default(),
        )
        .unwrap();

        assert!(!launched);
        assert_eq!(physics.velocity(body).unwrap(), Vec3::new(3.0, -4.0, 1.0));
        assert!(physics.impulses().is_empty());
        assert!(motor.max_air.is_none());
    }
}
