//! Grounded and airborne rigidbody movement

use crate::config::PlayerConfig;
use crate::error::Result;
use glam::{Quat, Vec3};
use tether_core::EntityId;
use tether_physics::PhysicsBackend;

/// Lowest value the jump buffer counts down to while airborne
pub const JUMP_BUFFER_FLOOR: f32 = -0.1;

/// Converts latched input and ground state into body velocity
#[derive(Debug, Clone, PartialEq)]
pub struct MovementController {
    /// Current horizontal speed
    speed: f32,
    /// Airborne speed cap
    max_air_speed: f32,
    /// Latched local-space move intent
    move_input: Vec3,
    /// Last computed world-space move direction
    move_direction: Vec3,
    /// Jump request waiting for the next physics tick
    jump_requested: bool,
    /// Seconds left in the jump buffer
    jump_buffer: f32,
}

impl MovementController {
    /// Create a controller at walking speed
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            speed: config.walk_speed,
            max_air_speed: config.max_air_speed,
            move_input: Vec3::ZERO,
            move_direction: Vec3::ZERO,
            jump_requested: false,
            jump_buffer: 0.0,
        }
    }

    /// Current horizontal speed
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Airborne speed cap
    pub fn max_air_speed(&self) -> f32 {
        self.max_air_speed
    }

    /// Override the airborne speed cap
    pub fn set_max_air_speed(&mut self, speed: f32) {
        self.max_air_speed = speed;
    }

    /// Last computed world-space move direction
    pub fn move_direction(&self) -> Vec3 {
        self.move_direction
    }

    /// Override the world-space move direction
    pub fn set_move_direction(&mut self, direction: Vec3) {
        self.move_direction = direction;
    }

    /// Seconds left in the jump buffer
    pub fn jump_buffer(&self) -> f32 {
        self.jump_buffer
    }

    /// Whether a jump will fire on the next physics tick
    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    /// Frame phase: latch input, update sprint and the jump buffer.
    ///
    /// The buffer is refilled while grounded and counts down to
    /// [`JUMP_BUFFER_FLOOR`] while airborne. A jump press is only latched
    /// while the buffer is positive.
    pub fn frame_update(
        &mut self,
        config: &PlayerConfig,
        grounded: bool,
        move_input: Vec3,
        sprint: bool,
        jump_pressed: bool,
        dt: f32,
    ) {
        self.move_input = move_input;

        if grounded {
            let speed = if sprint {
                config.sprint_speed
            } else {
                config.walk_speed
            };
            self.speed = speed;
            self.max_air_speed = speed;
        }

        if jump_pressed && self.jump_buffer > 0.0 {
            self.jump_requested = true;
        }

        if grounded {
            self.jump_buffer = config.jump_buffer_time;
        } else if self.jump_buffer > JUMP_BUFFER_FLOOR {
            self.jump_buffer -= dt;
        }
    }

    /// Physics phase: drive the body for one fixed step.
    ///
    /// Returns whether a jump impulse was applied.
    pub fn fixed_update(
        &mut self,
        physics: &mut dyn PhysicsBackend,
        body: EntityId,
        facing: Quat,
        grounded: bool,
        config: &PlayerConfig,
    ) -> Result<bool> {
        let velocity = physics.velocity(body)?;

        if grounded {
            self.max_air_speed = self.speed;
            self.move_direction = (facing * self.move_input).normalize_or_zero() * self.speed;
            physics.set_velocity(
                body,
                Vec3::new(self.move_direction.x, velocity.y, self.move_direction.z),
            )?;
        } else {
            let mut velocity = velocity;
            if velocity.length() > self.max_air_speed {
                velocity = velocity.clamp_length_max(self.max_air_speed);
                physics.set_velocity(body, velocity)?;
            }

            // Above the cap no input is honored, not even to slow down
            if self.move_input != Vec3::ZERO {
                self.move_direction =
                    (facing * self.move_input).normalize_or_zero() * config.air_speed;
                if velocity.length() < self.max_air_speed {
                    physics.add_acceleration(body, self.move_direction)?;
                }
            }
        }

        if self.jump_requested {
            physics.apply_impulse(body, Vec3::Y * config.jump_force)?;
            self.jump_buffer = 0.0;
            self.jump_requested = false;
            log::trace!("Jump impulse applied to {}", body);
            return Ok(true);
        }

        Ok(false)
    }

    /// Drop latched input and any pending jump
    pub fn clear_latches(&mut self) {
        self.move_input = Vec3::ZERO;
        self.move_direction = Vec3::ZERO;
        self.jump_requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tether_physics::{BodyDesc, MockPhysics};

    fn setup() -> (MockPhysics, EntityId, MovementController, PlayerConfig) {
        let mut physics = MockPhysics::new();
        let body = EntityId::new(1);
        physics.spawn(body, BodyDesc::player(Vec3::ZERO)).unwrap();
        let config = PlayerConfig::default();
        let movement = MovementController::new(&config);
        (physics, body, movement, config)
    }

    #[test]
    fn test_grounded_sets_horizontal_velocity() {
        let (mut physics, body, mut movement, config) = setup();
        physics.set_velocity(body, Vec3::new(3.0, -2.0, 3.0)).unwrap();

        movement.frame_update(&config, true, Vec3::Z, false, false, 0.02);
        movement
            .fixed_update(&mut physics, body, Quat::IDENTITY, true, &config)
            .unwrap();

        let velocity = physics.velocity(body).unwrap();
        assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(velocity.y, -2.0);
        assert_relative_eq!(velocity.z, 8.0, epsilon = 1e-5);
    }

    #[test]
    fn test_grounded_ignores_air_cap() {
        let (mut physics, body, mut movement, config) = setup();
        movement.set_max_air_speed(1.0);
        physics.set_velocity(body, Vec3::new(0.0, 30.0, 0.0)).unwrap();

        movement.frame_update(&config, true, Vec3::Z, true, false, 0.02);
        movement
            .fixed_update(&mut physics, body, Quat::IDENTITY, true, &config)
            .unwrap();

        let velocity = physics.velocity(body).unwrap();
        assert_relative_eq!(velocity.y, 30.0);
        assert_relative_eq!(velocity.z, 12.0, epsilon = 1e-5);
        assert_relative_eq!(movement.max_air_speed(), 12.0);
    }

    #[test]
    fn test_facing_rotates_input() {
        let (mut physics, body, mut movement, config) = setup();
        let facing = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

        movement.frame_update(&config, true, Vec3::Z, false, false, 0.02);
        movement
            .fixed_update(&mut physics, body, facing, true, &config)
            .unwrap();

        let velocity = physics.velocity(body).unwrap();
        assert_relative_eq!(velocity.x, 8.0, epsilon = 1e-4);
        assert_relative_eq!(velocity.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_airborne_clamps_to_cap() {
        let (mut physics, body, mut movement, config) = setup();
        movement.set_max_air_speed(10.0);
        physics.set_velocity(body, Vec3::new(0.0, 0.0, 30.0)).unwrap();

        movement.frame_update(&config, false, Vec3::ZERO, false, false, 0.02);
        movement
            .fixed_update(&mut physics, body, Quat::IDENTITY, false, &config)
            .unwrap();

        assert_relative_eq!(physics.velocity(body).unwrap().length(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_airborne_input_accelerates_below_cap_only() {
        let (mut physics, body, mut movement, config) = setup();
        movement.frame_update(&config, false, Vec3::Z, false, false, 0.02);
        movement
            .fixed_update(&mut physics, body, Quat::IDENTITY, false, &config)
            .unwrap();
        physics.step(0.5);
        assert_relative_eq!(physics.velocity(body).unwrap().z, 3.5, epsilon = 1e-5);

        // At the cap, even a reverse input is ignored
        movement.set_max_air_speed(3.5);
        movement.frame_update(&config, false, -Vec3::Z, false, false, 0.02);
        movement
            .fixed_update(&mut physics, body, Quat::IDENTITY, false, &config)
            .unwrap();
        physics.step(0.5);
        assert_relative_eq!(physics.velocity(body).unwrap().z, 3.5, epsilon = 1e-4);
    }

    #[test]
    fn test_jump_latched_only_inside_buffer() {
        let (_, _, mut movement, config) = setup();

        // Never grounded: buffer is empty
        movement.frame_update(&config, false, Vec3::ZERO, false, true, 0.02);
        assert!(!movement.jump_requested());

        movement.frame_update(&config, true, Vec3::ZERO, false, false, 0.02);
        assert_relative_eq!(movement.jump_buffer(), 0.2);

        // Airborne for 0.1s, still inside the window
        for _ in 0..5 {
            movement.frame_update(&config, false, Vec3::ZERO, false, false, 0.02);
        }
        movement.frame_update(&config, false, Vec3::ZERO, false, true, 0.02);
        assert!(movement.jump_requested());
    }

    #[test]
    fn test_jump_buffer_floor() {
        let (_, _, mut movement, config) = setup();
        for _ in 0..100 {
            movement.frame_update(&config, false, Vec3::ZERO, false, false, 0.02);
        }
        assert!(movement.jump_buffer() <= JUMP_BUFFER_FLOOR);
        assert!(movement.jump_buffer() > JUMP_BUFFER_FLOOR - 0.02 - 1e-6);
    }

    #[test]
    fn test_jump_clears_buffer() {
        let (mut physics, body, mut movement, config) = setup();
        movement.frame_update(&config, true, Vec3::ZERO, false, false, 0.02);
        movement.frame_update(&config, true, Vec3::ZERO, false, true, 0.02);

        let jumped = movement
            .fixed_update(&mut physics, body, Quat::IDENTITY, true, &config)
            .unwrap();
        assert!(jumped);
        assert_eq!(movement.jump_buffer(), 0.0);
        assert!(!movement.jump_requested());
        assert_eq!(physics.impulses(), &[(body, Vec3::new(0.0, 6.0, 0.0))]);
    }
}
