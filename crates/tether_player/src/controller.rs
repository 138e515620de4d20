//! Player controller composition
//!
//! Owns the movement regime, the grapple state machine, the look angles
//! and the respawn point of one player body. Collaborators are passed in
//! per call through [`PlayerContext`].

use crate::config::PlayerConfig;
use crate::error::Result;
use crate::grapple::{GrappleState, GrappleStateMachine, RopeVisual};
use crate::input::PlayerInput;
use crate::movement::MovementController;
use crate::respawn::{Checkpoint, RespawnTracker};
use glam::{Quat, Vec2, Vec3};
use tether_core::{EntityId, FovTarget, PlayerMotor, SoundSink, View};
use tether_physics::{
    BodyDesc, CollisionLayer, ContactEvent, ContactKind, LayerMask, PhysicsBackend, Tag,
};

/// Collaborators the player needs during a physics tick
pub struct PlayerContext<'a> {
    /// Physics world holding the player body
    pub physics: &'a mut dyn PhysicsBackend,
    /// Receives FOV requests from the grapple
    pub fov: &'a mut dyn FovTarget,
    /// Receives the grapple sound
    pub sounds: &'a mut dyn SoundSink,
}

/// First-person rigidbody player
#[derive(Debug, Clone)]
pub struct PlayerController {
    body: EntityId,
    config: PlayerConfig,
    movement: MovementController,
    grapple: GrappleStateMachine,
    respawn: RespawnTracker,
    start: Vec3,
    grounded: bool,
    /// Body heading in degrees about +Y
    yaw: f32,
    /// Camera tilt in degrees about +X, positive looks down
    pitch: f32,
    look_input: Vec2,
}

impl PlayerController {
    /// Create a controller for `body` starting at `start`
    pub fn new(body: EntityId, start: Vec3, config: PlayerConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            body,
            movement: MovementController::new(&config),
            grapple: GrappleStateMachine::new(),
            respawn: RespawnTracker::new(start),
            start,
            grounded: false,
            yaw: 0.0,
            pitch: 0.0,
            look_input: Vec2::ZERO,
            config,
        })
    }

    /// Description of the body this controller expects
    pub fn body_desc(&self) -> BodyDesc {
        BodyDesc::player(self.start)
    }

    /// Player body entity
    pub fn body(&self) -> EntityId {
        self.body
    }

    /// Tuning
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Result of the last ground check
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Movement regime state
    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    /// Grapple state machine
    pub fn grapple(&self) -> &GrappleStateMachine {
        &self.grapple
    }

    /// Current grapple state
    pub fn grapple_state(&self) -> GrappleState {
        self.grapple.state()
    }

    /// Rope visual state
    pub fn rope(&self) -> RopeVisual {
        self.grapple.rope()
    }

    /// Respawn bookkeeping
    pub fn respawn(&self) -> &RespawnTracker {
        &self.respawn
    }

    /// Heading in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Camera tilt in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the look angles directly, e.g. when placing the player
    pub fn set_look(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-self.config.camera_clamp, self.config.camera_clamp);
    }

    /// Body heading
    pub fn facing(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Camera orientation
    pub fn camera_rotation(&self) -> Quat {
        self.facing() * Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Camera frame in world space
    pub fn view(&self, physics: &dyn PhysicsBackend) -> Result<View> {
        let position = physics.position(self.body)?;
        Ok(View::new(
            position + Vec3::Y * self.config.eye_height,
            self.camera_rotation(),
        ))
    }

    /// Frame phase: latch input, update sprint and jump buffer, and
    /// force the grapple back to `Normal` if it is no longer active.
    pub fn frame_update(&mut self, input: &PlayerInput, dt: f32) {
        self.look_input = input.look;
        self.movement.frame_update(
            &self.config,
            self.grounded,
            input.move_intent(),
            input.sprint,
            input.jump,
            dt,
        );
        self.grapple.latch(input.grapple, input.jump);
        self.grapple.self_heal();
    }

    /// Physics phase: ground check, then the handlers of the current
    /// grapple state in their fixed order.
    pub fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, dt: f32) -> Result<()> {
        self.ground_check(&*ctx.physics)?;

        match self.grapple.state() {
            GrappleState::Normal => {
                self.move_body(&mut *ctx.physics)?;
                self.start_grapple(ctx)?;
            }
            GrappleState::ThrowGrapple => {
                let position = ctx.physics.position(self.body)?;
                self.grapple.throw(position, dt, &self.config, &mut *ctx.fov);
                self.move_body(&mut *ctx.physics)?;
            }
            GrappleState::Grappling => {
                self.grapple.pull(&mut *ctx.physics, self.body, &self.config)?;
                self.cancel_grapple(ctx)?;
            }
            GrappleState::EndOfGrapple => {
                self.grapple.hold(&mut *ctx.physics, self.body)?;
                self.start_grapple(ctx)?;
                self.cancel_grapple(ctx)?;
            }
        }
        Ok(())
    }

    /// Late phase: apply the look input latched this frame
    pub fn late_update(&mut self) {
        let clamp = self.config.camera_clamp;
        self.pitch = (self.pitch - self.look_input.y * self.config.sensitivity).clamp(-clamp, clamp);
        self.yaw = (self.yaw + self.look_input.x * self.config.sensitivity).rem_euclid(360.0);
        self.look_input = Vec2::ZERO;
    }

    /// React to a contact involving the player body.
    ///
    /// Solid contact with the out-of-bounds volume respawns the player;
    /// entering a checkpoint trigger moves the respawn point.
    pub fn handle_contact(
        &mut self,
        event: &ContactEvent,
        ctx: &mut PlayerContext<'_>,
    ) -> Result<()> {
        let Some(other) = event.other_than(self.body) else {
            return Ok(());
        };

        match (event.kind, other.tag) {
            (ContactKind::CollisionEnter, Tag::OutOfBounds) => {
                self.handle_out_of_bounds(&mut *ctx.physics, &mut *ctx.fov)?;
            }
            (ContactKind::TriggerEnter, Tag::Checkpoint) => {
                self.respawn.enter_checkpoint(other.entity);
            }
            _ => {}
        }
        Ok(())
    }

    /// Teleport to the respawn point, stop all motion and any grapple
    pub fn handle_out_of_bounds(
        &mut self,
        physics: &mut dyn PhysicsBackend,
        fov: &mut dyn FovTarget,
    ) -> Result<()> {
        self.respawn.respawn(physics, self.body)?;
        self.grapple.stop(&mut self.movement, &self.config, fov);
        self.movement.clear_latches();
        self.grapple.clear_latches();
        Ok(())
    }

    /// Register a checkpoint trigger
    pub fn register_checkpoint(&mut self, trigger: EntityId, checkpoint: Checkpoint) {
        self.respawn.register_checkpoint(trigger, checkpoint);
    }

    /// Overwrite the respawn point
    pub fn update_checkpoint(&mut self, position: Vec3) {
        self.respawn.update_checkpoint(position);
    }

    /// End any grapple
    pub fn stop_grapple(&mut self, fov: &mut dyn FovTarget) {
        self.grapple.stop(&mut self.movement, &self.config, fov);
    }

    fn ground_check(&mut self, physics: &dyn PhysicsBackend) -> Result<()> {
        let probe = physics.position(self.body)? + self.config.ground_check_offset;
        self.grounded = physics.sphere_overlap(
            probe,
            self.config.ground_check_radius,
            LayerMask::only(CollisionLayer::GROUND),
        );
        Ok(())
    }

    fn move_body(&mut self, physics: &mut dyn PhysicsBackend) -> Result<()> {
        let jumped = self.movement.fixed_update(
            physics,
            self.body,
            self.facing(),
            self.grounded,
            &self.config,
        )?;
        // A jump leaves the ground until the next ground check
        if jumped {
            self.grounded = false;
        }
        Ok(())
    }

    fn start_grapple(&mut self, ctx: &mut PlayerContext<'_>) -> Result<()> {
        let view = self.view(&*ctx.physics)?;
        self.grapple
            .try_start(&*ctx.physics, &view, &self.config, &mut *ctx.sounds);
        Ok(())
    }

    fn cancel_grapple(&mut self, ctx: &mut PlayerContext<'_>) -> Result<()> {
        self.grapple.check_cancel(
            &mut *ctx.physics,
            self.body,
            &mut self.movement,
            &self.config,
            &mut *ctx.fov,
        )
    }
}

impl PlayerMotor for PlayerController {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn set_move_direction(&mut self, direction: Vec3) {
        self.movement.set_move_direction(direction);
    }

    fn set_max_air_speed(&mut self, speed: f32) {
        self.movement.set_max_air_speed(speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tether_physics::MockPhysics;

    #[test]
    fn test_look_clamps_pitch() {
        let mut player =
            PlayerController::new(EntityId::new(1), Vec3::ZERO, PlayerConfig::default()).unwrap();

        let input = PlayerInput {
            look: Vec2::new(30.0, 200.0),
            ..Default::default()
        };
        player.frame_update(&input, 0.016);
        player.late_update();

        assert_relative_eq!(player.pitch(), -90.0);
        assert_relative_eq!(player.yaw(), 30.0);

        // Look input is consumed once
        player.late_update();
        assert_relative_eq!(player.yaw(), 30.0);
    }

    #[test]
    fn test_view_sits_at_eye_height() {
        let mut physics = MockPhysics::new();
        let player =
            PlayerController::new(EntityId::new(1), Vec3::new(0.0, 1.0, 0.0), PlayerConfig::default())
                .unwrap();
        physics.spawn(player.body(), player.body_desc()).unwrap();

        let view = player.view(&physics).unwrap();
        assert_relative_eq!(view.origin.y, 1.6, epsilon = 1e-5);
        assert_relative_eq!(view.forward().z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = PlayerConfig::default().with_grapple_speeds(0.0, 1.0);
        assert!(PlayerController::new(EntityId::new(1), Vec3::ZERO, config).is_err());
    }

    #[test]
    fn test_motor_interface() {
        let mut player =
            PlayerController::new(EntityId::new(1), Vec3::ZERO, PlayerConfig::default()).unwrap();
        player.set_max_air_speed(15.0);
        player.set_move_direction(Vec3::ZERO);
        assert_eq!(player.movement().max_air_speed(), 15.0);
        assert!(!player.is_grounded());
    }
}
