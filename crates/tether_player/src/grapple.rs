//! Four-state grapple lifecycle
//!
//! ```text
//!            fire + hit                 rope reaches target
//!   Normal ─────────────▶ ThrowGrapple ─────────────────────▶ Grappling
//!     ▲                                                          │
//!     │ stop (cancel, jump off, respawn)          distance < 1   │
//!     └──────────────────────── EndOfGrapple ◀───────────────────┘
//! ```
//!
//! The controller dispatches one handler per state each physics tick. In
//! `Grappling` and `EndOfGrapple` motion runs before the cancel check, so a
//! cancel lands after one more application of the motion.

use crate::config::PlayerConfig;
use crate::error::Result;
use crate::movement::MovementController;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tether_core::{EntityId, FovTarget, SoundCue, SoundSink, View};
use tether_physics::{CollisionLayer, LayerMask, PhysicsBackend};

/// Grapple state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GrappleState {
    /// Regular movement, no grapple
    #[default]
    Normal,
    /// Rope extending toward the target
    ThrowGrapple,
    /// Player pulled toward the target
    Grappling,
    /// Player hanging at the target
    EndOfGrapple,
}

/// What a renderer needs to draw the rope
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RopeVisual {
    /// Whether the rope is drawn
    pub visible: bool,
    /// Rope length in world units
    pub length: f32,
    /// Unit direction from the player toward the target
    pub direction: Vec3,
}

impl RopeVisual {
    fn hidden() -> Self {
        Self::default()
    }
}

/// Grapple state and its transient data
#[derive(Debug, Clone, Default)]
pub struct GrappleStateMachine {
    state: GrappleState,
    active: bool,
    target: Option<Vec3>,
    anchor: Option<Vec3>,
    rope: RopeVisual,
    fire_pending: bool,
    jump_pending: bool,
}

impl GrappleStateMachine {
    /// Create an idle grapple
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> GrappleState {
        self.state
    }

    /// Whether a grapple is in progress
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Point the grapple latched onto
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Position the player hangs at in `EndOfGrapple`
    pub fn anchor(&self) -> Option<Vec3> {
        self.anchor
    }

    /// Rope visual state
    pub fn rope(&self) -> RopeVisual {
        self.rope
    }

    /// Whether a grapple-fire press is waiting to be consumed
    pub fn fire_pending(&self) -> bool {
        self.fire_pending
    }

    /// Whether a jump-off press is waiting to be consumed
    pub fn jump_pending(&self) -> bool {
        self.jump_pending
    }

    /// Frame phase: latch button edges.
    ///
    /// Jump only latches as a jump-off while a grapple is active.
    pub fn latch(&mut self, grapple_pressed: bool, jump_pressed: bool) {
        if grapple_pressed {
            self.fire_pending = true;
        }
        if jump_pressed && self.active {
            self.jump_pending = true;
        }
    }

    /// Frame phase: force `Normal` whenever no grapple is active
    pub fn self_heal(&mut self) {
        if !self.active && self.state != GrappleState::Normal {
            log::debug!("Grapple inactive in {:?}, resetting to Normal", self.state);
            self.reset_to_normal();
        }
    }

    /// Consume a pending fire press and cast for a grapple surface.
    ///
    /// On a hit the rope starts extending from zero and the grapple becomes
    /// active. Returns whether a grapple started.
    pub fn try_start(
        &mut self,
        physics: &dyn PhysicsBackend,
        view: &View,
        config: &PlayerConfig,
        sounds: &mut dyn SoundSink,
    ) -> bool {
        if !self.fire_pending {
            return false;
        }
        self.fire_pending = false;

        let Some(hit) = physics.raycast(
            view.origin,
            view.forward(),
            config.grapple_range,
            LayerMask::only(CollisionLayer::GRAPPLE),
        ) else {
            log::trace!("Grapple missed");
            return false;
        };

        sounds.play(SoundCue::Grapple);
        self.target = Some(hit.point);
        self.anchor = None;
        self.state = GrappleState::ThrowGrapple;
        self.rope = RopeVisual {
            visible: true,
            length: 0.0,
            direction: (hit.point - view.origin).normalize_or_zero(),
        };
        self.active = true;

        log::debug!(
            "Grapple thrown at {} ({:.1} units)",
            hit.point,
            hit.distance
        );
        true
    }

    /// `ThrowGrapple`: extend the rope toward the target.
    ///
    /// Switches to `Grappling` and widens the FOV once the rope spans the
    /// distance from `position` to the target.
    pub fn throw(
        &mut self,
        position: Vec3,
        dt: f32,
        config: &PlayerConfig,
        fov: &mut dyn FovTarget,
    ) {
        let Some(target) = self.target else {
            return;
        };

        self.rope.direction = (target - position).normalize_or_zero();
        self.rope.length += config.grapple_throw_speed * dt;

        if self.rope.length >= position.distance(target) {
            self.state = GrappleState::Grappling;
            self.active = true;
            fov.set_target_fov(config.grapple_fov);
            log::debug!("Grapple attached, pulling");
        }
    }

    /// `Grappling`: override the body velocity toward the target.
    ///
    /// Speed is the remaining distance clamped to the configured range, so
    /// the pull slows near the target without stalling.
    pub fn pull(
        &mut self,
        physics: &mut dyn PhysicsBackend,
        body: EntityId,
        config: &PlayerConfig,
    ) -> Result<()> {
        let Some(target) = self.target else {
            return Ok(());
        };
        let position = physics.position(body)?;
        let distance = position.distance(target);
        let direction = (target - position).normalize_or_zero();

        self.rope.direction = direction;
        self.rope.length = distance;

        let speed = distance.clamp(config.min_grapple_speed, config.max_grapple_speed);
        physics.set_velocity(body, direction * speed * config.grapple_speed_multiplier)?;

        if distance < config.grapple_arrive_distance {
            self.anchor = Some(position);
            self.state = GrappleState::EndOfGrapple;
            log::debug!("Grapple reached target, hanging at {}", position);
        }
        Ok(())
    }

    /// `EndOfGrapple`: pin the body to the anchor and hide the rope
    pub fn hold(&mut self, physics: &mut dyn PhysicsBackend, body: EntityId) -> Result<()> {
        if let Some(anchor) = self.anchor {
            physics.set_position(body, anchor)?;
        }
        self.rope.visible = false;
        Ok(())
    }

    /// Cancel checks for `Grappling` and `EndOfGrapple`.
    ///
    /// A pending fire press drops the player without changing velocity. A
    /// pending jump-off press adds an upward impulse first. Both are checked
    /// on the same tick; stopping on fire does not swallow the jump.
    pub fn check_cancel(
        &mut self,
        physics: &mut dyn PhysicsBackend,
        body: EntityId,
        movement: &mut MovementController,
        config: &PlayerConfig,
        fov: &mut dyn FovTarget,
    ) -> Result<()> {
        let jump = self.jump_pending;

        if self.fire_pending {
            self.fire_pending = false;
            log::debug!("Grapple cancelled");
            self.stop(movement, config, fov);
        }

        if jump {
            physics.apply_impulse(body, Vec3::Y * config.jump_force)?;
            self.jump_pending = false;
            log::debug!("Jumped off grapple");
            self.stop(movement, config, fov);
        }
        Ok(())
    }

    /// End any grapple and restore normal movement. Idempotent.
    pub fn stop(
        &mut self,
        movement: &mut MovementController,
        config: &PlayerConfig,
        fov: &mut dyn FovTarget,
    ) {
        movement.set_max_air_speed(config.grapple_release_air_speed);
        self.reset_to_normal();
        fov.set_target_fov(config.normal_fov);
    }

    /// Drop any pending presses
    pub fn clear_latches(&mut self) {
        self.fire_pending = false;
        self.jump_pending = false;
    }

    fn reset_to_normal(&mut self) {
        self.state = GrappleState::Normal;
        self.active = false;
        self.target = None;
        self.anchor = None;
        self.rope = RopeVisual::hidden();
        self.jump_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Quat;
    use tether_physics::{BodyDesc, MockPhysics, Shape};

    const DT: f32 = 0.02;

    struct Fov(f32);

    impl FovTarget for Fov {
        fn set_target_fov(&mut self, fov: f32) {
            self.0 = fov;
        }
    }

    fn world_with_wall(distance: f32) -> (MockPhysics, EntityId) {
        let mut physics = MockPhysics::new();
        let body = EntityId::new(1);
        physics.spawn(body, BodyDesc::player(Vec3::ZERO)).unwrap();
        physics
            .spawn(
                EntityId::new(2),
                BodyDesc::fixed(Shape::cuboid(2.0, 2.0, 0.5))
                    .with_position(Vec3::new(0.0, 0.0, distance + 0.5))
                    .with_layer(CollisionLayer::GRAPPLE),
            )
            .unwrap();
        (physics, body)
    }

    fn view() -> View {
        View::new(Vec3::ZERO, Quat::IDENTITY)
    }

    #[test]
    fn test_start_requires_press() {
        let (physics, _) = world_with_wall(10.0);
        let mut grapple = GrappleStateMachine::new();
        let mut sounds = Vec::new();

        assert!(!grapple.try_start(&physics, &view(), &PlayerConfig::default(), &mut sounds));
        assert_eq!(grapple.state(), GrappleState::Normal);
        assert!(sounds.is_empty());
    }

    #[test]
    fn test_start_hits_grapple_surface() {
        let (physics, _) = world_with_wall(10.0);
        let mut grapple = GrappleStateMachine::new();
        let mut sounds = Vec::new();

        grapple.latch(true, false);
        assert!(grapple.try_start(&physics, &view(), &PlayerConfig::default(), &mut sounds));
        assert_eq!(grapple.state(), GrappleState::ThrowGrapple);
        assert!(grapple.is_active());
        assert!(!grapple.fire_pending());
        assert_relative_eq!(grapple.target().unwrap().z, 10.0, epsilon = 1e-4);
        assert_eq!(grapple.rope().length, 0.0);
        assert!(grapple.rope().visible);
        assert_eq!(sounds, vec![SoundCue::Grapple]);
    }

    #[test]
    fn test_start_out_of_range_consumes_press() {
        let (physics, _) = world_with_wall(45.0);
        let mut grapple = GrappleStateMachine::new();
        let mut sounds = Vec::new();

        grapple.latch(true, false);
        assert!(!grapple.try_start(&physics, &view(), &PlayerConfig::default(), &mut sounds));
        assert_eq!(grapple.state(), GrappleState::Normal);
        assert!(!grapple.fire_pending());
        assert!(!grapple.is_active());
    }

    #[test]
    fn test_throw_grows_then_attaches_once() {
        let (physics, _) = world_with_wall(10.0);
        let config = PlayerConfig::default();
        let mut grapple = GrappleStateMachine::new();
        let mut fov = Fov(config.normal_fov);

        grapple.latch(true, false);
        grapple.try_start(&physics, &view(), &config, &mut Vec::new());

        let mut last = grapple.rope().length;
        let mut transitions = 0;
        for _ in 0..20 {
            if grapple.state() != GrappleState::ThrowGrapple {
                break;
            }
            grapple.throw(Vec3::ZERO, DT, &config, &mut fov);
            assert!(grapple.rope().length > last);
            last = grapple.rope().length;
            if grapple.state() == GrappleState::Grappling {
                transitions += 1;
            }
        }

        assert_eq!(transitions, 1);
        assert_eq!(grapple.state(), GrappleState::Grappling);
        assert!(grapple.rope().length >= 10.0);
        assert_eq!(fov.0, config.grapple_fov);
    }

    #[test]
    fn test_pull_speed_is_clamped() {
        let (mut physics, body) = world_with_wall(30.0);
        let config = PlayerConfig::default();
        let mut grapple = GrappleStateMachine::new();
        grapple.latch(true, false);
        grapple.try_start(&physics, &view(), &config, &mut Vec::new());

        grapple.pull(&mut physics, body, &config).unwrap();
        assert_relative_eq!(physics.velocity(body).unwrap().z, 30.0, epsilon = 1e-4);

        physics.set_position(body, Vec3::new(0.0, 0.0, 27.0)).unwrap();
        grapple.pull(&mut physics, body, &config).unwrap();
        assert_relative_eq!(physics.velocity(body).unwrap().z, 5.0, epsilon = 1e-4);
        assert!(grapple.anchor().is_none());

        physics.set_position(body, Vec3::new(0.0, 0.0, 29.5)).unwrap();
        grapple.pull(&mut physics, body, &config).unwrap();
        assert_eq!(grapple.state(), GrappleState::EndOfGrapple);
        assert_eq!(grapple.anchor(), Some(Vec3::new(0.0, 0.0, 29.5)));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (physics, _) = world_with_wall(10.0);
        let config = PlayerConfig::default();
        let mut movement = MovementController::new(&config);
        let mut grapple = GrappleStateMachine::new();
        let mut fov = Fov(config.grapple_fov);

        grapple.latch(true, false);
        grapple.try_start(&physics, &view(), &config, &mut Vec::new());

        grapple.stop(&mut movement, &config, &mut fov);
        let once = (grapple.state(), grapple.is_active(), grapple.rope(), grapple.target(), fov.0);
        grapple.stop(&mut movement, &config, &mut fov);
        let twice = (grapple.state(), grapple.is_active(), grapple.rope(), grapple.target(), fov.0);

        assert_eq!(once, twice);
        assert_eq!(once.0, GrappleState::Normal);
        assert!(!once.1);
        assert!(!once.2.visible);
        assert_eq!(once.4, config.normal_fov);
        assert_eq!(movement.max_air_speed(), config.grapple_release_air_speed);
    }

    #[test]
    fn test_jump_only_latches_while_active() {
        let mut grapple = GrappleStateMachine::new();
        grapple.latch(false, true);
        assert!(!grapple.jump_pending());
    }
}
