//! The game loop
//!
//! [`Game::tick`] is the single scheduling authority. It owns the pause
//! state and runs the phases of a frame in a fixed order:
//!
//! ```text
//! tick(input, dt)
//!   ├─ pause edge ── paused? ──► return, no time accumulates
//!   ├─ frame phase     look/jump/grapple latches, slot select, weapon
//!   │                  timers + trigger, target evaluation, FOV, HUD
//!   ├─ physics phase   pending shot, then per fixed step:
//!   │                  ground check → grapple dispatch → step → contacts
//!   └─ late phase      yaw/pitch from the latched look input
//! ```

use crate::config::{ConfigError, GameConfig};
use crate::frame::FrameTiming;
use crate::hud::{HudSink, HudText};
use crate::input::GameInput;
use crate::loadout::Loadout;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tether_combat::{
    discharge, CombatError, ShotContext, ShotReport, Shooter, TargetHealth, TargetRoster,
    TriggerOutcome, WeaponKind,
};
use tether_core::{EntityId, IdGenerator, KillTally, SoundSink};
use tether_physics::{BodyDesc, CollisionLayer, PhysicsBackend, PhysicsError, Shape, Tag};
use tether_player::{CameraRig, Checkpoint, PlayerContext, PlayerController, PlayerError};
use thiserror::Error;

/// Errors surfaced by the game loop
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    #[error("Player error: {0}")]
    Player(#[from] PlayerError),

    #[error("Combat error: {0}")]
    Combat(#[from] CombatError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;

/// What happened during one tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// Whether the game was paused for this tick
    pub paused: bool,
    /// Fixed steps run
    pub steps: u32,
    /// Shot resolved this tick
    pub shot: Option<ShotReport>,
    /// Targets destroyed this tick
    pub destroyed: Vec<EntityId>,
}

/// A course with one player
pub struct Game<P: PhysicsBackend> {
    physics: P,
    ids: IdGenerator,
    player: PlayerController,
    camera: CameraRig,
    loadout: Loadout,
    targets: TargetRoster,
    tally: KillTally,
    rng: StdRng,
    /// Weapon that fired in the frame phase and awaits resolution
    pending_shot: Option<WeaponKind>,
    paused: bool,
    timing: FrameTiming,
}

impl<P: PhysicsBackend> Game<P> {
    /// Create a game and spawn the player body at `start`
    pub fn new(mut physics: P, config: GameConfig, start: Vec3) -> Result<Self> {
        config.validate()?;

        let ids = IdGenerator::new();
        let player = PlayerController::new(ids.next(), start, config.player.clone())?;
        physics.spawn(player.body(), player.body_desc())?;

        log::info!("Player {} spawned at {}", player.body(), start);

        Ok(Self {
            camera: CameraRig::new(config.player.normal_fov, config.player.fov_smoothing),
            loadout: Loadout::from_config(&config.weapons, config.start_slot),
            targets: TargetRoster::new(),
            tally: KillTally::new(config.hud.kill_goal),
            rng: StdRng::from_entropy(),
            pending_shot: None,
            paused: false,
            timing: FrameTiming::new(config.physics.timestep, config.physics.max_substeps),
            physics,
            ids,
            player,
        })
    }

    /// Use a fixed seed for shot spread
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Spawn a body with a fresh entity id
    pub fn spawn(&mut self, desc: BodyDesc) -> Result<EntityId> {
        let entity = self.ids.next();
        self.physics.spawn(entity, desc)?;
        Ok(entity)
    }

    /// Spawn a walkable static box
    pub fn spawn_ground(&mut self, half_extents: Vec3, position: Vec3) -> Result<EntityId> {
        self.spawn(
            BodyDesc::fixed(Shape::cuboid(half_extents.x, half_extents.y, half_extents.z))
                .with_position(position)
                .with_layer(CollisionLayer::GROUND),
        )
    }

    /// Spawn a static box the grapple can latch onto
    pub fn spawn_grapple_surface(&mut self, half_extents: Vec3, position: Vec3) -> Result<EntityId> {
        self.spawn(
            BodyDesc::fixed(Shape::cuboid(half_extents.x, half_extents.y, half_extents.z))
                .with_position(position)
                .with_layer(CollisionLayer::GRAPPLE),
        )
    }

    /// Spawn an enemy target with `health`
    pub fn spawn_target(&mut self, position: Vec3, health: f32) -> Result<EntityId> {
        let entity = self.spawn(
            BodyDesc::dynamic(Shape::capsule_y(0.5, 0.5))
                .with_position(position)
                .with_tag(Tag::Enemy)
                .with_layer(CollisionLayer::ENEMIES),
        )?;
        self.targets.insert(entity, TargetHealth::new(health));
        log::debug!("Target {} spawned at {}", entity, position);
        Ok(entity)
    }

    /// Spawn a checkpoint trigger that moves the respawn point to `respawn`
    pub fn add_checkpoint(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        respawn: Vec3,
    ) -> Result<EntityId> {
        let entity = self.spawn(
            BodyDesc::sensor(Shape::cuboid(half_extents.x, half_extents.y, half_extents.z))
                .with_position(position)
                .with_tag(Tag::Checkpoint),
        )?;
        self.player
            .register_checkpoint(entity, Checkpoint::new(respawn));
        Ok(entity)
    }

    /// Spawn a volume that respawns the player on contact
    pub fn add_out_of_bounds(&mut self, half_extents: Vec3, position: Vec3) -> Result<EntityId> {
        self.spawn(
            BodyDesc::fixed(Shape::cuboid(half_extents.x, half_extents.y, half_extents.z))
                .with_position(position)
                .with_tag(Tag::OutOfBounds)
                .with_layer(CollisionLayer::OUT_OF_BOUNDS),
        )
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    /// Mutable loadout, e.g. to deliver a reload-finished signal
    pub fn loadout_mut(&mut self) -> &mut Loadout {
        &mut self.loadout
    }

    pub fn targets(&self) -> &TargetRoster {
        &self.targets
    }

    pub fn tally(&self) -> &KillTally {
        &self.tally
    }

    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current HUD text
    pub fn hud(&self) -> HudText {
        HudText::new(&self.tally, &self.loadout)
    }

    /// Run one frame of `dt` seconds
    pub fn tick(
        &mut self,
        input: &GameInput,
        dt: f32,
        hud: &mut dyn HudSink,
        sounds: &mut dyn SoundSink,
    ) -> Result<TickReport> {
        if input.pause {
            self.paused = !self.paused;
            if !self.paused {
                // A partial step from before the pause does not carry over
                self.timing.reset();
            }
            log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        }
        if self.paused {
            return Ok(TickReport {
                paused: true,
                ..Default::default()
            });
        }

        self.timing.update(dt);
        let dt = self.timing.delta_time;

        let destroyed = self.frame_phase(input, dt, hud);
        let (shot, steps) = self.physics_phase(sounds)?;
        self.player.late_update();

        Ok(TickReport {
            paused: false,
            steps,
            shot,
            destroyed,
        })
    }

    fn frame_phase(&mut self, input: &GameInput, dt: f32, hud: &mut dyn HudSink) -> Vec<EntityId> {
        self.player.frame_update(&input.player, dt);

        if let Some(slot) = input.select {
            self.loadout.select(slot);
        }
        self.loadout.update(dt);
        if self.loadout.trigger(input.trigger()) == TriggerOutcome::Fired {
            self.pending_shot = self.loadout.active_slot().weapon_kind();
        }

        let destroyed = self.targets.evaluate(&mut self.tally);
        for entity in &destroyed {
            self.physics.remove_entity(*entity);
        }
        if !destroyed.is_empty() {
            if self.tally.is_complete() {
                log::info!("Course cleared with {} kills", self.tally.kills);
            } else if self.targets.is_empty() {
                log::info!("No targets left, {}/{} kills", self.tally.kills, self.tally.goal);
            }
        }

        self.camera.update(dt);
        hud.present(&HudText::new(&self.tally, &self.loadout));
        destroyed
    }

    fn physics_phase(&mut self, sounds: &mut dyn SoundSink) -> Result<(Option<ShotReport>, u32)> {
        let shot = match self.pending_shot.take() {
            Some(kind) => {
                let view = self.player.view(&self.physics)?;
                let body = self.player.body();
                let report = discharge(
                    self.loadout.weapon(kind),
                    Shooter {
                        body,
                        motor: &mut self.player,
                        view,
                    },
                    &mut ShotContext {
                        physics: &mut self.physics,
                        targets: &mut self.targets,
                        sounds: &mut *sounds,
                        rng: &mut self.rng,
                    },
                )?;
                Some(report)
            }
            None => None,
        };

        let fixed_dt = self.timing.fixed_timestep;
        let steps = self.timing.fixed_steps();
        for _ in 0..steps {
            let mut ctx = PlayerContext {
                physics: &mut self.physics,
                fov: &mut self.camera,
                sounds: &mut *sounds,
            };
            self.player.fixed_update(&mut ctx, fixed_dt)?;
            ctx.physics.step(fixed_dt);

            for event in ctx.physics.drain_contacts() {
                self.player.handle_contact(&event, &mut ctx)?;
            }
        }

        Ok((shot, steps))
    }
}
