//! Tether sandbox
//!
//! Builds a small course in the Rapier world and plays a scripted input
//! timeline through it headlessly, logging what happens.
//!
//! Run with: cargo run -p tether_runtime [config.toml]

use std::path::PathBuf;
use tether_core::SoundCue;
use tether_physics::{PhysicsBackend, PhysicsWorld};
use tether_player::PlayerInput;
use tether_runtime::prelude::*;

const FRAME_RATE: u32 = 60;
const DURATION_SECS: u32 = 6;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tether.toml"));

    if let Err(e) = run(config_path) {
        log::error!("Sandbox failed: {}", e);
        std::process::exit(1);
    }
}

fn run(config_path: PathBuf) -> Result<()> {
    let config = GameConfig::load_or_default(&config_path)?;
    let world = PhysicsWorld::new(config.physics.clone())?;
    let mut game = Game::new(world, config, Vec3::new(0.0, 1.0, 0.0))?.with_seed(7);
    build_course(&mut game)?;

    let mut hud: Option<HudText> = None;
    let mut sounds: Vec<SoundCue> = Vec::new();
    let mut grapple = game.player().grapple_state();
    let dt = 1.0 / FRAME_RATE as f32;

    for frame in 0..FRAME_RATE * DURATION_SECS {
        let input = scripted_input(frame);
        let report = game.tick(&input, dt, &mut hud, &mut sounds)?;

        if let Some(shot) = &report.shot {
            log::debug!(
                "{:?} shot: {} impacts, launched: {}",
                shot.weapon,
                shot.impacts.len(),
                shot.launched
            );
        }
        for entity in &report.destroyed {
            log::info!("Frame {}: target {} down", frame, entity);
        }

        let state = game.player().grapple_state();
        if state != grapple {
            log::info!("Frame {}: grapple {:?} -> {:?}", frame, grapple, state);
            grapple = state;
        }
    }

    let player = game.player();
    let body = player.body();
    log::info!(
        "Finished after {:.2}s: position {}, velocity {}, grounded {}, fov {:.1}",
        game.timing().total_time,
        game.physics().position(body)?,
        game.physics().velocity(body)?,
        player.grounded(),
        game.camera().fov()
    );
    log::info!("Respawn point {}", player.respawn().spawn_position());
    if let Some(hud) = hud {
        log::info!(
            "HUD: {} | {}",
            hud.enemies,
            hud.ammo.as_deref().unwrap_or("holstered")
        );
    }
    log::info!(
        "{} targets left, {} sounds played",
        game.targets().len(),
        sounds.len()
    );
    Ok(())
}

/// Ground slab, two targets in a line, a grapple pillar behind a
/// checkpoint, and a kill floor under everything
fn build_course(game: &mut Game<PhysicsWorld>) -> Result<()> {
    game.spawn_ground(Vec3::new(10.0, 0.5, 30.0), Vec3::new(0.0, -0.5, 0.0))?;
    game.spawn_grapple_surface(Vec3::new(2.0, 8.0, 1.0), Vec3::new(0.0, 8.0, 25.0))?;

    game.spawn_target(Vec3::new(0.0, 1.0, 10.0), 50.0)?;
    game.spawn_target(Vec3::new(0.0, 1.0, 14.0), 50.0)?;

    game.add_checkpoint(
        Vec3::new(3.0, 3.0, 0.5),
        Vec3::new(0.0, 2.0, 20.0),
        Vec3::new(0.0, 1.0, 20.0),
    )?;
    game.add_out_of_bounds(Vec3::new(100.0, 0.5, 100.0), Vec3::new(0.0, -20.0, 0.0))?;
    Ok(())
}

/// Input for `frame`: settle, shoot both targets with the pistol, grapple
/// to the pillar, jump off and fire the shotgun in the air.
fn scripted_input(frame: u32) -> GameInput {
    let t = frame as f32 / FRAME_RATE as f32;
    let every = |period: u32| frame % period == 0;

    match frame {
        30 => GameInput::selecting(Slot::Pistol),
        31..=150 if every(12) => GameInput::firing(),
        160 => GameInput {
            player: PlayerInput {
                grapple: true,
                ..Default::default()
            },
            ..Default::default()
        },
        240 => GameInput {
            player: PlayerInput {
                jump: true,
                ..Default::default()
            },
            select: Some(Slot::Shotgun),
            ..Default::default()
        },
        250 => GameInput::firing(),
        _ if t > 4.5 => GameInput {
            player: PlayerInput {
                movement: Vec2::new(0.0, -1.0),
                look: Vec2::new(1.5, 0.0),
                ..Default::default()
            },
            ..Default::default()
        },
        _ => GameInput::default(),
    }
}
