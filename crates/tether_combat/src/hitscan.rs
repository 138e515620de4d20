//! Hitscan shot resolution
//!
//! A shot is decided in the frame phase ([`Weapon::trigger`]) and resolved
//! here during the physics phase: sound, optional recoil launch, then one
//! ray per pellet.

use crate::error::Result;
use crate::health::TargetRoster;
use crate::launch::launch_player;
use crate::weapon::{Weapon, WeaponKind, WeaponStats};
use glam::{Quat, Vec3};
use rand::Rng;
use tether_core::{EntityId, PlayerMotor, SoundSink, View};
use tether_physics::{CollisionLayer, LayerMask, PhysicsBackend, Tag};

/// Layers a shot can hit
pub const SHOT_MASK: LayerMask = LayerMask::ALL.without(CollisionLayer::PLAYER);

/// Where a ray landed, for spawning an impact effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Entity hit
    pub entity: EntityId,
    /// Hit point
    pub point: Vec3,
    /// Effect orientation, +Z along the surface normal
    pub rotation: Quat,
    /// Damage dealt to a target
    pub damage: Option<f32>,
    /// Impulse applied to a loose body
    pub impulse: Option<Vec3>,
}

/// Everything a resolved shot did
#[derive(Debug, Clone, PartialEq)]
pub struct ShotReport {
    /// Weapon that fired; also the muzzle flash to play
    pub weapon: WeaponKind,
    /// One entry per ray that hit something
    pub impacts: Vec<Impact>,
    /// Whether the shooter was launched
    pub launched: bool,
}

/// Collaborators a shot touches
pub struct ShotContext<'a, R: Rng + ?Sized> {
    /// Physics world to cast into
    pub physics: &'a mut dyn PhysicsBackend,
    /// Targets that take damage
    pub targets: &'a mut TargetRoster,
    /// Receives the shot sound
    pub sounds: &'a mut dyn SoundSink,
    /// Pellet jitter source
    pub rng: &'a mut R,
}

/// The shooting player
pub struct Shooter<'a> {
    /// Player body
    pub body: EntityId,
    /// Player movement, for the recoil launch
    pub motor: &'a mut dyn PlayerMotor,
    /// Camera frame the shot leaves from
    pub view: View,
}

/// Directions of the rays of one shot.
///
/// A single pellet flies straight. Multiple pellets are each offset by a
/// uniform random amount in `[-spread, spread]` along the view's right and
/// up axes.
pub fn pellet_directions<R: Rng + ?Sized>(
    view: &View,
    pellets: u32,
    spread: f32,
    rng: &mut R,
) -> Vec<Vec3> {
    let forward = view.forward();
    if pellets <= 1 {
        return vec![forward];
    }

    let spread = spread.abs();
    (0..pellets)
        .map(|_| {
            let x = rng.gen_range(-spread..=spread);
            let y = rng.gen_range(-spread..=spread);
            (forward + view.right() * x + view.up() * y).normalize_or_zero()
        })
        .collect()
}

/// Resolve a shot that [`Weapon::trigger`] reported as fired
pub fn discharge<R: Rng + ?Sized>(
    weapon: &Weapon,
    shooter: Shooter<'_>,
    ctx: &mut ShotContext<'_, R>,
) -> Result<ShotReport> {
    let launched = match &weapon.stats.launch {
        Some(launch) => launch_player(
            &mut *ctx.physics,
            shooter.body,
            shooter.motor,
            &shooter.view,
            launch,
        )?,
        None => false,
    };

    ctx.sounds.play(weapon.kind.sound_cue());

    let impacts = cast_rays(&weapon.stats, &shooter.view, ctx)?;
    log::trace!(
        "{:?} fired, {} of {} rays hit",
        weapon.kind,
        impacts.len(),
        weapon.stats.pellets.max(1)
    );

    Ok(ShotReport {
        weapon: weapon.kind,
        impacts,
        launched,
    })
}

fn cast_rays<R: Rng + ?Sized>(
    stats: &WeaponStats,
    view: &View,
    ctx: &mut ShotContext<'_, R>,
) -> Result<Vec<Impact>> {
    let mut impacts = Vec::new();
    let push = view.forward() * stats.hit_force;

    for direction in pellet_directions(view, stats.pellets, stats.spread, &mut *ctx.rng) {
        let Some(hit) = ctx
            .physics
            .raycast(view.origin, direction, stats.range, SHOT_MASK)
        else {
            continue;
        };

        let mut impact = Impact {
            entity: hit.entity,
            point: hit.point,
            rotation: hit.surface_rotation(),
            damage: None,
            impulse: None,
        };

        if hit.tag == Tag::Enemy {
            if ctx.targets.take_damage(hit.entity, stats.damage) {
                impact.damage = Some(stats.damage);
            } else {
                log::warn!("Entity {} is tagged Enemy but has no health", hit.entity);
            }
        } else if hit.dynamic {
            // Knockback follows the view, not the pellet
            ctx.physics.apply_impulse(hit.entity, push)?;
            impact.impulse = Some(push);
        }

        impacts.push(impact);
    }

    Ok(impacts)
}
