//! Rapier backed physics world

use crate::backend::PhysicsBackend;
use crate::body::{BodyDesc, BodyKind, Shape};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::events::{ContactEvent, ContactKind, ContactParty};
use crate::layers::{LayerMask, Tag};
use crate::query::RaycastHit;
use glam::Vec3;
use rapier3d::prelude as rapier;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use tether_core::EntityId;

/// Bookkeeping for one spawned entity
#[derive(Debug, Clone, Copy)]
struct EntityEntry {
    body: rapier::RigidBodyHandle,
    tag: Tag,
}

/// Rapier-backed world addressed by entity id
pub struct PhysicsWorld {
    /// Configuration
    config: PhysicsConfig,

    /// Stepping pipeline
    pipeline: rapier::PhysicsPipeline,

    /// Gravity
    gravity: rapier::Vector<f32>,

    /// Timestep and solver settings
    integration_params: rapier::IntegrationParameters,

    /// Island manager
    islands: rapier::IslandManager,

    /// Broad phase
    broad_phase: rapier::DefaultBroadPhase,

    /// Narrow phase
    narrow_phase: rapier::NarrowPhase,

    /// Impulse joint set
    impulse_joints: rapier::ImpulseJointSet,

    /// Multibody joint set
    multibody_joints: rapier::MultibodyJointSet,

    /// CCD solver
    ccd_solver: rapier::CCDSolver,

    /// Query pipeline
    query_pipeline: rapier::QueryPipeline,

    /// Rigid body set
    bodies: rapier::RigidBodySet,

    /// Collider set
    colliders: rapier::ColliderSet,

    /// Entity to body mapping
    entities: HashMap<EntityId, EntityEntry>,

    /// Contacts collected since the last drain
    contacts: Vec<ContactEvent>,
}

impl PhysicsWorld {
    /// Create an empty world from a validated config
    pub fn new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;

        let gravity = rapier::Vector::new(config.gravity[0], config.gravity[1], config.gravity[2]);

        let mut integration_params = rapier::IntegrationParameters::default();
        integration_params.dt = config.timestep;
        integration_params.num_solver_iterations =
            NonZeroUsize::new(config.solver_iterations).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            config,
            pipeline: rapier::PhysicsPipeline::new(),
            gravity,
            integration_params,
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            query_pipeline: rapier::QueryPipeline::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            entities: HashMap::new(),
            contacts: Vec::new(),
        })
    }

    /// Configuration the world was built with
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Live rigid bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Live colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    fn body(&self, entity: EntityId) -> Result<&rapier::RigidBody> {
        self.entities
            .get(&entity)
            .and_then(|entry| self.bodies.get(entry.body))
            .ok_or(PhysicsError::BodyNotFound(entity))
    }

    fn body_mut(&mut self, entity: EntityId) -> Result<&mut rapier::RigidBody> {
        let handle = self
            .entities
            .get(&entity)
            .map(|entry| entry.body)
            .ok_or(PhysicsError::BodyNotFound(entity))?;
        self.bodies
            .get_mut(handle)
            .ok_or(PhysicsError::BodyNotFound(entity))
    }

    fn party(&self, handle: rapier::ColliderHandle) -> Option<ContactParty> {
        let collider = self.colliders.get(handle)?;
        let entity = entity_from_user_data(collider.user_data);
        let tag = self.entities.get(&entity).map(|e| e.tag).unwrap_or_default();
        Some(ContactParty { entity, tag })
    }
}

impl PhysicsBackend for PhysicsWorld {
    fn spawn(&mut self, entity: EntityId, desc: BodyDesc) -> Result<()> {
        if self.entities.contains_key(&entity) {
            return Err(PhysicsError::DuplicateEntity(entity));
        }

        let body_type = match desc.kind {
            BodyKind::Static => rapier::RigidBodyType::Fixed,
            BodyKind::Dynamic => rapier::RigidBodyType::Dynamic,
            BodyKind::Kinematic => rapier::RigidBodyType::KinematicVelocityBased,
        };

        let mut builder = rapier::RigidBodyBuilder::new(body_type)
            .translation(to_rapier(desc.position))
            .gravity_scale(desc.gravity_scale)
            .ccd_enabled(self.config.ccd_enabled && desc.kind == BodyKind::Dynamic)
            .user_data(entity.to_bits() as u128);
        if desc.lock_rotations {
            builder = builder.lock_rotations();
        }
        let body = self.bodies.insert(builder);

        let mut collider = match desc.shape {
            Shape::Sphere { radius } => rapier::ColliderBuilder::ball(radius),
            Shape::Box { half_extents } => {
                rapier::ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            Shape::CapsuleY { half_height, radius } => {
                rapier::ColliderBuilder::capsule_y(half_height, radius)
            }
        }
        .sensor(desc.sensor)
        .user_data(entity.to_bits() as u128)
        .collision_groups(rapier::InteractionGroups::new(
            rapier::Group::from_bits_truncate(desc.layer.as_mask()),
            rapier::Group::ALL,
        ))
        .active_events(rapier::ActiveEvents::COLLISION_EVENTS);
        if desc.mass > 0.0 {
            collider = collider.mass(desc.mass);
        }
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        self.entities.insert(entity, EntityEntry { body, tag: desc.tag });
        self.query_pipeline.update(&self.colliders);

        log::trace!("Spawned {:?} body for entity {}", desc.kind, entity);
        Ok(())
    }

    fn remove_entity(&mut self, entity: EntityId) {
        if let Some(entry) = self.entities.remove(&entity) {
            self.bodies.remove(
                entry.body,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
            self.query_pipeline.update(&self.colliders);
            log::trace!("Removed body for entity {}", entity);
        }
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    fn position(&self, entity: EntityId) -> Result<Vec3> {
        self.body(entity).map(|b| from_rapier(b.translation()))
    }

    fn set_position(&mut self, entity: EntityId, position: Vec3) -> Result<()> {
        self.body_mut(entity)?
            .set_translation(to_rapier(position), true);
        Ok(())
    }

    fn velocity(&self, entity: EntityId) -> Result<Vec3> {
        self.body(entity).map(|b| from_rapier(b.linvel()))
    }

    fn set_velocity(&mut self, entity: EntityId, velocity: Vec3) -> Result<()> {
        self.body_mut(entity)?.set_linvel(to_rapier(velocity), true);
        Ok(())
    }

    fn apply_impulse(&mut self, entity: EntityId, impulse: Vec3) -> Result<()> {
        self.body_mut(entity)?.apply_impulse(to_rapier(impulse), true);
        Ok(())
    }

    fn add_acceleration(&mut self, entity: EntityId, acceleration: Vec3) -> Result<()> {
        let body = self.body_mut(entity)?;
        let force = to_rapier(acceleration) * body.mass();
        body.add_force(force, true);
        Ok(())
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let ray = rapier::Ray::new(
            rapier::Point::new(origin.x, origin.y, origin.z),
            to_rapier(direction),
        );

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.bodies,
                &self.colliders,
                &ray,
                max_distance,
                true,
                query_filter(mask),
            )
            .and_then(|(handle, intersection)| {
                let collider = self.colliders.get(handle)?;
                let entity = entity_from_user_data(collider.user_data);
                let point = ray.point_at(intersection.time_of_impact);
                let dynamic = collider
                    .parent()
                    .and_then(|parent| self.bodies.get(parent))
                    .map(|b| b.is_dynamic())
                    .unwrap_or(false);

                Some(RaycastHit {
                    entity,
                    point: Vec3::new(point.x, point.y, point.z),
                    normal: from_rapier(&intersection.normal),
                    distance: intersection.time_of_impact,
                    tag: self.entities.get(&entity).map(|e| e.tag).unwrap_or_default(),
                    dynamic,
                })
            })
    }

    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        let shape = rapier::Ball::new(radius);
        let position = rapier::Isometry::translation(center.x, center.y, center.z);

        let mut found = false;
        self.query_pipeline.intersections_with_shape(
            &self.bodies,
            &self.colliders,
            &position,
            &shape,
            query_filter(mask),
            |_| {
                found = true;
                false
            },
        );
        found
    }

    fn step(&mut self, dt: f32) {
        self.integration_params.dt = dt;

        let (collision_send, collision_recv) = crossbeam_channel::unbounded();
        let event_handler = ChannelEventCollector {
            collision_events: collision_send,
        };

        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &event_handler,
        );

        // Accelerations only last for one step
        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces(false);
        }

        self.query_pipeline.update(&self.colliders);

        while let Ok(event) = collision_recv.try_recv() {
            let (h1, h2, started) = match event {
                rapier::CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                rapier::CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };

            let (Some(first), Some(second)) = (self.party(h1), self.party(h2)) else {
                continue;
            };

            let is_sensor = [h1, h2]
                .iter()
                .filter_map(|h| self.colliders.get(*h))
                .any(|c| c.is_sensor());

            let kind = match (is_sensor, started) {
                (true, true) => ContactKind::TriggerEnter,
                (true, false) => ContactKind::TriggerExit,
                (false, true) => ContactKind::CollisionEnter,
                (false, false) => ContactKind::CollisionExit,
            };

            self.contacts.push(ContactEvent::new(kind, first, second));
        }
    }

    fn drain_contacts(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.contacts)
    }
}

/// Forwards Rapier collision events into a crossbeam channel
struct ChannelEventCollector {
    collision_events: crossbeam_channel::Sender<rapier::CollisionEvent>,
}

impl rapier::EventHandler for ChannelEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &rapier::RigidBodySet,
        _colliders: &rapier::ColliderSet,
        event: rapier::CollisionEvent,
        _contact_pair: Option<&rapier::ContactPair>,
    ) {
        let _ = self.collision_events.send(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &rapier::RigidBodySet,
        _colliders: &rapier::ColliderSet,
        _contact_pair: &rapier::ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

fn query_filter(mask: LayerMask) -> rapier::QueryFilter<'static> {
    rapier::QueryFilter::new()
        .exclude_sensors()
        .groups(rapier::InteractionGroups::new(
            rapier::Group::ALL,
            rapier::Group::from_bits_truncate(mask.0),
        ))
}

fn entity_from_user_data(user_data: u128) -> EntityId {
    EntityId::new(user_data as u64)
}

fn to_rapier(v: Vec3) -> rapier::Vector<f32> {
    rapier::Vector::new(v.x, v.y, v.z)
}

fn from_rapier(v: &rapier::Vector<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
