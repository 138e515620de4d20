//! Deterministic in-memory physics for gameplay tests
//!
//! Bodies integrate with explicit Euler and never collide with each other.
//! Contacts are injected by the test with [`MockPhysics::push_contact`].

use crate::backend::PhysicsBackend;
use crate::body::{BodyDesc, BodyKind, Shape};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::events::ContactEvent;
use crate::layers::LayerMask;
use crate::query::RaycastHit;
use glam::Vec3;
use std::collections::HashMap;
use tether_core::EntityId;

#[derive(Debug, Clone)]
struct MockBody {
    desc: BodyDesc,
    position: Vec3,
    velocity: Vec3,
    pending_acceleration: Vec3,
}

impl MockBody {
    fn inverse_mass(&self) -> f32 {
        if self.desc.mass > 0.0 {
            1.0 / self.desc.mass
        } else {
            1.0
        }
    }
}

/// Scriptable physics backend
#[derive(Debug, Default)]
pub struct MockPhysics {
    gravity: Vec3,
    bodies: HashMap<EntityId, MockBody>,
    contacts: Vec<ContactEvent>,
    impulses: Vec<(EntityId, Vec3)>,
    steps: u32,
}

impl MockPhysics {
    /// Weightless world
    pub fn new() -> Self {
        Self::default()
    }

    /// World using the gravity of `config`
    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            gravity: Vec3::from_array(config.gravity),
            ..Default::default()
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Queue a contact for the next drain
    pub fn push_contact(&mut self, event: ContactEvent) {
        self.contacts.push(event);
    }

    /// Every impulse applied so far, in order
    pub fn impulses(&self) -> &[(EntityId, Vec3)] {
        &self.impulses
    }

    /// Number of steps taken
    pub fn step_count(&self) -> u32 {
        self.steps
    }

    /// Number of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn body(&self, entity: EntityId) -> Result<&MockBody> {
        self.bodies
            .get(&entity)
            .ok_or(PhysicsError::BodyNotFound(entity))
    }

    fn body_mut(&mut self, entity: EntityId) -> Result<&mut MockBody> {
        self.bodies
            .get_mut(&entity)
            .ok_or(PhysicsError::BodyNotFound(entity))
    }

    fn queryable(body: &MockBody, mask: LayerMask) -> bool {
        !body.desc.sensor && mask.contains(body.desc.layer)
    }
}

impl PhysicsBackend for MockPhysics {
    fn spawn(&mut self, entity: EntityId, desc: BodyDesc) -> Result<()> {
        if self.bodies.contains_key(&entity) {
            return Err(PhysicsError::DuplicateEntity(entity));
        }
        self.bodies.insert(
            entity,
            MockBody {
                position: desc.position,
                velocity: Vec3::ZERO,
                pending_acceleration: Vec3::ZERO,
                desc,
            },
        );
        Ok(())
    }

    fn remove_entity(&mut self, entity: EntityId) {
        self.bodies.remove(&entity);
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.bodies.contains_key(&entity)
    }

    fn position(&self, entity: EntityId) -> Result<Vec3> {
        self.body(entity).map(|b| b.position)
    }

    fn set_position(&mut self, entity: EntityId, position: Vec3) -> Result<()> {
        self.body_mut(entity)?.position = position;
        Ok(())
    }

    fn velocity(&self, entity: EntityId) -> Result<Vec3> {
        self.body(entity).map(|b| b.velocity)
    }

    fn set_velocity(&mut self, entity: EntityId, velocity: Vec3) -> Result<()> {
        self.body_mut(entity)?.velocity = velocity;
        Ok(())
    }

    fn apply_impulse(&mut self, entity: EntityId, impulse: Vec3) -> Result<()> {
        let body = self.body_mut(entity)?;
        if body.desc.kind == BodyKind::Dynamic {
            body.velocity += impulse * body.inverse_mass();
        }
        self.impulses.push((entity, impulse));
        Ok(())
    }

    fn add_acceleration(&mut self, entity: EntityId, acceleration: Vec3) -> Result<()> {
        self.body_mut(entity)?.pending_acceleration += acceleration;
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

        self.bodies
            .iter()
            .filter(|(_, body)| Self::queryable(body, mask))
            .filter_map(|(entity, body)| {
                let (distance, normal) = ray_shape(origin, direction, body)?;
                (distance <= max_distance).then(|| RaycastHit {
                    entity: *entity,
                    point: origin + direction * distance,
                    normal,
                    distance,
                    tag: body.desc.tag,
                    dynamic: body.desc.kind == BodyKind::Dynamic,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        self.bodies
            .values()
            .filter(|body| Self::queryable(body, mask))
            .any(|body| shape_distance(center, body) <= radius)
    }

    fn step(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            match body.desc.kind {
                BodyKind::Static => {}
                BodyKind::Kinematic => body.position += body.velocity * dt,
                BodyKind::Dynamic => {
                    let acceleration =
                        self.gravity * body.desc.gravity_scale + body.pending_acceleration;
                    body.velocity += acceleration * dt;
                    body.position += body.velocity * dt;
                }
            }
            body.pending_acceleration = Vec3::ZERO;
        }
        self.steps += 1;
    }

    fn drain_contacts(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.contacts)
    }
}

/// Entry distance and normal of a ray against a body. Rays starting inside
/// a shape do not hit it.
fn ray_shape(origin: Vec3, direction: Vec3, body: &MockBody) -> Option<(f32, Vec3)> {
    match body.desc.shape {
        Shape::Sphere { radius } => ray_sphere(origin, direction, body.position, radius),
        Shape::Box { half_extents } => ray_box(origin, direction, body.position, half_extents),
        // Capsules are tested against their bounding box
        Shape::CapsuleY { half_height, radius } => ray_box(
            origin,
            direction,
            body.position,
            Vec3::new(radius, half_height + radius, radius),
        ),
    }
}

fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<(f32, Vec3)> {
    let offset = origin - center;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let b = offset.dot(direction);
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    if t < 0.0 {
        return None;
    }
    let normal = (origin + direction * t - center).normalize_or_zero();
    Some((t, normal))
}

fn ray_box(origin: Vec3, direction: Vec3, center: Vec3, half: Vec3) -> Option<(f32, Vec3)> {
    let min = center - half;
    let max = center + half;
    if origin.cmpge(min).all() && origin.cmple(max).all() {
        return None;
    }

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if near > t_enter {
            t_enter = near;
            normal = Vec3::ZERO;
            normal[axis] = -d.signum();
        }
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    (t_enter >= 0.0).then_some((t_enter, normal))
}

/// Distance from `point` to the surface of a body, zero inside
fn shape_distance(point: Vec3, body: &MockBody) -> f32 {
    match body.desc.shape {
        Shape::Sphere { radius } => (point.distance(body.position) - radius).max(0.0),
        Shape::Box { half_extents } => {
            let closest = point.clamp(body.position - half_extents, body.position + half_extents);
            point.distance(closest)
        }
        Shape::CapsuleY { half_height, radius } => {
            let y = (point.y - body.position.y).clamp(-half_height, half_height);
            let on_axis = body.position + Vec3::Y * y;
            (point.distance(on_axis) - radius).max(0.0)
        }
    }
}
