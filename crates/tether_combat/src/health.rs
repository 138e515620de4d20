//! Target health and the roster of live targets

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tether_core::{EntityId, KillCounter};

/// Health of a damageable target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetHealth {
    /// Maximum health
    capacity: f32,
    /// Current health, may go below zero
    current: f32,
    /// Set once the kill has been counted
    #[serde(skip)]
    destroyed: bool,
}

impl TargetHealth {
    /// Create a target at full health
    pub fn new(capacity: f32) -> Self {
        Self {
            capacity,
            current: capacity,
            destroyed: false,
        }
    }

    /// Maximum health
    pub fn capacity(&self) -> f32 {
        self.capacity
    }

    /// Current health
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Whether the target has been destroyed
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Subtract `amount`. There is no floor; health never rises above
    /// capacity.
    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount).min(self.capacity);
    }

    /// Destroy the target once its health is gone, counting the kill.
    ///
    /// Returns true only on the call that destroyed it.
    pub fn evaluate(&mut self, kills: &mut dyn KillCounter) -> bool {
        if self.destroyed || self.current > 0.0 {
            return false;
        }
        self.destroyed = true;
        kills.record_kill();
        true
    }
}

impl Default for TargetHealth {
    fn default() -> Self {
        Self::new(50.0)
    }
}

/// Live targets by entity
#[derive(Debug, Clone, Default)]
pub struct TargetRoster {
    targets: HashMap<EntityId, TargetHealth>,
}

impl TargetRoster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a target
    pub fn insert(&mut self, entity: EntityId, health: TargetHealth) {
        self.targets.insert(entity, health);
    }

    /// Health of a target
    pub fn get(&self, entity: EntityId) -> Option<&TargetHealth> {
        self.targets.get(&entity)
    }

    /// Whether `entity` is a live target
    pub fn contains(&self, entity: EntityId) -> bool {
        self.targets.contains_key(&entity)
    }

    /// Number of live targets
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no targets are left
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Damage a target. Returns false if `entity` is not a target.
    pub fn take_damage(&mut self, entity: EntityId, amount: f32) -> bool {
        match self.targets.get_mut(&entity) {
            Some(health) => {
                health.take_damage(amount);
                log::trace!("{} took {} damage, {} left", entity, amount, health.current());
                true
            }
            None => false,
        }
    }

    /// Evaluate every target and remove the destroyed ones.
    ///
    /// Returns the entities destroyed by this call so the host can remove
    /// their bodies.
    pub fn evaluate(&mut self, kills: &mut dyn KillCounter) -> Vec<EntityId> {
        let mut destroyed: Vec<EntityId> = self
            .targets
            .iter_mut()
            .filter_map(|(entity, health)| health.evaluate(kills).then_some(*entity))
            .collect();
        destroyed.sort_by_key(|entity| entity.to_bits());

        for entity in &destroyed {
            self.targets.remove(entity);
            log::info!("Target {} destroyed", entity);
        }
        destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::KillTally;

    #[test]
    fn test_lethal_damage_destroys_once() {
        let mut health = TargetHealth::new(50.0);
        let mut tally = KillTally::default();

        health.take_damage(50.0);
        assert!(health.evaluate(&mut tally));
        assert!(health.is_destroyed());
        assert_eq!(tally.kills, 1);

        assert!(!health.evaluate(&mut tally));
        assert_eq!(tally.kills, 1);
    }

    #[test]
    fn test_no_floor_on_damage() {
        let mut health = TargetHealth::new(50.0);
        health.take_damage(80.0);
        assert_eq!(health.current(), -30.0);
    }

    #[test]
    fn test_never_above_capacity() {
        let mut health = TargetHealth::new(50.0);
        health.take_damage(-20.0);
        assert_eq!(health.current(), 50.0);
    }

    #[test]
    fn test_surviving_target_is_kept() {
        let mut health = TargetHealth::new(50.0);
        let mut tally = KillTally::default();
        health.take_damage(49.0);
        assert!(!health.evaluate(&mut tally));
        assert_eq!(tally.kills, 0);
    }

    #[test]
    fn test_roster_removes_destroyed() {
        let mut roster = TargetRoster::new();
        let mut tally = KillTally::default();
        let a = EntityId::new(1);
        let b = EntityId::new(2);
        roster.insert(a, TargetHealth::new(10.0));
        roster.insert(b, TargetHealth::new(10.0));

        assert!(roster.take_damage(a, 10.0));
        assert!(!roster.take_damage(EntityId::new(3), 10.0));

        assert_eq!(roster.evaluate(&mut tally), vec![a]);
        assert_eq!(roster.len(), 1);
        assert!(!roster.is_empty());
        assert!(!roster.contains(a));
        assert!(roster.contains(b));
        assert_eq!(tally.kills, 1);
        assert!(roster.evaluate(&mut tally).is_empty());
    }
}
