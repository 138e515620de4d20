//! Checkpoints and respawning

use crate::error::Result;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tether_core::EntityId;
use tether_physics::PhysicsBackend;

/// A respawn position attached to a checkpoint trigger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    position: Vec3,
}

impl Checkpoint {
    /// Create a checkpoint
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Respawn position
    pub fn position(&self) -> Vec3 {
        self.position
    }
}

/// Remembers where the player respawns
#[derive(Debug, Clone)]
pub struct RespawnTracker {
    spawn: Vec3,
    checkpoints: HashMap<EntityId, Checkpoint>,
}

impl RespawnTracker {
    /// Create a tracker spawning at `start`
    pub fn new(start: Vec3) -> Self {
        Self {
            spawn: start,
            checkpoints: HashMap::new(),
        }
    }

    /// Current respawn position
    pub fn spawn_position(&self) -> Vec3 {
        self.spawn
    }

    /// Associate a checkpoint with its trigger entity
    pub fn register_checkpoint(&mut self, trigger: EntityId, checkpoint: Checkpoint) {
        self.checkpoints.insert(trigger, checkpoint);
    }

    /// Checkpoint owned by a trigger entity
    pub fn checkpoint(&self, trigger: EntityId) -> Option<&Checkpoint> {
        self.checkpoints.get(&trigger)
    }

    /// Overwrite the respawn position. The last checkpoint touched wins.
    pub fn update_checkpoint(&mut self, position: Vec3) {
        self.spawn = position;
        log::info!("Checkpoint reached, respawn set to {}", position);
    }

    /// Handle entering a checkpoint trigger.
    ///
    /// Returns false for triggers without a registered checkpoint.
    pub fn enter_checkpoint(&mut self, trigger: EntityId) -> bool {
        match self.checkpoints.get(&trigger).copied() {
            Some(checkpoint) => {
                self.update_checkpoint(checkpoint.position());
                true
            }
            None => {
                log::warn!("Trigger {} is tagged Checkpoint but has no checkpoint", trigger);
                false
            }
        }
    }

    /// Teleport `body` to the respawn position and stop it
    pub fn respawn(&self, physics: &mut dyn PhysicsBackend, body: EntityId) -> Result<()> {
        physics.set_position(body, self.spawn)?;
        physics.set_velocity(body, Vec3::ZERO)?;
        log::info!("Respawned {} at {}", body, self.spawn);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_physics::{BodyDesc, MockPhysics};

    #[test]
    fn test_last_checkpoint_wins() {
        let mut tracker = RespawnTracker::new(Vec3::ZERO);
        let early = EntityId::new(10);
        let late = EntityId::new(11);
        tracker.register_checkpoint(early, Checkpoint::new(Vec3::new(0.0, 1.0, 10.0)));
        tracker.register_checkpoint(late, Checkpoint::new(Vec3::new(0.0, 1.0, 50.0)));

        assert!(tracker.enter_checkpoint(late));
        assert!(tracker.enter_checkpoint(early));
        assert_eq!(tracker.spawn_position(), Vec3::new(0.0, 1.0, 10.0));
    }

    #[test]
    fn test_unknown_checkpoint_is_ignored() {
        let mut tracker = RespawnTracker::new(Vec3::ONE);
        assert!(!tracker.enter_checkpoint(EntityId::new(3)));
        assert_eq!(tracker.spawn_position(), Vec3::ONE);
    }

    #[test]
    fn test_respawn_resets_body() {
        let mut physics = MockPhysics::new();
        let body = EntityId::new(1);
        physics
            .spawn(body, BodyDesc::player(Vec3::new(5.0, -40.0, 5.0)))
            .unwrap();
        physics.set_velocity(body, Vec3::new(1.0, -30.0, 0.0)).unwrap();

        let tracker = RespawnTracker::new(Vec3::new(0.0, 1.0, 0.0));
        tracker.respawn(&mut physics, body).unwrap();

        assert_eq!(physics.position(body).unwrap(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(physics.velocity(body).unwrap(), Vec3::ZERO);
    }
}
