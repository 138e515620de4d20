//! Physics events (collisions, triggers)

use crate::layers::Tag;
use tether_core::EntityId;

/// Kind of contact notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Solid collision started
    CollisionEnter,
    /// Solid collision ended
    CollisionExit,
    /// Entity entered a sensor
    TriggerEnter,
    /// Entity left a sensor
    TriggerExit,
}

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactParty {
    /// Entity id
    pub entity: EntityId,
    /// Gameplay tag
    pub tag: Tag,
}

/// A contact notification between two entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    /// What happened
    pub kind: ContactKind,
    /// First party
    pub first: ContactParty,
    /// Second party
    pub second: ContactParty,
}

impl ContactEvent {
    /// Create a contact event
    pub fn new(kind: ContactKind, first: ContactParty, second: ContactParty) -> Self {
        Self { kind, first, second }
    }

    /// Check if this is a start event (collision or trigger)
    pub fn is_started(&self) -> bool {
        matches!(self.kind, ContactKind::CollisionEnter | ContactKind::TriggerEnter)
    }

    /// Whether a sensor was involved
    pub fn is_trigger(&self) -> bool {
        matches!(self.kind, ContactKind::TriggerEnter | ContactKind::TriggerExit)
    }

    /// If `entity` takes part in this contact, the other party
    pub fn other_than(&self, entity: EntityId) -> Option<ContactParty> {
        if self.first.entity == entity {
            Some(self.second)
        } else if self.second.entity == entity {
            Some(self.first)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(raw: u64, tag: Tag) -> ContactParty {
        ContactParty {
            entity: EntityId::new(raw),
            tag,
        }
    }

    #[test]
    fn test_other_than() {
        let event = ContactEvent::new(
            ContactKind::TriggerEnter,
            party(1, Tag::Checkpoint),
            party(2, Tag::Player),
        );

        assert_eq!(event.other_than(EntityId::new(2)), Some(party(1, Tag::Checkpoint)));
        assert_eq!(event.other_than(EntityId::new(1)), Some(party(2, Tag::Player)));
        assert_eq!(event.other_than(EntityId::new(3)), None);
        assert!(event.is_started());
        assert!(event.is_trigger());
    }
}
