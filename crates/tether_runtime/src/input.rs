//! Per-frame game input

use crate::loadout::Slot;
use tether_combat::TriggerInput;
use tether_player::PlayerInput;

/// Everything sampled from the devices in one frame.
///
/// Button fields are edges, like [`PlayerInput`]'s.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameInput {
    /// Movement, look, jump and grapple
    pub player: PlayerInput,
    /// Fire pressed
    pub fire: bool,
    /// Reload pressed
    pub reload: bool,
    /// Slot key pressed
    pub select: Option<Slot>,
    /// Pause toggle pressed
    pub pause: bool,
}

impl GameInput {
    /// Input that only moves the player
    pub fn moving(x: f32, y: f32) -> Self {
        Self {
            player: PlayerInput::moving(x, y),
            ..Default::default()
        }
    }

    /// Input that only fires
    pub fn firing() -> Self {
        Self {
            fire: true,
            ..Default::default()
        }
    }

    /// Input that only presses the pause toggle
    pub fn pause() -> Self {
        Self {
            pause: true,
            ..Default::default()
        }
    }

    /// Input that only presses a slot key
    pub fn selecting(slot: Slot) -> Self {
        Self {
            select: Some(slot),
            ..Default::default()
        }
    }

    /// Weapon buttons
    pub fn trigger(&self) -> TriggerInput {
        TriggerInput {
            fire: self.fire,
            reload: self.reload,
        }
    }
}
