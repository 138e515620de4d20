//! Weapon loadout
//!
//! Three weapons and a holster, one of them active at a time. Inactive
//! weapons are frozen: they get no input and their timers do not run.

use crate::config::WeaponsConfig;
use serde::{Deserialize, Serialize};
use tether_combat::{TriggerInput, TriggerOutcome, Weapon, WeaponKind};

/// Loadout slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Slot {
    #[default]
    Rifle,
    Pistol,
    Shotgun,
    /// No weapon drawn
    Holster,
}

impl Slot {
    /// Slot bound to a key: `1`, `2`, `3` and `H`
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            '1' => Some(Self::Rifle),
            '2' => Some(Self::Pistol),
            '3' => Some(Self::Shotgun),
            'h' => Some(Self::Holster),
            _ => None,
        }
    }

    /// Weapon held in this slot
    pub fn weapon_kind(&self) -> Option<WeaponKind> {
        match self {
            Self::Rifle => Some(WeaponKind::Rifle),
            Self::Pistol => Some(WeaponKind::Pistol),
            Self::Shotgun => Some(WeaponKind::Shotgun),
            Self::Holster => None,
        }
    }
}

/// The player's weapons
#[derive(Debug, Clone)]
pub struct Loadout {
    rifle: Weapon,
    pistol: Weapon,
    shotgun: Weapon,
    active: Slot,
}

impl Loadout {
    /// Create a loadout with `active` drawn
    pub fn new(rifle: Weapon, pistol: Weapon, shotgun: Weapon, active: Slot) -> Self {
        Self {
            rifle,
            pistol,
            shotgun,
            active,
        }
    }

    /// Build every weapon from config
    pub fn from_config(weapons: &WeaponsConfig, active: Slot) -> Self {
        Self::new(
            weapons.build(WeaponKind::Rifle),
            weapons.build(WeaponKind::Pistol),
            weapons.build(WeaponKind::Shotgun),
            active,
        )
    }

    /// Currently selected slot
    pub fn active_slot(&self) -> Slot {
        self.active
    }

    /// Drawn weapon, if any
    pub fn active(&self) -> Option<&Weapon> {
        self.active.weapon_kind().map(|kind| self.weapon(kind))
    }

    /// Drawn weapon, if any
    pub fn active_mut(&mut self) -> Option<&mut Weapon> {
        let kind = self.active.weapon_kind()?;
        Some(self.weapon_mut(kind))
    }

    pub fn weapon(&self, kind: WeaponKind) -> &Weapon {
        match kind {
            WeaponKind::Rifle => &self.rifle,
            WeaponKind::Pistol => &self.pistol,
            WeaponKind::Shotgun => &self.shotgun,
        }
    }

    pub fn weapon_mut(&mut self, kind: WeaponKind) -> &mut Weapon {
        match kind {
            WeaponKind::Rifle => &mut self.rifle,
            WeaponKind::Pistol => &mut self.pistol,
            WeaponKind::Shotgun => &mut self.shotgun,
        }
    }

    /// Switch slots. Returns false if `slot` was already selected.
    pub fn select(&mut self, slot: Slot) -> bool {
        if slot == self.active {
            return false;
        }
        self.active = slot;
        if let Some(weapon) = self.active_mut() {
            weapon.equip();
        }
        log::debug!("Selected {:?}", slot);
        true
    }

    /// Advance the drawn weapon's timers
    pub fn update(&mut self, delta_time: f32) {
        if let Some(weapon) = self.active_mut() {
            weapon.update(delta_time);
        }
    }

    /// Pass this frame's buttons to the drawn weapon
    pub fn trigger(&mut self, input: TriggerInput) -> TriggerOutcome {
        match self.active_mut() {
            Some(weapon) => weapon.trigger(input),
            None => TriggerOutcome::Idle,
        }
    }

    /// Reload-finished signal for the drawn weapon
    pub fn reloaded(&mut self) {
        if let Some(weapon) = self.active_mut() {
            weapon.reloaded();
        }
    }
}

impl Default for Loadout {
    fn default() -> Self {
        Self::from_config(&WeaponsConfig::default(), Slot::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRE: TriggerInput = TriggerInput {
        fire: true,
        reload: false,
    };

    #[test]
    fn test_key_bindings() {
        assert_eq!(Slot::from_key('1'), Some(Slot::Rifle));
        assert_eq!(Slot::from_key('2'), Some(Slot::Pistol));
        assert_eq!(Slot::from_key('3'), Some(Slot::Shotgun));
        assert_eq!(Slot::from_key('H'), Some(Slot::Holster));
        assert_eq!(Slot::from_key('4'), None);
    }

    #[test]
    fn test_holster_ignores_input() {
        let mut loadout = Loadout::default();
        assert!(loadout.select(Slot::Holster));
        assert!(loadout.active().is_none());
        assert_eq!(loadout.trigger(FIRE), TriggerOutcome::Idle);
        assert_eq!(loadout.weapon(WeaponKind::Rifle).ammo(), 30);
        assert!(!loadout.select(Slot::Holster));
    }

    #[test]
    fn test_only_active_weapon_fires() {
        let mut loadout = Loadout::default();
        loadout.select(Slot::Pistol);

        assert_eq!(loadout.trigger(FIRE), TriggerOutcome::Fired);
        assert_eq!(loadout.weapon(WeaponKind::Pistol).ammo(), 14);
        assert_eq!(loadout.weapon(WeaponKind::Rifle).ammo(), 30);
        assert_eq!(loadout.weapon(WeaponKind::Shotgun).ammo(), 2);
    }

    #[test]
    fn test_inactive_cooldown_is_frozen() {
        let mut loadout = Loadout::default();
        loadout.trigger(FIRE);
        let cooldown = loadout.weapon(WeaponKind::Rifle).cooldown();

        loadout.select(Slot::Shotgun);
        loadout.update(1.0);
        assert_eq!(loadout.weapon(WeaponKind::Rifle).cooldown(), cooldown);
    }

    #[test]
    fn test_switching_abandons_reload() {
        let mut loadout = Loadout::default();
        loadout.select(Slot::Shotgun);
        loadout.trigger(FIRE);
        loadout.update(1.0);
        assert_eq!(
            loadout.trigger(TriggerInput {
                fire: false,
                reload: true
            }),
            TriggerOutcome::ReloadStarted
        );

        loadout.select(Slot::Pistol);
        loadout.select(Slot::Shotgun);
        let shotgun = loadout.weapon(WeaponKind::Shotgun);
        assert!(!shotgun.is_reloading());
        assert_eq!(shotgun.ammo(), 1);
    }
}
