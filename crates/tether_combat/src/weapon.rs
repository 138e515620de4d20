//! Weapon ammo, cooldown and reload state

use crate::launch::LaunchConfig;
use serde::{Deserialize, Serialize};
use tether_core::SoundCue;

/// Which weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Automatic rifle
    Rifle,
    /// Semi-automatic pistol
    Pistol,
    /// Pellet shotgun that launches the player
    Shotgun,
}

impl WeaponKind {
    /// Sound played on every shot
    pub fn sound_cue(&self) -> SoundCue {
        match self {
            Self::Rifle => SoundCue::RifleShot,
            Self::Pistol => SoundCue::PistolShot,
            Self::Shotgun => SoundCue::ShotgunShot,
        }
    }

    /// Default tuning for this weapon
    pub fn default_stats(&self) -> WeaponStats {
        match self {
            Self::Rifle => WeaponStats {
                damage: 8.0,
                fire_rate: 0.1,
                range: 80.0,
                hit_force: 5.0,
                magazine_size: 30,
                ..Default::default()
            },
            Self::Pistol => WeaponStats::default(),
            Self::Shotgun => WeaponStats {
                damage: 10.0,
                fire_rate: 0.25,
                range: 15.0,
                hit_force: 50.0,
                magazine_size: 2,
                pellets: 6,
                spread: 0.2,
                launch: Some(LaunchConfig::default()),
            },
        }
    }
}

/// How a reload finishes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ReloadCompletion {
    /// Only [`Weapon::reloaded`] finishes it. A lost signal leaves the
    /// weapon reloading forever.
    #[default]
    Signal,
    /// The weapon finishes by itself after `seconds`
    Timed { seconds: f32 },
}

/// Weapon statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponStats {
    /// Damage per ray to a target
    pub damage: f32,
    /// Seconds between shots
    pub fire_rate: f32,
    /// Ray length in world units
    pub range: f32,
    /// Impulse applied to non-target dynamic bodies
    pub hit_force: f32,
    /// Rounds per magazine
    pub magazine_size: u32,
    /// Rays per shot
    pub pellets: u32,
    /// Per-axis jitter of each pellet
    pub spread: f32,
    /// Launch the airborne player backwards on each shot
    pub launch: Option<LaunchConfig>,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            damage: 10.0,
            fire_rate: 0.15,
            range: 50.0,
            hit_force: 0.0,
            magazine_size: 15,
            pellets: 1,
            spread: 0.0,
            launch: None,
        }
    }
}

/// Buttons a weapon reacts to, as edges for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerInput {
    /// Fire pressed
    pub fire: bool,
    /// Reload pressed
    pub reload: bool,
}

/// What a trigger pull did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A round was spent; the shot still has to be resolved
    Fired,
    /// A reload started
    ReloadStarted,
    /// Nothing happened
    Idle,
}

/// One weapon instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    /// Which weapon
    pub kind: WeaponKind,
    /// Tuning
    pub stats: WeaponStats,
    /// Reload completion policy
    pub reload_completion: ReloadCompletion,
    /// Rounds left
    #[serde(skip)]
    current_ammo: u32,
    /// Seconds until the next shot is allowed
    #[serde(skip)]
    cooldown: f32,
    /// Whether a reload is in progress
    #[serde(skip)]
    is_reloading: bool,
    /// Seconds spent in the current timed reload
    #[serde(skip)]
    reload_elapsed: f32,
}

impl Weapon {
    /// Create a weapon with its default tuning and a full magazine
    pub fn new(kind: WeaponKind) -> Self {
        let stats = kind.default_stats();
        Self {
            kind,
            current_ammo: stats.magazine_size,
            stats,
            reload_completion: ReloadCompletion::Signal,
            cooldown: 0.0,
            is_reloading: false,
            reload_elapsed: 0.0,
        }
    }

    /// Create a rifle
    pub fn rifle() -> Self {
        Self::new(WeaponKind::Rifle)
    }

    /// Create a pistol
    pub fn pistol() -> Self {
        Self::new(WeaponKind::Pistol)
    }

    /// Create a shotgun
    pub fn shotgun() -> Self {
        Self::new(WeaponKind::Shotgun)
    }

    /// Set weapon stats and refill the magazine
    pub fn with_stats(mut self, stats: WeaponStats) -> Self {
        self.stats = stats;
        self.current_ammo = self.stats.magazine_size;
        self
    }

    /// Set reload completion policy
    pub fn with_reload_completion(mut self, completion: ReloadCompletion) -> Self {
        self.reload_completion = completion;
        self
    }

    /// Rounds left
    pub fn ammo(&self) -> u32 {
        self.current_ammo
    }

    /// Rounds per magazine
    pub fn capacity(&self) -> u32 {
        self.stats.magazine_size
    }

    /// Seconds until the next shot is allowed
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Whether a reload is in progress
    pub fn is_reloading(&self) -> bool {
        self.is_reloading
    }

    /// Check if can fire
    pub fn can_fire(&self) -> bool {
        self.cooldown <= 0.0 && self.current_ammo > 0 && !self.is_reloading
    }

    /// Spend a round if allowed. Returns true if fired.
    pub fn fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }
        self.current_ammo -= 1;
        self.cooldown = self.stats.fire_rate;
        true
    }

    /// Start reloading. Returns false if already reloading or full.
    pub fn reload(&mut self) -> bool {
        if self.is_reloading || self.current_ammo >= self.stats.magazine_size {
            return false;
        }
        self.is_reloading = true;
        self.reload_elapsed = 0.0;
        log::debug!("{:?} reloading", self.kind);
        true
    }

    /// Reload finished: refill and allow firing again
    pub fn reloaded(&mut self) {
        self.is_reloading = false;
        self.reload_elapsed = 0.0;
        self.current_ammo = self.stats.magazine_size;
    }

    /// Called when the weapon becomes the active one. An interrupted reload
    /// is abandoned without refilling.
    pub fn equip(&mut self) {
        self.is_reloading = false;
        self.reload_elapsed = 0.0;
    }

    /// Apply this frame's buttons.
    ///
    /// Firing wins over reloading. Pressing fire on an empty magazine
    /// starts a reload instead.
    pub fn trigger(&mut self, input: TriggerInput) -> TriggerOutcome {
        if input.fire && self.fire() {
            return TriggerOutcome::Fired;
        }

        let wants_reload = (input.reload && self.current_ammo < self.stats.magazine_size)
            || (input.fire && self.current_ammo == 0 && !self.is_reloading);
        if wants_reload && self.reload() {
            return TriggerOutcome::ReloadStarted;
        }

        TriggerOutcome::Idle
    }

    /// Update weapon timers
    pub fn update(&mut self, delta_time: f32) {
        if self.cooldown > 0.0 {
            self.cooldown -= delta_time;
        }

        if let (true, ReloadCompletion::Timed { seconds }) =
            (self.is_reloading, self.reload_completion)
        {
            self.reload_elapsed += delta_time;
            if self.reload_elapsed >= seconds {
                self.reloaded();
                log::debug!("{:?} reload complete", self.kind);
            }
        }
    }
}

impl Default for Weapon {
    fn default() -> Self {
        Self::pistol()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRE: TriggerInput = TriggerInput {
        fire: true,
        reload: false,
    };
    const RELOAD: TriggerInput = TriggerInput {
        fire: false,
        reload: true,
    };

    #[test]
    fn test_default_tuning() {
        let pistol = Weapon::pistol();
        assert_eq!(pistol.capacity(), 15);
        assert_eq!(pistol.stats.pellets, 1);
        assert!(pistol.stats.launch.is_none());

        let shotgun = Weapon::shotgun();
        assert_eq!(shotgun.capacity(), 2);
        assert_eq!(shotgun.stats.pellets, 6);
        assert_eq!(shotgun.stats.launch, Some(LaunchConfig::default()));
    }

    #[test]
    fn test_cooldown_blocks_fire() {
        let mut weapon = Weapon::pistol();
        assert_eq!(weapon.trigger(FIRE), TriggerOutcome::Fired);
        assert_eq!(weapon.ammo(), 14);
        assert_eq!(weapon.trigger(FIRE), TriggerOutcome::Idle);

        weapon.update(0.2);
        assert_eq!(weapon.trigger(FIRE), TriggerOutcome::Fired);
    }

    #[test]
    fn test_emptying_magazine_then_reload_on_fire() {
        let mut weapon = Weapon::pistol();
        for _ in 0..15 {
            assert_eq!(weapon.trigger(FIRE), TriggerOutcome::Fired);
            weapon.update(1.0);
        }
        assert_eq!(weapon.ammo(), 0);

        // The next pull does not fire, it starts a reload
        assert_eq!(weapon.trigger(FIRE), TriggerOutcome::ReloadStarted);
        assert_eq!(weapon.ammo(), 0);
        assert!(weapon.is_reloading());
        assert_eq!(weapon.trigger(FIRE), TriggerOutcome::Idle);
    }

    #[test]
    fn test_reload_round_trip() {
        let mut weapon = Weapon::pistol();
        assert_eq!(weapon.trigger(RELOAD), TriggerOutcome::Idle);

        weapon.fire();
        assert_eq!(weapon.trigger(RELOAD), TriggerOutcome::ReloadStarted);
        assert!(weapon.is_reloading());

        weapon.reloaded();
        assert!(!weapon.is_reloading());
        assert_eq!(weapon.ammo(), 15);

        // Reloaded refills regardless of the current count
        weapon.reloaded();
        assert_eq!(weapon.ammo(), 15);
    }

    #[test]
    fn test_signal_reload_never_finishes_alone() {
        let mut weapon = Weapon::shotgun();
        weapon.fire();
        weapon.reload();
        for _ in 0..1000 {
            weapon.update(0.1);
        }
        assert!(weapon.is_reloading());
        assert!(!weapon.can_fire());
    }

    #[test]
    fn test_timed_reload_finishes() {
        let mut weapon = Weapon::shotgun()
            .with_reload_completion(ReloadCompletion::Timed { seconds: 0.5 });
        weapon.fire();
        weapon.reload();

        weapon.update(0.3);
        assert!(weapon.is_reloading());
        weapon.update(0.3);
        assert!(!weapon.is_reloading());
        assert_eq!(weapon.ammo(), 2);
    }

    #[test]
    fn test_equip_clears_reload_without_refill() {
        let mut weapon = Weapon::rifle();
        weapon.fire();
        weapon.reload();
        weapon.equip();

        assert!(!weapon.is_reloading());
        assert_eq!(weapon.ammo(), 29);
        assert!(!weapon.can_fire());

        weapon.update(weapon.stats.fire_rate);
        assert!(weapon.can_fire());
    }
}
