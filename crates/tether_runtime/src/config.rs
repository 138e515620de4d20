//! Game configuration loaded from TOML
//!
//! Every section is optional; missing sections and fields keep their
//! defaults.
//!
//! ```toml
//! start_slot = "Pistol"
//!
//! [physics]
//! timestep = 0.02
//! max_substeps = 4
//!
//! [player]
//! walk_speed = 8.0
//! grapple_range = 40.0
//!
//! [weapons]
//! reload = { Timed = { seconds = 1.5 } }
//!
//! [weapons.shotgun]
//! pellets = 8
//!
//! [hud]
//! kill_goal = 10
//! ```

use crate::loadout::Slot;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tether_combat::{LaunchConfig, ReloadCompletion, Weapon, WeaponKind, WeaponStats};
use tether_physics::PhysicsConfig;
use tether_player::PlayerConfig;
use thiserror::Error;

/// Errors from config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Overrides for one weapon. Unset fields keep the weapon's own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponOverrides {
    pub damage: Option<f32>,
    pub fire_rate: Option<f32>,
    pub range: Option<f32>,
    pub hit_force: Option<f32>,
    pub magazine_size: Option<u32>,
    pub pellets: Option<u32>,
    pub spread: Option<f32>,
    pub launch: Option<LaunchConfig>,
}

impl WeaponOverrides {
    /// Stats for `kind` with these overrides applied
    pub fn stats_for(&self, kind: WeaponKind) -> WeaponStats {
        let mut stats = kind.default_stats();
        if let Some(damage) = self.damage {
            stats.damage = damage;
        }
        if let Some(fire_rate) = self.fire_rate {
            stats.fire_rate = fire_rate;
        }
        if let Some(range) = self.range {
            stats.range = range;
        }
        if let Some(hit_force) = self.hit_force {
            stats.hit_force = hit_force;
        }
        if let Some(magazine_size) = self.magazine_size {
            stats.magazine_size = magazine_size;
        }
        if let Some(pellets) = self.pellets {
            stats.pellets = pellets;
        }
        if let Some(spread) = self.spread {
            stats.spread = spread;
        }
        if self.launch.is_some() {
            stats.launch = self.launch;
        }
        stats
    }
}

/// Weapon tuning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponsConfig {
    pub rifle: WeaponOverrides,
    pub pistol: WeaponOverrides,
    pub shotgun: WeaponOverrides,
    /// How every weapon finishes a reload
    pub reload: ReloadCompletion,
}

impl WeaponsConfig {
    /// Build a weapon with a full magazine
    pub fn build(&self, kind: WeaponKind) -> Weapon {
        let overrides = match kind {
            WeaponKind::Rifle => &self.rifle,
            WeaponKind::Pistol => &self.pistol,
            WeaponKind::Shotgun => &self.shotgun,
        };
        Weapon::new(kind)
            .with_stats(overrides.stats_for(kind))
            .with_reload_completion(self.reload)
    }

    fn validate(&self) -> ConfigResult<()> {
        for kind in [WeaponKind::Rifle, WeaponKind::Pistol, WeaponKind::Shotgun] {
            let stats = self.build(kind).stats;
            let fail = |what: &str| {
                Err(ConfigError::Validation(format!("{:?} {}", kind, what)))
            };
            if stats.magazine_size == 0 {
                return fail("magazine_size must be at least 1");
            }
            if stats.pellets == 0 {
                return fail("pellets must be at least 1");
            }
            if !(stats.range > 0.0) {
                return fail("range must be positive");
            }
            if !(stats.fire_rate >= 0.0) {
                return fail("fire_rate must not be negative");
            }
        }
        if let ReloadCompletion::Timed { seconds } = self.reload {
            if !(seconds > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "timed reload must take a positive time, got {}",
                    seconds
                )));
            }
        }
        Ok(())
    }
}

/// HUD settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Kills needed to clear the course
    pub kill_goal: u32,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self { kill_goal: 10 }
    }
}

/// Everything the game reads at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub weapons: WeaponsConfig,
    pub hud: HudConfig,
    /// Slot selected when the game starts
    pub start_slot: Slot,
}

impl GameConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists, otherwise use the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        self.physics
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        self.player
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        self.weapons.validate()?;
        if self.hud.kill_goal == 0 {
            return Err(ConfigError::Validation(
                "kill_goal must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
