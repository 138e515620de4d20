//! Tether Combat - Hitscan Weapons and Targets
//!
//! # Features
//!
//! - Weapon state with magazine, fire-rate cooldown and reload
//! - Hitscan resolution with shotgun spread
//! - Shotgun recoil launch for airborne players
//! - Target health with a kill counted exactly once
//!
//! # Example
//!
//! ```ignore
//! use tether_combat::prelude::*;
//!
//! let mut shotgun = Weapon::shotgun();
//!
//! // Frame phase
//! shotgun.update(dt);
//! if shotgun.trigger(TriggerInput { fire: true, reload: false }) == TriggerOutcome::Fired {
//!     // Physics phase
//!     let report = discharge(&shotgun, shooter, &mut ctx)?;
//! }
//!
//! let destroyed = targets.evaluate(&mut tally);
//! ```

pub mod error;
pub mod health;
pub mod hitscan;
pub mod launch;
pub mod weapon;

pub mod prelude {
    pub use crate::error::{CombatError, Result};
    pub use crate::health::{TargetHealth, TargetRoster};
    pub use crate::hitscan::{discharge, pellet_directions, Impact, ShotContext, ShotReport, Shooter};
    pub use crate::launch::{launch_player, LaunchConfig};
    pub use crate::weapon::{
        ReloadCompletion, TriggerInput, TriggerOutcome, Weapon, WeaponKind, WeaponStats,
    };
}

pub use prelude::*;
