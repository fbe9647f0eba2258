//! # Duel Gameplay
//!
//! The simulation core for a two-combatant arena duel.
//!
//! This crate provides:
//! - Cooldown timers and per-character stat profiles
//! - Combatants with jump, attack, defend and ultimate actions
//! - Projectiles with spawn delay, decoys and post-hit linger
//! - Hit-box geometry and outcome precedence
//! - Best-of-three round state machine
//! - Scripted opponent
//! - Effect event bus and render snapshots
//! - The [`Duel`] simulation context driven by `tick(dt)`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod ai;
pub mod character;
pub mod collision;
pub mod combatant;
pub mod config;
pub mod events;
pub mod input;
pub mod projectile;
pub mod round;
pub mod simulation;
pub mod snapshot;
pub mod stats;
pub mod timer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::ai::*;
    pub use crate::character::*;
    pub use crate::collision::*;
    pub use crate::combatant::*;
    pub use crate::config::*;
    pub use crate::events::*;
    pub use crate::input::*;
    pub use crate::projectile::*;
    pub use crate::round::*;
    pub use crate::simulation::*;
    pub use crate::snapshot::*;
    pub use crate::stats::*;
    pub use crate::timer::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use duel_common::CombatantId;

    #[test]
    fn test_default_duel_starts_in_countdown() {
        let duel = Duel::new(DuelConfig::default()).expect("default config is valid");
        let snapshot = duel.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Countdown);
        assert_eq!(snapshot.round, 1);
        assert_eq!(snapshot.combatant(CombatantId::ONE).character, Character::Rudo);
        assert_eq!(snapshot.combatant(CombatantId::TWO).character, Character::Cenno);
    }

    #[test]
    fn test_snapshot_json() {
        let duel = Duel::new(DuelConfig::default()).expect("default config is valid");
        let json = duel.snapshot().to_json_pretty().expect("serialize");
        assert!(json.contains("\"phase\": \"countdown\""));
    }
}
