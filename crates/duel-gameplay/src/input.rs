//! Discrete control commands.
//!
//! The host turns raw key or pointer input into these, de-duplicating held
//! repeats. Pause is a global toggle on the simulation, not a command.

use duel_common::CombatantId;
use serde::{Deserialize, Serialize};

/// A per-combatant control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    /// Jump (also the dodge).
    Jump,
    /// Attack control pressed.
    AttackStart,
    /// Attack control released.
    AttackRelease,
    /// Defend control pressed.
    DefendStart,
    /// Defend control released.
    DefendStop,
}

impl ControlAction {
    /// Get all actions.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Jump,
            Self::AttackStart,
            Self::AttackRelease,
            Self::DefendStart,
            Self::DefendStop,
        ]
    }
}

/// A control action addressed to one combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    /// Target combatant
    pub combatant: CombatantId,
    /// Requested action
    pub action: ControlAction,
}

impl Command {
    /// Creates a command.
    #[must_use]
    pub const fn new(combatant: CombatantId, action: ControlAction) -> Self {
        Self { combatant, action }
    }

    /// Jump for `combatant`.
    #[must_use]
    pub const fn jump(combatant: CombatantId) -> Self {
        Self::new(combatant, ControlAction::Jump)
    }

    /// Attack press for `combatant`.
    #[must_use]
    pub const fn attack_start(combatant: CombatantId) -> Self {
        Self::new(combatant, ControlAction::AttackStart)
    }

    /// Attack release for `combatant`.
    #[must_use]
    pub const fn attack_release(combatant: CombatantId) -> Self {
        Self::new(combatant, ControlAction::AttackRelease)
    }

    /// Defend press for `combatant`.
    #[must_use]
    pub const fn defend_start(combatant: CombatantId) -> Self {
        Self::new(combatant, ControlAction::DefendStart)
    }

    /// Defend release for `combatant`.
    #[must_use]
    pub const fn defend_stop(combatant: CombatantId) -> Self {
        Self::new(combatant, ControlAction::DefendStop)
    }
}
