//! ID types for combatants and projectiles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies one of the two duel slots.
///
/// Serialized as the bare slot index. Deserializing anything other than
/// 0 or 1 fails, so a decoded ID is always safe to index with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CombatantId(u8);

/// A slot index that names neither combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("combatant slot {0} does not exist (expected 0 or 1)")]
pub struct InvalidSlot(pub u8);

impl CombatantId {
    /// Player one (left side, faces right).
    pub const ONE: Self = Self(0);

    /// Player two (right side, faces left).
    pub const TWO: Self = Self(1);

    /// Returns the ID for a slot index, if it names one of the two slots.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::ONE),
            1 => Some(Self::TWO),
            _ => None,
        }
    }

    /// Returns the slot index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the other slot.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self.0 {
            0 => Self::TWO,
            _ => Self::ONE,
        }
    }

    /// Both slots in iteration order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::ONE, Self::TWO]
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

impl TryFrom<u8> for CombatantId {
    type Error = InvalidSlot;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(usize::from(value)).ok_or(InvalidSlot(value))
    }
}

impl From<CombatantId> for u8 {
    fn from(id: CombatantId) -> Self {
        id.0
    }
}

/// Unique identifier for a projectile within one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProjectileId(u64);

impl ProjectileId {
    /// Null/unassigned projectile ID.
    pub const NULL: Self = Self(0);

    /// Creates a projectile ID from a raw value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Checks if this is an assigned (non-null) ID.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(CombatantId::from_index(0), Some(CombatantId::ONE));
        assert_eq!(CombatantId::from_index(1), Some(CombatantId::TWO));
        assert_eq!(CombatantId::from_index(2), None);
    }

    #[test]
    fn test_deserialize_rejects_unknown_slot() {
        let two: CombatantId = serde_json::from_str("1").expect("slot 1 exists");
        assert_eq!(two, CombatantId::TWO);
        assert_eq!(serde_json::to_string(&two).expect("serializes"), "1");

        let err = serde_json::from_str::<CombatantId>("5").expect_err("slot 5 is out of range");
        assert!(err.to_string().contains("slot 5"));
        assert_eq!(CombatantId::try_from(2), Err(InvalidSlot(2)));
    }

    #[test]
    fn test_display() {
        assert_eq!(CombatantId::ONE.to_string(), "P1");
        assert_eq!(CombatantId::TWO.to_string(), "P2");
    }

    #[test]
    fn test_projectile_id_null() {
        assert!(!ProjectileId::NULL.is_valid());
        assert!(ProjectileId::from_raw(7).is_valid());
        assert_eq!(ProjectileId::default(), ProjectileId::NULL);
    }
}
