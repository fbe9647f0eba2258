//! # Duel Common
//!
//! Common types, utilities, and shared abstractions for the duel arena.
//!
//! This crate provides foundational types used across the duel crates:
//! - ID types (CombatantId, ProjectileId)
//! - Geometry (rectangles, circle overlap) on top of `glam`
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod geometry;
pub mod ids;

pub use glam::Vec2;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::geometry::*;
    pub use crate::ids::*;
    pub use glam::Vec2;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_round_trip() {
        assert_eq!(CombatantId::ONE.opponent(), CombatantId::TWO);
        assert_eq!(CombatantId::TWO.opponent().opponent(), CombatantId::TWO);
    }

    #[test]
    fn test_rect_from_origin() {
        let rect = Rect::from_origin_size(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0));
        assert_eq!(rect.max, Vec2::new(40.0, 60.0));
        assert_eq!(rect.width(), 30.0);
    }
}
