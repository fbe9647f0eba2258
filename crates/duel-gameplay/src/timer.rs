//! Countdown timer primitive shared by combatant and round logic.

use serde::{Deserialize, Serialize};

/// A decrementing scalar that is "ready" once it reaches zero.
///
/// The remaining time never goes negative, and ticking with a negative
/// delta is treated as zero so the value can only move downward between
/// explicit restarts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    /// Creates a cooldown that is already ready.
    #[must_use]
    pub const fn ready() -> Self {
        Self { remaining: 0.0 }
    }

    /// Creates a cooldown with time remaining.
    #[must_use]
    pub fn with_remaining(seconds: f32) -> Self {
        let mut cooldown = Self::ready();
        cooldown.start(seconds);
        cooldown
    }

    /// Restarts the cooldown at `seconds` (negative values clamp to zero).
    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    /// Advances the cooldown by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
    }

    /// Clears any remaining time.
    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    /// Returns whether the cooldown has elapsed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Returns the time remaining in seconds.
    #[must_use]
    pub const fn remaining(&self) -> f32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ready_by_default() {
        assert!(Cooldown::default().is_ready());
        assert!(Cooldown::ready().is_ready());
    }

    #[test]
    fn test_tick_reaches_zero() {
        let mut cd = Cooldown::with_remaining(0.5);
        assert!(!cd.is_ready());
        cd.tick(0.3);
        assert!(!cd.is_ready());
        cd.tick(0.3);
        assert!(cd.is_ready());
        assert_eq!(cd.remaining(), 0.0);
    }

    #[test]
    fn test_negative_start_clamps() {
        let cd = Cooldown::with_remaining(-2.0);
        assert!(cd.is_ready());
    }

    #[test]
    fn test_negative_dt_does_not_refill() {
        let mut cd = Cooldown::with_remaining(1.0);
        cd.tick(-5.0);
        assert_eq!(cd.remaining(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_tick_is_monotone(start in 0.0f32..10.0, steps in prop::collection::vec(0.0f32..1.0, 1..50)) {
            let mut cd = Cooldown::with_remaining(start);
            let mut previous = cd.remaining();
            for dt in steps {
                cd.tick(dt);
                prop_assert!(cd.remaining() <= previous);
                prop_assert!(cd.remaining() >= 0.0);
                previous = cd.remaining();
            }
        }
    }
}
