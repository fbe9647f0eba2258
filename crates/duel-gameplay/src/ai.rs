//! Scripted opponent.
//!
//! The controller observes the world after collisions and round checks
//! have resolved and returns actions for the next tick. Firing runs on a
//! randomised timer; dodging is a pure function of the current world.

use duel_common::CombatantId;
use serde::{Deserialize, Serialize};

use crate::combatant::{Combatant, Facing};
use crate::config::AiConfig;
use crate::projectile::Projectile;

/// An action chosen by the scripted opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiAction {
    /// Jump (dodge).
    Jump,
    /// Fire a normal shot.
    FireNormal,
    /// Cast the ultimate immediately.
    FireUltimate,
}

/// Whether an opponent projectile is closing in on `me`.
///
/// A projectile counts when it is armed and active, travels toward the
/// front edge of `me`, is within `range` of that edge and is within half
/// a body height of the body's vertical centre.
#[must_use]
pub fn incoming_threat(me: &Combatant, projectiles: &[Projectile], range: f32) -> bool {
    let origin = me.position();
    let size = me.size();
    let front_x = match me.facing() {
        Facing::Right => origin.x + size.x,
        Facing::Left => origin.x,
    };
    let center_y = origin.y + size.y * 0.5;

    projectiles.iter().any(|p| {
        if p.owner != me.id().opponent() || !p.can_collide() {
            return false;
        }
        let closing = (front_x - p.position.x) * p.direction;
        closing > 0.0 && closing < range && (p.position.y - center_y).abs() < size.y * 0.5
    })
}

/// Decision state for one AI-driven combatant.
#[derive(Debug, Clone)]
pub struct AiController {
    config: AiConfig,
    rng: fastrand::Rng,
    fire_timer: f32,
}

impl AiController {
    /// Creates a controller for `slot`. A configured seed is offset by the
    /// slot so that two scripted sides do not mirror each other.
    #[must_use]
    pub fn new(config: AiConfig, slot: CombatantId) -> Self {
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(slot.index() as u64)),
            None => fastrand::Rng::new(),
        };
        let fire_timer = config.initial_delay_min + rng.f32() * config.initial_delay_spread;
        Self {
            config,
            rng,
            fire_timer,
        }
    }

    /// Replaces the tuning without touching the current fire timer.
    pub fn set_config(&mut self, config: AiConfig) {
        self.config = config;
    }

    /// Tuning in use.
    #[must_use]
    pub const fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Seconds until the next shot is due (negative when overdue).
    #[must_use]
    pub const fn fire_timer(&self) -> f32 {
        self.fire_timer
    }

    /// Observes the resolved world and picks actions for the next tick.
    pub fn decide(&mut self, me: &Combatant, dt: f32, projectiles: &[Projectile]) -> Vec<AiAction> {
        let mut actions = Vec::new();

        self.fire_timer -= dt.max(0.0);
        if self.fire_timer <= 0.0 && me.attack_cooldown().is_ready() {
            if me.ultimate_available() && self.rng.f32() < self.config.ultimate_chance {
                actions.push(AiAction::FireUltimate);
            } else {
                actions.push(AiAction::FireNormal);
            }
            self.fire_timer =
                self.config.fire_interval_min + self.rng.f32() * self.config.fire_interval_spread;
        }

        if me.is_grounded() && incoming_threat(me, projectiles, self.config.dodge_range) {
            actions.push(AiAction::Jump);
        }

        actions
    }
}
