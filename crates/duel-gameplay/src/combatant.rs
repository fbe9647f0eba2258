//! Combatant state, action requests and per-tick update.
//!
//! Action requests that are not currently allowed (jumping mid-air,
//! firing during cooldown, defending during its cooldown) are denied
//! silently: they change nothing and report nothing beyond a `false` or
//! `None` return.

use duel_common::{CombatantId, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::character::{Character, Launch, UltimatePattern};
use crate::config::{DuelConfig, MAX_HEALTH};
use crate::projectile::Projectile;
use crate::stats::StatProfile;
use crate::timer::Cooldown;

/// Fraction of max health at or below which the ultimate unlocks.
pub const ULTIMATE_HEALTH_THRESHOLD: f32 = 0.5;

/// Facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Projectiles travel toward +x.
    #[default]
    Right,
    /// Projectiles travel toward -x.
    Left,
}

impl Facing {
    /// +1 for right, -1 for left.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }

    /// Default facing for a slot: each side faces the other.
    #[must_use]
    pub fn for_slot(id: CombatantId) -> Self {
        if id == CombatantId::ONE {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Attack-control charge tracking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ChargeState {
    /// Attack control is up.
    #[default]
    Idle,
    /// Attack control is down.
    Held {
        /// Seconds held so far
        elapsed: f32,
    },
}

/// Which attack a release produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// A normal shot.
    Normal,
    /// The once-per-round ultimate.
    Ultimate,
}

/// Projectiles produced by one attack, not yet spawned.
#[derive(Debug, Clone, PartialEq)]
pub struct Volley {
    /// Attack that produced the volley
    pub kind: AttackKind,
    /// Projectiles to spawn
    pub projectiles: Vec<Projectile>,
}

/// One of the two duel participants.
#[derive(Debug, Clone)]
pub struct Combatant {
    id: CombatantId,
    character: Character,
    profile: StatProfile,
    ultimate: UltimatePattern,
    position: Vec2,
    size: Vec2,
    ground_y: f32,
    vertical_velocity: f32,
    facing: Facing,
    health: f32,
    attack_cooldown: Cooldown,
    jump_cooldown: Cooldown,
    defend_cooldown: Cooldown,
    defending: bool,
    defend_elapsed: f32,
    invulnerability: Cooldown,
    ultimate_ready: bool,
    ultimate_used: bool,
    charge: ChargeState,
    wins: u8,
    dodge_window: f32,
    projectile_base_radius: f32,
}

impl Combatant {
    /// Creates a combatant for `id` in its starting position.
    #[must_use]
    pub fn new(id: CombatantId, config: &DuelConfig) -> Self {
        let fighter = config.fighter(id);
        let mut combatant = Self {
            id,
            character: fighter.character,
            profile: fighter.profile(),
            ultimate: fighter.character.ultimate_pattern(),
            position: Vec2::ZERO,
            size: config.arena.body_size(),
            ground_y: config.arena.ground_y(),
            vertical_velocity: 0.0,
            facing: Facing::for_slot(id),
            health: MAX_HEALTH,
            attack_cooldown: Cooldown::ready(),
            jump_cooldown: Cooldown::ready(),
            defend_cooldown: Cooldown::ready(),
            defending: false,
            defend_elapsed: 0.0,
            invulnerability: Cooldown::ready(),
            ultimate_ready: false,
            ultimate_used: false,
            charge: ChargeState::Idle,
            wins: 0,
            dodge_window: config.physics.dodge_window,
            projectile_base_radius: config.physics.projectile_base_radius,
        };
        combatant.reset_for_round(config);
        combatant
    }

    /// Restores health, position, timers and flags for a new round.
    /// Round wins carry over. The stat profile is re-resolved from `config`.
    pub fn reset_for_round(&mut self, config: &DuelConfig) {
        let fighter = config.fighter(self.id);
        self.character = fighter.character;
        self.profile = fighter.profile();
        self.ultimate = fighter.character.ultimate_pattern();
        self.size = config.arena.body_size();
        self.ground_y = config.arena.ground_y();
        self.position = config.arena.spawn_point(self.id);
        self.dodge_window = config.physics.dodge_window;
        self.projectile_base_radius = config.physics.projectile_base_radius;

        self.vertical_velocity = 0.0;
        self.health = MAX_HEALTH;
        self.attack_cooldown.clear();
        self.jump_cooldown.clear();
        self.defend_cooldown.clear();
        self.defending = false;
        self.defend_elapsed = 0.0;
        self.invulnerability.clear();
        self.ultimate_ready = false;
        self.ultimate_used = false;
        self.charge = ChargeState::Idle;
    }

    // === Action requests ===

    /// Jumps if grounded and off cooldown. A jump opens the dodge window.
    pub fn request_jump(&mut self) -> bool {
        if !self.is_grounded() || !self.jump_cooldown.is_ready() {
            return false;
        }
        self.vertical_velocity = -self.profile.jump_impulse;
        self.jump_cooldown.start(self.profile.jump_cooldown);
        self.invulnerability.start(self.dodge_window);
        true
    }

    /// Starts holding the attack control.
    pub fn request_attack_start(&mut self) {
        self.charge = ChargeState::Held { elapsed: 0.0 };
    }

    /// Releases the attack control, firing the ultimate when the hold
    /// qualifies and a normal shot otherwise.
    pub fn request_attack_release(&mut self) -> Option<Volley> {
        let held = match self.charge {
            ChargeState::Held { elapsed } => elapsed,
            ChargeState::Idle => return None,
        };
        self.charge = ChargeState::Idle;

        if self.ultimate_available() && held >= self.profile.ultimate_windup {
            self.fire_ultimate()
        } else {
            self.fire_normal()
        }
    }

    /// Raises the defend stance unless it is cooling down.
    pub fn request_defend_start(&mut self) -> bool {
        if !self.defend_cooldown.is_ready() {
            return false;
        }
        self.defending = true;
        self.defend_elapsed = 0.0;
        true
    }

    /// Drops the defend stance and starts its cooldown.
    pub fn request_defend_stop(&mut self) -> bool {
        if !self.defending {
            return false;
        }
        self.end_defend();
        true
    }

    /// Fires a normal shot if the attack cooldown allows it.
    pub fn fire_normal(&mut self) -> Option<Volley> {
        if !self.attack_cooldown.is_ready() {
            return None;
        }
        let launch = self.launch();
        let shot = Projectile::new(
            self.id,
            launch.origin,
            launch.direction,
            self.profile.shot_speed,
        )
        .with_damage(self.profile.shot_damage)
        .with_radius(launch.base_radius * self.profile.shot_size);

        self.attack_cooldown.start(self.profile.attack_cooldown);
        Some(Volley {
            kind: AttackKind::Normal,
            projectiles: vec![shot],
        })
    }

    /// Casts the ultimate if it is unlocked and unused this round.
    pub fn fire_ultimate(&mut self) -> Option<Volley> {
        if !self.ultimate_available() {
            return None;
        }
        let projectiles = self.ultimate.build(&self.launch(), &self.profile);
        self.ultimate_used = true;
        self.ultimate_ready = false;
        Some(Volley {
            kind: AttackKind::Ultimate,
            projectiles,
        })
    }

    // === Simulation ===

    /// Advances timers and vertical motion by `dt` seconds.
    pub fn tick(&mut self, dt: f32, gravity: f32) {
        let dt = dt.max(0.0);

        self.attack_cooldown.tick(dt);
        self.jump_cooldown.tick(dt);
        self.defend_cooldown.tick(dt);

        if let ChargeState::Held { elapsed } = &mut self.charge {
            *elapsed += dt;
        }

        if self.defending {
            self.defend_elapsed += dt;
            if self.defend_elapsed >= self.profile.defend_duration {
                self.end_defend();
            }
        }

        self.invulnerability.tick(dt);

        if self.vertical_velocity != 0.0 || self.position.y < self.ground_y {
            self.vertical_velocity += gravity * dt;
            self.position.y += self.vertical_velocity * dt;
            if self.position.y >= self.ground_y {
                self.position.y = self.ground_y;
                self.vertical_velocity = 0.0;
            }
        }

        if !self.ultimate_used && self.health <= MAX_HEALTH * ULTIMATE_HEALTH_THRESHOLD {
            self.ultimate_ready = true;
        }
    }

    /// Subtracts `amount` from health, clamped to `[0, MAX_HEALTH]`.
    /// Returns the health actually removed.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health - amount).clamp(0.0, MAX_HEALTH);
        before - self.health
    }

    pub(crate) fn award_win(&mut self) {
        self.wins = self.wins.saturating_add(1);
    }

    #[cfg(test)]
    pub(crate) fn set_health(&mut self, health: f32) {
        self.health = health.clamp(0.0, MAX_HEALTH);
    }

    fn end_defend(&mut self) {
        self.defending = false;
        self.defend_elapsed = 0.0;
        self.defend_cooldown.start(self.profile.defend_cooldown);
    }

    fn launch(&self) -> Launch {
        let front_x = match self.facing {
            Facing::Right => self.position.x + self.size.x,
            Facing::Left => self.position.x,
        };
        Launch {
            owner: self.id,
            origin: Vec2::new(front_x, self.position.y + self.size.y * 0.5),
            direction: self.facing.sign(),
            base_radius: self.projectile_base_radius,
        }
    }

    // === Accessors ===

    /// Slot identifier.
    #[must_use]
    pub const fn id(&self) -> CombatantId {
        self.id
    }

    /// Character played.
    #[must_use]
    pub const fn character(&self) -> Character {
        self.character
    }

    /// Stat profile in effect this round.
    #[must_use]
    pub const fn profile(&self) -> &StatProfile {
        &self.profile
    }

    /// Top-left corner of the body box.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Body box size.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Full body box.
    #[must_use]
    pub fn body(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Y of the body's top edge when grounded.
    #[must_use]
    pub const fn ground_y(&self) -> f32 {
        self.ground_y
    }

    /// Vertical velocity (negative is upward).
    #[must_use]
    pub const fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Facing direction.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Health as a fraction of max (0.0 to 1.0).
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        (self.health / MAX_HEALTH).clamp(0.0, 1.0)
    }

    /// Whether health is above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Standing on the ground line with no vertical velocity. The apex of
    /// a jump also has zero velocity, so height is checked too.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.vertical_velocity == 0.0 && self.position.y >= self.ground_y
    }

    /// Whether the defend stance is up.
    #[must_use]
    pub const fn is_defending(&self) -> bool {
        self.defending
    }

    /// Seconds the current defend stance has lasted.
    #[must_use]
    pub const fn defend_elapsed(&self) -> f32 {
        self.defend_elapsed
    }

    /// Whether the post-jump dodge window is open.
    #[must_use]
    pub fn is_invulnerable(&self) -> bool {
        !self.invulnerability.is_ready()
    }

    /// Seconds left in the dodge window.
    #[must_use]
    pub const fn invulnerability_remaining(&self) -> f32 {
        self.invulnerability.remaining()
    }

    /// Whether the ultimate has unlocked and not yet been spent.
    #[must_use]
    pub const fn ultimate_ready(&self) -> bool {
        self.ultimate_ready
    }

    /// Whether the ultimate was spent this round.
    #[must_use]
    pub const fn ultimate_used(&self) -> bool {
        self.ultimate_used
    }

    /// Whether an ultimate could be cast right now.
    #[must_use]
    pub const fn ultimate_available(&self) -> bool {
        self.ultimate_ready && !self.ultimate_used
    }

    /// Whether the attack control is held.
    #[must_use]
    pub const fn is_charging(&self) -> bool {
        matches!(self.charge, ChargeState::Held { .. })
    }

    /// Attack-control charge state.
    #[must_use]
    pub const fn charge(&self) -> ChargeState {
        self.charge
    }

    /// Attack cooldown timer.
    #[must_use]
    pub const fn attack_cooldown(&self) -> Cooldown {
        self.attack_cooldown
    }

    /// Jump cooldown timer.
    #[must_use]
    pub const fn jump_cooldown(&self) -> Cooldown {
        self.jump_cooldown
    }

    /// Defend cooldown timer.
    #[must_use]
    pub const fn defend_cooldown(&self) -> Cooldown {
        self.defend_cooldown
    }

    /// Round wins this match.
    #[must_use]
    pub const fn wins(&self) -> u8 {
        self.wins
    }
}
