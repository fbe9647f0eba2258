//! Hit-box geometry and projectile outcome resolution.
//!
//! A combatant can only be hit on the forward-facing part of its body,
//! shrunk by the configured margins. Each overlapping projectile resolves
//! against at most one combatant per tick, with this precedence:
//!
//! 1. an ultimate reaching a combatant inside its dodge window misses,
//! 2. a defended non-ultimate shot, or any decoy, is blocked,
//! 3. anything else lands its damage.

use duel_common::{CombatantId, ProjectileId, Rect, Vec2};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::combatant::{Combatant, Facing};
use crate::config::HitboxConfig;
use crate::projectile::{Projectile, ProjectilePool};

/// The part of a combatant's body that projectiles can hit.
#[must_use]
pub fn vulnerable_region(combatant: &Combatant, hitbox: &HitboxConfig) -> Rect {
    let origin = combatant.position();
    let size = combatant.size();
    let margin = Vec2::new(size.x * hitbox.margin_x, size.y * hitbox.margin_y);

    let (front_min, front_max) = match combatant.facing() {
        Facing::Right => (origin.x + size.x * (1.0 - hitbox.front_ratio), origin.x + size.x),
        Facing::Left => (origin.x, origin.x + size.x * hitbox.front_ratio),
    };

    Rect::new(
        Vec2::new(
            (front_min + margin.x).max(origin.x + margin.x),
            origin.y + margin.y,
        ),
        Vec2::new(
            (front_max - margin.x).min(origin.x + size.x - margin.x),
            origin.y + size.y - margin.y,
        ),
    )
}

/// How a projectile resolved against its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// An ultimate met an open dodge window and was destroyed.
    Dodged,
    /// The shot was absorbed by a defend stance, or was a decoy.
    Blocked,
    /// Damage landed.
    Hit {
        /// Health actually removed
        damage: f32,
        /// Whether the projectile stays behind to linger
        lingering: bool,
    },
}

/// Outcome a projectile would have on `target`, without applying it.
#[must_use]
pub fn classify(target: &Combatant, projectile: &Projectile) -> HitOutcome {
    if target.is_invulnerable() && projectile.is_ultimate {
        HitOutcome::Dodged
    } else if (target.is_defending() && !projectile.is_ultimate) || projectile.ghost {
        HitOutcome::Blocked
    } else {
        HitOutcome::Hit {
            damage: projectile.damage,
            lingering: projectile.linger_duration > 0.0,
        }
    }
}

/// One resolved projectile contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Projectile that made contact
    pub projectile: ProjectileId,
    /// Combatant that fired it
    pub owner: CombatantId,
    /// Combatant it reached
    pub target: CombatantId,
    /// Where contact happened
    pub position: Vec2,
    /// Whether the projectile was part of an ultimate
    pub is_ultimate: bool,
    /// What happened
    pub outcome: HitOutcome,
}

/// Tests live projectiles against combatants and applies outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver {
    hitbox: HitboxConfig,
}

impl CollisionResolver {
    /// Creates a resolver for the given hit-box shape.
    #[must_use]
    pub const fn new(hitbox: HitboxConfig) -> Self {
        Self { hitbox }
    }

    /// Hit-box shape in use.
    #[must_use]
    pub const fn hitbox(&self) -> &HitboxConfig {
        &self.hitbox
    }

    /// Resolves every collidable projectile in spawn order.
    ///
    /// Destroyed projectiles are marked spent; the caller sweeps the pool.
    pub fn resolve(
        &self,
        pool: &mut ProjectilePool,
        combatants: &mut [Combatant; 2],
    ) -> Vec<Resolution> {
        let regions = [
            vulnerable_region(&combatants[0], &self.hitbox),
            vulnerable_region(&combatants[1], &self.hitbox),
        ];
        let mut resolutions = Vec::new();

        for projectile in pool.iter_mut() {
            if !projectile.can_collide() {
                continue;
            }

            for (target, region) in combatants.iter_mut().zip(regions.iter()) {
                if target.id() == projectile.owner || !target.is_alive() {
                    continue;
                }
                if !region.overlaps_circle(projectile.position, projectile.radius) {
                    continue;
                }

                let outcome = match classify(target, projectile) {
                    HitOutcome::Hit { damage, lingering } => {
                        let applied = target.apply_damage(damage);
                        if lingering {
                            projectile.begin_linger();
                        } else {
                            projectile.despawn();
                        }
                        HitOutcome::Hit {
                            damage: applied,
                            lingering,
                        }
                    },
                    other => {
                        projectile.despawn();
                        other
                    },
                };

                trace!(
                    "Projectile {:?} from {} reached {}: {:?}",
                    projectile.id,
                    projectile.owner,
                    target.id(),
                    outcome
                );

                resolutions.push(Resolution {
                    projectile: projectile.id,
                    owner: projectile.owner,
                    target: target.id(),
                    position: projectile.position,
                    is_ultimate: projectile.is_ultimate,
                    outcome,
                });
                break;
            }
        }

        resolutions
    }
}
