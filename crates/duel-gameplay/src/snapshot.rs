//! Read-only per-frame view handed to the renderer.

use duel_common::{CombatantId, DuelError, DuelResult, ProjectileId, Vec2};
use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::combatant::{Combatant, Facing};
use crate::projectile::Projectile;
use crate::round::{GamePhase, RoundResult};

/// What a renderer needs to draw one combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantView {
    /// Slot
    pub id: CombatantId,
    /// Character played
    pub character: Character,
    /// Top-left of the body box
    pub position: Vec2,
    /// Body box size
    pub size: Vec2,
    /// Facing
    pub facing: Facing,
    /// Current health
    pub health: f32,
    /// Health as a fraction of max
    pub health_ratio: f32,
    /// Defend stance up
    pub defending: bool,
    /// Dodge window open
    pub invulnerable: bool,
    /// Ultimate unlocked and unspent
    pub ultimate_ready: bool,
    /// Attack control held
    pub charging: bool,
    /// Round wins
    pub wins: u8,
}

impl From<&Combatant> for CombatantView {
    fn from(c: &Combatant) -> Self {
        Self {
            id: c.id(),
            character: c.character(),
            position: c.position(),
            size: c.size(),
            facing: c.facing(),
            health: c.health(),
            health_ratio: c.health_ratio(),
            defending: c.is_defending(),
            invulnerable: c.is_invulnerable(),
            ultimate_ready: c.ultimate_available(),
            charging: c.is_charging(),
            wins: c.wins(),
        }
    }
}

/// What a renderer needs to draw one projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    /// Identifier
    pub id: ProjectileId,
    /// Shooter, for tinting
    pub owner: CombatantId,
    /// Centre
    pub position: Vec2,
    /// Radius
    pub radius: f32,
    /// Part of an ultimate
    pub ultimate: bool,
    /// Decoy
    pub ghost: bool,
    /// Holding position after a hit
    pub lingering: bool,
}

impl From<&Projectile> for ProjectileView {
    fn from(p: &Projectile) -> Self {
        Self {
            id: p.id,
            owner: p.owner,
            position: p.position,
            radius: p.radius,
            ultimate: p.is_ultimate,
            ghost: p.ghost,
            lingering: p.is_lingering(),
        }
    }
}

/// Full frame state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelSnapshot {
    /// Match phase
    pub phase: GamePhase,
    /// One-based round number
    pub round: u32,
    /// Seconds left in the round
    pub round_timer: f32,
    /// Seconds left in the countdown
    pub countdown_timer: f32,
    /// Knockout signal raised
    pub knockout_active: bool,
    /// Simulation paused
    pub paused: bool,
    /// Most recent round outcome
    pub last_result: Option<RoundResult>,
    /// Match winner, once decided
    pub match_winner: Option<CombatantId>,
    /// Both combatants, player one first
    pub combatants: [CombatantView; 2],
    /// Projectiles that have left their spawn delay
    pub projectiles: Vec<ProjectileView>,
}

impl DuelSnapshot {
    /// View of one combatant.
    #[must_use]
    pub fn combatant(&self, id: CombatantId) -> &CombatantView {
        &self.combatants[id.index()]
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> DuelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DuelError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuelConfig;

    #[test]
    fn test_combatant_view_mirrors_state() {
        let mut c = Combatant::new(CombatantId::ONE, &DuelConfig::default());
        c.apply_damage(25.0);
        c.request_defend_start();

        let view = CombatantView::from(&c);
        assert_eq!(view.health, 75.0);
        assert_eq!(view.health_ratio, 0.75);
        assert!(view.defending);
        assert!(!view.ultimate_ready);
        assert_eq!(view.facing, Facing::Right);
    }

    #[test]
    fn test_projectile_view() {
        let p = Projectile::new(CombatantId::TWO, Vec2::new(5.0, 6.0), -1.0, 100.0)
            .with_radius(10.0)
            .as_ultimate();
        let view = ProjectileView::from(&p);
        assert_eq!(view.owner, CombatantId::TWO);
        assert!(view.ultimate);
        assert!(!view.lingering);
        assert_eq!(view.radius, 10.0);
    }
}
