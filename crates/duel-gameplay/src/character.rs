//! Playable characters and their ultimate spawn patterns.
//!
//! Character identity is resolved once, at combatant creation, into a base
//! [`StatProfile`] and an [`UltimatePattern`]. Neither the fire path nor the
//! collision path branches on the character after that.

use duel_common::{CombatantId, Vec2};
use serde::{Deserialize, Serialize};

use crate::projectile::Projectile;
use crate::stats::StatProfile;

/// Seconds a lingering ultimate holds position after landing.
pub const LINGER_SECONDS: f32 = 0.15;

/// Seconds between consecutive shots of a decoy volley.
pub const DECOY_STAGGER_SECONDS: f32 = 0.12;

/// A playable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Character {
    /// Heavy single-shot ultimate.
    #[default]
    Rudo,
    /// Ultimate that lingers where it lands.
    Cenno,
    /// Ultimate hidden behind two decoys.
    Vian,
}

impl Character {
    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Rudo => "Rudo Ben",
            Self::Cenno => "Cenno Kio",
            Self::Vian => "Vian Naru",
        }
    }

    /// Get all characters.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Rudo, Self::Cenno, Self::Vian]
    }

    /// Base stats before any overrides.
    #[must_use]
    pub const fn base_profile(self) -> StatProfile {
        match self {
            Self::Rudo => StatProfile {
                jump_impulse: 900.0,
                jump_cooldown: 2.5,
                attack_cooldown: 0.5,
                shot_speed: 520.0,
                shot_damage: 16.0,
                shot_size: 1.0,
                ultimate_damage: 44.0,
                ultimate_speed: 740.0,
                ultimate_windup: 0.9,
                ultimate_size: 1.0,
                defend_duration: 1.0,
                defend_cooldown: 2.0,
            },
            Self::Cenno => StatProfile {
                jump_impulse: 850.0,
                jump_cooldown: 2.5,
                attack_cooldown: 0.35,
                shot_speed: 440.0,
                shot_damage: 13.0,
                shot_size: 1.25,
                ultimate_damage: 42.0,
                ultimate_speed: 640.0,
                ultimate_windup: 1.1,
                ultimate_size: 1.25,
                defend_duration: 1.0,
                defend_cooldown: 2.0,
            },
            Self::Vian => StatProfile {
                jump_impulse: 900.0,
                jump_cooldown: 2.0,
                attack_cooldown: 0.28,
                shot_speed: 680.0,
                shot_damage: 12.0,
                shot_size: 0.9,
                ultimate_damage: 41.0,
                ultimate_speed: 700.0,
                ultimate_windup: 1.0,
                ultimate_size: 0.9,
                defend_duration: 1.0,
                defend_cooldown: 2.0,
            },
        }
    }

    /// How this character's ultimate spawns.
    #[must_use]
    pub const fn ultimate_pattern(self) -> UltimatePattern {
        match self {
            Self::Rudo => UltimatePattern::Single,
            Self::Cenno => UltimatePattern::Lingering {
                linger: LINGER_SECONDS,
            },
            Self::Vian => UltimatePattern::DecoyVolley {
                decoys: 2,
                stagger: DECOY_STAGGER_SECONDS,
            },
        }
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Where and by whom a volley is launched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    /// Firing combatant
    pub owner: CombatantId,
    /// Spawn point (leading edge, half body height)
    pub origin: Vec2,
    /// Horizontal travel direction (+1 or -1)
    pub direction: f32,
    /// Radius of a size-1.0 projectile
    pub base_radius: f32,
}

impl Launch {
    fn projectile(&self, speed: f32, damage: f32, size: f32) -> Projectile {
        Projectile::new(self.owner, self.origin, self.direction, speed)
            .with_damage(damage)
            .with_radius(self.base_radius * size)
    }
}

/// Closed set of ultimate behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum UltimatePattern {
    /// One projectile carrying full damage.
    Single,
    /// One projectile that holds position for `linger` seconds after a hit.
    Lingering {
        /// Hold time after landing
        linger: f32,
    },
    /// `decoys` ghost shots followed by the real one, `stagger` seconds apart.
    DecoyVolley {
        /// Number of ghost shots ahead of the real one
        decoys: u8,
        /// Delay between consecutive shots
        stagger: f32,
    },
}

impl UltimatePattern {
    /// Builds the ultimate projectiles for one cast.
    #[must_use]
    pub fn build(&self, launch: &Launch, profile: &StatProfile) -> Vec<Projectile> {
        let ultimate = |damage: f32| {
            launch
                .projectile(profile.ultimate_speed, damage, profile.ultimate_size)
                .as_ultimate()
        };

        match *self {
            Self::Single => vec![ultimate(profile.ultimate_damage)],
            Self::Lingering { linger } => {
                vec![ultimate(profile.ultimate_damage).with_linger(linger)]
            },
            Self::DecoyVolley { decoys, stagger } => {
                let mut volley: Vec<Projectile> = (0..decoys)
                    .map(|i| ultimate(0.0).as_ghost().with_delay(f32::from(i) * stagger))
                    .collect();
                volley.push(
                    ultimate(profile.ultimate_damage).with_delay(f32::from(decoys) * stagger),
                );
                volley
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch() -> Launch {
        Launch {
            owner: CombatantId::ONE,
            origin: Vec2::new(300.0, 490.0),
            direction: 1.0,
            base_radius: 8.0,
        }
    }

    #[test]
    fn test_single_ultimate() {
        let profile = Character::Rudo.base_profile();
        let shots = Character::Rudo.ultimate_pattern().build(&launch(), &profile);
        assert_eq!(shots.len(), 1);
        assert!(shots[0].is_ultimate);
        assert!(!shots[0].ghost);
        assert_eq!(shots[0].damage, 44.0);
        assert_eq!(shots[0].linger_duration, 0.0);
    }

    #[test]
    fn test_lingering_ultimate() {
        let profile = Character::Cenno.base_profile();
        let shots = Character::Cenno.ultimate_pattern().build(&launch(), &profile);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].linger_duration, LINGER_SECONDS);
        assert_eq!(shots[0].radius, 10.0);
    }

    #[test]
    fn test_decoy_volley_order() {
        let profile = Character::Vian.base_profile();
        let shots = Character::Vian.ultimate_pattern().build(&launch(), &profile);
        assert_eq!(shots.len(), 3);

        assert!(shots[0].ghost && shots[1].ghost && !shots[2].ghost);
        assert_eq!(shots[0].damage, 0.0);
        assert_eq!(shots[1].damage, 0.0);
        assert_eq!(shots[2].damage, 41.0);

        assert_eq!(shots[0].spawn_delay, 0.0);
        assert!((shots[1].spawn_delay - DECOY_STAGGER_SECONDS).abs() < 1e-6);
        assert!((shots[2].spawn_delay - 2.0 * DECOY_STAGGER_SECONDS).abs() < 1e-6);
        assert!(shots.iter().all(|p| p.is_ultimate));
    }

    #[test]
    fn test_character_serde_names() {
        let json = serde_json::to_string(&Character::Cenno).expect("serialize");
        assert_eq!(json, "\"cenno\"");
    }
}
