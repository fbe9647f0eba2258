//! Per-combatant stat profiles and tunable overrides.

use duel_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::config::{non_negative, positive};

/// Movement, attack and defend tuning for one combatant.
///
/// Profiles are resolved once per round from the character's base values
/// and any configured overrides, and stay fixed for the rest of the round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatProfile {
    /// Upward launch speed of a jump (units per second)
    pub jump_impulse: f32,
    /// Seconds before another jump is allowed
    pub jump_cooldown: f32,
    /// Seconds between normal shots
    pub attack_cooldown: f32,
    /// Normal shot speed (units per second)
    pub shot_speed: f32,
    /// Normal shot damage
    pub shot_damage: f32,
    /// Normal shot size multiplier
    pub shot_size: f32,
    /// Ultimate damage
    pub ultimate_damage: f32,
    /// Ultimate speed (units per second)
    pub ultimate_speed: f32,
    /// Seconds the attack control must be held to release an ultimate
    pub ultimate_windup: f32,
    /// Ultimate size multiplier
    pub ultimate_size: f32,
    /// Seconds a defend stance lasts before expiring
    pub defend_duration: f32,
    /// Seconds before defending is allowed again
    pub defend_cooldown: f32,
}

impl StatProfile {
    /// Validates every field, naming offenders under `prefix`.
    pub fn validate(&self, prefix: &str) -> Result<(), ConfigError> {
        let field = |name: &str| format!("{prefix}.{name}");
        positive(&field("jump_impulse"), self.jump_impulse)?;
        non_negative(&field("jump_cooldown"), self.jump_cooldown)?;
        non_negative(&field("attack_cooldown"), self.attack_cooldown)?;
        positive(&field("shot_speed"), self.shot_speed)?;
        non_negative(&field("shot_damage"), self.shot_damage)?;
        positive(&field("shot_size"), self.shot_size)?;
        non_negative(&field("ultimate_damage"), self.ultimate_damage)?;
        positive(&field("ultimate_speed"), self.ultimate_speed)?;
        non_negative(&field("ultimate_windup"), self.ultimate_windup)?;
        positive(&field("ultimate_size"), self.ultimate_size)?;
        non_negative(&field("defend_duration"), self.defend_duration)?;
        non_negative(&field("defend_cooldown"), self.defend_cooldown)?;
        Ok(())
    }
}

/// Optional per-stat replacements layered over a character's base profile.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatOverrides {
    /// Replaces [`StatProfile::jump_impulse`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jump_impulse: Option<f32>,
    /// Replaces [`StatProfile::jump_cooldown`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jump_cooldown: Option<f32>,
    /// Replaces [`StatProfile::attack_cooldown`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_cooldown: Option<f32>,
    /// Replaces [`StatProfile::shot_speed`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_speed: Option<f32>,
    /// Replaces [`StatProfile::shot_damage`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_damage: Option<f32>,
    /// Replaces [`StatProfile::shot_size`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_size: Option<f32>,
    /// Replaces [`StatProfile::ultimate_damage`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultimate_damage: Option<f32>,
    /// Replaces [`StatProfile::ultimate_speed`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultimate_speed: Option<f32>,
    /// Replaces [`StatProfile::ultimate_windup`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultimate_windup: Option<f32>,
    /// Replaces [`StatProfile::ultimate_size`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultimate_size: Option<f32>,
    /// Replaces [`StatProfile::defend_duration`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defend_duration: Option<f32>,
    /// Replaces [`StatProfile::defend_cooldown`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defend_cooldown: Option<f32>,
}

impl StatOverrides {
    /// Layers these overrides over `base`.
    #[must_use]
    pub fn resolve(&self, base: &StatProfile) -> StatProfile {
        StatProfile {
            jump_impulse: self.jump_impulse.unwrap_or(base.jump_impulse),
            jump_cooldown: self.jump_cooldown.unwrap_or(base.jump_cooldown),
            attack_cooldown: self.attack_cooldown.unwrap_or(base.attack_cooldown),
            shot_speed: self.shot_speed.unwrap_or(base.shot_speed),
            shot_damage: self.shot_damage.unwrap_or(base.shot_damage),
            shot_size: self.shot_size.unwrap_or(base.shot_size),
            ultimate_damage: self.ultimate_damage.unwrap_or(base.ultimate_damage),
            ultimate_speed: self.ultimate_speed.unwrap_or(base.ultimate_speed),
            ultimate_windup: self.ultimate_windup.unwrap_or(base.ultimate_windup),
            ultimate_size: self.ultimate_size.unwrap_or(base.ultimate_size),
            defend_duration: self.defend_duration.unwrap_or(base.defend_duration),
            defend_cooldown: self.defend_cooldown.unwrap_or(base.defend_cooldown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;

    #[test]
    fn test_empty_overrides_keep_base() {
        let base = Character::Rudo.base_profile();
        let overrides = StatOverrides::default();
        assert_eq!(overrides.resolve(&base), base);
    }

    #[test]
    fn test_override_single_field() {
        let base = Character::Cenno.base_profile();
        let overrides = StatOverrides {
            shot_damage: Some(99.0),
            ..Default::default()
        };
        let resolved = overrides.resolve(&base);
        assert_eq!(resolved.shot_damage, 99.0);
        assert_eq!(resolved.shot_speed, base.shot_speed);
    }

    #[test]
    fn test_validate_rejects_negative_cooldown() {
        let mut profile = Character::Vian.base_profile();
        profile.defend_cooldown = -1.0;
        let err = profile.validate("fighters.0").expect_err("negative cooldown");
        assert_eq!(err.field(), "fighters.0.defend_cooldown");
    }

    #[test]
    fn test_overrides_parse_partial_json() {
        let overrides: StatOverrides =
            serde_json::from_str(r#"{"jump_cooldown": 1.5}"#).expect("valid overrides");
        assert_eq!(overrides.jump_cooldown, Some(1.5));
        assert!(overrides.shot_speed.is_none());
    }
}
