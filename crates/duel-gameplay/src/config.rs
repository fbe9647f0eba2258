//! Tunable parameters and the validation boundary.
//!
//! The simulation assumes every value it reads is sane; anything negative,
//! non-finite or outside its range is rejected here instead.

use duel_common::{CombatantId, ConfigError, Vec2};
use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::stats::{StatOverrides, StatProfile};

/// Wins needed to take the match.
pub const WINS_TO_MATCH: u8 = 2;

/// Maximum health of every combatant.
pub const MAX_HEALTH: f32 = 100.0;

pub(crate) fn finite(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite {
            field: field.to_string(),
        })
    }
}

pub(crate) fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

pub(crate) fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NotPositive {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

pub(crate) fn within(field: &str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Round pacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Length of a round in seconds
    pub round_duration: f32,
    /// Pre-round countdown in seconds
    pub countdown_duration: f32,
    /// Frozen presentation time after a round ends
    pub round_over_delay: f32,
    /// How long the knockout signal stays raised
    pub knockout_display: f32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            round_duration: 60.0,
            countdown_duration: 3.5,
            round_over_delay: 3.0,
            knockout_display: 1.2,
        }
    }
}

/// Gravity and dodge tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration (units per second squared)
    pub gravity: f32,
    /// Seconds of ultimate immunity opened by a jump
    pub dodge_window: f32,
    /// Radius of a size-1.0 projectile
    pub projectile_base_radius: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 2100.0,
            dodge_window: 0.3,
            projectile_base_radius: 8.0,
        }
    }
}

/// Shape of the vulnerable region inside a combatant's body box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxConfig {
    /// Fraction of the body width, on the facing side, that can be hit
    pub front_ratio: f32,
    /// Horizontal shrink as a fraction of body width
    pub margin_x: f32,
    /// Vertical shrink as a fraction of body height
    pub margin_y: f32,
}

impl Default for HitboxConfig {
    fn default() -> Self {
        Self {
            front_ratio: 0.5,
            margin_x: 0.2,
            margin_y: 0.1,
        }
    }
}

/// Arena dimensions and starting layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Arena width; projectiles past either side are culled
    pub width: f32,
    /// Arena height
    pub height: f32,
    /// Gap between the bottom of a grounded body and the arena bottom
    pub floor_offset: f32,
    /// Distance of each spawn point from its side wall
    pub spawn_inset: f32,
    /// Body box width
    pub body_width: f32,
    /// Body box height
    pub body_height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            floor_offset: 120.0,
            spawn_inset: 120.0,
            body_width: 180.0,
            body_height: 220.0,
        }
    }
}

impl ArenaConfig {
    /// Y of a grounded body's top edge.
    #[must_use]
    pub fn ground_y(&self) -> f32 {
        self.height - self.body_height - self.floor_offset
    }

    /// Body box size.
    #[must_use]
    pub fn body_size(&self) -> Vec2 {
        Vec2::new(self.body_width, self.body_height)
    }

    /// Starting top-left corner for a slot.
    #[must_use]
    pub fn spawn_point(&self, id: CombatantId) -> Vec2 {
        let x = if id == CombatantId::ONE {
            self.spawn_inset
        } else {
            self.width - self.spawn_inset - self.body_width
        };
        Vec2::new(x, self.ground_y())
    }
}

/// Scripted opponent tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Minimum delay before the first shot
    pub initial_delay_min: f32,
    /// Random extra delay before the first shot
    pub initial_delay_spread: f32,
    /// Minimum delay between shots
    pub fire_interval_min: f32,
    /// Random extra delay between shots
    pub fire_interval_spread: f32,
    /// Chance of casting an available ultimate instead of a normal shot
    pub ultimate_chance: f32,
    /// How close an incoming shot must be to the front edge to trigger a jump
    pub dodge_range: f32,
    /// Seed for repeatable decisions (random when unset)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            initial_delay_min: 1.0,
            initial_delay_spread: 1.0,
            fire_interval_min: 0.8,
            fire_interval_spread: 0.8,
            ultimate_chance: 0.3,
            dodge_range: 240.0,
            seed: None,
        }
    }
}

/// Who drives a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    /// Commands come from the host.
    #[default]
    Human,
    /// The scripted opponent drives this slot.
    Ai,
}

/// One combatant's setup.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterConfig {
    /// Character played
    pub character: Character,
    /// Who issues commands
    pub controller: ControllerKind,
    /// Per-stat replacements
    pub overrides: StatOverrides,
}

impl FighterConfig {
    /// The stat profile this fighter plays with.
    #[must_use]
    pub fn profile(&self) -> StatProfile {
        self.overrides.resolve(&self.character.base_profile())
    }
}

/// Complete duel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Round pacing
    pub round: RoundConfig,
    /// Gravity and dodge
    pub physics: PhysicsConfig,
    /// Vulnerable-region shape
    pub hitbox: HitboxConfig,
    /// Layout
    pub arena: ArenaConfig,
    /// Scripted opponent
    pub ai: AiConfig,
    /// Player one, then player two
    pub fighters: [FighterConfig; 2],
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            round: RoundConfig::default(),
            physics: PhysicsConfig::default(),
            hitbox: HitboxConfig::default(),
            arena: ArenaConfig::default(),
            ai: AiConfig::default(),
            fighters: [
                FighterConfig {
                    character: Character::Rudo,
                    controller: ControllerKind::Human,
                    overrides: StatOverrides::default(),
                },
                FighterConfig {
                    character: Character::Cenno,
                    controller: ControllerKind::Ai,
                    overrides: StatOverrides::default(),
                },
            ],
        }
    }
}

impl DuelConfig {
    /// Setup for a slot.
    #[must_use]
    pub fn fighter(&self, id: CombatantId) -> &FighterConfig {
        &self.fighters[id.index()]
    }

    /// Checks every value; the first offending field is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let round = &self.round;
        positive("round.round_duration", round.round_duration)?;
        non_negative("round.countdown_duration", round.countdown_duration)?;
        non_negative("round.round_over_delay", round.round_over_delay)?;
        non_negative("round.knockout_display", round.knockout_display)?;

        let physics = &self.physics;
        positive("physics.gravity", physics.gravity)?;
        non_negative("physics.dodge_window", physics.dodge_window)?;
        positive("physics.projectile_base_radius", physics.projectile_base_radius)?;

        let hitbox = &self.hitbox;
        positive("hitbox.front_ratio", hitbox.front_ratio)?;
        within("hitbox.front_ratio", hitbox.front_ratio, 0.0, 1.0)?;
        within("hitbox.margin_x", hitbox.margin_x, 0.0, 0.49)?;
        within("hitbox.margin_y", hitbox.margin_y, 0.0, 0.49)?;

        let arena = &self.arena;
        positive("arena.width", arena.width)?;
        positive("arena.height", arena.height)?;
        non_negative("arena.floor_offset", arena.floor_offset)?;
        non_negative("arena.spawn_inset", arena.spawn_inset)?;
        positive("arena.body_width", arena.body_width)?;
        positive("arena.body_height", arena.body_height)?;
        non_negative("arena.ground_y", arena.ground_y())?;

        let ai = &self.ai;
        non_negative("ai.initial_delay_min", ai.initial_delay_min)?;
        non_negative("ai.initial_delay_spread", ai.initial_delay_spread)?;
        non_negative("ai.fire_interval_min", ai.fire_interval_min)?;
        non_negative("ai.fire_interval_spread", ai.fire_interval_spread)?;
        within("ai.ultimate_chance", ai.ultimate_chance, 0.0, 1.0)?;
        non_negative("ai.dodge_range", ai.dodge_range)?;

        for id in CombatantId::all() {
            self.fighter(id)
                .profile()
                .validate(&format!("fighters.{}", id.index()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DuelConfig::default().validate().is_ok());
    }

    #[test]
    fn test_ground_and_spawn() {
        let arena = ArenaConfig::default();
        assert_eq!(arena.ground_y(), 380.0);
        assert_eq!(arena.spawn_point(CombatantId::ONE), Vec2::new(120.0, 380.0));
        assert_eq!(arena.spawn_point(CombatantId::TWO), Vec2::new(980.0, 380.0));
    }

    #[test]
    fn test_rejects_negative_round_duration() {
        let mut config = DuelConfig::default();
        config.round.round_duration = -5.0;
        let err = config.validate().expect_err("negative duration");
        assert_eq!(err.field(), "round.round_duration");
    }

    #[test]
    fn test_rejects_nan() {
        let mut config = DuelConfig::default();
        config.physics.gravity = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_rejects_front_ratio_out_of_range() {
        let mut config = DuelConfig::default();
        config.hitbox.front_ratio = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_override() {
        let mut config = DuelConfig::default();
        config.fighters[1].overrides.jump_cooldown = Some(-0.5);
        let err = config.validate().expect_err("negative override");
        assert_eq!(err.field(), "fighters.1.jump_cooldown");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DuelConfig =
            serde_json::from_str(r#"{"round": {"round_duration": 30.0}}"#).expect("parse");
        assert_eq!(config.round.round_duration, 30.0);
        assert_eq!(config.round.countdown_duration, 3.5);
        assert_eq!(config.fighters[1].controller, ControllerKind::Ai);
    }

    #[test]
    fn test_fighter_profile_applies_overrides() {
        let mut config = DuelConfig::default();
        config.fighters[0].overrides.shot_speed = Some(600.0);
        assert_eq!(config.fighter(CombatantId::ONE).profile().shot_speed, 600.0);
    }
}
