//! Host configuration.
//!
//! The file has an optional `[engine]` table for the run loop and an
//! optional `[duel]` table holding the simulation configuration. Every
//! field falls back to its default.

use std::fs;
use std::io;
use std::path::Path;

use duel_common::{ConfigError, DuelError, DuelResult};
use duel_gameplay::DuelConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configuration file name.
pub const CONFIG_FILE: &str = "duel.toml";

/// Fixed simulation step.
const DEFAULT_STEP: f32 = 1.0 / 60.0;

/// Longest run, in simulated seconds.
const DEFAULT_MAX_SECONDS: f32 = 20.0 * 60.0;

/// Run-loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Seconds per tick
    pub step: f32,
    /// Simulated time after which the run stops
    pub max_seconds: f32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            max_seconds: DEFAULT_MAX_SECONDS,
        }
    }
}

/// Everything the host reads from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Run loop
    pub engine: RunSettings,
    /// Simulation
    pub duel: DuelConfig,
}

impl EngineConfig {
    /// Loads and validates configuration from `path`.
    /// A missing file yields the defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> DuelResult<Self> {
        let path = path.as_ref();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("Config file {} not found, using defaults", path.display());
                return Ok(Self::default());
            },
            Err(e) => return Err(e.into()),
        };

        let config: Self =
            toml::from_str(&contents).map_err(|e| DuelError::Serialization(e.to_string()))?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks run settings and the duel configuration.
    pub fn validate(&self) -> DuelResult<()> {
        for (field, value) in [
            ("engine.step", self.engine.step),
            ("engine.max_seconds", self.engine.max_seconds),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive {
                    field: field.to_string(),
                    value,
                }
                .into());
            }
        }
        self.duel.validate()?;
        Ok(())
    }

    /// Writes the configuration as TOML.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> DuelResult<()> {
        let path = path.as_ref();
        let contents =
            toml::to_string_pretty(self).map_err(|e| DuelError::Serialization(e.to_string()))?;
        fs::write(path, contents)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_gameplay::{Character, ControllerKind};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config =
            EngineConfig::load_from("/nonexistent/path/duel.toml").expect("defaults");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.engine.max_seconds, 1200.0);
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
[engine]
max_seconds = 90

[duel.round]
round_duration = 30

[duel.ai]
seed = 42

[[duel.fighters]]
character = "vian"

[[duel.fighters]]
character = "rudo"
controller = "ai"

[duel.fighters.overrides]
shot_damage = 20.0
"#,
        )
        .expect("write config");

        let config = EngineConfig::load_from(&path).expect("valid config");
        assert_eq!(config.engine.max_seconds, 90.0);
        assert_eq!(config.engine.step, DEFAULT_STEP);
        assert_eq!(config.duel.round.round_duration, 30.0);
        assert_eq!(config.duel.round.countdown_duration, 3.5);
        assert_eq!(config.duel.ai.seed, Some(42));
        assert_eq!(config.duel.fighters[0].character, Character::Vian);
        assert_eq!(config.duel.fighters[0].controller, ControllerKind::Human);
        assert_eq!(config.duel.fighters[1].controller, ControllerKind::Ai);
        assert_eq!(config.duel.fighters[1].profile().shot_damage, 20.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[duel.hitbox]\nmargin_y = 0.7\n").expect("write config");

        match EngineConfig::load_from(&path) {
            Err(DuelError::Config(e)) => assert_eq!(e.field(), "hitbox.margin_y"),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_file_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[duel.round\n").expect("write config");

        assert!(matches!(
            EngineConfig::load_from(&path),
            Err(DuelError::Serialization(_))
        ));
    }

    #[test]
    fn test_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);

        let mut config = EngineConfig::default();
        config.engine.max_seconds = 45.0;
        config.duel.fighters[0].character = Character::Cenno;
        config.duel.ai.seed = Some(9);
        config.save_to(&path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded.engine.max_seconds, 45.0);
        assert_eq!(loaded.duel.fighters[0].character, Character::Cenno);
        assert_eq!(loaded.duel.ai.seed, Some(9));
    }

    #[test]
    fn test_zero_step_rejected() {
        let mut config = EngineConfig::default();
        config.engine.step = 0.0;
        assert!(config.validate().is_err());
    }
}
