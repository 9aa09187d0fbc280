//! Card configuration: copy, photos, particle tuning.
//!
//! Loaded from a JSON file (optional) and then overridden by CLI flags.
//! Unknown keys are rejected so a typo doesn't silently fall back to a default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::TrajectoryModel;

/// Config filename within the app's config directory.
const CONFIG_FILENAME: &str = "config.json";

/// Everything the card can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig {
    /// The question on the first screen.
    pub question: String,
    /// Headline after the yes.
    pub celebration: String,
    /// Directory holding `1.jpg .. N.jpg`.
    pub asset_root: PathBuf,
    /// How many photos to show, in order.
    pub photo_count: usize,
    pub particles: ParticleConfig,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            question: "Will you be my Valentine?".to_string(),
            celebration: "Yay! See you on the 14th!".to_string(),
            asset_root: PathBuf::from("/"),
            photo_count: 4,
            particles: ParticleConfig::default(),
        }
    }
}

/// Particle loop tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    /// Particles emitted per spawn tick (and in the initial batch).
    pub per_tick: usize,
    /// Milliseconds between spawn ticks.
    pub rate_ms: u64,
    /// Ceiling on live particles; oldest go first.
    pub max_particles: usize,
    /// Extra time after `duration + delay` before a particle is removed.
    pub buffer_ms: u64,
    pub trajectory: TrajectoryModel,
    /// Fixed rng seed. None draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            per_tick: 2,
            rate_ms: 140,
            max_particles: 60,
            buffer_ms: 200,
            trajectory: TrajectoryModel::Drift,
            seed: None,
        }
    }
}

impl ParticleConfig {
    /// Reject values the loop can't run with.
    pub fn validate(&self) -> Result<()> {
        if self.per_tick == 0 {
            return Err(Error::InvalidConfig("particles.per_tick must be at least 1".into()));
        }
        if self.rate_ms == 0 {
            return Err(Error::InvalidConfig("particles.rate_ms must be at least 1".into()));
        }
        if self.max_particles == 0 {
            return Err(Error::InvalidConfig(
                "particles.max_particles must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl CardConfig {
    pub fn validate(&self) -> Result<()> {
        self.particles.validate()
    }
}

/// Returns the default config path.
///
/// On macOS: ~/Library/Application Support/heartcard/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("heartcard")
        .join(CONFIG_FILENAME)
}

/// Parse and validate a config file.
pub fn load_config(path: &Path) -> Result<CardConfig> {
    let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config: CardConfig = serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Resolve the config to start from.
///
/// An explicit path must exist. The default path is optional: if it is
/// absent the built-in defaults are used.
pub fn resolve_config(explicit: Option<&Path>) -> Result<CardConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let path = default_config_path();
            if path.is_file() {
                load_config(&path)
            } else {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(CardConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_documented_values() {
        let c = CardConfig::default();
        assert_eq!(c.particles.per_tick, 2);
        assert_eq!(c.particles.rate_ms, 140);
        assert_eq!(c.particles.max_particles, 60);
        assert_eq!(c.particles.trajectory, TrajectoryModel::Drift);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let file = write_config(r#"{ "photo_count": 6, "particles": { "trajectory": "burst" } }"#);
        let c = load_config(file.path()).unwrap();
        assert_eq!(c.photo_count, 6);
        assert_eq!(c.particles.trajectory, TrajectoryModel::Burst);
        assert_eq!(c.particles.rate_ms, 140);
        assert_eq!(c.question, CardConfig::default().question);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config(r#"{ "colour": "red" }"#);
        assert!(matches!(load_config(file.path()), Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn zero_rate_is_invalid() {
        let file = write_config(r#"{ "particles": { "rate_ms": 0 } }"#);
        assert!(matches!(load_config(file.path()), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn zero_capacity_is_invalid() {
        let p = ParticleConfig {
            max_particles: 0,
            ..ParticleConfig::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(resolve_config(Some(&path)), Err(Error::ConfigRead { .. })));
    }

    #[test]
    fn config_round_trips_through_json() {
        let c = CardConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let back: CardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
