//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON file may override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Wall;

/// Errors raised while loading or validating tuning data
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning file: {err}"),
            Self::Parse(err) => write!(f, "malformed tuning json: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Balance values for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    pub wall_thickness: f32,
    /// Interior obstacles (cosmetic, never block movement or bullets)
    pub obstacles: Vec<Wall>,

    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub player_max_health: u32,
    pub player_max_ammo: u32,
    pub player_weapon: String,
    pub player_bullet_damage: u32,

    // === Bots ===
    pub bot_count: usize,
    pub bot_size: f32,
    pub bot_speed: f32,
    pub bot_max_health: u32,
    pub bot_aggro_radius: f32,
    pub bot_fire_radius: f32,
    pub bot_fire_cooldown_ms: f64,
    pub bot_bullet_damage: u32,
    pub bot_bullet_speed_factor: f32,

    // === Bullets ===
    pub bullet_speed: f32,

    // === Scoring ===
    pub kill_score: u64,
    pub kill_feed_length: usize,

    // === Spawning ===
    /// Inset of the spawn region from every arena edge
    pub spawn_margin: f32,
    pub min_spawn_distance: f32,
    pub max_spawn_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            obstacles: OBSTACLES
                .iter()
                .map(|&(x, y, width, height)| Wall::new(x, y, width, height))
                .collect(),

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            player_max_ammo: PLAYER_MAX_AMMO,
            player_weapon: PLAYER_WEAPON.to_string(),
            player_bullet_damage: PLAYER_BULLET_DAMAGE,

            bot_count: BOT_COUNT,
            bot_size: BOT_SIZE,
            bot_speed: BOT_SPEED,
            bot_max_health: BOT_MAX_HEALTH,
            bot_aggro_radius: BOT_AGGRO_RADIUS,
            bot_fire_radius: BOT_FIRE_RADIUS,
            bot_fire_cooldown_ms: BOT_FIRE_COOLDOWN_MS,
            bot_bullet_damage: BOT_BULLET_DAMAGE,
            bot_bullet_speed_factor: BOT_BULLET_SPEED_FACTOR,

            bullet_speed: BULLET_SPEED,

            kill_score: KILL_SCORE,
            kill_feed_length: KILL_FEED_LENGTH,

            spawn_margin: SPAWN_MARGIN,
            min_spawn_distance: MIN_SPAWN_DISTANCE,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Half of the player's visual size (clamp margin)
    pub fn player_half_size(&self) -> f32 {
        self.player_size / 2.0
    }

    /// Half of a bot's visual size (clamp margin)
    pub fn bot_half_size(&self) -> f32 {
        self.bot_size / 2.0
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("player_size", self.player_size)?;
        positive("bot_size", self.bot_size)?;
        positive("player_speed", self.player_speed)?;
        positive("bot_speed", self.bot_speed)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("bot_bullet_speed_factor", self.bot_bullet_speed_factor)?;
        positive("bot_aggro_radius", self.bot_aggro_radius)?;
        positive("bot_fire_radius", self.bot_fire_radius)?;

        if self.player_max_health == 0 {
            return Err(TuningError::Invalid {
                field: "player_max_health",
                reason: "must be at least 1".into(),
            });
        }
        if self.bot_max_health == 0 {
            return Err(TuningError::Invalid {
                field: "bot_max_health",
                reason: "must be at least 1".into(),
            });
        }
        if self.bot_fire_radius > self.bot_aggro_radius {
            return Err(TuningError::Invalid {
                field: "bot_fire_radius",
                reason: format!(
                    "{} exceeds aggro radius {}",
                    self.bot_fire_radius, self.bot_aggro_radius
                ),
            });
        }
        if !(self.bot_fire_cooldown_ms >= 0.0) {
            return Err(TuningError::Invalid {
                field: "bot_fire_cooldown_ms",
                reason: "must be non-negative".into(),
            });
        }
        let margin_limit = self.arena_width.min(self.arena_height) / 2.0;
        if !(self.spawn_margin >= 0.0 && self.spawn_margin < margin_limit) {
            return Err(TuningError::Invalid {
                field: "spawn_margin",
                reason: format!("must be in [0, {margin_limit}) for a non-empty spawn region"),
            });
        }
        let arena_limit = margin_limit * 2.0;
        if self.player_size >= arena_limit {
            return Err(TuningError::Invalid {
                field: "player_size",
                reason: "player must fit inside the arena".into(),
            });
        }
        if self.bot_size >= arena_limit {
            return Err(TuningError::Invalid {
                field: "bot_size",
                reason: "bots must fit inside the arena".into(),
            });
        }
        if self.spawn_margin < self.bot_half_size() {
            return Err(TuningError::Invalid {
                field: "spawn_margin",
                reason: format!(
                    "{} would spawn bots outside the clamp band (at least {} needed)",
                    self.spawn_margin,
                    self.bot_half_size()
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.obstacles.len(), 4);
        assert_eq!(tuning.player_half_size(), 10.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "bot_count": 3, "kill_score": 250 }"#).unwrap();
        assert_eq!(tuning.bot_count, 3);
        assert_eq!(tuning.kill_score, 250);
        assert_eq!(tuning.bullet_speed, BULLET_SPEED);
        assert_eq!(tuning.player_weapon, "pistol");
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json_str(r#"{ "arena_width": -5.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "arena_width", .. }));

        let err = Tuning::from_json_str(r#"{ "bot_fire_radius": 500.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "bot_fire_radius", .. }));

        let err = Tuning::from_json_str(r#"{ "spawn_margin": 400.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn_margin", .. }));

        let err = Tuning::from_json_str(r#"{ "player_size": 700.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "player_size", .. }));
    }

    #[test]
    fn test_spawn_margin_covers_bot_half_size() {
        let err = Tuning::from_json_str(r#"{ "spawn_margin": 0.0, "min_spawn_distance": 10000.0 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn_margin", .. }));

        let err = Tuning::from_json_str(r#"{ "spawn_margin": 8.9 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn_margin", .. }));

        let tuning = Tuning::from_json_str(r#"{ "spawn_margin": 9.0 }"#).unwrap();
        assert_eq!(tuning.spawn_margin, tuning.bot_half_size());
    }

    #[test]
    fn test_oversized_bot_names_bot_size() {
        let err = Tuning::from_json_str(r#"{ "bot_size": 600.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "bot_size", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("malformed tuning json"));
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
