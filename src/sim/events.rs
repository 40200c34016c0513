//! Discrete events emitted by the engine for the presentation layer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Owner;

/// Who a projectile hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HitTarget {
    Player,
    Bot(String),
}

/// Something that happened during a tick or a lifecycle call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted,
    ProjectileFired {
        projectile_id: u32,
        owner: Owner,
    },
    Hit {
        projectile_id: u32,
        target: HitTarget,
        damage: u32,
        remaining_health: u32,
    },
    BotEliminated {
        bot_id: String,
        score_awarded: u64,
    },
    BotRespawned {
        bot_id: String,
        pos: Vec2,
    },
    PlayerEliminated,
    PlayerRespawned {
        pos: Vec2,
    },
    Reloaded {
        ammo: u32,
    },
}

/// A short message the host may show as a toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub duration_ms: u32,
}

impl Notification {
    fn new(message: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            message: message.into(),
            duration_ms,
        }
    }
}

impl GameEvent {
    /// Toast text for events the player should be told about
    pub fn notification(&self) -> Option<Notification> {
        match self {
            GameEvent::MatchStarted => Some(Notification::new(
                "Battle arena loaded! Use WASD to move, mouse to aim and shoot!",
                4000,
            )),
            GameEvent::Reloaded { .. } => Some(Notification::new("Reloaded!", 1000)),
            GameEvent::PlayerEliminated => {
                Some(Notification::new("You were eliminated! Respawning...", 2000))
            }
            GameEvent::BotEliminated { score_awarded, .. } => Some(Notification::new(
                format!("Bot eliminated! +{score_awarded} points"),
                1500,
            )),
            _ => None,
        }
    }
}
