//! Arena Shooter - A top-down arena shooter against AI bots
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, bot AI, projectiles, damage, respawn)
//! - `input`: Raw device events aggregated into per-tick intent snapshots
//! - `session`: Fixed-rate driver, lifecycle controls and notifications
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{InputAggregator, Intent, KeyCode, MovementKeys};
pub use session::{ArenaSession, Snapshot};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    pub const WALL_THICKNESS: f32 = 20.0;

    /// Player defaults (speeds are arena units per tick)
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    pub const PLAYER_MAX_AMMO: u32 = 12;
    pub const PLAYER_WEAPON: &str = "pistol";

    /// Bot defaults
    pub const BOT_SIZE: f32 = 18.0;
    pub const BOT_SPEED: f32 = 1.5;
    pub const BOT_MAX_HEALTH: u32 = 60;
    pub const BOT_COUNT: usize = 5;
    /// Bots pursue the player inside this distance
    pub const BOT_AGGRO_RADIUS: f32 = 200.0;
    /// Bots may shoot inside this distance
    pub const BOT_FIRE_RADIUS: f32 = 150.0;
    pub const BOT_FIRE_COOLDOWN_MS: f64 = 1500.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 8.0;
    pub const PLAYER_BULLET_DAMAGE: u32 = 25;
    pub const BOT_BULLET_DAMAGE: u32 = 15;
    /// Bot bullets travel slower than the player's
    pub const BOT_BULLET_SPEED_FACTOR: f32 = 0.8;

    /// Scoring
    pub const KILL_SCORE: u64 = 100;
    pub const KILL_FEED_LENGTH: usize = 5;

    /// Spawn sampling
    pub const SPAWN_MARGIN: f32 = 50.0;
    pub const MIN_SPAWN_DISTANCE: f32 = 100.0;
    pub const MAX_SPAWN_ATTEMPTS: u32 = 100;

    /// Interior obstacles as (x, y, width, height)
    pub const OBSTACLES: [(f32, f32, f32, f32); 4] = [
        (200.0, 150.0, 100.0, 20.0),
        (500.0, 300.0, 20.0, 100.0),
        (150.0, 400.0, 80.0, 20.0),
        (600.0, 100.0, 60.0, 60.0),
    ];
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Angle of the direction from `from` to `to` (0 when the points coincide)
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
