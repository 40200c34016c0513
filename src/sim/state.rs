//! Match state and core simulation types
//!
//! Everything the engine reads or writes during a tick lives in
//! [`SimulationState`]; presentation only ever sees it through snapshots.

use std::collections::VecDeque;
use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::spawn::{SpawnRegion, sample_spawn_point};
use super::world::{Arena, Wall};
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Not started yet
    Idle,
    /// Ticking
    Running,
    /// Stopped by the host; state is frozen
    Paused,
}

/// Side a projectile belongs to; it can only hurt the opposing side
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Bot(String),
}

impl Owner {
    pub fn is_player(&self) -> bool {
        matches!(self, Owner::Player)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Player => f.write_str("player"),
            Owner::Bot(id) => f.write_str(id),
        }
    }
}

/// The single human-controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle (radians), toward the pointer
    pub angle: f32,
    pub health: u32,
    pub max_health: u32,
    /// Units per tick
    pub speed: f32,
    pub weapon: String,
    pub ammo: u32,
    pub max_ammo: u32,
    pub score: u64,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            angle: 0.0,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            speed: tuning.player_speed,
            weapon: tuning.player_weapon.clone(),
            ammo: tuning.player_max_ammo,
            max_ammo: tuning.player_max_ammo,
            score: 0,
        }
    }

    /// Subtract damage, flooring at zero. Returns true if this was lethal.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        self.health = self.health.saturating_sub(damage);
        self.health == 0
    }

    /// Back to full health and ammo at `pos`; score is kept
    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.health = self.max_health;
        self.ammo = self.max_ammo;
    }
}

/// An AI opponent. Never removed; dies by respawning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    pub id: String,
    pub pos: Vec2,
    pub angle: f32,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    /// Current pursuit point
    pub target: Vec2,
    /// Simulation time of the last shot (None until the first one)
    pub last_shot_ms: Option<f64>,
}

impl Bot {
    pub fn new(id: impl Into<String>, pos: Vec2, angle: f32, tuning: &Tuning) -> Self {
        Self {
            id: id.into(),
            pos,
            angle,
            health: tuning.bot_max_health,
            max_health: tuning.bot_max_health,
            speed: tuning.bot_speed,
            target: pos,
            last_shot_ms: None,
        }
    }

    /// Subtract damage, flooring at zero. Returns true if this was lethal.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        self.health = self.health.saturating_sub(damage);
        self.health == 0
    }

    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.target = pos;
        self.health = self.max_health;
    }

    pub fn owner(&self) -> Owner {
        Owner::Bot(self.id.clone())
    }
}

/// A bullet in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub damage: u32,
    pub owner: Owner,
}

/// Complete match state (deterministic given seed and intents)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Match seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub arena: Arena,
    pub phase: MatchPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulation clock in milliseconds
    pub time_ms: f64,
    pub player: Player,
    /// Bots in stable order; the count never changes after start
    pub bots: Vec<Bot>,
    /// Active projectiles (ordered by id)
    pub projectiles: Vec<Projectile>,
    pub walls: Vec<Wall>,
    /// Kill messages, newest first
    pub kill_feed: VecDeque<String>,
    /// Serialized with the rest of the state so a restored match stays
    /// deterministic
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl SimulationState {
    /// Create an idle match; nothing is spawned until [`SimulationState::start`]
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let arena = Arena::from_tuning(&tuning);
        let player = Player::new(arena.center(), &tuning);
        Self {
            seed,
            arena,
            phase: MatchPhase::Idle,
            time_ticks: 0,
            time_ms: 0.0,
            player,
            bots: Vec::new(),
            projectiles: Vec::new(),
            walls: Vec::new(),
            kill_feed: VecDeque::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Initialize a fresh match: walls, player at center, bots spawned away from center
    pub fn start(&mut self) -> Vec<GameEvent> {
        let center = self.arena.center();
        self.walls = self
            .arena
            .walls(self.tuning.wall_thickness, &self.tuning.obstacles);
        self.player = Player::new(center, &self.tuning);
        self.projectiles.clear();
        self.kill_feed.clear();
        self.time_ticks = 0;
        self.time_ms = 0.0;

        self.bots.clear();
        for i in 0..self.tuning.bot_count {
            let pos = self.sample_spawn(center);
            let angle = normalize_angle(self.rng.random_range(0.0..std::f32::consts::TAU));
            let bot = Bot::new(format!("bot_{i}"), pos, angle, &self.tuning);
            self.bots.push(bot);
        }

        self.phase = MatchPhase::Running;
        log::info!(
            "Match started (seed {}, {} bots, {} walls)",
            self.seed,
            self.bots.len(),
            self.walls.len()
        );
        vec![GameEvent::MatchStarted]
    }

    /// Halt ticking; the current state is kept as-is
    pub fn stop(&mut self) {
        if self.phase == MatchPhase::Running {
            self.phase = MatchPhase::Paused;
            log::info!("Match paused at tick {}", self.time_ticks);
        }
    }

    /// Continue a paused match
    pub fn resume(&mut self) {
        if self.phase == MatchPhase::Paused {
            self.phase = MatchPhase::Running;
            log::info!("Match resumed at tick {}", self.time_ticks);
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Pick a random spawn point at least the minimum spawn distance from `avoid`
    pub fn sample_spawn(&mut self, avoid: Vec2) -> Vec2 {
        let region = SpawnRegion::inset(&self.arena, self.tuning.spawn_margin);
        sample_spawn_point(
            &mut self.rng,
            &region,
            avoid,
            self.tuning.min_spawn_distance,
            self.tuning.max_spawn_attempts,
        )
    }

    /// Push a kill message, keeping only the newest entries
    pub fn push_kill_feed(&mut self, entry: String) {
        self.kill_feed.push_front(entry);
        self.kill_feed.truncate(self.tuning.kill_feed_length);
    }

    pub fn bot(&self, id: &str) -> Option<&Bot> {
        self.bots.iter().find(|b| b.id == id)
    }
}
