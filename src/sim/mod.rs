//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (bots by spawn order, projectiles by id)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod events;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod world;

pub use events::{GameEvent, HitTarget, Notification};
pub use spawn::{SpawnRegion, sample_spawn_point};
pub use state::{Bot, MatchPhase, Owner, Player, Projectile, SimulationState};
pub use tick::{fire, reload, step, tick};
pub use world::{Arena, Wall};
