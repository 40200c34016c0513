//! Bot behaviour
//!
//! One distance-gated rule: bots inside the aggro radius chase the player,
//! and inside the fire radius they shoot on a cooldown. Everything farther
//! away stands still.

use glam::Vec2;

use super::state::Bot;
use super::world::Arena;
use crate::tuning::Tuning;
use crate::{angle_to, heading};

/// A shot a bot wants to fire this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub origin: Vec2,
    pub vel: Vec2,
    pub damage: u32,
}

/// Whether the cooldown since `last_shot_ms` has fully elapsed at `now_ms`
#[inline]
pub fn cooldown_elapsed(last_shot_ms: Option<f64>, now_ms: f64, cooldown_ms: f64) -> bool {
    match last_shot_ms {
        Some(last) => now_ms - last > cooldown_ms,
        None => true,
    }
}

/// Advance one bot toward the player. Returns the shot to spawn, if any.
pub fn update_bot(
    bot: &mut Bot,
    player_pos: Vec2,
    now_ms: f64,
    arena: &Arena,
    tuning: &Tuning,
) -> Option<ShotRequest> {
    let to_player = player_pos - bot.pos;
    let dist = to_player.length();
    if dist >= tuning.bot_aggro_radius {
        return None;
    }

    let angle = angle_to(bot.pos, player_pos);
    let origin = bot.pos;

    let mut shot = None;
    if dist < tuning.bot_fire_radius
        && cooldown_elapsed(bot.last_shot_ms, now_ms, tuning.bot_fire_cooldown_ms)
    {
        shot = Some(ShotRequest {
            origin,
            vel: heading(angle) * tuning.bullet_speed * tuning.bot_bullet_speed_factor,
            damage: tuning.bot_bullet_damage,
        });
        bot.last_shot_ms = Some(now_ms);
    }

    bot.pos = arena.clamp(bot.pos + heading(angle) * bot.speed, tuning.bot_half_size());
    bot.angle = angle;
    bot.target = player_pos;

    shot
}
