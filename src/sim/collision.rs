//! Projectile hit detection
//!
//! Everything is a point-vs-circle test: a projectile hits a target when its
//! center is strictly closer than the target's hit radius.

use glam::Vec2;

use super::state::{Bot, Owner, Projectile};

/// Point-vs-circle proximity test
#[inline]
pub fn within_radius(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

/// Whether `projectile` can damage the player at all
#[inline]
pub fn can_hit_player(projectile: &Projectile) -> bool {
    !projectile.owner.is_player()
}

/// Whether `projectile` can damage bots at all (bots never hurt bots)
#[inline]
pub fn can_hit_bot(projectile: &Projectile) -> bool {
    projectile.owner == Owner::Player
}

/// Index of the first live bot the projectile hits, if any. A bot eliminated
/// earlier in the same pass waits at 0 health for its respawn and is skipped.
pub fn first_bot_hit(projectile: &Projectile, bots: &[Bot], hit_radius: f32) -> Option<usize> {
    if !can_hit_bot(projectile) {
        return None;
    }
    bots.iter()
        .position(|bot| bot.health > 0 && within_radius(projectile.pos, bot.pos, hit_radius))
}

/// Whether the projectile hits the player at `player_pos`
pub fn hits_player(projectile: &Projectile, player_pos: Vec2, hit_radius: f32) -> bool {
    can_hit_player(projectile) && within_radius(projectile.pos, player_pos, hit_radius)
}
