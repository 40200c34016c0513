//! Fixed timestep simulation tick
//!
//! Core game loop that advances the match deterministically. Order per tick:
//! reload, fire, player movement, bots, projectile integration, collisions.

use glam::Vec2;

use super::ai;
use super::collision;
use super::events::{GameEvent, HitTarget};
use super::state::{Owner, Projectile, SimulationState};
use crate::input::Intent;
use crate::{angle_to, heading};

/// Advance the match by one fixed timestep. Returns what happened.
///
/// Does nothing unless the match is running.
pub fn tick(state: &mut SimulationState, intent: &Intent, dt: f32) -> Vec<GameEvent> {
    if !state.is_running() {
        return Vec::new();
    }

    let mut events = Vec::new();
    state.time_ticks += 1;
    state.time_ms += f64::from(dt) * 1000.0;

    if intent.reload && reload(state) {
        events.push(GameEvent::Reloaded {
            ammo: state.player.ammo,
        });
    }

    if intent.fire {
        // A click lands between ticks, so it aims from the pre-move position
        let pointer = intent.pointer_or(state.player.pos);
        if let Some(projectile_id) = fire(state, pointer) {
            events.push(GameEvent::ProjectileFired {
                projectile_id,
                owner: Owner::Player,
            });
        }
    }

    move_player(state, intent);
    update_bots(state, &mut events);
    integrate_projectiles(state);
    resolve_collisions(state, &mut events);

    events
}

/// Pure variant of [`tick`]: returns the next state instead of mutating
pub fn step(
    state: &SimulationState,
    intent: &Intent,
    dt: f32,
) -> (SimulationState, Vec<GameEvent>) {
    let mut next = state.clone();
    let events = tick(&mut next, intent, dt);
    (next, events)
}

/// Fire one player bullet toward `pointer`.
///
/// Returns the new projectile id, or None when out of ammo or not running.
pub fn fire(state: &mut SimulationState, pointer: Vec2) -> Option<u32> {
    if !state.is_running() || state.player.ammo == 0 {
        return None;
    }

    let angle = angle_to(state.player.pos, pointer);
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: state.player.pos,
        vel: heading(angle) * state.tuning.bullet_speed,
        damage: state.tuning.player_bullet_damage,
        owner: Owner::Player,
    });
    state.player.ammo -= 1;
    Some(id)
}

/// Refill ammo instantly. Returns true if anything changed.
pub fn reload(state: &mut SimulationState) -> bool {
    if !state.is_running() || state.player.ammo >= state.player.max_ammo {
        return false;
    }
    state.player.ammo = state.player.max_ammo;
    true
}

fn move_player(state: &mut SimulationState, intent: &Intent) {
    let half_size = state.tuning.player_half_size();
    let player = &mut state.player;

    let delta = intent.movement.axis() * player.speed;
    player.pos = state.arena.clamp(player.pos + delta, half_size);
    player.angle = angle_to(player.pos, intent.pointer_or(player.pos));
}

fn update_bots(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let player_pos = state.player.pos;
    let now_ms = state.time_ms;

    // Collect shots first, ids are allocated afterwards
    let mut shots = Vec::new();
    for bot in &mut state.bots {
        if let Some(shot) = ai::update_bot(bot, player_pos, now_ms, &state.arena, &state.tuning) {
            shots.push((bot.owner(), shot));
        }
    }

    for (owner, shot) in shots {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: shot.origin,
            vel: shot.vel,
            damage: shot.damage,
            owner: owner.clone(),
        });
        events.push(GameEvent::ProjectileFired {
            projectile_id: id,
            owner,
        });
    }
}

fn integrate_projectiles(state: &mut SimulationState) {
    for projectile in &mut state.projectiles {
        projectile.pos += projectile.vel;
    }
    let arena = state.arena;
    state.projectiles.retain(|p| arena.contains(p.pos));
}

fn resolve_collisions(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());
    let mut eliminated = Vec::new();

    for projectile in projectiles {
        if projectile.owner.is_player() {
            let hit = collision::first_bot_hit(&projectile, &state.bots, state.tuning.bot_size);
            if let Some(index) = hit {
                if damage_bot(state, index, &projectile, events) {
                    eliminated.push(index);
                }
                continue;
            }
        } else if collision::hits_player(&projectile, state.player.pos, state.tuning.player_size)
        {
            damage_player(state, &projectile, events);
            continue;
        }
        survivors.push(projectile);
    }

    state.projectiles = survivors;

    // Respawn after the pass so spawn points avoid where the player ends up
    for index in eliminated {
        respawn_bot(state, index, events);
    }
}

/// Apply a player hit to a bot. Returns true if it was lethal.
fn damage_bot(
    state: &mut SimulationState,
    index: usize,
    projectile: &Projectile,
    events: &mut Vec<GameEvent>,
) -> bool {
    let bot = &mut state.bots[index];
    let lethal = bot.take_damage(projectile.damage);
    let bot_id = bot.id.clone();
    events.push(GameEvent::Hit {
        projectile_id: projectile.id,
        target: HitTarget::Bot(bot_id.clone()),
        damage: projectile.damage,
        remaining_health: bot.health,
    });
    if !lethal {
        return false;
    }

    let score_awarded = state.tuning.kill_score;
    state.player.score += score_awarded;
    state.push_kill_feed(format!("You eliminated {bot_id}"));
    events.push(GameEvent::BotEliminated {
        bot_id,
        score_awarded,
    });
    true
}

fn respawn_bot(state: &mut SimulationState, index: usize, events: &mut Vec<GameEvent>) {
    let avoid = state.player.pos;
    let pos = state.sample_spawn(avoid);
    let bot = &mut state.bots[index];
    bot.respawn(pos);
    log::debug!(
        "{} eliminated at tick {}, respawned at ({:.1}, {:.1})",
        bot.id,
        state.time_ticks,
        pos.x,
        pos.y
    );
    events.push(GameEvent::BotRespawned {
        bot_id: bot.id.clone(),
        pos,
    });
}

fn damage_player(
    state: &mut SimulationState,
    projectile: &Projectile,
    events: &mut Vec<GameEvent>,
) {
    let lethal = state.player.take_damage(projectile.damage);
    events.push(GameEvent::Hit {
        projectile_id: projectile.id,
        target: HitTarget::Player,
        damage: projectile.damage,
        remaining_health: state.player.health,
    });
    if !lethal {
        return;
    }

    let pos = state.arena.center();
    state.player.respawn(pos);
    log::debug!(
        "Player eliminated by {} at tick {}",
        projectile.owner,
        state.time_ticks
    );
    events.push(GameEvent::PlayerEliminated);
    events.push(GameEvent::PlayerRespawned { pos });
}
