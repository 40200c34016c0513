//! Match-wide invariants under random input

use std::collections::HashMap;

use arena_shooter::consts::SIM_DT;
use arena_shooter::sim::{GameEvent, HitTarget, Owner, SimulationState, fire, tick};
use arena_shooter::{Intent, MovementKeys, Tuning};
use glam::Vec2;
use proptest::prelude::*;

fn intent_strategy() -> impl Strategy<Value = Intent> {
    (
        any::<[bool; 4]>(),
        prop::option::of((-100.0f32..900.0, -100.0f32..700.0)),
        prop::bool::weighted(0.3),
        prop::bool::weighted(0.05),
    )
        .prop_map(|(keys, pointer, fire, reload)| Intent {
            movement: MovementKeys {
                up: keys[0],
                down: keys[1],
                left: keys[2],
                right: keys[3],
            },
            pointer: pointer.map(|(x, y)| Vec2::new(x, y)),
            fire,
            reload,
        })
}

fn assert_in_bounds(pos: Vec2, half: f32, state: &SimulationState) {
    assert!(pos.x >= half && pos.x <= state.arena.width - half, "x out of bounds: {pos}");
    assert!(pos.y >= half && pos.y <= state.arena.height - half, "y out of bounds: {pos}");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn invariants_hold_every_tick(
        seed in any::<u64>(),
        intents in prop::collection::vec(intent_strategy(), 1..400),
    ) {
        let mut state = SimulationState::new(seed, Tuning::default());
        state.start();
        let bot_count = state.bots.len();

        for intent in &intents {
            let mut owners: HashMap<u32, Owner> = state
                .projectiles
                .iter()
                .map(|p| (p.id, p.owner.clone()))
                .collect();

            let events = tick(&mut state, intent, SIM_DT);

            prop_assert_eq!(state.bots.len(), bot_count);
            assert_in_bounds(state.player.pos, state.tuning.player_half_size(), &state);
            prop_assert!(state.player.health <= state.player.max_health);
            prop_assert!(state.player.ammo <= state.player.max_ammo);
            for bot in &state.bots {
                assert_in_bounds(bot.pos, state.tuning.bot_half_size(), &state);
                prop_assert!(bot.health <= bot.max_health);
                prop_assert!(bot.health > 0, "dead bots respawn within the tick");
            }
            prop_assert!(state.player.health > 0, "player respawns within the tick");

            for event in &events {
                match event {
                    GameEvent::ProjectileFired { projectile_id, owner } => {
                        owners.insert(*projectile_id, owner.clone());
                    }
                    GameEvent::Hit { projectile_id, target, .. } => {
                        let owner = &owners[projectile_id];
                        match target {
                            HitTarget::Player => prop_assert!(!owner.is_player()),
                            HitTarget::Bot(_) => prop_assert_eq!(owner, &Owner::Player),
                        }
                    }
                    GameEvent::BotRespawned { pos, .. } => {
                        let gap = pos.distance(state.player.pos);
                        prop_assert!(gap >= state.tuning.min_spawn_distance);
                    }
                    GameEvent::PlayerRespawned { pos } => {
                        prop_assert_eq!(*pos, state.arena.center());
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn firing_dry_never_spawns(
        pointer in (0.0f32..800.0, 0.0f32..600.0),
        attempts in 1usize..20,
    ) {
        let mut state = SimulationState::new(3, Tuning::default());
        state.start();
        state.player.ammo = 0;
        let before = state.projectiles.len();
        for _ in 0..attempts {
            prop_assert!(fire(&mut state, Vec2::new(pointer.0, pointer.1)).is_none());
        }
        prop_assert_eq!(state.projectiles.len(), before);
        prop_assert_eq!(state.player.ammo, 0);
    }
}

#[test]
fn bot_count_survives_a_long_fight() {
    // Pin the player next to a bot cluster and hold the trigger
    let tuning = Tuning {
        player_max_ammo: 1_000,
        ..Tuning::default()
    };
    let mut state = SimulationState::new(11, tuning);
    state.start();

    let mut kills = 0;
    for i in 0..3_000u32 {
        let target = state.bots[(i as usize / 30) % state.bots.len()].pos;
        let intent = Intent {
            pointer: Some(target),
            fire: i % 3 == 0,
            ..Default::default()
        };
        kills += tick(&mut state, &intent, SIM_DT)
            .iter()
            .filter(|e| matches!(e, GameEvent::BotEliminated { .. }))
            .count();
        assert_eq!(state.bots.len(), 5);
    }

    assert!(kills > 0, "aimed fire should eliminate at least one bot");
    assert_eq!(state.player.score, kills as u64 * 100);
    assert!(state.kill_feed.len() <= 5);
}
