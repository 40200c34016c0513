//! Arena Shooter entry point
//!
//! Native builds run a headless match with a scripted player and log the
//! outcome. The browser build is driven through `arena_shooter::web`.
//!
//! Usage: `arena-shooter [tuning.json] [seed] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arena_shooter::{ArenaSession, Tuning};

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = match args.first().filter(|a| !a.is_empty() && *a != "-") {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(7);
    let seconds: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(60);

    log::info!("Arena Shooter (native, headless) starting with seed {seed}");

    let mut session = ArenaSession::new(seed, tuning);
    session.start();

    let ticks = u64::from(seconds) * 60;
    let mut pilot = autopilot::Autopilot::default();
    let mut deaths = 0u32;
    for _ in 0..ticks {
        pilot.drive(&mut session);
        for event in session.step_once() {
            if event == arena_shooter::sim::GameEvent::PlayerEliminated {
                deaths += 1;
            }
        }
        for note in session.drain_notifications() {
            log::info!("[tick {}] {}", session.state().time_ticks, note.message);
        }
    }

    let snapshot = session.snapshot();
    log::info!(
        "Match over after {} ticks: score {}, deaths {}, kill feed {:?}",
        snapshot.time_ticks,
        snapshot.player.score,
        deaths,
        snapshot.kill_feed
    );
    println!(
        "score={} deaths={} ticks={}",
        snapshot.player.score, deaths, snapshot.time_ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::wasm_init`, this is just to satisfy the compiler
}

/// Scripted input for the headless demo
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use arena_shooter::ArenaSession;

    /// Ticks between trigger pulls
    const FIRE_INTERVAL: u32 = 12;
    /// Ticks spent strafing in one direction
    const STRAFE_PERIOD: u32 = 90;

    #[derive(Default)]
    pub struct Autopilot {
        ticks: u32,
    }

    impl Autopilot {
        /// Aim at the nearest bot, strafe, shoot on a rhythm, reload when dry
        pub fn drive(&mut self, session: &mut ArenaSession) {
            self.ticks += 1;
            let state = session.state();
            let player_pos = state.player.pos;
            let ammo = state.player.ammo;
            let nearest = state
                .bots
                .iter()
                .map(|b| b.pos)
                .min_by(|a, b| {
                    a.distance_squared(player_pos)
                        .total_cmp(&b.distance_squared(player_pos))
                });

            if let Some(target) = nearest {
                session.pointer_move(target.x, target.y);
            }

            let strafe_left = (self.ticks / STRAFE_PERIOD) % 2 == 0;
            let (press, release) = if strafe_left {
                ("KeyA", "KeyD")
            } else {
                ("KeyD", "KeyA")
            };
            session.key_up(release);
            session.key_down(press);

            if ammo == 0 {
                session.key_up("KeyR");
                session.key_down("KeyR");
            } else if self.ticks % FIRE_INTERVAL == 0 {
                session.click();
            }
        }
    }
}
