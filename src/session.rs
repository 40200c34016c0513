//! Match session: the fixed-rate driver around the simulation
//!
//! The host feeds raw input events and wall-clock frame times; the session
//! turns frame time into whole 60 Hz ticks, hands each tick one intent
//! snapshot, and queues notifications for whatever UI is attached.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::input::InputAggregator;
use crate::sim::{
    Bot, GameEvent, MatchPhase, Notification, Player, Projectile, SimulationState, Wall, tick,
};
use crate::tuning::Tuning;

/// Frames longer than this are treated as a stall, not as time to catch up
const MAX_FRAME_DT: f32 = 0.25;

/// Read-only view of the match for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: MatchPhase,
    pub time_ticks: u64,
    pub player: Player,
    pub bots: Vec<Bot>,
    pub projectiles: Vec<Projectile>,
    pub walls: Vec<Wall>,
    pub kill_feed: Vec<String>,
}

impl Snapshot {
    pub fn of(state: &SimulationState) -> Self {
        Self {
            phase: state.phase,
            time_ticks: state.time_ticks,
            player: state.player.clone(),
            bots: state.bots.clone(),
            projectiles: state.projectiles.clone(),
            walls: state.walls.clone(),
            kill_feed: state.kill_feed.iter().cloned().collect(),
        }
    }
}

/// A match plus its input and timing plumbing
#[derive(Debug, Clone)]
pub struct ArenaSession {
    state: SimulationState,
    input: InputAggregator,
    accumulator: f32,
    notifications: VecDeque<Notification>,
}

impl ArenaSession {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: SimulationState::new(seed, tuning),
            input: InputAggregator::new(),
            accumulator: 0.0,
            notifications: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    /// Begin a fresh match
    pub fn start(&mut self) -> Vec<GameEvent> {
        self.input.clear();
        self.accumulator = 0.0;
        let events = self.state.start();
        self.queue_notifications(&events);
        events
    }

    /// Halt ticking. A tick already in progress has completed by the time
    /// this can be called. Clicks and reloads queued so far are dropped.
    pub fn stop(&mut self) {
        self.state.stop();
        self.input.drop_triggers();
        self.accumulator = 0.0;
    }

    pub fn resume(&mut self) {
        self.state.resume();
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn key_down(&mut self, code: &str) {
        self.input.key_down(code);
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer_move(x, y);
    }

    pub fn click(&mut self) {
        self.input.click();
    }

    pub fn request_reload(&mut self) {
        self.input.request_reload();
    }

    /// Drop held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.input.clear();
    }

    /// Run as many fixed ticks as `frame_dt` seconds cover (at most
    /// `MAX_SUBSTEPS`). Returns every event produced.
    pub fn advance(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        if !self.state.is_running() {
            // Fire and reload requests are ignored while not running
            self.input.drop_triggers();
            return Vec::new();
        }

        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.step_once());
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        events
    }

    /// Run exactly one tick regardless of wall-clock time
    pub fn step_once(&mut self) -> Vec<GameEvent> {
        if !self.state.is_running() {
            self.input.drop_triggers();
            return Vec::new();
        }
        let intent = self.input.take_intent();
        let events = tick(&mut self.state, &intent, SIM_DT);
        self.queue_notifications(&events);
        events
    }

    /// Take every notification queued since the last call
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn queue_notifications(&mut self, events: &[GameEvent]) {
        self.notifications
            .extend(events.iter().filter_map(GameEvent::notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_queues_welcome() {
        let mut session = ArenaSession::new(1, Tuning::default());
        assert!(!session.is_running());
        session.start();
        let notes = session.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.starts_with("Battle arena loaded!"));
        assert!(session.drain_notifications().is_empty());
    }

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut session = ArenaSession::new(1, Tuning::default());
        session.start();
        session.advance(SIM_DT * 2.5);
        assert_eq!(session.state().time_ticks, 2);
        // Remainder carries into the next frame
        session.advance(SIM_DT * 0.6);
        assert_eq!(session.state().time_ticks, 3);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut session = ArenaSession::new(1, Tuning::default());
        session.start();
        session.advance(10.0);
        assert_eq!(session.state().time_ticks, u64::from(MAX_SUBSTEPS));
        // Backlog beyond the cap is dropped, not replayed next frame
        session.advance(0.0);
        assert_eq!(session.state().time_ticks, u64::from(MAX_SUBSTEPS));
        session.advance(f32::NAN);
        assert_eq!(session.state().time_ticks, u64::from(MAX_SUBSTEPS));
    }

    #[test]
    fn test_stopped_session_does_not_tick() {
        let mut session = ArenaSession::new(1, Tuning::default());
        assert!(session.advance(1.0).is_empty());
        session.start();
        session.stop();
        session.key_down("KeyD");
        session.advance(0.05);
        assert_eq!(session.state().time_ticks, 0);
        session.resume();
        session.advance(SIM_DT);
        assert_eq!(session.state().time_ticks, 1);
        assert_eq!(session.snapshot().player.pos.x, 403.0);
    }

    #[test]
    fn test_click_while_paused_is_ignored() {
        let mut session = ArenaSession::new(1, Tuning::default());
        session.start();
        session.stop();
        session.pointer_move(400.0, 100.0);
        session.click();
        session.request_reload();
        session.advance(0.05);
        session.click();
        session.step_once();
        session.resume();
        session.step_once();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.time_ticks, 1);
        assert_eq!(snapshot.player.ammo, 12);
        assert!(!snapshot.projectiles.iter().any(|p| p.owner.is_player()));
    }

    #[test]
    fn test_click_before_stop_is_dropped() {
        let mut session = ArenaSession::new(1, Tuning::default());
        session.start();
        session.click();
        session.click();
        session.stop();
        session.resume();
        session.step_once();
        session.step_once();
        assert_eq!(session.snapshot().player.ammo, 12);
    }

    #[test]
    fn test_click_fires_one_bullet() {
        let mut session = ArenaSession::new(1, Tuning::default());
        session.start();
        session.pointer_move(400.0, 100.0);
        session.click();
        session.step_once();
        session.step_once();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.player.ammo, 11);
        let player_bullets = snapshot
            .projectiles
            .iter()
            .filter(|p| p.owner.is_player())
            .count();
        assert_eq!(player_bullets, 1);
    }

    #[test]
    fn test_reload_notification() {
        let mut session = ArenaSession::new(1, Tuning::default());
        session.start();
        session.drain_notifications();
        session.click();
        session.step_once();
        session.key_down("KeyR");
        session.step_once();
        let notes = session.drain_notifications();
        assert!(notes.iter().any(|n| n.message == "Reloaded!"));
        assert_eq!(session.snapshot().player.ammo, 12);
    }
}
