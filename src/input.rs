//! Input aggregation
//!
//! Raw device events (key down/up, pointer move, clicks) land here between
//! ticks. Once per tick the engine takes an immutable [`Intent`] snapshot;
//! taking it consumes the edge-triggered requests so each physical click or
//! reload press acts exactly once.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the game reacts to, named after `KeyboardEvent.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    R,
}

impl KeyCode {
    /// Parse a browser key code (case-insensitive). Unknown codes are ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "keyw" => Some(KeyCode::W),
            "keya" => Some(KeyCode::A),
            "keys" => Some(KeyCode::S),
            "keyd" => Some(KeyCode::D),
            "arrowup" => Some(KeyCode::ArrowUp),
            "arrowdown" => Some(KeyCode::ArrowDown),
            "arrowleft" => Some(KeyCode::ArrowLeft),
            "arrowright" => Some(KeyCode::ArrowRight),
            "keyr" => Some(KeyCode::R),
            _ => None,
        }
    }
}

/// Directions currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementKeys {
    /// Per-axis direction; opposite keys cancel, diagonals are not normalized
    pub fn axis(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Everything the engine needs from the player for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub movement: MovementKeys,
    /// Last pointer position in arena coordinates (None until the pointer moves)
    pub pointer: Option<Vec2>,
    pub fire: bool,
    pub reload: bool,
}

impl Intent {
    /// Pointer position, or `fallback` when it was never reported
    pub fn pointer_or(&self, fallback: Vec2) -> Vec2 {
        self.pointer.unwrap_or(fallback)
    }
}

/// Collects raw device events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    held: HashSet<KeyCode>,
    pointer: Option<Vec2>,
    /// Clicks not yet handed to a tick
    pending_fire: u32,
    pending_reload: u32,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed. Reload triggers on the press edge only, so OS key repeat
    /// does not reload again.
    pub fn key_down(&mut self, code: &str) {
        let Some(key) = KeyCode::from_code(code) else {
            return;
        };
        let newly_pressed = self.held.insert(key);
        if key == KeyCode::R && newly_pressed {
            self.pending_reload += 1;
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = KeyCode::from_code(code) {
            self.held.remove(&key);
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.pointer = Some(Vec2::new(x, y));
        }
    }

    /// Fire trigger (mouse click)
    pub fn click(&mut self) {
        self.pending_fire += 1;
    }

    /// Reload trigger from a source other than the keyboard (e.g. a HUD button)
    pub fn request_reload(&mut self) {
        self.pending_reload += 1;
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Current held-direction state
    pub fn movement(&self) -> MovementKeys {
        MovementKeys {
            up: self.is_held(KeyCode::W) || self.is_held(KeyCode::ArrowUp),
            down: self.is_held(KeyCode::S) || self.is_held(KeyCode::ArrowDown),
            left: self.is_held(KeyCode::A) || self.is_held(KeyCode::ArrowLeft),
            right: self.is_held(KeyCode::D) || self.is_held(KeyCode::ArrowRight),
        }
    }

    /// Build the snapshot for the next tick, consuming one pending fire and
    /// one pending reload. Extra clicks carry over to later ticks.
    pub fn take_intent(&mut self) -> Intent {
        let fire = self.pending_fire > 0;
        let reload = self.pending_reload > 0;
        self.pending_fire = self.pending_fire.saturating_sub(1);
        self.pending_reload = self.pending_reload.saturating_sub(1);
        Intent {
            movement: self.movement(),
            pointer: self.pointer,
            fire,
            reload,
        }
    }

    /// Forget queued clicks and reload presses; held keys and pointer stay
    pub fn drop_triggers(&mut self) {
        self.pending_fire = 0;
        self.pending_reload = 0;
    }

    /// Release all keys and drop pending triggers (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
        self.drop_triggers();
    }
}
