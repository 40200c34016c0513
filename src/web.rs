//! Browser bindings
//!
//! Thin `wasm-bindgen` wrapper so a JS/canvas front end can drive an
//! [`ArenaSession`]: forward DOM events in, pull JSON snapshots out.

use wasm_bindgen::prelude::*;

use crate::session::ArenaSession;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Arena shooter core loaded");
}

#[wasm_bindgen]
pub struct WebArena {
    session: ArenaSession,
}

#[wasm_bindgen]
impl WebArena {
    /// Create a session. `tuning_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> Result<WebArena, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json_str(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let seed = js_sys::Date::now() as u64;
        Ok(Self {
            session: ArenaSession::new(seed, tuning),
        })
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    pub fn resume(&mut self) {
        self.session.resume();
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, code: &str) {
        self.session.key_down(code);
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, code: &str) {
        self.session.key_up(code);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.session.pointer_move(x, y);
    }

    pub fn click(&mut self) {
        self.session.click();
    }

    pub fn reload(&mut self) {
        self.session.request_reload();
    }

    pub fn blur(&mut self) {
        self.session.release_all();
    }

    /// Advance by `frame_dt` seconds of wall time; returns the events as JSON
    pub fn advance(&mut self, frame_dt: f32) -> String {
        let events = self.session.advance(frame_dt);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|err| {
            log::warn!("Snapshot serialization failed: {err}");
            "null".to_string()
        })
    }

    /// Pending toast messages as JSON
    pub fn notifications(&mut self) -> String {
        serde_json::to_string(&self.session.drain_notifications())
            .unwrap_or_else(|_| "[]".to_string())
    }
}
