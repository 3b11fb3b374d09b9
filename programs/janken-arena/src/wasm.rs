//! WASM bindings for the browser frontend

#![cfg(feature = "wasm")]

use std::cell::RefCell;
use std::rc::Rc;

use round_logic::{resolve, MatchConfig, Move, MoveChooser, RandomChooser};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::controller::{Intent, MatchController, PendingReveal};
use crate::relay::{Notice, Relay};

struct Shared {
    relay: Relay,
    listeners: RefCell<Vec<js_sys::Function>>,
}

/// A match driven from JavaScript, in a page or a worker
///
/// ```js
/// const game = new WebGame('{"win_threshold": 3}');
/// game.subscribe((kind, payload) => kind === "change" ? render(payload) : play(payload));
/// game.dispatch({ type: "submit_move", slot: 1, move: "rock" });
/// ```
#[wasm_bindgen]
pub struct WebGame {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl WebGame {
    /// Optional JSON config; missing fields use the standard match
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebGame, JsError> {
        let config = match config_json {
            Some(json) => MatchConfig::from_json(&json)
                .map_err(|e| JsError::new(&e.to_string()))?,
            None => MatchConfig::standard(),
        };

        Ok(WebGame {
            shared: Rc::new(Shared {
                relay: Relay::new(MatchController::new(config)),
                listeners: RefCell::new(Vec::new()),
            }),
        })
    }

    /// Current match as a plain JS object
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        let controller = self.shared.relay.controller();
        serde_wasm_bindgen::to_value(controller.state())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Result banner for the round on display
    #[wasm_bindgen]
    pub fn headline(&self) -> Option<String> {
        self.shared.relay.controller().state().headline()
    }

    /// `callback(kind, payload)` with kind `"change"` (snapshot) or `"cue"`
    #[wasm_bindgen]
    pub fn subscribe(&self, callback: js_sys::Function) {
        self.shared.listeners.borrow_mut().push(callback);
    }

    /// Apply an intent object such as `{type: "advance_round"}`
    ///
    /// Returns whether the match accepted it. Rejections are not errors.
    /// Throws only when no timer could be armed; the reveal has then already
    /// been resolved and delivered.
    #[wasm_bindgen]
    pub fn dispatch(&self, intent: JsValue) -> Result<bool, JsError> {
        let intent: Intent = serde_wasm_bindgen::from_value(intent)
            .map_err(|e| JsError::new(&format!("Invalid intent: {}", e)))?;

        let shared = &self.shared;
        shared
            .relay
            .dispatch(intent, |pending| schedule_reveal(shared, pending), |n| deliver(shared, n))
            .map_err(|e| JsError::new(&format!("Could not schedule the reveal: {:?}", e)))
    }
}

/// Arm a `setTimeout` for the reveal; a stale token makes it a no-op
fn schedule_reveal(shared: &Rc<Shared>, pending: PendingReveal) -> Result<(), JsValue> {
    let fired = Rc::clone(shared);
    let callback = Closure::once_into_js(move || {
        fired.relay.fire(pending.token, |n| deliver(&fired, n));
    });

    let delay = i32::try_from(pending.delay.as_millis()).unwrap_or(i32::MAX);
    set_timeout(&callback, delay).map(drop)
}

/// `setTimeout` on whichever global scope is running us
fn set_timeout(callback: &JsValue, delay: i32) -> Result<i32, JsValue> {
    let global = js_sys::global();
    let handler: &js_sys::Function = callback.unchecked_ref();
    if let Some(window) = global.dyn_ref::<web_sys::Window>() {
        window.set_timeout_with_callback_and_timeout_and_arguments_0(handler, delay)
    } else if let Some(worker) = global.dyn_ref::<web_sys::WorkerGlobalScope>() {
        worker.set_timeout_with_callback_and_timeout_and_arguments_0(handler, delay)
    } else {
        Err(JsValue::from_str("no setTimeout in this global scope"))
    }
}

/// Hand one notice to every listener
///
/// No logger is installed in the browser, so failures go to the console.
fn deliver(shared: &Shared, notice: Notice) {
    let (kind, payload) = match &notice {
        Notice::Change(snapshot) => ("change", serde_wasm_bindgen::to_value(snapshot)),
        Notice::Cue(cue) => ("cue", serde_wasm_bindgen::to_value(cue)),
    };
    let payload = match payload {
        Ok(value) => value,
        Err(e) => {
            web_sys::console::warn_1(&format!("Dropping {} notification: {}", kind, e).into());
            return;
        }
    };

    let listeners = shared.listeners.borrow().clone();
    for listener in &listeners {
        if let Err(e) = listener.call2(&JsValue::NULL, &JsValue::from_str(kind), &payload) {
            web_sys::console::warn_2(&format!("Listener threw on {}:", kind).into(), &e);
        }
    }
}

/// Resolve a single round, e.g. `resolve_round("rock", "scissors") === "p1"`
#[wasm_bindgen]
pub fn resolve_round(move_a: &str, move_b: &str) -> Result<String, JsError> {
    let a: Move = move_a.parse().map_err(|e: round_logic::ParseMoveError| JsError::new(&e.to_string()))?;
    let b: Move = move_b.parse().map_err(|e: round_logic::ParseMoveError| JsError::new(&e.to_string()))?;
    Ok(resolve(a, b).to_string())
}

/// A uniformly random move name
#[wasm_bindgen]
pub fn random_move() -> String {
    RandomChooser::new().choose_move().to_string()
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}
