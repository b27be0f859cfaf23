//! WASM entry points for the web worker.
//!
//! This module is only compiled for the `wasm32` target. JavaScript calls
//! `init` once, then `process_message` for every UI message. Messages run to
//! completion on the worker thread, so there is no cancel entry point here.

use wasm_bindgen::prelude::*;

use crate::dispatch;
use crate::engine_state::{EngineConfig, EngineState};
use crate::messages::EngineToUi;

// Global engine state, single-threaded in the web worker.
thread_local! {
    static ENGINE_STATE: std::cell::RefCell<Option<EngineState>> = std::cell::RefCell::new(None);
}

/// Initialize the engine. Must be called once before any other function.
///
/// Returns an error string if the default scene could not be built.
#[wasm_bindgen]
pub fn init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let state = EngineState::new(EngineConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    ENGINE_STATE.with(|cell| {
        *cell.borrow_mut() = Some(state);
    });
    Ok(())
}

/// Process a JSON `UiToEngine` message and return a JSON array of
/// `EngineToUi` replies.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    let replies = ENGINE_STATE.with(|cell| {
        let mut state = cell.borrow_mut();
        let Some(state) = state.as_mut() else {
            return vec![EngineToUi::Error {
                message: "engine not initialized, call init() first".to_string(),
            }];
        };

        dispatch::dispatch_json(state, json_input)
    });

    serde_json::to_string(&replies).unwrap_or_else(|e| {
        format!(
            r#"[{{"type":"Error","message":"Serialization failed: {}"}}]"#,
            e
        )
    })
}
