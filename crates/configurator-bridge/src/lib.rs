//! Host adapter between a configurator UI and the packaging engine.
//!
//! The UI sends `UiToEngine` messages and receives `EngineToUi` replies, both
//! as JSON. Native hosts call `dispatch` directly; the browser worker goes
//! through the `wasm_api` entry points.

pub mod dispatch;
pub mod engine_state;
pub mod messages;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use dispatch::{dispatch, dispatch_json};
pub use engine_state::{BridgeError, EngineConfig, EngineState, RenderAdapter, SceneDescription};
pub use messages::{ArtifactEncoding, EngineToUi, UiToEngine};
