//! Tile Cascade Card core crate.
//!
//! A greeting card page in three acts: a name gate, a 5x5 letter grid revealed
//! with a cascading flip, and a fireworks celebration on the canvas overlay.
//! Game logic is platform-free (see [`port`] and [`schedule`]); [`dom`] binds it
//! to the browser and `start_card()` is the JS entry point.

use wasm_bindgen::prelude::*;

pub mod card;
pub mod config;
pub mod dom;
pub mod fireworks;
pub mod port;
pub mod schedule;

pub use card::grid::{Grid, RowSet, Tile};
pub use card::{Gate, GateOutcome, GateState};
pub use config::CardConfig;
pub use fireworks::Celebration;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. module re-instantiated) only fails because a logger exists.
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }
}

#[wasm_bindgen]
pub fn start_card() -> Result<(), JsValue> {
    dom::mount(CardConfig::default())
}

/// Like [`start_card`], with constants overridden from a JSON object
/// (e.g. `{"flip_ms": 600, "accepted_name": "Sam"}`). Missing fields keep
/// their defaults; malformed JSON is returned as an error and nothing is wired.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_card_with_config(json: &str) -> Result<(), JsValue> {
    let config = CardConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!("card config overridden: flip {}ms", config.flip_ms);
    dom::mount(config)
}
