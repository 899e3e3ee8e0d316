//! Pan/zoom controls for rendered Mermaid diagrams.
//!
//! Loaded by the docs site as a client module. On startup it scans the page
//! for diagram containers and attaches zoom buttons plus drag-to-pan behavior
//! to each one, then keeps re-scanning as client-side navigation or dynamic
//! rendering swaps content in.

use wasm_bindgen::prelude::*;

pub mod controls;
pub mod enhance;
pub mod observer;
pub mod state;
pub mod util;

#[wasm_bindgen(start)]
pub fn start() {
    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");
    observer::init(&document);
}

/// Navigation hook: the host site calls this after every client-side route
/// change completes.
#[wasm_bindgen]
pub fn on_route_did_update() {
    observer::schedule_scan(observer::ROUTE_SCAN_DELAY_MS);
}
