// Scan triggers: the initial delayed pass, the page-wide mutation observer,
// and the post-navigation hook. All three funnel into the same idempotent
// `scan`, so redundant firing is harmless.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, MutationObserver, MutationObserverInit};

use crate::enhance;
use crate::util::clog;

/// Delay before the first scan, giving the diagram renderer time to insert
/// its svg markup.
pub const INITIAL_SCAN_DELAY_MS: u32 = 300;
/// Delay after a client-side route change, for the same reason.
pub const ROUTE_SCAN_DELAY_MS: u32 = 500;

fn scan_current_document() {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        enhance::scan(&document);
    }
}

pub fn schedule_scan(delay_ms: u32) {
    Timeout::new(delay_ms, scan_current_document).forget();
}

/// Register the page-session singletons: the first (delayed) scan and the
/// mutation observer that re-scans on any DOM change under <body>. Never
/// torn down; navigation between sessions replaces the whole document.
pub fn init(document: &Document) {
    if document.ready_state() == "loading" {
        let ready_cb = Closure::wrap(Box::new(move || {
            schedule_scan(INITIAL_SCAN_DELAY_MS);
        }) as Box<dyn FnMut()>);
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", ready_cb.as_ref().unchecked_ref());
        ready_cb.forget();
    } else {
        schedule_scan(INITIAL_SCAN_DELAY_MS);
    }

    let mutate_cb = Closure::wrap(Box::new(move || {
        scan_current_document();
    }) as Box<dyn FnMut()>);
    match MutationObserver::new(mutate_cb.as_ref().unchecked_ref()) {
        Ok(observer) => {
            if let Some(body) = document.body() {
                let options = MutationObserverInit::new();
                options.set_child_list(true);
                options.set_subtree(true);
                let _ = observer.observe_with_options(&body, &options);
            }
            // The observer holds the callback for the rest of the session.
            mutate_cb.forget();
        }
        // Unregistered closure drops here instead of leaking.
        Err(_) => clog("diagram-zoom: MutationObserver unavailable, dynamic diagrams won't be enhanced"),
    }
}
