// Discovery and one-time enhancement of rendered diagram containers.
//
// The diagram renderer owns the containers and their svg content; this module
// only augments them. Enhancement is guarded by an attribute flag so the
// idempotent `scan` can be re-triggered freely.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Document, Element, HtmlElement, MouseEvent, SvgElement, TouchEvent,
    WheelEvent,
};

use crate::controls;
use crate::state::Viewport;

/// Marker class the diagram renderer puts on every container.
pub const CONTAINER_CLASS: &str = "docusaurus-mermaid-container";
/// Attribute flagging a container as already enhanced.
pub const ENHANCED_ATTR: &str = "data-zoom-ready";

const ANIMATED_TRANSITION: &str = "transform 0.2s ease";

/// Enhance every not-yet-enhanced diagram container in the document.
/// Safe to call any number of times; already-enhanced containers are skipped.
pub fn scan(document: &Document) {
    let selector = format!(".{CONTAINER_CLASS}");
    let Ok(nodes) = document.query_selector_all(&selector) else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        let Ok(container) = node.dyn_into::<HtmlElement>() else {
            continue;
        };
        if container.has_attribute(ENHANCED_ATTR) {
            continue;
        }
        enhance(document, &container);
    }
}

/// Write the viewport's transform to the svg. Button-driven changes animate;
/// wheel and drag updates are applied instantly to avoid lag.
fn apply(svg: &SvgElement, viewport: &Viewport, animate: bool) {
    let style = svg.style();
    let _ = style.set_property("transform-origin", "0 0");
    let _ = style.set_property(
        "transition",
        if animate { ANIMATED_TRANSITION } else { "none" },
    );
    let _ = style.set_property("transform", &viewport.transform());
}

fn is_control_button(event: &MouseEvent) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|el| el.tag_name() == "BUTTON")
}

pub fn enhance(document: &Document, container: &HtmlElement) {
    let _ = enhance_inner(document, container);
}

fn enhance_inner(document: &Document, container: &HtmlElement) -> Option<()> {
    // The renderer may not have inserted the svg yet. Leave the flag unset so
    // a later scan picks the container up again.
    let svg: SvgElement = container.query_selector("svg").ok()??.dyn_into().ok()?;
    container.set_attribute(ENHANCED_ATTR, "true").ok()?;

    // Container becomes the clipping viewport.
    let container_style = container.style();
    let _ = container_style.set_property("position", "relative");
    let _ = container_style.set_property("overflow", "hidden");
    let _ = container_style.set_property("cursor", "grab");

    let viewport = Rc::new(RefCell::new(Viewport::default()));
    apply(&svg, &viewport.borrow(), false);

    // Control bar
    let bar = controls::control_bar(document)?;
    let btn_in = controls::control_button(document, "+", "Zoom in")?;
    let btn_out = controls::control_button(document, "&minus;", "Zoom out")?;
    let btn_reset = controls::control_button(document, "&#x21BA;", "Reset view")?;

    let zoom_in_cb = {
        let viewport = viewport.clone();
        let svg = svg.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            let mut vp = viewport.borrow_mut();
            vp.zoom_in();
            apply(&svg, &vp, true);
        }) as Box<dyn FnMut(_)>)
    };
    btn_in
        .add_event_listener_with_callback("click", zoom_in_cb.as_ref().unchecked_ref())
        .ok()?;
    zoom_in_cb.forget();

    let zoom_out_cb = {
        let viewport = viewport.clone();
        let svg = svg.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            let mut vp = viewport.borrow_mut();
            vp.zoom_out();
            apply(&svg, &vp, true);
        }) as Box<dyn FnMut(_)>)
    };
    btn_out
        .add_event_listener_with_callback("click", zoom_out_cb.as_ref().unchecked_ref())
        .ok()?;
    zoom_out_cb.forget();

    let reset_cb = {
        let viewport = viewport.clone();
        let svg = svg.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            let mut vp = viewport.borrow_mut();
            vp.reset();
            apply(&svg, &vp, true);
        }) as Box<dyn FnMut(_)>)
    };
    btn_reset
        .add_event_listener_with_callback("click", reset_cb.as_ref().unchecked_ref())
        .ok()?;
    reset_cb.forget();

    bar.append_child(&btn_in).ok()?;
    bar.append_child(&btn_out).ok()?;
    bar.append_child(&btn_reset).ok()?;
    container.append_child(&bar).ok()?;

    // Wheel zoom. Needs a non-passive listener so preventDefault keeps the
    // page from scrolling underneath the diagram.
    let wheel_cb = {
        let viewport = viewport.clone();
        let svg = svg.clone();
        Closure::wrap(Box::new(move |e: WheelEvent| {
            e.prevent_default();
            let mut vp = viewport.borrow_mut();
            vp.wheel(e.delta_y());
            apply(&svg, &vp, false);
        }) as Box<dyn FnMut(_)>)
    };
    let wheel_opts = AddEventListenerOptions::new();
    wheel_opts.set_passive(false);
    container
        .add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel_cb.as_ref().unchecked_ref(),
            &wheel_opts,
        )
        .ok()?;
    wheel_cb.forget();

    // Mouse pan. Down on the container (but not on a control button); move
    // and up are tracked on the window so a drag survives leaving the
    // container bounds. Both window handlers no-op while idle.
    let window = web_sys::window()?;

    let mousedown_cb = {
        let viewport = viewport.clone();
        let container = container.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            if e.button() != 0 || is_control_button(&e) {
                return;
            }
            viewport
                .borrow_mut()
                .begin_pan(e.client_x() as f64, e.client_y() as f64);
            let _ = container.style().set_property("cursor", "grabbing");
            e.prevent_default();
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
        .ok()?;
    mousedown_cb.forget();

    let mousemove_cb = {
        let viewport = viewport.clone();
        let svg = svg.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            let mut vp = viewport.borrow_mut();
            if !vp.pan_to(e.client_x() as f64, e.client_y() as f64) {
                return;
            }
            apply(&svg, &vp, false);
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
        .ok()?;
    mousemove_cb.forget();

    let mouseup_cb = {
        let viewport = viewport.clone();
        let container = container.clone();
        Closure::wrap(Box::new(move |_e: MouseEvent| {
            if viewport.borrow_mut().end_pan() {
                let _ = container.style().set_property("cursor", "grab");
            }
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
        .ok()?;
    mouseup_cb.forget();

    // Single-finger touch pan. Multi-touch is left alone (no pinch zoom).
    // Passive listeners: the handlers never cancel scrolling.
    let touch_opts = AddEventListenerOptions::new();
    touch_opts.set_passive(true);

    let touchstart_cb = {
        let viewport = viewport.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            let touches = e.touches();
            if touches.length() != 1 {
                return;
            }
            let Some(t0) = touches.item(0) else { return };
            viewport
                .borrow_mut()
                .begin_pan(t0.client_x() as f64, t0.client_y() as f64);
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            touchstart_cb.as_ref().unchecked_ref(),
            &touch_opts,
        )
        .ok()?;
    touchstart_cb.forget();

    let touchmove_cb = {
        let viewport = viewport.clone();
        let svg = svg.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            let touches = e.touches();
            if touches.length() != 1 {
                return;
            }
            let Some(t0) = touches.item(0) else { return };
            let mut vp = viewport.borrow_mut();
            if !vp.pan_to(t0.client_x() as f64, t0.client_y() as f64) {
                return;
            }
            apply(&svg, &vp, false);
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            touchmove_cb.as_ref().unchecked_ref(),
            &touch_opts,
        )
        .ok()?;
    touchmove_cb.forget();

    let touchend_cb = {
        let viewport = viewport.clone();
        Closure::wrap(Box::new(move |_e: TouchEvent| {
            viewport.borrow_mut().end_pan();
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("touchend", touchend_cb.as_ref().unchecked_ref())
        .ok()?;
    container
        .add_event_listener_with_callback("touchcancel", touchend_cb.as_ref().unchecked_ref())
        .ok()?;
    touchend_cb.forget();

    Some(())
}
