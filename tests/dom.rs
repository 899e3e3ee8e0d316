//! Browser tests for container discovery and enhancement.
//!
//! Run with `wasm-pack test --headless --chrome` (or --firefox).

#![cfg(target_arch = "wasm32")]

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, HtmlElement, SvgElement, Touch, TouchEvent, TouchEventInit, TouchInit,
};

use diagram_zoom::enhance::{self, CONTAINER_CLASS, ENHANCED_ATTR};

wasm_bindgen_test_configure!(run_in_browser);

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn append_svg(container: &Element) {
    let svg = document().create_element_ns(Some(SVG_NS), "svg").unwrap();
    container.append_child(&svg).unwrap();
}

fn insert_container(with_svg: bool) -> Element {
    let doc = document();
    let container = doc.create_element("div").unwrap();
    container.set_class_name(CONTAINER_CLASS);
    if with_svg {
        append_svg(&container);
    }
    doc.body().unwrap().append_child(&container).unwrap();
    container
}

fn button_count(container: &Element) -> u32 {
    container.query_selector_all("button").unwrap().length()
}

#[wasm_bindgen_test]
fn scan_with_zero_containers_is_a_no_op() {
    enhance::scan(&document());
    assert_eq!(
        document()
            .query_selector_all(&format!(".{CONTAINER_CLASS}"))
            .unwrap()
            .length(),
        0
    );
}

#[wasm_bindgen_test]
fn scan_builds_one_overlay_with_three_controls() {
    let container = insert_container(true);
    enhance::scan(&document());
    assert_eq!(button_count(&container), 3);
    assert_eq!(container.get_attribute(ENHANCED_ATTR).as_deref(), Some("true"));
    container.remove();
}

#[wasm_bindgen_test]
fn repeated_scans_do_not_duplicate_the_overlay() {
    let container = insert_container(true);
    enhance::scan(&document());
    enhance::scan(&document());
    enhance::scan(&document());
    assert_eq!(button_count(&container), 3);
    container.remove();
}

#[wasm_bindgen_test]
fn enhancement_applies_the_identity_transform() {
    let container = insert_container(true);
    enhance::scan(&document());
    let svg: SvgElement = container
        .query_selector("svg")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    // The CSSOM may reserialize values (e.g. insert spaces), so match loosely.
    let style = svg.style();
    let transform = style.get_property_value("transform").unwrap();
    assert!(transform.contains("scale(1)"), "got {transform:?}");
    assert!(!style.get_property_value("transform-origin").unwrap().is_empty());
    container.remove();
}

#[wasm_bindgen_test]
fn svg_less_container_is_skipped_and_retried() {
    let container = insert_container(false);
    enhance::scan(&document());
    assert!(!container.has_attribute(ENHANCED_ATTR));
    assert_eq!(button_count(&container), 0);

    // Renderer finishes late; the next scan picks the container up.
    append_svg(&container);
    enhance::scan(&document());
    assert!(container.has_attribute(ENHANCED_ATTR));
    assert_eq!(button_count(&container), 3);
    container.remove();
}

#[wasm_bindgen_test]
fn zoom_buttons_drive_the_svg_transform() {
    let container = insert_container(true);
    enhance::scan(&document());
    let buttons = container.query_selector_all("button").unwrap();
    let zoom_in: HtmlElement = buttons.item(0).unwrap().dyn_into().unwrap();
    let reset: HtmlElement = buttons.item(2).unwrap().dyn_into().unwrap();
    let svg: SvgElement = container
        .query_selector("svg")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();

    zoom_in.click();
    let transform = svg.style().get_property_value("transform").unwrap();
    assert!(transform.contains("scale(1.25)"), "got {transform:?}");
    reset.click();
    let transform = svg.style().get_property_value("transform").unwrap();
    assert!(transform.contains("scale(1)"), "got {transform:?}");
    container.remove();
}

fn single_touch_event(kind: &str, target: &Element, x: f64, y: f64) -> TouchEvent {
    let touch_init = TouchInit::new(0, target);
    touch_init.set_client_x(x);
    touch_init.set_client_y(y);
    let touch = Touch::new(&touch_init).unwrap();
    let touches = Array::new();
    touches.push(&touch);
    let event_init = TouchEventInit::new();
    event_init.set_bubbles(true);
    event_init.set_cancelable(true);
    event_init.set_touches(&touches);
    TouchEvent::new_with_event_init_dict(kind, &event_init).unwrap()
}

#[wasm_bindgen_test]
fn touch_drag_pans_without_cancelling_scroll() {
    let container = insert_container(true);
    enhance::scan(&document());
    let svg: SvgElement = container
        .query_selector("svg")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();

    let start = single_touch_event("touchstart", &container, 100.0, 100.0);
    container.dispatch_event(&start).unwrap();
    let moved = single_touch_event("touchmove", &container, 140.0, 130.0);
    container.dispatch_event(&moved).unwrap();

    // Passive handlers must leave the (cancelable) events alone.
    assert!(!start.default_prevented());
    assert!(!moved.default_prevented());

    let transform = svg.style().get_property_value("transform").unwrap();
    assert!(
        transform.replace(' ', "").contains("translate(40px,30px)"),
        "got {transform:?}"
    );

    // Lifting the finger ends the drag; further moves are ignored.
    let end = TouchEvent::new("touchend").unwrap();
    container.dispatch_event(&end).unwrap();
    let after_end = single_touch_event("touchmove", &container, 200.0, 200.0);
    container.dispatch_event(&after_end).unwrap();
    let transform = svg.style().get_property_value("transform").unwrap();
    assert!(
        transform.replace(' ', "").contains("translate(40px,30px)"),
        "got {transform:?}"
    );
    container.remove();
}

#[wasm_bindgen_test]
fn container_styled_as_clipping_viewport() {
    let container = insert_container(true);
    enhance::scan(&document());
    let style = container.dyn_ref::<HtmlElement>().unwrap().style();
    assert_eq!(style.get_property_value("overflow").unwrap(), "hidden");
    assert_eq!(style.get_property_value("cursor").unwrap(), "grab");
    container.remove();
}
