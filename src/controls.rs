// Overlay control bar (zoom in / zoom out / reset) appended to each
// enhanced diagram container.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlElement};

const BAR_CSS: &str = "position:absolute;top:8px;right:8px;display:flex;gap:4px;z-index:10;";

const BUTTON_CSS: &str = "width:32px;height:32px;border:1px solid rgba(56,189,248,0.3);\
background:rgba(11,17,33,0.9);color:#e2e8f0;border-radius:6px;\
cursor:pointer;font-size:16px;display:flex;align-items:center;\
justify-content:center;backdrop-filter:blur(8px);padding:0;\
line-height:1;user-select:none;";

const BUTTON_BG: &str = "rgba(11,17,33,0.9)";
const BUTTON_BG_HOVER: &str = "rgba(56,189,248,0.25)";

pub fn control_bar(document: &Document) -> Option<HtmlElement> {
    let bar: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    bar.style().set_css_text(BAR_CSS);
    Some(bar)
}

/// One square overlay button. `glyph` may be an HTML entity.
pub fn control_button(document: &Document, glyph: &str, tip: &str) -> Option<HtmlElement> {
    let button: HtmlElement = document.create_element("button").ok()?.dyn_into().ok()?;
    button.set_inner_html(glyph);
    button.set_title(tip);
    button.style().set_css_text(BUTTON_CSS);

    let mouseenter_cb = {
        let button = button.clone();
        Closure::wrap(Box::new(move || {
            let _ = button.style().set_property("background", BUTTON_BG_HOVER);
        }) as Box<dyn FnMut()>)
    };
    button
        .add_event_listener_with_callback("mouseenter", mouseenter_cb.as_ref().unchecked_ref())
        .ok()?;
    mouseenter_cb.forget();

    let mouseleave_cb = {
        let button = button.clone();
        Closure::wrap(Box::new(move || {
            let _ = button.style().set_property("background", BUTTON_BG);
        }) as Box<dyn FnMut()>)
    };
    button
        .add_event_listener_with_callback("mouseleave", mouseleave_cb.as_ref().unchecked_ref())
        .ok()?;
    mouseleave_cb.forget();

    Some(button)
}
