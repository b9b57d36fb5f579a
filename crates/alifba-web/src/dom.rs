// dom.rs
//
// Thin helpers over web-sys. Missing elements are skipped silently: each page
// only carries the ids it uses.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

use alifba_core::Toast;

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Create an element with the given classes.
pub fn create(tag: &str, classes: &[&str]) -> Option<Element> {
    let el = document()?.create_element(tag).ok()?;
    for class in classes {
        let _ = el.class_list().add_1(class);
    }
    Some(el)
}

pub fn set_text(id: &str, text: &str) {
    if let Some(el) = by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

pub fn set_display(id: &str, value: &str) {
    if let Some(el) = by_id(id) {
        set_style(&el, "display", value);
    }
}

/// Lock or release page scrolling while a modal is up.
pub fn lock_scroll(locked: bool) {
    if let Some(body) = document().and_then(|d| d.body()) {
        let _ = body
            .style()
            .set_property("overflow", if locked { "hidden" } else { "auto" });
    }
}

pub fn set_disabled(id: &str, disabled: bool) {
    if let Some(el) = by_id(id) {
        let _ = if disabled {
            el.set_attribute("disabled", "")
        } else {
            el.remove_attribute("disabled")
        };
    }
}

/// Attach a listener for the life of the page.
pub fn on(target: &EventTarget, event: &str, mut handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(move |e: Event| handler(e));
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("could not listen for {}: {:?}", event, err);
    }
    closure.forget();
}

/// Run `close` when a click lands on the modal's own backdrop, not its content.
pub fn on_backdrop_click(id: &str, close: impl Fn() + 'static) {
    let Some(modal) = by_id(id) else { return };
    let backdrop: JsValue = modal.clone().into();
    on(&modal, "click", move |e| {
        if let Some(target) = e.target() {
            if js_sys::Object::is(&target, &backdrop) {
                close();
            }
        }
    });
}

/// Run `escape` on every Escape key press.
pub fn on_escape(escape: impl Fn() + 'static) {
    let Some(doc) = document() else { return };
    on(&doc, "keydown", move |e| {
        if let Some(key) = e.dyn_ref::<web_sys::KeyboardEvent>() {
            if key.key() == "Escape" {
                escape();
            }
        }
    });
}

/// Query string of the current page, including the leading `?`.
pub fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub fn navigate(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(url) {
            log::error!("navigation to {} failed: {:?}", url, err);
        }
    }
}

/// Current time as an ISO 8601 string.
pub fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

/// Put a toast on screen. The caller removes it when the toast expires.
pub fn show_toast(toast: &Toast) -> Option<Element> {
    let tone_class = format!("notification-{}", toast.tone.as_str());
    let el = create("div", &["notification", tone_class.as_str()])?;
    el.set_text_content(Some(&toast.message));
    let css = format!(
        "position: fixed; top: 20px; left: 50%; transform: translateX(-50%); \
         background: {}; color: white; padding: 12px 24px; border-radius: 12px; \
         box-shadow: 0 10px 20px rgba(0,0,0,0.1); z-index: 9999; animation: fadeIn 0.3s ease;",
        toast.tone.color()
    );
    let _ = el.set_attribute("style", &css);
    document()?.body()?.append_child(&el).ok()?;
    Some(el)
}

