use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drive `on_frame(dt)` from `requestAnimationFrame` until it returns false.
///
/// `dt` is in seconds; the first frame reports 0.
pub fn start(mut on_frame: impl FnMut(f32) -> bool + 'static) {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let mut last: Option<f64> = None;

    *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        let dt = last.map(|prev| ((timestamp - prev) / 1000.0) as f32).unwrap_or(0.0);
        last = Some(timestamp);
        if on_frame(dt.max(0.0)) {
            request(&next);
        } else {
            log::info!("frame loop stopped");
        }
    }));
    request(&callback);
}

fn request(callback: &FrameCallback) {
    let Some(window) = web_sys::window() else { return };
    if let Some(cb) = callback.borrow().as_ref() {
        if let Err(err) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", err);
        }
    }
}
