// probe.rs
//
// Image existence checks. Each probe is its own `spawn_local` task; results
// come back through a callback in whatever order the browser finishes them.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlImageElement;

/// Resolve to whether `path` loads as an image.
pub async fn image_exists(path: &str) -> bool {
    let img = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(err) => {
            log::warn!("cannot create image element: {:?}", err);
            return false;
        }
    };

    let promise = Promise::new(&mut |resolve, _reject| {
        let on_found = resolve.clone();
        let onload = Closure::once_into_js(move || {
            let _ = on_found.call1(&JsValue::NULL, &JsValue::TRUE);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::FALSE);
        });
        img.set_onload(Some(onload.unchecked_ref()));
        img.set_onerror(Some(onerror.unchecked_ref()));
    });
    img.set_src(path);

    match JsFuture::from(promise).await {
        Ok(found) => found.as_bool().unwrap_or(false),
        Err(_) => false,
    }
}

/// Probe one asset and report back.
pub fn spawn_probe(path: String, done: impl FnOnce(bool) + 'static) {
    spawn_local(async move {
        let found = image_exists(&path).await;
        if !found {
            log::warn!("image not found: {}", path);
        }
        done(found);
    });
}

/// Preload progress shared by the per-image tasks.
struct Preload {
    pending: usize,
    all_found: bool,
    done: Option<Box<dyn FnOnce(bool)>>,
}

/// Warm the cache for every path at once; reports whether all of them loaded.
pub fn spawn_preload(paths: Vec<String>, done: impl FnOnce(bool) + 'static) {
    if paths.is_empty() {
        // Still deferred: the caller may hold the runner borrowed right now.
        spawn_local(async move { done(true) });
        return;
    }

    let total = paths.len();
    let state = Rc::new(RefCell::new(Preload {
        pending: total,
        all_found: true,
        done: Some(Box::new(done)),
    }));
    for path in paths {
        let state = state.clone();
        spawn_local(async move {
            let found = image_exists(&path).await;
            let finished = {
                let mut preload = state.borrow_mut();
                preload.pending -= 1;
                preload.all_found &= found;
                if preload.pending == 0 {
                    let all_found = preload.all_found;
                    preload.done.take().map(|done| (done, all_found))
                } else {
                    None
                }
            };
            if let Some((done, all_found)) = finished {
                log::info!("preloaded {} images (all found: {})", total, all_found);
                done(all_found);
            }
        });
    }
}
