pub mod catalog;
pub mod dom;
pub mod frame;
pub mod probe;
pub mod reveal;
pub mod speech;
pub mod storage;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use alifba_core::{CountFilter, Direction, LessonConfig, ModalKind};
pub use catalog::CatalogRunner;
pub use reveal::RevealRunner;
pub use storage::LocalStorage;

// wasm-bindgen cannot export stateful structs with callbacks into the DOM, so
// each page keeps its runner here and exports free functions around it.
thread_local! {
    static CATALOG: RefCell<Option<CatalogRunner>> = RefCell::new(None);
    static REVEAL: RefCell<Option<RevealRunner>> = RefCell::new(None);
}

pub(crate) fn with_catalog<R>(f: impl FnOnce(&mut CatalogRunner) -> R) -> Option<R> {
    CATALOG.with(|cell| {
        let Ok(mut borrow) = cell.try_borrow_mut() else {
            log::warn!("catalog is busy; dropping re-entrant call");
            return None;
        };
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("catalog not initialized. Call catalog_init() first.");
                None
            }
        }
    })
}

pub(crate) fn with_reveal<R>(f: impl FnOnce(&mut RevealRunner) -> R) -> Option<R> {
    REVEAL.with(|cell| {
        let Ok(mut borrow) = cell.try_borrow_mut() else {
            log::warn!("reveal page is busy; dropping re-entrant call");
            return None;
        };
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("reveal page not initialized. Call reveal_init() first.");
                None
            }
        }
    })
}

/// Put `make()` into an empty slot. Leaves an occupied slot alone and
/// returns false, so a page never runs two frame loops.
fn install_once<T>(slot: &RefCell<Option<T>>, make: impl FnOnce() -> T) -> bool {
    let mut slot = slot.borrow_mut();
    if slot.is_some() {
        return false;
    }
    *slot = Some(make());
    true
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Optional JSON overrides from the host page; anything missing keeps its default.
fn load_config(config_json: Option<String>) -> LessonConfig {
    config_json
        .as_deref()
        .map(LessonConfig::from_json_or_default)
        .unwrap_or_default()
}

fn first_char(s: &str) -> Option<char> {
    s.trim().chars().next()
}

// ---- Catalog page ----

#[wasm_bindgen]
pub fn catalog_init(config_json: Option<String>) {
    init_logging();

    if !CATALOG.with(|cell| install_once(cell, || CatalogRunner::new(load_config(config_json)))) {
        log::warn!("catalog already initialized; ignoring catalog_init()");
        return;
    }
    with_catalog(|r| r.bind());
    frame::start(|dt| with_catalog(|r| r.tick(dt)).is_some());
    log::info!("alifba catalog: initialized");
}

#[wasm_bindgen]
pub fn catalog_search(term: &str) {
    with_catalog(|r| r.search(term));
}

#[wasm_bindgen]
pub fn catalog_filter(filter: &str) {
    let filter = CountFilter::parse(filter);
    with_catalog(|r| r.filter(filter));
}

#[wasm_bindgen]
pub fn catalog_select(letter: &str) {
    match first_char(letter) {
        Some(glyph) => {
            with_catalog(|r| r.select(glyph));
        }
        None => log::warn!("catalog_select called without a letter"),
    }
}

#[wasm_bindgen]
pub fn catalog_show_instructions() {
    with_catalog(|r| r.show_instructions());
}

#[wasm_bindgen]
pub fn catalog_hide_instructions() {
    with_catalog(|r| r.hide_instructions());
}

// ---- Reveal page ----

#[wasm_bindgen]
pub fn reveal_init(config_json: Option<String>) {
    init_logging();

    if !REVEAL.with(|cell| install_once(cell, || RevealRunner::new(load_config(config_json)))) {
        log::warn!("reveal page already initialized; ignoring reveal_init()");
        return;
    }
    with_reveal(|r| r.bind());
    frame::start(|dt| with_reveal(|r| r.tick(dt)).unwrap_or(false));
    log::info!("alifba reveal: initialized");
}

#[wasm_bindgen]
pub fn reveal_restart() {
    with_reveal(|r| r.restart());
}

/// `direction` is "prev" or "next".
#[wasm_bindgen]
pub fn reveal_navigate(direction: &str) {
    match Direction::parse(direction) {
        Some(direction) => {
            with_reveal(|r| r.navigate(direction));
        }
        None => log::warn!("unknown direction {:?}", direction),
    }
}

#[wasm_bindgen]
pub fn reveal_home() {
    with_reveal(|r| r.home());
}

#[wasm_bindgen]
pub fn reveal_speak() {
    with_reveal(|r| r.speak());
}

#[wasm_bindgen]
pub fn reveal_door_clicked(door: u32) {
    with_reveal(|r| r.door_clicked(door as usize));
}

#[wasm_bindgen]
pub fn reveal_show_info() {
    with_reveal(|r| r.show_info());
}

#[wasm_bindgen]
pub fn reveal_close_info() {
    with_reveal(|r| r.close_modal(ModalKind::Info));
}

#[wasm_bindgen]
pub fn reveal_close_image() {
    with_reveal(|r| r.close_modal(ModalKind::Image));
}

/// Cancel every pending timer. Call when the page is hidden or unloaded.
#[wasm_bindgen]
pub fn reveal_teardown() {
    with_reveal(|r| r.teardown());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_keeps_the_first_runner() {
        let slot = RefCell::new(None);
        assert!(install_once(&slot, || 1));
        assert!(!install_once(&slot, || 2));
        assert_eq!(*slot.borrow(), Some(1));
    }

    #[test]
    fn first_char_trims() {
        assert_eq!(first_char("  ب "), Some('ب'));
        assert_eq!(first_char(""), None);
    }
}
