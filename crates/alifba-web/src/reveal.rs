use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use alifba_core::{
    Direction, LessonConfig, LetterInfo, Modal, ModalKind, NavigationError, ProgressTracker,
    RevealEvent, RevealSession, Tone, ToastId,
};

use crate::dom;
use crate::probe;
use crate::speech;
use crate::storage::LocalStorage;

/// Owns the reveal session and mirrors its events into the letter page DOM.
pub struct RevealRunner {
    session: RevealSession,
    toasts: HashMap<ToastId, Element>,
    /// Set once the page is being left; the frame loop stops on it.
    left: bool,
}

impl RevealRunner {
    pub fn new(config: LessonConfig) -> Self {
        let mut tracker = ProgressTracker::new(LocalStorage::open(), config.storage_key.clone());
        let session = RevealSession::enter(&dom::location_search(), config, &mut tracker, &dom::now_iso());
        Self {
            session,
            toasts: HashMap::new(),
            left: false,
        }
    }

    /// Wire modal dismissal and apply the entry events. Call once after `new`.
    pub fn bind(&mut self) {
        dom::on_backdrop_click("letterInfoModal", || {
            crate::with_reveal(|r| r.close_modal(ModalKind::Info));
        });
        dom::on_backdrop_click("imageModal", || {
            crate::with_reveal(|r| r.close_modal(ModalKind::Image));
        });
        dom::on_escape(|| {
            crate::with_reveal(|r| r.escape());
        });
        self.flush();
    }

    /// Advance one frame. Returns false once the page is being left.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.left {
            return false;
        }
        self.session.tick(dt);
        self.flush();
        !self.left
    }

    pub fn preload_settled(&mut self, all_found: bool) {
        self.session.preload_settled(all_found);
        self.flush();
    }

    pub fn resolve_asset(&mut self, generation: alifba_core::Generation, door: usize, found: bool) {
        self.session.resolve_asset(generation, door, found);
        self.flush();
    }

    pub fn restart(&mut self) {
        if let Err(err) = self.session.restart() {
            log::warn!("restart refused: {}", err);
        }
        self.flush();
    }

    pub fn navigate(&mut self, direction: Direction) {
        match self.session.navigate(direction) {
            Ok(Some(url)) => log::info!("moving to {}", url),
            Ok(None) => log::info!("no letter in that direction"),
            Err(NavigationError::Busy) => log::warn!("navigation refused while doors are opening"),
        }
        self.flush();
    }

    pub fn home(&mut self) {
        self.session.go_home();
        self.flush();
    }

    pub fn speak(&mut self) {
        self.session.speak();
        self.flush();
    }

    pub fn door_clicked(&mut self, door: usize) {
        self.session.door_clicked(door);
        self.flush();
    }

    /// Open example `door` enlarged, from the info modal's example list.
    pub fn show_image(&mut self, door: usize) {
        self.session.show_image(door);
        self.flush();
    }

    pub fn show_info(&mut self) {
        self.session.show_info();
        self.flush();
    }

    pub fn close_modal(&mut self, kind: ModalKind) {
        self.session.close_modal(kind);
        self.flush();
    }

    pub fn escape(&mut self) {
        self.session.escape();
        self.flush();
    }

    pub fn teardown(&mut self) {
        self.session.teardown();
        self.flush();
        self.left = true;
    }

    fn flush(&mut self) {
        for event in self.session.drain_events() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: RevealEvent) {
        match event {
            RevealEvent::LetterShown(info) => show_letter(&info),
            RevealEvent::NavButtons { prev_enabled, next_enabled } => {
                dom::set_disabled("prevBtn", !prev_enabled);
                dom::set_disabled("nextBtn", !next_enabled);
            }
            RevealEvent::Preload { paths } => {
                probe::spawn_preload(paths, |all_found| {
                    crate::with_reveal(|r| r.preload_settled(all_found));
                });
            }
            RevealEvent::DoorsCreated { count, placeholder } => create_doors(count, &placeholder),
            RevealEvent::DoorState { door, state } => {
                if let Some(item) = dom::by_id(&format!("image-{}", door)) {
                    let _ = item.set_attribute("data-state", state.as_str());
                }
            }
            RevealEvent::DoorPose { door, pose } => {
                if let Some(img) = dom::by_id(&format!("door-{}", door)) {
                    dom::set_style(&img, "transform", &pose.css_transform());
                    dom::set_style(&img, "opacity", &format!("{:.3}", pose.alpha));
                }
            }
            RevealEvent::DoorImage { door, path, alt } => {
                if let Some(img) = dom::by_id(&format!("door-{}", door)) {
                    let _ = img.set_attribute("src", &path);
                    let _ = img.set_attribute("alt", &alt);
                    img.set_class_name("letter-image");
                }
            }
            RevealEvent::DoorError { door } => show_door_error(door),
            RevealEvent::ResolveAsset { generation, door, path } => {
                probe::spawn_probe(path, move |found| {
                    crate::with_reveal(|r| r.resolve_asset(generation, door, found));
                });
            }
            RevealEvent::Countdown(Some(n)) => {
                dom::set_text("timerValue", &n.to_string());
                dom::set_display("timerDisplay", "flex");
            }
            RevealEvent::Countdown(None) => dom::set_display("timerDisplay", "none"),
            RevealEvent::Status { message, tone } => show_status(&message, tone),
            RevealEvent::Toast(toast) => {
                if let Some(el) = dom::show_toast(&toast) {
                    self.toasts.insert(toast.id, el);
                }
            }
            RevealEvent::ToastExpired(id) => {
                if let Some(el) = self.toasts.remove(&id) {
                    el.remove();
                }
            }
            RevealEvent::Speak(request) => speech::speak(&request),
            RevealEvent::Cue(cue) => speech::play(cue),
            RevealEvent::ModalOpened(modal) => show_modal(&modal),
            RevealEvent::ModalClosed(kind) => {
                dom::set_display(modal_id(kind), "none");
                dom::lock_scroll(false);
            }
            RevealEvent::Navigate(url) => {
                self.left = true;
                dom::navigate(&url);
            }
        }
    }
}

fn show_letter(info: &LetterInfo) {
    let glyph = info.glyph.to_string();
    dom::set_text("currentLetter", &glyph);
    dom::set_text("letterName", info.name);
    dom::set_text("bigLetter", &glyph);
    dom::set_text("letterTitle", &info.title);
    dom::set_text("exampleCount", &info.example_count.to_string());
    dom::set_text("doorCount", &info.door_count.to_string());
    dom::set_text("letterOrder", &info.order.to_string());
    dom::set_text("descLetter", info.name);
    dom::set_text("descOrder", &info.order_words);
    dom::set_text("descCount", &info.count_words);
    dom::set_text("imagesSubtitle", &info.subtitle);
    if let Some(doc) = dom::document() {
        doc.set_title(&info.page_title);
    }
}

fn create_doors(count: usize, placeholder: &str) {
    let Some(container) = dom::by_id("imagesContainer") else {
        log::warn!("no #imagesContainer on this page");
        return;
    };
    container.set_inner_html("");

    for i in 1..=count {
        let Some(item) = door_element(i, placeholder) else { continue };
        let _ = container.append_child(&item);
        dom::on(&item, "click", move |_| {
            crate::with_reveal(|r| r.door_clicked(i));
        });
        dom::set_style(&item, "transition-delay", &format!("{:.1}s", i as f32 * 0.1));
        // Commit the hidden start pose so the change below transitions.
        if let Some(el) = item.dyn_ref::<HtmlElement>() {
            let _ = el.offset_height();
        }
        dom::set_style(&item, "opacity", "1");
        dom::set_style(&item, "transform", "translateY(0)");
    }
}

fn door_element(i: usize, placeholder: &str) -> Option<Element> {
    let item = dom::create("div", &["image-item"])?;
    item.set_id(&format!("image-{}", i));
    let _ = item.set_attribute("data-index", &i.to_string());
    let _ = item.set_attribute("data-state", "closed");
    dom::set_style(&item, "opacity", "0");
    dom::set_style(&item, "transform", "translateY(20px)");

    let door = dom::create("img", &["door-image"])?;
    door.set_id(&format!("door-{}", i));
    let _ = door.set_attribute("src", placeholder);
    let _ = door.set_attribute("alt", &format!("باب {}", i));

    let number = dom::create("span", &["image-number"])?;
    number.set_text_content(Some(&i.to_string()));
    let caption = dom::create("div", &["image-caption"])?;
    caption.set_text_content(Some(&format!("مثال {}", i)));

    for child in [&door, &number, &caption] {
        let _ = item.append_child(child);
    }
    Some(item)
}

fn show_door_error(door: usize) {
    let Some(img) = dom::by_id(&format!("door-{}", door)) else { return };
    let Some(error) = dom::create("div", &["image-error"]) else { return };
    error.set_inner_html("<i class=\"fas fa-exclamation-triangle\"></i>");
    let _ = error.set_attribute(
        "style",
        "display: flex; align-items: center; justify-content: center; \
         width: 100%; height: 100%; color: #e63946; font-size: 2rem;",
    );
    if let Some(parent) = img.parent_node() {
        let _ = parent.replace_child(&error, &img);
    }
}

fn show_status(message: &str, tone: Tone) {
    let Some(indicator) = dom::by_id("statusIndicator") else { return };
    let icon = match tone {
        Tone::Error => "fa-exclamation-circle",
        Tone::Success => "fa-check-circle",
        Tone::Info | Tone::Warning => "fa-spinner fa-spin",
    };
    indicator.set_inner_html(&format!("<i class=\"fas {}\"></i> ", icon));
    if let Some(doc) = dom::document() {
        let _ = indicator.append_child(&doc.create_text_node(message));
    }
    dom::set_style(&indicator, "color", tone.color());
}

fn modal_id(kind: ModalKind) -> &'static str {
    match kind {
        ModalKind::Image => "imageModal",
        ModalKind::Info => "letterInfoModal",
    }
}

fn show_modal(modal: &Modal) {
    match modal {
        Modal::Image { path, alt, title, description, .. } => {
            if let Some(img) = dom::by_id("modalImage") {
                let _ = img.set_attribute("src", path);
                let _ = img.set_attribute("alt", alt);
            }
            dom::set_text("modalImageTitle", title);
            dom::set_text("modalImageDescription", description);
        }
        Modal::Info { glyph, title, description, examples } => {
            dom::set_text("modalBigLetter", &glyph.to_string());
            dom::set_text("modalLetterName", title);
            dom::set_text("modalLetterDescription", description);
            if let Some(list) = dom::by_id("examplesList") {
                list.set_inner_html("");
                for (i, text) in examples.iter().enumerate() {
                    if let Some(item) = example_item(i + 1, text) {
                        let _ = list.append_child(&item);
                    }
                }
            }
        }
    }
    dom::set_display(modal_id(modal.kind()), "flex");
    dom::lock_scroll(true);
}

fn example_item(number: usize, text: &str) -> Option<Element> {
    let item = dom::create("div", &["example-item"])?;
    let badge = dom::create("div", &["example-number"])?;
    badge.set_text_content(Some(&number.to_string()));
    let label = dom::create("div", &["example-text"])?;
    label.set_text_content(Some(text));
    let _ = item.append_child(&badge);
    let _ = item.append_child(&label);
    dom::on(&item, "click", move |_| {
        crate::with_reveal(|r| r.show_image(number));
    });
    Some(item)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn doors_start_hidden_for_the_entrance_transition() {
        let item = door_element(2, "assets/images/door-open.gif").unwrap();
        assert_eq!(item.id(), "image-2");
        let style = item.dyn_into::<HtmlElement>().unwrap().style();
        assert_eq!(style.get_property_value("opacity").unwrap(), "0");
        assert_eq!(style.get_property_value("transform").unwrap(), "translateY(20px)");
    }
}
