use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use alifba_core::{
    Card, CatalogEvent, CatalogView, CountFilter, LessonConfig, ProgressTracker, ToastId,
};

use crate::dom;
use crate::speech;
use crate::storage::LocalStorage;

/// Owns the catalog view and mirrors its events into the home page DOM.
pub struct CatalogRunner {
    view: CatalogView,
    /// Grid column wrapping each card; hidden/shown by search and filter.
    columns: HashMap<char, Element>,
    cards: HashMap<char, Element>,
    toasts: HashMap<ToastId, Element>,
}

impl CatalogRunner {
    pub fn new(config: LessonConfig) -> Self {
        let tracker = ProgressTracker::new(LocalStorage::open(), config.storage_key.clone());
        let progress = tracker.load();
        Self {
            view: CatalogView::new(config, &progress),
            columns: HashMap::new(),
            cards: HashMap::new(),
            toasts: HashMap::new(),
        }
    }

    /// Wire the static controls of the page. Call once after `new`.
    pub fn bind(&mut self) {
        if let Some(input) = dom::by_id("searchInput") {
            dom::on(&input, "input", |e| {
                let value = e
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                crate::with_catalog(|r| r.search(&value));
            });
        }

        let buttons = dom::document().and_then(|d| d.query_selector_all("[data-filter]").ok());
        if let Some(buttons) = buttons {
            for i in 0..buttons.length() {
                let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let filter = CountFilter::parse(&button.get_attribute("data-filter").unwrap_or_default());
                dom::on(&button, "click", move |_| {
                    crate::with_catalog(|r| r.filter(filter));
                });
            }
        }

        dom::on_backdrop_click("instructionsModal", || {
            crate::with_catalog(|r| r.hide_instructions());
        });
        dom::on_escape(|| {
            crate::with_catalog(|r| r.hide_instructions());
        });
        self.flush();
    }

    pub fn tick(&mut self, dt: f32) {
        self.view.tick(dt);
        self.flush();
    }

    pub fn search(&mut self, text: &str) {
        self.view.search_input(text);
    }

    pub fn filter(&mut self, filter: CountFilter) {
        self.view.set_filter(filter);
        self.flush();
    }

    pub fn select(&mut self, glyph: char) {
        self.view.select(glyph);
        self.flush();
    }

    pub fn show_instructions(&mut self) {
        self.view.show_instructions();
        self.flush();
    }

    pub fn hide_instructions(&mut self) {
        self.view.hide_instructions();
        self.flush();
    }

    fn hover(&mut self, glyph: char, entering: bool) {
        if let Some(card) = self.cards.get(&glyph) {
            let _ = if entering {
                card.class_list().add_1("hover")
            } else {
                card.class_list().remove_1("hover")
            };
        }
        if entering {
            self.view.hover(glyph);
            self.flush();
        }
    }

    fn flush(&mut self) {
        for event in self.view.drain_events() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::Stats { total_letters, total_examples, .. } => {
                dom::set_text("totalLetters", &total_letters.to_string());
                dom::set_text("totalExamples", &total_examples.to_string());
            }
            CatalogEvent::CardsRendered(cards) => self.render(&cards),
            CatalogEvent::CardShown { glyph } => {
                if let Some(card) = self.cards.get(&glyph) {
                    dom::set_style(card, "opacity", "1");
                    dom::set_style(card, "transform", "translateY(0)");
                }
            }
            CatalogEvent::Visibility { glyph, visible } => {
                if let Some(column) = self.columns.get(&glyph) {
                    dom::set_style(column, "display", if visible { "block" } else { "none" });
                }
                if let Some(card) = self.cards.get(&glyph) {
                    let _ = card.class_list().toggle_with_force("search-match", visible);
                }
            }
            CatalogEvent::FilterActive(filter) => mark_active_filter(filter),
            CatalogEvent::CardSelected { glyph } => {
                if let Some(card) = self.cards.get(&glyph) {
                    let _ = card.class_list().add_1("selected");
                    dom::set_style(card, "transform", "scale(0.95)");
                }
            }
            CatalogEvent::Instructions { open } => {
                dom::set_display("instructionsModal", if open { "flex" } else { "none" });
                dom::lock_scroll(open);
            }
            CatalogEvent::Toast(toast) => {
                if let Some(el) = dom::show_toast(&toast) {
                    self.toasts.insert(toast.id, el);
                }
            }
            CatalogEvent::ToastExpired(id) => {
                if let Some(el) = self.toasts.remove(&id) {
                    el.remove();
                }
            }
            CatalogEvent::Cue(cue) => speech::play(cue),
            CatalogEvent::Navigate(url) => dom::navigate(&url),
        }
    }

    fn render(&mut self, cards: &[Card]) {
        let Some(grid) = dom::by_id("lettersGrid") else {
            log::warn!("no #lettersGrid on this page");
            return;
        };
        grid.set_inner_html("");
        self.columns.clear();
        self.cards.clear();

        for card in cards {
            let Some((column, el)) = card_element(card) else { continue };
            let _ = grid.append_child(&column);

            let glyph = card.glyph;
            dom::on(&el, "click", move |_| {
                crate::with_catalog(|r| r.select(glyph));
            });
            dom::on(&el, "mouseenter", move |_| {
                crate::with_catalog(|r| r.hover(glyph, true));
            });
            dom::on(&el, "mouseleave", move |_| {
                crate::with_catalog(|r| r.hover(glyph, false));
            });

            self.columns.insert(glyph, column);
            self.cards.insert(glyph, el);
        }
    }
}

/// Build one grid column holding a letter card.
fn card_element(card: &Card) -> Option<(Element, Element)> {
    let column = dom::create("div", &["col-6", "col-sm-4", "col-md-3", "col-lg-2"])?;
    let el = dom::create("div", &["letter-card"])?;
    let _ = el.set_attribute("data-letter", &card.glyph.to_string());
    let _ = el.set_attribute("data-count", &card.example_count.to_string());
    dom::set_style(&el, "opacity", "0");
    dom::set_style(&el, "transform", "translateY(20px)");

    let badge = dom::create("div", &["letter-badge"])?;
    badge.set_text_content(Some(&card.order.to_string()));
    let icon = dom::create("div", &["letter-icon"])?;
    icon.set_text_content(Some(&card.glyph.to_string()));
    let name = dom::create("div", &["letter-name"])?;
    name.set_text_content(Some(card.name));
    let examples = dom::create("div", &["letter-examples"])?;
    examples.set_inner_html(&format!("<i class=\"fas fa-image\"></i> {} مثال", card.example_count));

    if card.visited {
        let check = dom::create("div", &["progress-indicator"])?;
        check.set_inner_html("<i class=\"fas fa-check-circle\"></i>");
        let _ = check.set_attribute(
            "style",
            "position: absolute; top: 10px; right: 10px; color: #4cc9f0; font-size: 1.2rem;",
        );
        let _ = el.append_child(&check);
    }
    for child in [&badge, &icon, &name, &examples] {
        let _ = el.append_child(child);
    }
    let _ = column.append_child(&el);
    Some((column, el))
}

fn mark_active_filter(filter: CountFilter) {
    let Some(buttons) = dom::document().and_then(|d| d.query_selector_all("[data-filter]").ok()) else {
        return;
    };
    for i in 0..buttons.length() {
        if let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            let value = button.get_attribute("data-filter").unwrap_or_default();
            let active = CountFilter::parse(&value) == filter;
            let _ = button.class_list().toggle_with_force("active", active);
        }
    }
}
