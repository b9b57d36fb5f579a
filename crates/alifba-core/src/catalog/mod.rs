// catalog/mod.rs
//
// The home page: one card per letter, live search, count filter,
// progress statistics, and navigation into the reveal page.

pub mod debounce;

use crate::api::config::LessonConfig;
use crate::api::types::{Cue, Tone};
use crate::core::timer::TimerQueue;
use crate::letters::{self, compare_names, LETTERS};
use crate::nav::letter_url;
use crate::progress::{progress_percentage, ProgressMap};
use crate::ui::{Toast, ToastId, ToastQueue};
pub use debounce::Debouncer;

/// Count-range filter over example counts. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountFilter {
    OneToThree,
    FourToSix,
    #[default]
    All,
}

impl CountFilter {
    /// Parse a filter button's `data-filter` value. Unknown values mean "all".
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "1-3" => CountFilter::OneToThree,
            "4-6" => CountFilter::FourToSix,
            _ => CountFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CountFilter::OneToThree => "1-3",
            CountFilter::FourToSix => "4-6",
            CountFilter::All => "all",
        }
    }

    pub fn admits(self, example_count: u32) -> bool {
        match self {
            CountFilter::OneToThree => (1..=3).contains(&example_count),
            CountFilter::FourToSix => (4..=6).contains(&example_count),
            CountFilter::All => true,
        }
    }
}

/// One letter card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub glyph: char,
    pub name: &'static str,
    pub example_count: u32,
    pub order: u32,
    /// Letter has a progress record.
    pub visited: bool,
    pub visible: bool,
}

impl Card {
    /// Case-insensitive substring match over glyph and name.
    /// The term is expected trimmed and lower-cased; empty matches everything.
    fn matches(&self, term: &str) -> bool {
        term.is_empty()
            || self.glyph.to_string().contains(term)
            || self.name.to_lowercase().contains(term)
    }
}

/// Changes the catalog page must apply, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    Stats { total_letters: usize, total_examples: u32, progress: u32 },
    /// All cards, in display order, initially hidden until `CardShown`.
    CardsRendered(Vec<Card>),
    /// Staggered entrance of one card.
    CardShown { glyph: char },
    Visibility { glyph: char, visible: bool },
    FilterActive(CountFilter),
    CardSelected { glyph: char },
    Instructions { open: bool },
    Toast(Toast),
    ToastExpired(ToastId),
    Cue(Cue),
    Navigate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatalogStep {
    ShowCard(usize),
    Leave(char),
}

pub struct CatalogView {
    config: LessonConfig,
    cards: Vec<Card>,
    search: String,
    filter: CountFilter,
    debouncer: Debouncer<String>,
    timers: TimerQueue<CatalogStep>,
    toasts: ToastQueue,
    instructions_open: bool,
    leaving: bool,
    events: Vec<CatalogEvent>,
}

impl CatalogView {
    /// Build the catalog from the table and the visitor's progress.
    pub fn new(config: LessonConfig, progress: &ProgressMap) -> Self {
        let mut cards: Vec<Card> = LETTERS
            .iter()
            .map(|l| Card {
                glyph: l.glyph,
                name: l.name,
                example_count: l.example_count,
                order: l.order,
                visited: progress.contains_key(&l.glyph.to_string()),
                visible: true,
            })
            .collect();
        cards.sort_by(|a, b| compare_names(a.name, b.name));

        let mut view = Self {
            debouncer: Debouncer::new(config.search_debounce),
            config,
            cards,
            search: String::new(),
            filter: CountFilter::All,
            timers: TimerQueue::new(),
            toasts: ToastQueue::new(),
            instructions_open: false,
            leaving: false,
            events: Vec::new(),
        };

        let percentage = progress_percentage(progress);
        view.events.push(CatalogEvent::Stats {
            total_letters: LETTERS.len(),
            total_examples: letters::total_examples(),
            progress: percentage,
        });
        view.events.push(CatalogEvent::CardsRendered(view.cards.clone()));
        for i in 0..view.cards.len() {
            view.timers
                .schedule_in(i as f32 * view.config.card_stagger, CatalogStep::ShowCard(i));
        }
        if percentage > 0 {
            view.toast(format!("لقد تعلمت {}% من الحروف حتى الآن!", percentage), Tone::Success);
        }
        log::info!("catalog ready: {} letters, {}% visited", view.cards.len(), percentage);
        view
    }

    /// Raw search box input; applied after the debounce period.
    pub fn search_input(&mut self, text: &str) {
        self.debouncer.push(text.to_string());
    }

    /// Apply a search term now.
    pub fn apply_search(&mut self, text: &str) {
        self.search = text.trim().to_lowercase();
        self.refresh_visibility();
    }

    pub fn set_filter(&mut self, filter: CountFilter) {
        self.filter = filter;
        self.events.push(CatalogEvent::FilterActive(filter));
        self.refresh_visibility();
    }

    /// A card was chosen. Navigation follows after a short feedback delay.
    pub fn select(&mut self, glyph: char) {
        if self.leaving {
            return;
        }
        self.leaving = true;
        self.events.push(CatalogEvent::Cue(Cue::Click));
        if self.cards.iter().any(|c| c.glyph == glyph) {
            self.events.push(CatalogEvent::CardSelected { glyph });
            self.timers.schedule_in(self.config.selection_delay, CatalogStep::Leave(glyph));
        } else {
            self.leave(glyph);
        }
    }

    pub fn hover(&mut self, _glyph: char) {
        self.events.push(CatalogEvent::Cue(Cue::Hover));
    }

    pub fn show_instructions(&mut self) {
        if !self.instructions_open {
            self.instructions_open = true;
            self.events.push(CatalogEvent::Instructions { open: true });
            self.events.push(CatalogEvent::Cue(Cue::ModalOpen));
        }
    }

    pub fn hide_instructions(&mut self) {
        if self.instructions_open {
            self.instructions_open = false;
            self.events.push(CatalogEvent::Instructions { open: false });
            self.events.push(CatalogEvent::Cue(Cue::ModalClose));
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(term) = self.debouncer.tick(dt) {
            self.apply_search(&term);
        }

        self.timers.tick(dt);
        while let Some(due) = self.timers.pop_due() {
            match due.action {
                CatalogStep::ShowCard(i) => {
                    if let Some(card) = self.cards.get(i) {
                        self.events.push(CatalogEvent::CardShown { glyph: card.glyph });
                    }
                }
                CatalogStep::Leave(glyph) => self.leave(glyph),
            }
        }

        for id in self.toasts.tick(dt) {
            self.events.push(CatalogEvent::ToastExpired(id));
        }
    }

    fn leave(&mut self, glyph: char) {
        let url = letter_url(&self.config.reveal_page, glyph);
        log::info!("opening letter {}", glyph);
        self.events.push(CatalogEvent::Navigate(url));
    }

    fn refresh_visibility(&mut self) {
        for card in &mut self.cards {
            let visible = card.matches(&self.search) && self.filter.admits(card.example_count);
            if visible != card.visible {
                card.visible = visible;
                self.events.push(CatalogEvent::Visibility { glyph: card.glyph, visible });
            }
        }
    }

    fn toast(&mut self, message: String, tone: Tone) {
        let toast = self.toasts.push(message, tone, self.config.toast_duration);
        self.events.push(CatalogEvent::Toast(toast));
    }

    pub fn drain_events(&mut self) -> Vec<CatalogEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Glyphs of the cards currently shown, in display order.
    pub fn visible_glyphs(&self) -> Vec<char> {
        self.cards.iter().filter(|c| c.visible).map(|c| c.glyph).collect()
    }

    pub fn filter(&self) -> CountFilter {
        self.filter
    }

    pub fn instructions_open(&self) -> bool {
        self.instructions_open
    }
}
