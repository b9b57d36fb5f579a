// reveal/session.rs
//
// The reveal page's session object. Owns the door sequencer, its own
// timers, open modals, and toasts for the one letter named by the page URL.
// The host feeds it input and `tick(dt)`, then applies `drain_events()`.

use crate::api::config::LessonConfig;
use crate::api::types::{Cue, Generation, Tone};
use crate::core::timer::TimerQueue;
use crate::letters::{example_image_path, preload_paths, LetterEntry};
use crate::nav::{letter_from_query, letter_url, Direction, NavigationError};
use crate::progress::{KeyValueStore, ProgressTracker};
use crate::ui::{SpeechRequest, ToastQueue};
use super::door::DoorState;
use super::sequencer::{DoorSequencer, SequenceError, SequencerEvent};
use super::view::{LetterInfo, Modal, ModalKind, RevealEvent};

const MSG_OPENING: &str = "جاري فتح الأبواب...";
const MSG_ALL_OPEN: &str = "جميع الأبواب فتحت!";
const MSG_PRELOAD_OK: &str = "جميع الصور جاهزة";
const MSG_PRELOAD_FAILED: &str = "حدث خطأ في تحميل الصور";
const MSG_ALREADY_RUNNING: &str = "العرض قيد التشغيل بالفعل";
const MSG_WAIT: &str = "يجب الانتظار حتى انتهاء العرض الحالي";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionStep {
    AutoStart,
}

pub struct RevealSession {
    config: LessonConfig,
    letter: &'static LetterEntry,
    sequencer: DoorSequencer,
    timers: TimerQueue<SessionStep>,
    toasts: ToastQueue,
    modals: Vec<ModalKind>,
    preload_settled: bool,
    events: Vec<RevealEvent>,
}

impl RevealSession {
    /// Open the reveal page for the letter in `query`, recording the visit.
    ///
    /// `now` is the visit timestamp to persist (ISO 8601).
    pub fn enter<S: KeyValueStore>(
        query: &str,
        config: LessonConfig,
        progress: &mut ProgressTracker<S>,
        now: &str,
    ) -> Self {
        let letter = letter_from_query(query);
        progress.record_visit(letter.glyph, now);
        log::info!("reveal page for {} ({})", letter.glyph, letter.name);

        let mut session = Self {
            sequencer: DoorSequencer::new(&config),
            config,
            letter,
            timers: TimerQueue::new(),
            toasts: ToastQueue::new(),
            modals: Vec::new(),
            preload_settled: false,
            events: Vec::new(),
        };

        session
            .events
            .push(RevealEvent::LetterShown(LetterInfo::new(letter, session.config.door_interval)));
        session.events.push(RevealEvent::NavButtons {
            prev_enabled: Direction::Prev.neighbor(letter.glyph).is_some(),
            next_enabled: Direction::Next.neighbor(letter.glyph).is_some(),
        });
        session.sequencer.initialize(letter.glyph, letter.door_count());
        session.pump();
        session.events.push(RevealEvent::Preload {
            paths: preload_paths(&session.config.assets_root, letter),
        });
        session
    }

    /// The preload finished; start the doors after the configured pause.
    pub fn preload_settled(&mut self, all_found: bool) {
        if self.preload_settled {
            return;
        }
        self.preload_settled = true;
        if all_found {
            self.status(MSG_PRELOAD_OK, Tone::Success);
        } else {
            log::warn!("some example images for {} failed to preload", self.letter.glyph);
            self.status(MSG_PRELOAD_FAILED, Tone::Error);
        }
        self.timers.schedule_in(self.config.autostart_delay, SessionStep::AutoStart);
    }

    /// Start the door sequence now. Warns instead if one is already running.
    pub fn start(&mut self) -> Result<(), SequenceError> {
        self.timers.cancel_where(|step| *step == SessionStep::AutoStart);
        let result = self.sequencer.start();
        match result {
            Ok(()) => self.status(MSG_OPENING, Tone::Info),
            Err(_) => self.toast(MSG_ALREADY_RUNNING, Tone::Warning),
        }
        self.pump();
        result
    }

    /// Close every door and run the sequence again.
    pub fn restart(&mut self) -> Result<(), SequenceError> {
        if self.sequencer.is_running() {
            self.toast(MSG_ALREADY_RUNNING, Tone::Warning);
            return Err(SequenceError::AlreadyRunning);
        }
        self.timers.cancel_where(|step| *step == SessionStep::AutoStart);
        self.sequencer.restart()?;
        self.events.push(RevealEvent::Cue(Cue::Restart));
        self.status(MSG_OPENING, Tone::Info);
        self.pump();
        Ok(())
    }

    pub fn tick(&mut self, dt: f32) {
        self.timers.tick(dt);
        // Part of `dt` the sequencer has not been advanced through yet.
        let mut remaining = dt.max(0.0);
        while let Some(due) = self.timers.pop_due() {
            match due.action {
                SessionStep::AutoStart => {
                    // Start at the deadline, not at the frame boundary before it.
                    let late = (self.timers.now() - due.at).clamp(0.0, remaining);
                    self.sequencer.tick(remaining - late);
                    remaining = late;
                    let _ = self.start();
                }
            }
        }

        self.sequencer.tick(remaining);
        self.pump();

        for id in self.toasts.tick(dt) {
            self.events.push(RevealEvent::ToastExpired(id));
        }
    }

    /// Answer an asset probe requested by a `ResolveAsset` event.
    pub fn resolve_asset(&mut self, generation: Generation, door: usize, found: bool) {
        self.sequencer.resolve(generation, door, found);
        self.pump();
    }

    /// Move to the previous/next letter. Refused while doors are opening.
    /// Returns the target URL, or `None` at either end of the alphabet.
    pub fn navigate(&mut self, direction: Direction) -> Result<Option<String>, NavigationError> {
        if self.sequencer.is_running() {
            self.toast(MSG_WAIT, Tone::Warning);
            return Err(NavigationError::Busy);
        }
        let target = match direction.neighbor(self.letter.glyph) {
            Some(target) => target,
            None => return Ok(None),
        };
        self.teardown();

        let url = letter_url(&self.config.reveal_page, target.glyph);
        self.events.push(RevealEvent::Navigate(url.clone()));
        Ok(Some(url))
    }

    /// Leave for the catalog. Always allowed; pending timers are dropped.
    pub fn go_home(&mut self) -> String {
        self.teardown();
        self.events.push(RevealEvent::Cue(Cue::Click));
        let url = self.config.home_page.clone();
        self.events.push(RevealEvent::Navigate(url.clone()));
        url
    }

    pub fn speak(&mut self) {
        self.events.push(RevealEvent::Speak(SpeechRequest::for_letter(self.letter.glyph)));
        self.events.push(RevealEvent::Cue(Cue::Speak));
    }

    /// A door was clicked; only opened doors show their image.
    pub fn door_clicked(&mut self, door: usize) {
        if self.sequencer.door_state(door) == Some(DoorState::Opened) {
            self.show_image(door);
        }
    }

    /// Show example `door` enlarged.
    pub fn show_image(&mut self, door: usize) {
        if door == 0 || door > self.sequencer.door_count() {
            return;
        }
        let glyph = self.letter.glyph;
        let modal = Modal::Image {
            door,
            path: example_image_path(&self.config.assets_root, glyph, door),
            alt: format!("{} مثال {}", glyph, door),
            title: format!("مثال {}", door),
            description: format!("هذا مثال {} لحرف {}", door, self.letter.name),
        };
        self.open_modal(modal, Cue::ImageOpen);
    }

    /// Show the letter description and its list of examples.
    pub fn show_info(&mut self) {
        let letter = self.letter;
        let info = LetterInfo::new(letter, self.config.door_interval);
        let modal = Modal::Info {
            glyph: letter.glyph,
            title: info.title,
            description: format!("حرف {} هو الحرف {} في الأبجدية العربية.", letter.name, info.order_words),
            examples: (1..=self.sequencer.door_count())
                .map(|i| format!("مثال {} لحرف {}", i, letter.glyph))
                .collect(),
        };
        self.open_modal(modal, Cue::ModalOpen);
    }

    pub fn close_modal(&mut self, kind: ModalKind) {
        let before = self.modals.len();
        self.modals.retain(|k| *k != kind);
        if self.modals.len() != before {
            self.events.push(RevealEvent::ModalClosed(kind));
            self.events.push(RevealEvent::Cue(Cue::ModalClose));
        }
    }

    /// Escape closes everything that is open.
    pub fn escape(&mut self) {
        for kind in [ModalKind::Image, ModalKind::Info] {
            self.close_modal(kind);
        }
    }

    /// Cancel the sequence and every pending session timer.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.sequencer.cancel();
        self.pump();
    }

    fn open_modal(&mut self, modal: Modal, cue: Cue) {
        let kind = modal.kind();
        if !self.modals.contains(&kind) {
            self.modals.push(kind);
        }
        self.events.push(RevealEvent::ModalOpened(modal));
        self.events.push(RevealEvent::Cue(cue));
    }

    fn status(&mut self, message: &str, tone: Tone) {
        self.events.push(RevealEvent::Status {
            message: message.to_string(),
            tone,
        });
    }

    fn toast(&mut self, message: impl Into<String>, tone: Tone) {
        let toast = self.toasts.push(message, tone, self.config.toast_duration);
        self.events.push(RevealEvent::Toast(toast));
    }

    /// Translate sequencer output into page events.
    fn pump(&mut self) {
        for event in self.sequencer.drain_events() {
            match event {
                SequencerEvent::DoorsReset { count } => self.events.push(RevealEvent::DoorsCreated {
                    count,
                    placeholder: self.config.door_placeholder.clone(),
                }),
                SequencerEvent::Countdown(n) => self.events.push(RevealEvent::Countdown(Some(n))),
                SequencerEvent::CountdownHidden => self.events.push(RevealEvent::Countdown(None)),
                SequencerEvent::DoorOpening { door } => {
                    self.events.push(RevealEvent::DoorState { door, state: DoorState::Opening });
                    self.events.push(RevealEvent::Cue(Cue::DoorOpen));
                }
                SequencerEvent::DoorPose { door, pose } => {
                    self.events.push(RevealEvent::DoorPose { door, pose })
                }
                SequencerEvent::ResolveAsset { generation, door, path } => {
                    self.events.push(RevealEvent::ResolveAsset { generation, door, path })
                }
                SequencerEvent::DoorOpened { door, path } => {
                    let alt = format!("{} مثال {}", self.letter.glyph, door);
                    self.events.push(RevealEvent::DoorImage { door, path, alt });
                    self.events.push(RevealEvent::DoorState { door, state: DoorState::Opened });
                    self.events.push(RevealEvent::Cue(Cue::ImageReveal));
                }
                SequencerEvent::DoorFailed { door } => {
                    self.events.push(RevealEvent::DoorError { door });
                    self.events.push(RevealEvent::DoorState { door, state: DoorState::Error });
                }
                SequencerEvent::Completed { .. } => {
                    self.status(MSG_ALL_OPEN, Tone::Success);
                    let message = format!("تم فتح جميع الأبواب لحرف {}!", self.letter.glyph);
                    self.toast(message, Tone::Success);
                }
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<RevealEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn letter(&self) -> &'static LetterEntry {
        self.letter
    }

    pub fn sequencer(&self) -> &DoorSequencer {
        &self.sequencer
    }

    pub fn is_running(&self) -> bool {
        self.sequencer.is_running()
    }

    pub fn open_modals(&self) -> &[ModalKind] {
        &self.modals
    }
}
