use crate::api::types::{Cue, Generation, Tone};
use crate::letters::{number_words, LetterEntry};
use crate::ui::{SpeechRequest, Toast, ToastId};
use super::door::{DoorPose, DoorState};

/// Everything the reveal page shows about the current letter.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterInfo {
    pub glyph: char,
    pub name: &'static str,
    pub order: u32,
    pub example_count: u32,
    pub door_count: usize,
    /// "حرف <name>"
    pub title: String,
    /// Browser tab title.
    pub page_title: String,
    pub order_words: String,
    pub count_words: String,
    /// Line under the doors explaining the cadence.
    pub subtitle: String,
}

impl LetterInfo {
    pub fn new(letter: &LetterEntry, door_interval: f32) -> Self {
        let door_count = letter.door_count();
        Self {
            glyph: letter.glyph,
            name: letter.name,
            order: letter.order,
            example_count: letter.example_count,
            door_count,
            title: format!("حرف {}", letter.name),
            page_title: format!("حرف {} - تطبيق الحروف العربية", letter.glyph),
            order_words: number_words(letter.order),
            count_words: number_words(letter.example_count),
            subtitle: format!(
                "الأبواب ستفتح تباعاً كل {} ثواني ({} أبواب)",
                door_interval.round() as u32,
                door_count
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Image,
    Info,
}

/// Content of a modal dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// One example image, enlarged.
    Image {
        door: usize,
        path: String,
        alt: String,
        title: String,
        description: String,
    },
    /// Letter description plus the list of its examples.
    Info {
        glyph: char,
        title: String,
        description: String,
        examples: Vec<String>,
    },
}

impl Modal {
    pub fn kind(&self) -> ModalKind {
        match self {
            Modal::Image { .. } => ModalKind::Image,
            Modal::Info { .. } => ModalKind::Info,
        }
    }
}

/// Changes the reveal page must apply, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum RevealEvent {
    LetterShown(LetterInfo),
    NavButtons { prev_enabled: bool, next_enabled: bool },
    /// Warm the image cache; answer with `RevealSession::preload_settled`.
    Preload { paths: Vec<String> },
    DoorsCreated { count: usize, placeholder: String },
    DoorState { door: usize, state: DoorState },
    DoorPose { door: usize, pose: DoorPose },
    /// Replace the door with its example image.
    DoorImage { door: usize, path: String, alt: String },
    /// Replace the door with the error indicator.
    DoorError { door: usize },
    /// Probe `path`; answer with `RevealSession::resolve_asset`.
    ResolveAsset { generation: Generation, door: usize, path: String },
    /// `Some(n)` shows the countdown at n, `None` hides it.
    Countdown(Option<u32>),
    Status { message: String, tone: Tone },
    Toast(Toast),
    ToastExpired(ToastId),
    Speak(SpeechRequest),
    Cue(Cue),
    ModalOpened(Modal),
    ModalClosed(ModalKind),
    Navigate(String),
}
