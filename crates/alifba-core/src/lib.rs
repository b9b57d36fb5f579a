pub mod api;
pub mod core;
pub mod letters;
pub mod reveal;
pub mod catalog;
pub mod progress;
pub mod nav;
pub mod ui;

// Re-export key types at crate root for convenience
pub use api::config::LessonConfig;
pub use api::types::{Cue, Generation, Tone};
pub use core::easing::{ease, lerp, Easing};
pub use core::timer::{Due, TimerId, TimerQueue};
pub use letters::{LetterEntry, LETTERS, MAX_DOORS, DEFAULT_GLYPH};
pub use reveal::{
    Door, DoorPose, DoorSequencer, DoorState, LetterInfo, Modal, ModalKind, RevealEvent,
    RevealSession, SequenceError, SequencerEvent,
};
pub use catalog::{Card, CatalogEvent, CatalogView, CountFilter};
pub use progress::{KeyValueStore, MemoryStore, ProgressMap, ProgressRecord, ProgressTracker, StoreError};
pub use nav::{Direction, NavigationError};
pub use ui::{SpeechRequest, Toast, ToastId, ToastQueue};
