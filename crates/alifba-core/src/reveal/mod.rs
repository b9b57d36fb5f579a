// reveal/mod.rs
//
// The letter reveal page: doors, the timed sequencer that opens them,
// and the session object that owns both for one page load.

pub mod door;
pub mod sequencer;
pub mod session;
pub mod view;

pub use door::{Door, DoorPose, DoorState};
pub use sequencer::{DoorSequencer, SequenceError, SequencerEvent, SequencerTiming};
pub use session::RevealSession;
pub use view::{LetterInfo, Modal, ModalKind, RevealEvent};
