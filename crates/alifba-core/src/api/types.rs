/// Identifies one run of the door sequencer.
/// Asset results tagged with an older generation are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(pub u32);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

/// A sound cue emitted by the lesson logic.
/// The host maps each cue to a sound (or, for now, a log line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Hover,
    DoorOpen,
    ImageReveal,
    Restart,
    Speak,
    ModalOpen,
    ModalClose,
    ImageOpen,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Click => "click",
            Cue::Hover => "hover",
            Cue::DoorOpen => "door-open",
            Cue::ImageReveal => "image-reveal",
            Cue::Restart => "restart",
            Cue::Speak => "speak",
            Cue::ModalOpen => "modal-open",
            Cue::ModalClose => "modal-close",
            Cue::ImageOpen => "image-open",
        }
    }
}

/// Severity of a status line or toast. Drives its color and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Info => "info",
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Error => "error",
        }
    }

    /// Background/foreground color used for this tone.
    pub fn color(self) -> &'static str {
        match self {
            Tone::Success => "#4cc9f0",
            Tone::Error => "#e63946",
            Tone::Warning | Tone::Info => "#4361ee",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_advances() {
        let g = Generation::default();
        assert_eq!(g.next(), Generation(1));
        assert_eq!(Generation(u32::MAX).next(), Generation(0));
    }

    #[test]
    fn cue_names_are_kebab_case() {
        assert_eq!(Cue::DoorOpen.name(), "door-open");
        assert_eq!(Cue::ModalClose.name(), "modal-close");
    }
}
