use crate::core::easing::{ease, Easing};

/// Lifecycle of one door: `Closed → Opening → {Opened | Error}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorState {
    #[default]
    Closed,
    Opening,
    Opened,
    Error,
}

impl DoorState {
    /// Value written to the door's `data-state` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            DoorState::Closed => "closed",
            DoorState::Opening => "opening",
            DoorState::Opened => "opened",
            DoorState::Error => "error",
        }
    }

    /// Whether the door has reached a final state for this run.
    pub fn is_settled(self) -> bool {
        matches!(self, DoorState::Opened | DoorState::Error)
    }
}

/// Visual pose of a door (or the image behind it) at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorPose {
    pub scale: f32,
    pub rotation_deg: f32,
    pub alpha: f32,
}

impl DoorPose {
    pub const REST: DoorPose = DoorPose { scale: 1.0, rotation_deg: 0.0, alpha: 1.0 };
    /// Fully swung door, just before the image is resolved.
    pub const SWUNG: DoorPose = DoorPose { scale: 1.2, rotation_deg: 10.0, alpha: 0.5 };
    /// Image just swapped in: transparent and slightly enlarged.
    pub const POP: DoorPose = DoorPose { scale: 1.1, rotation_deg: 0.0, alpha: 0.0 };

    fn blend(from: DoorPose, to: DoorPose, t: f32, easing: Easing) -> DoorPose {
        DoorPose {
            scale: ease(from.scale, to.scale, t, easing),
            rotation_deg: ease(from.rotation_deg, to.rotation_deg, t, easing),
            alpha: ease(from.alpha, to.alpha, t, easing).clamp(0.0, 1.0),
        }
    }

    /// CSS `transform` value for this pose.
    pub fn css_transform(&self) -> String {
        format!("scale({:.3}) rotate({:.2}deg)", self.scale, self.rotation_deg)
    }
}

/// An in-flight pose transition.
#[derive(Debug, Clone, Copy)]
struct Transition {
    from: DoorPose,
    to: DoorPose,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl Transition {
    fn sample(&self) -> DoorPose {
        let t = if self.duration > 0.0 { self.elapsed / self.duration } else { 1.0 };
        DoorPose::blend(self.from, self.to, t, self.easing)
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// One door slot on the reveal view.
#[derive(Debug, Clone)]
pub struct Door {
    /// 1-based position.
    pub index: usize,
    pub state: DoorState,
    /// Example image behind this door.
    pub image_path: String,
    pose: DoorPose,
    transition: Option<Transition>,
}

impl Door {
    pub fn new(index: usize, image_path: String) -> Self {
        Self {
            index,
            state: DoorState::Closed,
            image_path,
            pose: DoorPose::REST,
            transition: None,
        }
    }

    pub fn pose(&self) -> DoorPose {
        self.pose
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Start swinging the door open over `duration` seconds.
    pub(crate) fn begin_opening(&mut self, duration: f32) {
        self.state = DoorState::Opening;
        self.animate_to(DoorPose::SWUNG, duration, Easing::QuadOut);
    }

    /// Image resolved: show it with a short pop-in.
    pub(crate) fn mark_opened(&mut self, pop: f32) {
        self.state = DoorState::Opened;
        self.pose = DoorPose::POP;
        self.animate_to(DoorPose::REST, pop, Easing::BackOut);
    }

    /// Image missing: freeze on the error indicator.
    pub(crate) fn mark_error(&mut self) {
        self.state = DoorState::Error;
        self.pose = DoorPose::REST;
        self.transition = None;
    }

    pub(crate) fn reset(&mut self) {
        self.state = DoorState::Closed;
        self.pose = DoorPose::REST;
        self.transition = None;
    }

    fn animate_to(&mut self, to: DoorPose, duration: f32, easing: Easing) {
        self.transition = Some(Transition {
            from: self.pose,
            to,
            elapsed: 0.0,
            duration,
            easing,
        });
    }

    /// Advance the current transition. Returns the new pose if one is running.
    pub(crate) fn advance(&mut self, dt: f32) -> Option<DoorPose> {
        let transition = self.transition.as_mut()?;
        transition.elapsed += dt;
        self.pose = transition.sample();
        if transition.is_done() {
            self.pose = transition.to;
            self.transition = None;
        }
        Some(self.pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_states() {
        assert!(!DoorState::Closed.is_settled());
        assert!(!DoorState::Opening.is_settled());
        assert!(DoorState::Opened.is_settled());
        assert!(DoorState::Error.is_settled());
    }

    #[test]
    fn opening_swings_to_full_pose() {
        let mut door = Door::new(1, "صور/ب/icon01.png".into());
        door.begin_opening(1.0);
        assert_eq!(door.state, DoorState::Opening);

        let mid = door.advance(0.5).unwrap();
        assert!(mid.scale > 1.0 && mid.scale < 1.2);
        let end = door.advance(0.5).unwrap();
        assert_eq!(end, DoorPose::SWUNG);
        assert!(!door.is_animating());
        assert!(door.advance(0.1).is_none());
    }

    #[test]
    fn reset_returns_to_rest() {
        let mut door = Door::new(2, String::new());
        door.begin_opening(1.0);
        door.advance(0.3);
        door.reset();
        assert_eq!(door.state, DoorState::Closed);
        assert_eq!(door.pose(), DoorPose::REST);
        assert!(!door.is_animating());
    }

    #[test]
    fn css_transform_format() {
        assert_eq!(DoorPose::SWUNG.css_transform(), "scale(1.200) rotate(10.00deg)");
    }
}
