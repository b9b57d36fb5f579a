use crate::api::types::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(pub u32);

/// A short-lived notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub tone: Tone,
    /// Seconds on screen.
    pub duration: f32,
}

/// Toasts currently on screen, each with its own remaining lifetime.
#[derive(Debug, Default)]
pub struct ToastQueue {
    active: Vec<(Toast, f32)>,
    next_id: u32,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast. Returns it so the caller can render it.
    pub fn push(&mut self, message: impl Into<String>, tone: Tone, duration: f32) -> Toast {
        let toast = Toast {
            id: ToastId(self.next_id),
            message: message.into(),
            tone,
            duration,
        };
        self.next_id += 1;
        self.active.push((toast.clone(), duration));
        toast
    }

    /// Age all toasts. Returns the ones that just expired.
    pub fn tick(&mut self, dt: f32) -> Vec<ToastId> {
        let mut expired = Vec::new();
        self.active.retain_mut(|(toast, remaining)| {
            *remaining -= dt;
            if *remaining <= 0.0 {
                expired.push(toast.id);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter().map(|(t, _)| t)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_independently() {
        let mut toasts = ToastQueue::new();
        let a = toasts.push("first", Tone::Info, 3.0);
        toasts.tick(1.0);
        let b = toasts.push("second", Tone::Warning, 3.0);

        assert_eq!(toasts.tick(2.0), vec![a.id]);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.tick(1.0), vec![b.id]);
        assert!(toasts.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut toasts = ToastQueue::new();
        let a = toasts.push("a", Tone::Success, 1.0);
        let b = toasts.push("b", Tone::Success, 1.0);
        assert_ne!(a.id, b.id);
        assert_eq!(toasts.active().count(), 2);
    }
}
