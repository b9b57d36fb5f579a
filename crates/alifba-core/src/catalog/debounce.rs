/// Frame deltas rarely sum to an exact wait; this much short still counts.
const EPSILON: f32 = 1e-4;

/// Holds back a value until input has been quiet for `wait` seconds.
/// Each new value restarts the wait and replaces the previous one.
#[derive(Debug)]
pub struct Debouncer<T> {
    wait: f32,
    pending: Option<(T, f32)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: f32) -> Self {
        Self { wait, pending: None }
    }

    pub fn push(&mut self, value: T) {
        self.pending = Some((value, self.wait));
    }

    /// Advance time; yields the value once the quiet period has passed.
    pub fn tick(&mut self, dt: f32) -> Option<T> {
        let remaining = match self.pending.as_mut() {
            Some((_, remaining)) => {
                *remaining -= dt;
                *remaining
            }
            None => return None,
        };
        if remaining <= EPSILON {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Drop any pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_quiet_period() {
        let mut d = Debouncer::new(0.3);
        d.push("ب");
        assert_eq!(d.tick(0.2), None);
        assert_eq!(d.tick(0.1), Some("ب"));
        assert!(!d.is_pending());
    }

    #[test]
    fn new_input_restarts_the_wait() {
        let mut d = Debouncer::new(0.3);
        d.push("a");
        d.tick(0.25);
        d.push("ab");
        assert_eq!(d.tick(0.25), None);
        assert_eq!(d.tick(0.05), Some("ab"));
    }

    #[test]
    fn cancel_drops_value() {
        let mut d = Debouncer::new(0.3);
        d.push(1);
        d.cancel();
        assert_eq!(d.tick(1.0), None);
    }
}
