// core/timer.rs
//
// Timer queue of one-shot actions scheduled on a clock that only moves when
// the host calls `tick(dt)`. Owned by whoever schedules; dropping or
// clearing the queue cancels everything it holds.
//
// Usage:
//   let mut timers = TimerQueue::new();
//   timers.schedule_in(3.0, Action::OpenDoor(1));
//   timers.tick(dt);
//   while let Some(due) = timers.pop_due() { handle(due.action) }

/// Timers this close to the clock count as due, absorbing f32 drift from
/// summing many frame deltas.
const CLOCK_EPSILON: f32 = 1e-4;

/// Handle to a scheduled timer for later cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// A timer that has reached its fire time.
#[derive(Debug, Clone, PartialEq)]
pub struct Due<A> {
    pub id: TimerId,
    /// Clock time the timer was scheduled for (not when it was noticed).
    pub at: f32,
    pub action: A,
}

#[derive(Debug, Clone)]
struct Timer<A> {
    id: TimerId,
    at: f32,
    action: A,
}

/// A set of pending one-shot timers on a shared, host-driven clock.
#[derive(Debug)]
pub struct TimerQueue<A> {
    timers: Vec<Timer<A>>,
    now: f32,
    next_id: u32,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            now: 0.0,
            next_id: 0,
        }
    }
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock time in seconds.
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Schedule `action` at absolute clock time `at`. Returns a handle.
    pub fn schedule_at(&mut self, at: f32, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, at, action });
        id
    }

    /// Schedule `action` `delay` seconds from now.
    pub fn schedule_in(&mut self, delay: f32, action: A) -> TimerId {
        self.schedule_at(self.now + delay.max(0.0), action)
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every pending timer matching the predicate.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&A) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| !pred(&t.action));
        before - self.timers.len()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Advance the clock. Due timers are collected with `pop_due`.
    pub fn tick(&mut self, dt: f32) {
        if dt > 0.0 {
            self.now += dt;
        }
    }

    /// Remove and return the earliest due timer, if any.
    ///
    /// Timers due at the same instant come out in scheduling order. Actions
    /// scheduled while draining are picked up by the same drain if they are
    /// already due, so a large `dt` still replays everything in order.
    pub fn pop_due(&mut self) -> Option<Due<A>> {
        let now = self.now + CLOCK_EPSILON;
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.at <= now)
            .min_by(|(_, a), (_, b)| a.at.total_cmp(&b.at).then(a.id.0.cmp(&b.id.0)))
            .map(|(i, _)| i)?;
        let timer = self.timers.remove(idx);
        Some(Due {
            id: timer.id,
            at: timer.at,
            action: timer.action,
        })
    }

    /// Pending timers as `(fire time, action)`, earliest first.
    pub fn pending(&self) -> Vec<(f32, &A)> {
        let mut out: Vec<(f32, TimerId, &A)> =
            self.timers.iter().map(|t| (t.at, t.id, &t.action)).collect();
        out.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1 .0.cmp(&b.1 .0)));
        out.into_iter().map(|(at, _, a)| (at, a)).collect()
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_time_order() {
        let mut timers = TimerQueue::new();
        timers.schedule_in(2.0, "b");
        timers.schedule_in(1.0, "a");
        timers.schedule_in(3.0, "c");

        timers.tick(2.5);
        assert_eq!(timers.pop_due().map(|d| d.action), Some("a"));
        assert_eq!(timers.pop_due().map(|d| d.action), Some("b"));
        assert!(timers.pop_due().is_none());
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn ties_keep_scheduling_order() {
        let mut timers = TimerQueue::new();
        timers.schedule_at(1.0, 1);
        timers.schedule_at(1.0, 2);
        timers.tick(1.0);
        assert_eq!(timers.pop_due().unwrap().action, 1);
        assert_eq!(timers.pop_due().unwrap().action, 2);
    }

    #[test]
    fn cascaded_timers_replay_under_large_dt() {
        let mut timers = TimerQueue::new();
        timers.schedule_at(1.0, "first");
        timers.tick(10.0);

        let due = timers.pop_due().unwrap();
        assert_eq!(due.at, 1.0);
        // Follow-up relative to the scheduled fire time, not the current clock.
        timers.schedule_at(due.at + 1.0, "second");
        let due = timers.pop_due().unwrap();
        assert_eq!((due.at, due.action), (2.0, "second"));
    }

    #[test]
    fn cancel_and_clear() {
        let mut timers = TimerQueue::new();
        let a = timers.schedule_in(1.0, 'a');
        timers.schedule_in(1.0, 'b');
        timers.schedule_in(1.0, 'c');
        assert!(timers.cancel(a));
        assert!(!timers.cancel(a));
        assert_eq!(timers.cancel_where(|c| *c == 'b'), 1);
        timers.clear();
        timers.tick(5.0);
        assert!(timers.pop_due().is_none());
        assert!(timers.is_empty());
    }

    #[test]
    fn pending_is_sorted() {
        let mut timers = TimerQueue::new();
        timers.schedule_at(6.0, 2);
        timers.schedule_at(3.0, 1);
        let at: Vec<f32> = timers.pending().iter().map(|(at, _)| *at).collect();
        assert_eq!(at, vec![3.0, 6.0]);
    }
}
