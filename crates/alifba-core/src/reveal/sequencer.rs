// reveal/sequencer.rs
//
// Door reveal sequencer. Opens a letter's doors one by one on a fixed
// cadence. Door k opens at k × interval seconds after start; each reveal is
// its own timer measured from start, so a slow image never delays the next
// door. Image lookups are requested through events and answered by the host
// via `resolve`, tagged with the run's generation.
//
// Usage:
//   let mut seq = DoorSequencer::new(&config);
//   seq.initialize('ب', 1);
//   seq.start()?;
//   seq.tick(dt);                       // host frame loop
//   for event in seq.drain_events() { ... ResolveAsset → probe image ... }
//   seq.resolve(generation, door, found);

use thiserror::Error;

use crate::api::config::LessonConfig;
use crate::api::types::Generation;
use crate::core::timer::TimerQueue;
use crate::letters::{clamp_door_count, example_image_path, DEFAULT_GLYPH};
use super::door::{Door, DoorPose, DoorState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("a reveal sequence is already running")]
    AlreadyRunning,
}

/// Observable changes produced by the sequencer.
#[derive(Debug, Clone, PartialEq)]
pub enum SequencerEvent {
    /// All doors were (re)created closed.
    DoorsReset { count: usize },
    /// Countdown shows `n` seconds remaining.
    Countdown(u32),
    CountdownHidden,
    DoorOpening { door: usize },
    DoorPose { door: usize, pose: DoorPose },
    /// The host should check whether `path` exists and call `resolve`.
    ResolveAsset { generation: Generation, door: usize, path: String },
    DoorOpened { door: usize, path: String },
    DoorFailed { door: usize },
    /// Every door settled. Fired once per run.
    Completed { opened: usize, failed: usize },
}

/// The timing subset of `LessonConfig` the sequencer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencerTiming {
    pub door_interval: f32,
    pub countdown_steps: u32,
    pub countdown_step: f32,
    pub transition_delay: f32,
    pub reveal_pop: f32,
}

impl From<&LessonConfig> for SequencerTiming {
    fn from(config: &LessonConfig) -> Self {
        Self {
            door_interval: config.door_interval,
            countdown_steps: config.countdown_steps,
            countdown_step: config.countdown_step,
            transition_delay: config.transition_delay,
            reveal_pop: config.reveal_pop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Countdown(u32),
    Reveal(usize),
    Resolve(usize),
}

pub struct DoorSequencer {
    timing: SequencerTiming,
    assets_root: String,
    glyph: char,
    doors: Vec<Door>,
    /// Doors whose asset lookup has been requested and not yet answered.
    awaiting: Vec<bool>,
    timers: TimerQueue<Step>,
    generation: Generation,
    started_at: Option<f32>,
    running: bool,
    completed: bool,
    events: Vec<SequencerEvent>,
}

impl DoorSequencer {
    pub fn new(config: &LessonConfig) -> Self {
        Self {
            timing: SequencerTiming::from(config),
            assets_root: config.assets_root.clone(),
            glyph: DEFAULT_GLYPH,
            doors: Vec::new(),
            awaiting: Vec::new(),
            timers: TimerQueue::new(),
            generation: Generation::default(),
            started_at: None,
            running: false,
            completed: false,
            events: Vec::new(),
        }
    }

    /// Prepare `door_count` closed doors for `glyph`, cancelling any earlier run.
    /// The count is clamped to `0..=MAX_DOORS`.
    pub fn initialize(&mut self, glyph: char, door_count: usize) {
        self.cancel();
        let count = clamp_door_count(door_count);
        self.glyph = glyph;
        self.doors = (1..=count)
            .map(|k| Door::new(k, example_image_path(&self.assets_root, glyph, k)))
            .collect();
        self.awaiting = vec![false; count];
        self.generation = self.generation.next();
        self.completed = false;
        self.events.push(SequencerEvent::DoorsReset { count });
    }

    /// Begin a run: countdown, then one reveal per door at k × interval.
    pub fn start(&mut self) -> Result<(), SequenceError> {
        if self.running {
            log::warn!("reveal for {} already running, start rejected", self.glyph);
            return Err(SequenceError::AlreadyRunning);
        }

        if self.doors.iter().any(|d| d.state != DoorState::Closed || d.is_animating()) {
            for door in &mut self.doors {
                door.reset();
            }
            self.events.push(SequencerEvent::DoorsReset { count: self.doors.len() });
        }
        self.awaiting.iter_mut().for_each(|a| *a = false);

        self.generation = self.generation.next();
        self.running = true;
        self.completed = false;
        self.started_at = Some(self.timers.now());

        if self.doors.is_empty() {
            log::info!("letter {} has no doors, reveal complete", self.glyph);
            self.finish();
            return Ok(());
        }

        let steps = self.timing.countdown_steps;
        if steps > 0 {
            self.events.push(SequencerEvent::Countdown(steps));
            for i in 1..=steps {
                self.timers
                    .schedule_in(i as f32 * self.timing.countdown_step, Step::Countdown(steps - i));
            }
        }

        for k in 1..=self.doors.len() {
            self.timers.schedule_in(k as f32 * self.timing.door_interval, Step::Reveal(k));
        }

        log::info!(
            "reveal started for {}: {} doors every {}s",
            self.glyph,
            self.doors.len(),
            self.timing.door_interval
        );
        Ok(())
    }

    /// Stop every pending reveal, transition, and countdown step.
    /// Asset answers still in flight for the stopped run will be ignored.
    pub fn cancel(&mut self) {
        let countdown_pending = self
            .timers
            .pending()
            .iter()
            .any(|(_, step)| matches!(step, Step::Countdown(_)));
        if countdown_pending {
            self.events.push(SequencerEvent::CountdownHidden);
        }
        self.timers.clear();
        self.awaiting.iter_mut().for_each(|a| *a = false);
        if self.running {
            log::info!("reveal for {} cancelled", self.glyph);
            self.generation = self.generation.next();
            self.running = false;
        }
        self.started_at = None;
    }

    /// Cancel, re-create closed doors, and start again.
    /// Rejected, not queued, while a run is in progress.
    pub fn restart(&mut self) -> Result<(), SequenceError> {
        if self.running {
            log::warn!("reveal for {} already running, restart rejected", self.glyph);
            return Err(SequenceError::AlreadyRunning);
        }
        let count = self.doors.len();
        self.initialize(self.glyph, count);
        self.start()
    }

    /// Advance timers and door transitions by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.timers.tick(dt);

        while let Some(due) = self.timers.pop_due() {
            match due.action {
                Step::Countdown(0) => self.events.push(SequencerEvent::CountdownHidden),
                Step::Countdown(n) => self.events.push(SequencerEvent::Countdown(n)),
                Step::Reveal(k) => {
                    if let Some(door) = self.doors.get_mut(k - 1) {
                        door.begin_opening(self.timing.transition_delay);
                        self.events.push(SequencerEvent::DoorOpening { door: k });
                        self.timers
                            .schedule_at(due.at + self.timing.transition_delay, Step::Resolve(k));
                    }
                }
                Step::Resolve(k) => {
                    if let Some(door) = self.doors.get(k - 1) {
                        self.awaiting[k - 1] = true;
                        self.events.push(SequencerEvent::ResolveAsset {
                            generation: self.generation,
                            door: k,
                            path: door.image_path.clone(),
                        });
                    }
                }
            }
        }

        for door in &mut self.doors {
            if let Some(pose) = door.advance(dt) {
                self.events.push(SequencerEvent::DoorPose { door: door.index, pose });
            }
        }
    }

    /// Answer an asset lookup. Returns false if the answer was stale or unexpected.
    pub fn resolve(&mut self, generation: Generation, door: usize, found: bool) -> bool {
        if generation != self.generation || !self.running {
            log::debug!("dropping stale asset result for door {} ({:?})", door, generation);
            return false;
        }
        let idx = match door.checked_sub(1) {
            Some(idx) if idx < self.doors.len() && self.awaiting[idx] => idx,
            _ => {
                log::debug!("unexpected asset result for door {}", door);
                return false;
            }
        };
        self.awaiting[idx] = false;

        let slot = &mut self.doors[idx];
        if found {
            slot.mark_opened(self.timing.reveal_pop);
            self.events.push(SequencerEvent::DoorOpened { door, path: slot.image_path.clone() });
        } else {
            log::warn!("example image missing: {}", slot.image_path);
            slot.mark_error();
            self.events.push(SequencerEvent::DoorFailed { door });
        }

        if self.doors.iter().all(|d| d.state.is_settled()) {
            self.finish();
        }
        true
    }

    fn finish(&mut self) {
        let opened = self.doors.iter().filter(|d| d.state == DoorState::Opened).count();
        let failed = self.doors.len() - opened;
        self.running = false;
        self.completed = true;
        self.started_at = None;
        log::info!("reveal for {} complete: {} opened, {} failed", self.glyph, opened, failed);
        self.events.push(SequencerEvent::Completed { opened, failed });
    }

    /// Offsets (seconds from start) of reveals still waiting to fire.
    pub fn scheduled_reveals(&self) -> Vec<f32> {
        let start = match self.started_at {
            Some(start) => start,
            None => return Vec::new(),
        };
        self.timers
            .pending()
            .into_iter()
            .filter(|(_, step)| matches!(step, Step::Reveal(_)))
            .map(|(at, _)| at - start)
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<SequencerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    /// State of door `door` (1-based).
    pub fn door_state(&self, door: usize) -> Option<DoorState> {
        door.checked_sub(1).and_then(|i| self.doors.get(i)).map(|d| d.state)
    }

    pub fn states(&self) -> Vec<DoorState> {
        self.doors.iter().map(|d| d.state).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequencer(glyph: char, doors: usize) -> DoorSequencer {
        let mut seq = DoorSequencer::new(&LessonConfig::default());
        seq.initialize(glyph, doors);
        seq.drain_events();
        seq
    }

    /// Tick in whole seconds and answer every asset request with `found(door)`.
    fn run_for(seq: &mut DoorSequencer, seconds: u32, found: impl Fn(usize) -> bool) -> Vec<SequencerEvent> {
        let mut all = Vec::new();
        for _ in 0..seconds {
            seq.tick(1.0);
            let events = seq.drain_events();
            for event in &events {
                if let SequencerEvent::ResolveAsset { generation, door, .. } = event {
                    seq.resolve(*generation, *door, found(*door));
                }
            }
            all.extend(events);
            all.extend(seq.drain_events());
        }
        all
    }

    #[test]
    fn schedules_one_reveal_per_door() {
        let mut seq = sequencer('ت', 4);
        seq.start().unwrap();
        assert_eq!(seq.scheduled_reveals(), vec![3.0, 6.0, 9.0, 12.0]);
        assert!(seq.is_running());
    }

    #[test]
    fn door_count_is_clamped() {
        let seq = sequencer('ت', 10);
        assert_eq!(seq.door_count(), 6);
    }

    #[test]
    fn second_start_is_rejected_without_side_effects() {
        let mut seq = sequencer('ت', 4);
        seq.start().unwrap();
        seq.tick(3.0);
        let before = seq.states();
        let generation = seq.generation();

        assert_eq!(seq.start(), Err(SequenceError::AlreadyRunning));
        assert_eq!(seq.states(), before);
        assert_eq!(seq.generation(), generation);
        assert_eq!(seq.scheduled_reveals(), vec![6.0, 9.0, 12.0]);
    }

    #[test]
    fn reveals_fire_on_fixed_cadence() {
        let mut seq = sequencer('ت', 2);
        seq.start().unwrap();
        seq.tick(2.9);
        assert_eq!(seq.door_state(1), Some(DoorState::Closed));
        seq.tick(0.1);
        assert_eq!(seq.door_state(1), Some(DoorState::Opening));
        assert_eq!(seq.door_state(2), Some(DoorState::Closed));
        seq.tick(3.0);
        // Door 1 never resolved, door 2 still opens on schedule.
        assert_eq!(seq.door_state(1), Some(DoorState::Opening));
        assert_eq!(seq.door_state(2), Some(DoorState::Opening));
    }

    #[test]
    fn countdown_precedes_first_door() {
        let mut seq = sequencer('ب', 1);
        seq.start().unwrap();
        let first = seq.drain_events();
        assert_eq!(first, vec![SequencerEvent::Countdown(3)]);

        let events = run_for(&mut seq, 3, |_| true);
        let countdown: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SequencerEvent::Countdown(_) | SequencerEvent::CountdownHidden))
            .cloned()
            .collect();
        assert_eq!(
            countdown,
            vec![SequencerEvent::Countdown(2), SequencerEvent::Countdown(1), SequencerEvent::CountdownHidden]
        );
        let hidden = events.iter().position(|e| *e == SequencerEvent::CountdownHidden).unwrap();
        let opening = events.iter().position(|e| *e == SequencerEvent::DoorOpening { door: 1 }).unwrap();
        assert!(hidden < opening);
    }

    #[test]
    fn single_door_letter_completes_after_first_reveal() {
        let mut seq = sequencer('ب', 1);
        seq.start().unwrap();
        seq.tick(3.0);
        seq.tick(1.0);
        let events = seq.drain_events();
        let (generation, path) = events
            .iter()
            .find_map(|e| match e {
                SequencerEvent::ResolveAsset { generation, door: 1, path } => Some((*generation, path.clone())),
                _ => None,
            })
            .expect("door 1 should request its image");
        assert_eq!(path, "صور/ب/icon01.png");

        assert!(seq.resolve(generation, 1, true));
        let events = seq.drain_events();
        assert!(events.contains(&SequencerEvent::DoorOpened { door: 1, path }));
        assert_eq!(events.last(), Some(&SequencerEvent::Completed { opened: 1, failed: 0 }));
        assert!(seq.is_complete());
        assert!(!seq.is_running());
    }

    #[test]
    fn zero_doors_complete_immediately() {
        let mut seq = sequencer('ه', 0);
        seq.start().unwrap();
        assert!(seq.scheduled_reveals().is_empty());
        assert!(seq.is_complete());
        assert_eq!(seq.drain_events(), vec![SequencerEvent::Completed { opened: 0, failed: 0 }]);
    }

    #[test]
    fn failed_door_does_not_block_the_others() {
        let mut seq = sequencer('ت', 4);
        seq.start().unwrap();
        let events = run_for(&mut seq, 13, |door| door != 3);

        assert_eq!(
            seq.states(),
            vec![DoorState::Opened, DoorState::Opened, DoorState::Error, DoorState::Opened]
        );
        let completions: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SequencerEvent::Completed { .. }))
            .collect();
        assert_eq!(completions, vec![&SequencerEvent::Completed { opened: 3, failed: 1 }]);
    }

    #[test]
    fn answers_out_of_order_are_accepted() {
        let mut seq = sequencer('ت', 2);
        seq.start().unwrap();
        seq.tick(7.0);
        let generation = seq.generation();
        assert!(seq.resolve(generation, 2, true));
        assert!(!seq.is_complete());
        assert!(seq.resolve(generation, 1, false));
        assert!(seq.is_complete());
    }

    #[test]
    fn unrequested_or_stale_answers_are_dropped() {
        let mut seq = sequencer('ت', 2);
        seq.start().unwrap();
        let old = seq.generation();
        assert!(!seq.resolve(old, 1, true), "door 1 has not asked yet");

        seq.tick(4.0);
        seq.cancel();
        assert!(!seq.resolve(old, 1, true));
        assert_eq!(seq.door_state(1), Some(DoorState::Opening));
    }

    #[test]
    fn cancel_stops_everything() {
        let mut seq = sequencer('ت', 4);
        seq.start().unwrap();
        seq.tick(1.0);
        seq.drain_events();
        seq.cancel();
        assert_eq!(seq.drain_events(), vec![SequencerEvent::CountdownHidden]);
        assert!(seq.scheduled_reveals().is_empty());

        seq.tick(20.0);
        assert!(seq.drain_events().is_empty());
        assert!(seq.states().iter().all(|s| *s == DoorState::Closed));

        // Safe with nothing active.
        seq.cancel();
        assert!(seq.drain_events().is_empty());
    }

    #[test]
    fn restart_resets_doors_before_running_again() {
        let mut seq = sequencer('د', 2);
        seq.start().unwrap();
        run_for(&mut seq, 7, |_| true);
        assert!(seq.is_complete());

        seq.restart().unwrap();
        assert!(seq.states().iter().all(|s| *s == DoorState::Closed));
        assert_eq!(seq.scheduled_reveals(), vec![3.0, 6.0]);
        let events = seq.drain_events();
        assert_eq!(events.first(), Some(&SequencerEvent::DoorsReset { count: 2 }));
    }

    #[test]
    fn restart_while_running_is_rejected() {
        let mut seq = sequencer('د', 2);
        seq.start().unwrap();
        seq.tick(4.0);
        assert_eq!(seq.restart(), Err(SequenceError::AlreadyRunning));
        assert_eq!(seq.door_state(1), Some(DoorState::Opening));
        assert_eq!(seq.scheduled_reveals(), vec![6.0]);
    }

    #[test]
    fn restart_after_cancel() {
        let mut seq = sequencer('د', 2);
        seq.start().unwrap();
        seq.tick(3.5);
        seq.cancel();
        seq.restart().unwrap();
        assert_eq!(seq.states(), vec![DoorState::Closed, DoorState::Closed]);
        assert!(seq.is_running());
    }

    #[test]
    fn large_frame_gap_replays_in_order() {
        let mut seq = sequencer('ت', 2);
        seq.start().unwrap();
        seq.drain_events();
        seq.tick(30.0);
        let opened: Vec<usize> = seq
            .drain_events()
            .iter()
            .filter_map(|e| match e {
                SequencerEvent::ResolveAsset { door, .. } => Some(*door),
                _ => None,
            })
            .collect();
        assert_eq!(opened, vec![1, 2]);
    }
}
