// crates/lightbox-core/src/interaction.rs
//
// Keystroke-driven interaction state: the progressive scroll-speed
// accumulator and the slideshow schedule. Both are deadline/timestamp based
// and are polled from the foreground update loop — there is no background
// timer mutating navigation state, only a due-date the loop checks.

use std::time::{Duration, Instant};

/// Scroll speed applied on the first event after a pause.
pub const SCROLL_FLOOR: f32 = 20.0;
/// Added per event while the key repeats.
pub const SCROLL_INCREMENT: f32 = 2.0;
/// Upper bound for the accumulator.
pub const SCROLL_CEILING: f32 = 400.0;
/// Inter-event gap after which the accumulator resets to the floor.
pub const SCROLL_RESET_GAP: Duration = Duration::from_millis(250);

/// Slideshow interval bounds (seconds) for the grow/shrink adjustments.
const SLIDESHOW_MIN: Duration = Duration::from_secs(1);
const SLIDESHOW_MAX: Duration = Duration::from_secs(120);

/// Progressive scroll speed: held/repeated keys accelerate panning, a pause
/// decays back to the floor.
#[derive(Debug, Default, Clone)]
pub struct ScrollSpeed {
    speed: f32,
    last_event: Option<Instant>,
}

impl ScrollSpeed {
    /// Record a scroll event at `now` and return the speed (in pixels) to
    /// apply to it.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let continuing = self
            .last_event
            .is_some_and(|last| now.duration_since(last) <= SCROLL_RESET_GAP);
        self.speed = if continuing {
            (self.speed + SCROLL_INCREMENT).min(SCROLL_CEILING)
        } else {
            SCROLL_FLOOR
        };
        self.last_event = Some(now);
        self.speed
    }
}

/// Slideshow schedule. At most one is ever active: `toggle` either starts
/// the schedule or cancels it, and cancellation is deterministic — once
/// `toggle` returns, `due` can never report another tick.
#[derive(Debug, Clone)]
pub struct Slideshow {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Slideshow {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_due: None }
    }

    pub fn active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start or stop the slideshow. Returns the new active state. The first
    /// automatic advance is scheduled one full interval after the toggle.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            self.next_due = None;
            false
        } else {
            self.next_due = Some(now + self.interval);
            true
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Poll the schedule: reports true when a tick is due and reschedules the
    /// next one. Inactive slideshows are never due.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time remaining until the next tick, for repaint scheduling.
    pub fn until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Shrink the interval (×0.75, floor 1 s) and reschedule from `now`.
    pub fn shrink_interval(&mut self, now: Instant) -> Duration {
        self.set_interval(self.interval.mul_f64(0.75), now)
    }

    /// Grow the interval (×1.65, ceiling 120 s) and reschedule from `now`.
    pub fn grow_interval(&mut self, now: Instant) -> Duration {
        self.set_interval(self.interval.mul_f64(1.65), now)
    }

    fn set_interval(&mut self, interval: Duration, now: Instant) -> Duration {
        self.interval = interval.clamp(SLIDESHOW_MIN, SLIDESHOW_MAX);
        if self.next_due.is_some() {
            self.next_due = Some(now + self.interval);
        }
        self.interval
    }
}
