//! # Debouncer
//! Filters the noisy button level into discrete press events. A level only counts once it has been stable for longer
//! than the debounce window; bouncing inside the window is absorbed completely.
use crate::time::elapsed_since;
use embassy_time::{Duration, Instant};

/// The button went down and stayed down for the whole debounce window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent {
    /// When the press was confirmed
    pub at: Instant,
}

/// Time based debouncer for one button
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// How long a level must hold before it is accepted
    window: Duration,
    /// The raw level meaning "pressed"
    pressed_level: bool,
    /// The raw level seen on the previous update
    raw_last: bool,
    /// The last accepted level
    stable_last: bool,
    /// When the raw level last changed
    last_change_at: Instant,
}

impl Debouncer {
    /// Create a new `Debouncer` for a button that reads `true` while pressed
    pub const fn new(window: Duration) -> Self {
        Self::with_pressed_level(window, true)
    }

    /// Create a new `Debouncer` for a button whose pressed level is `pressed_level`
    pub const fn with_pressed_level(window: Duration, pressed_level: bool) -> Self {
        Self {
            window,
            pressed_level,
            raw_last: !pressed_level,
            stable_last: !pressed_level,
            last_change_at: Instant::MIN,
        }
    }

    /// Feed the current raw level. Returns a [`PressEvent`] exactly once per accepted press.
    pub fn update(&mut self, raw_level: bool, now: Instant) -> Option<PressEvent> {
        if raw_level != self.raw_last {
            self.last_change_at = now;
            self.raw_last = raw_level;
        }

        if elapsed_since(now, self.last_change_at) > self.window && raw_level != self.stable_last {
            self.stable_last = raw_level;
            if raw_level == self.pressed_level {
                trace!("button pressed");
                return Some(PressEvent { at: now });
            }
            trace!("button released");
        }
        None
    }

    /// Whether the accepted level is "pressed"
    pub const fn is_pressed(&self) -> bool {
        self.stable_last == self.pressed_level
    }
}
