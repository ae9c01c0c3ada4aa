//! # Time
//! The core never reads the hardware timer on its own. It asks an injected [`Clock`] and does all its timing as
//! elapsed-time comparisons between `embassy_time::Instant`s.
use embassy_time::{Duration, Instant};

/// Source of monotonic time in milliseconds since boot.
pub trait Clock {
    /// The current instant
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Time elapsed from `since` to `now`, clamped to zero if the clock ever went backwards.
pub fn elapsed_since(now: Instant, since: Instant) -> Duration {
    now.checked_duration_since(since)
        .unwrap_or(Duration::from_ticks(0))
}
