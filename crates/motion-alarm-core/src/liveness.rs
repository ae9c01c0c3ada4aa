//! # Sensor liveness check
//! Before arming, the PIR sensor is polled for a short, bounded window. A correctly wired sensor on a pulled-down
//! input shows at least one transient "active" reading in that time; a sensor that never does is treated as a wiring
//! fault rather than as "no motion".
//!
//! This is the only place in the core that waits. It runs synchronously on an arm request, never during normal
//! polling, and the wait goes through an injected [`DelayNs`] so tests simulate it without wall-clock time.
use crate::config::AlarmTimings;
use crate::io::MotionInput;
use crate::time::{Clock, elapsed_since};
use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;

/// Outcome of a liveness probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Liveness {
    /// Whether the sensor proved responsive
    pub live: bool,
    /// When the probe returned. Anything that follows the probe happens at this instant, not at its start.
    pub finished_at: Instant,
}

/// Decides at arm time whether the motion sensor can be trusted
pub trait LivenessProbe {
    /// Probe `motion`, starting at `started_at`
    fn probe<M: MotionInput>(&mut self, motion: &mut M, started_at: Instant) -> Liveness;
}

/// Bounded active poll of the motion sensor
pub struct SensorLivenessCheck<C, D> {
    /// Time source for the window
    clock: C,
    /// Sleep between samples
    delay: D,
    /// Give up after this long
    window: Duration,
    /// Time between samples
    poll_interval: Duration,
}

impl<C: Clock, D: DelayNs> SensorLivenessCheck<C, D> {
    /// Create a new `SensorLivenessCheck` using the verify window and poll interval of `timings`
    pub const fn new(clock: C, delay: D, timings: &AlarmTimings) -> Self {
        Self {
            clock,
            delay,
            window: timings.verify_window,
            poll_interval: timings.verify_poll_interval,
        }
    }

    /// Poll `motion` from `now0` until it reads active (`true`) or the window has elapsed (`false`).
    ///
    /// Besides the clock, the loop is bounded by the number of samples that fit into the window, so a stalled clock
    /// cannot keep it spinning.
    pub fn check<M: MotionInput>(&mut self, motion: &mut M, now0: Instant) -> bool {
        let interval_ms = self.poll_interval.as_millis().max(1);
        let max_samples = self.window.as_millis() / interval_ms + 1;
        let sleep_ms = u32::try_from(interval_ms).unwrap_or(u32::MAX);

        for sample in 0..=max_samples {
            if motion.read() {
                info!("liveness: sensor active after {} samples", sample + 1);
                return true;
            }
            if elapsed_since(self.clock.now(), now0) >= self.window {
                break;
            }
            self.delay.delay_ms(sleep_ms);
        }

        warn!(
            "liveness: no sensor activity within {} ms",
            self.window.as_millis()
        );
        false
    }

    /// Release the clock and the delay
    pub fn into_parts(self) -> (C, D) {
        (self.clock, self.delay)
    }
}

impl<C: Clock, D: DelayNs> LivenessProbe for SensorLivenessCheck<C, D> {
    fn probe<M: MotionInput>(&mut self, motion: &mut M, started_at: Instant) -> Liveness {
        let live = self.check(motion, started_at);
        Liveness {
            live,
            finished_at: self.clock.now(),
        }
    }
}
