//! Fakes for the unit tests: a settable clock, a delay that advances it, and recording collaborators.
use crate::io::{MotionInput, StatusSink, ToneOutput};
use crate::liveness::{Liveness, LivenessProbe};
use crate::state::StatusUpdate;
use crate::time::Clock;
use core::cell::Cell;
use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;

/// Clock that only moves when told to
pub struct FakeClock {
    /// The current instant
    now: Cell<Instant>,
}

impl FakeClock {
    /// Create a new `FakeClock` at the given millisecond
    pub fn at(ms: u64) -> Self {
        Self {
            now: Cell::new(Instant::from_millis(ms)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Delay that advances a [`FakeClock`] instead of waiting
pub struct FakeDelay<'a> {
    /// The clock to advance
    pub clock: &'a FakeClock,
    /// Number of delay calls
    pub calls: usize,
}

impl<'a> FakeDelay<'a> {
    /// Create a new `FakeDelay`
    pub const fn new(clock: &'a FakeClock) -> Self {
        Self { clock, calls: 0 }
    }
}

impl DelayNs for FakeDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.clock.advance(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.clock.advance(Duration::from_millis(u64::from(ms)));
    }
}

/// Tone output that records every level change
#[derive(Default)]
pub struct RecordingTone {
    /// Current level
    pub on: bool,
    /// Every level change, in order
    pub edges: Vec<bool>,
    /// Number of writes, including writes that did not change the level
    pub writes: usize,
}

impl ToneOutput for RecordingTone {
    fn set(&mut self, active: bool) {
        self.writes += 1;
        if active != self.on {
            self.edges.push(active);
        }
        self.on = active;
    }
}

/// Status sink that keeps everything it was given
#[derive(Default)]
pub struct RecordingSink {
    /// Every published update, in order
    pub updates: Vec<StatusUpdate>,
}

impl StatusSink for RecordingSink {
    fn publish(&mut self, update: StatusUpdate) {
        self.updates.push(update);
    }
}

/// Liveness probe answering from a script, then `true` once the script is used up
pub struct ScriptedProbe<'a> {
    /// Answers still to give
    pub answers: Vec<bool>,
    /// Number of probes made
    pub calls: usize,
    /// How long every probe takes
    takes: Duration,
    /// Clock moved forward by `takes` on every probe
    clock: Option<&'a FakeClock>,
}

impl<'a> ScriptedProbe<'a> {
    /// Create a new, instant `ScriptedProbe` giving `answers` in order
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.to_vec(),
            calls: 0,
            takes: Duration::from_ticks(0),
            clock: None,
        }
    }

    /// Let every probe take `takes`
    pub fn taking(mut self, takes: Duration) -> Self {
        self.takes = takes;
        self
    }

    /// Advance `clock` while probing
    pub fn on_clock(mut self, clock: &'a FakeClock) -> Self {
        self.clock = Some(clock);
        self
    }
}

impl Default for ScriptedProbe<'_> {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl LivenessProbe for ScriptedProbe<'_> {
    fn probe<M: MotionInput>(&mut self, _motion: &mut M, started_at: Instant) -> Liveness {
        self.calls += 1;
        let live = if self.answers.is_empty() {
            true
        } else {
            self.answers.remove(0)
        };
        if let Some(clock) = self.clock {
            clock.advance(self.takes);
        }
        Liveness {
            live,
            finished_at: started_at + self.takes,
        }
    }
}
