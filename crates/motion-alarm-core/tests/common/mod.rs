//! Bench for the scenario tests: a simulated clock, a button and a PIR sensor the test drives, and a buzzer and a
//! display that remember what they were told.
#![allow(dead_code)]

use core::cell::Cell;
use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use motion_alarm_core::{
    AlarmState, AlarmTimings, ButtonInput, Clock, MotionAlarm, MotionInput, SensorLivenessCheck, StatusSink,
    StatusUpdate, ToneOutput,
};

/// Clock that only moves when told to
pub struct FakeClock {
    /// The current instant
    now: Cell<Instant>,
}

impl FakeClock {
    /// Create a new `FakeClock` at zero
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::from_millis(0)),
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

/// Delay that advances the [`FakeClock`] instead of waiting
pub struct FakeDelay<'a> {
    /// The clock to advance
    clock: &'a FakeClock,
}

impl DelayNs for FakeDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance(Duration::from_millis(u64::from(ms)));
    }
}

/// The arm/disarm button
#[derive(Default)]
pub struct Button {
    /// `true` while held down
    down: Cell<bool>,
}

impl Button {
    /// Hold or release the button
    pub fn hold(&self, down: bool) {
        self.down.set(down);
    }
}

/// The wire from a bench part to the alarm
pub struct Wire<'a, T>(pub &'a T);

impl ButtonInput for Wire<'_, Button> {
    fn read(&mut self) -> bool {
        self.0.down.get()
    }
}

/// PIR sensor with a steady level plus an optional single blip, the way a live sensor twitches when polled
pub struct Pir<'a> {
    /// Clock used to place the blip
    clock: &'a FakeClock,
    /// Steady output level
    level: Cell<bool>,
    /// Read active once, this long after the first read following [`Pir::blip_after`]
    blip_after: Cell<Option<Duration>>,
    /// First read since the blip was scheduled
    blip_origin: Cell<Option<Instant>>,
    /// Number of reads
    reads: Cell<usize>,
}

impl<'a> Pir<'a> {
    /// Create a new, silent and unresponsive `Pir`
    pub fn new(clock: &'a FakeClock) -> Self {
        Self {
            clock,
            level: Cell::new(false),
            blip_after: Cell::new(None),
            blip_origin: Cell::new(None),
            reads: Cell::new(0),
        }
    }

    /// Set the steady output level, `true` meaning motion
    pub fn set_motion(&self, motion: bool) {
        self.level.set(motion);
    }

    /// Schedule a single active reading `after` the next read
    pub fn blip_after(&self, after: Duration) {
        self.blip_after.set(Some(after));
        self.blip_origin.set(None);
    }

    /// Number of reads so far
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl MotionInput for Wire<'_, Pir<'_>> {
    fn read(&mut self) -> bool {
        self.0.read()
    }
}

impl Pir<'_> {
    /// One sensor reading
    fn read(&self) -> bool {
        self.reads.set(self.reads.get() + 1);
        if self.level.get() {
            return true;
        }
        let Some(after) = self.blip_after.get() else {
            return false;
        };
        let now = self.clock.now();
        let origin = self.blip_origin.get().unwrap_or(now);
        self.blip_origin.set(Some(origin));
        if now - origin >= after {
            self.blip_after.set(None);
            self.blip_origin.set(None);
            return true;
        }
        false
    }
}

/// Buzzer that remembers its level and every tone it was asked to play
#[derive(Default)]
pub struct Buzzer {
    /// Current level
    pub on: bool,
    /// Frequency of every `set_tone` call, in order
    pub tones: Vec<u32>,
}

impl Buzzer {
    /// Number of tones played at `frequency_hz`
    pub fn count(&self, frequency_hz: u32) -> usize {
        self.tones.iter().filter(|tone| **tone == frequency_hz).count()
    }
}

impl ToneOutput for Buzzer {
    fn set(&mut self, active: bool) {
        self.on = active;
    }

    fn set_tone(&mut self, frequency_hz: u32, _duration: Duration) {
        self.tones.push(frequency_hz);
        self.on = true;
    }
}

/// Display that keeps every update
#[derive(Default)]
pub struct Display {
    /// Every update, in order
    pub updates: Vec<StatusUpdate>,
}

impl Display {
    /// The update currently shown
    pub fn shown(&self) -> Option<StatusUpdate> {
        self.updates.last().copied()
    }
}

impl StatusSink for Display {
    fn publish(&mut self, update: StatusUpdate) {
        self.updates.push(update);
    }
}

/// The alarm as wired on the bench
pub type BenchAlarm<'a> =
    MotionAlarm<Wire<'a, Button>, &'a FakeClock, Wire<'a, Pir<'a>>, SensorLivenessCheck<&'a FakeClock, FakeDelay<'a>>, Buzzer, Display>;

/// Wire up a started alarm with the default timings
pub fn build<'a>(clock: &'a FakeClock, button: &'a Button, pir: &'a Pir<'a>) -> BenchAlarm<'a> {
    let timings = AlarmTimings::DEFAULT;
    let probe = SensorLivenessCheck::new(clock, FakeDelay { clock }, &timings);
    let mut alarm = MotionAlarm::new(timings, Wire(button), clock, Wire(pir), probe, Buzzer::default(), Display::default());
    alarm.start();
    alarm
}

/// Advance one millisecond and poll once
pub fn tick(alarm: &mut BenchAlarm<'_>, clock: &FakeClock) -> AlarmState {
    clock.advance(Duration::from_millis(1));
    alarm.poll()
}

/// Poll once per millisecond until the clock reads `ms`
pub fn run_until(alarm: &mut BenchAlarm<'_>, clock: &FakeClock, ms: u64) {
    while clock.now() < Instant::from_millis(ms) {
        tick(alarm, clock);
    }
}

/// Push the button until the press is accepted, then let go until the release is accepted
pub fn press(alarm: &mut BenchAlarm<'_>, clock: &FakeClock, button: &Button) {
    button.hold(true);
    for _ in 0..100 {
        if alarm.debouncer().is_pressed() {
            break;
        }
        tick(alarm, clock);
    }
    button.hold(false);
    for _ in 0..100 {
        if !alarm.debouncer().is_pressed() {
            break;
        }
        tick(alarm, clock);
    }
}

/// Press with a responsive sensor and wait out the countdown, returns when the alarm was armed
pub fn arm(alarm: &mut BenchAlarm<'_>, clock: &FakeClock, button: &Button, pir: &Pir<'_>) -> Instant {
    pir.blip_after(Duration::from_millis(100));
    press(alarm, clock, button);
    assert_eq!(alarm.machine().state(), AlarmState::Arming);
    let countdown_started = alarm.machine().context().state_entered_at();
    run_until(alarm, clock, (countdown_started + Duration::from_secs(5)).as_millis());
    assert_eq!(alarm.machine().state(), AlarmState::Armed);
    alarm.machine().context().state_entered_at()
}

