//! # Poll cycle
//! [`MotionAlarm`] ties the button, its debouncer, the clock and the [`AlarmStateMachine`] together. The firmware
//! calls [`MotionAlarm::poll`] in a tight loop; one call reads the clock once, debounces the button and runs the state
//! machine with that single instant.
use crate::config::AlarmTimings;
use crate::debouncer::Debouncer;
use crate::io::{ButtonInput, MotionInput, StatusSink, ToneOutput};
use crate::liveness::LivenessProbe;
use crate::machine::AlarmStateMachine;
use crate::state::AlarmState;
use crate::time::Clock;

/// The complete alarm, minus the hardware
pub struct MotionAlarm<B, C, M, P, T, S> {
    /// The arm/disarm button, `true` while pressed
    button: B,
    /// Time source for the poll cycle
    clock: C,
    /// Turns the button level into presses
    debouncer: Debouncer,
    /// The decision logic
    machine: AlarmStateMachine<M, P, T, S>,
}

impl<B, C, M, P, T, S> MotionAlarm<B, C, M, P, T, S>
where
    B: ButtonInput,
    C: Clock,
    M: MotionInput,
    P: LivenessProbe,
    T: ToneOutput,
    S: StatusSink,
{
    /// Create a new `MotionAlarm`, disarmed as of the current clock reading
    pub fn new(timings: AlarmTimings, button: B, clock: C, motion: M, probe: P, tone: T, sink: S) -> Self {
        let now = clock.now();
        Self {
            button,
            clock,
            debouncer: Debouncer::new(timings.debounce_window),
            machine: AlarmStateMachine::new(timings, now, motion, probe, tone, sink),
        }
    }

    /// Publish the initial status. Call once before polling.
    pub fn start(&mut self) {
        info!("alarm: started, disarmed");
        self.machine.announce();
    }

    /// Run one poll cycle and return the state the alarm is in afterwards
    pub fn poll(&mut self) -> AlarmState {
        let now = self.clock.now();
        let press = self.debouncer.update(self.button.read(), now);
        if let Some(press) = press {
            debug!("button: press at {} ms", press.at.as_millis());
        }
        self.machine.update(now, press);
        self.machine.state()
    }

    /// The state machine
    pub const fn machine(&self) -> &AlarmStateMachine<M, P, T, S> {
        &self.machine
    }

    /// The button debouncer
    pub const fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }
}
