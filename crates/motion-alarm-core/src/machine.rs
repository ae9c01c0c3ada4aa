//! # Alarm state machine
//! Owns the [`AlarmContext`] and the buzzer, and makes every state transition in [`AlarmStateMachine::update`]:
//!
//! ```text
//!              press, sensor live                 arm delay elapsed
//!  Disarmed ───────────────────────► Arming ─────────────────────────► Armed
//!   │  ▲  ▲                                                         │ ▲  │
//!   │  │  └──────────── press / auto-disarm ────────────────────────┘ │  │ motion
//!   │  │                                                              │  ▼
//!   │  └──────────────────────── press ─────────────────────────── Triggered
//!   │                                              siren done and quiet ┘
//!   │ press, sensor dead
//!   ▼
//!  ArmFault ── press, sensor live ──► Arming
//! ```
//!
//! One call is one poll cycle and returns promptly; the only wait is the liveness probe on an arm request.
use crate::buzzer::{BuzzerPattern, PatternKind};
use crate::config::AlarmTimings;
use crate::debouncer::PressEvent;
use crate::io::{MotionInput, StatusSink, ToneOutput};
use crate::liveness::LivenessProbe;
use crate::state::{AlarmContext, AlarmState, StatusUpdate};
use crate::time::elapsed_since;
use embassy_time::{Duration, Instant};

/// The alarm's decision logic together with the collaborators it drives
pub struct AlarmStateMachine<M, P, T, S> {
    /// State, timers and trigger counter
    context: AlarmContext,
    /// The single active buzzer sequence
    buzzer: BuzzerPattern,
    /// Timing policy
    timings: AlarmTimings,
    /// Last countdown value handed to the sink
    countdown: Option<u32>,
    /// The PIR sensor
    motion: M,
    /// Arm-time sensor check
    probe: P,
    /// The buzzer output
    tone: T,
    /// Where status updates go
    sink: S,
}

impl<M, P, T, S> AlarmStateMachine<M, P, T, S>
where
    M: MotionInput,
    P: LivenessProbe,
    T: ToneOutput,
    S: StatusSink,
{
    /// Create a new `AlarmStateMachine`, disarmed at `now`
    pub const fn new(timings: AlarmTimings, now: Instant, motion: M, probe: P, tone: T, sink: S) -> Self {
        Self {
            context: AlarmContext::new(now),
            buzzer: BuzzerPattern::new(),
            timings,
            countdown: None,
            motion,
            probe,
            tone,
            sink,
        }
    }

    /// Hand the current status to the sink, e.g. once at boot
    pub fn announce(&mut self) {
        self.sink
            .publish(StatusUpdate::from_context(&self.context, self.countdown));
    }

    /// Run one poll cycle. `press` is the debounced button event of this cycle, if any.
    pub fn update(&mut self, now: Instant, press: Option<PressEvent>) {
        match self.context.state {
            AlarmState::Disarmed => {
                if press.is_some() {
                    self.request_arm(now);
                }
            }
            AlarmState::ArmFault => {
                if press.is_some() {
                    self.request_arm(now);
                } else if !self.buzzer.is_active() {
                    self.buzzer.start(self.timings.fault, now, &mut self.tone);
                }
            }
            AlarmState::Arming => {
                if press.is_some() {
                    debug!("alarm: press ignored while arming");
                }
                self.update_arming(now);
            }
            AlarmState::Armed => {
                if press.is_some() {
                    self.manual_disarm(now);
                } else {
                    self.update_armed(now);
                }
            }
            AlarmState::Triggered => {
                if press.is_some() {
                    self.manual_disarm(now);
                } else {
                    self.update_triggered(now);
                }
            }
        }

        self.buzzer.tick(now, &mut self.tone);

        // whatever path led here, a disarmed alarm is silent, save for the confirmation chirp
        if self.context.state == AlarmState::Disarmed
            && self.buzzer.active_kind() != Some(PatternKind::Confirm)
        {
            self.buzzer.stop(&mut self.tone);
        }
    }

    /// Probe the sensor and start the countdown, or fall into the fault state.
    ///
    /// The probe blocks, so the transition and the tone are stamped with the instant it returned.
    fn request_arm(&mut self, now: Instant) {
        info!("alarm: arm requested, checking the motion sensor");
        let liveness = self.probe.probe(&mut self.motion, now);
        let at = liveness.finished_at.max(now);
        if liveness.live {
            self.transition(AlarmState::Arming, at);
            self.buzzer.start(self.timings.confirm, at, &mut self.tone);
        } else {
            warn!("alarm: motion sensor failed the liveness check");
            self.transition(AlarmState::ArmFault, at);
            self.buzzer.start(self.timings.fault, at, &mut self.tone);
        }
    }

    /// Count down, refreshing the display on every new whole second
    fn update_arming(&mut self, now: Instant) {
        if self.elapsed_in_state(now) >= self.timings.arm_delay {
            info!("alarm: armed, countdown finished");
            self.transition(AlarmState::Armed, now);
            return;
        }
        let countdown = self.countdown_seconds(now);
        if countdown != self.countdown {
            self.countdown = countdown;
            self.announce();
        }
    }

    /// Auto-disarm has priority over the motion check
    fn update_armed(&mut self, now: Instant) {
        if self.elapsed_in_state(now) >= self.timings.auto_disarm {
            info!(
                "alarm: disarmed automatically after {} s",
                self.timings.auto_disarm.as_secs()
            );
            self.transition(AlarmState::Disarmed, now);
            return;
        }

        if self.motion.read() {
            self.context.last_motion_at = now;
            self.context.trigger_count = self.context.trigger_count.saturating_add(1);
            info!(
                "alarm: motion detected, triggered ({} so far)",
                self.context.trigger_count
            );
            self.transition(AlarmState::Triggered, now);
            self.buzzer.start(self.timings.siren, now, &mut self.tone);
        }
    }

    /// The siren plays once per trigger; back to armed once it is done and the sensor has been quiet long enough
    fn update_triggered(&mut self, now: Instant) {
        let motion = self.motion.read();
        if motion {
            self.context.last_motion_at = now;
        }

        let quiet_for = elapsed_since(now, self.context.last_motion_at);
        if !self.buzzer.is_active() && !motion && quiet_for >= self.timings.quiet_window {
            info!("alarm: motion ceased, re-armed");
            self.buzzer.stop(&mut self.tone);
            self.transition(AlarmState::Armed, now);
        }
    }

    /// Press while armed or triggered: silence, disarm, chirp
    fn manual_disarm(&mut self, now: Instant) {
        info!("alarm: disarmed manually");
        self.buzzer.stop(&mut self.tone);
        self.transition(AlarmState::Disarmed, now);
        self.buzzer.start(self.timings.confirm, now, &mut self.tone);
    }

    /// The one place the state changes
    fn transition(&mut self, to: AlarmState, now: Instant) {
        debug!("alarm: {} -> {}", self.context.state, to);
        self.context.state = to;
        self.context.state_entered_at = now.max(self.context.state_entered_at);
        self.countdown = self.countdown_seconds(now);
        self.announce();
    }

    /// Time spent in the current state
    fn elapsed_in_state(&self, now: Instant) -> Duration {
        elapsed_since(now, self.context.state_entered_at)
    }

    /// Whole seconds left on the arming countdown, rounded up; `None` unless arming
    pub fn countdown_seconds(&self, now: Instant) -> Option<u32> {
        if self.context.state != AlarmState::Arming {
            return None;
        }
        let elapsed = self.elapsed_in_state(now);
        let remaining_ms = self
            .timings
            .arm_delay
            .as_millis()
            .saturating_sub(elapsed.as_millis());
        Some(u32::try_from(remaining_ms.div_ceil(1_000)).unwrap_or(u32::MAX))
    }

    /// The current state
    pub const fn state(&self) -> AlarmState {
        self.context.state
    }

    /// State, timers and trigger counter
    pub const fn context(&self) -> &AlarmContext {
        &self.context
    }

    /// Number of times the alarm was triggered since boot
    pub const fn trigger_count(&self) -> u32 {
        self.context.trigger_count
    }

    /// The buzzer sequencer
    pub const fn buzzer(&self) -> &BuzzerPattern {
        &self.buzzer
    }

    /// The tone output
    pub const fn tone(&self) -> &T {
        &self.tone
    }

    /// The tone output, mutably
    pub const fn tone_mut(&mut self) -> &mut T {
        &mut self.tone
    }

    /// The status sink
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The liveness probe
    pub const fn probe(&self) -> &P {
        &self.probe
    }
}
