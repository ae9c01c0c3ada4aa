//! # State of the alarm
//! This module describes the states of the alarm and the context the state machine keeps across poll cycles.
use embassy_time::Instant;

/// The state of the alarm, exactly one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmState {
    /// Idle. The buzzer is held off; a press starts the liveness check and, if it passes, the countdown.
    Disarmed,
    /// Counting down to [`AlarmState::Armed`]; the remaining whole seconds are reported to the display.
    Arming,
    /// Watching the motion sensor. Disarms itself after the auto-disarm period.
    Armed,
    /// Motion was seen. The siren plays once; the alarm re-arms after the siren and a quiet period.
    Triggered,
    /// The motion sensor did not pass the liveness check. Only a press, re-running the check, gets out of here.
    ArmFault,
}

impl AlarmState {
    /// Whether the alarm watches the motion sensor in this state
    pub const fn is_watching(self) -> bool {
        matches!(self, Self::Armed | Self::Triggered)
    }
}

/// Everything the state machine remembers between poll cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmContext {
    /// The current state
    pub(crate) state: AlarmState,
    /// When the current state was entered. Never moves backwards.
    pub(crate) state_entered_at: Instant,
    /// Number of times the alarm was triggered since boot. Never decreases.
    pub(crate) trigger_count: u32,
    /// Last time the sensor read active while armed or triggered
    pub(crate) last_motion_at: Instant,
}

impl AlarmContext {
    /// Create a new `AlarmContext`, disarmed at `now`
    pub const fn new(now: Instant) -> Self {
        Self {
            state: AlarmState::Disarmed,
            state_entered_at: now,
            trigger_count: 0,
            last_motion_at: now,
        }
    }

    /// The current state
    pub const fn state(&self) -> AlarmState {
        self.state
    }

    /// When the current state was entered
    pub const fn state_entered_at(&self) -> Instant {
        self.state_entered_at
    }

    /// Number of times the alarm was triggered since boot
    pub const fn trigger_count(&self) -> u32 {
        self.trigger_count
    }

    /// Last time the sensor read active while armed or triggered
    pub const fn last_motion_at(&self) -> Instant {
        self.last_motion_at
    }
}

/// What the display gets told: the state plus the values that go with it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusUpdate {
    /// The state the alarm is in
    pub state: AlarmState,
    /// Whole seconds left on the arming countdown, only while arming
    pub countdown_seconds: Option<u32>,
    /// Triggers since boot, while armed or triggered
    pub trigger_count: Option<u32>,
}

impl StatusUpdate {
    /// Build the update for `context`, with the countdown if one is running
    pub fn from_context(context: &AlarmContext, countdown_seconds: Option<u32>) -> Self {
        Self {
            state: context.state,
            countdown_seconds: if context.state == AlarmState::Arming {
                countdown_seconds
            } else {
                None
            },
            trigger_count: context
                .state
                .is_watching()
                .then_some(context.trigger_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disarmed_with_no_triggers() {
        let context = AlarmContext::new(Instant::from_millis(7));
        assert_eq!(context.state(), AlarmState::Disarmed);
        assert_eq!(context.trigger_count(), 0);
        assert_eq!(context.state_entered_at(), Instant::from_millis(7));
    }

    #[test]
    fn update_carries_only_the_values_of_its_state() {
        let mut context = AlarmContext::new(Instant::from_millis(0));
        context.trigger_count = 3;

        let disarmed = StatusUpdate::from_context(&context, Some(4));
        assert_eq!(disarmed.countdown_seconds, None);
        assert_eq!(disarmed.trigger_count, None);

        context.state = AlarmState::Arming;
        let arming = StatusUpdate::from_context(&context, Some(4));
        assert_eq!(arming.countdown_seconds, Some(4));
        assert_eq!(arming.trigger_count, None);

        context.state = AlarmState::Triggered;
        let triggered = StatusUpdate::from_context(&context, None);
        assert_eq!(triggered.trigger_count, Some(3));
    }
}
