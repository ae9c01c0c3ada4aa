//! # Timing policy
//! The alarm's timings are fixed policy, not user settings. They are collected in [`AlarmTimings`] so the firmware and
//! the tests hand the policy to the state machine explicitly.
use crate::buzzer::{Pattern, PatternKind};
use crate::error::ConfigError;
use embassy_time::Duration;

/// A button level must be stable for longer than this to count
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(50);

/// Countdown between the arm request and the alarm being armed
pub const ARM_DELAY: Duration = Duration::from_millis(5_000);

/// How long the liveness check waits for the sensor to show any activity
pub const VERIFY_WINDOW: Duration = Duration::from_millis(1_000);

/// Sensor sampling interval during the liveness check
pub const VERIFY_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// After the siren, the sensor must have been quiet this long before the alarm re-arms
pub const QUIET_WINDOW: Duration = Duration::from_millis(500);

/// An armed alarm disarms itself after this long without user action
pub const AUTO_DISARM: Duration = Duration::from_secs(5 * 60);

/// Siren: 10 toggles of 200 ms, five audible and five silent segments
pub const SIREN_PATTERN: Pattern = Pattern {
    kind: PatternKind::Siren,
    pulses: 10,
    period: Duration::from_millis(200),
    frequency_hz: 2_700,
};

/// Confirmation: one short chirp
pub const CONFIRM_PATTERN: Pattern = Pattern {
    kind: PatternKind::Confirm,
    pulses: 1,
    period: Duration::from_millis(120),
    frequency_hz: 4_000,
};

/// Fault: one second on, one second off, repeated while the fault lasts (0.5 Hz)
pub const FAULT_PATTERN: Pattern = Pattern {
    kind: PatternKind::Fault,
    pulses: 2,
    period: Duration::from_millis(1_000),
    frequency_hz: 800,
};

/// The complete timing policy of the alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmTimings {
    /// See [`DEBOUNCE_WINDOW`]
    pub debounce_window: Duration,
    /// See [`ARM_DELAY`]
    pub arm_delay: Duration,
    /// See [`VERIFY_WINDOW`]
    pub verify_window: Duration,
    /// See [`VERIFY_POLL_INTERVAL`]
    pub verify_poll_interval: Duration,
    /// See [`QUIET_WINDOW`]
    pub quiet_window: Duration,
    /// See [`AUTO_DISARM`]
    pub auto_disarm: Duration,
    /// See [`SIREN_PATTERN`]
    pub siren: Pattern,
    /// See [`CONFIRM_PATTERN`]
    pub confirm: Pattern,
    /// See [`FAULT_PATTERN`]
    pub fault: Pattern,
}

impl AlarmTimings {
    /// The built-in policy
    pub const DEFAULT: Self = Self {
        debounce_window: DEBOUNCE_WINDOW,
        arm_delay: ARM_DELAY,
        verify_window: VERIFY_WINDOW,
        verify_poll_interval: VERIFY_POLL_INTERVAL,
        quiet_window: QUIET_WINDOW,
        auto_disarm: AUTO_DISARM,
        siren: SIREN_PATTERN,
        confirm: CONFIRM_PATTERN,
        fault: FAULT_PATTERN,
    };

    /// Check that the policy is internally consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zero = Duration::from_ticks(0);
        for pattern in [self.siren, self.confirm, self.fault] {
            if pattern.pulses == 0 {
                return Err(ConfigError::NoPulses(pattern.kind));
            }
            if pattern.period == zero {
                return Err(ConfigError::ZeroPulsePeriod(pattern.kind));
            }
        }
        if self.verify_poll_interval == zero {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.verify_poll_interval >= self.verify_window {
            return Err(ConfigError::PollIntervalTooLong);
        }
        if self.quiet_window == zero {
            return Err(ConfigError::ZeroQuietWindow);
        }
        if self.auto_disarm <= self.arm_delay {
            return Err(ConfigError::AutoDisarmTooShort);
        }
        Ok(())
    }
}

impl Default for AlarmTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
