//! Error types of the core. Runtime conditions (bounce, a dead sensor, clock hiccups) are states, not errors; only an
//! inconsistent timing policy is reported as one.
use crate::buzzer::PatternKind;
use thiserror::Error;

/// Timing policy errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A buzzer pattern would never sound
    #[error("{0:?} pattern has no pulses")]
    NoPulses(PatternKind),

    /// A buzzer pattern would toggle on every poll
    #[error("{0:?} pattern has a zero pulse period")]
    ZeroPulsePeriod(PatternKind),

    /// The liveness check would spin without sleeping
    #[error("liveness poll interval is zero")]
    ZeroPollInterval,

    /// The liveness check would take a single sample
    #[error("liveness poll interval is not shorter than the verify window")]
    PollIntervalTooLong,

    /// A triggered alarm would re-arm while the intruder is still moving
    #[error("quiet window is zero")]
    ZeroQuietWindow,

    /// The alarm would disarm itself right after arming
    #[error("auto-disarm fires before the arming countdown ends")]
    AutoDisarmTooShort,
}
