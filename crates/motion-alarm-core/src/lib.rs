//! # Motion alarm core
//! The decision core of a standalone PIR motion alarm. Everything in here is independent of the board: the firmware
//! hands in a clock, the button and sensor levels, a tone output and a status sink, and polls [`MotionAlarm::poll`]
//! in a tight loop.
//!
//! The pieces, leaves first:
//! - [`Debouncer`] turns the raw button level into discrete [`PressEvent`]s.
//! - [`SensorLivenessCheck`] probes the PIR sensor when arming is requested.
//! - [`BuzzerPattern`] sequences the siren, the confirmation chirp and the fault tone without ever blocking.
//! - [`AlarmStateMachine`] owns the [`AlarmContext`] and makes all transitions.
//! - [`MotionAlarm`] wires button, debouncer, clock and state machine into one poll cycle.
#![cfg_attr(not(test), no_std)]

// must come first, the logging macros are used by every other module
mod fmt;

pub mod buzzer;
pub mod config;
pub mod debouncer;
pub mod error;
pub mod io;
pub mod liveness;
pub mod machine;
pub mod state;
pub mod system;
pub mod time;

#[cfg(test)]
mod testing;

pub use buzzer::{BuzzerPattern, Pattern, PatternKind};
pub use config::AlarmTimings;
pub use debouncer::{Debouncer, PressEvent};
pub use error::ConfigError;
pub use io::{ButtonInput, MotionInput, PinTone, StatusSink, ToneOutput};
pub use liveness::{Liveness, LivenessProbe, SensorLivenessCheck};
pub use machine::AlarmStateMachine;
pub use state::{AlarmContext, AlarmState, StatusUpdate};
pub use system::MotionAlarm;
pub use time::{Clock, elapsed_since};
