//! # Buzzer patterns
//! A non-blocking pulse sequencer. A pattern is a fixed number of timed toggles of the tone output: the output goes on
//! as soon as the pattern starts, flips every `period`, and is forced off once `pulses` toggles have happened.
//!
//! The same sequencer produces the siren while triggered, the confirmation chirp on arm and disarm, and the slow
//! fault tone. Only one sequence runs at a time; starting a new one discards the old one.
use crate::io::ToneOutput;
use crate::time::elapsed_since;
use embassy_time::{Duration, Instant};

/// What a pattern is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternKind {
    /// Alternating siren while the alarm is triggered
    Siren,
    /// Short chirp acknowledging an arm request or a manual disarm
    Confirm,
    /// Slow on/off tone while the sensor liveness check has failed
    Fault,
}

/// The shape of a pulse pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern {
    /// What the pattern is used for
    pub kind: PatternKind,
    /// Number of toggles until the pattern ends
    pub pulses: u32,
    /// Time between two toggles
    pub period: Duration,
    /// Frequency handed to [`ToneOutput::set_tone`] for the audible phases
    pub frequency_hz: u32,
}

/// The running sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BuzzerSequence {
    /// The pattern being played
    pattern: Pattern,
    /// Toggles done so far
    pulse_index: u32,
    /// When the output last changed
    last_toggle_at: Instant,
    /// Whether the output is currently sounding
    output_on: bool,
    /// Cleared once all pulses are done
    active: bool,
}

impl BuzzerSequence {
    /// Toggles done so far
    pub const fn pulse_index(&self) -> u32 {
        self.pulse_index
    }

    /// Toggles the pattern performs in total
    pub const fn max_pulses(&self) -> u32 {
        self.pattern.pulses
    }

    /// When the output last changed
    pub const fn last_toggle_at(&self) -> Instant {
        self.last_toggle_at
    }
}

/// Plays one [`Pattern`] at a time on a [`ToneOutput`]
#[derive(Debug, Default)]
pub struct BuzzerPattern {
    /// The current or last sequence
    sequence: Option<BuzzerSequence>,
}

impl BuzzerPattern {
    /// Create a new, silent `BuzzerPattern`
    pub const fn new() -> Self {
        Self { sequence: None }
    }

    /// Start `pattern` now, replacing whatever was playing. The output goes on immediately.
    pub fn start(&mut self, pattern: Pattern, now: Instant, output: &mut impl ToneOutput) {
        debug!(
            "buzzer: start {} ({} pulses of {} ms)",
            pattern.kind,
            pattern.pulses,
            pattern.period.as_millis()
        );
        if pattern.pulses == 0 {
            output.stop();
            self.sequence = None;
            return;
        }
        output.set_tone(pattern.frequency_hz, pattern.period);
        self.sequence = Some(BuzzerSequence {
            pattern,
            pulse_index: 0,
            last_toggle_at: now,
            output_on: true,
            active: true,
        });
    }

    /// Advance the running sequence. Call once per poll cycle; does at most one output transition per call.
    pub fn tick(&mut self, now: Instant, output: &mut impl ToneOutput) {
        let Some(sequence) = self.sequence.as_mut() else {
            return;
        };
        if !sequence.active || elapsed_since(now, sequence.last_toggle_at) < sequence.pattern.period {
            return;
        }

        sequence.pulse_index += 1;
        sequence.last_toggle_at = now;

        if sequence.pulse_index >= sequence.pattern.pulses {
            output.stop();
            sequence.output_on = false;
            sequence.active = false;
            debug!("buzzer: {} finished", sequence.pattern.kind);
            return;
        }

        sequence.output_on = !sequence.output_on;
        if sequence.output_on {
            output.set_tone(sequence.pattern.frequency_hz, sequence.pattern.period);
        } else {
            output.set(false);
        }
    }

    /// Silence the output and drop the sequence, so the next pattern starts from zero
    pub fn stop(&mut self, output: &mut impl ToneOutput) {
        output.stop();
        self.sequence = None;
    }

    /// Whether a sequence is still playing
    pub fn is_active(&self) -> bool {
        self.sequence.is_some_and(|sequence| sequence.active)
    }

    /// The kind of the sequence that is still playing
    pub fn active_kind(&self) -> Option<PatternKind> {
        self.sequence
            .filter(|sequence| sequence.active)
            .map(|sequence| sequence.pattern.kind)
    }

    /// The current or last sequence
    pub const fn sequence(&self) -> Option<&BuzzerSequence> {
        self.sequence.as_ref()
    }
}
