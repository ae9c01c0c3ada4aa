//! # Collaborator interfaces
//! The narrow seams through which the core talks to the board: it reads the motion sensor and the button, drives the
//! buzzer and reports status. Nothing behind these traits is ever queried back.
use crate::state::StatusUpdate;
use embassy_time::Duration;
use embedded_hal::digital::OutputPin;

/// The PIR motion sensor
pub trait MotionInput {
    /// `true` while the sensor reports motion
    fn read(&mut self) -> bool;
}

impl<F: FnMut() -> bool> MotionInput for F {
    fn read(&mut self) -> bool {
        self()
    }
}

/// The arm/disarm push button
pub trait ButtonInput {
    /// `true` while the button is pressed. Any pull-up inversion is resolved by the implementor.
    fn read(&mut self) -> bool;
}

impl<F: FnMut() -> bool> ButtonInput for F {
    fn read(&mut self) -> bool {
        self()
    }
}

/// The buzzer
pub trait ToneOutput {
    /// Drive the buzzer on or off
    fn set(&mut self, active: bool);

    /// Sound a tone of the given frequency for (at most) the given duration.
    ///
    /// Outputs that cannot produce a frequency, like an active buzzer on a plain pin, just switch on.
    fn set_tone(&mut self, frequency_hz: u32, duration: Duration) {
        let _ = (frequency_hz, duration);
        self.set(true);
    }

    /// Force silence
    fn stop(&mut self) {
        self.set(false);
    }
}

/// Receives one [`StatusUpdate`] per state transition, plus countdown refreshes while arming
pub trait StatusSink {
    /// Take the update, must return promptly
    fn publish(&mut self, update: StatusUpdate);
}

/// An active buzzer switched by a GPIO pin
pub struct PinTone<P> {
    /// The output pin, high means sound
    pin: P,
}

impl<P: OutputPin> PinTone<P> {
    /// Create a new `PinTone` and make sure the buzzer starts silent
    pub fn new(pin: P) -> Self {
        let mut tone = Self { pin };
        tone.set(false);
        tone
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> ToneOutput for PinTone<P> {
    fn set(&mut self, active: bool) {
        let result = if active {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        // a failing pin write must never stall the loop, the next cycle writes again
        if result.is_err() {
            warn!("buzzer pin write failed, active: {}", active);
        }
    }
}
