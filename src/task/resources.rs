//! # Resources
//! The peripherals each task gets, grouped per task. The groups are filled in main.rs.

use embassy_rp::Peri;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::{I2C0, PIN_12, PIN_13, PIN_15, PIN_16, PIN_20};

/// Button, PIR sensor and buzzer, driven by the alarm task
pub struct AlarmResources {
    /// Arm/disarm push button, pulls the pin low while pressed
    pub button_pin: Peri<'static, PIN_20>,
    /// PIR sensor output, high on motion
    pub pir_pin: Peri<'static, PIN_16>,
    /// Active buzzer, sounds while high
    pub buzzer_pin: Peri<'static, PIN_15>,
}

/// The SSD1306 OLED on I2C0
pub struct DisplayResources {
    /// Clock line
    pub scl: Peri<'static, PIN_13>,
    /// Data line
    pub sda: Peri<'static, PIN_12>,
    /// The I2C block
    pub i2c0: Peri<'static, I2C0>,
}

bind_interrupts!(pub struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});
