//! # Motion alarm firmware
//! Raspberry Pi Pico firmware for a standalone PIR motion alarm: one button arms and disarms, a buzzer sounds the
//! siren and an OLED display shows the status.
//!
//! Wiring:
//! - button on GPIO 20 to ground, internal pull-up
//! - PIR sensor output on GPIO 16, internal pull-down
//! - active buzzer on GPIO 15
//! - SSD1306 OLED on I2C0, SDA GPIO 12, SCL GPIO 13

// we are in an environment with constrained resources, so we do not use the standard library and we define a different entry point.
#![no_std]
#![no_main]

use crate::task::alarm::alarm_handler;
use crate::task::display::display_handler;
use crate::task::resources::{AlarmResources, DisplayResources};
use crate::task::watchdog::watchdog_task;
use defmt::{error, info, unwrap};
use embassy_executor::Spawner;
use motion_alarm_core::AlarmTimings;
use {defmt_rtt as _, panic_probe as _}; // global logger and panic handler

mod event;
mod task;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Program start");

    // Initialize the peripherals for the RP2040
    let p = embassy_rp::init(Default::default());

    let timings = AlarmTimings::DEFAULT;
    if let Err(e) = timings.validate() {
        error!("Invalid alarm timings, not starting: {}", e);
        return;
    }

    let alarm_resources = AlarmResources {
        button_pin: p.PIN_20,
        pir_pin: p.PIN_16,
        buzzer_pin: p.PIN_15,
    };
    let display_resources = DisplayResources {
        scl: p.PIN_13,
        sda: p.PIN_12,
        i2c0: p.I2C0,
    };

    unwrap!(spawner.spawn(display_handler(display_resources)));
    unwrap!(spawner.spawn(alarm_handler(alarm_resources, timings)));
    unwrap!(spawner.spawn(watchdog_task(p.WATCHDOG)));
}
