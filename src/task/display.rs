//! # Display task
//! This module contains the task that shows the alarm status on the OLED display.
//!
//! The task initializes the display, shows a splash screen at boot and then redraws the screen for every status
//! update the alarm task signals.
use crate::event::wait_for_status;
use crate::task::resources::{DisplayResources, Irqs};
use core::fmt::Write;
use defmt::{Debug2Format, error, info, warn};
use embassy_rp::i2c::{Config, I2c};
use embassy_time::{Duration, Timer};
use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_6X13, FONT_9X18_BOLD},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use heapless::String;
use motion_alarm_core::{AlarmState, StatusUpdate};
use ssd1306_async::{I2CDisplayInterface, Ssd1306, prelude::*};

/// How long the splash screen stays up at boot
const SPLASH_DURATION: Duration = Duration::from_secs(2);

/// Position of the headline
const TITLE_POSITION: Point = Point::new(0, 8);

/// Position of the detail line
const DETAIL_POSITION: Point = Point::new(0, 36);

/// Headline and detail line for a status update
fn status_lines(update: &StatusUpdate) -> (&'static str, String<24>) {
    let mut detail = String::new();
    // all texts fit, a failed write only truncates
    let title = match update.state {
        AlarmState::Disarmed => {
            let _ = detail.push_str("press button");
            "DISARMED"
        }
        AlarmState::Arming => {
            let _ = write!(detail, "wait {}s", update.countdown_seconds.unwrap_or(0));
            "ARMING"
        }
        AlarmState::Armed => {
            let _ = write!(detail, "triggers: {}", update.trigger_count.unwrap_or(0));
            "ARMED"
        }
        AlarmState::Triggered => {
            let _ = detail.push_str("ALARM SOUNDING");
            "MOTION!"
        }
        AlarmState::ArmFault => {
            let _ = detail.push_str("press to retry");
            "SENSOR FAULT"
        }
    };
    (title, detail)
}

/// Draw headline and detail line into the frame buffer
fn draw_status<D>(target: &mut D, title: &str, detail: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let title_style = MonoTextStyle::new(&FONT_9X18_BOLD, BinaryColor::On);
    let detail_style = MonoTextStyle::new(&FONT_6X13, BinaryColor::On);
    Text::with_baseline(title, TITLE_POSITION, title_style, Baseline::Top).draw(target)?;
    Text::with_baseline(detail, DETAIL_POSITION, detail_style, Baseline::Top).draw(target)?;
    Ok(())
}

#[embassy_executor::task]
pub async fn display_handler(r: DisplayResources) {
    info!("Display task started");

    let mut config = Config::default();
    config.frequency = 400_000;
    let i2c = I2c::new_async(r.i2c0, r.scl, r.sda, Irqs, config);

    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if let Err(e) = display.init().await {
        error!("Failed to initialize display: {}", Debug2Format(&e));
        return;
    }

    display.clear();
    if draw_status(&mut display, "MOTION ALARM", "starting").is_ok() {
        if let Err(e) = display.flush().await {
            warn!("Failed to show splash screen: {}", Debug2Format(&e));
        }
    }
    Timer::after(SPLASH_DURATION).await;

    loop {
        // only the newest status is kept
        let update = wait_for_status().await;
        let (title, detail) = status_lines(&update);

        // prepare the display, note that nothing is sent to the display before flush()
        display.clear();
        if let Err(e) = draw_status(&mut display, title, &detail) {
            warn!("Failed to draw status: {}", Debug2Format(&e));
            continue;
        }
        if let Err(e) = display.flush().await {
            warn!("Failed to update display: {}", Debug2Format(&e));
        }
    }
}
