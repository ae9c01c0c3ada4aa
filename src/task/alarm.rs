//! # Alarm task
//! Runs the poll loop of the motion alarm. The decisions are all made in [`motion_alarm_core`]; this task wires the
//! pins to it and keeps polling at a fixed rate.
//!
//! The liveness check on an arm request blocks this task for up to a second. That is accepted: nothing else in the
//! alarm may advance while the sensor is being checked, and the display task keeps its last frame.
use crate::event::signal_status;
use crate::task::resources::AlarmResources;
use crate::task::watchdog::report_loop_alive;
use defmt::info;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Delay, Duration, Instant, Ticker};
use motion_alarm_core::{AlarmTimings, Clock, MotionAlarm, PinTone, SensorLivenessCheck, StatusSink, StatusUpdate};

/// Time between two poll cycles, well below the debounce window and the shortest buzzer period
pub const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Monotonic time since boot, from the embassy time driver
#[derive(Clone, Copy)]
struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Forwards status updates to the display task
struct DisplaySink;

impl StatusSink for DisplaySink {
    fn publish(&mut self, update: StatusUpdate) {
        signal_status(update);
    }
}

#[embassy_executor::task]
pub async fn alarm_handler(r: AlarmResources, timings: AlarmTimings) {
    info!("Alarm task started");

    let button = Input::new(r.button_pin, Pull::Up);
    // the PIR output floats until the sensor has warmed up, keep it low meanwhile
    let pir = Input::new(r.pir_pin, Pull::Down);
    let buzzer = Output::new(r.buzzer_pin, Level::Low);

    let probe = SensorLivenessCheck::new(SystemClock, Delay, &timings);
    let mut alarm = MotionAlarm::new(
        timings,
        move || button.is_low(),
        SystemClock,
        move || pir.is_high(),
        probe,
        PinTone::new(buzzer),
        DisplaySink,
    );
    alarm.start();

    let mut ticker = Ticker::every(POLL_INTERVAL);
    loop {
        alarm.poll();
        report_loop_alive();
        ticker.next().await;
    }
}
