//! Watchdog task to reset the system if the alarm loop stops
//!
//! The hardware watchdog is started at boot and fed from here, but only while the alarm task keeps reporting in.
//! Should the poll loop hang, the reports stop, the watchdog goes hungry and the RP2040 resets into a disarmed alarm.

use core::cell::Cell;
use defmt::{info, warn};
use embassy_rp::{Peri, peripherals::WATCHDOG, watchdog::Watchdog};
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use embassy_time::{Duration, Instant, Timer};

/// Hardware watchdog timeout
const HARDWARE_WATCHDOG_TIMEOUT: Duration = Duration::from_millis(2_000);
/// How often the watchdog gets fed
const FEED_INTERVAL: Duration = Duration::from_millis(500);
/// A report older than this means the alarm loop is stuck. The liveness check blocks the loop for up to a second.
const MAX_REPORT_AGE: Duration = Duration::from_millis(1_500);
/// Time the alarm task gets to come up before the first report is expected
const STARTUP_GRACE: Duration = Duration::from_secs(5);

/// When the alarm loop last reported in
static LAST_REPORT: Mutex<CriticalSectionRawMutex, Cell<Option<Instant>>> = Mutex::new(Cell::new(None));

/// Report a completed poll cycle of the alarm loop
pub fn report_loop_alive() {
    LAST_REPORT.lock(|last| last.set(Some(Instant::now())));
}

/// Whether the alarm loop reported recently enough at `now`
fn loop_is_alive(now: Instant) -> bool {
    match LAST_REPORT.lock(Cell::get) {
        Some(last) => now.saturating_duration_since(last) < MAX_REPORT_AGE,
        None => now.saturating_duration_since(Instant::MIN) < STARTUP_GRACE,
    }
}

/// Watchdog task, feeds the hardware watchdog while the alarm loop is alive
///
/// # Arguments
/// * `watchdog` - The watchdog peripheral from the RP2040
#[embassy_executor::task]
pub async fn watchdog_task(watchdog: Peri<'static, WATCHDOG>) {
    info!(
        "Watchdog started - timeout {}ms, alarm loop must report every {}ms",
        HARDWARE_WATCHDOG_TIMEOUT.as_millis(),
        MAX_REPORT_AGE.as_millis()
    );

    let mut wd = Watchdog::new(watchdog);
    wd.start(HARDWARE_WATCHDOG_TIMEOUT);

    let mut starving = false;
    loop {
        if loop_is_alive(Instant::now()) {
            wd.feed();
            starving = false;
        } else if !starving {
            warn!("Alarm loop stopped reporting - no longer feeding the watchdog, system will reset");
            starving = true;
        }
        Timer::after(FEED_INTERVAL).await;
    }
}
