//! Status signal between the alarm task and the display task

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use motion_alarm_core::StatusUpdate;

/// The latest status of the alarm. Only the newest update matters to the display, older ones are overwritten.
static STATUS_SIGNAL: Signal<CriticalSectionRawMutex, StatusUpdate> = Signal::new();

/// Hands a status update to the display task
pub fn signal_status(update: StatusUpdate) {
    STATUS_SIGNAL.signal(update);
}

/// Waits for the next status update
pub async fn wait_for_status() -> StatusUpdate {
    STATUS_SIGNAL.wait().await
}
