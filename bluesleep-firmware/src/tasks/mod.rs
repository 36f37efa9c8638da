//! Embassy async tasks
//!
//! Each task runs independently and reaches the coordinator through the
//! shared lock. Interrupt-side work only posts events; all coordinator
//! logic runs in task context.

pub mod console;
pub mod hci;
pub mod host_wake;
pub mod power;
pub mod sleep_work;
pub mod tx_timer;

pub use console::console_task;
pub use hci::{hci_rx_task, hci_tx_task};
pub use host_wake::host_wake_task;
pub use power::power_task;
pub use sleep_work::sleep_work_task;
pub use tx_timer::tx_timer_task;

use defmt::*;
use embassy_time::Timer;

use bluesleep_core::Response;

use crate::board::BtCoordinator;

/// Wake settle delay from the coordinator's configuration
pub(crate) fn settle_ms(coordinator: &BtCoordinator) -> u32 {
    coordinator.lock(|c| c.config().wake_settle_ms)
}

/// Log a state change and give the controller time to wake
///
/// Runs after the coordinator lock is released.
pub(crate) async fn settle(response: &Response, settle_ms: u32) {
    if response.transition.is_change() {
        info!(
            "Link {:?} -> {:?}",
            response.transition.from, response.transition.to
        );
    }
    if response.wake_asserted && settle_ms > 0 {
        Timer::after_millis(u64::from(settle_ms)).await;
    }
}
