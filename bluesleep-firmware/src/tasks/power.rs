//! Power supervision task
//!
//! Polls whether the system could suspend: link asleep and no wake lock
//! held. Leaving that window is treated as a system resume and reported to
//! the coordinator, with the cause taken from the host-wake line.

use defmt::*;
use embassy_time::{Duration, Ticker};

use bluesleep_core::{Event, LinkState};
use bluesleep_hal::InputPin;

use crate::board::BtCoordinator;

/// Poll interval in milliseconds
pub const POWER_POLL_MS: u64 = 100;

/// Power task - tracks suspend eligibility and reports resumes
#[embassy_executor::task]
pub async fn power_task(coordinator: &'static BtCoordinator) {
    info!("Power task started");

    let mut ticker = Ticker::every(Duration::from_millis(POWER_POLL_MS));
    let mut suspended = false;

    loop {
        ticker.next().await;

        let (can_suspend, host_wake) = coordinator.lock(|c| {
            (
                c.state() == LinkState::Asleep && !c.wake_lock().is_held(),
                c.host_wake().is_high(),
            )
        });

        if can_suspend && !suspended {
            info!("Suspend allowed");
            suspended = true;
        } else if !can_suspend && suspended {
            suspended = false;
            info!("Resumed, woken_by_bt={}", host_wake);
            if let Err(e) = coordinator.handle(Event::Resume {
                woken_by_bt: host_wake,
            }) {
                warn!("Resume rejected: {:?}", e);
            }
        }
    }
}
