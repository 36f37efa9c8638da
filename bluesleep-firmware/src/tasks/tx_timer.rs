//! Idle timer task
//!
//! Services the coordinator's one-shot idle timer. Arm and cancel requests
//! arrive on `TIMER_CMD`; on expiry the coordinator's idle detector runs
//! under the lock and any sleep work is queued for the deferred-work task.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};
use portable_atomic::Ordering;

use bluesleep_core::Event;

use crate::board::BtCoordinator;
use crate::channels::{TimerCommand, TIMER_ARMED, TIMER_CMD, WORK};

/// Tx timer task - fires the idle detector
#[embassy_executor::task]
pub async fn tx_timer_task(coordinator: &'static BtCoordinator) {
    info!("Tx timer task started");

    let mut deadline: Option<Instant> = None;

    loop {
        let command = match deadline {
            None => Some(TIMER_CMD.wait().await),
            Some(at) => match select(TIMER_CMD.wait(), Timer::at(at)).await {
                Either::First(command) => Some(command),
                Either::Second(()) => None,
            },
        };

        match command {
            Some(TimerCommand::Arm(after_ms)) => {
                trace!("Idle timer armed for {}ms", after_ms);
                TIMER_ARMED.store(true, Ordering::Release);
                deadline = Some(Instant::now() + Duration::from_millis(u64::from(after_ms)));
            }
            Some(TimerCommand::Cancel) => {
                trace!("Idle timer cancelled");
                deadline = None;
            }
            None => {
                deadline = None;
                TIMER_ARMED.store(false, Ordering::Release);
                expire(coordinator).await;
            }
        }
    }
}

async fn expire(coordinator: &'static BtCoordinator) {
    // A late expiry after stop finds PROTO clear and does nothing
    match coordinator.handle(Event::TxTimerExpired) {
        Ok(response) => {
            if let Some(event) = response.deferred_event() {
                debug!("Idle interval elapsed, scheduling sleep work");
                WORK.send(event).await;
            }
        }
        Err(e) => warn!("Idle timer event rejected: {:?}", e),
    }
}
