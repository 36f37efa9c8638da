//! Deferred-work task
//!
//! Runs the host-wake deferred handler and the sleep work. Follow-up work
//! returned by the coordinator is run in place instead of being queued.

use defmt::*;

use crate::board::BtCoordinator;
use crate::channels::WORK;
use crate::tasks::{settle, settle_ms};

/// Sleep work task - the deferred context
#[embassy_executor::task]
pub async fn sleep_work_task(coordinator: &'static BtCoordinator) {
    info!("Sleep work task started");

    let settle_ms = settle_ms(coordinator);

    loop {
        let mut next = Some(WORK.receive().await);

        while let Some(event) = next.take() {
            if event.is_deferred_event() {
                trace!("Deferred work: {:?}", event);
            } else if event.is_control_event() {
                debug!("Control event on work queue: {:?}", event);
            } else {
                debug!("Work: {:?}", event);
            }
            match coordinator.handle(event) {
                Ok(response) => {
                    settle(&response, settle_ms).await;
                    next = response.deferred_event();
                }
                Err(e) => warn!("Work event {:?} rejected: {:?}", event, e),
            }
        }
    }
}
