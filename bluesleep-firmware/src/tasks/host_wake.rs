//! Host-wake interrupt task
//!
//! Owns the HOST_WAKE pin. Every edge refreshes the published level; an
//! edge matching the enabled interrupt posts `HostWakeChanged` to the
//! deferred-work task. Nothing here touches the coordinator.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Input;

use bluesleep_core::Event;
use bluesleep_hal::Edge;

use crate::channels::{HOST_WAKE, WORK};

/// Host-wake task - the interrupt half of host-wake handling
#[embassy_executor::task]
pub async fn host_wake_task(mut pin: Input<'static>) {
    info!("Host wake task started");

    HOST_WAKE.record_level(pin.is_high());

    loop {
        let armed = HOST_WAKE.armed_edge();

        match select(pin.wait_for_any_edge(), HOST_WAKE.wait_reconfigured()).await {
            Either::First(()) => {
                let high = pin.is_high();
                HOST_WAKE.record_level(high);

                let fired = match armed {
                    Some(Edge::Rising) => high,
                    Some(Edge::Falling) => !high,
                    Some(Edge::Both) => true,
                    None => false,
                };

                if fired {
                    trace!("Host wake edge, level={}", high);
                    if WORK.try_send(Event::HostWakeChanged).is_err() {
                        warn!("Work queue full, dropping host wake");
                    }
                }
            }
            Either::Second(()) => {
                debug!("Host wake interrupt now {:?}", HOST_WAKE.armed_edge());
            }
        }
    }
}
