//! HCI UART tasks
//!
//! The transmit task is the outgoing-data path: every packet notifies the
//! coordinator before it is written, waking the link if needed. The
//! receive task drains controller traffic.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::Timer;
use embedded_io_async::{Read, Write};
use portable_atomic::Ordering;

use crate::board::BtCoordinator;
use crate::channels::{HCI_TX, TX_PENDING};
use crate::tasks::settle_ms;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// HCI TX task - sends queued packets to the controller
#[embassy_executor::task]
pub async fn hci_tx_task(
    mut tx: BufferedUartTx,
    coordinator: &'static BtCoordinator,
) {
    info!("HCI TX task started");

    let settle_ms = settle_ms(coordinator);

    loop {
        let packet = HCI_TX.receive().await;
        let len = packet.len() as u32;

        TX_PENDING.fetch_add(len, Ordering::AcqRel);
        if coordinator.outgoing_data() && settle_ms > 0 {
            // Controller was asleep
            Timer::after_millis(u64::from(settle_ms)).await;
        }

        if let Err(e) = tx.write_all(&packet).await {
            warn!("HCI write error: {:?}", e);
        }
        if let Err(e) = tx.flush().await {
            warn!("HCI flush error: {:?}", e);
        }
        TX_PENDING.fetch_sub(len, Ordering::AcqRel);

        trace!("HCI TX: {} bytes", len);
    }
}

/// HCI RX task - drains bytes from the controller
#[embassy_executor::task]
pub async fn hci_rx_task(mut rx: BufferedUartRx) {
    info!("HCI RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("HCI RX: {} bytes", n);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("HCI read error: {:?}", e);
            }
        }
    }
}
