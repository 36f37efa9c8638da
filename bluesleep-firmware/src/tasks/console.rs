//! Debug console task
//!
//! Serves the control nodes over UART0, one request per line. See
//! `bluesleep_protocol::console` for the request format.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use bluesleep_protocol::{error_reply, ControlError, MAX_LINE_LEN};

use crate::board::BtCoordinator;
use crate::tasks::{settle, settle_ms};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Console task - reads requests and writes replies
#[embassy_executor::task]
pub async fn console_task(
    mut tx: BufferedUartTx,
    mut rx: BufferedUartRx,
    coordinator: &'static BtCoordinator,
) {
    info!("Console task started");

    let settle_ms = settle_ms(coordinator);

    let mut line: heapless::Vec<u8, MAX_LINE_LEN> = heapless::Vec::new();
    let mut overflow = false;
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("Console read error: {:?}", e);
                continue;
            }
        };

        for &byte in &buf[..n] {
            if byte != b'\n' {
                if line.push(byte).is_err() {
                    overflow = true;
                }
                continue;
            }

            let reply = if overflow {
                warn!("Console line too long, discarded");
                error_reply(ControlError::InvalidValue)
            } else {
                match core::str::from_utf8(&line) {
                    Ok(request) => {
                        let (reply, response) = coordinator.serve_console_line(request);
                        if let Some(response) = response {
                            settle(&response, settle_ms).await;
                        }
                        reply
                    }
                    Err(_) => error_reply(ControlError::InvalidValue),
                }
            };

            line.clear();
            overflow = false;

            if let Err(e) = tx.write_all(reply.as_bytes()).await {
                warn!("Console write error: {:?}", e);
            }
        }
    }
}
