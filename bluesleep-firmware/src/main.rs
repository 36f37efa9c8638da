//! Bluesleep - Bluetooth UART sleep/wake coordinator firmware
//!
//! Sits between a host link and a Bluetooth controller on an RP2040. Drops
//! BT_WAKE and gates the HCI UART after an idle interval, and wakes the
//! link when the host sends data or the controller raises HOST_WAKE.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use bluesleep_core::{Coordinator, Event};
use bluesleep_drivers::{DeadlineWakeLock, EhOutput, HostWakeLine, SharedCoordinator, WakeLine};

use crate::board::{BtCoordinator, EmbassyClock, EmbassyTimer, HciUart};
use crate::channels::{HciPacket, HCI_TX, HOST_WAKE};

/// Embedded configuration (compiled into firmware)
/// Edit bluesleep.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../bluesleep.toml");

/// HCI_Reset command packet, sent once the link is up
const HCI_RESET: [u8; 4] = [0x01, 0x03, 0x0c, 0x00];

mod board;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static CONSOLE_TX_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static CONSOLE_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static HCI_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static HCI_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

static COORDINATOR: StaticCell<BtCoordinator> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Bluesleep firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config(EMBEDDED_CONFIG);

    // Wake and host-wake lines
    let bt_wake = WakeLine::new(
        EhOutput::new(Output::new(p.PIN_6, Level::Low), false),
        config.ext_wake_active_high,
    );
    let host_wake_pull = if config.host_wake_active_high {
        Pull::Down
    } else {
        Pull::Up
    };
    let host_wake_pin = Input::new(p.PIN_8, host_wake_pull);
    let host_wake = HostWakeLine::new(&HOST_WAKE, config.host_wake_active_high);

    // Construction asserts BT_WAKE
    let coordinator = Coordinator::new(
        config,
        bt_wake,
        host_wake,
        EmbassyTimer,
        DeadlineWakeLock::new(EmbassyClock),
    );
    let coordinator: &'static BtCoordinator =
        COORDINATOR.init(SharedCoordinator::new(coordinator));
    info!("Coordinator initialized, BT_WAKE asserted");

    // HCI UART to the controller, RTS driven in software
    let hci_uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, UartConfig::default());
    let hci_uart = hci_uart.into_buffered(
        Irqs,
        HCI_TX_BUF.init([0u8; 256]),
        HCI_RX_BUF.init([0u8; 256]),
    );
    let (hci_tx, hci_rx) = hci_uart.split();
    let rts = Output::new(p.PIN_3, Level::Low);
    if coordinator.uart_open(HciUart::new(rts)).is_err() {
        warn!("HCI UART already bound");
    }
    info!("HCI UART initialized");

    // Debug console
    let console = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let console = console.into_buffered(
        Irqs,
        CONSOLE_TX_BUF.init([0u8; 128]),
        CONSOLE_RX_BUF.init([0u8; 64]),
    );
    let (console_tx, console_rx) = console.split();
    info!("Console UART initialized");

    // Spawn tasks
    spawner.spawn(unwrap!(tasks::host_wake_task(host_wake_pin)));
    spawner.spawn(unwrap!(tasks::tx_timer_task(coordinator)));
    spawner.spawn(unwrap!(tasks::sleep_work_task(coordinator)));
    spawner.spawn(unwrap!(tasks::hci_tx_task(hci_tx, coordinator)));
    spawner.spawn(unwrap!(tasks::hci_rx_task(hci_rx)));
    spawner.spawn(unwrap!(tasks::console_task(console_tx, console_rx, coordinator)));
    spawner.spawn(unwrap!(tasks::power_task(coordinator)));

    info!("All tasks spawned");

    // Start low-power mode and bring up the controller
    match coordinator.handle(Event::Start) {
        Ok(response) => info!("Sleep protocol started, link {:?}", response.transition.to),
        Err(e) => warn!("Sleep protocol unavailable: {:?}", e),
    }

    let mut reset = HciPacket::new();
    if reset.extend_from_slice(&HCI_RESET).is_ok() {
        HCI_TX.send(reset).await;
    }

    loop {
        embassy_time::Timer::after_secs(60).await;
        let flags = coordinator.lock(|c| c.flags().bits());
        trace!(
            "Main loop heartbeat, running={}, flags={=u8:#x}",
            coordinator.is_running(),
            flags
        );
    }
}
