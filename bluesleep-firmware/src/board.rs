//! Board adapters
//!
//! Binds the coordinator's hardware traits to RP2040 peripherals and the
//! firmware's tasks.
//!
//! Pin assignments:
//! - GPIO4/GPIO5: HCI UART1 TX/RX
//! - GPIO3: HCI RTS (active low, driven in software)
//! - GPIO6: BT_WAKE output
//! - GPIO8: HOST_WAKE input

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Instant;
use portable_atomic::Ordering;

use bluesleep_drivers::{
    Clock, DeadlineWakeLock, EhOutput, HostWakeLine, SharedCoordinator, WakeLine,
};
use bluesleep_hal::{OneShotTimer, UartPort};

use crate::channels::{TimerCommand, TIMER_ARMED, TIMER_CMD, TX_PENDING};

/// Line number of the HCI UART
pub const HCI_UART_LINE: u8 = 1;

/// BT_WAKE output
pub type BtWake = WakeLine<EhOutput<Output<'static>>>;

/// HOST_WAKE input as seen by the coordinator
pub type HostWake = HostWakeLine<'static, CriticalSectionRawMutex>;

/// Wake lock on the embassy clock
pub type BoardWakeLock = DeadlineWakeLock<EmbassyClock>;

/// The coordinator instance shared by every task
pub type BtCoordinator = SharedCoordinator<
    CriticalSectionRawMutex,
    BtWake,
    HostWake,
    EmbassyTimer,
    BoardWakeLock,
    HciUart,
>;

/// Monotonic clock from the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Idle timer serviced by the tx timer task
pub struct EmbassyTimer;

impl OneShotTimer for EmbassyTimer {
    fn arm(&mut self, after_ms: u32) {
        TIMER_ARMED.store(true, Ordering::Release);
        TIMER_CMD.signal(TimerCommand::Arm(after_ms));
    }

    fn cancel(&mut self) {
        TIMER_ARMED.store(false, Ordering::Release);
        TIMER_CMD.signal(TimerCommand::Cancel);
    }

    fn is_armed(&self) -> bool {
        TIMER_ARMED.load(Ordering::Acquire)
    }
}

/// HCI UART power gate
///
/// The UART peripheral stays clocked; powering down deasserts RTS so the
/// controller holds its traffic until the link is woken.
pub struct HciUart {
    rts: Output<'static>,
}

impl HciUart {
    pub fn new(rts: Output<'static>) -> Self {
        Self { rts }
    }
}

impl UartPort for HciUart {
    fn line(&self) -> u8 {
        HCI_UART_LINE
    }

    fn tx_empty(&self) -> bool {
        TX_PENDING.load(Ordering::Acquire) == 0
    }

    fn set_power(&mut self, on: bool) {
        if on {
            self.rts.set_low();
        } else {
            self.rts.set_high();
        }
        debug!("HCI UART power {}", on);
    }
}
