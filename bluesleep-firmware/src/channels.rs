//! Inter-task communication channels
//!
//! Defines the static channels, signals and flags shared between Embassy
//! tasks and the board adapters.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicU32};

use bluesleep_core::Event;
use bluesleep_drivers::HostWakeShared;

/// Channel capacity for deferred work
const WORK_QUEUE_SIZE: usize = 8;

/// Channel capacity for outgoing HCI packets
const HCI_TX_QUEUE_SIZE: usize = 4;

/// Largest HCI packet queued for transmit
pub const MAX_HCI_PACKET: usize = 64;

/// One outgoing HCI packet
pub type HciPacket = heapless::Vec<u8, MAX_HCI_PACKET>;

/// Idle timer requests from the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerCommand {
    /// (Re)arm to fire after the given delay
    Arm(u32),
    /// Drop any pending expiry
    Cancel,
}

/// Events for the deferred-work task (host wake, sleep work)
pub static WORK: Channel<CriticalSectionRawMutex, Event, WORK_QUEUE_SIZE> = Channel::new();

/// Latest idle timer request
pub static TIMER_CMD: Signal<CriticalSectionRawMutex, TimerCommand> = Signal::new();

/// Idle timer has a pending expiry
pub static TIMER_ARMED: AtomicBool = AtomicBool::new(false);

/// Outgoing HCI packets
pub static HCI_TX: Channel<CriticalSectionRawMutex, HciPacket, HCI_TX_QUEUE_SIZE> =
    Channel::new();

/// Bytes handed to the HCI UART but not yet flushed
pub static TX_PENDING: AtomicU32 = AtomicU32::new(0);

/// Host-wake line state shared with the coordinator
pub static HOST_WAKE: HostWakeShared<CriticalSectionRawMutex> = HostWakeShared::new();
