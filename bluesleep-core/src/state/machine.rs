//! Link state definition

use crate::flags::SleepFlags;

/// Link states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Sleep protocol not running; wake line held asserted
    Stopped,
    /// Protocol running, UART powered
    Awake,
    /// Protocol running, UART powered down, wake line deasserted
    Asleep,
}

impl LinkState {
    /// Derive the state from the coordinator flags
    ///
    /// `TXDATA` does not affect the state; it only feeds idle detection.
    pub fn from_flags(flags: SleepFlags) -> Self {
        if !flags.contains(SleepFlags::PROTO) {
            LinkState::Stopped
        } else if flags.contains(SleepFlags::ASLEEP) {
            LinkState::Asleep
        } else {
            LinkState::Awake
        }
    }

    /// Check if the sleep protocol is running
    pub fn is_running(&self) -> bool {
        !matches!(self, LinkState::Stopped)
    }

    /// Check if the UART is expected to be powered
    pub fn uart_powered(&self) -> bool {
        !matches!(self, LinkState::Asleep)
    }
}

/// One step of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// State before the event
    pub from: LinkState,
    /// State after the event
    pub to: LinkState,
}

impl Transition {
    /// Check if the event moved the link to another state
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }

    /// Check if the link just went to sleep
    pub fn fell_asleep(&self) -> bool {
        self.from != LinkState::Asleep && self.to == LinkState::Asleep
    }

    /// Check if the link just woke from sleep
    pub fn woke_up(&self) -> bool {
        self.from == LinkState::Asleep && self.to != LinkState::Asleep
    }
}
