//! Events that drive the coordinator

/// Events handled by [`crate::Coordinator::handle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Control events
    /// Start the sleep protocol
    Start,
    /// Stop the sleep protocol
    Stop,
    /// Drive the wake line directly
    SetWakeLine(bool),
    /// `btwrite` node write
    BtWrite(bool),

    // Data path events
    /// Outgoing data handed to the UART
    OutgoingData,

    // Deferred events
    /// Idle timer expired
    TxTimerExpired,
    /// Host-wake line changed (deferred half of the interrupt)
    HostWakeChanged,
    /// Deferred sleep work
    SleepWork,

    // Power management events
    /// System resumed; `true` if the controller caused the wakeup
    Resume { woken_by_bt: bool },
}

impl Event {
    /// Check if this event comes from the control surface
    pub fn is_control_event(&self) -> bool {
        matches!(
            self,
            Event::Start | Event::Stop | Event::SetWakeLine(_) | Event::BtWrite(_)
        )
    }

    /// Check if this event runs on the deferred work context
    pub fn is_deferred_event(&self) -> bool {
        matches!(
            self,
            Event::TxTimerExpired | Event::HostWakeChanged | Event::SleepWork
        )
    }
}
