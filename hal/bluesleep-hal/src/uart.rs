//! UART port abstraction
//!
//! The coordinator never moves data itself. It only needs to know whether
//! the transmitter has drained and to gate the port while the link sleeps.

/// UART port bound to the Bluetooth controller
pub trait UartPort {
    /// Line number identifying this port
    fn line(&self) -> u8;

    /// Check if the transmit FIFO and shift register are empty
    fn tx_empty(&self) -> bool;

    /// Power the port up or down
    ///
    /// Powering down gates the clock and drops RTS; powering up restores
    /// both.
    fn set_power(&mut self, on: bool);
}

