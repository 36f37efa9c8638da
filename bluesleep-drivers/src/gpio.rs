//! GPIO output adapters
//!
//! [`EhOutput`] lifts any `embedded-hal` output into the coordinator's
//! [`OutputPin`]; [`WakeLine`] maps "asserted" onto the board's wake line
//! polarity.

use bluesleep_hal::OutputPin;

/// `embedded-hal` output pin adapter
///
/// `embedded-hal` pins are fallible and may need `&mut self` to read back
/// their state, so the last successfully written level is cached.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P: embedded_hal::digital::OutputPin> EhOutput<P> {
    /// Wrap a pin whose current level is `initial_high`
    pub fn new(pin: P, initial_high: bool) -> Self {
        Self {
            pin,
            high: initial_high,
        }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: embedded_hal::digital::OutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        if self.pin.set_high().is_ok() {
            self.high = true;
        }
    }

    fn set_low(&mut self) {
        if self.pin.set_low().is_ok() {
            self.high = false;
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Wake line output
///
/// "High" on this pin means asserted. The line can be configured as
/// active-high (default) or active-low.
pub struct WakeLine<P> {
    pin: P,
    /// If false, asserted = pin LOW
    active_high: bool,
}

impl<P: OutputPin> WakeLine<P> {
    /// Create a new wake line
    pub fn new(pin: P, active_high: bool) -> Self {
        Self { pin, active_high }
    }

    /// Physical pin
    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> OutputPin for WakeLine<P> {
    fn set_high(&mut self) {
        self.pin.set_state(self.active_high);
    }

    fn set_low(&mut self) {
        self.pin.set_state(!self.active_high);
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high() == self.active_high
    }
}
