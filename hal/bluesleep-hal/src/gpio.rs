//! GPIO pin abstractions
//!
//! Pin direction is fixed by type: an [`OutputPin`] drives a line, an
//! [`InputPin`] samples one. The host-wake line additionally needs an
//! edge-triggered interrupt, see [`InterruptPin`].

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Interrupt trigger edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high transition
    #[default]
    Rising,
    /// High to low transition
    Falling,
    /// Either transition
    Both,
}

/// Input pin that can raise an edge-triggered interrupt
///
/// Registration may fail (line already claimed, controller out of
/// vectors); the caller decides whether that is fatal.
pub trait InterruptPin: InputPin {
    /// Error returned when the interrupt cannot be registered
    type Error: core::fmt::Debug;

    /// Register and enable the interrupt for the given edge
    fn enable_interrupt(&mut self, edge: Edge) -> Result<(), Self::Error>;

    /// Disable and release the interrupt
    ///
    /// Must be a no-op when no interrupt is registered.
    fn disable_interrupt(&mut self);
}
