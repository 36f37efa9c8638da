//! Host-side mock hardware
//!
//! Plain structs that record what the coordinator did to them. Tests
//! inspect the fields directly.

use crate::gpio::{Edge, InputPin, InterruptPin, OutputPin};
use crate::timer::OneShotTimer;
use crate::uart::UartPort;
use crate::wakelock::WakeLock;

/// Mock GPIO output
#[derive(Debug, Default)]
pub struct MockPin {
    /// Current level
    pub high: bool,
    /// Number of level writes
    pub writes: u32,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
        self.writes += 1;
    }

    fn set_low(&mut self) {
        self.high = false;
        self.writes += 1;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Error raised by [`MockHostWake`] when told to refuse registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockIrqError;

/// Mock host-wake input with an interrupt
#[derive(Debug, Default)]
pub struct MockHostWake {
    /// Sampled level
    pub level: bool,
    /// Registered edge, if any
    pub irq: Option<Edge>,
    /// Refuse the next registrations
    pub refuse_irq: bool,
}

impl InputPin for MockHostWake {
    fn is_high(&self) -> bool {
        self.level
    }
}

impl InterruptPin for MockHostWake {
    type Error = MockIrqError;

    fn enable_interrupt(&mut self, edge: Edge) -> Result<(), Self::Error> {
        if self.refuse_irq {
            return Err(MockIrqError);
        }
        self.irq = Some(edge);
        Ok(())
    }

    fn disable_interrupt(&mut self) {
        self.irq = None;
    }
}

/// Mock one-shot timer
#[derive(Debug, Default)]
pub struct MockTimer {
    /// Pending expiry, in milliseconds from the last arm
    pub armed_ms: Option<u32>,
    /// Number of arm calls
    pub arms: u32,
    /// Number of cancel calls
    pub cancels: u32,
}

impl OneShotTimer for MockTimer {
    fn arm(&mut self, after_ms: u32) {
        self.armed_ms = Some(after_ms);
        self.arms += 1;
    }

    fn cancel(&mut self) {
        self.armed_ms = None;
        self.cancels += 1;
    }

    fn is_armed(&self) -> bool {
        self.armed_ms.is_some()
    }
}

/// Mock wake lock
#[derive(Debug, Default)]
pub struct MockWakeLock {
    /// Duration of the most recent hold
    pub last_hold_ms: Option<u32>,
    /// Number of holds taken
    pub holds: u32,
}

impl WakeLock for MockWakeLock {
    fn hold_for(&mut self, duration_ms: u32) {
        self.last_hold_ms = Some(duration_ms);
        self.holds += 1;
    }

    fn release(&mut self) {
        self.last_hold_ms = None;
    }
}

/// Mock UART port
#[derive(Debug)]
pub struct MockUart {
    /// Line number
    pub line: u8,
    /// Transmitter drained
    pub tx_empty: bool,
    /// Port powered
    pub powered: bool,
    /// Number of power-down requests
    pub power_downs: u32,
}

impl MockUart {
    /// Create a powered, drained port on the given line
    pub fn new(line: u8) -> Self {
        Self {
            line,
            tx_empty: true,
            powered: true,
            power_downs: 0,
        }
    }
}

impl UartPort for MockUart {
    fn line(&self) -> u8 {
        self.line
    }

    fn tx_empty(&self) -> bool {
        self.tx_empty
    }

    fn set_power(&mut self, on: bool) {
        if !on {
            self.power_downs += 1;
        }
        self.powered = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_state_uses_level_writes() {
        let mut pin = MockPin::default();
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(!pin.is_set_high());
        assert_eq!(pin.writes, 2);
    }

    #[test]
    fn test_host_wake_refuses_irq() {
        let mut pin = MockHostWake {
            refuse_irq: true,
            ..Default::default()
        };
        assert_eq!(pin.enable_interrupt(Edge::Rising), Err(MockIrqError));
        assert_eq!(pin.irq, None);

        pin.refuse_irq = false;
        assert_eq!(pin.enable_interrupt(Edge::Rising), Ok(()));
        assert_eq!(pin.irq, Some(Edge::Rising));
        assert!(pin.is_low());
    }

    #[test]
    fn test_timer_rearm_replaces_deadline() {
        let mut timer = MockTimer::default();
        timer.arm(5000);
        timer.arm(100);
        assert_eq!(timer.armed_ms, Some(100));
        timer.cancel();
        assert!(!timer.is_armed());
    }
}
