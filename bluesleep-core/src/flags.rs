//! Coordinator state flags

/// Bit set of coordinator state flags
///
/// The three bits are independent; [`crate::state::LinkState`] is derived
/// from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SleepFlags(u8);

impl SleepFlags {
    /// Sleep protocol running
    pub const PROTO: Self = Self(0x01);
    /// Outgoing data seen since the last timer expiry
    pub const TXDATA: Self = Self(0x02);
    /// Link asleep, UART powered down
    pub const ASLEEP: Self = Self(0x04);

    /// No flags set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw bit value
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Check if every bit of `other` is set
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set the bits of `other`
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the bits of `other`
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl core::ops::BitOr for SleepFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
