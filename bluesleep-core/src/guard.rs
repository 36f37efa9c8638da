//! Single-owner open guard
//!
//! Only one protocol session may be active. The guard starts with one
//! slot; acquiring takes it, releasing returns it. Extra releases saturate
//! instead of minting a second slot.

/// Saturating open/close counter
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OpenGuard {
    available: u8,
}

impl Default for OpenGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenGuard {
    /// Number of concurrent owners allowed
    pub const SLOTS: u8 = 1;

    /// Create a guard with its slot free
    pub const fn new() -> Self {
        Self {
            available: Self::SLOTS,
        }
    }

    /// Take the slot
    ///
    /// Returns false, leaving the guard unchanged, if it is already held.
    pub fn acquire(&mut self) -> bool {
        if self.available == 0 {
            return false;
        }
        self.available -= 1;
        true
    }

    /// Return the slot
    pub fn release(&mut self) {
        self.available = (self.available + 1).min(Self::SLOTS);
    }

    /// Check if the slot is taken
    pub fn is_held(&self) -> bool {
        self.available == 0
    }
}
