//! Deadline wake lock
//!
//! Keeps the system out of low-power modes until a deadline. Overlapping
//! holds extend the deadline and never shorten it.

use bluesleep_hal::WakeLock;

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
}

/// Wake lock backed by a deadline on a [`Clock`]
pub struct DeadlineWakeLock<C> {
    clock: C,
    deadline_ms: Option<u64>,
}

impl<C: Clock> DeadlineWakeLock<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            deadline_ms: None,
        }
    }

    /// Whether the lock is held right now
    pub fn is_held(&self) -> bool {
        self.remaining_ms() > 0
    }

    /// Time left on the current hold, zero if not held
    pub fn remaining_ms(&self) -> u64 {
        match self.deadline_ms {
            Some(deadline) => deadline.saturating_sub(self.clock.now_ms()),
            None => 0,
        }
    }
}

impl<C: Clock> WakeLock for DeadlineWakeLock<C> {
    fn hold_for(&mut self, duration_ms: u32) {
        let until = self.clock.now_ms().saturating_add(u64::from(duration_ms));
        self.deadline_ms = Some(match self.deadline_ms {
            Some(current) if current > until => current,
            _ => until,
        });
    }

    fn release(&mut self) {
        self.deadline_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    impl Clock for &Cell<u64> {
        fn now_ms(&self) -> u64 {
            self.get()
        }
    }

    #[test]
    fn test_not_held_initially() {
        let now = Cell::new(0);
        let lock = DeadlineWakeLock::new(&now);
        assert!(!lock.is_held());
        assert_eq!(lock.remaining_ms(), 0);
    }

    #[test]
    fn test_hold_expires() {
        let now = Cell::new(1_000);
        let mut lock = DeadlineWakeLock::new(&now);
        lock.hold_for(500);
        assert!(lock.is_held());
        assert_eq!(lock.remaining_ms(), 500);

        now.set(1_499);
        assert!(lock.is_held());
        now.set(1_500);
        assert!(!lock.is_held());
    }

    #[test]
    fn test_shorter_hold_does_not_shorten() {
        let now = Cell::new(0);
        let mut lock = DeadlineWakeLock::new(&now);
        lock.hold_for(6_000);
        now.set(100);
        lock.hold_for(500);
        assert_eq!(lock.remaining_ms(), 5_900);
    }

    #[test]
    fn test_longer_hold_extends() {
        let now = Cell::new(0);
        let mut lock = DeadlineWakeLock::new(&now);
        lock.hold_for(500);
        now.set(400);
        lock.hold_for(2_000);
        assert_eq!(lock.remaining_ms(), 2_000);
    }

    #[test]
    fn test_release() {
        let now = Cell::new(0);
        let mut lock = DeadlineWakeLock::new(&now);
        lock.hold_for(6_000);
        lock.release();
        assert!(!lock.is_held());
    }
}
