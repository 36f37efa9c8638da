//! Wake lock abstraction

/// Suspend-blocking primitive
///
/// The coordinator only ever takes timed holds, so the lock can never be
/// leaked across a protocol stop.
pub trait WakeLock {
    /// Block system suspend for at least `duration_ms` from now
    ///
    /// A shorter hold never shortens an existing longer one.
    fn hold_for(&mut self, duration_ms: u32);

    /// Drop any pending hold
    fn release(&mut self);
}
