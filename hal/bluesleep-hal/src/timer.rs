//! One-shot timer abstraction

/// A single re-armable one-shot timer
///
/// Expiry is delivered on a deferred context by the implementation (a task,
/// a work queue); the trait only covers arming. Arming an already armed
/// timer replaces the previous deadline.
pub trait OneShotTimer {
    /// Arm the timer to fire once after `after_ms` milliseconds
    fn arm(&mut self, after_ms: u32);

    /// Cancel a pending expiry
    ///
    /// After this returns the expiry must not be delivered.
    fn cancel(&mut self);

    /// Check if an expiry is pending
    fn is_armed(&self) -> bool;
}
