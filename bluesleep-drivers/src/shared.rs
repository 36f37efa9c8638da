//! Lock-shared coordinator
//!
//! The timer task, the deferred-work task, the data path and the control
//! surface all reach the same [`Coordinator`]. Each call runs inside one
//! blocking mutex section, so every check-and-set on the flags is atomic
//! with respect to the others. No method waits while holding the lock.

use core::cell::RefCell;

use bluesleep_core::{Coordinator, Event, LinkState, Response, StartError};
use bluesleep_hal::{InterruptPin, OneShotTimer, OutputPin, UartPort, WakeLock};
use bluesleep_protocol::LinkStatus;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// A [`Coordinator`] behind an embassy blocking mutex
pub struct SharedCoordinator<M: RawMutex, W, H, T, L, U> {
    inner: Mutex<M, RefCell<Coordinator<W, H, T, L, U>>>,
}

impl<M, W, H, T, L, U> SharedCoordinator<M, W, H, T, L, U>
where
    M: RawMutex,
    W: OutputPin,
    H: InterruptPin,
    T: OneShotTimer,
    L: WakeLock,
    U: UartPort,
{
    pub fn new(coordinator: Coordinator<W, H, T, L, U>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(coordinator)),
        }
    }

    /// Run `f` with exclusive access to the coordinator
    ///
    /// Must not be nested: calling back into the same instance from `f`
    /// panics on the inner borrow.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Coordinator<W, H, T, L, U>) -> R) -> R {
        self.inner.lock(|cell| f(&mut *cell.borrow_mut()))
    }

    /// Handle one event under the lock
    pub fn handle(&self, event: Event) -> Result<Response, StartError> {
        self.lock(|c| c.handle(event))
    }

    /// Outgoing-data hook for the transmit path
    ///
    /// Returns `true` if the wake line was just asserted and the caller
    /// should give the controller time to wake before sending.
    pub fn outgoing_data(&self) -> bool {
        self.lock(|c| {
            let was_active = c.ext_wake_active();
            c.outgoing_data();
            !was_active && c.ext_wake_active()
        })
    }

    /// Bind a UART port, handing it back if another is bound
    pub fn uart_open(&self, port: U) -> Result<(), U> {
        self.lock(|c| c.uart_open(port))
    }

    /// Unbind the UART port on `line`
    pub fn uart_close(&self, line: u8) -> Option<U> {
        self.lock(|c| c.uart_close(line))
    }

    pub fn state(&self) -> LinkState {
        self.lock(|c| c.state())
    }

    pub fn status(&self) -> LinkStatus {
        self.lock(|c| c.status())
    }

    /// Whether the idle timer or sleep work should still act
    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    pub fn into_inner(self) -> Coordinator<W, H, T, L, U> {
        self.inner.into_inner().into_inner()
    }
}
