//! Host-wake line shared with the interrupt task
//!
//! On the target the host-wake GPIO is owned by a dedicated task that
//! awaits edges, while the coordinator lives behind a lock in another task.
//! [`HostWakeShared`] is the meeting point: the task publishes the raw pin
//! level and reads back which edge it should wait for; the coordinator sees
//! the same state through a [`HostWakeLine`].
//!
//! Levels and edges on the coordinator side are logical (high = asserted).
//! The line translates them for active-low boards.

use bluesleep_hal::{Edge, InputPin, InterruptPin};
use core::convert::Infallible;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicU8, Ordering};

const IRQ_DISABLED: u8 = 0;
const IRQ_RISING: u8 = 1;
const IRQ_FALLING: u8 = 2;
const IRQ_BOTH: u8 = 3;

fn encode(edge: Edge) -> u8 {
    match edge {
        Edge::Rising => IRQ_RISING,
        Edge::Falling => IRQ_FALLING,
        Edge::Both => IRQ_BOTH,
    }
}

fn decode(raw: u8) -> Option<Edge> {
    match raw {
        IRQ_RISING => Some(Edge::Rising),
        IRQ_FALLING => Some(Edge::Falling),
        IRQ_BOTH => Some(Edge::Both),
        _ => None,
    }
}

fn invert(edge: Edge) -> Edge {
    match edge {
        Edge::Rising => Edge::Falling,
        Edge::Falling => Edge::Rising,
        Edge::Both => Edge::Both,
    }
}

/// State shared between the host-wake task and the coordinator
pub struct HostWakeShared<M: RawMutex> {
    raw_high: AtomicBool,
    irq: AtomicU8,
    reconfigured: Signal<M, ()>,
}

impl<M: RawMutex> HostWakeShared<M> {
    /// Create with the pin low and the interrupt disabled
    pub const fn new() -> Self {
        Self {
            raw_high: AtomicBool::new(false),
            irq: AtomicU8::new(IRQ_DISABLED),
            reconfigured: Signal::new(),
        }
    }

    /// Publish the physical pin level
    pub fn record_level(&self, raw_high: bool) {
        self.raw_high.store(raw_high, Ordering::Release);
    }

    /// Last published physical level
    pub fn raw_level(&self) -> bool {
        self.raw_high.load(Ordering::Acquire)
    }

    /// Physical edge the task should wait for, `None` when disabled
    pub fn armed_edge(&self) -> Option<Edge> {
        decode(self.irq.load(Ordering::Acquire))
    }

    /// Whether the interrupt is currently enabled
    pub fn is_armed(&self) -> bool {
        self.armed_edge().is_some()
    }

    /// Wait until the interrupt is enabled, disabled, or re-targeted
    pub async fn wait_reconfigured(&self) {
        self.reconfigured.wait().await
    }

    fn set_irq(&self, raw: u8) {
        let previous = self.irq.swap(raw, Ordering::AcqRel);
        if previous != raw {
            self.reconfigured.signal(());
        }
    }

    #[cfg(test)]
    fn take_reconfigured(&self) -> bool {
        self.reconfigured.try_take().is_some()
    }
}

impl<M: RawMutex> Default for HostWakeShared<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Coordinator-side view of the host-wake line
pub struct HostWakeLine<'a, M: RawMutex> {
    shared: &'a HostWakeShared<M>,
    active_high: bool,
}

impl<'a, M: RawMutex> HostWakeLine<'a, M> {
    pub fn new(shared: &'a HostWakeShared<M>, active_high: bool) -> Self {
        Self {
            shared,
            active_high,
        }
    }
}

impl<M: RawMutex> InputPin for HostWakeLine<'_, M> {
    fn is_high(&self) -> bool {
        self.shared.raw_level() == self.active_high
    }
}

impl<M: RawMutex> InterruptPin for HostWakeLine<'_, M> {
    // The task always accepts a new edge
    type Error = Infallible;

    fn enable_interrupt(&mut self, edge: Edge) -> Result<(), Self::Error> {
        let physical = if self.active_high { edge } else { invert(edge) };
        self.shared.set_irq(encode(physical));
        Ok(())
    }

    fn disable_interrupt(&mut self) {
        self.shared.set_irq(IRQ_DISABLED);
    }
}
