//! Bluesleep Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the sleep/wake coordinator talks
//! to. Chip-specific code (the RP2040 firmware, host mocks) implements them;
//! the coordinator in `bluesleep-core` only ever sees these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  bluesleep-firmware / bluesleep-drivers │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bluesleep-core (Coordinator)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bluesleep-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::InterruptPin`] - wake lines
//! - [`timer::OneShotTimer`] - the idle timer
//! - [`wakelock::WakeLock`] - bounded suspend blocking
//! - [`uart::UartPort`] - the HCI UART the controller is attached to

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod timer;
pub mod uart;
pub mod wakelock;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use gpio::{Edge, InputPin, InterruptPin, OutputPin};
pub use timer::OneShotTimer;
pub use uart::UartPort;
pub use wakelock::WakeLock;
