//! Board-agnostic core logic for the Bluetooth sleep/wake coordinator
//!
//! This crate decides when the host may power down the UART to the
//! Bluetooth controller and wakes it on demand:
//!
//! - State flags and the single-owner open guard
//! - Link state machine (stopped / awake / asleep)
//! - Idle detection and deferred sleep work
//! - Configuration types and parsing
//!
//! Hardware is reached only through the `bluesleep-hal` traits, so the
//! whole crate runs on the host under test.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod coordinator;
pub mod flags;
pub mod guard;
pub mod state;

pub use config::{ConfigError, SleepConfig};
pub use coordinator::{Coordinator, Deferred, Response, StartError};
pub use state::{Event, LinkState, Transition};
