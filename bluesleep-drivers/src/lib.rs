//! Hardware adapters for the sleep/wake coordinator
//!
//! This crate sits between `bluesleep-core` and a concrete board:
//!
//! - Polarity-aware wake line and `embedded-hal` output adapter
//! - Host-wake line shared between an interrupt task and the coordinator
//! - Deadline-based wake lock
//! - Lock-shared coordinator and control-surface dispatch

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod control;
pub mod gpio;
pub mod host_wake;
pub mod shared;
pub mod wakelock;

pub use gpio::{EhOutput, WakeLine};
pub use host_wake::{HostWakeLine, HostWakeShared};
pub use shared::SharedCoordinator;
pub use wakelock::{Clock, DeadlineWakeLock};
