//! Bluesleep control/status protocol
//!
//! This crate defines the small textual ABI used to observe and drive the
//! sleep/wake coordinator. It mirrors a directory of pseudo-files:
//!
//! ```text
//! bluetooth/sleep/
//! ├── proto      rw   "proto: 1"       0 = stop, 1 = start
//! ├── lpm        rw   "lpm: 1"         alias of proto
//! ├── btwake     rw   "btwake:1"       drive the wake line directly
//! ├── btwrite    rw   "... btwrite:1"  1 = treat as outgoing data
//! ├── hostwake   ro   "hostwake: 0"
//! └── asleep     ro   "asleep: 0"
//! ```
//!
//! Only the first byte of a write is significant. There is no binary wire
//! format; the console transport in [`console`] wraps the same nodes in a
//! line-oriented request/reply syntax.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod console;
pub mod node;
pub mod status;

pub use command::{parse_write, Command, ControlError};
pub use console::{error_reply, ok_reply, parse_request, Request, MAX_LINE_LEN};
pub use node::Node;
pub use status::{render, LinkStatus, StatusText, MAX_STATUS_LEN};
