//! Configuration types
//!
//! Board-agnostic timing and polarity settings for the coordinator,
//! parsed from a small TOML subset.

pub mod parse;
pub mod types;

pub use parse::parse_config;
pub use types::*;
