//! Link state machine
//!
//! The link is always in exactly one of three states, derived from the
//! coordinator flags. Events drive the coordinator; the coordinator reports
//! each step as a [`Transition`].

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{LinkState, Transition};
