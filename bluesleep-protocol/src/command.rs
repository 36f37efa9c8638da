//! Write parsing
//!
//! Turns the raw bytes written to a node into a [`Command`]. Parsing never
//! touches coordinator state, so a rejected write cannot change anything.

use crate::node::Node;

/// Errors returned by the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Zero-length write
    Empty,
    /// First byte is not `0` or `1`
    InvalidValue,
    /// Node does not accept writes
    ReadOnly,
    /// No node with that name
    UnknownNode,
    /// Coordinator refused the request (busy, no interrupt line)
    Unavailable,
}

impl ControlError {
    /// Short reason string for console replies
    pub fn reason(&self) -> &'static str {
        match self {
            ControlError::Empty => "empty",
            ControlError::InvalidValue => "invalid value",
            ControlError::ReadOnly => "read-only",
            ControlError::UnknownNode => "unknown node",
            ControlError::Unavailable => "unavailable",
        }
    }
}

/// A validated write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Start (`true`) or stop (`false`) the sleep protocol
    SetProtocol(bool),
    /// Assert or deassert the wake line directly
    SetWakeLine(bool),
    /// `true` counts as outgoing data, `false` deasserts the wake line
    BtWrite(bool),
}

/// Parse a write to `node`
pub fn parse_write(node: Node, input: &[u8]) -> Result<Command, ControlError> {
    if !node.is_writable() {
        return Err(ControlError::ReadOnly);
    }

    let level = match input.first() {
        None => return Err(ControlError::Empty),
        Some(b'0') => false,
        Some(b'1') => true,
        Some(_) => return Err(ControlError::InvalidValue),
    };

    Ok(match node {
        Node::Proto | Node::Lpm => Command::SetProtocol(level),
        Node::BtWake => Command::SetWakeLine(level),
        Node::BtWrite => Command::BtWrite(level),
        Node::HostWake | Node::Asleep => return Err(ControlError::ReadOnly),
    })
}
