//! Line-oriented console transport
//!
//! One request per line:
//!
//! - `<node>` reads the node
//! - `<node> <value>` writes `<value>` to the node
//!
//! Replies are the read text, `ok`, or `err <reason>`.

use core::fmt::Write;

use crate::command::ControlError;
use crate::node::Node;
use crate::status::StatusText;

/// Longest accepted request line, excluding the terminator
pub const MAX_LINE_LEN: usize = 32;

/// A parsed console request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    /// Read a node
    Read(Node),
    /// Write raw bytes to a node
    Write(Node, &'a [u8]),
}

/// Parse one request line
pub fn parse_request(line: &str) -> Result<Request<'_>, ControlError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ControlError::Empty);
    }

    match line.split_once(char::is_whitespace) {
        Some((name, value)) => {
            let node = Node::from_name(name).ok_or(ControlError::UnknownNode)?;
            Ok(Request::Write(node, value.trim_start().as_bytes()))
        }
        None => {
            let node = Node::from_name(line).ok_or(ControlError::UnknownNode)?;
            Ok(Request::Read(node))
        }
    }
}

/// Reply for a successful write
pub fn ok_reply() -> StatusText {
    let mut out = StatusText::new();
    let _ = out.push_str("ok\n");
    out
}

/// Reply for a rejected request
pub fn error_reply(error: ControlError) -> StatusText {
    let mut out = StatusText::new();
    let _ = writeln!(out, "err {}", error.reason());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_request() {
        assert_eq!(parse_request("asleep"), Ok(Request::Read(Node::Asleep)));
        assert_eq!(parse_request("  proto \r"), Ok(Request::Read(Node::Proto)));
    }

    #[test]
    fn test_write_request() {
        assert_eq!(
            parse_request("proto 1"),
            Ok(Request::Write(Node::Proto, b"1"))
        );
        assert_eq!(
            parse_request("btwake   0"),
            Ok(Request::Write(Node::BtWake, b"0"))
        );
    }

    #[test]
    fn test_bad_requests() {
        assert_eq!(parse_request(""), Err(ControlError::Empty));
        assert_eq!(parse_request("   "), Err(ControlError::Empty));
        assert_eq!(parse_request("sleep 1"), Err(ControlError::UnknownNode));
        assert_eq!(parse_request("wake"), Err(ControlError::UnknownNode));
    }

    #[test]
    fn test_replies() {
        assert_eq!(ok_reply().as_str(), "ok\n");
        assert_eq!(
            error_reply(ControlError::ReadOnly).as_str(),
            "err read-only\n"
        );
    }
}
