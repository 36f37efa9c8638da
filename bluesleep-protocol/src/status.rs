//! Status rendering
//!
//! Read replies are fixed one-line strings so existing userspace scripts
//! that grep for `asleep: 1` keep working.

use core::fmt::Write;

use heapless::String;

use crate::node::Node;

/// Longest rendered status line
pub const MAX_STATUS_LEN: usize = 64;

/// Rendered status line
pub type StatusText = String<MAX_STATUS_LEN>;

/// Snapshot of everything the read nodes report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Sleep protocol running
    pub proto: bool,
    /// Software mirror of the wake line
    pub ext_wake_active: bool,
    /// Sampled host-wake line
    pub host_wake: bool,
    /// Link asleep
    pub asleep: bool,
}

/// Render the read reply for `node`
pub fn render(node: Node, status: &LinkStatus) -> StatusText {
    let mut out = StatusText::new();
    // Every format below is well under MAX_STATUS_LEN
    let _ = match node {
        Node::Proto => writeln!(out, "proto: {}", u8::from(status.proto)),
        Node::Lpm => writeln!(out, "lpm: {}", u8::from(status.proto)),
        Node::BtWake => writeln!(out, "btwake:{}", u8::from(status.ext_wake_active)),
        Node::BtWrite => writeln!(
            out,
            "ext_wake 1==>asserted, 0==>deasserted. btwrite:{}",
            u8::from(status.ext_wake_active)
        ),
        Node::HostWake => writeln!(out, "hostwake: {}", u8::from(status.host_wake)),
        Node::Asleep => writeln!(out, "asleep: {}", u8::from(status.asleep)),
    };
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_idle_link() {
        let status = LinkStatus::default();
        assert_eq!(render(Node::Proto, &status).as_str(), "proto: 0\n");
        assert_eq!(render(Node::Lpm, &status).as_str(), "lpm: 0\n");
        assert_eq!(render(Node::BtWake, &status).as_str(), "btwake:0\n");
        assert_eq!(render(Node::HostWake, &status).as_str(), "hostwake: 0\n");
        assert_eq!(render(Node::Asleep, &status).as_str(), "asleep: 0\n");
    }

    #[test]
    fn test_render_running_link() {
        let status = LinkStatus {
            proto: true,
            ext_wake_active: true,
            host_wake: true,
            asleep: false,
        };
        assert_eq!(render(Node::Proto, &status).as_str(), "proto: 1\n");
        assert_eq!(render(Node::BtWake, &status).as_str(), "btwake:1\n");
        assert_eq!(render(Node::HostWake, &status).as_str(), "hostwake: 1\n");
        assert_eq!(
            render(Node::BtWrite, &status).as_str(),
            "ext_wake 1==>asserted, 0==>deasserted. btwrite:1\n"
        );
    }

    #[test]
    fn test_every_node_fits() {
        let status = LinkStatus {
            proto: true,
            ext_wake_active: true,
            host_wake: true,
            asleep: true,
        };
        for node in Node::ALL {
            assert!(render(node, &status).ends_with('\n'));
        }
    }
}
