//! Control node names

/// A control/status node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Node {
    /// Sleep protocol running
    Proto,
    /// Low-power mode, same semantics as [`Node::Proto`]
    Lpm,
    /// Wake line level
    BtWake,
    /// Wake line level; writes count as outgoing data
    BtWrite,
    /// Host-wake line level
    HostWake,
    /// Link asleep
    Asleep,
}

impl Node {
    /// All nodes, in directory order
    pub const ALL: [Node; 6] = [
        Node::BtWake,
        Node::HostWake,
        Node::Proto,
        Node::Asleep,
        Node::Lpm,
        Node::BtWrite,
    ];

    /// File name of this node
    pub fn name(&self) -> &'static str {
        match self {
            Node::Proto => "proto",
            Node::Lpm => "lpm",
            Node::BtWake => "btwake",
            Node::BtWrite => "btwrite",
            Node::HostWake => "hostwake",
            Node::Asleep => "asleep",
        }
    }

    /// Look up a node by file name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|node| node.name() == name)
    }

    /// Check if the node accepts writes
    pub fn is_writable(&self) -> bool {
        !matches!(self, Node::HostWake | Node::Asleep)
    }
}
