//! Control surface dispatch
//!
//! Maps node reads and writes onto the shared coordinator. Writes are
//! parsed before the lock is taken; a rejected write never touches state.

use bluesleep_core::{Event, Response, StartError};
use bluesleep_hal::{InterruptPin, OneShotTimer, OutputPin, UartPort, WakeLock};
use bluesleep_protocol::{
    error_reply, ok_reply, parse_request, parse_write, render, Command, ControlError, Node,
    Request, StatusText,
};
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::shared::SharedCoordinator;

/// Coordinator event for a validated write
pub fn command_event(command: Command) -> Event {
    match command {
        Command::SetProtocol(true) => Event::Start,
        Command::SetProtocol(false) => Event::Stop,
        Command::SetWakeLine(active) => Event::SetWakeLine(active),
        Command::BtWrite(active) => Event::BtWrite(active),
    }
}

impl<M, W, H, T, L, U> SharedCoordinator<M, W, H, T, L, U>
where
    M: RawMutex,
    W: OutputPin,
    H: InterruptPin,
    T: OneShotTimer,
    L: WakeLock,
    U: UartPort,
{
    /// Read a node
    pub fn read_node(&self, node: Node) -> StatusText {
        render(node, &self.status())
    }

    /// Write a node
    pub fn write_node(&self, node: Node, input: &[u8]) -> Result<Response, ControlError> {
        let command = parse_write(node, input)?;
        self.handle(command_event(command))
            .map_err(|_: StartError| ControlError::Unavailable)
    }

    /// Serve one console request line
    ///
    /// Returns the reply text and the response of a successful write, so
    /// the caller can honor the wake settle delay and schedule deferred work.
    pub fn serve_console_line(&self, line: &str) -> (StatusText, Option<Response>) {
        match parse_request(line) {
            Ok(Request::Read(node)) => (self.read_node(node), None),
            Ok(Request::Write(node, value)) => match self.write_node(node, value) {
                Ok(response) => (ok_reply(), Some(response)),
                Err(e) => (error_reply(e), None),
            },
            Err(e) => (error_reply(e), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluesleep_core::{Coordinator, LinkState, SleepConfig};
    use bluesleep_hal::mock::{MockHostWake, MockPin, MockTimer, MockUart, MockWakeLock};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    type TestShared = SharedCoordinator<
        CriticalSectionRawMutex,
        MockPin,
        MockHostWake,
        MockTimer,
        MockWakeLock,
        MockUart,
    >;

    fn shared() -> TestShared {
        let s = SharedCoordinator::new(Coordinator::new(
            SleepConfig::default(),
            MockPin::default(),
            MockHostWake::default(),
            MockTimer::default(),
            MockWakeLock::default(),
        ));
        assert!(s.uart_open(MockUart::new(1)).is_ok());
        s
    }

    fn reply(s: &TestShared, line: &str) -> String {
        s.serve_console_line(line).0.as_str().to_owned()
    }

    #[test]
    fn test_proto_write_starts_and_stops() {
        let s = shared();
        assert_eq!(s.read_node(Node::Proto).as_str(), "proto: 0\n");

        assert!(s.write_node(Node::Proto, b"1").is_ok());
        assert_eq!(s.read_node(Node::Proto).as_str(), "proto: 1\n");
        assert_eq!(s.read_node(Node::Lpm).as_str(), "lpm: 1\n");

        assert!(s.write_node(Node::Lpm, b"0").is_ok());
        assert_eq!(s.state(), LinkState::Stopped);
    }

    #[test]
    fn test_rejected_write_changes_nothing() {
        let s = shared();
        assert_eq!(s.write_node(Node::Proto, b""), Err(ControlError::Empty));
        assert_eq!(
            s.write_node(Node::Proto, b"x"),
            Err(ControlError::InvalidValue)
        );
        assert_eq!(s.write_node(Node::Asleep, b"1"), Err(ControlError::ReadOnly));
        assert_eq!(s.state(), LinkState::Stopped);
        assert_eq!(s.lock(|c| c.wake_line().writes), 1);
    }

    #[test]
    fn test_start_failure_is_unavailable() {
        let s = shared();
        s.lock(|c| c.host_wake_mut().refuse_irq = true);
        assert_eq!(
            s.write_node(Node::Proto, b"1"),
            Err(ControlError::Unavailable)
        );
        assert_eq!(s.read_node(Node::Proto).as_str(), "proto: 0\n");
        assert_eq!(s.read_node(Node::BtWake).as_str(), "btwake:1\n");
    }

    #[test]
    fn test_btwake_write_drives_line() {
        let s = shared();
        assert!(s.write_node(Node::BtWake, b"0").is_ok());
        assert_eq!(s.read_node(Node::BtWake).as_str(), "btwake:0\n");
        assert!(!s.lock(|c| c.wake_line().high));

        let r = s.write_node(Node::BtWake, b"1").unwrap();
        assert!(r.wake_asserted);
        assert_eq!(s.read_node(Node::BtWake).as_str(), "btwake:1\n");
    }

    #[test]
    fn test_btwrite_holds_wake_lock() {
        let s = shared();
        assert!(s.write_node(Node::Proto, b"1").is_ok());
        s.lock(|c| assert_eq!(c.wake_lock().holds, 1));

        assert!(s.write_node(Node::BtWrite, b"1").is_ok());
        s.lock(|c| assert_eq!(c.wake_lock().holds, 2));
        assert_eq!(
            s.read_node(Node::BtWrite).as_str(),
            "ext_wake 1==>asserted, 0==>deasserted. btwrite:1\n"
        );
    }

    #[test]
    fn test_console_lines() {
        let s = shared();
        assert_eq!(reply(&s, "asleep"), "asleep: 0\n");
        assert_eq!(reply(&s, "proto 1"), "ok\n");
        assert_eq!(reply(&s, "proto"), "proto: 1\n");
        assert_eq!(reply(&s, "hostwake 1"), "err read-only\n");
        assert_eq!(reply(&s, "bogus"), "err unknown node\n");
        assert_eq!(reply(&s, "btwake 7"), "err invalid value\n");
        assert_eq!(reply(&s, ""), "err empty\n");
    }

    #[test]
    fn test_console_write_returns_response() {
        let s = shared();
        let (text, response) = s.serve_console_line("proto 1");
        assert_eq!(text.as_str(), "ok\n");
        let response = response.unwrap();
        assert_eq!(response.transition.to, LinkState::Awake);
    }

    #[test]
    fn test_command_events() {
        assert_eq!(command_event(Command::SetProtocol(true)), Event::Start);
        assert_eq!(command_event(Command::SetProtocol(false)), Event::Stop);
        assert_eq!(
            command_event(Command::BtWrite(true)),
            Event::BtWrite(true)
        );
    }
}
