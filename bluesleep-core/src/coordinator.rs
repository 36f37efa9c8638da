//! Sleep/wake coordinator
//!
//! Decides when the host may power down the UART to the Bluetooth
//! controller and wakes it when either side has data to send.
//!
//! # Execution contexts
//!
//! The coordinator itself is single-threaded: every method takes `&mut
//! self`. Callers that reach it from several contexts (timer expiry,
//! host-wake deferred work, the outgoing data path) wrap it in one lock and
//! hold that lock for the duration of each call. No method blocks.
//!
//! Interrupt handlers must not call in here. They only note the event and
//! schedule [`Coordinator::on_host_wake_changed`] on a deferred context.
//!
//! # Idle detection
//!
//! `TXDATA` is set on every outgoing-data notification and cleared on every
//! timer expiry. An expiry that finds it already clear means the whole
//! interval was silent, so the wake line is dropped and sleep work is
//! scheduled. A single byte restarts the full interval.

use bluesleep_hal::{InterruptPin, OneShotTimer, OutputPin, UartPort, WakeLock};
use bluesleep_protocol::LinkStatus;

use crate::config::SleepConfig;
use crate::flags::SleepFlags;
use crate::guard::OpenGuard;
use crate::state::{Event, LinkState, Transition};

/// Errors returned when starting the sleep protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartError {
    /// Another session owns the coordinator
    Busy,
    /// Host-wake interrupt could not be registered
    ///
    /// The protocol stays stopped with the wake line asserted, so the
    /// controller keeps running without low-power support.
    HostWakeIrq,
}

/// Work the caller must schedule on the deferred context
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Deferred {
    /// Nothing to schedule
    Nothing,
    /// Run [`Coordinator::run_sleep_work`]
    SleepWork,
}

/// Result of handling one event
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    /// State before and after the event
    pub transition: Transition,
    /// Follow-up work for the deferred context
    pub deferred: Deferred,
    /// Wake line went from deasserted to asserted
    pub wake_asserted: bool,
}

impl Response {
    /// Event to post back to the deferred context, if any
    pub fn deferred_event(&self) -> Option<Event> {
        match self.deferred {
            Deferred::Nothing => None,
            Deferred::SleepWork => Some(Event::SleepWork),
        }
    }
}

/// Bluetooth UART sleep/wake coordinator
///
/// # Type parameters
/// - `W`: wake line output (`ext_wake`)
/// - `H`: host-wake input with interrupt
/// - `T`: idle timer
/// - `L`: wake lock
/// - `U`: UART port, bound at runtime
pub struct Coordinator<W, H, T, L, U> {
    config: SleepConfig,
    flags: SleepFlags,
    guard: OpenGuard,
    ext_wake: W,
    /// Software mirror of the wake line
    ext_wake_active: bool,
    host_wake: H,
    timer: T,
    wake_lock: L,
    uart: Option<U>,
}

impl<W, H, T, L, U> Coordinator<W, H, T, L, U>
where
    W: OutputPin,
    H: InterruptPin,
    T: OneShotTimer,
    L: WakeLock,
    U: UartPort,
{
    /// Create a stopped coordinator
    ///
    /// Drives the wake line asserted so the controller stays awake until the
    /// protocol is started.
    pub fn new(config: SleepConfig, mut ext_wake: W, host_wake: H, timer: T, wake_lock: L) -> Self {
        ext_wake.set_high();
        Self {
            config,
            flags: SleepFlags::empty(),
            guard: OpenGuard::new(),
            ext_wake,
            ext_wake_active: true,
            host_wake,
            timer,
            wake_lock,
            uart: None,
        }
    }

    /// Current link state
    pub fn state(&self) -> LinkState {
        LinkState::from_flags(self.flags)
    }

    /// Raw state flags
    pub fn flags(&self) -> SleepFlags {
        self.flags
    }

    /// Active configuration
    pub fn config(&self) -> &SleepConfig {
        &self.config
    }

    /// Software mirror of the wake line
    pub fn ext_wake_active(&self) -> bool {
        self.ext_wake_active
    }

    /// Check if the single-owner guard is taken
    pub fn is_owned(&self) -> bool {
        self.guard.is_held()
    }

    /// Snapshot for the control surface
    pub fn status(&self) -> LinkStatus {
        LinkStatus {
            proto: self.flags.contains(SleepFlags::PROTO),
            ext_wake_active: self.ext_wake_active,
            host_wake: self.host_wake.is_high(),
            asleep: self.flags.contains(SleepFlags::ASLEEP),
        }
    }

    /// Wake line output
    pub fn wake_line(&self) -> &W {
        &self.ext_wake
    }

    /// Host-wake input
    pub fn host_wake(&self) -> &H {
        &self.host_wake
    }

    /// Host-wake input, mutably
    pub fn host_wake_mut(&mut self) -> &mut H {
        &mut self.host_wake
    }

    /// Idle timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Wake lock
    pub fn wake_lock(&self) -> &L {
        &self.wake_lock
    }

    /// Bound UART port
    pub fn uart(&self) -> Option<&U> {
        self.uart.as_ref()
    }

    /// Bound UART port, mutably
    pub fn uart_mut(&mut self) -> Option<&mut U> {
        self.uart.as_mut()
    }

    /// Check the sleep invariant
    ///
    /// While asleep the wake line must be deasserted and a UART bound.
    pub fn sleep_invariant_holds(&self) -> bool {
        !self.flags.contains(SleepFlags::ASLEEP) || (!self.ext_wake_active && self.uart.is_some())
    }

    /// Handle one event
    ///
    /// Single entry point for an event-processing task. Only
    /// [`Event::Start`] can fail.
    pub fn handle(&mut self, event: Event) -> Result<Response, StartError> {
        let from = self.state();
        let was_active = self.ext_wake_active;

        let deferred = match event {
            Event::Start => {
                self.start()?;
                Deferred::Nothing
            }
            Event::Stop => {
                self.stop();
                Deferred::Nothing
            }
            Event::SetWakeLine(active) => {
                self.set_wake_line(active);
                Deferred::Nothing
            }
            Event::BtWrite(active) => {
                self.bt_write(active);
                Deferred::Nothing
            }
            Event::OutgoingData => {
                self.outgoing_data();
                Deferred::Nothing
            }
            Event::TxTimerExpired => self.on_tx_timer_expired(),
            Event::HostWakeChanged => self.on_host_wake_changed(),
            Event::SleepWork => {
                self.run_sleep_work();
                Deferred::Nothing
            }
            Event::Resume { woken_by_bt } => {
                self.resume(woken_by_bt);
                Deferred::Nothing
            }
        };

        Ok(Response {
            transition: Transition {
                from,
                to: self.state(),
            },
            deferred,
            wake_asserted: !was_active && self.ext_wake_active,
        })
    }

    /// Start the sleep protocol
    ///
    /// Idempotent while running. On interrupt registration failure the
    /// timer is cancelled and the guard released before returning.
    pub fn start(&mut self) -> Result<(), StartError> {
        if self.flags.contains(SleepFlags::PROTO) {
            return Ok(());
        }

        if !self.guard.acquire() {
            return Err(StartError::Busy);
        }

        self.timer.arm(self.config.tx_idle_interval_ms);
        self.set_bt_wake(true);

        if self
            .host_wake
            .enable_interrupt(self.config.host_wake_edge)
            .is_err()
        {
            self.timer.cancel();
            self.guard.release();
            return Err(StartError::HostWakeIrq);
        }

        self.flags.insert(SleepFlags::PROTO);
        self.wake_lock.hold_for(self.config.activity_wake_lock_ms);
        Ok(())
    }

    /// Stop the sleep protocol
    ///
    /// Disables the interrupt source, then cancels the timer, then releases
    /// shared state. Leaves the wake line asserted and the UART powered.
    pub fn stop(&mut self) {
        if !self.flags.contains(SleepFlags::PROTO) {
            return;
        }

        self.host_wake.disable_interrupt();
        self.set_bt_wake(true);
        self.timer.cancel();
        self.flags.remove(SleepFlags::PROTO | SleepFlags::TXDATA);

        if self.flags.contains(SleepFlags::ASLEEP) {
            self.flags.remove(SleepFlags::ASLEEP);
            self.uart_power(true);
        }

        self.guard.release();
    }

    /// Outgoing data hook
    ///
    /// Called on the data path before bytes are handed to the UART.
    pub fn outgoing_data(&mut self) {
        self.flags.insert(SleepFlags::TXDATA);

        if self.ext_wake_active {
            return;
        }

        if self.flags.contains(SleepFlags::ASLEEP) {
            self.wakeup();
        } else {
            // Wake line dropped by the idle timer but sleep work has not
            // committed yet
            self.set_bt_wake(true);
            if self.flags.contains(SleepFlags::PROTO) {
                self.timer.arm(self.config.tx_idle_interval_ms);
            }
        }
    }

    /// Idle timer expiry
    pub fn on_tx_timer_expired(&mut self) -> Deferred {
        // Expiry raced with stop
        if !self.flags.contains(SleepFlags::PROTO) {
            return Deferred::Nothing;
        }

        let deferred = if self.flags.contains(SleepFlags::TXDATA) {
            self.timer.arm(self.config.tx_idle_interval_ms);
            Deferred::Nothing
        } else {
            self.set_bt_wake(false);
            Deferred::SleepWork
        };

        self.flags.remove(SleepFlags::TXDATA);
        deferred
    }

    /// Deferred half of the host-wake interrupt
    ///
    /// Both edges lead to the same sleep work; the work samples the line
    /// itself.
    pub fn on_host_wake_changed(&mut self) -> Deferred {
        if !self.flags.contains(SleepFlags::PROTO) {
            return Deferred::Nothing;
        }

        self.wake_lock.hold_for(self.config.activity_wake_lock_ms);
        Deferred::SleepWork
    }

    /// Deferred sleep work
    ///
    /// Commits to sleep when the preconditions hold and the transmitter has
    /// drained, retries after one interval when it has not, and otherwise
    /// makes sure the link is awake.
    pub fn run_sleep_work(&mut self) {
        if !self.flags.contains(SleepFlags::PROTO) {
            return;
        }

        if self.can_sleep() {
            if self.flags.contains(SleepFlags::ASLEEP) {
                self.wake_lock.hold_for(self.config.sleep_wake_lock_ms);
                return;
            }

            match self.uart.as_mut() {
                Some(uart) if uart.tx_empty() => {
                    self.flags.insert(SleepFlags::ASLEEP);
                    uart.set_power(false);
                    self.wake_lock.hold_for(self.config.sleep_wake_lock_ms);
                }
                _ => self.timer.arm(self.config.tx_idle_interval_ms),
            }
        } else if !self.ext_wake_active && !self.flags.contains(SleepFlags::ASLEEP) {
            self.set_bt_wake(true);
            self.timer.arm(self.config.tx_idle_interval_ms);
        } else {
            self.wakeup();
        }
    }

    /// Drive the wake line from the control surface
    ///
    /// Asserting while asleep wakes the link so the UART is never left
    /// gated behind an asserted wake line.
    pub fn set_wake_line(&mut self, active: bool) {
        if active && self.flags.contains(SleepFlags::ASLEEP) {
            self.wakeup();
        } else {
            self.set_bt_wake(active);
        }
    }

    /// `btwrite` node write
    pub fn bt_write(&mut self, active: bool) {
        if active {
            self.wake_lock.hold_for(self.config.activity_wake_lock_ms);
            self.outgoing_data();
        } else {
            self.set_wake_line(false);
        }
    }

    /// Bind a UART port
    ///
    /// Only one port can be bound; a second one is handed back.
    pub fn uart_open(&mut self, port: U) -> Result<(), U> {
        if self.uart.is_some() {
            return Err(port);
        }
        self.uart = Some(port);
        Ok(())
    }

    /// Unbind the UART port with the given line number
    ///
    /// A sleeping link is woken first so the port comes back powered.
    pub fn uart_close(&mut self, line: u8) -> Option<U> {
        if self.uart.as_ref().map(|u| u.line()) != Some(line) {
            return None;
        }
        self.wakeup();
        self.uart.take()
    }

    /// System resume hook
    pub fn resume(&mut self, woken_by_bt: bool) {
        if woken_by_bt {
            self.wake_lock.hold_for(self.config.resume_wake_lock_ms);
        }
    }

    /// Tear down and return the hardware
    pub fn release(mut self) -> (W, H, T, L, Option<U>) {
        self.stop();
        self.wake_lock.release();
        (
            self.ext_wake,
            self.host_wake,
            self.timer,
            self.wake_lock,
            self.uart,
        )
    }

    fn can_sleep(&self) -> bool {
        !self.ext_wake_active && self.host_wake.is_low() && self.uart.is_some()
    }

    fn wakeup(&mut self) {
        if !self.flags.contains(SleepFlags::ASLEEP) {
            return;
        }

        self.timer.arm(self.config.tx_idle_interval_ms);
        self.set_bt_wake(true);
        self.flags.remove(SleepFlags::ASLEEP);
        self.uart_power(true);
    }

    fn set_bt_wake(&mut self, active: bool) {
        if active == self.ext_wake_active {
            return;
        }
        self.ext_wake.set_state(active);
        self.ext_wake_active = active;
    }

    fn uart_power(&mut self, on: bool) {
        if let Some(uart) = self.uart.as_mut() {
            uart.set_power(on);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluesleep_hal::mock::{MockHostWake, MockPin, MockTimer, MockUart, MockWakeLock};
    use bluesleep_hal::Edge;
    use proptest::prelude::*;

    type TestCoordinator = Coordinator<MockPin, MockHostWake, MockTimer, MockWakeLock, MockUart>;

    const UART_LINE: u8 = 1;

    fn coordinator() -> TestCoordinator {
        Coordinator::new(
            SleepConfig::default(),
            MockPin::default(),
            MockHostWake::default(),
            MockTimer::default(),
            MockWakeLock::default(),
        )
    }

    /// Started coordinator with a drained UART bound
    fn running() -> TestCoordinator {
        let mut c = coordinator();
        assert!(c.uart_open(MockUart::new(UART_LINE)).is_ok());
        assert_eq!(c.start(), Ok(()));
        c
    }

    /// Drive a running coordinator into sleep via one silent interval
    fn asleep() -> TestCoordinator {
        let mut c = running();
        assert_eq!(c.on_tx_timer_expired(), Deferred::SleepWork);
        c.run_sleep_work();
        assert_eq!(c.state(), LinkState::Asleep);
        c
    }

    #[test]
    fn test_new_asserts_wake_line() {
        let c = coordinator();
        assert!(c.wake_line().high);
        assert!(c.ext_wake_active());
        assert_eq!(c.state(), LinkState::Stopped);
        assert!(!c.timer().is_armed());
        assert_eq!(c.config().wake_settle_ms, 10);
    }

    #[test]
    fn test_start_arms_timer_and_irq() {
        let c = running();
        assert_eq!(c.state(), LinkState::Awake);
        assert!(c.wake_line().high);
        assert_eq!(c.timer().armed_ms, Some(5_000));
        assert_eq!(c.host_wake().irq, Some(Edge::Rising));
        assert_eq!(c.wake_lock().last_hold_ms, Some(6_000));
        assert!(c.is_owned());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut c = running();
        assert_eq!(c.start(), Ok(()));
        assert_eq!(c.timer().arms, 1);
        assert!(c.is_owned());
    }

    #[test]
    fn test_irq_failure_degrades_to_wake_line_only() {
        let mut c = coordinator();
        c.host_wake_mut().refuse_irq = true;

        assert_eq!(c.start(), Err(StartError::HostWakeIrq));
        assert_eq!(c.state(), LinkState::Stopped);
        assert!(!c.timer().is_armed());
        assert!(!c.is_owned());
        assert!(c.wake_line().high);

        // Retry once the line is available again
        c.host_wake_mut().refuse_irq = false;
        assert_eq!(c.start(), Ok(()));
    }

    #[test]
    fn test_traffic_keeps_link_awake() {
        let mut c = running();
        c.outgoing_data();
        assert_eq!(c.on_tx_timer_expired(), Deferred::Nothing);
        assert_eq!(c.state(), LinkState::Awake);
        assert!(c.wake_line().high);
        assert_eq!(c.timer().arms, 2);
        assert!(!c.flags().contains(SleepFlags::TXDATA));
    }

    #[test]
    fn test_sleep_after_busy_transmitter() {
        let mut c = running();
        c.outgoing_data();

        // Traffic in the first interval, FIFO still draining
        c.uart_mut().unwrap().tx_empty = false;
        assert_eq!(c.on_tx_timer_expired(), Deferred::Nothing);
        assert_eq!(c.state(), LinkState::Awake);
        assert!(c.wake_line().high);
        assert!(c.timer().is_armed());
        assert_eq!(c.timer().arms, 2);

        // Silent interval with the FIFO drained
        c.uart_mut().unwrap().tx_empty = true;
        assert_eq!(c.on_tx_timer_expired(), Deferred::SleepWork);
        c.run_sleep_work();
        assert_eq!(c.state(), LinkState::Asleep);
        assert!(!c.wake_line().high);
        assert!(!c.uart().unwrap().powered);
        assert_eq!(c.wake_lock().last_hold_ms, Some(500));
        assert!(c.sleep_invariant_holds());
    }

    #[test]
    fn test_busy_fifo_defers_sleep() {
        let mut c = running();

        // Silent interval but the FIFO still holds bytes
        c.uart_mut().unwrap().tx_empty = false;
        assert_eq!(c.on_tx_timer_expired(), Deferred::SleepWork);
        c.run_sleep_work();
        assert_eq!(c.state(), LinkState::Awake);
        assert!(c.timer().is_armed());
        assert!(c.uart().unwrap().powered);

        // Drained by the next expiry
        c.uart_mut().unwrap().tx_empty = true;
        assert_eq!(c.on_tx_timer_expired(), Deferred::SleepWork);
        c.run_sleep_work();
        assert_eq!(c.state(), LinkState::Asleep);
        assert_eq!(c.uart().unwrap().power_downs, 1);
    }

    #[test]
    fn test_repeated_expiry_sleeps_once() {
        let mut c = running();
        for _ in 0..5 {
            if c.on_tx_timer_expired() == Deferred::SleepWork {
                c.run_sleep_work();
            }
        }
        assert_eq!(c.state(), LinkState::Asleep);
        assert_eq!(c.uart().unwrap().power_downs, 1);
    }

    #[test]
    fn test_no_sleep_without_uart() {
        let mut c = coordinator();
        assert_eq!(c.start(), Ok(()));
        assert_eq!(c.on_tx_timer_expired(), Deferred::SleepWork);
        c.run_sleep_work();

        // Wake line was dropped; sleep work puts it back and retries
        assert_eq!(c.state(), LinkState::Awake);
        assert!(c.wake_line().high);
        assert!(c.timer().is_armed());
    }

    #[test]
    fn test_no_sleep_while_host_wake_asserted() {
        let mut c = running();
        c.host_wake_mut().level = true;
        assert_eq!(c.on_tx_timer_expired(), Deferred::SleepWork);
        c.run_sleep_work();
        assert_eq!(c.state(), LinkState::Awake);
        assert!(c.wake_line().high);
    }

    #[test]
    fn test_outgoing_data_wakes_sleeping_link() {
        let mut c = asleep();
        c.outgoing_data();
        assert_eq!(c.state(), LinkState::Awake);
        assert!(c.wake_line().high);
        assert!(c.uart().unwrap().powered);
        assert_eq!(c.timer().armed_ms, Some(5_000));
        assert!(c.flags().contains(SleepFlags::TXDATA));
    }

    #[test]
    fn test_outgoing_data_before_sleep_commits() {
        let mut c = running();
        assert_eq!(c.on_tx_timer_expired(), Deferred::SleepWork);
        assert!(!c.wake_line().high);

        c.outgoing_data();
        assert!(c.wake_line().high);

        // Sleep work scheduled earlier finds the line asserted
        c.run_sleep_work();
        assert_eq!(c.state(), LinkState::Awake);
    }

    #[test]
    fn test_host_wake_wakes_sleeping_link() {
        let mut c = asleep();
        c.host_wake_mut().level = true;

        assert_eq!(c.on_host_wake_changed(), Deferred::SleepWork);
        assert_eq!(c.wake_lock().last_hold_ms, Some(6_000));
        c.run_sleep_work();

        assert_eq!(c.state(), LinkState::Awake);
        assert!(c.wake_line().high);
        assert!(c.uart().unwrap().powered);
        assert!(c.timer().is_armed());
    }

    #[test]
    fn test_stop_while_asleep_is_fail_safe() {
        let mut c = asleep();
        c.stop();

        assert_eq!(c.state(), LinkState::Stopped);
        assert!(c.wake_line().high);
        assert!(c.uart().unwrap().powered);
        assert!(!c.timer().is_armed());
        assert_eq!(c.host_wake().irq, None);
        assert!(!c.is_owned());
        assert_eq!(c.flags(), SleepFlags::empty());
    }

    #[test]
    fn test_late_deferred_work_after_stop_is_ignored() {
        let mut c = running();
        assert_eq!(c.on_tx_timer_expired(), Deferred::SleepWork);
        c.stop();

        c.run_sleep_work();
        assert_eq!(c.on_tx_timer_expired(), Deferred::Nothing);
        assert_eq!(c.on_host_wake_changed(), Deferred::Nothing);
        assert_eq!(c.state(), LinkState::Stopped);
        assert!(c.wake_line().high);
        assert!(c.uart().unwrap().powered);
    }

    #[test]
    fn test_set_wake_line_direct() {
        let mut c = coordinator();
        c.set_wake_line(false);
        assert!(!c.wake_line().high);
        assert!(!c.status().ext_wake_active);
        c.set_wake_line(true);
        assert!(c.wake_line().high);
    }

    #[test]
    fn test_assert_wake_line_while_asleep_wakes() {
        let mut c = asleep();
        c.set_wake_line(true);
        assert_eq!(c.state(), LinkState::Awake);
        assert!(c.uart().unwrap().powered);
        assert!(c.sleep_invariant_holds());
    }

    #[test]
    fn test_bt_write() {
        let mut c = asleep();
        let holds = c.wake_lock().holds;
        c.bt_write(true);
        assert_eq!(c.state(), LinkState::Awake);
        assert_eq!(c.wake_lock().holds, holds + 1);

        c.bt_write(false);
        assert!(!c.wake_line().high);
        assert_eq!(c.state(), LinkState::Awake);
    }

    #[test]
    fn test_uart_binding() {
        let mut c = coordinator();
        assert!(c.uart_open(MockUart::new(1)).is_ok());
        let rejected = c.uart_open(MockUart::new(2));
        assert_eq!(rejected.map_err(|u| u.line), Err(2));

        assert!(c.uart_close(2).is_none());
        assert_eq!(c.uart_close(1).map(|u| u.line), Some(1));
        assert!(c.uart().is_none());
    }

    #[test]
    fn test_uart_close_while_asleep_wakes() {
        let mut c = asleep();
        let port = c.uart_close(UART_LINE).unwrap();
        assert!(port.powered);
        assert_eq!(c.state(), LinkState::Awake);
        assert!(c.sleep_invariant_holds());
    }

    #[test]
    fn test_resume_hold() {
        let mut c = coordinator();
        c.resume(false);
        assert_eq!(c.wake_lock().holds, 0);
        c.resume(true);
        assert_eq!(c.wake_lock().last_hold_ms, Some(2_000));
    }

    #[test]
    fn test_status_snapshot() {
        let mut c = asleep();
        c.host_wake_mut().level = true;
        let status = c.status();
        assert!(status.proto);
        assert!(!status.ext_wake_active);
        assert!(status.host_wake);
        assert!(status.asleep);
    }

    #[test]
    fn test_handle_reports_transitions() {
        let mut c = coordinator();
        assert!(c.uart_open(MockUart::new(UART_LINE)).is_ok());

        let r = c.handle(Event::Start).unwrap();
        assert_eq!(r.transition.from, LinkState::Stopped);
        assert_eq!(r.transition.to, LinkState::Awake);

        let r = c.handle(Event::TxTimerExpired).unwrap();
        assert_eq!(r.deferred, Deferred::SleepWork);
        assert_eq!(r.deferred_event(), Some(Event::SleepWork));
        assert!(!r.transition.is_change());

        let r = c.handle(Event::SleepWork).unwrap();
        assert!(r.transition.fell_asleep());
        assert_eq!(r.deferred_event(), None);

        let r = c.handle(Event::OutgoingData).unwrap();
        assert!(r.transition.woke_up());
        assert!(r.wake_asserted);

        let r = c.handle(Event::Stop).unwrap();
        assert_eq!(r.transition.to, LinkState::Stopped);
    }

    #[test]
    fn test_handle_propagates_start_error() {
        let mut c = coordinator();
        c.host_wake_mut().refuse_irq = true;
        assert_eq!(c.handle(Event::Start), Err(StartError::HostWakeIrq));
    }

    #[test]
    fn test_release_returns_hardware_safe() {
        let c = asleep();
        let (pin, host_wake, timer, wake_lock, uart) = c.release();
        assert!(pin.high);
        assert_eq!(host_wake.irq, None);
        assert!(!timer.is_armed());
        assert_eq!(wake_lock.last_hold_ms, None);
        assert!(uart.unwrap().powered);
    }

    fn any_event() -> impl Strategy<Value = Event> {
        prop_oneof![
            Just(Event::Start),
            Just(Event::Stop),
            any::<bool>().prop_map(Event::SetWakeLine),
            any::<bool>().prop_map(Event::BtWrite),
            Just(Event::OutgoingData),
            Just(Event::TxTimerExpired),
            Just(Event::HostWakeChanged),
            Just(Event::SleepWork),
            any::<bool>().prop_map(|woken_by_bt| Event::Resume { woken_by_bt }),
        ]
    }

    proptest! {
        #[test]
        fn prop_single_session_and_sleep_invariant(
            events in proptest::collection::vec((any_event(), any::<bool>(), any::<bool>()), 0..64)
        ) {
            let mut c = coordinator();
            prop_assert!(c.uart_open(MockUart::new(UART_LINE)).is_ok());

            for (event, host_wake, tx_empty) in events {
                c.host_wake_mut().level = host_wake;
                if let Some(uart) = c.uart_mut() {
                    uart.tx_empty = tx_empty;
                }

                let _ = c.handle(event);

                let running = c.flags().contains(SleepFlags::PROTO);
                prop_assert_eq!(running, c.is_owned());
                prop_assert_eq!(c.host_wake().irq.is_some(), running);
                prop_assert!(c.sleep_invariant_holds());
                prop_assert_eq!(c.wake_line().high, c.ext_wake_active());
                prop_assert_eq!(c.uart().map(|u| u.powered), Some(c.state().uart_powered()));
                if !running {
                    prop_assert!(!c.flags().contains(SleepFlags::ASLEEP));
                }
            }
        }
    }
}
