//! Configuration type definitions

use bluesleep_hal::Edge;

/// Default idle interval before the link may sleep
pub const DEFAULT_TX_IDLE_INTERVAL_MS: u32 = 5_000;

/// Configuration validation and parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Section header other than `[bluesleep]`
    InvalidSection,
    /// Key outside a section or not recognized
    UnknownKey,
    /// Value does not parse for its key
    InvalidValue,
    /// Idle interval must be non-zero
    ZeroInterval,
    /// Activity wake lock must cover one full idle interval
    WakeLockTooShort,
    /// Wake settle delay above [`SleepConfig::MAX_WAKE_SETTLE_MS`]
    SettleTooLong,
}

/// Coordinator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SleepConfig {
    /// Idle timer interval (ms)
    pub tx_idle_interval_ms: u32,
    /// Wake lock held on start, host wake and `btwrite` (ms)
    pub activity_wake_lock_ms: u32,
    /// Wake lock held around going to sleep (ms)
    pub sleep_wake_lock_ms: u32,
    /// Wake lock held after a controller-initiated resume (ms)
    pub resume_wake_lock_ms: u32,
    /// Delay after asserting the wake line before traffic (ms)
    pub wake_settle_ms: u32,
    /// Host-wake interrupt edge
    pub host_wake_edge: Edge,
    /// Wake line is asserted when driven high
    pub ext_wake_active_high: bool,
    /// Host-wake line is asserted when it reads high
    pub host_wake_active_high: bool,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            tx_idle_interval_ms: DEFAULT_TX_IDLE_INTERVAL_MS,
            activity_wake_lock_ms: DEFAULT_TX_IDLE_INTERVAL_MS + 1_000,
            sleep_wake_lock_ms: 500,
            resume_wake_lock_ms: 2_000,
            wake_settle_ms: 10,
            host_wake_edge: Edge::Rising,
            ext_wake_active_high: true,
            host_wake_active_high: true,
        }
    }
}

impl SleepConfig {
    /// Upper bound for [`SleepConfig::wake_settle_ms`]
    pub const MAX_WAKE_SETTLE_MS: u32 = 100;

    /// Check the configuration for values the coordinator cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tx_idle_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.activity_wake_lock_ms < self.tx_idle_interval_ms {
            return Err(ConfigError::WakeLockTooShort);
        }
        if self.wake_settle_ms > Self::MAX_WAKE_SETTLE_MS {
            return Err(ConfigError::SettleTooLong);
        }
        Ok(())
    }
}
