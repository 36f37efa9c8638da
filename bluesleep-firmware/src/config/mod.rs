//! Configuration loading
//!
//! The sleep configuration is embedded at build time from
//! `bluesleep.toml` and parsed with the core's TOML subset parser.

use defmt::*;

use bluesleep_core::config::parse_config;
use bluesleep_core::SleepConfig;

/// Parse the embedded configuration, falling back to defaults
///
/// build.rs runs the same parser over the file, so the fallback only
/// triggers on a firmware built without its build script.
pub fn load_config(embedded: &str) -> SleepConfig {
    match parse_config(embedded) {
        Ok(config) => {
            info!(
                "Sleep config: idle={}ms, settle={}ms, edge={:?}",
                config.tx_idle_interval_ms, config.wake_settle_ms, config.host_wake_edge
            );
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            warn!("Using default sleep configuration");
            SleepConfig::default()
        }
    }
}
