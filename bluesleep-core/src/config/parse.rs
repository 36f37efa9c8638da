//! Minimal TOML parser for the coordinator configuration
//!
//! Handles only the subset `bluesleep.toml` uses. It does NOT support the
//! full TOML grammar.
//!
//! Supported features:
//! - A single `[bluesleep]` section, or `bluesleep.`-dotted keys at the root
//! - Key = value pairs (integer, boolean, string)
//! - Decimal, `0x`, `0o` and `0b` integers with an optional `+` sign
//! - Underscore digit separators (`5_000`)
//! - Basic (`"..."`) and literal (`'...'`) strings
//! - Comments (# ...)

use bluesleep_hal::Edge;

use super::types::{ConfigError, SleepConfig};

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Bluesleep,
}

/// Parse and validate a configuration file
///
/// Keys that are absent keep their [`SleepConfig::default`] value.
pub fn parse_config(input: &str) -> Result<SleepConfig, ConfigError> {
    let mut config = SleepConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = match header.trim() {
                "bluesleep" => Section::Bluesleep,
                _ => return Err(ConfigError::InvalidSection),
            };
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ConfigError::InvalidValue)?;
        let key = key.trim();
        let key = match section {
            Section::Bluesleep => key,
            Section::Root => dotted_key(key).ok_or(ConfigError::UnknownKey)?,
        };
        apply_key(&mut config, key, value.trim())?;
    }

    config.validate()?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Strip the `bluesleep.` table prefix from a root-level key
fn dotted_key(key: &str) -> Option<&str> {
    let (table, rest) = key.split_once('.')?;
    (table.trim() == "bluesleep").then(|| rest.trim())
}

fn apply_key(config: &mut SleepConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "tx_idle_interval_ms" => config.tx_idle_interval_ms = parse_u32(value)?,
        "activity_wake_lock_ms" => config.activity_wake_lock_ms = parse_u32(value)?,
        "sleep_wake_lock_ms" => config.sleep_wake_lock_ms = parse_u32(value)?,
        "resume_wake_lock_ms" => config.resume_wake_lock_ms = parse_u32(value)?,
        "wake_settle_ms" => config.wake_settle_ms = parse_u32(value)?,
        "host_wake_edge" => config.host_wake_edge = parse_edge(value)?,
        "ext_wake_active_high" => config.ext_wake_active_high = parse_bool(value)?,
        "host_wake_active_high" => config.host_wake_active_high = parse_bool(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn parse_u32(value: &str) -> Result<u32, ConfigError> {
    let value = value.strip_prefix('+').unwrap_or(value);
    let (digits, radix) = match value.get(..2) {
        Some("0x") => (&value[2..], 16),
        Some("0o") => (&value[2..], 8),
        Some("0b") => (&value[2..], 2),
        _ => (value, 10),
    };

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return Err(ConfigError::InvalidValue);
    }

    let mut result: u32 = 0;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(radix).ok_or(ConfigError::InvalidValue)?;
        result = result
            .checked_mul(radix)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ConfigError::InvalidValue)?;
    }
    Ok(result)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_edge(value: &str) -> Result<Edge, ConfigError> {
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|&q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
        .ok_or(ConfigError::InvalidValue)?;

    match unquoted {
        "rising" => Ok(Edge::Rising),
        "falling" => Ok(Edge::Falling),
        "both" => Ok(Edge::Both),
        _ => Err(ConfigError::InvalidValue),
    }
}
