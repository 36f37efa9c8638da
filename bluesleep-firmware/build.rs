//! Build script for bluesleep-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates bluesleep.toml at compile time, first as TOML and then with
//!   the firmware's own config parser

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in the `[bluesleep]` section, with their allowed range
const INTEGER_KEYS: &[(&str, i64, i64)] = &[
    ("tx_idle_interval_ms", 1, u32::MAX as i64),
    ("activity_wake_lock_ms", 0, u32::MAX as i64),
    ("sleep_wake_lock_ms", 0, u32::MAX as i64),
    ("resume_wake_lock_ms", 0, u32::MAX as i64),
    ("wake_settle_ms", 0, 100),
];

const BOOL_KEYS: &[&str] = &["ext_wake_active_high", "host_wake_active_high"];

const EDGES: &[&str] = &["rising", "falling", "both"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate bluesleep.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=bluesleep.toml");

    let config_path = Path::new("bluesleep.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: bluesleep.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds bluesleep.toml at build time.               ║\n\
            ║  Please create one in the bluesleep-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read bluesleep.toml                            ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in bluesleep.toml                    ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = validate_sleep_section(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid [bluesleep] configuration                        ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    if let Err(e) = bluesleep_core::config::parse_config(&config_content) {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: bluesleep.toml rejected by the firmware config parser    ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║  Error: {:<56} ║\n\
            ║                                                                  ║\n\
            ║  The device would fall back to default settings. Use plain       ║\n\
            ║  `key = value` lines inside a single [bluesleep] table.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}", e)
        );
    }

    println!("cargo:warning=bluesleep.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check the `[bluesleep]` table, collecting every problem found
fn validate_sleep_section(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return errors,
    };

    for key in root.keys() {
        if key != "bluesleep" {
            errors.push(format!("unexpected top-level entry '{}'", key));
        }
    }

    let section = match root.get("bluesleep") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[bluesleep] must be a table".to_string());
            return errors;
        }
        None => return errors,
    };

    for (key, value) in section {
        if let Some((_, min, max)) = INTEGER_KEYS.iter().find(|(k, _, _)| *k == key.as_str()) {
            match value {
                toml::Value::Integer(v) if v < min || v > max => {
                    errors.push(format!("{} must be {}-{}", key, min, max));
                }
                toml::Value::Integer(_) => {}
                _ => errors.push(format!("{} must be an integer", key)),
            }
        } else if BOOL_KEYS.contains(&key.as_str()) {
            if !value.is_bool() {
                errors.push(format!("{} must be true or false", key));
            }
        } else if key == "host_wake_edge" {
            match value.as_str() {
                Some(edge) if EDGES.contains(&edge) => {}
                _ => errors.push(
                    "host_wake_edge must be 'rising', 'falling', or 'both'".to_string(),
                ),
            }
        } else {
            errors.push(format!("unknown key '{}'", key));
        }
    }

    let interval = section
        .get("tx_idle_interval_ms")
        .and_then(|v| v.as_integer())
        .unwrap_or(5_000);
    let activity = section
        .get("activity_wake_lock_ms")
        .and_then(|v| v.as_integer())
        .unwrap_or(6_000);
    if activity < interval {
        errors.push("activity_wake_lock_ms must be >= tx_idle_interval_ms".to_string());
    }

    errors
}
