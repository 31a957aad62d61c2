//! Best-effort host facts recorded alongside a run.
//!
//! Every probe is independent and falls back to [`ERROR_SENTINEL`] so that a
//! missing fact never stops the metadata file from being written.

use crate::core::data::ERROR_SENTINEL;
use serde_json::Value;

const MEMINFO_PATH: &str = "/proc/meminfo";

/// Total physical memory in GiB, as a JSON number when it can be read.
pub fn total_memory() -> Value {
    match std::fs::read_to_string(MEMINFO_PATH)
        .ok()
        .and_then(|text| parse_mem_total_gib(&text))
    {
        Some(gib) => Value::from(gib),
        None => {
            tracing::debug!("Could not determine total memory from {}", MEMINFO_PATH);
            Value::from(ERROR_SENTINEL)
        }
    }
}

/// Extract `MemTotal` (reported in kB) and convert it to GiB.
pub fn parse_mem_total_gib(meminfo: &str) -> Option<f64> {
    let line = meminfo.lines().find(|line| line.starts_with("MemTotal:"))?;
    let kb: f64 = line
        .trim_start_matches("MemTotal:")
        .split_whitespace()
        .next()?
        .parse()
        .ok()?;
    Some(kb / 1024.0 / 1024.0)
}

pub fn operating_system() -> String {
    match whoami::fallible::distro() {
        Ok(distro) => format!("Operating System: {} Version {}", whoami::platform(), distro),
        Err(e) => {
            tracing::debug!("Could not determine OS version: {}", e);
            ERROR_SENTINEL.to_string()
        }
    }
}

pub fn runtime_version() -> String {
    format!(
        "{} {} ({}-{})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS
    )
}
