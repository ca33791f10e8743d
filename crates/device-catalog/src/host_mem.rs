// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Total physical host RAM, read once per process.
//!
//! On Linux the figure comes from `MemTotal` in `/proc/meminfo`. The
//! probe runs at most once; the result is memoized so concurrent first
//! callers all observe the same value.
//!
//! On platforms without a probe (and on probe failure) the function
//! returns 0 with a warning, so that `max(device memory, host RAM)`
//! degrades to the device figure rather than inventing one.

use once_cell::sync::Lazy;

#[cfg(target_os = "linux")]
use crate::CatalogError;
#[cfg(target_os = "linux")]
use std::path::Path;

static TOTAL_RAM_BYTES: Lazy<u64> = Lazy::new(probe);

/// Returns total physical host RAM in bytes, or 0 when unknown.
pub fn total_physical_ram_bytes() -> u64 {
    *TOTAL_RAM_BYTES
}

#[cfg(target_os = "linux")]
fn probe() -> u64 {
    match read_mem_total(Path::new("/proc/meminfo")) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("host RAM probe failed, reporting 0: {e}");
            0
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn probe() -> u64 {
    tracing::warn!("host RAM probe not available on this platform, reporting 0");
    0
}

/// Reads `MemTotal` from a `/proc/meminfo`-formatted file.
#[cfg(target_os = "linux")]
fn read_mem_total(path: &Path) -> Result<u64, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_mem_total(&content, path)
}

/// Parses the `MemTotal:` line of a `/proc/meminfo`-formatted string.
#[cfg(target_os = "linux")]
fn parse_mem_total(content: &str, source_path: &Path) -> Result<u64, CatalogError> {
    for line in content.lines() {
        let mut parts = line.split_whitespace();
        if parts.next() != Some("MemTotal:") {
            continue;
        }
        let value = parts.next().ok_or_else(|| CatalogError::ParseError {
            path: source_path.display().to_string(),
            detail: "MemTotal line has no value".to_string(),
        })?;
        let kb: u64 = value.parse().map_err(|_| CatalogError::ParseError {
            path: source_path.display().to_string(),
            detail: format!("expected integer kB value, got '{value}'"),
        })?;
        return Ok(kb * 1024);
    }
    Err(CatalogError::ParseError {
        path: source_path.display().to_string(),
        detail: "MemTotal not found".to_string(),
    })
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    const SAMPLE_MEMINFO: &str = "\
MemTotal:        3884292 kB
MemFree:          218456 kB
MemAvailable:    2456780 kB
Buffers:          123456 kB
";

    #[test]
    fn test_parse_mem_total() {
        let bytes = parse_mem_total(SAMPLE_MEMINFO, Path::new("/proc/meminfo")).unwrap();
        assert_eq!(bytes, 3884292 * 1024);
    }

    #[test]
    fn test_parse_missing_mem_total() {
        let content = "MemFree:          218456 kB\n";
        let result = parse_mem_total(content, Path::new("/proc/meminfo"));
        assert!(matches!(result, Err(CatalogError::ParseError { .. })));
    }

    #[test]
    fn test_parse_garbage_value() {
        let content = "MemTotal:        lots kB\n";
        let result = parse_mem_total(content, Path::new("/proc/meminfo"));
        assert!(matches!(result, Err(CatalogError::ParseError { .. })));
    }

    #[test]
    fn test_read_real_meminfo() {
        // Runs on the actual host — should always succeed on Linux.
        let bytes = read_mem_total(Path::new("/proc/meminfo")).unwrap();
        assert!(bytes > 0);
    }

    #[test]
    fn test_memoized_value_is_consistent() {
        let a = total_physical_ram_bytes();
        let b = total_physical_ram_bytes();
        assert_eq!(a, b);
    }
}
