// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The per-allocation-type usage table.
//!
//! [`MemoryTracker`] keeps current and peak byte counts for every
//! [`AllocationType`] that has seen at least one `add`. A single mutex
//! guards the whole table; every mutation and every read holds it for
//! the full call, so readers always see a consistent snapshot.
//!
//! # Peak Semantics
//! Peaks are tracked independently per type. The aggregate
//! [`MemoryTracker::peak_total`] sums those independent peaks, which can
//! overstate the true simultaneous peak when different types peaked at
//! different instants. This is an accepted approximation.

use crate::{AllocationType, TrackerError};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// Current and peak byte counts for one allocation type.
#[derive(Debug, Clone, Copy, Default)]
struct Usage {
    current_bytes: u64,
    peak_bytes: u64,
}

/// Thread-safe table of live and peak memory usage per allocation type.
///
/// # Example
/// ```
/// use memory_tracker::{AllocationType, MemoryTracker};
///
/// let t = MemoryTracker::new();
/// t.add(4096, AllocationType::Default);
/// assert_eq!(t.current(AllocationType::Default), 4096);
/// t.subtract(4096, AllocationType::Default).unwrap();
/// assert_eq!(t.current(AllocationType::Default), 0);
/// assert_eq!(t.peak(AllocationType::Default), 4096);
/// ```
#[derive(Debug, Default)]
pub struct MemoryTracker {
    entries: Mutex<HashMap<AllocationType, Usage>>,
}

impl MemoryTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `bytes` newly allocated under `alloc_type`.
    ///
    /// The entry is created on first use (current and peak start at 0),
    /// then the current count is raised and the peak updated if the new
    /// current exceeds it.
    pub fn add(&self, bytes: u64, alloc_type: AllocationType) {
        let mut entries = self.lock();
        let usage = entries.entry(alloc_type).or_default();
        usage.current_bytes += bytes;
        if usage.current_bytes > usage.peak_bytes {
            usage.peak_bytes = usage.current_bytes;
        }
    }

    /// Records `bytes` freed under `alloc_type`.
    ///
    /// Freeing a type that was never allocated, or more bytes than are
    /// currently tracked, is a usage error; the table is unchanged in
    /// either case. Peaks are never lowered.
    pub fn subtract(&self, bytes: u64, alloc_type: AllocationType) -> Result<(), TrackerError> {
        let mut entries = self.lock();
        let usage = entries
            .get_mut(&alloc_type)
            .ok_or(TrackerError::UntrackedFree { alloc_type })?;
        if bytes > usage.current_bytes {
            return Err(TrackerError::FreeUnderflow {
                alloc_type,
                requested: bytes,
                current: usage.current_bytes,
            });
        }
        usage.current_bytes -= bytes;
        Ok(())
    }

    /// Returns the live byte count for `alloc_type` (0 if never used).
    pub fn current(&self, alloc_type: AllocationType) -> u64 {
        self.lock()
            .get(&alloc_type)
            .map(|u| u.current_bytes)
            .unwrap_or(0)
    }

    /// Returns the peak byte count for `alloc_type` (0 if never used).
    pub fn peak(&self, alloc_type: AllocationType) -> u64 {
        self.lock()
            .get(&alloc_type)
            .map(|u| u.peak_bytes)
            .unwrap_or(0)
    }

    /// Returns the sum of per-type peaks.
    ///
    /// Per-type peaks may have occurred at different instants, so this
    /// can exceed the true simultaneous peak.
    pub fn peak_total(&self) -> u64 {
        self.lock().values().map(|u| u.peak_bytes).sum()
    }

    /// Returns a point-in-time snapshot of current usage, keyed by the
    /// stable string form of each type.
    ///
    /// Contains exactly the types that have had at least one `add`,
    /// mapped to their current (not peak) usage, in stable order.
    pub fn statistics(&self) -> BTreeMap<String, u64> {
        self.lock()
            .iter()
            .map(|(ty, usage)| (ty.to_string(), usage.current_bytes))
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AllocationType, Usage>> {
        // A poisoned mutex means a panic mid-update on another thread;
        // the table itself is always left consistent, so keep going.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_add_creates_entry() {
        let t = MemoryTracker::new();
        t.add(100, AllocationType::UsmHost);
        assert_eq!(t.current(AllocationType::UsmHost), 100);
        assert_eq!(t.peak(AllocationType::UsmHost), 100);
    }

    #[test]
    fn test_absent_type_reads_zero() {
        let t = MemoryTracker::new();
        assert_eq!(t.current(AllocationType::UsmDevice), 0);
        assert_eq!(t.peak(AllocationType::UsmDevice), 0);
        assert_eq!(t.peak_total(), 0);
    }

    #[test]
    fn test_conservation_over_sequence() {
        // current equals the algebraic sum; peak equals the max prefix sum.
        let t = MemoryTracker::new();
        let ty = AllocationType::Default;
        t.add(300, ty);
        t.add(200, ty);
        t.subtract(400, ty).unwrap();
        t.add(150, ty);
        assert_eq!(t.current(ty), 250);
        assert_eq!(t.peak(ty), 500);
    }

    #[test]
    fn test_scenario_allocate_then_query() {
        let t = MemoryTracker::new();
        t.add(1_048_576, AllocationType::UsmDevice);
        assert_eq!(t.current(AllocationType::UsmDevice), 1_048_576);
        assert_eq!(t.peak(AllocationType::UsmDevice), 1_048_576);
    }

    #[test]
    fn test_scenario_peak_survives_subtract() {
        let t = MemoryTracker::new();
        let ty = AllocationType::UsmDevice;
        t.add(1_048_576, ty);
        t.add(2_097_152, ty);
        assert_eq!(t.current(ty), 3_145_728);
        assert_eq!(t.peak(ty), 3_145_728);

        t.subtract(1_048_576, ty).unwrap();
        assert_eq!(t.current(ty), 2_097_152);
        assert_eq!(t.peak(ty), 3_145_728); // Unchanged.
    }

    #[test]
    fn test_double_free_detection() {
        let t = MemoryTracker::new();
        t.add(100, AllocationType::Default);

        let result = t.subtract(50, AllocationType::UsmHost);
        assert!(matches!(result, Err(TrackerError::UntrackedFree { .. })));

        // Table unchanged after the rejected call.
        assert_eq!(t.current(AllocationType::Default), 100);
        assert_eq!(t.current(AllocationType::UsmHost), 0);
        assert_eq!(t.statistics().len(), 1);
    }

    #[test]
    fn test_over_free_detection() {
        let t = MemoryTracker::new();
        let ty = AllocationType::UsmHost;
        t.add(100, ty);
        let result = t.subtract(200, ty);
        assert!(matches!(result, Err(TrackerError::FreeUnderflow { .. })));
        assert_eq!(t.current(ty), 100); // Unchanged.
    }

    #[test]
    fn test_subtract_to_zero_is_legitimate() {
        let t = MemoryTracker::new();
        t.add(64, AllocationType::UsmShared);
        t.subtract(64, AllocationType::UsmShared).unwrap();
        assert_eq!(t.current(AllocationType::UsmShared), 0);
        // The entry still exists and shows up in statistics.
        assert_eq!(t.statistics().get("usm_shared"), Some(&0));
    }

    #[test]
    fn test_statistics_contains_exactly_added_types() {
        let t = MemoryTracker::new();
        t.add(10, AllocationType::Default);
        t.add(20, AllocationType::UsmDevice);
        t.add(5, AllocationType::UsmDevice);

        let stats = t.statistics();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["default"], 10);
        assert_eq!(stats["usm_device"], 25); // Current, not peak.
        assert!(!stats.contains_key("usm_host"));
    }

    #[test]
    fn test_peak_total_sums_independent_peaks() {
        let t = MemoryTracker::new();
        t.add(100, AllocationType::Default);
        t.subtract(100, AllocationType::Default).unwrap();
        t.add(200, AllocationType::UsmHost);
        // The two peaks never coexisted, but peak_total sums them anyway.
        assert_eq!(t.peak_total(), 300);
    }

    #[test]
    fn test_error_messages_name_the_type() {
        let t = MemoryTracker::new();
        let err = t.subtract(1, AllocationType::UsmDevice).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unallocated"));
        assert!(msg.contains("usm_device"));
    }

    #[test]
    fn test_concurrent_add_subtract_conserves() {
        let t = Arc::new(MemoryTracker::new());
        let ty = AllocationType::UsmDevice;
        let mut handles = Vec::new();

        for _ in 0..8 {
            let t = Arc::clone(&t);
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    t.add(64, ty);
                    t.subtract(64, ty).unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(t.current(ty), 0);
        assert!(t.peak(ty) >= 64);
        assert!(t.peak(ty) <= 8 * 64);
    }

    #[test]
    fn test_statistics_serializes() {
        let t = MemoryTracker::new();
        t.add(42, AllocationType::Default);
        let json = serde_json::to_string(&t.statistics()).unwrap();
        assert!(json.contains("\"default\":42"));
    }
}
