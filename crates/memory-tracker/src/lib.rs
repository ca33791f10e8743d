// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # memory-tracker
//!
//! Thread-safe accounting of live and peak memory usage, broken down by
//! [`AllocationType`].
//!
//! # Key Components
//!
//! - [`AllocationType`] — the closed set of memory-model tags
//!   (`default`, `usm_host`, `usm_device`, `usm_shared`). Every live
//!   allocation carries exactly one tag for its whole lifetime.
//! - [`MemoryTracker`] — the usage table: per-type current and peak byte
//!   counts behind a single mutex, with add/subtract mutation entry
//!   points and snapshot queries.
//! - [`TrackerError`] — usage errors raised on caller-contract
//!   violations (freeing an untracked type, over-freeing).
//!
//! # Concurrency
//! All operations acquire the tracker's mutex for their full duration, so
//! concurrent readers always observe a consistent table — never a
//! partially updated one. `MemoryTracker` is `Send + Sync` and is shared
//! across execution streams via `Arc`.
//!
//! # Example
//! ```
//! use memory_tracker::{AllocationType, MemoryTracker};
//!
//! let tracker = MemoryTracker::new();
//! tracker.add(1024, AllocationType::UsmDevice);
//! tracker.add(512, AllocationType::UsmDevice);
//! tracker.subtract(1024, AllocationType::UsmDevice).unwrap();
//!
//! assert_eq!(tracker.current(AllocationType::UsmDevice), 512);
//! assert_eq!(tracker.peak(AllocationType::UsmDevice), 1536);
//! ```

mod alloc_type;
mod error;
mod tracker;

pub use alloc_type::AllocationType;
pub use error::TrackerError;
pub use tracker::MemoryTracker;
