// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for memory usage tracking.

use crate::AllocationType;

/// Usage errors raised by the tracker on caller-contract violations.
///
/// These indicate a bug in the backend/caller pairing (double free,
/// mismatched type tag), not a corrupted tracker — the table is left
/// unchanged when an operation is rejected.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Attempt to free memory under a type that was never allocated.
    #[error("attempt to free unallocated memory (allocation type '{alloc_type}')")]
    UntrackedFree { alloc_type: AllocationType },

    /// Attempt to free more bytes than are currently tracked for a type.
    #[error(
        "attempt to free {requested} bytes of '{alloc_type}' but only {current} bytes are tracked"
    )]
    FreeUnderflow {
        alloc_type: AllocationType,
        requested: u64,
        current: u64,
    },
}
