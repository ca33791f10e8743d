// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the compute engine.

use device_catalog::{EngineKind, RuntimeKind};
use memory_tracker::TrackerError;

/// Errors that can occur while creating an engine or servicing memory
/// operations.
///
/// Configuration errors (`NoDevicesFound`, `Config`, the two
/// `No…AllocationType` variants) are fatal for the operation: they mean
/// the runtime was pointed at hardware that cannot satisfy minimum
/// requirements, and retrying cannot help. Tracker errors are usage
/// errors — a caller/backend bug — and leave the engine consistent.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No lockable allocation type is viable on the device.
    #[error(
        "no lockable allocation type available on device '{device}': \
         neither usm_shared nor usm_host is supported"
    )]
    NoLockableAllocationType { device: String },

    /// No general-purpose allocation type is viable on the device.
    #[error(
        "no preferred allocation type available on device '{device}': \
         neither usm_device nor usm_host is supported"
    )]
    NoPreferredAllocationType { device: String },

    /// Device enumeration came back empty for the requested kinds.
    #[error("cannot create '{engine_kind}' engine for '{runtime_kind}' runtime: no suitable devices found")]
    NoDevicesFound {
        engine_kind: EngineKind,
        runtime_kind: RuntimeKind,
    },

    /// Invalid engine configuration (unknown kinds, unreadable file).
    #[error("configuration error: {0}")]
    Config(String),

    /// The backend rejected an allocation or import request.
    #[error("backend error: {0}")]
    Backend(String),

    /// A zero-byte layout was passed to an allocation request.
    #[error("cannot allocate zero-sized layout")]
    ZeroSizedAllocation,

    /// Usage accounting rejected a mutation.
    #[error("memory accounting error: {0}")]
    Tracker(#[from] TrackerError),
}
