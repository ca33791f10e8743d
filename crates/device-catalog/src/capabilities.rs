// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Device memory capability descriptions.

use memory_tracker::AllocationType;
use std::collections::BTreeSet;

/// What a device's memory subsystem can do.
///
/// Immutable for the lifetime of the engine that holds it. The engine's
/// allocation-type negotiation reads only this value, which is what makes
/// negotiation lock-free.
///
/// # Examples
/// ```
/// use device_catalog::DeviceCapabilities;
/// use memory_tracker::AllocationType;
///
/// // A discrete GPU with device-local USM.
/// let caps = DeviceCapabilities::with_usm(
///     8 << 30,
///     [AllocationType::UsmHost, AllocationType::UsmDevice],
/// );
/// assert!(caps.supports_usm());
/// assert!(caps.supports_allocation_type(AllocationType::UsmDevice));
///
/// // A host-only fallback device.
/// let caps = DeviceCapabilities::host_only(4 << 30);
/// assert!(!caps.supports_usm());
/// assert!(caps.supports_allocation_type(AllocationType::Default));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceCapabilities {
    max_global_memory_bytes: u64,
    supports_usm: bool,
    supported_types: BTreeSet<AllocationType>,
}

impl DeviceCapabilities {
    /// Capabilities for a device with no unified shared memory.
    ///
    /// Only [`AllocationType::Default`] is served.
    pub fn host_only(max_global_memory_bytes: u64) -> Self {
        Self {
            max_global_memory_bytes,
            supports_usm: false,
            supported_types: [AllocationType::Default].into_iter().collect(),
        }
    }

    /// Capabilities for a USM-capable device serving the given USM
    /// variants in addition to [`AllocationType::Default`].
    pub fn with_usm(
        max_global_memory_bytes: u64,
        usm_types: impl IntoIterator<Item = AllocationType>,
    ) -> Self {
        let mut supported_types: BTreeSet<AllocationType> =
            usm_types.into_iter().filter(|t| t.is_usm()).collect();
        supported_types.insert(AllocationType::Default);
        Self {
            max_global_memory_bytes,
            supports_usm: true,
            supported_types,
        }
    }

    /// Maximum global memory of the device, in bytes.
    pub fn max_global_memory_bytes(&self) -> u64 {
        self.max_global_memory_bytes
    }

    /// Returns `true` when the device has any unified-shared-memory
    /// support at all.
    pub fn supports_usm(&self) -> bool {
        self.supports_usm
    }

    /// Returns `true` when the device serves allocations of `alloc_type`.
    pub fn supports_allocation_type(&self, alloc_type: AllocationType) -> bool {
        self.supported_types.contains(&alloc_type)
    }
}
