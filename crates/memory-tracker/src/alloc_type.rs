// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Allocation-type tags.

/// Identifies which memory model backs an allocation.
///
/// The tag is chosen at allocation time by the engine's negotiation
/// policy and is immutable for the allocation's lifetime. Usage
/// accounting is keyed by this tag.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AllocationType {
    /// Ordinary device/system allocation, outside any USM pool.
    Default,
    /// Unified shared memory placed in host memory, device-accessible.
    UsmHost,
    /// Unified shared memory placed in device memory.
    UsmDevice,
    /// Unified shared memory migrated between host and device on demand.
    UsmShared,
}

impl AllocationType {
    /// All variants, in declaration order.
    pub const ALL: &'static [AllocationType] = &[
        AllocationType::Default,
        AllocationType::UsmHost,
        AllocationType::UsmDevice,
        AllocationType::UsmShared,
    ];

    /// Returns `true` for the USM variants.
    pub fn is_usm(self) -> bool {
        matches!(
            self,
            AllocationType::UsmHost | AllocationType::UsmDevice | AllocationType::UsmShared
        )
    }

    /// Returns the stable string form used in statistics snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            AllocationType::Default => "default",
            AllocationType::UsmHost => "usm_host",
            AllocationType::UsmDevice => "usm_device",
            AllocationType::UsmShared => "usm_shared",
        }
    }
}

impl std::fmt::Display for AllocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
