// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Allocation-type negotiation policy.
//!
//! Pure functions of immutable device capabilities — no locks, no I/O —
//! so repeated calls with the same inputs always return the same answer.
//!
//! Two preference orders exist:
//! - **Lockable preferred** ([`lockable_preferred_type`]): for memory the
//!   host must be able to map directly (constant/weight buffers staged
//!   from the host). Probes `usm_shared`, then `usm_host`.
//! - **General preferred** ([`preferred_type`]): for intermediate buffers
//!   that live device-side. Probes `usm_device`, then `usm_host`.
//!
//! Both return `default` immediately when the device has no USM or the
//! layout is image-backed, and `None` when USM is nominally present but
//! no probed variant is supported — the caller must surface that as a
//! fatal configuration error rather than falling back to `default`,
//! which is not guaranteed lockable.

use device_catalog::DeviceCapabilities;
use memory_tracker::AllocationType;

/// General allocation-support predicate.
///
/// USM variants require the device to have USM at all. `usm_shared` is
/// excluded unconditionally: shared USM is reserved for explicit import
/// paths and is never handed out by generic support queries.
pub fn supports_allocation(caps: &DeviceCapabilities, alloc_type: AllocationType) -> bool {
    if alloc_type.is_usm() && !caps.supports_usm() {
        return false;
    }
    if alloc_type == AllocationType::UsmShared {
        return false;
    }
    caps.supports_allocation_type(alloc_type)
}

/// Chooses the allocation type for host-lockable memory.
///
/// Returns `None` when the device claims USM support but serves neither
/// probed variant.
pub fn lockable_preferred_type(
    caps: &DeviceCapabilities,
    is_image_layout: bool,
) -> Option<AllocationType> {
    if !caps.supports_usm() || is_image_layout {
        return Some(AllocationType::Default);
    }

    // usm_device is deliberately not probed here: device-local memory is
    // reserved for hidden-layer buffers, and constant buffers get
    // propagated to the device separately when possible.
    //
    // The usm_shared probe goes through supports_allocation, which
    // excludes usm_shared unconditionally, so this branch never fires;
    // the probing order is kept as-is regardless.
    if supports_allocation(caps, AllocationType::UsmShared) {
        return Some(AllocationType::UsmShared);
    }
    if supports_allocation(caps, AllocationType::UsmHost) {
        return Some(AllocationType::UsmHost);
    }
    None
}

/// Chooses the allocation type for general-purpose (non-lockable) memory.
///
/// Prefers device-local USM; falls back to host USM in case device
/// allocations are unsupported for some reason. Returns `None` when
/// neither is available.
pub fn preferred_type(caps: &DeviceCapabilities, is_image_layout: bool) -> Option<AllocationType> {
    if !caps.supports_usm() || is_image_layout {
        return Some(AllocationType::Default);
    }

    if supports_allocation(caps, AllocationType::UsmDevice) {
        return Some(AllocationType::UsmDevice);
    }
    if supports_allocation(caps, AllocationType::UsmHost) {
        return Some(AllocationType::UsmHost);
    }
    None
}
