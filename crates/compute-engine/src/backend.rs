// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The allocation backend boundary.

use crate::{EngineError, Memory, SharedMemDescriptor};
use memory_tracker::{AllocationType, MemoryTracker};
use std::sync::Arc;
use tensor_layout::Layout;

/// Performs the real allocation and mapping calls for one engine kind.
///
/// Implementations own the driver/platform specifics. Two bookkeeping
/// rules bind every implementation:
///
/// 1. Exactly one `tracker.add(bytes, type)` per successful
///    [`Backend::allocate`], with the byte count and type of the memory
///    actually produced, and exactly one matching subtract when that
///    memory is released.
/// 2. [`Backend::reinterpret_handle`] never records usage — imported
///    memory is owned elsewhere, and whatever accounting it deserves is
///    the backend's own choice.
pub trait Backend: Send + Sync {
    /// Allocates memory for `layout` under the given allocation type.
    ///
    /// `reset` requests zero-initialised contents.
    fn allocate(
        &self,
        layout: &Layout,
        alloc_type: AllocationType,
        reset: bool,
        tracker: &Arc<MemoryTracker>,
    ) -> Result<Memory, EngineError>;

    /// Wraps an externally-owned native resource described by
    /// `descriptor` as a [`Memory`] for `layout`.
    fn reinterpret_handle(
        &self,
        layout: &Layout,
        descriptor: SharedMemDescriptor,
    ) -> Result<Memory, EngineError>;
}
