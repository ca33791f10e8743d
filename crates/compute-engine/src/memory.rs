// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The memory wrapper handed out by the engine.
//!
//! A [`Memory`] pairs a layout with the allocation type that backs it and
//! records where the storage came from:
//!
//! - `Owned` — allocated by the backend; usage was recorded in the
//!   tracker at allocation time and is released again when the wrapper
//!   is dropped (RAII, like a buffer guard returning to its pool).
//! - `Attached` — wraps a caller-owned host pointer; never tracked,
//!   never freed here.
//! - `Imported` — wraps an externally-owned native resource via a
//!   [`SharedMemDescriptor`]; a weak reference, never freed here.

use crate::{NativeHandle, SharedMemDescriptor};
use memory_tracker::{AllocationType, MemoryTracker};
use std::sync::Arc;
use tensor_layout::Layout;

/// Where a [`Memory`]'s storage comes from.
#[derive(Debug, Clone)]
pub enum MemorySource {
    /// Storage allocated (and later released) by the backend.
    Owned,
    /// A caller-owned host pointer, wrapped without ownership.
    Attached { ptr: NativeHandle },
    /// An externally-owned native resource, wrapped without ownership.
    Imported { descriptor: SharedMemDescriptor },
}

/// A memory object produced by the engine.
///
/// Owned memory subtracts its byte count from the usage tracker when
/// dropped, completing the one-add-one-subtract bookkeeping contract.
/// Attached and imported memory never touches the tracker.
#[derive(Debug)]
pub struct Memory {
    layout: Layout,
    allocation_type: AllocationType,
    source: MemorySource,
    tracker: Option<Arc<MemoryTracker>>,
}

impl Memory {
    /// Creates a backend-owned memory object whose usage has already
    /// been recorded in `tracker` under `allocation_type`.
    pub fn owned(
        layout: Layout,
        allocation_type: AllocationType,
        tracker: Arc<MemoryTracker>,
    ) -> Self {
        Self {
            layout,
            allocation_type,
            source: MemorySource::Owned,
            tracker: Some(tracker),
        }
    }

    /// Wraps a caller-owned host pointer as a non-owning view.
    pub fn attached(layout: Layout, ptr: NativeHandle) -> Self {
        Self {
            layout,
            allocation_type: AllocationType::Default,
            source: MemorySource::Attached { ptr },
            tracker: None,
        }
    }

    /// Wraps an externally-owned native resource as a non-owning view.
    pub fn imported(
        layout: Layout,
        allocation_type: AllocationType,
        descriptor: SharedMemDescriptor,
    ) -> Self {
        Self {
            layout,
            allocation_type,
            source: MemorySource::Imported { descriptor },
            tracker: None,
        }
    }

    /// The layout this memory was created for.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The allocation type backing this memory. Immutable for the
    /// memory's lifetime.
    pub fn allocation_type(&self) -> AllocationType {
        self.allocation_type
    }

    /// The size of the memory in bytes.
    pub fn bytes_count(&self) -> u64 {
        self.layout.bytes_count()
    }

    /// Where the storage came from.
    pub fn source(&self) -> &MemorySource {
        &self.source
    }

    /// Returns `true` for memory whose native resource is owned outside
    /// the engine (attached or imported).
    pub fn is_externally_owned(&self) -> bool {
        !matches!(self.source, MemorySource::Owned)
    }

    /// The import descriptor, for imported memory.
    pub fn descriptor(&self) -> Option<&SharedMemDescriptor> {
        match &self.source {
            MemorySource::Imported { descriptor } => Some(descriptor),
            _ => None,
        }
    }
}

impl Drop for Memory {
    fn drop(&mut self) {
        if let Some(tracker) = &self.tracker {
            if let Err(e) = tracker.subtract(self.layout.bytes_count(), self.allocation_type) {
                // Accounting is already inconsistent at this point; the
                // drop itself must not panic.
                tracing::warn!("releasing memory failed accounting: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_layout::{DType, Shape};

    fn layout() -> Layout {
        Layout::linear(Shape::matrix(16, 16), DType::F32)
    }

    #[test]
    fn test_owned_memory_releases_on_drop() {
        let tracker = Arc::new(MemoryTracker::new());
        tracker.add(1024, AllocationType::UsmDevice);
        let mem = Memory::owned(layout(), AllocationType::UsmDevice, Arc::clone(&tracker));
        assert_eq!(mem.bytes_count(), 1024);
        assert!(!mem.is_externally_owned());

        drop(mem);
        assert_eq!(tracker.current(AllocationType::UsmDevice), 0);
        assert_eq!(tracker.peak(AllocationType::UsmDevice), 1024);
    }

    #[test]
    fn test_attached_memory_is_untracked() {
        let data = [0u8; 64];
        let mem = Memory::attached(layout(), NativeHandle::from_ptr(data.as_ptr()));
        assert!(mem.is_externally_owned());
        assert_eq!(mem.allocation_type(), AllocationType::Default);
        assert!(mem.descriptor().is_none());
        // No tracker, so dropping must be a no-op.
        drop(mem);
    }

    #[test]
    fn test_imported_memory_keeps_descriptor() {
        let desc = SharedMemDescriptor::buffer(NativeHandle::from_raw(0x44));
        let mem = Memory::imported(layout(), AllocationType::Default, desc);
        assert!(mem.is_externally_owned());
        assert_eq!(mem.descriptor(), Some(&desc));
    }
}
