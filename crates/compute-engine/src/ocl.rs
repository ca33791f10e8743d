// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The OpenCL-class backend registered for [`EngineKind::Ocl`].
//!
//! This backend is a functional skeleton: it enforces the full
//! allocation contract — request validation, usage bookkeeping, and
//! descriptor interpretation — while the native storage itself lives
//! driver-side and is not modeled here. Swapping in real driver calls
//! changes only the interior of the two trait methods.

use crate::{Backend, EngineError, Memory, SharedMemDescriptor, SharedMemKind};
use device_catalog::{EngineKind, RuntimeKind};
use memory_tracker::{AllocationType, MemoryTracker};
use std::sync::Arc;
use tensor_layout::Layout;

/// Backend for OpenCL-class devices.
#[derive(Debug)]
pub struct OclBackend {
    runtime_kind: RuntimeKind,
}

impl OclBackend {
    /// Creates the backend for the given runtime flavour.
    pub fn new(runtime_kind: RuntimeKind) -> Self {
        Self { runtime_kind }
    }

    /// The engine kind this backend serves.
    pub fn engine_kind(&self) -> EngineKind {
        EngineKind::Ocl
    }

    /// The runtime flavour this backend drives.
    pub fn runtime_kind(&self) -> RuntimeKind {
        self.runtime_kind
    }
}

impl Backend for OclBackend {
    fn allocate(
        &self,
        layout: &Layout,
        alloc_type: AllocationType,
        reset: bool,
        tracker: &Arc<MemoryTracker>,
    ) -> Result<Memory, EngineError> {
        let bytes = layout.bytes_count();
        if bytes == 0 {
            return Err(EngineError::ZeroSizedAllocation);
        }

        tracing::debug!(%alloc_type, bytes, reset, "allocating device memory");
        tracker.add(bytes, alloc_type);
        Ok(Memory::owned(
            layout.clone(),
            alloc_type,
            Arc::clone(tracker),
        ))
    }

    fn reinterpret_handle(
        &self,
        layout: &Layout,
        descriptor: SharedMemDescriptor,
    ) -> Result<Memory, EngineError> {
        // Reject descriptors whose fields do not match their kind before
        // anything reaches the driver.
        match descriptor.kind() {
            SharedMemKind::VaSurface => {
                if descriptor.surface_handle().is_none() || descriptor.plane().is_none() {
                    return Err(EngineError::Backend(
                        "va_surface descriptor is missing its surface handle or plane".into(),
                    ));
                }
            }
            kind => {
                if descriptor.handle().is_none() {
                    return Err(EngineError::Backend(format!(
                        "{kind} descriptor is missing its native handle"
                    )));
                }
            }
        }

        // A real driver would detect the placement of an imported USM
        // pointer; host placement is assumed here.
        let alloc_type = match descriptor.kind() {
            SharedMemKind::Usm => AllocationType::UsmHost,
            _ => AllocationType::Default,
        };

        tracing::debug!(kind = %descriptor.kind(), "importing shared native resource");
        Ok(Memory::imported(layout.clone(), alloc_type, descriptor))
    }
}
