// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The engine facade and its factory.
//!
//! An [`Engine`] ties together one device's capability view, the backend
//! that services real allocations, and the usage tracker. It is a
//! shared, long-lived object: multiple execution streams issue
//! allocate/free/query calls against it concurrently. Every operation is
//! synchronous and bounded — tracker calls serialise on the tracker's
//! mutex, negotiation reads only immutable capability data.

use crate::{
    policy, Backend, EngineConfig, EngineError, Memory, NativeHandle, OclBackend,
    SharedMemDescriptor, SurfaceHandle,
};
use device_catalog::{host_mem, Device, DeviceDirectory, EngineKind, RuntimeKind};
use memory_tracker::{AllocationType, MemoryTracker};
use std::collections::BTreeMap;
use std::sync::Arc;
use tensor_layout::Layout;

/// The memory engine for one device.
///
/// # Example
/// ```no_run
/// use compute_engine::{Engine, EngineConfig};
/// # use device_catalog::DeviceDirectory;
/// use tensor_layout::{DType, Layout, Shape};
///
/// # fn example(directory: &dyn DeviceDirectory) -> Result<(), compute_engine::EngineError> {
/// let engine = Engine::create(&EngineConfig::default(), directory)?;
/// let weights = Layout::linear(Shape::matrix(768, 768), DType::F32);
/// let memory = engine.allocate_memory(&weights, true)?;
/// assert_eq!(engine.used(memory.allocation_type()), weights.bytes_count());
/// # Ok(())
/// # }
/// ```
pub struct Engine {
    device: Arc<dyn Device>,
    backend: Arc<dyn Backend>,
    tracker: Arc<MemoryTracker>,
    max_memory_size: u64,
}

impl Engine {
    /// Creates an engine for a specific, caller-chosen device.
    ///
    /// Dispatches on `engine_kind` to the one backend registered for it.
    pub fn with_device(
        engine_kind: EngineKind,
        runtime_kind: RuntimeKind,
        device: Arc<dyn Device>,
    ) -> Result<Self, EngineError> {
        let backend: Arc<dyn Backend> = match engine_kind {
            EngineKind::Ocl => Arc::new(OclBackend::new(runtime_kind)),
        };
        tracing::info!("selected device: {}", device.name());

        // max_memory_size is fixed eagerly so every later read is a plain
        // field access, racing nothing.
        let max_memory_size = device
            .capabilities()
            .max_global_memory_bytes()
            .max(host_mem::total_physical_ram_bytes());

        Ok(Self {
            device,
            backend,
            tracker: Arc::new(MemoryTracker::new()),
            max_memory_size,
        })
    }

    /// Creates an engine by enumerating devices through `directory`.
    ///
    /// Selects the configured device id when it is among the enumerated
    /// devices, otherwise the first device in the directory's stable
    /// order. An empty enumeration is a fatal configuration error.
    pub fn create(
        config: &EngineConfig,
        directory: &dyn DeviceDirectory,
    ) -> Result<Self, EngineError> {
        let engine_kind = config.parse_engine_kind()?;
        let runtime_kind = config.parse_runtime_kind()?;

        let devices = directory.enumerate(engine_kind, runtime_kind);
        if devices.is_empty() {
            return Err(EngineError::NoDevicesFound {
                engine_kind,
                runtime_kind,
            });
        }

        let device = config
            .device_id
            .as_ref()
            .and_then(|id| devices.get(id))
            .or_else(|| devices.values().next())
            .cloned()
            .ok_or(EngineError::NoDevicesFound {
                engine_kind,
                runtime_kind,
            })?;

        Self::with_device(engine_kind, runtime_kind, device)
    }

    /// The device this engine drives.
    pub fn device(&self) -> &Arc<dyn Device> {
        &self.device
    }

    // ── Allocation ─────────────────────────────────────────────

    /// Wraps a caller-owned host pointer as a non-owning memory view.
    ///
    /// The engine records no usage for attached memory and never frees
    /// the pointer.
    pub fn attach_memory(&self, layout: Layout, ptr: NativeHandle) -> Memory {
        Memory::attached(layout, ptr)
    }

    /// Allocates memory for `layout` using the lockable preferred
    /// allocation type for this device.
    pub fn allocate_memory(&self, layout: &Layout, reset: bool) -> Result<Memory, EngineError> {
        let alloc_type = self.get_lockable_preferred_type(layout.is_image_layout())?;
        self.allocate_memory_with_type(layout, alloc_type, reset)
    }

    /// Allocates memory for `layout` under an explicitly chosen type.
    pub fn allocate_memory_with_type(
        &self,
        layout: &Layout,
        alloc_type: AllocationType,
        reset: bool,
    ) -> Result<Memory, EngineError> {
        self.backend.allocate(layout, alloc_type, reset, &self.tracker)
    }

    // ── Shared-resource import ─────────────────────────────────

    /// Imports an externally-owned native buffer.
    pub fn share_buffer(&self, layout: &Layout, buf: NativeHandle) -> Result<Memory, EngineError> {
        self.backend
            .reinterpret_handle(layout, SharedMemDescriptor::buffer(buf))
    }

    /// Imports an externally-owned unified-memory pointer.
    pub fn share_usm(&self, layout: &Layout, usm_ptr: NativeHandle) -> Result<Memory, EngineError> {
        self.backend
            .reinterpret_handle(layout, SharedMemDescriptor::usm(usm_ptr))
    }

    /// Imports an externally-owned native image.
    pub fn share_image(&self, layout: &Layout, img: NativeHandle) -> Result<Memory, EngineError> {
        self.backend
            .reinterpret_handle(layout, SharedMemDescriptor::image(img))
    }

    /// Imports one plane of an externally-owned video surface.
    pub fn share_surface(
        &self,
        layout: &Layout,
        surface: SurfaceHandle,
        plane: u32,
    ) -> Result<Memory, EngineError> {
        self.backend
            .reinterpret_handle(layout, SharedMemDescriptor::surface(surface, plane))
    }

    /// Imports an externally-owned Windows composition buffer.
    pub fn share_dx_buffer(
        &self,
        layout: &Layout,
        res: NativeHandle,
    ) -> Result<Memory, EngineError> {
        self.backend
            .reinterpret_handle(layout, SharedMemDescriptor::dx_buffer(res))
    }

    // ── Capability queries ─────────────────────────────────────

    /// The larger of the device's global memory and total host RAM,
    /// computed once at engine creation.
    pub fn max_memory_size(&self) -> u64 {
        self.max_memory_size
    }

    /// Whether generic allocation under `alloc_type` is supported here.
    pub fn supports_allocation(&self, alloc_type: AllocationType) -> bool {
        policy::supports_allocation(self.device.capabilities(), alloc_type)
    }

    /// The allocation type used for host-lockable memory.
    ///
    /// Fails fatally (naming the device) when no lockable type is viable;
    /// `default` memory is not guaranteed lockable, so it is never
    /// silently substituted.
    pub fn get_lockable_preferred_type(
        &self,
        is_image_layout: bool,
    ) -> Result<AllocationType, EngineError> {
        policy::lockable_preferred_type(self.device.capabilities(), is_image_layout).ok_or_else(
            || EngineError::NoLockableAllocationType {
                device: self.device.name().to_string(),
            },
        )
    }

    /// The allocation type used for general-purpose memory.
    pub fn get_preferred_type(&self, is_image_layout: bool) -> Result<AllocationType, EngineError> {
        policy::preferred_type(self.device.capabilities(), is_image_layout).ok_or_else(|| {
            EngineError::NoPreferredAllocationType {
                device: self.device.name().to_string(),
            }
        })
    }

    // ── Usage accounting ───────────────────────────────────────

    /// Live bytes currently tracked under `alloc_type`.
    pub fn used(&self, alloc_type: AllocationType) -> u64 {
        self.tracker.current(alloc_type)
    }

    /// Peak bytes ever tracked under `alloc_type`.
    pub fn peak_used(&self, alloc_type: AllocationType) -> u64 {
        self.tracker.peak(alloc_type)
    }

    /// Sum of per-type peaks (may overstate the true simultaneous peak).
    pub fn peak_used_total(&self) -> u64 {
        self.tracker.peak_total()
    }

    /// Snapshot of current usage per allocation type, keyed by the
    /// type's stable string form.
    pub fn memory_statistics(&self) -> BTreeMap<String, u64> {
        self.tracker.statistics()
    }

    /// Records allocated bytes. Called by the backend after a successful
    /// native allocation.
    pub fn add_memory_used(&self, bytes: u64, alloc_type: AllocationType) {
        self.tracker.add(bytes, alloc_type);
    }

    /// Records freed bytes. Called by the backend around a native free;
    /// freeing an untracked type is a usage error.
    pub fn subtract_memory_used(
        &self,
        bytes: u64,
        alloc_type: AllocationType,
    ) -> Result<(), EngineError> {
        self.tracker.subtract(bytes, alloc_type)?;
        Ok(())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        let leftover: u64 = self.tracker.statistics().values().sum();
        if leftover > 0 {
            tracing::warn!(
                "engine for device '{}' dropped with {leftover} bytes still tracked",
                self.device.name()
            );
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("device", &self.device.name())
            .field("max_memory_size", &self.max_memory_size)
            .field("statistics", &self.memory_statistics())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use device_catalog::DeviceCapabilities;

    struct TestDevice {
        name: String,
        caps: DeviceCapabilities,
    }

    impl Device for TestDevice {
        fn name(&self) -> &str {
            &self.name
        }
        fn capabilities(&self) -> &DeviceCapabilities {
            &self.caps
        }
    }

    fn device(caps: DeviceCapabilities) -> Arc<dyn Device> {
        Arc::new(TestDevice {
            name: "test-gpu".into(),
            caps,
        })
    }

    fn usm_engine() -> Engine {
        Engine::with_device(
            EngineKind::Ocl,
            RuntimeKind::Ocl,
            device(DeviceCapabilities::with_usm(
                8 << 30,
                [AllocationType::UsmHost, AllocationType::UsmDevice],
            )),
        )
        .unwrap()
    }

    #[test]
    fn test_max_memory_size_at_least_device_max() {
        let engine = usm_engine();
        assert!(engine.max_memory_size() >= 8 << 30);
    }

    #[test]
    fn test_lockable_type_on_usm_device() {
        let engine = usm_engine();
        assert_eq!(
            engine.get_lockable_preferred_type(false).unwrap(),
            AllocationType::UsmHost
        );
        assert_eq!(
            engine.get_lockable_preferred_type(true).unwrap(),
            AllocationType::Default
        );
    }

    #[test]
    fn test_negotiation_failure_names_device() {
        let engine = Engine::with_device(
            EngineKind::Ocl,
            RuntimeKind::Ocl,
            device(DeviceCapabilities::with_usm(1 << 30, [])),
        )
        .unwrap();

        let err = engine.get_preferred_type(false).unwrap_err();
        assert!(err.to_string().contains("test-gpu"));
        let err = engine.get_lockable_preferred_type(false).unwrap_err();
        assert!(err.to_string().contains("test-gpu"));
    }

    #[test]
    fn test_usage_forwarding() {
        let engine = usm_engine();
        engine.add_memory_used(2048, AllocationType::UsmDevice);
        assert_eq!(engine.used(AllocationType::UsmDevice), 2048);
        assert_eq!(engine.peak_used(AllocationType::UsmDevice), 2048);

        engine.subtract_memory_used(2048, AllocationType::UsmDevice).unwrap();
        assert_eq!(engine.used(AllocationType::UsmDevice), 0);
        assert_eq!(engine.peak_used_total(), 2048);
    }

    #[test]
    fn test_subtract_untracked_is_usage_error() {
        let engine = usm_engine();
        let result = engine.subtract_memory_used(64, AllocationType::UsmShared);
        assert!(matches!(result, Err(EngineError::Tracker(_))));
    }
}
