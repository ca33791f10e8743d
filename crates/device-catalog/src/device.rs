// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The device capability view and the discovery boundary.

use crate::{DeviceCapabilities, EngineKind, RuntimeKind};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Read-only view of one compute device.
///
/// The engine holds a shared reference to a `Device` for its whole
/// lifetime; the device must outlive the engine. Implementations wrap
/// whatever the platform's discovery layer found.
pub trait Device: Send + Sync {
    /// Human-readable device name, used in diagnostics and fatal errors.
    fn name(&self) -> &str;

    /// The device's memory capabilities. Immutable per device.
    fn capabilities(&self) -> &DeviceCapabilities;
}

/// The device discovery boundary.
///
/// Implementations enumerate the devices usable for a given
/// `(engine kind, runtime kind)` pair. The returned map is keyed by a
/// stable device id; `BTreeMap` fixes the iteration order so that
/// "first device" selection is deterministic across runs.
pub trait DeviceDirectory {
    /// Enumerates available devices for the given kinds.
    ///
    /// An empty map means no suitable device exists; the engine factory
    /// treats that as a fatal configuration error.
    fn enumerate(
        &self,
        engine_kind: EngineKind,
        runtime_kind: RuntimeKind,
    ) -> BTreeMap<String, Arc<dyn Device>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDevice {
        name: String,
        caps: DeviceCapabilities,
    }

    impl Device for FixedDevice {
        fn name(&self) -> &str {
            &self.name
        }
        fn capabilities(&self) -> &DeviceCapabilities {
            &self.caps
        }
    }

    struct FixedDirectory {
        devices: BTreeMap<String, Arc<dyn Device>>,
    }

    impl DeviceDirectory for FixedDirectory {
        fn enumerate(
            &self,
            _engine_kind: EngineKind,
            _runtime_kind: RuntimeKind,
        ) -> BTreeMap<String, Arc<dyn Device>> {
            self.devices.clone()
        }
    }

    #[test]
    fn test_enumeration_order_is_stable() {
        let mut devices: BTreeMap<String, Arc<dyn Device>> = BTreeMap::new();
        for id in ["2", "0", "1"] {
            devices.insert(
                id.to_string(),
                Arc::new(FixedDevice {
                    name: format!("gpu-{id}"),
                    caps: DeviceCapabilities::host_only(1 << 30),
                }),
            );
        }
        let dir = FixedDirectory { devices };

        let listed = dir.enumerate(EngineKind::Ocl, RuntimeKind::Ocl);
        let ids: Vec<_> = listed.keys().cloned().collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
        assert_eq!(listed["0"].name(), "gpu-0");
    }
}
