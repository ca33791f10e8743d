// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # device-catalog
//!
//! Device capability views and the enumeration boundary between the
//! compute engine and whatever discovers real hardware.
//!
//! # Key Components
//! - [`DeviceCapabilities`] — an immutable value describing what a device
//!   can do: global memory ceiling, unified-shared-memory support, and
//!   which allocation types it serves.
//! - [`Device`] — the read-only capability view the engine holds for the
//!   lifetime of an engine instance.
//! - [`DeviceDirectory`] — the discovery boundary: enumerates devices for
//!   an `(engine kind, runtime kind)` pair in a stable order.
//! - [`host_mem`] — one-shot probe of total physical host RAM, memoized
//!   process-wide.
//!
//! Actual hardware discovery (driver queries, platform enumeration) lives
//! outside this crate; tests and embedders provide their own [`Device`]
//! and [`DeviceDirectory`] implementations.

mod capabilities;
mod device;
mod error;
pub mod host_mem;
mod kind;

pub use capabilities::DeviceCapabilities;
pub use device::{Device, DeviceDirectory};
pub use error::CatalogError;
pub use kind::{EngineKind, RuntimeKind};
