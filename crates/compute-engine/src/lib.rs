// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # compute-engine
//!
//! The memory side of a heterogeneous-compute runtime: deciding which
//! allocation strategy to use on a given device, accounting for live and
//! peak usage, and importing externally-owned native memory.
//!
//! The engine takes:
//! - A [`device_catalog::Device`] capability view (discrete GPU with USM
//!   variants, or a host-only fallback).
//! - A [`Backend`] that performs the real allocation and mapping calls.
//! - A [`memory_tracker::MemoryTracker`] it owns for usage accounting.
//!
//! # Allocation-Type Negotiation
//! [`policy`] holds the pure decision functions: given device
//! capabilities and whether the layout is image-backed, pick a lockable
//! preferred type (`usm_shared` → `usm_host`) or a general preferred type
//! (`usm_device` → `usm_host`), falling back to `default` when USM is
//! unavailable or the layout is an image. When a device misreports its
//! capabilities and no type is viable, negotiation fails fatally — the
//! engine never silently downgrades to an unrequested type.
//!
//! # Imported Memory
//! The `share_*` family wraps caller-owned native handles (buffers, USM
//! pointers, images, video surfaces) in a [`SharedMemDescriptor`] and
//! hands it to the backend. The engine never owns those resources.
//!
//! # Example
//! ```no_run
//! use compute_engine::{Engine, EngineConfig};
//! use device_catalog::DeviceDirectory;
//!
//! # fn example(directory: &dyn DeviceDirectory) -> Result<(), compute_engine::EngineError> {
//! let engine = Engine::create(&EngineConfig::default(), directory)?;
//! println!("max usable memory: {} bytes", engine.max_memory_size());
//! # Ok(())
//! # }
//! ```

mod backend;
mod config;
mod engine;
mod error;
mod memory;
mod ocl;
pub mod policy;
mod shared;

pub use backend::Backend;
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use memory::{Memory, MemorySource};
pub use ocl::OclBackend;
pub use shared::{NativeHandle, SharedMemDescriptor, SharedMemKind, SurfaceHandle};
