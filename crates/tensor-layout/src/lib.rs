// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-layout
//!
//! Lightweight descriptors for tensor memory: shape, element type, and
//! memory format.
//!
//! This crate provides:
//! - [`Shape`] — dimension descriptors with element/byte counting.
//! - [`DType`] — supported element data types (f32, f16, bf16, i8).
//! - [`Format`] — the physical memory order of a tensor, including 2-D
//!   image-backed formats used by GPU samplers.
//! - [`Layout`] — the triple `(shape, dtype, format)` that fully describes
//!   a memory allocation request.
//!
//! The engine uses a [`Layout`] to size allocations ([`Layout::bytes_count`])
//! and to steer allocation-type negotiation ([`Layout::is_image_layout`] —
//! image-backed memory never uses unified shared memory).

mod dtype;
mod error;
mod format;
mod layout;
mod shape;

pub use dtype::DType;
pub use error::LayoutError;
pub use format::Format;
pub use layout::Layout;
pub use shape::Shape;
