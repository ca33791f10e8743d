// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for layout validation.

/// Errors produced when querying or validating a layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A dimension index was requested that the shape does not have.
    #[error("dimension index {index} out of range for rank-{rank} shape")]
    DimensionOutOfRange { index: usize, rank: usize },
}
