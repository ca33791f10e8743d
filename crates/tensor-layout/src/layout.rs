// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The full memory layout of a tensor allocation request.

use crate::{DType, Format, Shape};
use std::fmt;

/// Describes one memory allocation request: shape, element type, and
/// physical format.
///
/// # Examples
/// ```
/// use tensor_layout::{DType, Format, Layout, Shape};
///
/// let l = Layout::new(Shape::matrix(128, 256), DType::F32, Format::Bfyx);
/// assert_eq!(l.bytes_count(), 128 * 256 * 4);
/// assert!(!l.is_image_layout());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Layout {
    shape: Shape,
    dtype: DType,
    format: Format,
}

impl Layout {
    /// Creates a layout from its parts.
    pub fn new(shape: Shape, dtype: DType, format: Format) -> Self {
        Self {
            shape,
            dtype,
            format,
        }
    }

    /// Creates a linear (default-format) layout.
    pub fn linear(shape: Shape, dtype: DType) -> Self {
        Self::new(shape, dtype, Format::default())
    }

    /// Returns the shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the element data type.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Returns the physical format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Returns the total size of the described buffer in bytes.
    pub fn bytes_count(&self) -> u64 {
        self.shape.size_bytes(self.dtype) as u64
    }

    /// Returns `true` when this layout is backed by 2-D image memory.
    ///
    /// Image layouts steer allocation-type negotiation: they are always
    /// served by the default device allocator, never by USM.
    pub fn is_image_layout(&self) -> bool {
        self.format.is_image()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.shape, self.dtype, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_count() {
        let l = Layout::linear(Shape::new(vec![1, 3, 8, 8]), DType::F16);
        assert_eq!(l.bytes_count(), 3 * 8 * 8 * 2);
    }

    #[test]
    fn test_is_image_layout() {
        let linear = Layout::linear(Shape::matrix(4, 4), DType::F32);
        let image = Layout::new(Shape::matrix(4, 4), DType::F32, Format::Image2dRgba);
        assert!(!linear.is_image_layout());
        assert!(image.is_image_layout());
    }

    #[test]
    fn test_serde_roundtrip() {
        let l = Layout::new(Shape::matrix(2, 2), DType::I8, Format::Image2dWeights);
        let json = serde_json::to_string(&l).unwrap();
        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, l);
    }

    #[test]
    fn test_display() {
        let l = Layout::linear(Shape::matrix(2, 3), DType::F32);
        assert_eq!(l.to_string(), "[2×3] f32 bfyx");
    }
}
