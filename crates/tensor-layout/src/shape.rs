// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor shape descriptors and dimension utilities.

use crate::LayoutError;
use std::fmt;

/// Describes the dimensionality of a tensor buffer.
///
/// Shapes are immutable once created and provide convenience methods for
/// computing element counts and memory footprints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Creates a new shape from the given dimensions.
    ///
    /// # Examples
    /// ```
    /// use tensor_layout::Shape;
    /// let s = Shape::new(vec![2, 3, 4]);
    /// assert_eq!(s.rank(), 3);
    /// assert_eq!(s.num_elements(), 24);
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Creates a scalar shape (rank 0).
    pub fn scalar() -> Self {
        Self { dims: vec![] }
    }

    /// Creates a 1-D shape.
    pub fn vector(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    /// Creates a 2-D shape (matrix).
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self {
            dims: vec![rows, cols],
        }
    }

    /// Returns the number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the total number of elements.
    ///
    /// For a scalar shape (rank 0), returns 1.
    pub fn num_elements(&self) -> usize {
        if self.dims.is_empty() {
            1
        } else {
            self.dims.iter().product()
        }
    }

    /// Returns the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the size of a specific dimension.
    ///
    /// Requesting a dimension the shape does not have is a validation
    /// error, surfaced rather than silently clamped.
    pub fn dim(&self, index: usize) -> Result<usize, LayoutError> {
        self.dims
            .get(index)
            .copied()
            .ok_or(LayoutError::DimensionOutOfRange {
                index,
                rank: self.dims.len(),
            })
    }

    /// Computes the memory footprint in bytes for a given [`crate::DType`].
    pub fn size_bytes(&self, dtype: super::DType) -> usize {
        self.num_elements() * dtype.size_bytes()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, "×")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DType;

    #[test]
    fn test_num_elements() {
        assert_eq!(Shape::new(vec![2, 3, 4]).num_elements(), 24);
        assert_eq!(Shape::scalar().num_elements(), 1);
        assert_eq!(Shape::vector(7).num_elements(), 7);
    }

    #[test]
    fn test_size_bytes() {
        let s = Shape::matrix(4, 8);
        assert_eq!(s.size_bytes(DType::F32), 4 * 8 * 4);
        assert_eq!(s.size_bytes(DType::I8), 4 * 8);
    }

    #[test]
    fn test_dim_out_of_range() {
        let s = Shape::matrix(2, 2);
        assert_eq!(s.dim(1).unwrap(), 2);
        assert!(matches!(
            s.dim(5),
            Err(LayoutError::DimensionOutOfRange { index: 5, rank: 2 })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::new(vec![1, 3, 224, 224]).to_string(), "[1×3×224×224]");
    }
}
