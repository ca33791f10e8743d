// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Physical memory formats for tensor buffers.

/// The physical order of a tensor in memory.
///
/// Linear formats are plain strided buffers. Image formats describe
/// 2-D-image-backed memory (GPU sampler/texture storage), which has
/// different allocation rules — see [`Format::is_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Format {
    /// Batch, feature, spatial-y, spatial-x — the default linear order.
    Bfyx,
    /// Batch, spatial-y, spatial-x, feature (channels-last).
    Byxf,
    /// Weights stored as a 2-D image for sampler access.
    Image2dWeights,
    /// Activations stored as a 2-D RGBA image.
    Image2dRgba,
}

impl Format {
    /// Returns `true` for 2-D-image-backed formats.
    ///
    /// Image-backed memory is allocated through the device's image
    /// allocator and is never placed in unified shared memory.
    pub fn is_image(self) -> bool {
        matches!(self, Format::Image2dWeights | Format::Image2dRgba)
    }

    /// Returns a human-readable label for this format.
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Bfyx => "bfyx",
            Format::Byxf => "byxf",
            Format::Image2dWeights => "image_2d_weights",
            Format::Image2dRgba => "image_2d_rgba",
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::Bfyx
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
