// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Descriptors for importing externally-owned native memory.
//!
//! A [`SharedMemDescriptor`] is a transient, tagged value: it names what
//! kind of native resource is being imported and carries the
//! platform-appropriate handle fields. It is consumed immediately by
//! [`crate::Backend::reinterpret_handle`] and never owns the underlying
//! resource — lifetime of the native object stays with its original
//! owner (application, driver, or OS).

/// Opaque handle to a native resource (buffer, pointer, image).
///
/// Pointer-sized and never dereferenced or freed by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(usize);

impl NativeHandle {
    /// Wraps a raw handle value.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Wraps a raw pointer.
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }

    /// Returns the raw handle value.
    pub fn as_raw(self) -> usize {
        self.0
    }
}

/// A display/video surface handle, in its platform encoding.
///
/// POSIX video-acceleration surfaces are integer ids; Windows surfaces
/// are pointer-like handles. The two encodings are structurally
/// different but semantically equivalent, so both are modeled explicitly
/// instead of coercing one into the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceHandle {
    /// POSIX VA-API surface id.
    Va(u64),
    /// Windows pointer-like surface handle.
    Dx(NativeHandle),
}

/// The kind of native resource a descriptor wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SharedMemKind {
    /// Device buffer object.
    Buffer,
    /// Unified-shared-memory pointer.
    Usm,
    /// Device image object.
    Image,
    /// Video-acceleration surface.
    VaSurface,
    /// Windows composition buffer.
    DxBuffer,
}

impl SharedMemKind {
    /// Returns a human-readable label for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            SharedMemKind::Buffer => "buffer",
            SharedMemKind::Usm => "usm",
            SharedMemKind::Image => "image",
            SharedMemKind::VaSurface => "va_surface",
            SharedMemKind::DxBuffer => "dx_buffer",
        }
    }
}

impl std::fmt::Display for SharedMemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged descriptor for one externally-owned native resource.
///
/// Built by the engine's `share_*` operations and handed to the backend;
/// field population depends on the kind:
///
/// | kind        | `handle` | `surface` | `plane` |
/// |-------------|----------|-----------|---------|
/// | `Buffer`    | set      | –         | –       |
/// | `Usm`       | set      | –         | –       |
/// | `Image`     | set      | –         | –       |
/// | `VaSurface` | –        | set       | set     |
/// | `DxBuffer`  | set      | –         | –       |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedMemDescriptor {
    kind: SharedMemKind,
    handle: Option<NativeHandle>,
    surface: Option<SurfaceHandle>,
    plane: Option<u32>,
}

impl SharedMemDescriptor {
    /// Descriptor for a native buffer object.
    pub fn buffer(handle: NativeHandle) -> Self {
        Self {
            kind: SharedMemKind::Buffer,
            handle: Some(handle),
            surface: None,
            plane: None,
        }
    }

    /// Descriptor for a unified-shared-memory pointer.
    pub fn usm(handle: NativeHandle) -> Self {
        Self {
            kind: SharedMemKind::Usm,
            handle: Some(handle),
            surface: None,
            plane: None,
        }
    }

    /// Descriptor for a native image object.
    pub fn image(handle: NativeHandle) -> Self {
        Self {
            kind: SharedMemKind::Image,
            handle: Some(handle),
            surface: None,
            plane: None,
        }
    }

    /// Descriptor for a video-acceleration surface plane.
    pub fn surface(surface: SurfaceHandle, plane: u32) -> Self {
        Self {
            kind: SharedMemKind::VaSurface,
            handle: None,
            surface: Some(surface),
            plane: Some(plane),
        }
    }

    /// Descriptor for a Windows composition buffer.
    pub fn dx_buffer(handle: NativeHandle) -> Self {
        Self {
            kind: SharedMemKind::DxBuffer,
            handle: Some(handle),
            surface: None,
            plane: None,
        }
    }

    /// The resource kind tag.
    pub fn kind(&self) -> SharedMemKind {
        self.kind
    }

    /// The native handle, for non-surface kinds.
    pub fn handle(&self) -> Option<NativeHandle> {
        self.handle
    }

    /// The surface handle, for `VaSurface` descriptors.
    pub fn surface_handle(&self) -> Option<SurfaceHandle> {
        self.surface
    }

    /// The surface plane index, for `VaSurface` descriptors.
    pub fn plane(&self) -> Option<u32> {
        self.plane
    }
}
