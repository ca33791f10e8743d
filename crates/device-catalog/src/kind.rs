// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Engine and runtime kind tags.

/// The backend family an engine is built for.
///
/// A closed set: the engine factory dispatches on this tag, and an
/// unrecognised kind in configuration is rejected up front rather than
/// discovered at allocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// OpenCL-class device engine.
    Ocl,
}

impl EngineKind {
    /// Returns a human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Ocl => "ocl",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The runtime flavour the engine drives devices through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeKind {
    /// The OpenCL runtime.
    Ocl,
}

impl RuntimeKind {
    /// Returns a human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeKind::Ocl => "ocl",
        }
    }
}

impl std::fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(EngineKind::Ocl.to_string(), "ocl");
        assert_eq!(RuntimeKind::Ocl.to_string(), "ocl");
    }

    #[test]
    fn test_serde_form() {
        assert_eq!(serde_json::to_string(&EngineKind::Ocl).unwrap(), "\"ocl\"");
        let k: EngineKind = serde_json::from_str("\"ocl\"").unwrap();
        assert_eq!(k, EngineKind::Ocl);
    }
}
