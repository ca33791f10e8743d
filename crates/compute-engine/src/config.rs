// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Engine configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! engine_kind = "ocl"
//! runtime_kind = "ocl"
//! device_id = "0"
//! ```

use device_catalog::{EngineKind, RuntimeKind};
use std::path::Path;

/// Configuration for engine creation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Engine kind name; currently only `"ocl"`.
    pub engine_kind: String,
    /// Runtime kind name; currently only `"ocl"`.
    pub runtime_kind: String,
    /// Specific device id to select. When unset (or when the id is not
    /// among the enumerated devices) the first enumerated device is used.
    pub device_id: Option<String>,
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, super::EngineError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::EngineError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, super::EngineError> {
        toml::from_str(toml_str)
            .map_err(|e| super::EngineError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, super::EngineError> {
        toml::to_string_pretty(self)
            .map_err(|e| super::EngineError::Config(format!("TOML serialise error: {e}")))
    }

    /// Resolves the engine kind; an unrecognised name is an immediate
    /// configuration error, not retried.
    pub fn parse_engine_kind(&self) -> Result<EngineKind, super::EngineError> {
        match self.engine_kind.to_lowercase().as_str() {
            "ocl" => Ok(EngineKind::Ocl),
            other => Err(super::EngineError::Config(format!(
                "unknown engine kind '{other}'; expected 'ocl'"
            ))),
        }
    }

    /// Resolves the runtime kind.
    pub fn parse_runtime_kind(&self) -> Result<RuntimeKind, super::EngineError> {
        match self.runtime_kind.to_lowercase().as_str() {
            "ocl" => Ok(RuntimeKind::Ocl),
            other => Err(super::EngineError::Config(format!(
                "unknown runtime kind '{other}'; expected 'ocl'"
            ))),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_kind: "ocl".to_string(),
            runtime_kind: "ocl".to_string(),
            device_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = EngineConfig::default();
        assert_eq!(c.parse_engine_kind().unwrap(), EngineKind::Ocl);
        assert_eq!(c.parse_runtime_kind().unwrap(), RuntimeKind::Ocl);
        assert!(c.device_id.is_none());
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
engine_kind = "ocl"
runtime_kind = "ocl"
device_id = "1"
"#;
        let c = EngineConfig::from_toml(toml).unwrap();
        assert_eq!(c.engine_kind, "ocl");
        assert_eq!(c.device_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = EngineConfig {
            device_id: Some("2".into()),
            ..Default::default()
        };
        let toml = c.to_toml().unwrap();
        let back = EngineConfig::from_toml(&toml).unwrap();
        assert_eq!(back.engine_kind, c.engine_kind);
        assert_eq!(back.device_id, c.device_id);
    }

    #[test]
    fn test_unknown_engine_kind() {
        let c = EngineConfig {
            engine_kind: "cuda".into(),
            ..Default::default()
        };
        let err = c.parse_engine_kind().unwrap_err();
        assert!(err.to_string().contains("cuda"));
    }

    #[test]
    fn test_kind_names_are_case_insensitive() {
        let c = EngineConfig {
            engine_kind: "OCL".into(),
            runtime_kind: "Ocl".into(),
            device_id: None,
        };
        assert_eq!(c.parse_engine_kind().unwrap(), EngineKind::Ocl);
        assert_eq!(c.parse_runtime_kind().unwrap(), RuntimeKind::Ocl);
    }
}
