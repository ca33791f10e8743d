// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for catalog and host probing.

/// Errors from reading host facts (currently the physical RAM probe).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A system file could not be read.
    #[error("failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A system file did not have the expected shape.
    #[error("failed to parse '{path}': {detail}")]
    ParseError { path: String, detail: String },
}
