// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model assembly and export

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while assembling or writing a structural model
///
/// Numbering conflicts, unparseable labels, and unrecognized provenance
/// units are NOT errors: they are absorbed as registry warnings or silent
/// skips. Only collaborator failures surface here.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The geometry provider failed to deliver its bundles
    #[error("geometry source error: {0}")]
    Source(String),

    /// Host unit-system code with no known conversion factor
    #[error("unknown unit system code: {0}")]
    UnknownUnitSystem(u32),

    /// IO error while writing export text to a sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// Create a new geometry-source error
    pub fn source(msg: impl Into<String>) -> Self {
        ModelError::Source(msg.into())
    }
}
