// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator traits for geometry acquisition and label decoding
//!
//! These traits are the seams between the model engine and the host CAD
//! document. The engine never talks to a CAD API directly; it consumes
//! whatever a provider hands over, in the order the provider chose.

use crate::{DecodedLabel, GeometryBundle, Result};

/// Geometry/metadata provider - entry point for model ingestion
///
/// Implementations enumerate the host document's provenance units (layers,
/// selections, import batches) and reduce each to a [`GeometryBundle`].
/// Bundle order is significant: deduplication matches and number assignment
/// depend on ingestion order, so providers must yield a deterministic,
/// caller-controlled sequence.
///
/// # Example
///
/// ```ignore
/// use sofi_lite_model::{GeometrySource, GeometryBundle, Result};
///
/// struct LayerSource { /* host document handle */ }
///
/// impl GeometrySource for LayerSource {
///     fn bundles(&self) -> Result<Vec<GeometryBundle>> {
///         // walk layers, decode labels, collect records
///         # unimplemented!()
///     }
/// }
/// ```
pub trait GeometrySource {
    /// Yield all bundles, one per provenance unit, in ingestion order
    ///
    /// # Returns
    /// The bundles on success, or a `ModelError::Source` if the host
    /// document could not be read
    fn bundles(&self) -> Result<Vec<GeometryBundle>>;
}

/// Label decoder - turns a free-text object label into a structured triple
///
/// Decoding is pure and infallible: a label without a parseable number
/// yields `number: None`, and a malformed label yields all defaults.
pub trait LabelDecoder {
    /// Decode one object label
    fn decode(&self, label: &str) -> DecodedLabel;
}
