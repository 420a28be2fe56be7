// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SOFi-Lite Writer - Deduplicating registry and SOFiSTiK text writer
//!
//! This crate turns geometry bundles (see `sofi-lite-model`) into a
//! canonical structural model and renders it as `sofimsha` text input.
//!
//! # Features
//!
//! - **Spatial deduplication** - coincident points collapse onto one node
//!   (tolerance-based, insertion-order sensitive by design)
//! - **Stable numbering** - lowest-free-number assignment per numbering
//!   group, with deterministic conflict precedence
//! - **Diagnostics as output** - numbering conflicts degrade to commented
//!   warning lines in the export, never to errors
//! - **Deterministic export** - byte-identical output for an unmutated
//!   model
//!
//! # Example
//!
//! ```ignore
//! use sofi_lite_writer::StructuralModel;
//! use sofi_lite_model::GeometrySource;
//!
//! let mut model = StructuralModel::new("structure", 0.001);
//! model.ingest_source(&source)?;
//! print!("{}", model.export());
//! ```

mod entity;
mod model;
mod registry;
mod spatial;
mod units;
mod writer;

pub use entity::{EntityCore, EntityRef, LineElement, ModelEntity, Node};
pub use model::StructuralModel;
pub use registry::Registry;
pub use spatial::{coincident, distance, NODE_TOLERANCE};
pub use units::{scales, UnitSystem};

use sofi_lite_model::{GeometrySource, Result};

/// Quick export function for simple use cases
///
/// Builds a model named `name`, ingests every bundle the source yields,
/// and returns the rendered export text.
pub fn write(name: &str, conversion_factor: f64, source: &dyn GeometrySource) -> Result<String> {
    let mut model = StructuralModel::new(name, conversion_factor);
    model.ingest_source(source)?;
    Ok(model.export())
}
