// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SOFi-Lite Model - Trait definitions and shared types for SOFiSTiK model generation
//!
//! This crate provides the core abstractions for turning loosely-organized CAD
//! geometry into SOFiSTiK (`sofimsha`) text input. It defines the record types
//! exchanged with a host CAD document and the traits implemented by external
//! collaborators, allowing the engine to stay independent of any particular
//! CAD backend.
//!
//! # Architecture
//!
//! The crate is organized around two collaborator traits:
//!
//! - [`GeometrySource`] - Yields geometry bundles, one per provenance unit
//!   (typically a CAD layer)
//! - [`LabelDecoder`] - Turns a free-text object label into a
//!   number/name/property triple
//!
//! plus the shared data types ([`GeometryBundle`], [`GeometryRecord`],
//! [`DecodedLabel`], [`ElementKind`], [`Point3`]) those traits traffic in.
//!
//! # Example
//!
//! ```ignore
//! use sofi_lite_model::{GeometrySource, GeometryBundle};
//!
//! // Use any provider that implements GeometrySource
//! let source: Box<dyn GeometrySource> = get_source();
//! for bundle in source.bundles()? {
//!     println!("{}: {} records", bundle.tag, bundle.records.len());
//! }
//! ```

pub mod error;
pub mod traits;
pub mod types;

// Re-export all public types
pub use error::*;
pub use traits::*;
pub use types::*;
