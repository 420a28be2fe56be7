// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerance-based spatial equality between nodes
//!
//! Node coincidence is proximity equality, not exact equality: it is
//! non-transitive in pathological point clouds (A≈B, B≈C, A≉C). The
//! registry copes by only ever comparing an incoming node against nodes
//! already accepted, in insertion order, first match wins. The outcome can
//! therefore depend on ingestion order; that is accepted behavior.

use crate::entity::Node;
use nalgebra::Point3;

/// How close two nodes have to be to count as one, in host units
pub const NODE_TOLERANCE: f64 = 0.1;

/// Euclidean distance between two nodes
pub fn distance(a: &Node, b: &Node) -> f64 {
    let pa = Point3::new(a.x(), a.y(), a.z());
    let pb = Point3::new(b.x(), b.y(), b.z());
    nalgebra::distance(&pa, &pb)
}

/// Whether two nodes overlap (distance strictly below [`NODE_TOLERANCE`])
///
/// Strict `<`: two nodes exactly at the tolerance apart stay distinct.
pub fn coincident(a: &Node, b: &Node) -> bool {
    distance(a, b) < NODE_TOLERANCE
}
