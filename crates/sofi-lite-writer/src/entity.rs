// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural entities and the capability trait the registries operate on
//!
//! Nodes and line elements share one metadata struct ([`EntityCore`]) and
//! implement [`ModelEntity`] for identity, numbering, and export-line
//! rendering. There is no inheritance: a registry is generic over the
//! capability trait.

use crate::registry::Registry;
use sofi_lite_model::{DecodedLabel, ElementKind, Point3, ProvenanceId};
use std::fmt::Write as _;

/// Coordinates are fixed to five decimal digits at construction. Rounding
/// is load-bearing: coincidence tests and export strings both read the
/// rounded values.
const COORD_SCALE: f64 = 1e5;

fn round_coordinate(value: f64) -> f64 {
    (value * COORD_SCALE).round() / COORD_SCALE
}

/// Handle to an entity owned by a [`Registry`]
///
/// Handles are registry identity: two handles refer to the same entity iff
/// they are equal. Line elements store handles into the node registry
/// rather than coordinates, so renumbering a node never detaches it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EntityRef(pub(crate) u32);

impl EntityRef {
    /// Position of the entity within its registry's insertion order
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity and numbering metadata shared by every entity kind
#[derive(Clone, PartialEq, Debug, Default)]
pub struct EntityCore {
    /// Entity number, unique within `(kind, group)`; `None` until resolved
    pub number: Option<u32>,
    /// Numbering-group key; `None` = ungrouped
    pub group: Option<u32>,
    /// True iff the number was explicitly authored in the object label
    pub strict_numbering: bool,
    /// Display name, exported as a trailing `$` comment when non-empty
    pub name: String,
    /// Structural property string, exported verbatim
    pub property: String,
    /// Originating provenance unit; `None` for anonymous line endpoints
    pub provenance: Option<ProvenanceId>,
}

impl EntityCore {
    fn from_label(
        label: DecodedLabel,
        group: Option<u32>,
        provenance: Option<ProvenanceId>,
    ) -> Self {
        Self {
            strict_numbering: label.number.is_some(),
            number: label.number,
            group,
            name: label.name,
            property: label.property,
            provenance,
        }
    }

    fn append_name(&self, line: &mut String) {
        if !self.name.is_empty() {
            let _ = write!(line, "$ {}", self.name);
        }
    }
}

/// Capability interface implemented by every registrable entity kind
///
/// The registry uses `identical_to` for first-match deduplication and
/// `core`/`core_mut` for number resolution; the exporter uses
/// `export_line`. Line elements resolve their endpoint numbers through the
/// node registry passed in, which is why the method takes it.
pub trait ModelEntity {
    /// The entity's kind tag
    fn kind(&self) -> ElementKind;

    /// Shared metadata, read-only
    fn core(&self) -> &EntityCore;

    /// Shared metadata, for number resolution by the registry
    fn core_mut(&mut self) -> &mut EntityCore;

    /// Equality predicate used for registry deduplication
    fn identical_to(&self, other: &Self) -> bool;

    /// Render this entity's export record
    fn export_line(&self, nodes: &Registry<Node>) -> String;
}

/// A structural node: one 3D point with identity metadata
///
/// Immutable after creation except for `number` (set once by the registry,
/// or moved aside by conflict resolution).
#[derive(Clone, PartialEq, Debug)]
pub struct Node {
    core: EntityCore,
    x: f64,
    y: f64,
    z: f64,
}

impl Node {
    /// Build a node from a labeled point record
    pub fn new(
        point: Point3,
        label: DecodedLabel,
        group: Option<u32>,
        provenance: Option<ProvenanceId>,
    ) -> Self {
        Self {
            core: EntityCore::from_label(label, group, provenance),
            x: round_coordinate(point.x),
            y: round_coordinate(point.y),
            z: round_coordinate(point.z),
        }
    }

    /// Build an anonymous node, as used for line-element endpoints
    ///
    /// No number, no name, no property, no group, no provenance: if the
    /// location was already registered the endpoint collapses onto the
    /// existing node, otherwise it gets the next auto number.
    pub fn anonymous(point: Point3) -> Self {
        Self::new(point, DecodedLabel::default(), None, None)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        crate::spatial::distance(self, other)
    }
}

impl ModelEntity for Node {
    fn kind(&self) -> ElementKind {
        ElementKind::Node
    }

    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn identical_to(&self, other: &Self) -> bool {
        crate::spatial::coincident(self, other)
    }

    fn export_line(&self, _nodes: &Registry<Node>) -> String {
        let no = self.core.number.unwrap_or(0);
        let mut line = format!(
            "node no {} x {}*#conversion_factor y {}*#conversion_factor z {}*#conversion_factor {}",
            no, self.x, self.y, self.z, self.core.property
        );
        self.core.append_name(&mut line);
        line
    }
}

/// A line element: beam, truss, or cable referencing two registered nodes
#[derive(Clone, PartialEq, Debug)]
pub struct LineElement {
    core: EntityCore,
    kind: ElementKind,
    start: EntityRef,
    end: EntityRef,
}

impl LineElement {
    /// Build a line element between two node handles
    ///
    /// `kind` must be a line-element kind; both handles must come from the
    /// node registry the element will be exported against.
    pub fn new(
        kind: ElementKind,
        label: DecodedLabel,
        group: Option<u32>,
        start: EntityRef,
        end: EntityRef,
        provenance: Option<ProvenanceId>,
    ) -> Self {
        debug_assert!(kind.is_line_element());
        Self {
            core: EntityCore::from_label(label, group, provenance),
            kind,
            start,
            end,
        }
    }

    /// Start and end node handles, in role order
    pub fn endpoints(&self) -> (EntityRef, EntityRef) {
        (self.start, self.end)
    }
}

impl ModelEntity for LineElement {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    /// Identical iff both endpoints are the same node, in the same role.
    /// Start and end are not interchangeable.
    fn identical_to(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }

    fn export_line(&self, nodes: &Registry<Node>) -> String {
        let no = self.core.number.unwrap_or(0);
        let mut line = format!(
            "{} no {} na {} ne {} {}",
            self.kind.token(),
            no,
            nodes.number_of(self.start),
            nodes.number_of(self.end),
            self.core.property
        );
        self.core.append_name(&mut line);
        line
    }
}
