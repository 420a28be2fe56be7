// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types exchanged between a geometry provider and the model engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in the host document's coordinate system
///
/// Coordinates are raw host values; rounding to export precision happens
/// when a structural node is built from the point.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Type-safe identifier of a provenance unit
///
/// Allocated per ingested bundle, so two structurally identical bundles
/// still carry distinct ids. Marker emission during export compares these
/// ids, never bundle contents.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct ProvenanceId(pub u32);

impl fmt::Display for ProvenanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of structural entity, closed over the supported SOFiSTiK records
///
/// Each variant carries its export template as data: the record keyword
/// emitted on element lines and the plural spelling used by provenance
/// tags. Unknown tags are not representable; they are skipped upstream.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A 3D point entity (`node` record)
    Node,
    /// A bending line element (`beam` record)
    Beam,
    /// An axial-only line element (`trus` record)
    Truss,
    /// A tension-only line element (`cabl` record)
    Cable,
}

impl ElementKind {
    /// SOFiSTiK record keyword for this kind
    pub fn token(self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Beam => "beam",
            ElementKind::Truss => "trus",
            ElementKind::Cable => "cabl",
        }
    }

    /// Plural spelling used by provenance-unit type tags
    pub fn plural(self) -> &'static str {
        match self {
            ElementKind::Node => "nodes",
            ElementKind::Beam => "beams",
            ElementKind::Truss => "trusses",
            ElementKind::Cable => "cables",
        }
    }

    /// Parse a provenance-unit type tag
    ///
    /// Returns `None` for tags outside the supported set (springs, quads,
    /// arbitrary organizational layers); callers skip those silently.
    pub fn from_plural(tag: &str) -> Option<Self> {
        match tag {
            "nodes" => Some(ElementKind::Node),
            "beams" => Some(ElementKind::Beam),
            "trusses" => Some(ElementKind::Truss),
            "cables" => Some(ElementKind::Cable),
            _ => None,
        }
    }

    /// Whether this kind references two nodes rather than carrying a point
    pub fn is_line_element(self) -> bool {
        !matches!(self, ElementKind::Node)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Decoded object label: number/name/property triple
///
/// Produced by a [`LabelDecoder`](crate::LabelDecoder). A label without a
/// parseable number yields `number: None` (the unassigned sentinel); a
/// malformed label yields all defaults, never an error.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Default)]
pub struct DecodedLabel {
    /// Explicitly authored entity number, if any
    pub number: Option<u32>,
    /// Display name, appended to the export line as a trailing comment
    pub name: String,
    /// Structural property string, passed through verbatim
    pub property: String,
}

/// Geometry carried by a single record
///
/// A curve always exposes both endpoints; a line element with a missing
/// reference is unrepresentable by construction.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordGeometry {
    /// A free-standing point object
    Point(Point3),
    /// A curve, reduced to its two endpoints
    Curve { start: Point3, end: Point3 },
}

/// One raw geometric object plus its decoded label
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeometryRecord {
    /// Decoded label triple (defaults for unlabeled objects)
    #[serde(default)]
    pub label: DecodedLabel,
    /// Point or curve geometry
    pub geometry: RecordGeometry,
}

impl GeometryRecord {
    /// Create an unlabeled point record
    pub fn point(point: Point3) -> Self {
        Self {
            label: DecodedLabel::default(),
            geometry: RecordGeometry::Point(point),
        }
    }

    /// Create an unlabeled curve record
    pub fn curve(start: Point3, end: Point3) -> Self {
        Self {
            label: DecodedLabel::default(),
            geometry: RecordGeometry::Curve { start, end },
        }
    }

    /// Attach a decoded label
    pub fn with_label(mut self, label: DecodedLabel) -> Self {
        self.label = label;
        self
    }
}

/// One provenance unit worth of geometry
///
/// Carries the raw type tag (plural spelling), the numbering-group key,
/// the unit's display name and property string, whether the unit is model
/// input at all, and the records themselves. The tag stays a string here:
/// unrecognized tags must survive transport so the engine can skip them
/// deliberately.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeometryBundle {
    /// Raw type tag, e.g. `"nodes"` or `"beams"`
    pub tag: String,
    /// Numbering-group key; `None` = ungrouped
    #[serde(default)]
    pub group: Option<u32>,
    /// Display name of the provenance unit
    #[serde(default)]
    pub name: String,
    /// Property string announced by the provenance unit
    #[serde(default)]
    pub property: String,
    /// Whether the unit is marked as model input
    pub model_input: bool,
    /// Raw records, in caller-determined order
    pub records: Vec<GeometryRecord>,
}

impl GeometryBundle {
    /// Create an empty model-input bundle with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            group: None,
            name: String::new(),
            property: String::new(),
            model_input: true,
            records: Vec::new(),
        }
    }

    /// Set the numbering group
    pub fn with_group(mut self, group: u32) -> Self {
        self.group = Some(group);
        self
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the property string
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = property.into();
        self
    }

    /// Mark the bundle as organizational (not model input)
    pub fn not_model_input(mut self) -> Self {
        self.model_input = false;
        self
    }

    /// Append a record
    pub fn with_record(mut self, record: GeometryRecord) -> Self {
        self.records.push(record);
        self
    }
}
