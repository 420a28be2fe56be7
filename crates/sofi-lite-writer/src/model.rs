// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! StructuralModel - the assembling owner of all registries
//!
//! The model walks geometry bundles, builds entities, and routes them into
//! the right registry. Line-element endpoints register as anonymous nodes
//! first, so coincident endpoints collapse onto already-known nodes and
//! every element references authoritative handles.

use crate::entity::{LineElement, Node};
use crate::registry::Registry;
use crate::writer;
use sofi_lite_model::{
    ElementKind, GeometryBundle, GeometrySource, ProvenanceId, RecordGeometry, Result,
};
use std::io::Write;

/// Marker metadata remembered per ingested bundle
///
/// One of these exists per `ingest` call that was accepted as model input,
/// keyed by the `ProvenanceId` handed to the bundle's entities. Identity,
/// not value: two structurally identical bundles get two entries.
pub(crate) struct ProvenanceUnit {
    pub(crate) tag: String,
    pub(crate) kind: ElementKind,
    pub(crate) group: Option<u32>,
    pub(crate) name: String,
    pub(crate) property: String,
}

/// The line-element registries, one per kind, in fixed export order
#[derive(Default)]
pub(crate) struct LineRegistries {
    pub(crate) beams: Registry<LineElement>,
    pub(crate) trusses: Registry<LineElement>,
    pub(crate) cables: Registry<LineElement>,
}

impl LineRegistries {
    fn for_kind_mut(&mut self, kind: ElementKind) -> Option<&mut Registry<LineElement>> {
        match kind {
            ElementKind::Beam => Some(&mut self.beams),
            ElementKind::Truss => Some(&mut self.trusses),
            ElementKind::Cable => Some(&mut self.cables),
            ElementKind::Node => None,
        }
    }
}

/// A structural model assembled from geometry bundles
///
/// Created once per run, populated by repeated [`ingest`](Self::ingest)
/// calls (or one [`ingest_source`](Self::ingest_source)), finalized by a
/// single export. Ingestion order is observable: it decides dedup matches,
/// auto numbers, and marker placement.
pub struct StructuralModel {
    pub(crate) name: String,
    pub(crate) conversion_factor: f64,
    pub(crate) gdiv: u32,
    pub(crate) nodes: Registry<Node>,
    pub(crate) lines: LineRegistries,
    pub(crate) provenance: Vec<ProvenanceUnit>,
}

impl StructuralModel {
    /// Create an empty model
    ///
    /// `conversion_factor` maps host-document lengths to the export
    /// target's expected unit (see [`UnitSystem`](crate::UnitSystem)).
    pub fn new(name: impl Into<String>, conversion_factor: f64) -> Self {
        Self {
            name: name.into(),
            conversion_factor,
            gdiv: 1000,
            nodes: Registry::new(),
            lines: LineRegistries::default(),
            provenance: Vec::new(),
        }
    }

    /// Set the numbering-grid divisor emitted in the header (default 1000)
    pub fn with_gdiv(mut self, gdiv: u32) -> Self {
        self.gdiv = gdiv;
        self
    }

    /// Ingest one provenance unit worth of geometry
    ///
    /// Bundles not marked as model input, and bundles with an unrecognized
    /// type tag, are skipped without error. Records whose geometry does not
    /// match the bundle's kind (a curve in a node bundle, a point in a line
    /// bundle) are skipped the same way.
    pub fn ingest(&mut self, bundle: &GeometryBundle) {
        if !bundle.model_input {
            return;
        }
        let Some(kind) = ElementKind::from_plural(&bundle.tag) else {
            return;
        };

        let provenance = ProvenanceId(self.provenance.len() as u32);
        self.provenance.push(ProvenanceUnit {
            tag: bundle.tag.clone(),
            kind,
            group: bundle.group,
            name: bundle.name.clone(),
            property: bundle.property.clone(),
        });

        match kind {
            ElementKind::Node => self.ingest_points(bundle, provenance),
            ElementKind::Beam | ElementKind::Truss | ElementKind::Cable => {
                self.ingest_curves(kind, bundle, provenance)
            }
        }
    }

    fn ingest_points(&mut self, bundle: &GeometryBundle, provenance: ProvenanceId) {
        for record in &bundle.records {
            let RecordGeometry::Point(point) = record.geometry else {
                continue;
            };
            let node = Node::new(point, record.label.clone(), bundle.group, Some(provenance));
            self.nodes.register(node);
        }
    }

    fn ingest_curves(
        &mut self,
        kind: ElementKind,
        bundle: &GeometryBundle,
        provenance: ProvenanceId,
    ) {
        for record in &bundle.records {
            let RecordGeometry::Curve { start, end } = record.geometry else {
                continue;
            };
            // endpoints register as anonymous nodes; a coincident node that
            // already exists is returned instead of a new one
            let start = self.nodes.register(Node::anonymous(start));
            let end = self.nodes.register(Node::anonymous(end));

            let element = LineElement::new(
                kind,
                record.label.clone(),
                bundle.group,
                start,
                end,
                Some(provenance),
            );
            if let Some(registry) = self.lines.for_kind_mut(kind) {
                registry.register(element);
            }
        }
    }

    /// Ingest every bundle a geometry source yields, in source order
    pub fn ingest_source(&mut self, source: &dyn GeometrySource) -> Result<()> {
        for bundle in source.bundles()? {
            self.ingest(&bundle);
        }
        Ok(())
    }

    /// The node registry
    pub fn nodes(&self) -> &Registry<Node> {
        &self.nodes
    }

    /// The beam registry
    pub fn beams(&self) -> &Registry<LineElement> {
        &self.lines.beams
    }

    /// The truss registry
    pub fn trusses(&self) -> &Registry<LineElement> {
        &self.lines.trusses
    }

    /// The cable registry
    pub fn cables(&self) -> &Registry<LineElement> {
        &self.lines.cables
    }

    /// Render the full export text
    ///
    /// Pure function of model state: calling it twice without mutation in
    /// between yields byte-identical output.
    pub fn export(&self) -> String {
        writer::render_model(self)
    }

    /// Write the export text to a sink
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        sink.write_all(self.export().as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ModelEntity;
    use sofi_lite_model::{DecodedLabel, GeometryRecord, ModelError, Point3};

    fn point_bundle(points: &[(f64, f64, f64)]) -> GeometryBundle {
        let mut bundle = GeometryBundle::new("nodes");
        for &(x, y, z) in points {
            bundle = bundle.with_record(GeometryRecord::point(Point3::new(x, y, z)));
        }
        bundle
    }

    fn beam_bundle(curves: &[((f64, f64, f64), (f64, f64, f64))]) -> GeometryBundle {
        let mut bundle = GeometryBundle::new("beams");
        for &((x1, y1, z1), (x2, y2, z2)) in curves {
            bundle = bundle.with_record(GeometryRecord::curve(
                Point3::new(x1, y1, z1),
                Point3::new(x2, y2, z2),
            ));
        }
        bundle
    }

    #[test]
    fn test_coincident_nodes_collapse_then_line_extends() {
        let mut model = StructuralModel::new("structure", 1.0);

        // two nodes within tolerance: one entity, number 1
        model.ingest(&point_bundle(&[(0.0, 0.0, 0.0), (0.0, 0.0, 0.05)]));
        assert_eq!(model.nodes().len(), 1);
        let numbers: Vec<u32> = model
            .nodes()
            .iter()
            .filter_map(|n| n.core().number)
            .collect();
        assert_eq!(numbers, vec![1]);

        // a beam from the known location to a new one: exactly one new
        // node (number 2) and one beam (number 1) referencing 1 and 2
        model.ingest(&beam_bundle(&[((0.0, 0.0, 0.0), (10.0, 0.0, 0.0))]));
        assert_eq!(model.nodes().len(), 2);
        assert_eq!(model.beams().len(), 1);

        let beam = model.beams().iter().next().unwrap();
        assert_eq!(beam.core().number, Some(1));
        let (start, end) = beam.endpoints();
        assert_eq!(model.nodes().number_of(start), 1);
        assert_eq!(model.nodes().number_of(end), 2);
    }

    #[test]
    fn test_line_elements_share_endpoint_handles() {
        let mut model = StructuralModel::new("structure", 1.0);
        model.ingest(&beam_bundle(&[
            ((0.0, 0.0, 0.0), (5.0, 0.0, 0.0)),
            ((0.0, 0.0, 0.02), (5.0, 0.0, 5.0)),
        ]));

        // the two start points coincide: three nodes total, both beams
        // reference the identical start handle
        assert_eq!(model.nodes().len(), 3);
        let beams: Vec<_> = model.beams().iter().collect();
        assert_eq!(beams[0].endpoints().0, beams[1].endpoints().0);
        assert_ne!(beams[0].endpoints().1, beams[1].endpoints().1);
    }

    #[test]
    fn test_duplicate_line_elements_collapse() {
        let mut model = StructuralModel::new("structure", 1.0);
        model.ingest(&beam_bundle(&[
            ((0.0, 0.0, 0.0), (5.0, 0.0, 0.0)),
            ((0.0, 0.0, 0.0), (5.0, 0.0, 0.0)),
        ]));
        assert_eq!(model.beams().len(), 1);
        assert_eq!(model.nodes().len(), 2);

        // same endpoints in swapped roles is a different element
        model.ingest(&beam_bundle(&[((5.0, 0.0, 0.0), (0.0, 0.0, 0.0))]));
        assert_eq!(model.beams().len(), 2);
        assert_eq!(model.nodes().len(), 2);
    }

    #[test]
    fn test_unrecognized_tag_is_skipped() {
        let mut model = StructuralModel::new("structure", 1.0);
        let bundle = GeometryBundle::new("springs")
            .with_record(GeometryRecord::point(Point3::new(0.0, 0.0, 0.0)));
        model.ingest(&bundle);
        assert_eq!(model.nodes().len(), 0);
        assert!(model.provenance.is_empty());
    }

    #[test]
    fn test_non_model_input_is_skipped() {
        let mut model = StructuralModel::new("structure", 1.0);
        let bundle = point_bundle(&[(0.0, 0.0, 0.0)]).not_model_input();
        model.ingest(&bundle);
        assert_eq!(model.nodes().len(), 0);
    }

    #[test]
    fn test_mismatched_geometry_is_skipped() {
        let mut model = StructuralModel::new("structure", 1.0);

        // a curve inside a node bundle registers nothing
        let bundle = GeometryBundle::new("nodes").with_record(GeometryRecord::curve(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ));
        model.ingest(&bundle);
        assert_eq!(model.nodes().len(), 0);

        // a point inside a beam bundle registers nothing
        let bundle = GeometryBundle::new("beams")
            .with_record(GeometryRecord::point(Point3::new(0.0, 0.0, 0.0)));
        model.ingest(&bundle);
        assert_eq!(model.nodes().len(), 0);
        assert_eq!(model.beams().len(), 0);
    }

    #[test]
    fn test_bundle_group_flows_into_entities() {
        let mut model = StructuralModel::new("structure", 1.0);
        let bundle = point_bundle(&[(0.0, 0.0, 0.0)]).with_group(3);
        model.ingest(&bundle);

        let node = model.nodes().iter().next().unwrap();
        assert_eq!(node.core().group, Some(3));
        assert_eq!(node.core().number, Some(1));

        // endpoint nodes stay ungrouped even when the line bundle is grouped
        let beams = beam_bundle(&[((20.0, 0.0, 0.0), (30.0, 0.0, 0.0))]).with_group(3);
        model.ingest(&beams);
        let beam = model.beams().iter().next().unwrap();
        assert_eq!(beam.core().group, Some(3));
        let (start, _) = beam.endpoints();
        let start = model.nodes().get(start).unwrap();
        assert_eq!(start.core().group, None);
    }

    #[test]
    fn test_labeled_records_keep_their_metadata() {
        let mut model = StructuralModel::new("structure", 1.0);
        let bundle = GeometryBundle::new("nodes").with_record(
            GeometryRecord::point(Point3::new(1.0, 2.0, 3.0)).with_label(DecodedLabel {
                number: Some(12),
                name: "support".into(),
                property: "fix pp".into(),
            }),
        );
        model.ingest(&bundle);

        let node = model.nodes().iter().next().unwrap();
        assert_eq!(node.core().number, Some(12));
        assert!(node.core().strict_numbering);
        assert_eq!(node.core().name, "support");
        assert_eq!(node.core().property, "fix pp");
    }

    #[test]
    fn test_ingest_source_walks_bundles_in_order() {
        struct StubSource;
        impl GeometrySource for StubSource {
            fn bundles(&self) -> Result<Vec<GeometryBundle>> {
                Ok(vec![
                    GeometryBundle::new("nodes")
                        .with_record(GeometryRecord::point(Point3::new(0.0, 0.0, 0.0))),
                    GeometryBundle::new("beams").with_record(GeometryRecord::curve(
                        Point3::new(0.0, 0.0, 0.0),
                        Point3::new(1.0, 0.0, 0.0),
                    )),
                ])
            }
        }

        let mut model = StructuralModel::new("structure", 1.0);
        model.ingest_source(&StubSource).unwrap();
        assert_eq!(model.nodes().len(), 2);
        assert_eq!(model.beams().len(), 1);
    }

    #[test]
    fn test_ingest_source_propagates_provider_failure() {
        struct FailingSource;
        impl GeometrySource for FailingSource {
            fn bundles(&self) -> Result<Vec<GeometryBundle>> {
                Err(ModelError::source("document unavailable"))
            }
        }

        let mut model = StructuralModel::new("structure", 1.0);
        let err = model.ingest_source(&FailingSource).unwrap_err();
        assert!(matches!(err, ModelError::Source(_)));
    }

    #[test]
    fn test_decoded_labels_flow_into_the_model() {
        use sofi_lite_model::LabelDecoder;

        // "<number> <name> [<property>]", every part optional
        struct SimpleDecoder;
        impl LabelDecoder for SimpleDecoder {
            fn decode(&self, label: &str) -> DecodedLabel {
                let label = label.trim();
                let (first, rest) = label.split_once(' ').unwrap_or((label, ""));
                let (number, name_part) = match first.parse() {
                    Ok(n) => (Some(n), rest),
                    Err(_) => (None, label),
                };
                let (name, property) = match name_part.split_once('[') {
                    Some((name, prop)) => (name.trim(), prop.trim_end_matches(']').trim()),
                    None => (name_part.trim(), ""),
                };
                DecodedLabel {
                    number,
                    name: name.to_string(),
                    property: property.to_string(),
                }
            }
        }

        let decoder = SimpleDecoder;
        let label = decoder.decode("3 corner [fix pp]");
        assert_eq!(label.number, Some(3));
        assert_eq!(label.name, "corner");
        assert_eq!(label.property, "fix pp");

        // malformed labels decode to all defaults, never fail
        assert_eq!(decoder.decode(""), DecodedLabel::default());
        assert_eq!(decoder.decode("girder").number, None);

        let mut model = StructuralModel::new("structure", 1.0);
        model.ingest(
            &GeometryBundle::new("nodes")
                .with_record(GeometryRecord::point(Point3::new(0.0, 0.0, 0.0)).with_label(label)),
        );
        let node = model.nodes().iter().next().unwrap();
        assert_eq!(node.core().number, Some(3));
        assert!(node.core().strict_numbering);
        assert_eq!(node.core().name, "corner");
    }

    #[test]
    fn test_truss_and_cable_routing() {
        let mut model = StructuralModel::new("structure", 1.0);
        let mut truss = GeometryBundle::new("trusses");
        truss = truss.with_record(GeometryRecord::curve(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ));
        let mut cable = GeometryBundle::new("cables");
        cable = cable.with_record(GeometryRecord::curve(
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ));
        model.ingest(&truss);
        model.ingest(&cable);

        assert_eq!(model.trusses().len(), 1);
        assert_eq!(model.cables().len(), 1);
        assert!(model.beams().is_empty());

        // numbering is per registry: both start at 1
        assert_eq!(model.trusses().iter().next().unwrap().core().number, Some(1));
        assert_eq!(model.cables().iter().next().unwrap().core().number, Some(1));
    }
}
