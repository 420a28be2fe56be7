// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SOFiSTiK (`sofimsha`) text rendering
//!
//! Layout of the full document, in fixed order: header framing, node
//! block, beam block, truss block, cable block, footer. Each block starts
//! with the registry's warnings (`$`-commented), then entities in
//! insertion order, with a provenance marker re-emitted every time the
//! provenance changes from the immediately preceding entity.

use crate::entity::{ModelEntity, Node};
use crate::model::{ProvenanceUnit, StructuralModel};
use crate::registry::Registry;
use sofi_lite_model::ProvenanceId;
use std::fmt::Write as _;

/// Render the full export document
pub(crate) fn render_model(model: &StructuralModel) -> String {
    let mut out = String::new();
    render_header(&mut out, model);
    render_registry(&mut out, &model.nodes, &model.nodes, &model.provenance);
    render_registry(&mut out, &model.lines.beams, &model.nodes, &model.provenance);
    render_registry(&mut out, &model.lines.trusses, &model.nodes, &model.provenance);
    render_registry(&mut out, &model.lines.cables, &model.nodes, &model.provenance);
    out.push_str("\nend");
    out
}

fn render_header(out: &mut String, model: &StructuralModel) {
    let _ = write!(
        out,
        "$ generated by sofi-lite\n+prog sofimsha\nhead {}\n\nsyst init gdiv {}\n\nlet#conversion_factor {}\n",
        model.name, model.gdiv, model.conversion_factor
    );
}

/// Render one registry block: warnings, then entities with markers
///
/// The previous-marker tracker is a plain loop variable updated on every
/// entity, anonymous ones included. A marker therefore reappears whenever
/// the provenance differs from the entity directly above it, even if the
/// same unit was already announced earlier in the block. Markers compare
/// by provenance identity, never by content.
fn render_registry<E: ModelEntity>(
    out: &mut String,
    registry: &Registry<E>,
    nodes: &Registry<Node>,
    provenance: &[ProvenanceUnit],
) {
    for warning in registry.warnings() {
        let _ = writeln!(out, "$ {}", warning);
    }

    let mut previous: Option<ProvenanceId> = None;
    for entity in registry.iter() {
        let current = entity.core().provenance;
        if let Some(id) = current {
            if previous != current {
                if let Some(unit) = provenance.get(id.0 as usize) {
                    render_marker(out, unit);
                }
            }
        }
        previous = current;

        out.push_str(&entity.export_line(nodes));
        out.push('\n');
    }

    out.push('\n');
}

/// Render the `!*!Label` marker block announcing a provenance unit
fn render_marker(out: &mut String, unit: &ProvenanceUnit) {
    let grp = unit.group.map(|g| format!("grp {}", g));
    let _ = write!(
        out,
        "\n\n!*!Label {} .. {} .. {}\n",
        unit.tag,
        grp.as_deref().unwrap_or(""),
        unit.name
    );
    if let Some(grp) = &grp {
        let _ = writeln!(out, "{}", grp);
    }
    if !unit.property.is_empty() {
        let _ = writeln!(out, "{} prop {}", unit.kind.token(), unit.property);
    }
}
