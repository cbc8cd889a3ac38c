//! End-to-end export: mesh in, stitched groups and network plan out.
//!
//! [`export_network`] runs the whole pipeline:
//! 1. validate the coordinate and material fields,
//! 2. capture raw segments per group ([`analyze`]),
//! 3. convert them to Bezier curves and stitch each group into chains,
//! 4. locate branch parents on the mesh,
//! 5. assemble the labelled network.
//!
//! Recoverable conditions go to the caller's
//! [`DiagnosticSink`](crate::diagnostics::DiagnosticSink); only missing or
//! malformed fields abort the export.

pub mod analyze;
pub mod options;
pub mod plan;

pub use analyze::{ElementAnalysis, GroupIdentity, GroupSegments, analyze_elements};
pub use options::ExportOptions;
pub use plan::{Centreline, Feature, Features, FlatmapProperties, NetworkPlan};

use crate::algs::branch::{BranchInsertion, MeshBranchQuery, locate_branches};
use crate::algs::network::{Network, assemble_network};
use crate::algs::stitch::{Chain, Group, stitch_curves, stitch_groups};
use crate::diagnostics::DiagnosticSink;
use crate::geometry::bezier::{BezierCurve, bezier_curves};
use crate::geometry::point::Point2;
use crate::mesh::FieldMesh;
use crate::mesh_error::MeshFlatmapError;
use serde::Serialize;

/// Everything an export produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlatmapExport {
    identities: Vec<GroupIdentity>,
    groups: Vec<Group>,
    ungrouped: Vec<Chain>,
    insertions: Vec<BranchInsertion>,
    network: Network,
}

impl FlatmapExport {
    /// Stitched groups in mesh group order; empty groups are omitted.
    #[inline]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Chains of elements outside every group. Drawn, never part of the network.
    #[inline]
    pub fn ungrouped(&self) -> &[Chain] {
        &self.ungrouped
    }

    #[inline]
    pub fn identities(&self) -> &[GroupIdentity] {
        &self.identities
    }

    pub fn identity(&self, name: &str) -> Option<&GroupIdentity> {
        self.identities.iter().find(|i| i.name == name)
    }

    #[inline]
    pub fn insertions(&self) -> &[BranchInsertion] {
        &self.insertions
    }

    #[inline]
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The connectivity plan for this export.
    pub fn plan(&self, options: &ExportOptions) -> NetworkPlan {
        NetworkPlan::new(&self.network, &self.identities, options)
    }

    /// Feature records of every exported group.
    pub fn features(&self) -> Features {
        Features::new(&self.identities)
    }

    /// `{features, networks}` record for the renderer.
    pub fn properties(&self, options: &ExportOptions) -> FlatmapProperties {
        FlatmapProperties {
            features: self.features(),
            networks: vec![self.plan(options)],
        }
    }
}

/// Check that `field` exists with more than `min_component` components.
fn require_field<M>(mesh: &M, field: &str, min_component: usize) -> Result<(), MeshFlatmapError>
where
    M: FieldMesh + ?Sized,
{
    let found = mesh
        .field_components(field)
        .ok_or_else(|| MeshFlatmapError::MissingField(field.to_string()))?;
    if found <= min_component {
        return Err(MeshFlatmapError::ComponentMismatch {
            field: field.to_string(),
            expected: min_component + 1,
            found,
        });
    }
    Ok(())
}

/// Run the full export over `mesh`.
///
/// # Errors
/// [`MeshFlatmapError::MissingField`] or
/// [`MeshFlatmapError::ComponentMismatch`] when the coordinate field (two
/// components) or the material field (at least one component, or
/// `material_component + 1` when a component is selected) is unusable, and
/// any error the mesh returns for its own groups.
pub fn export_network<M, S>(
    mesh: &M,
    options: &ExportOptions,
    sink: &mut S,
) -> Result<FlatmapExport, MeshFlatmapError>
where
    M: FieldMesh + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    require_field(mesh, &options.coordinate_field, 1)?;
    require_field(
        mesh,
        &options.material_field,
        options.material_component.unwrap_or(0),
    )?;

    let analysis = analyze_elements(mesh, options, sink)?;
    let inputs: Vec<(String, Vec<BezierCurve>)> = analysis
        .groups
        .iter()
        .map(|g| (g.identity.name.clone(), bezier_curves(&g.segments)))
        .collect();
    let groups = stitch_groups(&inputs, sink);
    let ungrouped = stitch_curves(
        &options.ungrouped_label,
        &bezier_curves(&analysis.ungrouped),
        sink,
    );

    let ends: Vec<(&str, Point2, Point2)> = groups
        .iter()
        .map(|g| {
            let (start, end) = g.ends();
            (g.name(), start, end)
        })
        .collect();
    let query = MeshBranchQuery::new(
        mesh,
        &options.coordinate_field,
        &options.material_field,
        options.material_component,
    );
    let insertions = locate_branches(&ends, &query, sink);
    let network = assemble_network(&ends, &insertions);
    log::debug!(
        "exported {} group(s), {} branch insertion(s), {} canonical point(s)",
        groups.len(),
        insertions.len(),
        network.points().len()
    );

    Ok(FlatmapExport {
        identities: analysis.groups.into_iter().map(|g| g.identity).collect(),
        groups,
        ungrouped,
        insertions,
        network,
    })
}
