//! Element analysis: raw segment capture and grouping.
//!
//! Every element is sampled at both ends for position and tangent. An element
//! missing any of the four values is dropped. Captured segments are filed
//! under every group containing the element, or under the ungrouped bucket.

use crate::diagnostics::{Diagnostic, DiagnosticSink, FieldSample};
use crate::export::options::ExportOptions;
use crate::geometry::bezier::{RawEndpoint, RawSegment};
use crate::geometry::point::{Point2, Vector2};
use crate::mesh::{ElementId, FieldMesh};
use crate::mesh_error::MeshFlatmapError;
use hashbrown::HashSet;
use serde::Serialize;

/// Names under which a group is exported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupIdentity {
    /// Anatomical name, as on the mesh.
    pub name: String,
    /// Positional label, `group_NN`.
    pub label: String,
    /// Drawing identifier, `nerve_feature_NN`.
    pub id: String,
}

/// Segments captured for one group.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSegments {
    pub identity: GroupIdentity,
    pub segments: Vec<RawSegment>,
}

/// All segments captured from a mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementAnalysis {
    /// One entry per exported group, in mesh group order.
    pub groups: Vec<GroupSegments>,
    /// Segments of elements that belong to no exported group.
    pub ungrouped: Vec<RawSegment>,
}

/// Label of the group at `index` in the mesh group list.
pub fn group_label(index: usize, width: usize) -> String {
    format!("group_{:0width$}", index + 1)
}

/// Drawing identifier for a group label.
pub fn group_feature_id(label: &str) -> String {
    label.replace("group_", "nerve_feature_")
}

/// Sample every element and file its segment under its groups.
///
/// Reports [`Diagnostic::MissingFieldData`] for each dropped element and
/// [`Diagnostic::EmptyInput`] when the mesh has no elements or no exported
/// groups.
pub fn analyze_elements<M, S>(
    mesh: &M,
    options: &ExportOptions,
    sink: &mut S,
) -> Result<ElementAnalysis, MeshFlatmapError>
where
    M: FieldMesh + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    let group_names = mesh.groups();
    let width = crate::algs::network::digit_count(group_names.len());

    let mut groups = Vec::new();
    let mut members: Vec<HashSet<ElementId>> = Vec::new();
    for (index, name) in group_names.iter().enumerate() {
        if options.is_excluded(name) {
            continue;
        }
        let label = group_label(index, width);
        members.push(mesh.group_elements(name)?.into_iter().collect());
        groups.push(GroupSegments {
            identity: GroupIdentity {
                name: name.clone(),
                id: group_feature_id(&label),
                label,
            },
            segments: Vec::new(),
        });
    }

    let elements = mesh.elements();
    if elements.is_empty() || groups.is_empty() {
        sink.report(Diagnostic::EmptyInput);
    }

    let mut ungrouped = Vec::new();
    for element in elements {
        let segment = match capture_segment(mesh, element, options) {
            Ok(segment) => segment,
            Err((sample, xi)) => {
                sink.report(Diagnostic::MissingFieldData {
                    element,
                    field: options.coordinate_field.clone(),
                    sample,
                    xi,
                });
                continue;
            }
        };
        let mut in_group = false;
        for (group, set) in groups.iter_mut().zip(&members) {
            if set.contains(&element) {
                group.segments.push(segment);
                in_group = true;
            }
        }
        if !in_group {
            ungrouped.push(segment);
        }
    }

    Ok(ElementAnalysis { groups, ungrouped })
}

/// Samples both ends of `element`, or names the first evaluation that failed.
fn capture_segment<M>(
    mesh: &M,
    element: ElementId,
    options: &ExportOptions,
) -> Result<RawSegment, (FieldSample, f64)>
where
    M: FieldMesh + ?Sized,
{
    let field = options.coordinate_field.as_str();
    let endpoint = |xi: f64| -> Result<RawEndpoint, (FieldSample, f64)> {
        let position = mesh
            .evaluate(element, xi, field)
            .and_then(|v| Point2::from_components(&v))
            .ok_or((FieldSample::Position, xi))?;
        let tangent = mesh
            .evaluate_tangent(element, xi, field)
            .and_then(|v| Vector2::from_components(&v))
            .ok_or((FieldSample::Tangent, xi))?;
        Ok(RawEndpoint::new(position, tangent))
    };
    Ok(RawSegment::new(
        endpoint(options.start_xi)?,
        endpoint(options.end_xi)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::PolylineMesh;

    fn e(id: u64) -> ElementId {
        ElementId::new(id)
    }

    fn mesh() -> PolylineMesh {
        let mut mesh = PolylineMesh::new();
        mesh.define_field("coordinates", 3).unwrap();
        for node in 1..=5 {
            mesh.set_node_values("coordinates", node, &[node as f64, 0.0, 0.0])
                .unwrap();
        }
        // Node 6 has no coordinates, so element 5 cannot be sampled.
        for (id, nodes) in [(1, [1, 2]), (2, [2, 3]), (3, [3, 4]), (4, [4, 5]), (5, [5, 6])] {
            mesh.add_element(e(id), nodes).unwrap();
        }
        mesh.add_group("marker", Vec::<ElementId>::new()).unwrap();
        mesh.add_group("left", [e(1), e(2)]).unwrap();
        mesh.add_group("both", [e(2), e(5)]).unwrap();
        mesh
    }

    #[test]
    fn files_segments_by_group_and_drops_missing_data() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let analysis = analyze_elements(&mesh(), &ExportOptions::default(), &mut sink).unwrap();

        let ids: Vec<_> = analysis
            .groups
            .iter()
            .map(|g| (g.identity.name.as_str(), g.identity.label.as_str(), g.identity.id.as_str()))
            .collect();
        assert_eq!(
            ids,
            [("left", "group_2", "nerve_feature_2"), ("both", "group_3", "nerve_feature_3")]
        );
        assert_eq!(analysis.groups[0].segments.len(), 2);
        assert_eq!(analysis.groups[1].segments.len(), 1);
        assert_eq!(analysis.ungrouped.len(), 2);
        assert_eq!(
            analysis.groups[0].segments[1].start.position,
            Point2::new(2.0, 0.0)
        );
        assert_eq!(
            sink,
            vec![Diagnostic::MissingFieldData {
                element: e(5),
                field: "coordinates".into(),
                sample: FieldSample::Position,
                xi: 0.0,
            }]
        );
    }

    #[test]
    fn empty_mesh_reports_empty_input() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let analysis =
            analyze_elements(&PolylineMesh::new(), &ExportOptions::default(), &mut sink).unwrap();
        assert_eq!(analysis, ElementAnalysis::default());
        assert_eq!(sink, vec![Diagnostic::EmptyInput]);
    }

    #[test]
    fn labels_are_zero_padded() {
        assert_eq!(group_label(0, 2), "group_01");
        assert_eq!(group_feature_id("group_07"), "nerve_feature_07");
    }

    /// Positions resolve everywhere, derivatives nowhere.
    struct NoDerivatives(PolylineMesh);

    impl FieldMesh for NoDerivatives {
        fn field_components(&self, field: &str) -> Option<usize> {
            self.0.field_components(field)
        }
        fn elements(&self) -> Vec<ElementId> {
            self.0.elements()
        }
        fn groups(&self) -> Vec<String> {
            self.0.groups()
        }
        fn group_elements(&self, group: &str) -> Result<Vec<ElementId>, MeshFlatmapError> {
            self.0.group_elements(group)
        }
        fn evaluate(&self, element: ElementId, xi: f64, field: &str) -> Option<Vec<f64>> {
            self.0.evaluate(element, xi, field)
        }
        fn evaluate_tangent(&self, _: ElementId, _: f64, _: &str) -> Option<Vec<f64>> {
            None
        }
        fn find_nearest_location(
            &self,
            point: Point2,
            field: &str,
            restricted_to: &str,
        ) -> Option<crate::mesh::MeshLocation> {
            self.0.find_nearest_location(point, field, restricted_to)
        }
    }

    #[test]
    fn missing_derivative_is_reported_as_tangent() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let analysis =
            analyze_elements(&NoDerivatives(mesh()), &ExportOptions::default(), &mut sink)
                .unwrap();
        assert!(analysis.groups.iter().all(|g| g.segments.is_empty()));
        let samples: Vec<_> = sink
            .iter()
            .map(|d| match d {
                Diagnostic::MissingFieldData { element, sample, .. } => (element.get(), *sample),
                other => panic!("unexpected diagnostic {other:?}"),
            })
            .collect();
        // Element 5 has no position at all, so that check fails first.
        assert_eq!(
            samples,
            [
                (1, FieldSample::Tangent),
                (2, FieldSample::Tangent),
                (3, FieldSample::Tangent),
                (4, FieldSample::Tangent),
                (5, FieldSample::Position),
            ]
        );
    }
}
