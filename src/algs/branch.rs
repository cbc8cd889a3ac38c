//! Branch discovery by nearest-point search.
//!
//! A group branches off a parent when its start point lies on the parent's
//! geometry. For every group, the start point is projected onto every other
//! restrictable group; the closest hit within tolerance becomes the parent.
//! The insertion offset into the parent is measured in the parent's
//! material coordinates, as Euclidean distances over the whole material
//! vector:
//!
//! ```text
//! offset = |m(hit) - m(parent start)| / |m(parent end) - m(parent start)|
//! ```
//!
//! The search performs one nearest-location query per ordered pair of
//! groups, which is fine for the tens of groups a nerve network has.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::geometry::point::Point2;
use crate::geometry::tolerance::Tolerance;
use crate::mesh::FieldMesh;
use hashbrown::HashMap;
use serde::Serialize;

/// Result of a nearest-location query on one group.
#[derive(Clone, Debug, PartialEq)]
pub struct NearestHit {
    /// Cartesian position of the nearest location.
    pub location: Point2,
    /// Material coordinates at the nearest location.
    pub material: Vec<f64>,
}

/// Nearest-point queries restricted to one group's geometry.
pub trait BranchQuery {
    /// Whether queries can be restricted to `group`.
    fn is_restrictable(&self, group: &str) -> bool;

    /// Nearest location on `group` to `point`; `None` when the search fails.
    fn nearest_on(&self, point: Point2, group: &str) -> Option<NearestHit>;
}

/// [`BranchQuery`] over a [`FieldMesh`].
#[derive(Debug)]
pub struct MeshBranchQuery<'a, M: ?Sized> {
    mesh: &'a M,
    coordinate_field: &'a str,
    material_field: &'a str,
    material_component: Option<usize>,
    restrictable: HashMap<String, bool>,
}

impl<'a, M: FieldMesh + ?Sized> MeshBranchQuery<'a, M> {
    pub fn new(
        mesh: &'a M,
        coordinate_field: &'a str,
        material_field: &'a str,
        material_component: Option<usize>,
    ) -> Self {
        let restrictable = mesh
            .groups()
            .into_iter()
            .map(|g| {
                let has_elements = mesh.group_elements(&g).is_ok_and(|e| !e.is_empty());
                (g, has_elements)
            })
            .collect();
        Self {
            mesh,
            coordinate_field,
            material_field,
            material_component,
            restrictable,
        }
    }
}

impl<M: FieldMesh + ?Sized> BranchQuery for MeshBranchQuery<'_, M> {
    fn is_restrictable(&self, group: &str) -> bool {
        self.restrictable.get(group).copied().unwrap_or(false)
    }

    fn nearest_on(&self, point: Point2, group: &str) -> Option<NearestHit> {
        let location = self
            .mesh
            .find_nearest_location(point, self.coordinate_field, group)?;
        let position = self.mesh.evaluate_at(location, self.coordinate_field)?;
        let mut material = self.mesh.evaluate_at(location, self.material_field)?;
        if let Some(component) = self.material_component {
            material = vec![*material.get(component)?];
        }
        Some(NearestHit {
            location: Point2::from_components(&position)?,
            material,
        })
    }
}

/// Material coordinates at a group's two topological ends.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialExtent {
    pub start: Vec<f64>,
    pub end: Vec<f64>,
}

impl MaterialExtent {
    #[inline]
    pub fn length(&self) -> f64 {
        material_distance(&self.start, &self.end)
    }

    /// Relative position of `material` along the extent.
    pub fn offset_of(&self, material: &[f64]) -> f64 {
        material_distance(material, &self.start) / self.length()
    }
}

/// Euclidean distance between two material vectors.
pub fn material_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

/// A group whose start point was found on another group's path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BranchInsertion {
    /// The branching group.
    pub group: String,
    /// The group it branches from.
    pub parent: String,
    /// Relative position along the parent, by material coordinate.
    pub offset: f64,
    /// The branch's own start point, registered into the parent.
    pub point: Point2,
    /// Where the search landed on the parent.
    pub parent_location: Point2,
    /// Distance between `point` and `parent_location`.
    pub distance: f64,
}

/// Material extent of every restrictable group, keyed by group name.
pub fn material_extents<'g, Q, I>(groups: I, query: &Q) -> HashMap<String, MaterialExtent>
where
    Q: BranchQuery + ?Sized,
    I: IntoIterator<Item = (&'g str, Point2, Point2)>,
{
    let mut extents = HashMap::new();
    for (name, start, end) in groups {
        if !query.is_restrictable(name) {
            continue;
        }
        let (Some(s), Some(e)) = (query.nearest_on(start, name), query.nearest_on(end, name))
        else {
            continue;
        };
        extents.insert(
            name.to_string(),
            MaterialExtent {
                start: s.material,
                end: e.material,
            },
        );
    }
    extents
}

/// Find the branch parent of every group.
///
/// `groups` lists `(name, start, end)` for each group in network order.
/// Groups without a parent within tolerance report
/// [`Diagnostic::UnresolvableBranch`]; a parent with zero material length
/// reports [`Diagnostic::DegenerateParent`]. Neither stops the search.
pub fn locate_branches<Q, S>(
    groups: &[(&str, Point2, Point2)],
    query: &Q,
    sink: &mut S,
) -> Vec<BranchInsertion>
where
    Q: BranchQuery + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    let extents = material_extents(groups.iter().copied(), query);

    let mut insertions = Vec::new();
    for &(name, start, _) in groups {
        let mut best: Option<(f64, &str, NearestHit)> = None;
        for &(candidate, _, _) in groups {
            if candidate == name || !query.is_restrictable(candidate) {
                continue;
            }
            let Some(hit) = query.nearest_on(start, candidate) else {
                continue;
            };
            let tolerance = Tolerance::from_points([start, hit.location]);
            let distance = start.distance(hit.location);
            let closer = best.as_ref().is_none_or(|(d, _, _)| distance < *d);
            if distance < tolerance.value() && closer {
                best = Some((distance, candidate, hit));
            }
        }

        let Some((distance, parent, hit)) = best else {
            sink.report(Diagnostic::UnresolvableBranch {
                group: name.to_string(),
            });
            continue;
        };
        let Some(extent) = extents.get(parent).filter(|e| e.length() > 0.0) else {
            sink.report(Diagnostic::DegenerateParent {
                group: name.to_string(),
                parent: parent.to_string(),
            });
            continue;
        };
        let offset = extent.offset_of(&hit.material);
        if !offset.is_finite() {
            sink.report(Diagnostic::DegenerateParent {
                group: name.to_string(),
                parent: parent.to_string(),
            });
            continue;
        }
        log::trace!("group `{name}` branches from `{parent}` at offset {offset}");
        insertions.push(BranchInsertion {
            group: name.to_string(),
            parent: parent.to_string(),
            offset,
            point: start,
            parent_location: hit.location,
            distance,
        });
    }
    insertions
}
