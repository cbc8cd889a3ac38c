//! Network assembly: canonical points and per-group label sequences.
//!
//! Every group contributes its two topological ends at offsets `0.0` and
//! `1.0`; every branch insertion adds the branch's start point to its
//! parent at the computed offset. All of those points are deduplicated
//! under one tolerance computed over the whole set, labelled
//! `point_NN` in order of first appearance, and each group's points are
//! sorted by offset into a [`NetworkEdge`].

use crate::algs::branch::BranchInsertion;
use crate::geometry::point::Point2;
use crate::geometry::quantize::QuantizedPointIndex;
use crate::geometry::tolerance::Tolerance;
use hashbrown::HashMap;
use serde::Serialize;

/// A deduplicated point with its stable label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanonicalPoint {
    /// Zero-based order of first appearance.
    #[serde(skip)]
    pub index: usize,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl CanonicalPoint {
    #[inline]
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// One group's path through canonical points, start to end.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkEdge {
    pub group: String,
    pub labels: Vec<String>,
}

/// The assembled network.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Network {
    edges: Vec<NetworkEdge>,
    points: Vec<CanonicalPoint>,
}

impl Network {
    /// Edges in order of first appearance. A parent appears as soon as one
    /// of its branches is processed, even ahead of its own turn.
    #[inline]
    pub fn edges(&self) -> &[NetworkEdge] {
        &self.edges
    }

    /// Canonical points in label order.
    #[inline]
    pub fn points(&self) -> &[CanonicalPoint] {
        &self.points
    }

    /// Edge of `group`, if it takes part in the network.
    pub fn edge(&self, group: &str) -> Option<&NetworkEdge> {
        self.edges.iter().find(|e| e.group == group)
    }

    /// Canonical point carrying `label`.
    pub fn point(&self, label: &str) -> Option<&CanonicalPoint> {
        self.points.iter().find(|p| p.label == label)
    }

    /// `{group: [label, ...]}`.
    pub fn connections(&self) -> HashMap<&str, &[String]> {
        self.edges
            .iter()
            .map(|e| (e.group.as_str(), e.labels.as_slice()))
            .collect()
    }

    /// `{label: (x, y)}`.
    pub fn coordinates(&self) -> HashMap<&str, (f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.label.as_str(), (p.x, p.y)))
            .collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Label for the canonical point at `index`, zero padded to `width` digits.
pub fn point_label(index: usize, width: usize) -> String {
    format!("point_{:0width$}", index + 1)
}

/// Number of decimal digits in `n`.
pub(crate) fn digit_count(n: usize) -> usize {
    n.to_string().len()
}

/// Assemble the network from group ends and branch insertions.
///
/// `groups` lists `(name, start, end)` in network order. Insertions whose
/// parent is not among `groups` are ignored.
pub fn assemble_network(
    groups: &[(&str, Point2, Point2)],
    insertions: &[BranchInsertion],
) -> Network {
    let ends: HashMap<&str, (Point2, Point2)> = groups
        .iter()
        .map(|&(name, start, end)| (name, (start, end)))
        .collect();
    let branch_of: HashMap<&str, &BranchInsertion> = insertions
        .iter()
        .map(|b| (b.group.as_str(), b))
        .collect();

    // Per-group offset lists, in order of first touch.
    let mut order: Vec<&str> = Vec::new();
    let mut located: HashMap<&str, Vec<(f64, Point2)>> = HashMap::new();
    for &(name, start, end) in groups {
        ensure_entry(name, (start, end), &mut order, &mut located);
        let Some(branch) = branch_of.get(name) else {
            continue;
        };
        let Some((&parent, &parent_ends)) = ends.get_key_value(branch.parent.as_str()) else {
            continue;
        };
        ensure_entry(parent, parent_ends, &mut order, &mut located);
        if let Some(list) = located.get_mut(parent) {
            list.push((branch.offset, branch.point));
        }
    }

    let flat: Vec<Point2> = order
        .iter()
        .flat_map(|name| located[name].iter().map(|&(_, p)| p))
        .collect();
    let mut index = QuantizedPointIndex::new(Tolerance::from_points(flat.iter().copied()));
    for &p in &flat {
        index.insert(p);
    }

    let width = digit_count(index.len());
    let points = index
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| CanonicalPoint {
            index: i,
            label: point_label(i, width),
            x: p.x,
            y: p.y,
        })
        .collect::<Vec<_>>();

    let edges = order
        .iter()
        .map(|&name| {
            let mut list = located[name].clone();
            list.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut labels: Vec<String> = Vec::with_capacity(list.len());
            for (_, p) in list {
                let Some(i) = index.get(p) else { continue };
                if labels.last() != Some(&points[i].label) {
                    labels.push(points[i].label.clone());
                }
            }
            NetworkEdge {
                group: name.to_string(),
                labels,
            }
        })
        .collect();

    Network { edges, points }
}

fn ensure_entry<'a>(
    name: &'a str,
    (start, end): (Point2, Point2),
    order: &mut Vec<&'a str>,
    located: &mut HashMap<&'a str, Vec<(f64, Point2)>>,
) {
    located.entry(name).or_insert_with(|| {
        order.push(name);
        vec![(0.0, start), (1.0, end)]
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn insertion(group: &str, parent: &str, offset: f64, point: Point2) -> BranchInsertion {
        BranchInsertion {
            group: group.into(),
            parent: parent.into(),
            offset,
            point,
            parent_location: point,
            distance: 0.0,
        }
    }

    fn labels<'a>(net: &'a Network, group: &str) -> Vec<&'a str> {
        net.edge(group)
            .unwrap()
            .labels
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn shared_end_points_collapse() {
        let groups = [("a", p(0.0, 0.0), p(1.0, 0.0)), ("b", p(1.0, 0.0), p(2.0, 0.0))];
        let net = assemble_network(&groups, &[]);
        assert_eq!(net.points().len(), 3);
        assert_eq!(labels(&net, "a"), ["point_1", "point_2"]);
        assert_eq!(labels(&net, "b"), ["point_2", "point_3"]);
        assert_eq!(net.coordinates()["point_3"], (2.0, 0.0));
    }

    #[test]
    fn branch_point_is_sorted_into_parent() {
        let groups = [
            ("trunk", p(0.0, 0.0), p(4.0, 0.0)),
            ("branch", p(2.0, 0.0), p(2.0, 3.0)),
        ];
        let net = assemble_network(&groups, &[insertion("branch", "trunk", 0.5, p(2.0, 0.0))]);
        assert_eq!(labels(&net, "trunk"), ["point_1", "point_3", "point_2"]);
        assert_eq!(labels(&net, "branch"), ["point_3", "point_4"]);
    }

    #[test]
    fn parent_touched_by_branch_comes_first() {
        let groups = [
            ("branch", p(2.0, 0.0), p(2.0, 3.0)),
            ("trunk", p(0.0, 0.0), p(4.0, 0.0)),
        ];
        let net = assemble_network(&groups, &[insertion("branch", "trunk", 0.5, p(2.0, 0.0))]);
        let order: Vec<_> = net.edges().iter().map(|e| e.group.as_str()).collect();
        assert_eq!(order, ["branch", "trunk"]);
        assert_eq!(labels(&net, "trunk"), ["point_3", "point_1", "point_4"]);
    }

    #[test]
    fn coincident_offsets_do_not_repeat_labels() {
        let groups = [
            ("trunk", p(0.0, 0.0), p(4.0, 0.0)),
            ("branch", p(0.0, 0.0), p(0.0, 3.0)),
        ];
        let net = assemble_network(&groups, &[insertion("branch", "trunk", 0.0, p(0.0, 0.0))]);
        assert_eq!(labels(&net, "trunk"), ["point_1", "point_2"]);
    }

    #[test]
    fn labels_pad_to_point_count() {
        assert_eq!(point_label(0, 2), "point_01");
        assert_eq!(point_label(99, 3), "point_100");
        let groups: Vec<(String, Point2, Point2)> = (0..6)
            .map(|i| {
                let x = f64::from(i) * 10.0;
                (format!("g{i}"), p(x, 0.0), p(x + 1.0, 0.0))
            })
            .collect();
        let refs: Vec<_> = groups.iter().map(|(n, s, e)| (n.as_str(), *s, *e)).collect();
        let net = assemble_network(&refs, &[]);
        assert_eq!(net.points().len(), 12);
        assert_eq!(net.points()[0].label, "point_01");
        assert_eq!(labels(&net, "g5"), ["point_11", "point_12"]);
    }

    #[test]
    fn empty_input_gives_empty_network() {
        let net = assemble_network(&[], &[]);
        assert!(net.is_empty());
        assert!(net.points().is_empty());
    }
}
