//! Segment stitching: unordered curve pieces to continuous chains.
//!
//! A group's curves arrive in mesh traversal order. They are linked
//! end-to-start through quantized point keys computed under a tolerance local
//! to the group, merged with a directional [`UnionFind`], and each resulting
//! component is walked from its root to produce one [`Chain`].
//!
//! # Limitations
//! - When two curves share a start key, the later curve wins the key and the
//!   earlier one can no longer be reached as a link target. A
//!   [`Diagnostic::KeyCollision`] is reported.
//! - The walk is linear. A component that branches (several curves leaving
//!   one point) yields only the chain the walk discovers; the remaining
//!   curves are counted in a [`Diagnostic::UnreachedCurves`].

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::geometry::bezier::BezierCurve;
use crate::geometry::point::Point2;
use crate::geometry::quantize::PointKey;
use crate::geometry::tolerance::Tolerance;
use crate::topology::union_find::UnionFind;
use hashbrown::{HashMap, HashSet};
use serde::Serialize;

/// Curves connected end-to-start, in path order. Never empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chain {
    curves: Vec<BezierCurve>,
}

impl Chain {
    /// Wraps a non-empty curve list.
    pub fn new(curves: Vec<BezierCurve>) -> Option<Self> {
        (!curves.is_empty()).then_some(Self { curves })
    }

    #[inline]
    pub fn curves(&self) -> &[BezierCurve] {
        &self.curves
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Start of the first curve.
    pub fn start(&self) -> Point2 {
        self.curves[0].start()
    }

    /// End of the last curve.
    pub fn end(&self) -> Point2 {
        self.curves[self.curves.len() - 1].end()
    }
}

/// A named path and the chains its curves stitched into. Never empty.
///
/// Only the first chain takes part in the network topology; every chain is
/// kept for drawing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Group {
    name: String,
    chains: Vec<Chain>,
}

impl Group {
    /// Wraps a non-empty chain list.
    pub fn new(name: impl Into<String>, chains: Vec<Chain>) -> Option<Self> {
        (!chains.is_empty()).then(|| Self {
            name: name.into(),
            chains,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Topological end-points: start and end of the first chain.
    pub fn ends(&self) -> (Point2, Point2) {
        let chain = &self.chains[0];
        (chain.start(), chain.end())
    }

    /// Start and end of every chain.
    pub fn chain_ends(&self) -> Vec<(Point2, Point2)> {
        self.chains.iter().map(|c| (c.start(), c.end())).collect()
    }

    /// `true` when the curves did not stitch into a single chain.
    #[inline]
    pub fn is_fragmented(&self) -> bool {
        self.chains.len() > 1
    }
}

/// Stitch one group's curves into chains.
///
/// Reports a [`Diagnostic::Fragmentation`] when more than one chain results.
pub fn stitch_curves<S>(group: &str, curves: &[BezierCurve], sink: &mut S) -> Vec<Chain>
where
    S: DiagnosticSink + ?Sized,
{
    if curves.is_empty() {
        return Vec::new();
    }

    let scale =
        Tolerance::from_points(curves.iter().flat_map(|c| [c.start(), c.end()])).scale();
    let key = |p: Point2| PointKey::new(p, scale);

    let mut starts: HashMap<PointKey, usize> = HashMap::with_capacity(curves.len());
    for (index, curve) in curves.iter().enumerate() {
        let k = key(curve.start());
        if let Some(replaced) = starts.insert(k, index) {
            sink.report(Diagnostic::KeyCollision {
                group: group.to_string(),
                key: k,
                kept: index,
                replaced,
            });
        }
    }

    let mut uf = UnionFind::new(curves.len());
    for (index, curve) in curves.iter().enumerate() {
        if let Some(&next) = starts.get(&key(curve.end())) {
            uf.union(next, index);
        }
    }

    let mut chains = Vec::new();
    for (root, members) in uf.components() {
        let mut seen: HashSet<PointKey> = HashSet::new();
        seen.insert(key(curves[root].start()));
        let mut walk = vec![curves[root]];
        let mut current = root;
        while let Some(&next) = starts.get(&key(curves[current].end())) {
            let k = key(curves[next].start());
            if !seen.insert(k) {
                sink.report(Diagnostic::TraversalCycle {
                    group: group.to_string(),
                    key: k,
                });
                break;
            }
            walk.push(curves[next]);
            current = next;
        }

        if walk.len() < members.len() {
            sink.report(Diagnostic::UnreachedCurves {
                group: group.to_string(),
                count: members.len() - walk.len(),
            });
        }
        chains.extend(Chain::new(walk));
    }

    if chains.len() > 1 {
        sink.report(Diagnostic::Fragmentation {
            group: group.to_string(),
            chains: chains.iter().map(|c| (c.start(), c.end())).collect(),
        });
    }
    chains
}

/// Stitch several groups, returning one [`Group`] per non-empty input.
///
/// Groups are independent. With the `rayon` feature they are stitched in
/// parallel; diagnostics are buffered per group and replayed into `sink` in
/// input order either way.
pub fn stitch_groups<S>(inputs: &[(String, Vec<BezierCurve>)], sink: &mut S) -> Vec<Group>
where
    S: DiagnosticSink + ?Sized,
{
    #[cfg(feature = "rayon")]
    let results: Vec<(Option<Group>, Vec<Diagnostic>)> = {
        use rayon::prelude::*;
        inputs
            .par_iter()
            .map(|(name, curves)| stitch_group(name, curves))
            .collect()
    };
    #[cfg(not(feature = "rayon"))]
    let results: Vec<(Option<Group>, Vec<Diagnostic>)> = inputs
        .iter()
        .map(|(name, curves)| stitch_group(name, curves))
        .collect();

    let mut groups = Vec::with_capacity(results.len());
    for (group, diagnostics) in results {
        for d in diagnostics {
            sink.report(d);
        }
        groups.extend(group);
    }
    groups
}

fn stitch_group(name: &str, curves: &[BezierCurve]) -> (Option<Group>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let chains = stitch_curves(name, curves, &mut diagnostics);
    (Group::new(name, chains), diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(a: (f64, f64), b: (f64, f64)) -> BezierCurve {
        let (p, q) = (Point2::new(a.0, a.1), Point2::new(b.0, b.1));
        let third = (q - p) / 3.0;
        BezierCurve::new(p, p + third, q - third, q)
    }

    #[test]
    fn empty_input_gives_no_chains() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        assert!(stitch_curves("g", &[], &mut sink).is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn root_is_chain_head_for_any_order() {
        let a = line((0.0, 0.0), (1.0, 0.0));
        let b = line((1.0, 0.0), (2.0, 0.0));
        let c = line((2.0, 0.0), (3.0, 0.0));
        for order in [[a, b, c], [c, b, a], [b, a, c], [c, a, b]] {
            let mut sink: Vec<Diagnostic> = Vec::new();
            let chains = stitch_curves("g", &order, &mut sink);
            assert_eq!(chains.len(), 1);
            assert_eq!(chains[0].curves(), &[a, b, c]);
            assert!(sink.is_empty(), "{sink:?}");
        }
    }

    #[test]
    fn closed_loop_stops_at_revisited_key() {
        let curves = [
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.0, 0.0), (1.0, 1.0)),
            line((1.0, 1.0), (0.0, 0.0)),
        ];
        let mut sink: Vec<Diagnostic> = Vec::new();
        let chains = stitch_curves("loop", &curves, &mut sink);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].len(), 3);
        assert!(matches!(sink[..], [Diagnostic::TraversalCycle { .. }]));
    }

    #[test]
    fn repeated_start_key_is_reported_and_later_curve_wins() {
        let trunk = line((0.0, 0.0), (1.0, 0.0));
        let up = line((1.0, 0.0), (1.0, 1.0));
        let right = line((1.0, 0.0), (2.0, 0.0));
        let mut sink: Vec<Diagnostic> = Vec::new();
        let chains = stitch_curves("fork", &[trunk, up, right], &mut sink);

        assert!(sink.iter().any(|d| matches!(
            d,
            Diagnostic::KeyCollision { kept: 2, replaced: 1, .. }
        )));
        let main = chains
            .iter()
            .find(|c| c.start() == Point2::new(0.0, 0.0))
            .unwrap();
        assert_eq!(main.curves(), &[trunk, right]);
        // `up` has no incoming link it can be reached through, so it stands alone.
        assert_eq!(chains.len(), 2);
        assert!(sink
            .iter()
            .any(|d| matches!(d, Diagnostic::Fragmentation { .. })));
    }

    #[test]
    fn stitch_groups_keeps_input_order() {
        let inputs = vec![
            ("b".to_string(), vec![line((0.0, 0.0), (1.0, 0.0))]),
            ("empty".to_string(), vec![]),
            ("a".to_string(), vec![line((5.0, 0.0), (6.0, 0.0))]),
        ];
        let mut sink: Vec<Diagnostic> = Vec::new();
        let groups = stitch_groups(&inputs, &mut sink);
        let names: Vec<_> = groups.iter().map(Group::name).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(
            groups[1].ends(),
            (Point2::new(5.0, 0.0), Point2::new(6.0, 0.0))
        );
    }
}
