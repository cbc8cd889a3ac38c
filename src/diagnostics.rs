//! Non-fatal pipeline diagnostics.
//!
//! Every stage of the export reports recoverable conditions to a
//! [`DiagnosticSink`] passed in by the caller instead of writing to a global
//! logger directly. [`LogSink`] forwards to the `log` facade; a
//! `Vec<Diagnostic>` collects them for inspection.

use crate::geometry::point::Point2;
use crate::geometry::quantize::PointKey;
use crate::mesh::ElementId;
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// How loudly a diagnostic should be surfaced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Warning,
}

/// Which evaluation of a field was unavailable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldSample {
    Position,
    Tangent,
}

impl fmt::Display for FieldSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSample::Position => f.write_str("value"),
            FieldSample::Tangent => f.write_str("derivative"),
        }
    }
}

/// A recoverable condition met while building the network.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Diagnostic {
    /// Position or tangent data was unavailable at `xi`; the element's
    /// segment was dropped.
    #[error("Missing `{field}` {sample} at xi = {xi} on element {element}; segment dropped")]
    MissingFieldData {
        element: ElementId,
        field: String,
        sample: FieldSample,
        xi: f64,
    },
    /// A group's curves did not form one continuous chain.
    #[error("Group `{group}` split into {}", describe_fragments(.chains))]
    Fragmentation {
        group: String,
        chains: Vec<(Point2, Point2)>,
    },
    /// Two curves of a group start at the same key; the later one shadows the earlier.
    #[error("Repeated start key {key} in group `{group}`: curve {replaced} shadowed by curve {kept}")]
    KeyCollision {
        group: String,
        key: PointKey,
        kept: usize,
        replaced: usize,
    },
    /// Chain reconstruction returned to an already visited key.
    #[error("Breaking out of loop in group `{group}` at key {key}")]
    TraversalCycle { group: String, key: PointKey },
    /// Curves of a connected component were not reached by the linear traversal.
    #[error("Group `{group}`: {count} curve(s) not reachable from the chain start")]
    UnreachedCurves { group: String, count: usize },
    /// No parent group lies within tolerance of the group's start point.
    #[error("No branch parent found for group `{group}`")]
    UnresolvableBranch { group: String },
    /// The parent's material extent is zero, so no offset can be computed.
    #[error("Cannot insert group `{group}` into `{parent}`: parent has zero material length")]
    DegenerateParent { group: String, parent: String },
    /// Nothing to export.
    #[error("No elements or groups to export")]
    EmptyInput,
}

fn describe_fragments(chains: &[(Point2, Point2)]) -> String {
    format!(
        "{} chains; two (or more) of the following points should have been detected as the same point: {}",
        chains.len(),
        chains
            .iter()
            .map(|(start, end)| format!("{start} - {end}"))
            .join(", ")
    )
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::KeyCollision { .. }
            | Diagnostic::TraversalCycle { .. }
            | Diagnostic::UnresolvableBranch { .. } => Severity::Debug,
            _ => Severity::Warning,
        }
    }

    /// Group the diagnostic refers to, if any.
    pub fn group(&self) -> Option<&str> {
        match self {
            Diagnostic::Fragmentation { group, .. }
            | Diagnostic::KeyCollision { group, .. }
            | Diagnostic::TraversalCycle { group, .. }
            | Diagnostic::UnreachedCurves { group, .. }
            | Diagnostic::UnresolvableBranch { group }
            | Diagnostic::DegenerateParent { group, .. } => Some(group),
            Diagnostic::MissingFieldData { .. } | Diagnostic::EmptyInput => None,
        }
    }
}

/// Receiver for pipeline diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade at their severity.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => log::warn!("{diagnostic}"),
            Severity::Debug => log::debug!("{diagnostic}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Diagnostic::EmptyInput);
        sink.report(Diagnostic::UnresolvableBranch {
            group: "left".into(),
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].group(), Some("left"));
        assert_eq!(sink[1].severity(), Severity::Debug);
    }

    #[test]
    fn fragmentation_message_lists_chain_ends() {
        let d = Diagnostic::Fragmentation {
            group: "trunk".into(),
            chains: vec![
                (Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
                (Point2::new(2.0, 0.0), Point2::new(3.0, 0.0)),
            ],
        };
        let msg = d.to_string();
        assert!(msg.contains("`trunk` split into 2 chains"));
        assert!(msg.contains("(0, 0) - (1, 0), (2, 0) - (3, 0)"));
        assert_eq!(d.severity(), Severity::Warning);
    }

    #[test]
    fn missing_data_names_the_failed_sample() {
        let d = Diagnostic::MissingFieldData {
            element: ElementId::new(7),
            field: "coordinates".into(),
            sample: FieldSample::Tangent,
            xi: 1.0,
        };
        assert_eq!(
            d.to_string(),
            "Missing `coordinates` derivative at xi = 1 on element 7; segment dropped"
        );
    }
}
