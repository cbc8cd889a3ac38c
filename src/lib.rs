//! # mesh-flatmap
//!
//! mesh-flatmap reconstructs a 2-D flatmap network from a 1-D nerve mesh.
//! Elements are sampled as Hermite segments, converted to cubic Bezier
//! curves, stitched into continuous paths per named group, and joined into a
//! network by locating where each path branches off another. Coincident
//! points are merged through tolerance-driven quantization, so positions that
//! differ only by floating-point noise share one canonical label.
//!
//! ## Features
//! - Significant-figure based tolerance and quantized point keys
//! - Directional union-find stitching with cycle and collision guards
//! - Nearest-location branch discovery behind the [`algs::BranchQuery`] seam
//! - Deterministic network labelling (`point_NN`) and a serializable plan
//! - Injectable [`diagnostics::DiagnosticSink`] for recoverable conditions
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mesh-flatmap = "0.1"
//! # Optional features:
//! # features = ["rayon"]
//! ```
//!
//! Any mesh implementing [`mesh::FieldMesh`] can be exported;
//! [`mesh::PolylineMesh`] is a ready-made in-memory implementation.
//!
//! ```rust
//! use mesh_flatmap::prelude::*;
//!
//! let mut mesh = PolylineMesh::new();
//! mesh.define_field("coordinates", 2)?;
//! mesh.define_field("vagus coordinates", 3)?;
//! for (node, x) in [(1, 0.0), (2, 1.0), (3, 2.0)] {
//!     mesh.set_node_values("coordinates", node, &[x, 0.0])?;
//!     mesh.set_node_values("vagus coordinates", node, &[0.0, x, 0.0])?;
//! }
//! mesh.add_element(ElementId::new(1), [1, 2])?;
//! mesh.add_element(ElementId::new(2), [2, 3])?;
//! mesh.add_group("trunk", [ElementId::new(1), ElementId::new(2)])?;
//!
//! let options = ExportOptions::default();
//! let export = export_network(&mesh, &options, &mut LogSink)?;
//! assert_eq!(export.network().edge("trunk").unwrap().labels, ["point_1", "point_2"]);
//! # Ok::<(), MeshFlatmapError>(())
//! ```

pub mod algs;
pub mod diagnostics;
pub mod export;
pub mod geometry;
pub mod mesh;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::{
        BranchInsertion, BranchQuery, Chain, Group, MeshBranchQuery, Network, NetworkEdge,
        assemble_network, locate_branches, stitch_curves, stitch_groups,
    };
    pub use crate::diagnostics::{Diagnostic, DiagnosticSink, FieldSample, LogSink, Severity};
    pub use crate::export::{ExportOptions, FlatmapExport, NetworkPlan, export_network};
    pub use crate::geometry::{
        BezierCurve, Point2, PointKey, QuantizedPointIndex, RawEndpoint, RawSegment, Tolerance,
        Vector2,
    };
    pub use crate::mesh::{ElementId, FieldMesh, MeshLocation, PolylineMesh};
    pub use crate::mesh_error::MeshFlatmapError;
}
