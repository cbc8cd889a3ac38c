//! MeshFlatmapError: Unified error type for mesh-flatmap public APIs
//!
//! Only conditions that make an export meaningless are errors. Anything the
//! pipeline can degrade around (dropped segments, fragmented groups, missing
//! branch parents) is reported as a [`Diagnostic`](crate::diagnostics::Diagnostic)
//! instead.

use crate::mesh::ElementId;
use thiserror::Error;

/// Unified error type for mesh-flatmap operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshFlatmapError {
    /// A field required by the export is not defined on the mesh.
    #[error("Required field `{0}` is not defined on the mesh")]
    MissingField(String),
    /// A field is defined but has too few components for its use.
    #[error("Field `{field}` has {found} component(s), expected at least {expected}")]
    ComponentMismatch {
        field: String,
        expected: usize,
        found: usize,
    },
    /// A group name was not found on the mesh.
    #[error("Unknown group `{0}`")]
    UnknownGroup(String),
    /// An element identifier was not found on the mesh.
    #[error("Unknown element {0}")]
    UnknownElement(ElementId),
    /// An element could not be constructed.
    #[error("Invalid element: {0}")]
    InvalidElement(String),
}
