//! The mesh/field collaborator seam.
//!
//! The exporter never walks a mesh representation itself. Everything it needs
//! from the finite-element layer goes through [`FieldMesh`]: field lookup,
//! element and group enumeration, evaluation of a field or its first
//! derivative at an element-local location, and nearest-location search on
//! the elements of one group.
//!
//! [`polyline::PolylineMesh`] is an in-memory implementation over straight
//! 1-D elements.

pub mod polyline;

use crate::geometry::point::Point2;
use crate::mesh_error::MeshFlatmapError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use polyline::PolylineMesh;

/// Identifier of a mesh element.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct ElementId(pub u64);

impl ElementId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        ElementId(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A location inside one element, given by the element's first local
/// coordinate `xi` in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshLocation {
    pub element: ElementId,
    pub xi: f64,
}

/// Read access to a finite-element mesh and its fields.
///
/// Evaluations return `None` when the field is not defined at the requested
/// location; that is a per-element condition, not an error.
pub trait FieldMesh {
    /// Number of components of `field`, or `None` if the mesh lacks it.
    fn field_components(&self, field: &str) -> Option<usize>;

    /// All elements, in traversal order.
    fn elements(&self) -> Vec<ElementId>;

    /// Names of all element groups, in mesh order.
    fn groups(&self) -> Vec<String>;

    /// Elements belonging to `group`, in traversal order.
    fn group_elements(&self, group: &str) -> Result<Vec<ElementId>, MeshFlatmapError>;

    /// Value of `field` at `xi` in `element`.
    fn evaluate(&self, element: ElementId, xi: f64, field: &str) -> Option<Vec<f64>>;

    /// Derivative of `field` with respect to the first local coordinate.
    fn evaluate_tangent(&self, element: ElementId, xi: f64, field: &str) -> Option<Vec<f64>>;

    /// Location on the elements of `restricted_to` whose `field` value is
    /// nearest to `point`. `None` when the search fails.
    fn find_nearest_location(
        &self,
        point: Point2,
        field: &str,
        restricted_to: &str,
    ) -> Option<MeshLocation>;

    /// Value of `field` at a previously found location.
    fn evaluate_at(&self, location: MeshLocation, field: &str) -> Option<Vec<f64>> {
        self.evaluate(location.element, location.xi, field)
    }
}
