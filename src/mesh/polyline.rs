//! In-memory mesh of straight 1-D elements.
//!
//! Fields are stored per node and interpolated linearly along each element,
//! so every field's derivative is the element chord. Bezier curves built from
//! such elements are straight lines, and nearest-location search reduces to
//! clamped projection onto each element of the restricting group.
//!
//! # Example
//! ```rust
//! use mesh_flatmap::mesh::{ElementId, FieldMesh, PolylineMesh};
//!
//! let mut mesh = PolylineMesh::new();
//! mesh.define_field("coordinates", 2)?;
//! mesh.set_node_values("coordinates", 1, &[0.0, 0.0])?;
//! mesh.set_node_values("coordinates", 2, &[2.0, 0.0])?;
//! mesh.add_element(ElementId::new(1), [1, 2])?;
//! mesh.add_group("trunk", [ElementId::new(1)])?;
//!
//! assert_eq!(
//!     mesh.evaluate(ElementId::new(1), 0.5, "coordinates"),
//!     Some(vec![1.0, 0.0])
//! );
//! # Ok::<(), mesh_flatmap::mesh_error::MeshFlatmapError>(())
//! ```

use crate::geometry::point::Point2;
use crate::mesh::{ElementId, FieldMesh, MeshLocation};
use crate::mesh_error::MeshFlatmapError;
use hashbrown::HashMap;

/// Per-node storage of one field.
#[derive(Clone, Debug)]
struct NodeField {
    components: usize,
    values: HashMap<u64, Vec<f64>>,
}

/// Straight-element mesh with named node fields and element groups.
#[derive(Clone, Debug, Default)]
pub struct PolylineMesh {
    fields: HashMap<String, NodeField>,
    elements: Vec<(ElementId, [u64; 2])>,
    element_slot: HashMap<ElementId, usize>,
    groups: Vec<(String, Vec<ElementId>)>,
}

impl PolylineMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a node field with `components` values per node.
    ///
    /// Redefining a field discards its values.
    pub fn define_field(&mut self, name: &str, components: usize) -> Result<(), MeshFlatmapError> {
        if components == 0 {
            return Err(MeshFlatmapError::ComponentMismatch {
                field: name.to_string(),
                expected: 1,
                found: 0,
            });
        }
        self.fields.insert(
            name.to_string(),
            NodeField {
                components,
                values: HashMap::new(),
            },
        );
        Ok(())
    }

    /// Sets the value of `field` at `node`.
    pub fn set_node_values(
        &mut self,
        field: &str,
        node: u64,
        values: &[f64],
    ) -> Result<(), MeshFlatmapError> {
        let storage = self
            .fields
            .get_mut(field)
            .ok_or_else(|| MeshFlatmapError::MissingField(field.to_string()))?;
        if values.len() != storage.components {
            return Err(MeshFlatmapError::ComponentMismatch {
                field: field.to_string(),
                expected: storage.components,
                found: values.len(),
            });
        }
        storage.values.insert(node, values.to_vec());
        Ok(())
    }

    /// Appends an element running from `nodes[0]` (`xi = 0`) to `nodes[1]` (`xi = 1`).
    pub fn add_element(&mut self, id: ElementId, nodes: [u64; 2]) -> Result<(), MeshFlatmapError> {
        if self.element_slot.contains_key(&id) {
            return Err(MeshFlatmapError::InvalidElement(format!(
                "element {id} already defined"
            )));
        }
        if nodes[0] == nodes[1] {
            return Err(MeshFlatmapError::InvalidElement(format!(
                "element {id} repeats node {}",
                nodes[0]
            )));
        }
        self.element_slot.insert(id, self.elements.len());
        self.elements.push((id, nodes));
        Ok(())
    }

    /// Adds a named group over existing elements. Adding to an existing group
    /// extends it.
    pub fn add_group<I>(&mut self, name: &str, elements: I) -> Result<(), MeshFlatmapError>
    where
        I: IntoIterator<Item = ElementId>,
    {
        let members = elements.into_iter().collect::<Vec<_>>();
        if let Some(missing) = members.iter().find(|e| !self.element_slot.contains_key(*e)) {
            return Err(MeshFlatmapError::UnknownElement(*missing));
        }
        match self.groups.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => existing.extend(members),
            None => self.groups.push((name.to_string(), members)),
        }
        Ok(())
    }

    fn node_values(&self, element: ElementId, field: &str) -> Option<(&[f64], &[f64])> {
        let storage = self.fields.get(field)?;
        let &(_, [n0, n1]) = self.elements.get(*self.element_slot.get(&element)?)?;
        Some((storage.values.get(&n0)?, storage.values.get(&n1)?))
    }

    fn segment(&self, element: ElementId, field: &str) -> Option<(Point2, Point2)> {
        let (a, b) = self.node_values(element, field)?;
        Some((Point2::from_components(a)?, Point2::from_components(b)?))
    }
}

impl FieldMesh for PolylineMesh {
    fn field_components(&self, field: &str) -> Option<usize> {
        self.fields.get(field).map(|f| f.components)
    }

    fn elements(&self) -> Vec<ElementId> {
        self.elements.iter().map(|(id, _)| *id).collect()
    }

    fn groups(&self) -> Vec<String> {
        self.groups.iter().map(|(name, _)| name.clone()).collect()
    }

    fn group_elements(&self, group: &str) -> Result<Vec<ElementId>, MeshFlatmapError> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, members)| members.clone())
            .ok_or_else(|| MeshFlatmapError::UnknownGroup(group.to_string()))
    }

    fn evaluate(&self, element: ElementId, xi: f64, field: &str) -> Option<Vec<f64>> {
        let (a, b) = self.node_values(element, field)?;
        Some(a.iter().zip(b).map(|(a, b)| a + (b - a) * xi).collect())
    }

    fn evaluate_tangent(&self, element: ElementId, _xi: f64, field: &str) -> Option<Vec<f64>> {
        let (a, b) = self.node_values(element, field)?;
        Some(a.iter().zip(b).map(|(a, b)| b - a).collect())
    }

    fn find_nearest_location(
        &self,
        point: Point2,
        field: &str,
        restricted_to: &str,
    ) -> Option<MeshLocation> {
        let members = self.group_elements(restricted_to).ok()?;
        let mut best: Option<(f64, MeshLocation)> = None;
        for element in members {
            let Some((a, b)) = self.segment(element, field) else {
                continue;
            };
            let chord = b - a;
            let len_sq = chord.dot(chord);
            let xi = if len_sq > 0.0 {
                ((point - a).dot(chord) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let distance = point.distance(a + chord * xi);
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, MeshLocation { element, xi }));
            }
        }
        best.map(|(_, location)| location)
    }
}
