#![allow(dead_code)]
use mesh_flatmap::{
    geometry::{BezierCurve, Point2},
    mesh::{ElementId, PolylineMesh},
};

pub const COORDINATES: &str = "coordinates";
pub const MATERIAL: &str = "vagus coordinates";

pub fn eid(u: u64) -> ElementId {
    ElementId::new(u)
}

pub fn pt(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

/// Straight cubic from `a` to `b`.
pub fn line(a: (f64, f64), b: (f64, f64)) -> BezierCurve {
    let (p, q) = (pt(a.0, a.1), pt(b.0, b.1));
    let third = (q - p) / 3.0;
    BezierCurve::new(p, p + third, q - third, q)
}

/// Build a mesh from node positions, elements `(id, [n0, n1])` and groups.
///
/// Every node also gets material coordinates `[0, x, y]`, so material
/// distances equal planar distances.
pub fn polyline_mesh(
    nodes: &[(u64, (f64, f64))],
    elements: &[(u64, [u64; 2])],
    groups: &[(&str, &[u64])],
) -> PolylineMesh {
    let mut mesh = PolylineMesh::new();
    mesh.define_field(COORDINATES, 2).unwrap();
    mesh.define_field(MATERIAL, 3).unwrap();
    for &(node, (x, y)) in nodes {
        mesh.set_node_values(COORDINATES, node, &[x, y]).unwrap();
        mesh.set_node_values(MATERIAL, node, &[0.0, x, y]).unwrap();
    }
    for &(id, pair) in elements {
        mesh.add_element(eid(id), pair).unwrap();
    }
    for &(name, members) in groups {
        mesh.add_group(name, members.iter().copied().map(eid)).unwrap();
    }
    mesh
}

/// Trunk along the x axis with one branch rising at x = 1 and one falling
/// at x = 3.
pub fn branching_mesh() -> PolylineMesh {
    polyline_mesh(
        &[
            (1, (0.0, 0.0)),
            (2, (2.0, 0.0)),
            (3, (4.0, 0.0)),
            (4, (1.0, 0.0)),
            (5, (1.0, 2.0)),
            (6, (3.0, 0.0)),
            (7, (3.0, -2.0)),
        ],
        &[(1, [1, 2]), (2, [2, 3]), (3, [4, 5]), (4, [6, 7])],
        &[("trunk", &[1, 2]), ("left", &[3]), ("right", &[4])],
    )
}
