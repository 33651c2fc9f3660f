//! Shape fixtures: the elements of an axis-aligned unit cube
//!
//! Index layout:
//! - vertices: `x + 2y + 4z` for corners in {0,1}^3
//! - edges: 0..4 run along X, 4..8 along Y, 8..12 along Z
//! - faces: +X, -X, +Y, -Y, +Z, -Z

#![allow(dead_code)]

use imshape_selector::{Element, Vec3};

/// The 8 corners of the unit cube
pub fn cube_vertices() -> Vec<Element> {
    let mut vertices = Vec::with_capacity(8);
    for z in [0.0, 1.0] {
        for y in [0.0, 1.0] {
            for x in [0.0, 1.0] {
                vertices.push(Element::point(Vec3::new(x, y, z)));
            }
        }
    }
    vertices
}

/// The 12 straight edges of the unit cube, positioned at their midpoints
pub fn cube_edges() -> Vec<Element> {
    let pairs = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
    let mut edges = Vec::with_capacity(12);
    for &(y, z) in &pairs {
        edges.push(Element::edge(Vec3::new(0.5, y, z), Vec3::x()));
    }
    for &(x, z) in &pairs {
        edges.push(Element::edge(Vec3::new(x, 0.5, z), Vec3::y()));
    }
    for &(x, y) in &pairs {
        edges.push(Element::edge(Vec3::new(x, y, 0.5), Vec3::z()));
    }
    edges
}

/// The 6 faces of the unit cube, positioned at their centroids
pub fn cube_faces() -> Vec<Element> {
    vec![
        Element::face(Vec3::new(1.0, 0.5, 0.5), Vec3::x()),
        Element::face(Vec3::new(0.0, 0.5, 0.5), -Vec3::x()),
        Element::face(Vec3::new(0.5, 1.0, 0.5), Vec3::y()),
        Element::face(Vec3::new(0.5, 0.0, 0.5), -Vec3::y()),
        Element::face(Vec3::new(0.5, 0.5, 1.0), Vec3::z()),
        Element::face(Vec3::new(0.5, 0.5, 0.0), -Vec3::z()),
    ]
}

/// Vertices, then edges, then faces (0..8, 8..20, 20..26)
pub fn cube_elements() -> Vec<Element> {
    let mut elements = cube_vertices();
    elements.extend(cube_edges());
    elements.extend(cube_faces());
    elements
}

/// Points along Y used by the tie-group tests
pub fn points_along_y(ys: &[f64]) -> Vec<Element> {
    ys.iter()
        .map(|&y| Element::point(Vec3::new(0.0, y, 0.0)))
        .collect()
}

/// Route selector logs to the test output when RUST_LOG is set
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
