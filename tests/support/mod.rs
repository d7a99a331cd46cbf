//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use window_knob::{
    Feature, Resolution,
    float_types::Real,
    mesh::{Mesh, polygon::Polygon},
};

/// Coarse tessellation that keeps booleans fast while still putting vertices
/// on the X and Y axes.
pub fn coarse() -> Resolution {
    Resolution {
        circle_segments: 32,
        fillet_segments: 3,
    }
}

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box<S: Clone>(polygons: &[Polygon<S>]) -> [Real; 6] {
    let mut bb = [Real::MAX, Real::MAX, Real::MAX, Real::MIN, Real::MIN, Real::MIN];
    for v in polygons.iter().flat_map(|p| p.vertices.iter()) {
        for (axis, value) in [v.pos.x, v.pos.y, v.pos.z].into_iter().enumerate() {
            bb[axis] = bb[axis].min(value);
            bb[axis + 3] = bb[axis + 3].max(value);
        }
    }
    bb
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Radius of the shaft bore, measured on the faces the bore cutter left behind.
pub fn bore_radius(mesh: &Mesh<Feature>) -> Real {
    mesh.polygons_with(&Feature::ScrewBore)
        .flat_map(|p| p.vertices.iter())
        .map(|v| v.radial_distance())
        .fold(0.0, Real::max)
}

/// Extent of a mesh along Z.
pub fn height<S: Clone + Send + Sync + std::fmt::Debug>(mesh: &Mesh<S>) -> Real {
    let bb = bounding_box(&mesh.polygons);
    bb[5] - bb[2]
}

/// Area of a regular `n`-gon inscribed in a circle of radius `r`.
pub fn inscribed_polygon_area(n: usize, r: Real) -> Real {
    0.5 * n as Real * r * r * (std::f64::consts::TAU / n as Real).sin()
}
