//! Convex planar faces

use crate::float_types::{EPSILON, Real};
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// A convex, planar polygon with an optional metadata tag.
///
/// Every face this crate builds is convex, and BSP splitting only ever cuts
/// convex faces into convex pieces, so fan triangulation is always valid.
/// Outlines may carry collinear vertices once T-junctions are repaired.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync> Polygon<S> {
    /// Create a polygon from vertices, computing its plane from the winding.
    ///
    /// Vertex normals are replaced with the face normal (flat shading).
    pub fn new(mut vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        debug_assert!(vertices.len() >= 3, "degenerate polygon");
        let plane = Plane::from_vertices(&vertices);
        for v in &mut vertices {
            v.normal = plane.normal;
        }
        Polygon {
            vertices,
            plane,
            metadata,
        }
    }

    /// A piece of this polygon: same plane, same metadata, new outline.
    pub fn with_vertices(&self, vertices: Vec<Vertex>) -> Self {
        Polygon {
            vertices,
            plane: self.plane.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Reverse winding order, flip vertex normals and flip the plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.vertices.iter_mut().for_each(Vertex::flip);
        self.plane.flip();
    }

    /// Fan triangulation around the first vertex.
    ///
    /// When that fan would contain a zero-area triangle (collinear vertices on
    /// an edge next to the first one), the fan is taken around the centroid
    /// instead, which lies strictly inside the face.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let Some((first, rest)) = self.vertices.split_first() else {
            return Vec::new();
        };
        let fan: Vec<_> = rest
            .windows(2)
            .map(|pair| [first.clone(), pair[0].clone(), pair[1].clone()])
            .collect();
        if fan.len() < 2 || !fan.iter().any(|[a, b, c]| is_sliver(a, b, c)) {
            return fan;
        }

        let centroid = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
            / self.vertices.len() as Real;
        let centre = Vertex::new(Point3::from(centroid), self.plane.normal);
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .map(|(a, b)| [centre.clone(), a.clone(), b.clone()])
            .collect()
    }

    /// All vertices on one line: the face has no area.
    pub fn is_degenerate(&self) -> bool {
        let Some((first, rest)) = self.vertices.split_first() else {
            return true;
        };
        rest.windows(2).all(|pair| is_sliver(first, &pair[0], &pair[1]))
    }

    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }
}

/// `c` within `EPSILON` of the line through `a` and `b`, or the other way round.
fn is_sliver(a: &Vertex, b: &Vertex, c: &Vertex) -> bool {
    let ab = b.pos - a.pos;
    let ac = c.pos - a.pos;
    ab.cross(&ac).norm() <= EPSILON * ab.norm().max(ac.norm())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexagon() -> Polygon<u8> {
        let vertices = (0..6)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / 6.0;
                Vertex::new(Point3::new(a.cos(), a.sin(), 0.0), Vector3::zeros())
            })
            .collect();
        Polygon::new(vertices, Some(7))
    }

    #[test]
    fn fan_triangulation_count() {
        let poly = hexagon();
        assert_eq!(poly.triangulate().len(), 4);
    }

    #[test]
    fn collinear_vertices_fan_from_the_centroid() {
        // unit square with an extra vertex halfway along its first edge
        let vertices = [[0.0, 0.0], [0.5, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
            .iter()
            .map(|&[x, y]| Vertex::new(Point3::new(x, y, 0.0), Vector3::zeros()))
            .collect();
        let poly: Polygon<()> = Polygon::new(vertices, None);
        assert!(!poly.is_degenerate());

        let triangles = poly.triangulate();
        assert_eq!(triangles.len(), 5);
        assert!(triangles.iter().all(|[a, b, c]| !is_sliver(a, b, c)));
        let area: f64 = triangles
            .iter()
            .map(|[a, b, c]| (b.pos - a.pos).cross(&(c.pos - a.pos)).z / 2.0)
            .sum();
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_outline_is_degenerate() {
        let vertices = (0..3)
            .map(|i| Vertex::new(Point3::new(i as f64, 0.0, 0.0), Vector3::zeros()))
            .collect();
        let poly: Polygon<()> = Polygon::new(vertices, None);
        assert!(poly.is_degenerate());
        assert!(!hexagon().is_degenerate());
    }

    #[test]
    fn new_assigns_face_normal_to_vertices() {
        let poly = hexagon();
        assert!(poly.vertices.iter().all(|v| v.normal == Vector3::z()));
    }

    #[test]
    fn flip_reverses_everything() {
        let mut poly = hexagon();
        let first = poly.vertices[0].pos;
        poly.flip();
        assert_eq!(poly.vertices[5].pos, first);
        assert_eq!(poly.plane.normal, -Vector3::z());
        assert!(poly.vertices.iter().all(|v| v.normal == -Vector3::z()));
        assert_eq!(poly.metadata(), Some(&7));
    }
}
