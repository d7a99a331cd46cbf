//! `Mesh` struct and implementations of the `CSGOps` trait for `Mesh`

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::mesh::{bsp::Node, polygon::Polygon};
use crate::traits::CSGOps;
use nalgebra::{Matrix4, Point3};
use std::collections::HashSet;
use std::{fmt::Debug, sync::OnceLock};
use tracing::trace;

pub mod bsp;
pub mod manifold;
pub mod plane;
pub mod polygon;
pub mod profile;
pub mod shapes;
pub mod triangulated;
pub mod vertex;

/// A closed solid as a soup of convex polygons.
#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// 3D polygons for volumetric shapes
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: Vec<Polygon<S>>) -> Self {
        Mesh {
            polygons,
            bounding_box: OnceLock::new(),
        }
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Triangulate each polygon in the Mesh returning a Mesh containing triangles
    pub fn triangulate(&self) -> Mesh<S> {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate()
                    .into_iter()
                    .map(move |triangle| poly.with_vertices(triangle.to_vec()))
            })
            .collect();

        Mesh::from_polygons(triangles)
    }

    /// Number of triangles the mesh exports as.
    pub fn triangle_count(&self) -> usize {
        self.polygons.iter().map(|p| p.triangulate().len()).sum()
    }

    /// Number of distinct vertex positions in the exported triangles (bitwise equality).
    pub fn vertex_count(&self) -> usize {
        self.polygons
            .iter()
            .flat_map(|p| p.triangulate())
            .flatten()
            .map(|v| [v.pos.x.to_bits(), v.pos.y.to_bits(), v.pos.z.to_bits()])
            .collect::<HashSet<_>>()
            .len()
    }

    /// Enclosed volume via the divergence theorem.
    ///
    /// Positive for outward-facing closed surfaces.
    pub fn volume(&self) -> Real {
        self.polygons
            .iter()
            .flat_map(|p| p.triangulate())
            .map(|[a, b, c]| a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords)))
            .sum::<Real>()
            / 6.0
    }

    /// Faces carrying the given metadata tag.
    pub fn polygons_with<'a>(&'a self, metadata: &'a S) -> impl Iterator<Item = &'a Polygon<S>>
    where
        S: PartialEq,
    {
        self.polygons
            .iter()
            .filter(move |p| p.metadata() == Some(metadata))
    }

    /// Combine two solids without any boolean: a compound of both.
    pub fn merged(&self, other: &Mesh<S>) -> Mesh<S> {
        let mut polygons = self.polygons.clone();
        polygons.extend_from_slice(&other.polygons);
        Mesh::from_polygons(polygons)
    }
}

impl<S: Clone + Send + Sync + Debug> CSGOps for Mesh<S> {
    /// Returns a new empty Mesh
    fn new() -> Self {
        Mesh::from_polygons(Vec::new())
    }

    /// Return a new Mesh representing union of the two Meshes.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Mesh<S>) -> Mesh<S> {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        let result = Mesh::from_polygons(a.all_polygons());
        trace!(lhs = self.len(), rhs = other.len(), out = result.len(), "union");
        result
    }

    /// Return a new Mesh representing difference of the two Meshes.
    ///
    /// ```text
    /// let c = a.difference(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn difference(&self, other: &Mesh<S>) -> Mesh<S> {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        let result = Mesh::from_polygons(a.all_polygons());
        trace!(lhs = self.len(), rhs = other.len(), out = result.len(), "difference");
        result
    }

    /// Return a new Mesh representing intersection of the two Meshes.
    ///
    /// ```text
    /// let c = a.intersect(b);
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn intersection(&self, other: &Mesh<S>) -> Mesh<S> {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        let result = Mesh::from_polygons(a.all_polygons());
        trace!(lhs = self.len(), rhs = other.len(), out = result.len(), "intersection");
        result
    }

    /// Apply an affine 3D transform (as a 4x4 matrix) to the mesh.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh<S> {
        // singular matrices have no normal matrix; keep normals as transformed vectors
        let normal_matrix = mat.try_inverse().map_or(*mat, |inv| inv.transpose());
        let mut mesh = self.clone();

        for poly in &mut mesh.polygons {
            for vert in &mut poly.vertices {
                vert.pos = mat.transform_point(&vert.pos);
                vert.normal = normal_matrix.transform_vector(&vert.normal).normalize();
            }
            poly.plane = plane::Plane::from_vertices(&poly.vertices);
        }

        mesh.invalidate_bounding_box();
        mesh
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);

            for v in self.polygons.iter().flat_map(|p| p.vertices.iter()) {
                mins = mins.inf(&v.pos);
                maxs = maxs.sup(&v.pos);
            }

            // no polygons: a trivial AABB at the origin
            if mins.x > maxs.x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Invert this Mesh (flip inside vs. outside)
    fn inverse(&self) -> Mesh<S> {
        let mut mesh = self.clone();
        for p in &mut mesh.polygons {
            p.flip();
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_mesh_has_trivial_bounds() {
        let mesh: Mesh<()> = Mesh::new();
        let bb = mesh.bounding_box();
        assert_eq!(bb.mins, Point3::origin());
        assert_eq!(bb.maxs, Point3::origin());
        assert_eq!(mesh.volume(), 0.0);
    }

    #[test]
    fn translate_moves_bounds_and_keeps_volume() {
        let cube: Mesh<()> = Mesh::cuboid(2.0, 2.0, 2.0, None);
        let moved = cube.translate(1.0, 2.0, 3.0);
        let bb = moved.bounding_box();
        assert_relative_eq!(bb.mins.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(bb.mins.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(bb.maxs.z, 5.0, epsilon = 1e-12);
        assert_relative_eq!(moved.volume(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn inverse_negates_volume() {
        let cube: Mesh<()> = Mesh::cuboid(1.0, 2.0, 3.0, None);
        assert_relative_eq!(cube.inverse().volume(), -6.0, epsilon = 1e-9);
    }

    #[test]
    fn counts_for_cuboid() {
        let cube: Mesh<()> = Mesh::cuboid(1.0, 1.0, 1.0, None);
        assert_eq!(cube.len(), 6);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.triangulate().len(), 12);
        assert_eq!(cube.vertex_count(), 8);
    }
}
