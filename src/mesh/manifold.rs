//! Watertightness of BSP output.
//!
//! BSP booleans split a face wherever a cutting plane crosses it, but the face
//! on the other side of a split edge keeps the unsplit edge. The surface is
//! closed, yet the split vertex is a T-junction and the triangulated edges no
//! longer pair up. [`Mesh::repair_t_junctions`] inserts those vertices into
//! the neighbouring outlines so every edge is shared by exactly two triangles.

use crate::float_types::{EPSILON, Real};
use crate::mesh::Mesh;
use crate::mesh::vertex::Vertex;
use nalgebra::Point3;
use std::collections::HashMap;
use std::fmt::Debug;

/// Positions closer than this are one vertex.
const WELD_TOLERANCE: Real = 1e-7;

/// Grid cells of `WELD_TOLERANCE` per unit length.
const QUANTIZATION_FACTOR: Real = 1e7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct QuantizedPoint(i64, i64, i64);

impl QuantizedPoint {
    fn of(p: &Point3<Real>) -> Self {
        QuantizedPoint(
            (p.x * QUANTIZATION_FACTOR).round() as i64,
            (p.y * QUANTIZATION_FACTOR).round() as i64,
            (p.z * QUANTIZATION_FACTOR).round() as i64,
        )
    }

    /// This cell and its 26 neighbours.
    fn neighbourhood(self) -> impl Iterator<Item = QuantizedPoint> {
        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| {
                (-1..=1).map(move |dz| QuantizedPoint(self.0 + dx, self.1 + dy, self.2 + dz))
            })
        })
    }
}

/// Snaps nearly coincident positions onto the first one seen.
#[derive(Default)]
struct Welder {
    cells: HashMap<QuantizedPoint, Vec<Point3<Real>>>,
    points: Vec<Point3<Real>>,
}

impl Welder {
    fn weld(&mut self, p: Point3<Real>) -> Point3<Real> {
        let key = QuantizedPoint::of(&p);
        for cell in key.neighbourhood() {
            let found = self
                .cells
                .get(&cell)
                .and_then(|seen| seen.iter().find(|q| (**q - p).norm() <= WELD_TOLERANCE));
            if let Some(&q) = found {
                return q;
            }
        }
        self.cells.entry(key).or_default().push(p);
        self.points.push(p);
        p
    }
}

/// Welded points strictly inside the segment `a`–`b`, ordered from `a`.
///
/// `by_x` must be sorted by `x`.
fn points_on_edge(by_x: &[Point3<Real>], a: &Vertex, b: &Vertex) -> Vec<Vertex> {
    let ab = b.pos - a.pos;
    let length = ab.norm();
    if length <= WELD_TOLERANCE {
        return Vec::new();
    }
    let dir = ab / length;

    let lo = a.pos.x.min(b.pos.x) - EPSILON;
    let hi = a.pos.x.max(b.pos.x) + EPSILON;
    let start = by_x.partition_point(|p| p.x < lo);

    let mut inside: Vec<(Real, Point3<Real>)> = by_x[start..]
        .iter()
        .take_while(|p| p.x <= hi)
        .filter_map(|p| {
            let along = (*p - a.pos).dot(&dir);
            let off = (*p - (a.pos + dir * along)).norm();
            let interior = along > WELD_TOLERANCE && length - along > WELD_TOLERANCE;
            (interior && off <= EPSILON).then_some((along, *p))
        })
        .collect();
    inside.sort_by(|x, y| x.0.total_cmp(&y.0));

    inside
        .into_iter()
        .map(|(along, pos)| Vertex::new(pos, a.interpolate(b, along / length).normal))
        .collect()
}

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Weld coincident vertices and split every edge at the vertices lying on
    /// it, so the triangulated surface has no open edges.
    ///
    /// Faces that collapse to a line are dropped. The enclosed volume is
    /// unchanged.
    pub fn repair_t_junctions(&self) -> Mesh<S> {
        let mut welder = Welder::default();
        let outlines: Vec<Vec<Vertex>> = self
            .polygons
            .iter()
            .map(|poly| {
                let mut outline: Vec<Vertex> = Vec::with_capacity(poly.vertices.len());
                for v in &poly.vertices {
                    let pos = welder.weld(v.pos);
                    if !matches!(outline.last(), Some(last) if last.pos == pos) {
                        outline.push(Vertex::new(pos, v.normal));
                    }
                }
                if outline.len() > 1 && outline[0].pos == outline[outline.len() - 1].pos {
                    outline.pop();
                }
                outline
            })
            .collect();

        let mut by_x = welder.points;
        by_x.sort_by(|p, q| p.x.total_cmp(&q.x));

        let polygons = self
            .polygons
            .iter()
            .zip(outlines)
            .filter(|(_, outline)| outline.len() >= 3)
            .map(|(poly, outline)| {
                let mut split = Vec::with_capacity(outline.len());
                for (a, b) in outline.iter().zip(outline.iter().cycle().skip(1)) {
                    split.push(a.clone());
                    split.extend(points_on_edge(&by_x, a, b));
                }
                poly.with_vertices(split)
            })
            .filter(|poly| !poly.is_degenerate())
            .collect();

        Mesh::from_polygons(polygons)
    }

    /// Checks if the Mesh object is manifold
    ///
    /// ### Returns
    /// Returns `true` if every triangle edge is matched by exactly one edge
    /// running the opposite way, i.e. the surface is closed and consistently
    /// oriented.
    pub fn is_manifold(&self) -> bool {
        let edges = self.directed_edges();
        edges
            .iter()
            .all(|(&(p, q), &n)| n == 1 && edges.get(&(q, p)) == Some(&1))
    }

    /// Directed triangle edges with no matching reverse edge. Slicers report
    /// these as open edges.
    pub fn open_edges(&self) -> usize {
        let edges = self.directed_edges();
        edges
            .iter()
            .map(|(&(p, q), &n)| n.saturating_sub(edges.get(&(q, p)).copied().unwrap_or(0)))
            .sum()
    }

    fn directed_edges(&self) -> HashMap<(QuantizedPoint, QuantizedPoint), usize> {
        let mut edges = HashMap::new();
        for [a, b, c] in self.polygons.iter().flat_map(|p| p.triangulate()) {
            for (from, to) in [(&a, &b), (&b, &c), (&c, &a)] {
                let key = (QuantizedPoint::of(&from.pos), QuantizedPoint::of(&to.pos));
                *edges.entry(key).or_insert(0) += 1;
            }
        }
        edges
    }
}
