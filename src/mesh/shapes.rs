//! 3D primitives: cuboids, centred cylinders and straight polygon extrusions

use crate::errors::ValidationError;
use crate::float_types::{PI, Real, TAU};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::profile::{Profile, positive};
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Axis-aligned box from `(0, 0, 0)` to `(width, length, height)`.
    pub fn cuboid(width: Real, length: Real, height: Real, metadata: Option<S>) -> Mesh<S> {
        let base = [[0.0, 0.0], [width, 0.0], [width, length], [0.0, length]];
        Self::prism(&base, height, metadata)
    }

    /// Cylinder around the Z axis, centred on the origin, so it spans
    /// `z ∈ [-height/2, height/2]`.
    ///
    /// # Example
    /// ```
    /// use window_knob::mesh::Mesh;
    /// use window_knob::traits::CSGOps;
    ///
    /// let bore: Mesh<()> = Mesh::cylinder(1.85, 20.0, 32, None).unwrap();
    /// assert_eq!(bore.bounding_box().maxs.z, 10.0);
    /// ```
    pub fn cylinder(
        radius: Real,
        height: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, ValidationError> {
        Profile::rectangle(radius, height)?.revolve(segments, metadata)
    }

    /// Extrude a planar outline in the XY plane straight up from `z = 0` to `z = height`.
    ///
    /// The outline must be convex; either winding is accepted.
    pub fn extrude_polygon(
        outline: &[[Real; 2]],
        height: Real,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, ValidationError> {
        positive("extrusion height", height)?;
        if outline.len() < 3 {
            return Err(ValidationError::DegenerateProfile(format!(
                "an extruded outline needs at least 3 points, got {}",
                outline.len()
            )));
        }
        Ok(Self::prism(outline, height, metadata))
    }

    fn prism(outline: &[[Real; 2]], height: Real, metadata: Option<S>) -> Mesh<S> {
        let mut outline = outline.to_vec();
        let twice_area: Real = outline
            .iter()
            .zip(outline.iter().cycle().skip(1))
            .map(|(p, q)| p[0] * q[1] - q[0] * p[1])
            .sum();
        if twice_area < 0.0 {
            outline.reverse();
        }

        let at = |[x, y]: [Real; 2], z: Real| Vertex::new(Point3::new(x, y, z), Vector3::zeros());
        let n = outline.len();

        let mut polygons = Vec::with_capacity(n + 2);
        polygons.push(Polygon::new(
            outline.iter().rev().map(|&p| at(p, 0.0)).collect(),
            metadata.clone(),
        ));
        polygons.push(Polygon::new(
            outline.iter().map(|&p| at(p, height)).collect(),
            metadata.clone(),
        ));
        for i in 0..n {
            let (p, q) = (outline[i], outline[(i + 1) % n]);
            polygons.push(Polygon::new(
                vec![at(p, 0.0), at(q, 0.0), at(q, height), at(p, height)],
                metadata.clone(),
            ));
        }

        Mesh::from_polygons(polygons)
    }
}

/// Counter-clockwise regular polygon with a vertex on +X, sized by the
/// distance between opposite flats (twice the apothem).
pub fn regular_polygon_across_flats(sides: usize, across_flats: Real) -> Vec<[Real; 2]> {
    let circumradius = across_flats / 2.0 / (PI / sides as Real).cos();
    (0..sides)
        .map(|i| {
            let theta = TAU * i as Real / sides as Real;
            [circumradius * theta.cos(), circumradius * theta.sin()]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CSGOps;
    use approx::assert_relative_eq;

    #[test]
    fn hexagon_across_flats() {
        let hex = regular_polygon_across_flats(6, 10.0);
        assert_eq!(hex.len(), 6);
        // midpoint of the first edge lies on a flat, 5 from the centre
        let mid = [(hex[0][0] + hex[1][0]) / 2.0, (hex[0][1] + hex[1][1]) / 2.0];
        assert_relative_eq!(mid[0].hypot(mid[1]), 5.0, epsilon = 1e-12);
        assert_relative_eq!(hex[0][0], 10.0 / 3f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn extrusion_volume_and_bounds() {
        let hex = regular_polygon_across_flats(6, 10.0);
        let prism: Mesh<()> = Mesh::extrude_polygon(&hex, 2.5, None).unwrap();
        assert_eq!(prism.len(), 8);
        // hexagon area = 2 * sqrt(3) * apothem^2
        assert_relative_eq!(prism.volume(), 2.0 * 3f64.sqrt() * 25.0 * 2.5, epsilon = 1e-9);
        let bb = prism.bounding_box();
        assert_relative_eq!(bb.mins.z, 0.0);
        assert_relative_eq!(bb.maxs.z, 2.5);
    }

    #[test]
    fn clockwise_outline_still_faces_out() {
        let square = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
        let prism: Mesh<()> = Mesh::extrude_polygon(&square, 1.0, None).unwrap();
        assert_relative_eq!(prism.volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn extrusion_rejects_bad_input() {
        assert!(Mesh::<()>::extrude_polygon(&[[0.0, 0.0], [1.0, 0.0]], 1.0, None).is_err());
        assert!(matches!(
            Mesh::<()>::extrude_polygon(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], 0.0, None),
            Err(ValidationError::NonPositive { .. })
        ));
    }

    #[test]
    fn cylinder_is_centred() {
        let cyl: Mesh<()> = Mesh::cylinder(2.0, 6.0, 32, None).unwrap();
        let bb = cyl.bounding_box();
        assert_relative_eq!(bb.mins.z, -3.0);
        assert_relative_eq!(bb.maxs.z, 3.0);
        assert_relative_eq!(bb.maxs.x, 2.0);
        assert_relative_eq!(bb.maxs.y, 2.0);
        assert_relative_eq!(bb.mins.x, -2.0);
        assert!(cyl.center().bounding_box().center().coords.norm() < 1e-12);
    }
}
