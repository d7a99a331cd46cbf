//! Half cross-sections of solids of revolution.
//!
//! A [`Profile`] is an open polyline in the `(r, z)` half-plane that starts and
//! ends on the Z axis. Revolving it once around Z yields a closed solid whose
//! circular edges are exactly the profile's off-axis corners, which is why
//! rounding those corners is the fillet operation for turned parts.
//!
//! ```text
//!  z ▲
//!    │ (0, h/2) ●───────╮        ╭ fillet arc replaces the corner
//!    │                  │
//!    │                  │  side wall
//!    │                  │
//!    │ (0,-h/2) ●───────╯ (r, -h/2)
//!    └────────────────────────► r
//! ```

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, PI, Real, TAU};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector2, Vector3};
use std::fmt::Debug;

/// An `(r, z)` polyline from a point on the axis to another point on the axis,
/// wound counter-clockwise around the section it bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    points: Vec<[Real; 2]>,
}

impl Profile {
    /// Build a profile, normalising its winding.
    ///
    /// # Errors
    /// [`ValidationError::DegenerateProfile`] unless the polyline has at least
    /// three points, starts and ends on the axis, stays strictly off the axis
    /// in between, and encloses a non-zero area.
    pub fn new(points: Vec<[Real; 2]>) -> Result<Self, ValidationError> {
        let mut points = points;
        points.dedup_by(|a, b| (a[0] - b[0]).abs() < EPSILON && (a[1] - b[1]).abs() < EPSILON);

        if points.len() < 3 {
            return Err(ValidationError::DegenerateProfile(format!(
                "a profile needs at least 3 distinct points, got {}",
                points.len()
            )));
        }
        if points.iter().flatten().any(|c| !c.is_finite()) {
            return Err(ValidationError::DegenerateProfile(
                "profile coordinates must be finite".into(),
            ));
        }

        let (first, last) = (points[0], points[points.len() - 1]);
        if first[0].abs() > EPSILON || last[0].abs() > EPSILON {
            return Err(ValidationError::DegenerateProfile(
                "a profile must start and end on the axis (r = 0)".into(),
            ));
        }
        if let Some(p) = points[1..points.len() - 1].iter().find(|p| p[0] <= EPSILON) {
            return Err(ValidationError::DegenerateProfile(format!(
                "interior profile point ({}, {}) touches or crosses the axis",
                p[0], p[1]
            )));
        }

        // snap the end points exactly onto the axis
        let end = points.len() - 1;
        points[0][0] = 0.0;
        points[end][0] = 0.0;

        let area = signed_area(&points);
        if area.abs() < EPSILON * EPSILON {
            return Err(ValidationError::DegenerateProfile(
                "profile encloses no area".into(),
            ));
        }
        if area < 0.0 {
            points.reverse();
        }

        Ok(Profile { points })
    }

    /// Section of a cylinder of `radius` and `height`, centred on the origin.
    pub fn rectangle(radius: Real, height: Real) -> Result<Self, ValidationError> {
        positive("radius", radius)?;
        positive("height", height)?;
        let half = height / 2.0;
        Self::new(vec![[0.0, -half], [radius, -half], [radius, half], [0.0, half]])
    }

    /// The profile's points, from the lower axis point to the upper one.
    pub fn points(&self) -> &[[Real; 2]] {
        &self.points
    }

    /// Round every off-axis corner with an arc of `radius` made of `segments` chords.
    ///
    /// Each corner is a circular edge of the revolved solid. A radius of zero
    /// returns the profile unchanged.
    ///
    /// # Errors
    /// - [`ValidationError::NonPositive`] for a negative or non-finite radius.
    /// - [`ValidationError::TooFewSegments`] for `segments == 0`.
    /// - [`ValidationError::FilletTooLarge`] when the tangent points of the
    ///   fillets at both ends of an edge meet or overrun each other. For a
    ///   cylinder that is `radius >= cylinder radius` or `2 * radius >= height`.
    pub fn fillet_circular_edges(
        &self,
        radius: Real,
        segments: usize,
    ) -> Result<Self, ValidationError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ValidationError::NonPositive {
                name: "fillet radius",
                value: radius,
            });
        }
        if segments == 0 {
            return Err(ValidationError::TooFewSegments {
                what: "fillet",
                requested: segments,
                minimum: 1,
            });
        }
        if radius == 0.0 {
            return Ok(self.clone());
        }

        let pts: Vec<Vector2<Real>> = self.points.iter().map(|&[r, z]| Vector2::new(r, z)).collect();
        let n = pts.len();

        // corner geometry: (unit toward prev, unit toward next, tangent setback)
        let corners: Vec<Option<(Vector2<Real>, Vector2<Real>, Real)>> = (0..n)
            .map(|i| {
                if i == 0 || i == n - 1 {
                    return None;
                }
                let u = (pts[i - 1] - pts[i]).normalize();
                let v = (pts[i + 1] - pts[i]).normalize();
                let angle = u.dot(&v).clamp(-1.0, 1.0).acos();
                if (PI - angle).abs() < 1e-9 {
                    return None; // straight through, no edge to round
                }
                Some((u, v, radius / (angle / 2.0).tan()))
            })
            .collect();

        let setback = |i: usize| corners[i].map_or(0.0, |(_, _, d)| d);
        for i in 0..n - 1 {
            let required = setback(i) + setback(i + 1);
            let available = (pts[i + 1] - pts[i]).norm();
            if required >= available - EPSILON {
                return Err(ValidationError::FilletTooLarge {
                    radius,
                    required,
                    available,
                });
            }
        }

        let mut out = Vec::with_capacity(n + (n - 2) * segments);
        for (i, corner) in corners.iter().enumerate() {
            let Some((u, v, d)) = *corner else {
                out.push(self.points[i]);
                continue;
            };
            let p = pts[i];
            let t1 = p + u * d;
            let t2 = p + v * d;
            let half_angle = u.dot(&v).clamp(-1.0, 1.0).acos() / 2.0;
            let center = p + (u + v).normalize() * (radius / half_angle.sin());

            let a1 = (t1.y - center.y).atan2(t1.x - center.x);
            let a2 = (t2.y - center.y).atan2(t2.x - center.x);
            let mut sweep = a2 - a1;
            if sweep > PI {
                sweep -= TAU;
            } else if sweep <= -PI {
                sweep += TAU;
            }

            out.push([t1.x, t1.y]);
            for k in 1..segments {
                let a = a1 + sweep * k as Real / segments as Real;
                out.push([center.x + radius * a.cos(), center.y + radius * a.sin()]);
            }
            out.push([t2.x, t2.y]);
        }

        Self::new(out)
    }

    /// Revolve the profile a full turn around Z with `segments` steps.
    ///
    /// Flat edges ending on the axis become single n-gon caps, sloped ones
    /// become triangle fans, and all other edges become rings of planar quads.
    /// The result is closed and outward-facing.
    pub fn revolve<S: Clone + Send + Sync + Debug>(
        &self,
        segments: usize,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, ValidationError> {
        if segments < 3 {
            return Err(ValidationError::TooFewSegments {
                what: "revolve",
                requested: segments,
                minimum: 3,
            });
        }

        let trig: Vec<(Real, Real)> = (0..segments)
            .map(|k| {
                let theta = TAU * k as Real / segments as Real;
                (theta.cos(), theta.sin())
            })
            .collect();
        let ring = |[r, z]: [Real; 2], k: usize| {
            let (c, s) = trig[k % segments];
            Vertex::new(Point3::new(r * c, r * s, z), Vector3::zeros())
        };
        let axis = |[_, z]: [Real; 2]| Vertex::new(Point3::new(0.0, 0.0, z), Vector3::zeros());

        let mut polygons = Vec::new();
        for edge in self.points.windows(2) {
            let (a, b) = (edge[0], edge[1]);
            let a_on_axis = a[0] == 0.0;
            let b_on_axis = b[0] == 0.0;
            let flat = (a[1] - b[1]).abs() < EPSILON;

            match (a_on_axis, b_on_axis) {
                (true, true) => {},
                (true, false) if flat => {
                    let cap = (0..segments).rev().map(|k| ring(b, k)).collect();
                    polygons.push(Polygon::new(cap, metadata.clone()));
                },
                (false, true) if flat => {
                    let cap = (0..segments).map(|k| ring(a, k)).collect();
                    polygons.push(Polygon::new(cap, metadata.clone()));
                },
                (true, false) => {
                    for k in 0..segments {
                        polygons.push(Polygon::new(
                            vec![axis(a), ring(b, k + 1), ring(b, k)],
                            metadata.clone(),
                        ));
                    }
                },
                (false, true) => {
                    for k in 0..segments {
                        polygons.push(Polygon::new(
                            vec![ring(a, k), ring(a, k + 1), axis(b)],
                            metadata.clone(),
                        ));
                    }
                },
                (false, false) => {
                    for k in 0..segments {
                        polygons.push(Polygon::new(
                            vec![ring(a, k), ring(a, k + 1), ring(b, k + 1), ring(b, k)],
                            metadata.clone(),
                        ));
                    }
                },
            }
        }

        Ok(Mesh::from_polygons(polygons))
    }
}

/// Shoelace area of the section, closed along the axis.
fn signed_area(points: &[[Real; 2]]) -> Real {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p, q)| p[0] * q[1] - q[0] * p[1])
        .sum::<Real>()
        / 2.0
}

pub(crate) fn positive(name: &'static str, value: Real) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositive { name, value })
    }
}
