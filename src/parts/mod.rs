//! The two printable parts: the knob and the backing flange behind the door panel.
//!
//! Both are built centred on the origin with their screw axis on Z. Placement
//! relative to each other is the job of [`crate::assembly`].

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::params::{KnobParams, Resolution};
use serde::Serialize;
use tracing::{debug, warn};

pub mod backing;
pub mod knob;

/// Tag on every face naming the feature that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Feature {
    /// Outer (filleted) surface of the part
    Body,
    ScrewHeadPocket,
    /// Shaft bore shared by both parts
    ScrewBore,
    HexPocket,
}

/// How far a through-cut overshoots the solid at each end.
pub const THROUGH_CUT_MARGIN: Real = 1.0;

/// Both parts, each in its own frame.
#[derive(Debug, Clone)]
pub struct Parts {
    pub knob: Mesh<Feature>,
    pub backing: Mesh<Feature>,
}

impl Parts {
    /// `(name, mesh)` pairs, knob first. Names double as output file stems.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Mesh<Feature>)> {
        [("knob", &self.knob), ("backing", &self.backing)].into_iter()
    }
}

/// Validate `params` and `resolution`, then build both parts.
pub fn build_parts(params: &KnobParams, resolution: &Resolution) -> Result<Parts, ValidationError> {
    params.validate()?;
    resolution.validate()?;
    Ok(Parts {
        knob: knob::build(params, resolution)?,
        backing: backing::build(params, resolution)?,
    })
}

/// Shaft bore through a part of the given `thickness`, centred on the origin.
fn screw_bore(
    params: &KnobParams,
    resolution: &Resolution,
    thickness: Real,
) -> Result<Mesh<Feature>, ValidationError> {
    Mesh::cylinder(
        params.screw_hole_diameter / 2.0,
        thickness + 2.0 * THROUGH_CUT_MARGIN,
        resolution.circle_segments,
        Some(Feature::ScrewBore),
    )
}

/// Reject an empty result, then close the T-junctions the cuts left so the
/// exported surface is watertight.
fn finish(mesh: Mesh<Feature>, part: &'static str) -> Result<Mesh<Feature>, ValidationError> {
    if mesh.is_empty() {
        return Err(ValidationError::EmptySolid(part));
    }
    let open = mesh.open_edges();
    let mesh = mesh.repair_t_junctions();
    if mesh.is_manifold() {
        debug!(part, repaired = open, faces = mesh.len(), "T-junctions closed");
    } else {
        warn!(part, open_edges = mesh.open_edges(), "surface is not watertight");
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_params_build_nothing() {
        let params = KnobParams {
            screw_hole_diameter: 12.0,
            ..KnobParams::default()
        };
        assert!(matches!(
            build_parts(&params, &Resolution::default()),
            Err(ValidationError::HoleTooLarge { .. })
        ));
    }

    #[test]
    fn parts_iterate_knob_first() {
        let parts = build_parts(&KnobParams::default(), &Resolution {
            circle_segments: 24,
            fillet_segments: 2,
        })
        .unwrap();
        let names: Vec<_> = parts.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["knob", "backing"]);
    }

    #[test]
    fn finished_parts_have_no_open_edges() {
        let params = KnobParams::default();
        let resolution = Resolution {
            circle_segments: 16,
            fillet_segments: 2,
        };
        let raw = knob::carve(&params, &resolution).unwrap();
        assert!(raw.open_edges() > 0);

        let finished = finish(raw.clone(), "knob").unwrap();
        assert!(finished.is_manifold());
        assert!((finished.volume() - raw.volume()).abs() < 1e-6);
    }

    #[test]
    fn empty_mesh_is_rejected() {
        assert_eq!(
            finish(Mesh::from_polygons(Vec::new()), "knob").unwrap_err(),
            ValidationError::EmptySolid("knob")
        );
    }
}
