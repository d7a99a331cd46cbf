use super::{Feature, finish, screw_bore};
use crate::errors::ValidationError;
use crate::mesh::Mesh;
use crate::mesh::profile::Profile;
use crate::params::{KnobParams, Resolution};
use crate::traits::CSGOps;
use tracing::debug;

/// Build the knob: a filleted cylinder with a screw-head pocket opening on its
/// top face and the shaft bore through the floor below it.
///
/// The knob spans `z ∈ [-knob_height/2, knob_height/2]`.
pub fn build(params: &KnobParams, resolution: &Resolution) -> Result<Mesh<Feature>, ValidationError> {
    finish(carve(params, resolution)?, "knob")
}

/// The boolean cuts alone, before T-junction repair.
pub(super) fn carve(params: &KnobParams, resolution: &Resolution) -> Result<Mesh<Feature>, ValidationError> {
    let height = params.knob_height;
    let segments = resolution.circle_segments;

    let body = Profile::rectangle(params.knob_diameter / 2.0, height)?
        .fillet_circular_edges(params.fillet_radius, resolution.fillet_segments)?
        .revolve(segments, Some(Feature::Body))?;
    debug!(faces = body.len(), "knob body revolved");

    // centred on the top face, so half the cutter lies inside the knob
    let head_pocket = Mesh::cylinder(
        params.screw_head_diameter / 2.0,
        params.insertion_depth,
        segments,
        Some(Feature::ScrewHeadPocket),
    )?
    .translate(0.0, 0.0, height / 2.0);
    let knob = body.difference(&head_pocket);
    debug!(faces = knob.len(), "screw head pocket cut");

    let knob = knob.difference(&screw_bore(params, resolution, height)?);
    debug!(faces = knob.len(), "screw bore cut");

    Ok(knob)
}
