use super::{Feature, THROUGH_CUT_MARGIN, finish, screw_bore};
use crate::errors::ValidationError;
use crate::mesh::Mesh;
use crate::mesh::profile::Profile;
use crate::mesh::shapes::regular_polygon_across_flats;
use crate::params::{KnobParams, Resolution};
use crate::traits::CSGOps;
use tracing::debug;

/// Build the backing: a filleted flange with the shaft bore and a hex nut
/// pocket opening on its +Z face.
///
/// The flange spans `z ∈ [-t/2, t/2]` for thickness `t`.
pub fn build(params: &KnobParams, resolution: &Resolution) -> Result<Mesh<Feature>, ValidationError> {
    finish(carve(params, resolution)?, "backing")
}

/// The boolean cuts alone, before T-junction repair.
pub(super) fn carve(params: &KnobParams, resolution: &Resolution) -> Result<Mesh<Feature>, ValidationError> {
    let thickness = params.backing_flange_thickness;

    let body = Profile::rectangle(params.backing_flange_diameter / 2.0, thickness)?
        .fillet_circular_edges(params.fillet_radius, resolution.fillet_segments)?
        .revolve(resolution.circle_segments, Some(Feature::Body))?;
    debug!(faces = body.len(), "backing flange revolved");

    let backing = body.difference(&screw_bore(params, resolution, thickness)?);
    debug!(faces = backing.len(), "screw bore cut");

    let hex = Mesh::extrude_polygon(
        &regular_polygon_across_flats(6, params.hex_nut_flat_to_flat),
        params.hex_nut_depth + THROUGH_CUT_MARGIN,
        Some(Feature::HexPocket),
    )?
    .translate(0.0, 0.0, thickness / 2.0 - params.hex_nut_depth);
    let backing = backing.difference(&hex);
    debug!(faces = backing.len(), "hex nut pocket cut");

    Ok(backing)
}
