//! Placing the parts in one frame for visualization.
//!
//! The assembly is a compound: located copies of each part side by side, never
//! fused. The screw axis is the shared Z axis, so every placement is a pure
//! translation along it.

use crate::float_types::{EPSILON, Real};
use crate::mesh::Mesh;
use crate::params::KnobParams;
use crate::parts::{Feature, Parts};
use crate::traits::CSGOps;
use serde::Serialize;

/// Placement of a part along the shared screw axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub z: Real,
}

impl Location {
    pub const fn along_z(z: Real) -> Self {
        Location { z }
    }

    pub fn apply<S: Clone + Send + Sync + std::fmt::Debug>(&self, mesh: &Mesh<S>) -> Mesh<S> {
        mesh.translate(0.0, 0.0, self.z)
    }
}

/// A part positioned in the assembly frame.
#[derive(Debug, Clone)]
pub struct LocatedPart {
    pub name: &'static str,
    pub location: Location,
    /// The part's mesh, already moved to `location`
    pub mesh: Mesh<Feature>,
}

#[derive(Debug, Clone)]
pub struct Assembly {
    parts: Vec<LocatedPart>,
}

impl Assembly {
    /// Knob above the origin with its bottom face on `z = 0`, backing below
    /// with its top face at `-(knob_height + backing_flange_thickness) / 2`.
    pub fn for_parts(parts: &Parts, params: &KnobParams) -> Self {
        let knob_z = params.knob_height / 2.0;
        let backing_z = -(params.knob_height / 2.0 + params.backing_flange_thickness);

        let parts = parts
            .iter()
            .zip([knob_z, backing_z])
            .map(|((name, mesh), z)| {
                let location = Location::along_z(z);
                LocatedPart {
                    name,
                    location,
                    mesh: location.apply(mesh),
                }
            })
            .collect();
        Assembly { parts }
    }

    pub fn parts(&self) -> &[LocatedPart] {
        &self.parts
    }

    pub fn located(&self, name: &str) -> Option<&LocatedPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// All parts as one multi-body mesh.
    pub fn to_mesh(&self) -> Mesh<Feature> {
        self.parts
            .iter()
            .fold(Mesh::new(), |acc, part| acc.merged(&part.mesh))
    }

    /// Clearance between the knob's bottom and the backing's top.
    pub fn gap(&self) -> Option<Real> {
        let knob = self.located("knob")?.mesh.bounding_box();
        let backing = self.located("backing")?.mesh.bounding_box();
        Some(knob.mins.z - backing.maxs.z)
    }

    /// Whether every part is centred on the Z axis, so the bore runs straight
    /// through the stack.
    pub fn is_coaxial(&self) -> bool {
        self.parts.iter().all(|part| {
            let center = part.mesh.bounding_box().center();
            center.x.abs() < EPSILON && center.y.abs() < EPSILON
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Resolution;
    use crate::parts::build_parts;
    use approx::assert_relative_eq;

    fn assembly() -> Assembly {
        let params = KnobParams::default();
        let parts = build_parts(&params, &Resolution {
            circle_segments: 24,
            fillet_segments: 2,
        })
        .unwrap();
        Assembly::for_parts(&parts, &params)
    }

    #[test]
    fn default_layout() {
        let asm = assembly();
        assert_eq!(asm.parts().len(), 2);
        assert_relative_eq!(asm.located("knob").unwrap().location.z, 10.0);
        assert_relative_eq!(asm.located("backing").unwrap().location.z, -15.0);
        assert_relative_eq!(asm.gap().unwrap(), 12.5, epsilon = 1e-9);
        let knob = asm.located("knob").unwrap().mesh.bounding_box();
        let backing = asm.located("backing").unwrap().mesh.bounding_box();
        assert_relative_eq!(knob.mins.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(backing.maxs.z, -(20.0 + 5.0) / 2.0, epsilon = 1e-9);
        assert!(asm.is_coaxial());
        assert!(asm.located("nut").is_none());
    }

    #[test]
    fn compound_keeps_every_face() {
        let asm = assembly();
        let total: usize = asm.parts().iter().map(|p| p.mesh.len()).sum();
        let compound = asm.to_mesh();
        assert_eq!(compound.len(), total);
        let bb = compound.bounding_box();
        assert_relative_eq!(bb.maxs.z, 20.0, epsilon = 1e-9);
        assert_relative_eq!(bb.mins.z, -17.5, epsilon = 1e-9);
    }

    #[test]
    fn offset_part_is_not_coaxial() {
        let mut asm = assembly();
        asm.parts[1].mesh = asm.parts[1].mesh.translate(1.0, 0.0, 0.0);
        assert!(!asm.is_coaxial());
    }
}
