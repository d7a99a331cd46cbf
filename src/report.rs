//! Summary of a build: what was written and what it measures.

use crate::assembly::Assembly;
use crate::float_types::Real;
use crate::io::{IoError, StlSummary};
use crate::mesh::Mesh;
use crate::params::{KnobParams, Resolution};
use crate::parts::Feature;
use crate::traits::CSGOps;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct PartReport {
    pub name: &'static str,
    pub file: PathBuf,
    /// Counts as read back from the written file
    pub stl: StlSummary,
    /// `[min, max]` corners in the part's own frame
    pub bounding_box: [[Real; 3]; 2],
    /// Cubic millimetres
    pub volume: Real,
    /// Closed, consistently oriented surface with no open edges
    pub manifold: bool,
}

impl PartReport {
    pub fn new(name: &'static str, mesh: &Mesh<Feature>, file: &Path) -> Result<Self, IoError> {
        let bb = mesh.bounding_box();
        Ok(PartReport {
            name,
            file: file.to_path_buf(),
            stl: StlSummary::read(file)?,
            bounding_box: [[bb.mins.x, bb.mins.y, bb.mins.z], [bb.maxs.x, bb.maxs.y, bb.maxs.z]],
            volume: mesh.volume(),
            manifold: mesh.is_manifold(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub params: KnobParams,
    pub resolution: Resolution,
    pub parts: Vec<PartReport>,
    /// Clearance between knob and backing in the assembly
    pub gap: Option<Real>,
    pub coaxial: bool,
    /// Assembly STL, when one was written
    pub assembly: Option<PathBuf>,
}

impl BuildReport {
    pub fn new(
        params: KnobParams,
        resolution: Resolution,
        parts: Vec<PartReport>,
        assembly: &Assembly,
        assembly_file: Option<PathBuf>,
    ) -> Self {
        BuildReport {
            params,
            resolution,
            parts,
            gap: assembly.gap(),
            coaxial: assembly.is_coaxial(),
            assembly: assembly_file,
        }
    }

    pub fn log(&self) {
        for part in &self.parts {
            let [min, max] = part.bounding_box;
            let size = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
            let volume = format!("{:.1}", part.volume);
            info!(
                part = part.name,
                file = %part.file.display(),
                triangles = part.stl.triangles,
                vertices = part.stl.vertices,
                size = ?size,
                volume = %volume,
                manifold = part.manifold,
                "part exported"
            );
        }
        if let Some(gap) = self.gap {
            info!(gap, coaxial = self.coaxial, "assembly");
        }
    }

    pub fn to_json(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
