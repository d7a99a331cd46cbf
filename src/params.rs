//! Part dimensions and tessellation settings.
//!
//! All lengths are millimetres. The defaults are the dimensions of the
//! replacement knob for a 1981 Dodge Ram campervan window roller and its
//! #6 screw and nut.

use crate::errors::ValidationError;
use crate::float_types::{PI, Real};
use crate::io::IoError;
use crate::mesh::profile::positive;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every named dimension of the knob and its backing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KnobParams {
    pub knob_diameter: Real,
    pub knob_height: Real,
    /// Shaft bore through both parts (approx. #6 screw)
    pub screw_hole_diameter: Real,
    pub screw_head_diameter: Real,
    /// Length of the head-pocket cutter, centred on the knob's top face
    pub insertion_depth: Real,
    pub backing_flange_diameter: Real,
    pub backing_flange_thickness: Real,
    /// Hex pocket size across flats (approx. #6 nut)
    pub hex_nut_flat_to_flat: Real,
    pub hex_nut_depth: Real,
    /// Applied to the circular edges of both cylinders. Zero leaves them sharp.
    pub fillet_radius: Real,
}

impl Default for KnobParams {
    fn default() -> Self {
        KnobParams {
            knob_diameter: 35.0,
            knob_height: 20.0,
            screw_hole_diameter: 3.7,
            screw_head_diameter: 8.0,
            insertion_depth: 35.0,
            backing_flange_diameter: 15.0,
            backing_flange_thickness: 5.0,
            hex_nut_flat_to_flat: 10.0,
            hex_nut_depth: 2.5,
            fillet_radius: 2.0,
        }
    }
}

impl KnobParams {
    /// Load parameters from a JSON object. Omitted fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, IoError> {
        let text = std::fs::read_to_string(path).map_err(|source| IoError::File {
            action: "failed to read",
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Depth of the screw-head pocket below the knob's top face.
    pub fn head_pocket_depth(&self) -> Real {
        self.insertion_depth / 2.0
    }

    /// Distance between opposite corners of the hex pocket.
    pub fn hex_nut_across_corners(&self) -> Real {
        self.hex_nut_flat_to_flat / (PI / 6.0).cos()
    }

    /// Check the dimensional invariants before any geometry is built.
    ///
    /// Fillet fit is checked later, against the actual edges it rounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("knob diameter", self.knob_diameter)?;
        positive("knob height", self.knob_height)?;
        positive("screw hole diameter", self.screw_hole_diameter)?;
        positive("screw head diameter", self.screw_head_diameter)?;
        positive("insertion depth", self.insertion_depth)?;
        positive("backing flange diameter", self.backing_flange_diameter)?;
        positive("backing flange thickness", self.backing_flange_thickness)?;
        positive("hex nut flat-to-flat", self.hex_nut_flat_to_flat)?;
        positive("hex nut depth", self.hex_nut_depth)?;
        if !self.fillet_radius.is_finite() || self.fillet_radius < 0.0 {
            return Err(ValidationError::NonPositive {
                name: "fillet radius",
                value: self.fillet_radius,
            });
        }

        smaller(
            ("screw hole diameter", self.screw_hole_diameter),
            ("screw head diameter", self.screw_head_diameter),
        )?;
        smaller(
            ("screw head diameter", self.screw_head_diameter),
            ("knob diameter", self.knob_diameter),
        )?;
        smaller(
            ("screw hole diameter", self.screw_hole_diameter),
            ("hex nut flat-to-flat", self.hex_nut_flat_to_flat),
        )?;
        smaller(
            ("hex nut flat-to-flat", self.hex_nut_flat_to_flat),
            ("backing flange diameter", self.backing_flange_diameter),
        )?;
        // the corners must stay inside the flange wall as well
        smaller(
            ("hex nut across corners", self.hex_nut_across_corners()),
            ("backing flange diameter", self.backing_flange_diameter),
        )?;

        if self.head_pocket_depth() >= self.knob_height {
            return Err(ValidationError::PocketTooDeep {
                pocket: "screw head pocket",
                depth: self.head_pocket_depth(),
                limit: self.knob_height,
            });
        }
        if self.hex_nut_depth >= self.backing_flange_thickness {
            return Err(ValidationError::PocketTooDeep {
                pocket: "hex nut pocket",
                depth: self.hex_nut_depth,
                limit: self.backing_flange_thickness,
            });
        }
        Ok(())
    }
}

fn smaller(hole: (&'static str, Real), solid: (&'static str, Real)) -> Result<(), ValidationError> {
    if hole.1 < solid.1 {
        Ok(())
    } else {
        Err(ValidationError::HoleTooLarge {
            hole: hole.0,
            hole_size: hole.1,
            solid: solid.0,
            solid_size: solid.1,
        })
    }
}

/// How finely curved surfaces are approximated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolution {
    /// Steps around the axis. Multiples of 4 put vertices on the X and Y
    /// axes, so bounding boxes match nominal diameters exactly.
    pub circle_segments: usize,
    /// Chords per fillet arc
    pub fillet_segments: usize,
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution {
            circle_segments: 96,
            fillet_segments: 8,
        }
    }
}

impl Resolution {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.circle_segments < 3 {
            return Err(ValidationError::TooFewSegments {
                what: "circle",
                requested: self.circle_segments,
                minimum: 3,
            });
        }
        if self.fillet_segments < 1 {
            return Err(ValidationError::TooFewSegments {
                what: "fillet",
                requested: self.fillet_segments,
                minimum: 1,
            });
        }
        Ok(())
    }
}
