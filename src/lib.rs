//! A parametric **window-roller knob** and its **backing flange**, built as
//! closed polygon solids with BSP-tree Constructive Solid Geometry and
//! exported as STL files for 3D printing.
//!
//! The knob is a filleted cylinder with a screw-head pocket and a shaft bore.
//! The backing is a filleted flange with the same bore and a hex nut pocket.
//! Both share the screw axis (Z), so a #6 screw through the door panel clamps
//! them together.
//!
//! ```rust
//! use window_knob::params::{KnobParams, Resolution};
//! use window_knob::parts::build_parts;
//! use window_knob::traits::CSGOps;
//!
//! let parts = build_parts(&KnobParams::default(), &Resolution::default()).unwrap();
//! let knob = parts.knob.bounding_box();
//! assert!((knob.maxs.z - knob.mins.z - 20.0).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::approx_constant, clippy::all)]

pub mod assembly;
pub mod cli;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod params;
pub mod parts;
pub mod report;
pub mod traits;
pub mod triangulated;
pub mod viewer;

pub use errors::{Error, ValidationError};
pub use params::{KnobParams, Resolution};
pub use parts::{Feature, Parts, build_parts};
