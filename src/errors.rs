//! Validation and construction errors

use crate::float_types::Real;
use crate::io::IoError;

/// All the ways a part can be rejected before or during construction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A length is zero, negative, NaN or infinite
    #[error("(NonPositive) {name} must be a positive, finite length, got {value}")]
    NonPositive { name: &'static str, value: Real },

    /// A bore or pocket is at least as wide as the solid it is cut from
    #[error("(HoleTooLarge) {hole} ({hole_size} mm) must be smaller than {solid} ({solid_size} mm)")]
    HoleTooLarge {
        hole: &'static str,
        hole_size: Real,
        solid: &'static str,
        solid_size: Real,
    },

    /// A blind pocket would break through the far side of its solid
    #[error("(PocketTooDeep) {pocket} is {depth} mm deep but the part is only {limit} mm thick there")]
    PocketTooDeep {
        pocket: &'static str,
        depth: Real,
        limit: Real,
    },

    /// A fillet does not fit on the edges adjacent to the rounded corner
    #[error("(FilletTooLarge) fillet radius {radius} mm needs {required} mm of edge but only {available} mm is available")]
    FilletTooLarge {
        radius: Real,
        required: Real,
        available: Real,
    },

    /// Not enough segments to approximate a curve
    #[error("(TooFewSegments) {what} needs at least {minimum} segments, got {requested}")]
    TooFewSegments {
        what: &'static str,
        requested: usize,
        minimum: usize,
    },

    /// A profile cannot be revolved into a closed solid
    #[error("(DegenerateProfile) {0}")]
    DegenerateProfile(String),

    /// A boolean operation removed every face of a solid
    #[error("(EmptySolid) {0} has no faces left after boolean operations")]
    EmptySolid(&'static str),
}

/// Crate-level error: anything that can stop a run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Io(#[from] IoError),

    /// The external viewer could not be launched
    #[error("failed to launch viewer `{command}`: {source}")]
    Viewer {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
