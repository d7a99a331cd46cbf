// Re-export parry for the crate's float size
pub use parry3d_f64 as parry3d;

// Our Real scalar type:
pub type Real = f64;

/// Plane-side tolerance used by the BSP classifier.
///
/// Dimensions are millimetres, so this is ten nanometres: far below printer
/// resolution, far above accumulated `f64` noise from a handful of splits.
pub const EPSILON: Real = 1e-5;

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;
