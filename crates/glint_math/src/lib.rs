//! Glint math types.
//!
//! Everything is double precision. `Vec3` is glam's `DVec3` and is used
//! interchangeably as a point, a direction, and an RGB color; the aliases
//! below only document intent.

pub use glam;
pub use glam::DVec3;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// Three-component double precision vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Unitless linear RGB triple, nominally in [0, 1].
pub type Color = DVec3;
