//! Random sampling helpers.
//!
//! Every function takes the generator explicitly so that parallel workers
//! can own independent streams and tests can seed them.

use glint_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform point strictly inside the unit sphere.
///
/// Rejection sampling from the cube [-1, 1]^3. The loop has no iteration
/// cap; each trial is accepted with probability pi/6.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            2.0 * gen_f64(rng) - 1.0,
            2.0 * gen_f64(rng) - 1.0,
            2.0 * gen_f64(rng) - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform point strictly inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(2.0 * gen_f64(rng) - 1.0, 2.0 * gen_f64(rng) - 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
