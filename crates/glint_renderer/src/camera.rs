//! Camera for ray generation.

use crate::sampling::random_in_unit_disk;
use glint_math::{Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a camera.
///
/// All of these are checked once at construction; `get_ray` cannot fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("look_from and look_at coincide, view direction is undefined")]
    ZeroViewDirection,

    #[error("up vector {0:?} is parallel to the view direction")]
    DegenerateBasis(Vec3),

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f64),

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspect(f64),

    #[error("focus distance must be positive and finite, got {0}")]
    InvalidFocusDistance(f64),

    #[error("aperture must be non-negative and finite, got {0}")]
    InvalidAperture(f64),
}

/// User-facing camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    // Camera positioning
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f64,       // Vertical field of view in degrees
    pub aspect: f64,     // Image width / height
    pub aperture: f64,   // Lens diameter, 0 for a pinhole
    pub focus_dist: f64, // Distance from camera to plane of perfect focus
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect: 2.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the image aspect ratio (width / height).
    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    /// Validate the settings and derive the camera frame.
    pub fn build(&self) -> Result<Camera, CameraError> {
        Camera::new(self)
    }
}

/// Camera for generating rays into the scene.
///
/// Immutable once built, so it can be shared by all render workers.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Build a camera from its settings.
    pub fn new(settings: &CameraSettings) -> Result<Self, CameraError> {
        let CameraSettings {
            look_from,
            look_at,
            vup,
            vfov,
            aspect,
            aperture,
            focus_dist,
        } = *settings;

        if !(vfov > 0.0 && vfov < 180.0) {
            return Err(CameraError::InvalidFov(vfov));
        }
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(CameraError::InvalidAspect(aspect));
        }
        if !(focus_dist > 0.0 && focus_dist.is_finite()) {
            return Err(CameraError::InvalidFocusDistance(focus_dist));
        }
        if !(aperture >= 0.0 && aperture.is_finite()) {
            return Err(CameraError::InvalidAperture(aperture));
        }

        let view = look_from - look_at;
        if view.length_squared() == 0.0 {
            return Err(CameraError::ZeroViewDirection);
        }

        // Orthonormal camera frame
        let w = view.normalize();
        let side = vup.cross(w);
        if side.length_squared() < 1e-12 * vup.length_squared() || !side.is_finite() {
            return Err(CameraError::DegenerateBasis(vup));
        }
        let u = side.normalize();
        let v = w.cross(u);

        // The image plane sits at the focus distance
        let half_height = (vfov.to_radians() / 2.0).tan();
        let half_width = aspect * half_height;

        let lower_left_corner =
            look_from - focus_dist * (half_width * u + half_height * v + w);
        let horizontal = 2.0 * half_width * focus_dist * u;
        let vertical = 2.0 * half_height * focus_dist * v;

        log::debug!(
            "camera at {:?} looking at {:?}, vfov {} aspect {:.3} aperture {}",
            look_from,
            look_at,
            vfov,
            aspect,
            aperture
        );

        Ok(Self {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: aperture / 2.0,
        })
    }

    /// Generate a ray through normalized image-plane coordinates (s, t).
    ///
    /// (0, 0) is the lower-left corner. Values outside [0, 1] are allowed.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Camera frame (u, v, w); w points away from the view direction.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn lens_radius(&self) -> f64 {
        self.lens_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_camera_frame() {
        let camera = CameraSettings::default().build().expect("valid defaults");
        let (u, v, w) = camera.basis();

        assert_eq!(camera.origin(), Point3::ZERO);
        assert_relative_eq!(w.z, 1.0);
        assert_relative_eq!(u.x, 1.0);
        assert_relative_eq!(v.y, 1.0);
        assert_eq!(camera.lens_radius(), 0.0);
    }

    #[test]
    fn test_center_ray_points_down_view_axis() {
        let camera = CameraSettings::default().build().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        let d = ray.direction();
        assert_relative_eq!(d.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(d.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(d.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_corner_rays_span_field_of_view() {
        // 90 degree vfov, aspect 2: the image plane at z = -1 spans x in [-2, 2], y in [-1, 1]
        let camera = CameraSettings::default().build().unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let ll = camera.get_ray(0.0, 0.0, &mut rng).direction();
        let ur = camera.get_ray(1.0, 1.0, &mut rng).direction();
        assert_relative_eq!(ll.x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(ll.y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(ur.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(ur.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_focus_distance_scales_image_plane() {
        let camera = CameraSettings::default()
            .with_lens(90.0, 0.0, 10.0)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let d = camera.get_ray(1.0, 0.5, &mut rng).direction();
        assert_relative_eq!(d.x, 20.0, epsilon = 1e-9);
        assert_relative_eq!(d.z, -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_aperture_jitters_origin_but_keeps_focus_point() {
        let camera = CameraSettings::default()
            .with_position(Point3::new(0.0, 0.0, 3.0), Point3::ZERO, Vec3::Y)
            .with_lens(40.0, 0.5, 3.0)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let focus_point = camera.get_ray(0.3, 0.6, &mut StdRng::seed_from_u64(0));
        let focus_point = focus_point.at(1.0);

        for _ in 0..100 {
            let ray = camera.get_ray(0.3, 0.6, &mut rng);
            let offset = ray.origin() - camera.origin();
            assert!(offset.length() <= camera.lens_radius());
            // Lens samples lie in the camera's u/v plane
            assert_relative_eq!(offset.z, 0.0, epsilon = 1e-12);
            // Every jittered ray still passes through the in-focus point
            let p = ray.at(1.0);
            assert_relative_eq!(p.x, focus_point.x, epsilon = 1e-9);
            assert_relative_eq!(p.y, focus_point.y, epsilon = 1e-9);
            assert_relative_eq!(p.z, focus_point.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rejects_up_parallel_to_view() {
        let result = CameraSettings::default()
            .with_position(Point3::ZERO, Point3::new(0.0, -5.0, 0.0), Vec3::Y)
            .build();
        assert!(matches!(result, Err(CameraError::DegenerateBasis(_))));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let base = CameraSettings::default();

        let same_point = base.with_position(Point3::ONE, Point3::ONE, Vec3::Y).build();
        assert_eq!(same_point.unwrap_err(), CameraError::ZeroViewDirection);

        assert_eq!(
            base.with_lens(0.0, 0.0, 1.0).build().unwrap_err(),
            CameraError::InvalidFov(0.0)
        );
        assert_eq!(
            base.with_lens(180.0, 0.0, 1.0).build().unwrap_err(),
            CameraError::InvalidFov(180.0)
        );
        assert_eq!(
            base.with_aspect(-1.0).build().unwrap_err(),
            CameraError::InvalidAspect(-1.0)
        );
        assert_eq!(
            base.with_lens(90.0, 0.0, 0.0).build().unwrap_err(),
            CameraError::InvalidFocusDistance(0.0)
        );
        assert_eq!(
            base.with_lens(90.0, -0.1, 1.0).build().unwrap_err(),
            CameraError::InvalidAperture(-0.1)
        );
    }
}
