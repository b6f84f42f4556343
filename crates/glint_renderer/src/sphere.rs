//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use glint_math::{Interval, Point3, Ray};
use std::sync::Arc;

/// A sphere primitive.
///
/// A negative radius is allowed: the geometry is the same but the normal
/// points inward, which is how hollow glass shells are modelled.
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // t^2 (B.B) + 2t B.(A-C) + (A-C).(A-C) - r^2 = 0, with h = -b/2
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            normal: (p - self.center) / self.radius,
            material: self.material.as_ref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use approx::assert_relative_eq;
    use glint_math::Vec3;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)))
    }

    fn interval() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, interval()).expect("ray should hit");
        assert_relative_eq!(rec.t, 0.5);
        assert_relative_eq!(rec.p.z, -0.5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, interval()).is_none());
    }

    #[test]
    fn test_tangent_ray_is_a_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        // Grazes the top of the sphere: discriminant is exactly zero
        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, interval()).is_none());
    }

    #[test]
    fn test_normal_toward_center_is_unit_and_radial() {
        let center = Vec3::new(1.0, -2.0, -6.0);
        let sphere = Sphere::new(center, 1.5, grey());
        let origin = Vec3::new(0.3, 0.4, 0.5);
        let ray = Ray::new(origin, center - origin);

        let rec = sphere.hit(&ray, interval()).expect("aimed at the center");
        let radial = (rec.p - center).normalize();

        assert_relative_eq!(rec.normal.length(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(rec.normal.cross(radial).length(), 0.0, epsilon = 1e-9);
        assert!(rec.normal.dot(radial) > 0.0);
    }

    #[test]
    fn test_negative_radius_inverts_normal() {
        let center = Vec3::new(0.0, 0.0, -1.0);
        let outer = Sphere::new(center, 0.5, grey());
        let inner = Sphere::new(center, -0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let a = outer.hit(&ray, interval()).expect("hit");
        let b = inner.hit(&ray, interval()).expect("hit");

        assert_relative_eq!(a.t, b.t);
        assert_relative_eq!(a.normal.z, 1.0);
        assert_relative_eq!(b.normal.z, -1.0);
    }

    #[test]
    fn test_origin_inside_uses_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, interval()).expect("exits the sphere");
        assert_relative_eq!(rec.t, 2.0);
        assert_relative_eq!(rec.normal.x, 1.0);
    }

    #[test]
    fn test_t_min_suppresses_self_intersection() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());
        // Starts on the surface heading outward
        let ray = Ray::new(Vec3::X, Vec3::X);
        assert!(sphere.hit(&ray, interval()).is_none());
    }
}
