//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use glint_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Lives only as long as the integrator step that produced it.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Vec3,
    /// Geometric surface normal, `(p - center) / radius` for spheres.
    ///
    /// Not flipped toward the incoming ray: it points outward for a
    /// positive radius and inward for a negative one.
    pub normal: Vec3,
    /// Material of the struck surface
    pub material: &'a dyn Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Return the nearest intersection with `t` strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// An ordered list of hittable objects, scanned linearly.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            // Later objects may only beat the current best, never extend it
            let window = ray_t.with_max(closest.map_or(ray_t.max, |rec| rec.t));
            if let Some(rec) = object.hit(ray, window) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use std::sync::Arc;

    fn sphere_at(z: f64, radius: f64) -> Box<dyn Hittable> {
        Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, z),
            radius,
            Arc::new(Lambertian::new(Vec3::splat(0.5))),
        ))
    }

    fn forward_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_empty_list_never_hits() {
        let world = HittableList::new();
        assert!(world.is_empty());
        assert!(world.hit(&forward_ray(), Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_list_returns_nearest_regardless_of_order() {
        let interval = Interval::new(0.001, f64::INFINITY);

        let mut near_first = HittableList::new();
        near_first.add(sphere_at(-2.0, 0.5));
        near_first.add(sphere_at(-5.0, 0.5));

        let mut far_first = HittableList::new();
        far_first.add(sphere_at(-5.0, 0.5));
        far_first.add(sphere_at(-2.0, 0.5));

        let a = near_first.hit(&forward_ray(), interval).map(|r| r.t);
        let b = far_first.hit(&forward_ray(), interval).map(|r| r.t);

        assert_eq!(a, Some(1.5));
        assert_eq!(b, Some(1.5));
    }

    #[test]
    fn test_list_respects_t_max() {
        let mut world = HittableList::new();
        world.add(sphere_at(-5.0, 0.5));

        assert!(world.hit(&forward_ray(), Interval::new(0.001, 4.0)).is_none());
        assert!(world.hit(&forward_ray(), Interval::new(0.001, 5.0)).is_some());
    }

    #[test]
    fn test_nested_lists() {
        let mut inner = HittableList::new();
        inner.add(sphere_at(-3.0, 0.5));

        let mut world = HittableList::new();
        world.add(sphere_at(-10.0, 1.0));
        world.add(Box::new(inner));
        assert_eq!(world.len(), 2);

        let rec = world
            .hit(&forward_ray(), Interval::new(0.001, f64::INFINITY))
            .expect("ray should hit the nested sphere");
        assert_eq!(rec.t, 2.5);

        world.clear();
        assert!(world.is_empty());
    }
}
