//! Glint renderer - recursive CPU ray tracing.
//!
//! Traces camera rays through a list of spheres, scatters them off
//! diffuse, metal and glass materials, and falls back to a sky gradient
//! when nothing is hit. The scene is read-only during rendering, so it can
//! be shared by the parallel bucket renderer without locking.

mod bucket;
mod camera;
mod hittable;
mod material;
mod output;
mod renderer;
pub mod sampling;
mod sphere;

pub use bucket::{
    bucket_rng, generate_buckets, render_bucket, render_parallel, Bucket, BucketResult,
    DEFAULT_BUCKET_SIZE,
};
pub use camera::{Camera, CameraError, CameraSettings};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    reflect, refract, schlick, Dielectric, Lambertian, Material, Metal, ScatterResult,
};
pub use output::{
    write_image_file, write_to_sink, ImageSink, MemorySink, OutputError, OutputResult, PpmWriter,
};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, render_with_progress,
    sky_gradient, ImageBuffer, RenderConfig, RenderError, ShadingMode, DEFAULT_MAX_DEPTH, T_MIN,
};
pub use sphere::Sphere;

/// Re-export the math types from glint_math
pub use glint_math::{Color, Interval, Point3, Ray, Vec3};
