//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket draws from its own generator,
//! seeded from the render seed and the bucket index, so the output only
//! depends on the seed and never on thread scheduling.

use crate::renderer::{render_pixel, ImageBuffer, RenderConfig, RenderError};
use crate::{Camera, Hittable};
use glint_math::Color;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner (0 = top row)
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Split an image into buckets, row-major from the top-left corner.
///
/// Buckets on the right and bottom edges are clipped to the image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Linear pixel colors in row-major order, top row first
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy this bucket's pixels into their place in the full image.
    pub fn blit(&self, image: &mut ImageBuffer) {
        let mut pixels = self.pixels.iter();
        for local_y in 0..self.bucket.height {
            for local_x in 0..self.bucket.width {
                if let Some(&color) = pixels.next() {
                    image.set(self.bucket.x + local_x, self.bucket.y + local_y, color);
                }
            }
        }
    }
}

/// Render a single bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        // Image rows count down from the top, camera rows up from the bottom
        let j = config.height - 1 - (bucket.y + local_y);
        for local_x in 0..bucket.width {
            let i = bucket.x + local_x;
            pixels.push(render_pixel(camera, world, i, j, config, rng));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Generator for one bucket, derived from the render seed.
pub fn bucket_rng(seed: u64, bucket: &Bucket) -> StdRng {
    StdRng::seed_from_u64(seed ^ (bucket.index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render the scene on the rayon thread pool.
///
/// `progress(buckets_done, total_buckets)` is called from worker threads as
/// buckets finish, in completion order.
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    seed: u64,
    progress: &(dyn Fn(u32, u32) + Sync),
) -> Result<ImageBuffer, RenderError> {
    config.validate()?;

    let buckets = generate_buckets(config.width, config.height, DEFAULT_BUCKET_SIZE);
    let total = buckets.len() as u32;
    let done = AtomicU32::new(0);

    log::info!(
        "rendering {}x{} @ {} spp, max depth {}, {} buckets on {} threads",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        total,
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = bucket_rng(seed, bucket);
            let result = render_bucket(bucket, camera, world, config, &mut rng);
            progress(done.fetch_add(1, Ordering::Relaxed) + 1, total);
            result
        })
        .collect();

    // Buckets are disjoint, so every pixel is written exactly once
    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        result.blit(&mut image);
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CameraSettings, HittableList, Lambertian, Metal, Sphere};
    use glint_math::Vec3;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn scene() -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, -100.5, -1.0),
            100.0,
            Arc::new(Lambertian::new(Color::splat(0.5))),
        )));
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.2)),
        )));
        world
    }

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
        assert_eq!(buckets[3], Bucket::new(64, 64, 36, 6, 3));
    }

    #[test]
    fn test_buckets_cover_every_pixel_once() {
        let (w, h) = (37, 23);
        let mut seen = HashSet::new();
        for bucket in generate_buckets(w, h, 8) {
            for y in bucket.y..bucket.y + bucket.height {
                for x in bucket.x..bucket.x + bucket.width {
                    assert!(seen.insert((x, y)), "pixel ({x}, {y}) covered twice");
                }
            }
        }
        assert_eq!(seen.len(), (w * h) as usize);
    }

    #[test]
    fn test_parallel_render_is_deterministic() {
        let world = scene();
        let camera = CameraSettings::default().build().unwrap();
        let config = RenderConfig::default().with_resolution(48, 24).with_quality(2, 8);

        let a = render_parallel(&camera, &world, &config, 1234, &|_, _| {}).unwrap();
        let b = render_parallel(&camera, &world, &config, 1234, &|_, _| {}).unwrap();
        assert_eq!(a, b);

        let c = render_parallel(&camera, &world, &config, 4321, &|_, _| {}).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_parallel_matches_bucket_renders() {
        let world = scene();
        let camera = CameraSettings::default().build().unwrap();
        let config = RenderConfig::default().with_resolution(40, 20).with_quality(1, 4);
        let seed = 77;

        let image = render_parallel(&camera, &world, &config, seed, &|_, _| {}).unwrap();

        let mut expected = ImageBuffer::new(config.width, config.height);
        for bucket in generate_buckets(config.width, config.height, DEFAULT_BUCKET_SIZE) {
            let mut rng = bucket_rng(seed, &bucket);
            render_bucket(&bucket, &camera, &world, &config, &mut rng).blit(&mut expected);
        }
        assert_eq!(image, expected);
    }

    #[test]
    fn test_parallel_progress_counts_buckets() {
        let world = HittableList::new();
        let camera = CameraSettings::default().build().unwrap();
        let config = RenderConfig::default().with_resolution(70, 40).with_quality(1, 2);
        let calls = AtomicU32::new(0);

        render_parallel(&camera, &world, &config, 0, &|_, total| {
            assert_eq!(total, 6);
            calls.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

        assert_eq!(calls.load(Ordering::Relaxed), 6);
    }
}
