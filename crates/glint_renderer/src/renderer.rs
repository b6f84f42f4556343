//! Core recursive ray tracer.
//!
//! Implements:
//! - The recursive color integrator with a bounce depth cap
//! - Sky gradient background
//! - Jittered multi-sampling per pixel
//! - Gamma correction and 8-bit quantization

use crate::{Camera, Hittable};
use glint_math::{Color, Interval, Ray};
use rand::RngCore;
use thiserror::Error;

use crate::sampling::gen_f64;

/// Scattered rays start their search this far along the ray, so that
/// floating point error at the origin does not re-hit the same surface.
pub const T_MIN: f64 = 0.001;

/// Default recursion depth cap.
pub const DEFAULT_MAX_DEPTH: u32 = 50;

/// Errors for render settings that would produce no image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("image resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,
}

/// What the integrator computes at a surface hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Full recursive material scattering
    #[default]
    Scatter,
    /// Visualize the surface normal at the first hit as `0.5 * (N + 1)`
    Normals,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Integrator mode
    pub shading: ShadingMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            samples_per_pixel: 100,
            max_depth: DEFAULT_MAX_DEPTH,
            shading: ShadingMode::Scatter,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set the integrator mode.
    pub fn with_shading(mut self, shading: ShadingMode) -> Self {
        self.shading = shading;
        self
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::ZeroResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts bounces taken so far, starting at 0 for camera rays.
/// Recursion stops after `config.max_depth` bounces and contributes black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    if config.shading == ShadingMode::Normals {
        return 0.5 * (rec.normal + Color::ONE);
    }

    if depth >= config.max_depth {
        return Color::ZERO;
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth + 1, config, rng)
        }
        // Absorbed
        None => Color::ZERO,
    }
}

/// Background: white at the horizon blending to sky blue at the zenith.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f64| (255.99 * Interval::UNIT.clamp(linear_to_gamma(c))).floor() as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `i` counts columns from the left, `j` counts rows from the bottom.
/// Returns the averaged linear color.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = config.width as f64;
    let height = config.height as f64;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let u = (i as f64 + gen_f64(rng)) / width;
        let v = (j as f64 + gen_f64(rng)) / height;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, world, 0, config, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f64
}

/// Linear color image, row-major with the top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y), y = 0 being the top row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), y = 0 being the top row.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Gamma-correct and quantize every pixel, top row first.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().map(|&c| color_to_rgb8(c)).collect()
    }
}

/// Render the entire scene to an image buffer on the calling thread.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Result<ImageBuffer, RenderError> {
    render_with_progress(camera, world, config, rng, &|_, _| {})
}

/// Single-threaded render, calling `progress(rows_done, total_rows)` after
/// every scan line.
pub fn render_with_progress(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    progress: &dyn Fn(u32, u32),
) -> Result<ImageBuffer, RenderError> {
    config.validate()?;
    log::info!(
        "rendering {}x{} @ {} spp, max depth {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );

    let mut image = ImageBuffer::new(config.width, config.height);

    // Scan from the top row (j = height - 1) down to the bottom
    for y in 0..config.height {
        let j = config.height - 1 - y;
        for i in 0..config.width {
            let color = render_pixel(camera, world, i, j, config, rng);
            image.set(i, y, color);
        }
        progress(y + 1, config.height);
    }

    Ok(image)
}
