//! Simple ray tracer example.
//!
//! Renders a basic scene with spheres and saves to PPM format.

use std::sync::Arc;

use glint_renderer::{
    render, write_image_file, CameraSettings, Color, Dielectric, HittableList, Lambertian,
    Material, Metal, Point3, RenderConfig, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    let mut rng = StdRng::seed_from_u64(7);

    // Build the scene
    let start = std::time::Instant::now();
    let world = build_scene(&mut rng);
    println!("Scene built in {:?} ({} objects)", start.elapsed(), world.len());

    let config = RenderConfig::default()
        .with_resolution(400, 225)
        .with_quality(32, 10);

    let camera = CameraSettings::new()
        .with_position(
            Point3::new(13.0, 2.0, 3.0), // look_from
            Point3::ZERO,                // look_at
            Vec3::Y,                     // vup
        )
        .with_lens(20.0, 0.1, 10.0)
        .with_aspect(config.aspect_ratio())
        .build()
        .expect("Invalid camera");

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render(&camera, &world, &config, &mut rng).expect("Invalid render config");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    write_image_file(filename, &image).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene(rng: &mut StdRng) -> HittableList {
    let mut world = HittableList::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    world.add(Box::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground)));

    // Three main spheres
    world.add(Box::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass.clone())));
    world.add(Box::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    // Small random spheres
    for a in -5..5 {
        for b in -5..5 {
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f64 = rng.gen();
            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                let albedo = Color::new(
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                );
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    0.5 + 0.5 * rng.gen::<f64>(),
                    0.5 + 0.5 * rng.gen::<f64>(),
                    0.5 + 0.5 * rng.gen::<f64>(),
                );
                Arc::new(Metal::new(albedo, 0.5 * rng.gen::<f64>()))
            } else {
                glass.clone()
            };
            world.add(Box::new(Sphere::new(center, 0.2, material)));
        }
    }

    world
}
