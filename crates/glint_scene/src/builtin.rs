//! Built-in scenes.

use glint_math::{Color, Point3, Vec3};
use glint_renderer::{sampling::gen_f64, CameraSettings};
use rand::RngCore;

use crate::description::{MaterialDesc, SceneDescription, SceneError, SceneResult};

/// Names accepted by [`builtin`].
pub const BUILTIN_NAMES: &[&str] = &["cover", "spheres", "empty"];

/// Look up a built-in scene by name.
///
/// Only `cover` consumes randomness.
pub fn builtin(name: &str, rng: &mut dyn RngCore) -> SceneResult<SceneDescription> {
    match name {
        "cover" => Ok(random_scene(rng)),
        "spheres" => Ok(three_spheres()),
        "empty" => Ok(empty()),
        other => Err(SceneError::UnknownBuiltin(other.to_string())),
    }
}

/// Large ground sphere, a 22x22 grid of small random spheres, and three
/// large feature spheres (glass, diffuse, metal).
pub fn random_scene(rng: &mut dyn RngCore) -> SceneDescription {
    let mut scene = SceneDescription::new("cover").with_camera(
        CameraSettings::new()
            .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
            .with_lens(20.0, 0.1, 10.0),
    );

    scene
        .add_material("ground", MaterialDesc::Lambertian { albedo: Color::splat(0.5) })
        .add_material("glass", MaterialDesc::Dielectric { refractive_index: 1.5 })
        .add_sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, "ground");

    let keep_clear = Point3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * gen_f64(rng),
                0.2,
                b as f64 + 0.9 * gen_f64(rng),
            );
            if (center - keep_clear).length() <= 0.9 {
                continue;
            }

            let name = format!("sphere_{}_{}", a, b);
            if choose_mat < 0.8 {
                let albedo = Color::new(
                    gen_f64(rng) * gen_f64(rng),
                    gen_f64(rng) * gen_f64(rng),
                    gen_f64(rng) * gen_f64(rng),
                );
                scene.add_material(name.clone(), MaterialDesc::Lambertian { albedo });
                scene.add_sphere(center, 0.2, name);
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    0.5 * (1.0 + gen_f64(rng)),
                    0.5 * (1.0 + gen_f64(rng)),
                    0.5 * (1.0 + gen_f64(rng)),
                );
                let fuzz = 0.5 * gen_f64(rng);
                scene.add_material(name.clone(), MaterialDesc::Metal { albedo, fuzz });
                scene.add_sphere(center, 0.2, name);
            } else {
                scene.add_sphere(center, 0.2, "glass");
            }
        }
    }

    scene
        .add_material(
            "brown",
            MaterialDesc::Lambertian {
                albedo: Color::new(0.4, 0.2, 0.1),
            },
        )
        .add_material(
            "bronze",
            MaterialDesc::Metal {
                albedo: Color::new(0.7, 0.6, 0.5),
                fuzz: 0.0,
            },
        )
        .add_sphere(Point3::new(0.0, 1.0, 0.0), 1.0, "glass")
        .add_sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, "brown")
        .add_sphere(Point3::new(4.0, 1.0, 0.0), 1.0, "bronze");

    scene
}

/// Diffuse sphere between a metal sphere and a hollow glass bubble, on a
/// large ground sphere.
pub fn three_spheres() -> SceneDescription {
    let look_from = Point3::new(-2.0, 2.0, 1.0);
    let look_at = Point3::new(0.0, 0.0, -1.0);
    let mut scene = SceneDescription::new("spheres").with_camera(
        CameraSettings::new()
            .with_position(look_from, look_at, Vec3::Y)
            .with_lens(40.0, 0.0, (look_from - look_at).length()),
    );

    scene
        .add_material("ground", MaterialDesc::Lambertian { albedo: Color::new(0.8, 0.8, 0.0) })
        .add_material("blue", MaterialDesc::Lambertian { albedo: Color::new(0.1, 0.2, 0.5) })
        .add_material("gold", MaterialDesc::Metal { albedo: Color::new(0.8, 0.6, 0.2), fuzz: 0.1 })
        .add_material("glass", MaterialDesc::Dielectric { refractive_index: 1.5 })
        .add_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, "ground")
        .add_sphere(Point3::new(0.0, 0.0, -1.0), 0.5, "blue")
        .add_sphere(Point3::new(1.0, 0.0, -1.0), 0.5, "gold")
        .add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, "glass")
        // Inner surface of the bubble
        .add_sphere(Point3::new(-1.0, 0.0, -1.0), -0.45, "glass");

    scene
}

/// No geometry: every ray sees the sky.
pub fn empty() -> SceneDescription {
    SceneDescription::new("empty")
}
