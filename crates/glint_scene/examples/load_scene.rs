//! Example: Load and inspect a JSON scene description.
//!
//! Run with: cargo run --example load_scene -- scenes/three_spheres.json

use std::env;

use glint_scene::{load_scene, MaterialDesc};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-json>");
        println!("\nExamples:");
        println!("  cargo run --example load_scene -- scenes/three_spheres.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    let description = match load_scene(path) {
        Ok(description) => description,
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n=== Scene: {} ===", description.name);
    println!("Materials: {}", description.materials.len());
    println!("Spheres: {}", description.spheres.len());

    let camera = &description.camera;
    println!(
        "Camera: from ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2}), vfov {:.1}, aperture {:.2}",
        camera.look_from.x,
        camera.look_from.y,
        camera.look_from.z,
        camera.look_at.x,
        camera.look_at.y,
        camera.look_at.z,
        camera.vfov,
        camera.aperture
    );

    println!("\n--- Materials ---");
    for (name, material) in &description.materials {
        match material {
            MaterialDesc::Lambertian { albedo } => println!(
                "  {} - lambertian ({:.2}, {:.2}, {:.2})",
                name, albedo.x, albedo.y, albedo.z
            ),
            MaterialDesc::Metal { albedo, fuzz } => println!(
                "  {} - metal ({:.2}, {:.2}, {:.2}) fuzz {:.2}",
                name, albedo.x, albedo.y, albedo.z, fuzz
            ),
            MaterialDesc::Dielectric { refractive_index } => {
                println!("  {} - dielectric ior {:.2}", name, refractive_index)
            }
        }
    }

    match description.build() {
        Ok(scene) => println!("\nBuilt '{}' with {} spheres", scene.name, scene.sphere_count()),
        Err(e) => {
            eprintln!("Error building scene: {}", e);
            std::process::exit(1);
        }
    }
}
