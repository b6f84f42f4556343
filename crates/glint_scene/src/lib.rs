//! Glint Scene - scene descriptions for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene descriptions**: serde-backed JSON format with named, shared materials
//! - **Built-in scenes**: the random "cover" scene, three spheres, and an empty sky
//!
//! # Example
//!
//! ```ignore
//! use glint_scene::load_scene;
//!
//! let scene = load_scene("scene.json")?.build()?;
//! println!("Loaded '{}' with {} spheres", scene.name, scene.sphere_count());
//! ```

pub mod builtin;
pub mod description;
pub mod scene;

// Re-export commonly used types
pub use builtin::{builtin, empty, random_scene, three_spheres, BUILTIN_NAMES};
pub use description::{
    load_scene, parse_scene, MaterialDesc, SceneDescription, SceneError, SceneResult, SphereDesc,
};
pub use scene::Scene;
