//! Serializable scene descriptions.
//!
//! A description is plain data: named materials, spheres that refer to
//! materials by name, and camera settings. `build` turns it into the
//! renderer's object list, creating each named material exactly once so
//! that every sphere using it shares the same `Arc`.
//!
//! ```json
//! {
//!   "camera": { "look_from": [13, 2, 3], "look_at": [0, 0, 0], "vfov": 20 },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] },
//!     "glass": { "type": "dielectric", "refractive_index": 1.5 }
//!   },
//!   "spheres": [
//!     { "center": [0, -1000, 0], "radius": 1000, "material": "ground" },
//!     { "center": [0, 1, 0], "radius": 1, "material": "glass" }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use glint_math::{Color, Point3};
use glint_renderer::{
    CameraError, CameraSettings, Dielectric, HittableList, Lambertian, Material, Metal, Sphere,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::Scene;

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Invalid sphere {index}: {reason}")]
    InvalidSphere { index: usize, reason: String },

    #[error("Invalid camera: {0}")]
    Camera(#[from] CameraError),

    #[error("Unknown built-in scene '{0}'")]
    UnknownBuiltin(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Surface material parameters, tagged by `"type"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f64,
    },
    Dielectric {
        refractive_index: f64,
    },
}

impl MaterialDesc {
    /// Check the parameters and create the renderer material.
    pub fn build(&self, name: &str) -> SceneResult<Arc<dyn Material>> {
        let invalid = |reason: String| SceneError::InvalidMaterial {
            name: name.to_string(),
            reason,
        };

        match *self {
            MaterialDesc::Lambertian { albedo } => {
                if !albedo.is_finite() {
                    return Err(invalid(format!("albedo {albedo:?} is not finite")));
                }
                Ok(Arc::new(Lambertian::new(albedo)))
            }
            MaterialDesc::Metal { albedo, fuzz } => {
                if !albedo.is_finite() {
                    return Err(invalid(format!("albedo {albedo:?} is not finite")));
                }
                if !fuzz.is_finite() {
                    return Err(invalid(format!("fuzz {fuzz} is not finite")));
                }
                if !(0.0..=1.0).contains(&fuzz) {
                    log::warn!("material '{}': fuzz {} clamped to [0, 1]", name, fuzz);
                }
                Ok(Arc::new(Metal::new(albedo, fuzz)))
            }
            MaterialDesc::Dielectric { refractive_index } => {
                if !(refractive_index > 0.0 && refractive_index.is_finite()) {
                    return Err(invalid(format!(
                        "refractive index must be positive, got {refractive_index}"
                    )));
                }
                Ok(Arc::new(Dielectric::new(refractive_index)))
            }
        }
    }
}

/// One sphere of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    /// May be negative for an inward-facing shell
    pub radius: f64,
    /// Key into `SceneDescription::materials`
    pub material: String,
}

/// Complete, serializable description of a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Register a named material, replacing any previous one with that name.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) -> &mut Self {
        self.materials.insert(name.into(), material);
        self
    }

    /// Add a sphere using a previously registered material.
    pub fn add_sphere(
        &mut self,
        center: Point3,
        radius: f64,
        material: impl Into<String>,
    ) -> &mut Self {
        self.spheres.push(SphereDesc {
            center,
            radius,
            material: material.into(),
        });
        self
    }

    /// Set the camera settings.
    pub fn with_camera(mut self, camera: CameraSettings) -> Self {
        self.camera = camera;
        self
    }

    /// Validate everything and build the renderable scene.
    pub fn build(&self) -> SceneResult<Scene> {
        // Fail on a bad camera before touching geometry
        self.camera.build()?;

        let mut materials: HashMap<&str, Arc<dyn Material>> =
            HashMap::with_capacity(self.materials.len());
        for (name, desc) in &self.materials {
            materials.insert(name.as_str(), desc.build(name)?);
        }

        let mut world = HittableList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !sphere.center.is_finite() {
                return Err(SceneError::InvalidSphere {
                    index,
                    reason: format!("center {:?} is not finite", sphere.center),
                });
            }
            if sphere.radius == 0.0 || !sphere.radius.is_finite() {
                return Err(SceneError::InvalidSphere {
                    index,
                    reason: format!("radius must be non-zero and finite, got {}", sphere.radius),
                });
            }
            let material = materials
                .get(sphere.material.as_str())
                .ok_or_else(|| SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                })?;

            world.add(Box::new(Sphere::new(sphere.center, sphere.radius, Arc::clone(material))));
        }

        log::debug!(
            "built scene '{}': {} spheres, {} materials",
            self.name,
            world.len(),
            materials.len()
        );

        Ok(Scene::new(self.name.clone(), world, self.camera))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse a scene description from a JSON string.
pub fn parse_scene(content: &str) -> SceneResult<SceneDescription> {
    Ok(serde_json::from_str(content)?)
}

/// Load a scene description from a JSON file.
///
/// An unnamed scene takes the file stem as its name.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut description: SceneDescription = serde_json::from_reader(BufReader::new(file))?;

    if description.name.is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            description.name = stem.to_string();
        }
    }

    log::info!(
        "loaded scene '{}' from {} ({} spheres)",
        description.name,
        path.display(),
        description.spheres.len()
    );
    Ok(description)
}
