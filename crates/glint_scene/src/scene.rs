//! Renderable scene: the object list plus the camera it was authored for.

use glint_renderer::{Camera, CameraError, CameraSettings, HittableList};

/// A built scene, ready to hand to the renderer.
///
/// Composed once and read-only while rendering.
pub struct Scene {
    /// Scene name (from the description or file name)
    pub name: String,
    /// All primitives, scanned linearly
    pub world: HittableList,
    /// Camera settings as authored; the aspect is replaced at render time
    pub camera: CameraSettings,
}

impl Scene {
    pub fn new(name: impl Into<String>, world: HittableList, camera: CameraSettings) -> Self {
        Self {
            name: name.into(),
            world,
            camera,
        }
    }

    /// Number of top-level primitives.
    pub fn sphere_count(&self) -> usize {
        self.world.len()
    }

    /// Build the camera for an image of the given size.
    pub fn camera_for(&self, width: u32, height: u32) -> Result<Camera, CameraError> {
        self.camera
            .with_aspect(width as f64 / height as f64)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_for_uses_image_aspect() {
        let scene = Scene::new("sky", HittableList::new(), CameraSettings::default());
        assert_eq!(scene.sphere_count(), 0);
        assert!(scene.camera_for(400, 400).is_ok());
        assert_eq!(
            scene.camera_for(400, 0).unwrap_err(),
            CameraError::InvalidAspect(f64::INFINITY)
        );
    }
}
