use glam::Mat4;

use crate::particles;
use novaportal_gpu_shared::math;

// Torus dimensions: main ring radius, tube radius, tessellation.
pub const TORUS_RADIUS: f32 = 10.0;
pub const TORUS_TUBE: f32 = 3.0;
pub const TORUS_RADIAL_SEGMENTS: u32 = 16;
pub const TORUS_TUBULAR_SEGMENTS: u32 = 100;

/// Product accent color (#B91C4D).
pub const ACCENT_COLOR: [f32; 3] = [185.0 / 255.0, 28.0 / 255.0, 77.0 / 255.0];
pub const TORUS_OPACITY: f32 = 0.6;

pub const PARTICLE_COUNT: usize = 5000;
/// Side length of the origin-centered cube the particles scatter into.
pub const PARTICLE_FIELD_SIDE: f32 = 100.0;
/// Particle sprite size in world units.
pub const PARTICLE_SIZE: f32 = 0.05;
pub const PARTICLE_OPACITY: f32 = 0.8;

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
/// Camera standoff distance along +Z.
pub const CAMERA_STANDOFF: f32 = 30.0;

/// The rotating wireframe torus.
pub struct TorusEntity {
    pub rotation_x: f32,
    pub rotation_y: f32,
}

impl TorusEntity {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation_x) * Mat4::from_rotation_y(self.rotation_y)
    }
}

/// The drifting particle cloud. Positions are a flat xyz array, scattered
/// once when the cloud is built and never reseeded afterwards.
pub struct ParticleCloud {
    pub rotation_y: f32,
    pub positions: Vec<f32>,
}

impl ParticleCloud {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }

    pub fn count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// The complete backdrop scene: exactly two visible objects.
pub struct AmbientScene {
    pub torus: TorusEntity,
    pub particles: ParticleCloud,
}

impl AmbientScene {
    /// Build a fresh scene. Particle positions are randomized here, once
    /// per scene instance.
    pub fn new() -> Self {
        Self {
            torus: TorusEntity {
                rotation_x: 0.0,
                rotation_y: 0.0,
            },
            particles: ParticleCloud {
                rotation_y: 0.0,
                positions: particles::scatter(PARTICLE_COUNT, PARTICLE_FIELD_SIDE),
            },
        }
    }
}

impl Default for AmbientScene {
    fn default() -> Self {
        Self::new()
    }
}

/// Perspective camera at the fixed standoff. Only the aspect ratio mutates
/// after construction (on viewport resize).
pub struct Camera {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            fov: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            aspect,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view(&self) -> Mat4 {
        math::view_at_standoff(CAMERA_STANDOFF)
    }

    pub fn projection(&self) -> Mat4 {
        math::perspective(self.fov, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── AmbientScene ──

    #[test]
    fn test_scene_has_full_particle_cloud() {
        let scene = AmbientScene::new();
        assert_eq!(scene.particles.count(), PARTICLE_COUNT);
    }

    #[test]
    fn test_scene_starts_unrotated() {
        let scene = AmbientScene::new();
        assert_eq!(scene.torus.rotation_x, 0.0);
        assert_eq!(scene.torus.rotation_y, 0.0);
        assert_eq!(scene.particles.rotation_y, 0.0);
    }

    #[test]
    fn test_each_scene_gets_its_own_cloud() {
        let a = AmbientScene::new();
        let b = AmbientScene::new();
        // 15000 independent draws; identical clouds would mean a shared or
        // reused source
        assert_ne!(a.particles.positions, b.particles.positions);
    }

    // ── Camera ──

    #[test]
    fn test_camera_takes_product_constants() {
        let camera = Camera::new(16.0 / 9.0);
        assert_eq!(camera.fov, 75.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
    }

    #[test]
    fn test_camera_aspect_mutates_in_place() {
        let mut camera = Camera::new(1.0);
        camera.set_aspect(2.0);
        assert_eq!(camera.aspect, 2.0);
    }
}
