use crate::scene::AmbientScene;

// Per-frame rotation increments, in radians. Fixed per frame rather than
// time-scaled: the loop runs at the display's refresh cadence and each
// step's cost is constant.
pub const TORUS_SPIN_X: f32 = 0.005;
pub const TORUS_SPIN_Y: f32 = 0.005;
pub const PARTICLE_DRIFT_Y: f32 = 0.001;

/// Advance the scene by exactly one frame.
pub fn advance_frame(scene: &mut AmbientScene) {
    scene.torus.rotation_x += TORUS_SPIN_X;
    scene.torus.rotation_y += TORUS_SPIN_Y;
    scene.particles.rotation_y += PARTICLE_DRIFT_Y;
}
