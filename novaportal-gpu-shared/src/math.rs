use glam::{Mat4, Vec3};

/// Aspect ratio of a viewport in pixels. A zero-dimension viewport (seen
/// transiently while a window is minimized) falls back to 1.0 so the
/// projection stays finite.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    width as f32 / height as f32
}

/// Right-handed perspective projection. `fov_y_degrees` is the vertical
/// field of view in degrees.
pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y_degrees.to_radians(), aspect, near, far)
}

/// View matrix for a camera at a fixed standoff on the +Z axis, looking at
/// the origin with +Y up.
pub fn view_at_standoff(standoff: f32) -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.0, standoff), Vec3::ZERO, Vec3::Y)
}
