/// Embedded WGSL shader source strings for the lobby backdrop pipelines.
pub const WIREFRAME_SHADER: &str = include_str!("../shaders/wireframe.wgsl");
pub const PARTICLES_SHADER: &str = include_str!("../shaders/particles.wgsl");
