use bytemuck::{Pod, Zeroable};

/// Per-frame uniforms: the shared view/projection pair. Layout matches the
/// `PerFrame` struct in both WGSL shaders.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PerFrameUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
}

/// Per-object uniforms: model matrix, premultiplied-nothing RGBA color
/// (alpha carries the object's opacity), and a generic parameter vector.
/// `params[0]` is the billboard half-extent for the particle pipeline and
/// unused by the wireframe pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PerObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub params: [f32; 4],
}
