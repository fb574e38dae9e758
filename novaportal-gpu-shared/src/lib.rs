//! Shared GPU-facing types for the Nova Portal lobby backdrop.
//!
//! Camera and torus math, the uniform struct layouts shared with WGSL, and
//! the embedded shader sources. Used by both the wgpu backend and the lobby
//! runtime.

pub mod geometry;
pub mod math;
pub mod shaders;
pub mod uniforms;
