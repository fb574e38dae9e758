//! Nova Portal WebGPU backend.
//!
//! Owns the drawable surface the lobby backdrop renders onto: device and
//! queue setup from a raw window handle, the two alpha-blended pipelines
//! (torus wireframe, particle billboards), and in-place surface resizing.
//! All GPU resources are released when the renderer drops.

mod renderer;

pub use renderer::BackdropRenderer;
