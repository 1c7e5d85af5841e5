//! wgpu render backend for cubefall.
//!
//! Draws a frame's `DrawList` as flat-colored quads with depth testing under
//! a fixed orthographic camera.
//!
//! # Invariants
//! - Renderer never mutates simulation state.
//! - Geometry is re-uploaded every frame; no GPU-side state survives a frame
//!   except buffers that are reused when large enough.

mod camera;
mod gpu;
mod shaders;

pub use camera::OrthoCamera;
pub use gpu::{quad_vertices, Vertex, WgpuRenderer};
