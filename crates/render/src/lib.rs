//! Rendering adapter: renderer-agnostic output derived from simulation state.
//!
//! # Invariants
//! - Renderers read the simulation; they never mutate it.
//! - Every cube is emitted as exactly six colored quads.

mod geometry;
mod renderer;

pub use geometry::{cube_faces, ColoredQuad, DrawList, UNIT_CUBE_FACES};
pub use renderer::{DebugTextRenderer, QuadRenderer, Renderer};
