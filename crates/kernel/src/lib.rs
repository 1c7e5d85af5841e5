//! Simulation kernel: authoritative cube state, gravity stepping, seeded spawning.
//!
//! # Invariants
//! - After every step, no cube's lower face is below the floor plane.
//! - A clamped cube has zero vertical velocity.
//! - All state mutations flow through explicit operations on `Simulation`.

pub mod cube;
pub mod fall;
pub mod rng;
pub mod sim;

pub use cube::Cube;
pub use rng::SimRng;
pub use sim::{SimEvent, Simulation, DESIGNATED_CUBE};
