//! Shared types and configuration for the cubefall workspace.
//!
//! # Invariants
//! - Colors are stored as linear RGB floats in [0, 1].
//! - A `SimConfig` that passed `validate` is safe to build a simulation from.

pub mod config;
pub mod types;

pub use config::{ConfigError, SimConfig};
pub use types::Rgb;
