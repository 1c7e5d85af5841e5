//! Reference fall times for a cube released at rest.
//!
//! With velocity advanced before position, after `n` frames a cube released
//! from rest has dropped `|g| * n * (n + 1) / 2`. The first frame where that
//! comes within `REACH_TOLERANCE * |g|` of the release height is the landing
//! frame. Drop distances of consecutive frames differ by at least `|g|`, so
//! half a gravity increment absorbs f32 rounding in the stepped simulation
//! without ever merging two frames.

use crate::cube::Cube;
use crate::sim::Simulation;
use cubefall_common::{Rgb, SimConfig};
use glam::Vec3;

/// Fraction of one frame's gravity increment within which the floor counts
/// as reached.
pub const REACH_TOLERANCE: f64 = 0.5;

/// Past this the f64 triangular numbers are no longer exact integers.
const EXACT_FRAMES: f64 = 9_007_199_254_740_992.0;

fn triangular(n: f64) -> f64 {
    n * (n + 1.0) / 2.0
}

/// Frames until a cube whose lower face starts `height` above the floor first
/// reaches it, in closed form.
///
/// Returns `Some(0)` for a non-positive height. Returns `None` when gravity
/// does not pull downward, when either input is not finite, or when the count
/// does not fit in a `u64`.
pub fn frames_to_floor(height: f32, gravity: f32) -> Option<u64> {
    if !height.is_finite() || !gravity.is_finite() {
        return None;
    }
    if height <= 0.0 {
        return Some(0);
    }
    if gravity >= 0.0 {
        return None;
    }
    let target = height as f64 / -(gravity as f64) - REACH_TOLERANCE;
    if target <= 1.0 {
        return Some(1);
    }
    // smallest n with n(n+1)/2 >= target
    let mut n = ((-1.0 + (1.0 + 8.0 * target).sqrt()) / 2.0).ceil();
    if !n.is_finite() || n >= u64::MAX as f64 {
        return None;
    }
    if n < EXACT_FRAMES {
        // correct for rounding in the square root
        while n > 1.0 && triangular(n - 1.0) >= target {
            n -= 1.0;
        }
        while triangular(n) < target {
            n += 1.0;
        }
    }
    Some(n as u64)
}

/// Frames until the same cube reaches the floor, found by stepping a
/// one-cube simulation. Gives up after `max_frames`.
pub fn simulate_frames_to_floor(config: &SimConfig, height: f32, max_frames: u64) -> Option<u64> {
    if !height.is_finite() || !config.gravity.is_finite() {
        return None;
    }
    if height <= 0.0 {
        return Some(0);
    }
    if config.gravity >= 0.0 {
        return None;
    }
    let start_y = config.rest_y() + height;
    let cube = Cube::new(Vec3::new(0.0, start_y, 0.0), config.cube_size, Rgb::WHITE);
    let mut sim = Simulation::from_cubes(config.clone(), vec![cube]);
    let rest_y = sim.config().rest_y() as f64;
    let tolerance = -(config.gravity as f64) * REACH_TOLERANCE;
    for frame in 1..=max_frames {
        sim.step();
        if sim.cubes()[0].position.y as f64 - rest_y <= tolerance {
            return Some(frame);
        }
    }
    None
}
