use crate::geometry::DrawList;
use cubefall_kernel::Simulation;
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads simulation state and produces output. It never
/// mutates the simulation.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given simulation state.
    fn render(&self, sim: &Simulation) -> Self::Output;
}

/// Emits six colored quads per cube, ready for a GPU backend.
#[derive(Debug, Default)]
pub struct QuadRenderer;

impl QuadRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for QuadRenderer {
    type Output = DrawList;

    fn render(&self, sim: &Simulation) -> DrawList {
        let mut list = DrawList::with_capacity(sim.cube_count() * 6);
        for cube in sim.cubes() {
            list.push_cube(cube);
        }
        list
    }
}

/// Human-readable dump of the simulation, for the CLI and logs.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, sim: &Simulation) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Simulation (tick={}, seed={}) ===",
            sim.tick(),
            sim.seed()
        );
        let _ = writeln!(
            out,
            "Cubes: {}  floor={:.3}  gravity={}",
            sim.cube_count(),
            sim.config().floor_y,
            sim.config().gravity
        );
        for (i, cube) in sim.cubes().iter().enumerate() {
            let p = cube.position;
            let c = cube.color;
            let _ = writeln!(
                out,
                "  [{i}] pos=({:.3}, {:.3}, {:.3}) vy={:.4} rgb=({:.2}, {:.2}, {:.2})",
                p.x, p.y, p.z, cube.velocity_y, c.r, c.g, c.b
            );
        }
        out
    }
}
