//! Frame loop: one strictly sequential input → update → render iteration.
//!
//! # Invariants
//! - Input queued before a frame is applied before that frame's physics step.
//! - After exit is requested, no further step or render happens.
//! - The loop owns the simulation; nothing else holds it mutably.

use cubefall_common::SimConfig;
use cubefall_input::{InputHandler, InputQueue, KeyEvent, LoopControl};
use cubefall_kernel::{SimEvent, Simulation};
use cubefall_render::{DrawList, QuadRenderer, Renderer};

/// Result of one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The simulation advanced; present this draw list.
    Render(DrawList),
    /// Termination was requested; stop the host loop.
    Exit,
}

/// Owns the simulation and drives it one frame at a time.
#[derive(Debug)]
pub struct FrameLoop {
    sim: Simulation,
    input: InputQueue,
    handler: InputHandler,
    renderer: QuadRenderer,
    exit_requested: bool,
}

impl FrameLoop {
    pub fn new(sim: Simulation) -> Self {
        let handler = InputHandler::from_config(sim.config());
        Self {
            sim,
            input: InputQueue::new(),
            handler,
            renderer: QuadRenderer::new(),
            exit_requested: false,
        }
    }

    /// Spawn a fresh simulation from `config` and `seed`.
    pub fn from_config(config: SimConfig, seed: u64) -> Self {
        Self::new(Simulation::new(config, seed))
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Queue a key event for the next frame.
    pub fn push_key(&mut self, event: KeyEvent) {
        if !self.exit_requested {
            self.input.push(event);
        }
    }

    /// Ask the loop to stop, as a window close does.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
        self.input.clear();
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Run one iteration: apply queued input, step physics, emit draw list.
    pub fn frame(&mut self) -> FrameOutcome {
        if self.exit_requested {
            return FrameOutcome::Exit;
        }
        if self.handler.process(&mut self.input, &mut self.sim) == LoopControl::Exit {
            tracing::info!(tick = self.sim.tick(), "exit requested");
            self.exit_requested = true;
            return FrameOutcome::Exit;
        }
        self.sim.step();
        self.log_events();
        FrameOutcome::Render(self.renderer.render(&self.sim))
    }

    fn log_events(&mut self) {
        for event in self.sim.drain_events() {
            match event {
                SimEvent::Landed { index, tick } => {
                    tracing::debug!(index, tick, "cube landed");
                }
                SimEvent::Nudged { index, delta } => {
                    tracing::debug!(index, ?delta, "cube nudged");
                }
                SimEvent::Stepped { tick } => {
                    tracing::trace!(tick, "stepped");
                }
            }
        }
    }
}
