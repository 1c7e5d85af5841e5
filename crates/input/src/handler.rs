use crate::action::{map_key, Action};
use crate::queue::InputQueue;
use cubefall_common::SimConfig;
use cubefall_kernel::{Simulation, DESIGNATED_CUBE};

/// What the host loop should do after input has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Applies actions to the designated cube.
#[derive(Debug, Clone)]
pub struct InputHandler {
    step: f32,
    target: usize,
}

impl InputHandler {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            target: DESIGNATED_CUBE,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.move_step)
    }

    pub fn apply(&self, action: Action, sim: &mut Simulation) -> LoopControl {
        match action {
            Action::Nudge(direction) => {
                let delta = direction.unit() * self.step;
                if sim.nudge(self.target, delta) {
                    tracing::trace!(?direction, "nudged designated cube");
                }
                LoopControl::Continue
            }
            Action::Quit => LoopControl::Exit,
            Action::Noop => LoopControl::Continue,
        }
    }

    /// Drain the queue in order. Stops at the first quit and discards
    /// whatever was queued after it.
    pub fn process(&self, queue: &mut InputQueue, sim: &mut Simulation) -> LoopControl {
        while let Some(event) = queue.pop() {
            if self.apply(map_key(&event), sim) == LoopControl::Exit {
                queue.clear();
                return LoopControl::Exit;
            }
        }
        LoopControl::Continue
    }
}
