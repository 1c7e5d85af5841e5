//! Input: backend-neutral key events mapped to simulation actions.
//!
//! # Invariants
//! - Window backends only translate and enqueue; they never touch the simulation.
//! - The simulation consumes actions, never raw key events.
//! - Only the designated cube is ever moved by input.

pub mod action;
pub mod handler;
pub mod key;
pub mod queue;

pub use action::{map_key, Action, Direction};
pub use handler::{InputHandler, LoopControl};
pub use key::{Key, KeyEvent, KeyState};
pub use queue::InputQueue;
