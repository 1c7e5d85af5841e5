use crate::key::KeyEvent;
use std::collections::VecDeque;

/// FIFO of key events collected between frames.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<KeyEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: KeyEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<KeyEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
