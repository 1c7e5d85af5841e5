/// Keys the demo distinguishes. Everything else collapses into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

/// Transition reported for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    /// Auto-repeat while the key is held.
    Repeat,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
}

impl KeyEvent {
    pub fn new(key: Key, state: KeyState) -> Self {
        Self { key, state }
    }

    pub fn pressed(key: Key) -> Self {
        Self::new(key, KeyState::Pressed)
    }

    pub fn repeated(key: Key) -> Self {
        Self::new(key, KeyState::Repeat)
    }

    pub fn released(key: Key) -> Self {
        Self::new(key, KeyState::Released)
    }
}
