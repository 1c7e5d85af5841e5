use crate::key::{Key, KeyEvent, KeyState};
use glam::Vec3;

/// Axis-aligned nudge direction in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for this direction: Up/Down on Y, Left/Right on X.
    pub fn unit(self) -> Vec3 {
        match self {
            Direction::Up => Vec3::Y,
            Direction::Down => Vec3::NEG_Y,
            Direction::Left => Vec3::NEG_X,
            Direction::Right => Vec3::X,
        }
    }
}

/// A high-level action derived from a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the designated cube one step.
    Nudge(Direction),
    /// Stop the frame loop.
    Quit,
    /// Key has no binding in this state.
    Noop,
}

/// Map a key event to its action.
///
/// Arrows act on press and auto-repeat; Escape only on the initial press.
/// Releases never act.
pub fn map_key(event: &KeyEvent) -> Action {
    match (event.key, event.state) {
        (_, KeyState::Released) => Action::Noop,
        (Key::Escape, KeyState::Pressed) => Action::Quit,
        (Key::ArrowUp, _) => Action::Nudge(Direction::Up),
        (Key::ArrowDown, _) => Action::Nudge(Direction::Down),
        (Key::ArrowLeft, _) => Action::Nudge(Direction::Left),
        (Key::ArrowRight, _) => Action::Nudge(Direction::Right),
        _ => Action::Noop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_map_on_press_and_repeat() {
        assert_eq!(
            map_key(&KeyEvent::pressed(Key::ArrowUp)),
            Action::Nudge(Direction::Up)
        );
        assert_eq!(
            map_key(&KeyEvent::repeated(Key::ArrowLeft)),
            Action::Nudge(Direction::Left)
        );
    }

    #[test]
    fn release_is_ignored() {
        assert_eq!(map_key(&KeyEvent::released(Key::ArrowDown)), Action::Noop);
        assert_eq!(map_key(&KeyEvent::released(Key::Escape)), Action::Noop);
    }

    #[test]
    fn escape_quits_on_press_only() {
        assert_eq!(map_key(&KeyEvent::pressed(Key::Escape)), Action::Quit);
        assert_eq!(map_key(&KeyEvent::repeated(Key::Escape)), Action::Noop);
    }

    #[test]
    fn other_keys_ignored() {
        assert_eq!(map_key(&KeyEvent::pressed(Key::Other)), Action::Noop);
    }

    #[test]
    fn direction_units() {
        assert_eq!(Direction::Up.unit(), Vec3::Y);
        assert_eq!(Direction::Down.unit(), Vec3::NEG_Y);
        assert_eq!(Direction::Left.unit(), Vec3::NEG_X);
        assert_eq!(Direction::Right.unit(), Vec3::X);
    }
}
