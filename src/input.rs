//! Logical input tracking
//!
//! Maps physical key names onto the fixed logical key set and tracks held /
//! just-pressed state. Event handlers write into [`InputState`]; the tick
//! driver samples a [`TickInput`] at the start of each tick and clears the
//! just-pressed set after every tick, so one-shot actions fire exactly once
//! per physical press.

use crate::sim::TickInput;

/// The logical keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalKey {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
    Confirm,
}

const LOGICAL_KEY_COUNT: usize = 5;

impl LogicalKey {
    /// Map a `KeyboardEvent.key` value to a logical key
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(LogicalKey::RotateLeft),
            "ArrowRight" => Some(LogicalKey::RotateRight),
            "ArrowUp" => Some(LogicalKey::Thrust),
            " " => Some(LogicalKey::Fire),
            "Enter" => Some(LogicalKey::Confirm),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Held and just-pressed key state, written by event delivery and read only
/// by the tick driver.
#[derive(Debug, Default)]
pub struct InputState {
    held: [bool; LOGICAL_KEY_COUNT],
    just_pressed: [bool; LOGICAL_KEY_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key-down event; auto-repeat while held does not re-arm just-pressed
    pub fn key_down(&mut self, key: LogicalKey) {
        let i = key.index();
        if !self.held[i] {
            self.just_pressed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn key_up(&mut self, key: LogicalKey) {
        self.held[key.index()] = false;
    }

    pub fn is_held(&self, key: LogicalKey) -> bool {
        self.held[key.index()]
    }

    /// True at most once per physical press, until cleared
    pub fn was_just_pressed(&self, key: LogicalKey) -> bool {
        self.just_pressed[key.index()]
    }

    /// Called by the driver after every tick
    pub fn clear_just_pressed(&mut self) {
        self.just_pressed = [false; LOGICAL_KEY_COUNT];
    }

    /// Snapshot the current signals for one simulation tick.
    ///
    /// Fire doubles as confirm so the idle screens start on either key.
    pub fn sample(&self, time_ms: f64) -> TickInput {
        TickInput {
            rotate_left: self.is_held(LogicalKey::RotateLeft),
            rotate_right: self.is_held(LogicalKey::RotateRight),
            thrust: self.is_held(LogicalKey::Thrust),
            fire: self.is_held(LogicalKey::Fire),
            confirm: self.was_just_pressed(LogicalKey::Confirm)
                || self.was_just_pressed(LogicalKey::Fire),
            time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_mapping_covers_the_logical_set() {
        assert_eq!(LogicalKey::from_key("ArrowLeft"), Some(LogicalKey::RotateLeft));
        assert_eq!(LogicalKey::from_key("ArrowRight"), Some(LogicalKey::RotateRight));
        assert_eq!(LogicalKey::from_key("ArrowUp"), Some(LogicalKey::Thrust));
        assert_eq!(LogicalKey::from_key(" "), Some(LogicalKey::Fire));
        assert_eq!(LogicalKey::from_key("Enter"), Some(LogicalKey::Confirm));
        assert_eq!(LogicalKey::from_key("Escape"), None);
    }

    #[test]
    fn just_pressed_fires_once_per_press() {
        let mut input = InputState::new();
        input.key_down(LogicalKey::Fire);
        assert!(input.was_just_pressed(LogicalKey::Fire));

        input.clear_just_pressed();
        assert!(!input.was_just_pressed(LogicalKey::Fire));
        assert!(input.is_held(LogicalKey::Fire));

        // Auto-repeat delivers more key-downs while held
        input.key_down(LogicalKey::Fire);
        assert!(!input.was_just_pressed(LogicalKey::Fire));

        // Release and press again re-arms it
        input.key_up(LogicalKey::Fire);
        input.key_down(LogicalKey::Fire);
        assert!(input.was_just_pressed(LogicalKey::Fire));
    }

    #[test]
    fn sample_reflects_held_keys() {
        let mut input = InputState::new();
        input.key_down(LogicalKey::RotateLeft);
        input.key_down(LogicalKey::Thrust);
        input.clear_just_pressed();

        let tick_input = input.sample(123.0);
        assert!(tick_input.rotate_left);
        assert!(!tick_input.rotate_right);
        assert!(tick_input.thrust);
        assert!(!tick_input.fire);
        assert!(!tick_input.confirm);
        assert_eq!(tick_input.time_ms, 123.0);
    }

    #[test]
    fn fire_doubles_as_confirm() {
        let mut input = InputState::new();
        input.key_down(LogicalKey::Fire);
        assert!(input.sample(0.0).confirm);

        input.clear_just_pressed();
        // Still held, but no longer just-pressed
        assert!(!input.sample(0.0).confirm);

        let mut input = InputState::new();
        input.key_down(LogicalKey::Confirm);
        assert!(input.sample(0.0).confirm);
    }
}
