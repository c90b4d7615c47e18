//! Input mapping
//!
//! Keyboard keys and on-screen buttons both end up as `LogicalKey` presses
//! and releases; `InputState` folds them into the per-tick `TickInput`.

use crate::sim::TickInput;

/// DOM events that press an on-screen button
pub const BUTTON_PRESS_EVENTS: [&str; 2] = ["mousedown", "touchstart"];
/// DOM events that release an on-screen button
pub const BUTTON_RELEASE_EVENTS: [&str; 4] = ["mouseup", "mouseleave", "touchend", "touchcancel"];

/// On-screen direction buttons: (element id, key)
pub const DIRECTION_BUTTONS: [(&str, LogicalKey); 4] = [
    ("left-btn", LogicalKey::Left),
    ("right-btn", LogicalKey::Right),
    ("up-btn", LogicalKey::Up),
    ("down-btn", LogicalKey::Down),
];

/// Game-level key, independent of the physical binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalKey {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl LogicalKey {
    /// Map a `KeyboardEvent.key` value (WASD, arrows, space), ignoring case
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "a" | "arrowleft" => Some(LogicalKey::Left),
            "d" | "arrowright" => Some(LogicalKey::Right),
            "w" | "arrowup" => Some(LogicalKey::Up),
            "s" | "arrowdown" => Some(LogicalKey::Down),
            " " | "spacebar" => Some(LogicalKey::Fire),
            _ => None,
        }
    }
}

/// Held directions plus a pending fire request
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    fire_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key or button went down
    pub fn press(&mut self, key: LogicalKey) {
        match key {
            LogicalKey::Left => self.left = true,
            LogicalKey::Right => self.right = true,
            LogicalKey::Up => self.up = true,
            LogicalKey::Down => self.down = true,
            LogicalKey::Fire => self.fire_pending = true,
        }
    }

    /// Key or button went up. Fire is edge-triggered, so releasing it is a no-op.
    pub fn release(&mut self, key: LogicalKey) {
        match key {
            LogicalKey::Left => self.left = false,
            LogicalKey::Right => self.right = false,
            LogicalKey::Up => self.up = false,
            LogicalKey::Down => self.down = false,
            LogicalKey::Fire => {}
        }
    }

    /// Handle a raw keydown; returns true if the key is bound
    pub fn key_down(&mut self, key: &str) -> bool {
        match LogicalKey::from_key(key) {
            Some(k) => {
                self.press(k);
                true
            }
            None => false,
        }
    }

    /// Handle a raw keyup; returns true if the key is bound
    pub fn key_up(&mut self, key: &str) -> bool {
        match LogicalKey::from_key(key) {
            Some(k) => {
                self.release(k);
                true
            }
            None => false,
        }
    }

    /// Snapshot for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            fire: self.fire_pending,
        }
    }

    /// Clear one-shot inputs after a tick consumed them
    pub fn clear_one_shots(&mut self) {
        self.fire_pending = false;
    }

    /// Drop everything (restart, focus loss)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping_ignores_case() {
        assert_eq!(LogicalKey::from_key("A"), Some(LogicalKey::Left));
        assert_eq!(LogicalKey::from_key("ArrowLeft"), Some(LogicalKey::Left));
        assert_eq!(LogicalKey::from_key("d"), Some(LogicalKey::Right));
        assert_eq!(LogicalKey::from_key("ARROWUP"), Some(LogicalKey::Up));
        assert_eq!(LogicalKey::from_key("s"), Some(LogicalKey::Down));
        assert_eq!(LogicalKey::from_key(" "), Some(LogicalKey::Fire));
        assert_eq!(LogicalKey::from_key("q"), None);
    }

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        assert!(input.key_down("ArrowRight"));
        assert!(input.key_down("w"));
        let tick = input.tick_input();
        assert!(tick.right && tick.up && !tick.left && !tick.down);

        assert!(input.key_up("ArrowRight"));
        assert!(!input.tick_input().right);
        assert!(input.tick_input().up);
    }

    #[test]
    fn test_fire_is_one_shot() {
        let mut input = InputState::new();
        input.key_down(" ");
        input.key_up(" ");
        assert!(input.tick_input().fire);
        input.clear_one_shots();
        assert!(!input.tick_input().fire);
    }

    #[test]
    fn test_buttons_match_keys() {
        let mut from_button = InputState::new();
        let mut from_key = InputState::new();
        for (_, key) in DIRECTION_BUTTONS {
            from_button.press(key);
        }
        for key in ["a", "d", "w", "s"] {
            from_key.key_down(key);
        }
        assert_eq!(from_button.tick_input(), from_key.tick_input());
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut input = InputState::new();
        assert!(!input.key_down("Escape"));
        assert_eq!(input.tick_input(), TickInput::default());
    }
}
