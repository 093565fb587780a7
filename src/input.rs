//! Key events to movement/fire intent
//!
//! Held directions are tracked per key. Firing is gated only by a cooldown
//! timestamp: a key-down while the gate is closed (including OS key repeat)
//! does nothing.

use crate::consts::FIRE_COOLDOWN_MS;
use crate::sim::TickInput;

/// Keys the core understands
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    /// Anything else; ignored
    Other(String),
}

impl Key {
    /// Map a DOM-style key name (`KeyboardEvent.key` / `.code`)
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            " " | "Space" | "Spacebar" => Key::Fire,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Held keys plus the fire gate
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    /// Fire request waiting for the next tick
    fire_pending: bool,
    /// Fire allowed again at this time (ms)
    fire_available_at: u64,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn held_mut(&mut self, key: &Key) -> Option<&mut bool> {
        match key {
            Key::Left => Some(&mut self.left),
            Key::Right => Some(&mut self.right),
            Key::Up => Some(&mut self.up),
            Key::Down => Some(&mut self.down),
            Key::Fire | Key::Other(_) => None,
        }
    }

    /// Handle a key press. Returns `true` when it produced a shot.
    pub fn key_down(&mut self, key: &Key, now_ms: u64) -> bool {
        if let Some(held) = self.held_mut(key) {
            *held = true;
            return false;
        }
        if *key == Key::Fire {
            return self.try_fire(now_ms);
        }
        false
    }

    /// Handle a key release
    pub fn key_up(&mut self, key: &Key) {
        if let Some(held) = self.held_mut(key) {
            *held = false;
        }
    }

    /// Open the gate if the cooldown has elapsed and queue one shot
    fn try_fire(&mut self, now_ms: u64) -> bool {
        if !self.can_fire(now_ms) {
            return false;
        }
        self.fire_pending = true;
        self.fire_available_at = now_ms + FIRE_COOLDOWN_MS;
        true
    }

    pub fn can_fire(&self, now_ms: u64) -> bool {
        now_ms >= self.fire_available_at
    }

    /// Current intent. Takes the pending shot so it fires on one tick only.
    pub fn take_intent(&mut self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            fire: std::mem::take(&mut self.fire_pending),
        }
    }

    /// Current intent without consuming the pending shot
    pub fn peek_intent(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            fire: self.fire_pending,
        }
    }

    /// Drop held keys and any pending shot; fire becomes available immediately
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Key::Left);
        assert_eq!(Key::from_name(" "), Key::Fire);
        assert_eq!(Key::from_name("Space"), Key::Fire);
        assert_eq!(Key::from_name("q"), Key::Other("q".to_string()));
    }

    #[test]
    fn test_held_keys() {
        let mut input = InputTracker::new();
        input.key_down(&Key::Left, 0);
        input.key_down(&Key::Up, 0);
        let intent = input.peek_intent();
        assert!(intent.left && intent.up && !intent.right && !intent.down);

        input.key_up(&Key::Left);
        assert!(!input.peek_intent().left);
        assert!(input.peek_intent().up);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut input = InputTracker::new();
        assert!(input.key_down(&Key::Fire, 1000));
        // Key repeat inside the window
        assert!(!input.key_down(&Key::Fire, 1050));
        assert!(!input.key_down(&Key::Fire, 1000 + FIRE_COOLDOWN_MS - 1));
        assert!(input.key_down(&Key::Fire, 1000 + FIRE_COOLDOWN_MS));
    }

    #[test]
    fn test_pending_shot_consumed_once() {
        let mut input = InputTracker::new();
        input.key_down(&Key::Fire, 0);
        assert!(input.take_intent().fire);
        assert!(!input.take_intent().fire);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputTracker::new();
        assert!(!input.key_down(&Key::Other("Enter".into()), 0));
        input.key_up(&Key::Other("Enter".into()));
        assert_eq!(input.peek_intent(), TickInput::default());
    }

    #[test]
    fn test_reset_reenables_fire() {
        let mut input = InputTracker::new();
        input.key_down(&Key::Right, 0);
        input.key_down(&Key::Fire, 0);
        input.reset();
        assert_eq!(input.peek_intent(), TickInput::default());
        assert!(input.can_fire(1));
        assert!(input.key_down(&Key::Fire, 1));
    }
}
