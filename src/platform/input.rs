//! Keyboard mapping shared by the web and native front ends

use crate::sim::Movement;

/// What a key press means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    /// SPACE: advance title / how-to-play screens
    Confirm,
    Restart,
    Quit,
    /// Toggle the autopilot (idle/demo mode)
    Autopilot,
    /// Anything else
    Ignored,
}

impl KeyAction {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "a" | "A" => KeyAction::Left,
            "ArrowRight" | "d" | "D" => KeyAction::Right,
            " " | "Spacebar" => KeyAction::Confirm,
            "r" | "R" => KeyAction::Restart,
            "q" | "Q" => KeyAction::Quit,
            "i" | "I" => KeyAction::Autopilot,
            _ => KeyAction::Ignored,
        }
    }
}

/// Direction keys currently held down
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKeys {
    left: bool,
    right: bool,
}

impl HeldKeys {
    /// Record a key transition. Returns true if the key was a direction key.
    pub fn set(&mut self, action: KeyAction, down: bool) -> bool {
        match action {
            KeyAction::Left => self.left = down,
            KeyAction::Right => self.right = down,
            _ => return false,
        }
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Movement intent for the next tick
    pub fn movement(&self) -> Movement {
        Movement::from_held(self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyAction::from_key("ArrowLeft"), KeyAction::Left);
        assert_eq!(KeyAction::from_key("a"), KeyAction::Left);
        assert_eq!(KeyAction::from_key("D"), KeyAction::Right);
        assert_eq!(KeyAction::from_key(" "), KeyAction::Confirm);
        assert_eq!(KeyAction::from_key("r"), KeyAction::Restart);
        assert_eq!(KeyAction::from_key("Q"), KeyAction::Quit);
        assert_eq!(KeyAction::from_key("F5"), KeyAction::Ignored);
    }

    #[test]
    fn test_held_keys_movement() {
        let mut keys = HeldKeys::default();
        assert_eq!(keys.movement(), Movement::None);

        assert!(keys.set(KeyAction::Left, true));
        assert_eq!(keys.movement(), Movement::Left);

        // Both held cancel out
        keys.set(KeyAction::Right, true);
        assert_eq!(keys.movement(), Movement::None);

        keys.set(KeyAction::Left, false);
        assert_eq!(keys.movement(), Movement::Right);

        assert!(!keys.set(KeyAction::Restart, true));
        keys.clear();
        assert_eq!(keys.movement(), Movement::None);
    }
}
