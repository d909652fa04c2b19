// Keyboard input state for the single player

use super::action::{default_bindings, Action};
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks which actions are held and which changed this frame
#[derive(Debug)]
pub struct InputState {
    bindings: HashMap<KeyCode, Action>,
    pressed: HashSet<Action>,
    just_pressed: HashSet<Action>,
    just_released: HashSet<Action>,
}

impl InputState {
    /// Create an input state with the default arrow-key bindings
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        let Some(&action) = self.bindings.get(&key_code) else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                // OS key repeat must not re-trigger edge actions
                if !event.repeat {
                    self.press(action);
                }
            }
            ElementState::Released => self.release(action),
        }
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action went down this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action went up this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Held horizontal direction: -1 left, 1 right, 0 neither
    ///
    /// Left wins when both arrows are held.
    pub fn horizontal(&self) -> f32 {
        if self.is_pressed(Action::MoveLeft) {
            -1.0
        } else if self.is_pressed(Action::MoveRight) {
            1.0
        } else {
            0.0
        }
    }

    /// Clear the per-frame edges; call once after each frame's updates
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();

        input.press(Action::Jump);
        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));

        input.end_frame();
        input.release(Action::Jump);
        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_end_frame_clears_edges_not_held_state() {
        let mut input = InputState::new();
        input.press(Action::MoveRight);

        input.end_frame();

        assert!(input.is_pressed(Action::MoveRight));
        assert!(!input.just_pressed(Action::MoveRight));
    }

    #[test]
    fn test_repeated_press_is_not_an_edge() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        input.end_frame();

        input.press(Action::Jump);
        assert!(!input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_horizontal_direction() {
        let mut input = InputState::new();
        assert_eq!(input.horizontal(), 0.0);

        input.press(Action::MoveRight);
        assert_eq!(input.horizontal(), 1.0);

        // Left takes precedence when both are held
        input.press(Action::MoveLeft);
        assert_eq!(input.horizontal(), -1.0);

        input.release(Action::MoveLeft);
        input.release(Action::MoveRight);
        assert_eq!(input.horizontal(), 0.0);
    }
}
