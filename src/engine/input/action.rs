// Game action definitions and key bindings

use winit::keyboard::KeyCode;

/// Everything the player can do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

/// Default arrow-key bindings
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::ArrowUp, Action::Jump),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_has_a_binding() {
        let bindings = default_bindings();

        for action in [Action::MoveLeft, Action::MoveRight, Action::Jump] {
            assert!(
                bindings.iter().any(|(_, bound)| *bound == action),
                "missing binding for {:?}",
                action
            );
        }
    }

    #[test]
    fn test_no_duplicate_keys() {
        let bindings = default_bindings();
        let mut seen = std::collections::HashSet::new();
        for (key, _) in bindings {
            assert!(seen.insert(key), "key bound twice: {:?}", key);
        }
    }
}
