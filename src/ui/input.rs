//! Keybindings for the layering screen
//!
//! Maps terminal key presses to screen actions. Defaults can be overridden
//! from the config file.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Everything the layering screen can be asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    PrevTab,
    NextTab,
    MoveArmor,
    ChangeSide,
    ToggleCloth,
    AssignInvlets,
    SortArmor,
    EquipArmor,
    EquipArmorHere,
    RemoveArmor,
    UsageHelp,
    HelpKeybindings,
    Quit,
}

impl Action {
    pub fn all() -> &'static [Action] {
        &[
            Action::Up,
            Action::Down,
            Action::Left,
            Action::Right,
            Action::PrevTab,
            Action::NextTab,
            Action::MoveArmor,
            Action::ChangeSide,
            Action::ToggleCloth,
            Action::AssignInvlets,
            Action::SortArmor,
            Action::EquipArmor,
            Action::EquipArmorHere,
            Action::RemoveArmor,
            Action::UsageHelp,
            Action::HelpKeybindings,
            Action::Quit,
        ]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Action::Up => "Move up",
            Action::Down => "Move down",
            Action::Left => "Previous body part",
            Action::Right => "Next body part",
            Action::PrevTab => "Scroll right list up",
            Action::NextTab => "Scroll right list down",
            Action::MoveArmor => "Select armor for reordering",
            Action::ChangeSide => "Change side",
            Action::ToggleCloth => "Hide sprite",
            Action::AssignInvlets => "Assign inventory letters",
            Action::SortArmor => "Sort armor",
            Action::EquipArmor => "Equip armor",
            Action::EquipArmorHere => "Equip armor here",
            Action::RemoveArmor => "Remove armor",
            Action::UsageHelp => "Usage help",
            Action::HelpKeybindings => "Keybindings",
            Action::Quit => "Quit",
        }
    }
}

/// Key to action table; earlier bindings are listed first in descriptions
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, Action)>,
}

impl KeyBindings {
    /// Arrow keys and vi keys for movement, letters for the rest
    pub fn new() -> Self {
        use Action::*;
        let bindings = vec![
            (KeyCode::Up, Up),
            (KeyCode::Char('k'), Up),
            (KeyCode::Down, Down),
            (KeyCode::Char('j'), Down),
            (KeyCode::Left, Left),
            (KeyCode::Char('h'), Left),
            (KeyCode::Right, Right),
            (KeyCode::Char('l'), Right),
            (KeyCode::Char('<'), PrevTab),
            (KeyCode::Char('>'), NextTab),
            (KeyCode::Char('s'), MoveArmor),
            (KeyCode::Char('c'), ChangeSide),
            (KeyCode::Char('H'), ToggleCloth),
            (KeyCode::Char('='), AssignInvlets),
            (KeyCode::Char('S'), SortArmor),
            (KeyCode::Char('e'), EquipArmor),
            (KeyCode::Char('E'), EquipArmorHere),
            (KeyCode::Char('r'), RemoveArmor),
            (KeyCode::Char('?'), UsageHelp),
            (KeyCode::Char('K'), HelpKeybindings),
            (KeyCode::Char('q'), Quit),
            (KeyCode::Esc, Quit),
        ];
        Self { bindings }
    }

    /// Action bound to a key press, if any
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        self.bindings
            .iter()
            .find(|(code, _)| *code == key.code)
            .map(|(_, action)| *action)
    }

    /// Keys bound to `action`, for on-screen hints
    pub fn describe(&self, action: Action) -> String {
        let keys: Vec<String> = self.bindings
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(code, _)| key_name(*code))
            .collect();
        if keys.is_empty() {
            "unbound".to_string()
        } else {
            keys.join("/")
        }
    }

    /// Replace the keys of each listed action. A rebound key leaves its old action.
    pub fn apply_overrides(&mut self, overrides: &HashMap<Action, Vec<String>>) -> Result<(), ConfigError> {
        for action in Action::all() {
            let Some(names) = overrides.get(action) else {
                continue;
            };
            let codes = names
                .iter()
                .map(|name| parse_key(name).ok_or_else(|| ConfigError::UnknownKey(name.clone())))
                .collect::<Result<Vec<_>, _>>()?;

            self.bindings.retain(|(code, a)| a != action && !codes.contains(code));
            self.bindings.extend(codes.into_iter().map(|code| (code, *action)));
            log::debug!("Rebound {:?} to {:?}", action, names);
        }
        Ok(())
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a key name from the config ("Up", "Esc", "a", "Space", ...)
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let code = match name {
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Esc" => KeyCode::Esc,
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "Space" => KeyCode::Char(' '),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

/// Display name of a key, the inverse of `parse_key`
pub fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::new();
        assert_eq!(keys.action_for(&press(KeyCode::Char('j'))), Some(Action::Down));
        assert_eq!(keys.action_for(&press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(keys.action_for(&press(KeyCode::Char('x'))), None);
        assert_eq!(
            keys.action_for(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(keys.describe(Action::Up), "Up/k");
    }

    #[test]
    fn test_overrides_move_keys() {
        let mut keys = KeyBindings::new();
        let overrides = HashMap::from([(Action::SortArmor, vec!["s".to_string(), "Space".to_string()])]);
        keys.apply_overrides(&overrides).unwrap();

        assert_eq!(keys.action_for(&press(KeyCode::Char('s'))), Some(Action::SortArmor));
        assert_eq!(keys.action_for(&press(KeyCode::Char(' '))), Some(Action::SortArmor));
        assert_eq!(keys.action_for(&press(KeyCode::Char('S'))), None);
        assert_eq!(keys.describe(Action::MoveArmor), "unbound");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut keys = KeyBindings::new();
        let overrides = HashMap::from([(Action::Quit, vec!["F13-ish".to_string()])]);
        assert!(matches!(keys.apply_overrides(&overrides), Err(ConfigError::UnknownKey(_))));
        // Nothing was changed
        assert_eq!(keys.action_for(&press(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_key_names_round_trip() {
        for name in ["Up", "Esc", "Space", "a", "?", "PageDown"] {
            assert_eq!(key_name(parse_key(name).unwrap()), name);
        }
        assert_eq!(parse_key("ab"), None);
        assert_eq!(parse_key(""), None);
    }
}
