//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::domain::Filter;
use crate::tui::event::Action;

/// Key strings bound to each action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub open_article: Vec<String>,
    pub open_comments: Vec<String>,
    pub filter_front: Vec<String>,
    pub filter_best: Vec<String>,
    pub filter_newest: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            open_article: keys(&["o", "Enter"]),
            open_comments: keys(&["c"]),
            filter_front: keys(&["f"]),
            filter_best: keys(&["b"]),
            filter_newest: keys(&["n"]),
        }
    }
}

impl KeybindingConfig {
    /// Bindings in lookup order; the first match wins.
    pub fn table(&self) -> [(&[String], Action); 8] {
        [
            (self.quit.as_slice(), Action::Quit),
            (self.move_up.as_slice(), Action::MoveUp),
            (self.move_down.as_slice(), Action::MoveDown),
            (self.open_article.as_slice(), Action::OpenArticle),
            (self.open_comments.as_slice(), Action::OpenComments),
            (self.filter_front.as_slice(), Action::SwitchFilter(Filter::Front)),
            (self.filter_best.as_slice(), Action::SwitchFilter(Filter::Best)),
            (self.filter_newest.as_slice(), Action::SwitchFilter(Filter::Newest)),
        ]
    }

    /// Get the action for a key event.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        self.table()
            .into_iter()
            .find(|(bindings, _)| matches_any(key, bindings))
            .map(|(_, action)| action)
            .unwrap_or(Action::None)
    }

    /// First key bound to `action`, for help text.
    pub fn first_key(&self, action: Action) -> Option<&str> {
        self.table()
            .into_iter()
            .find(|(_, a)| *a == action)
            .and_then(|(bindings, _)| bindings.first())
            .map(String::as_str)
    }
}

fn matches_any(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|b| parse_key_string(b).ok())
        .any(|binding| binding.matches(key))
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored for character keys since it is already in the char.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse strings such as `"j"`, `"Down"`, `"Ctrl+c"` or `"Shift+Tab"`.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let (modifier_part, key_part) = match s.rsplit_once('+') {
        // "+" on its own or "Ctrl++" binds the plus key
        Some((mods, "")) => (mods.strip_suffix('+'), "+"),
        Some((mods, key)) => (Some(mods), key),
        None => (None, s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_part.into_iter().flat_map(|m| m.split('+')) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            "" => continue,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key_part)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}
