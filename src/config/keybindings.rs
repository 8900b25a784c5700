//! Key strings from the `[keybindings]` table, mapped to viewer actions.
//!
//! Digits and Backspace always edit the focused input field and cannot be
//! rebound; everything else goes through this table.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub new_verse: Vec<String>,
    pub confirm: Vec<String>,
    pub next_field: Vec<String>,
    pub prev_field: Vec<String>,
    pub next_reciter: Vec<String>,
    pub prev_reciter: Vec<String>,
    pub play_audio: Vec<String>,
    pub copy: Vec<String>,
    pub share_whatsapp: Vec<String>,
    pub share_x: Vec<String>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: vec!["q".to_string(), "Ctrl+c".to_string(), "Esc".to_string()],
            new_verse: vec!["n".to_string(), "Ctrl+n".to_string()],
            confirm: vec!["Enter".to_string()],
            next_field: vec!["Tab".to_string(), "Right".to_string()],
            prev_field: vec!["BackTab".to_string(), "Shift+Tab".to_string(), "Left".to_string()],
            next_reciter: vec!["r".to_string(), "Down".to_string()],
            prev_reciter: vec!["R".to_string(), "Up".to_string()],
            play_audio: vec!["p".to_string(), "Space".to_string()],
            copy: vec!["c".to_string(), "y".to_string()],
            share_whatsapp: vec!["w".to_string()],
            share_x: vec!["x".to_string()],
        }
    }
}

impl KeybindingConfig {
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 11] = [
            (&self.quit, Action::Quit),
            (&self.new_verse, Action::NewVerse),
            (&self.confirm, Action::Confirm),
            (&self.next_field, Action::NextField),
            (&self.prev_field, Action::PrevField),
            (&self.next_reciter, Action::NextReciter),
            (&self.prev_reciter, Action::PrevReciter),
            (&self.play_audio, Action::PlayAudio),
            (&self.copy, Action::Copy),
            (&self.share_whatsapp, Action::ShareWhatsApp),
            (&self.share_x, Action::ShareX),
        ];

        table
            .iter()
            .find(|(bindings, _)| matches_key(key, bindings))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }

    /// Every binding string that fails to parse, for startup warnings.
    pub fn invalid_bindings(&self) -> Vec<String> {
        [
            &self.quit,
            &self.new_verse,
            &self.confirm,
            &self.next_field,
            &self.prev_field,
            &self.next_reciter,
            &self.prev_reciter,
            &self.play_audio,
            &self.copy,
            &self.share_whatsapp,
            &self.share_x,
        ]
        .into_iter()
        .flatten()
        .filter(|b| parse_key_string(b).is_err())
        .cloned()
        .collect()
    }
}

fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|parsed| parsed.matches(key))
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse `"j"`, `"Enter"`, `"Ctrl+c"`, `"Shift+Tab"` and the like.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('+').collect();

    let mut modifiers = KeyModifiers::NONE;
    let key_part = match parts.split_last() {
        Some((last, mods)) if !mods.is_empty() => {
            for part in mods {
                match part.to_lowercase().as_str() {
                    "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                    "shift" => modifiers |= KeyModifiers::SHIFT,
                    "alt" => modifiers |= KeyModifiers::ALT,
                    _ => return Err(format!("Unknown modifier: {}", part)),
                }
            }
            *last
        }
        _ => s,
    };

    let code = parse_key_code(key_part)?;
    Ok(KeyBinding { code, modifiers })
}

const NAMED_KEYS: &[(&[&str], KeyCode)] = &[
    (&["enter", "return"], KeyCode::Enter),
    (&["tab"], KeyCode::Tab),
    (&["backtab"], KeyCode::BackTab),
    (&["backspace", "bs"], KeyCode::Backspace),
    (&["delete", "del"], KeyCode::Delete),
    (&["home"], KeyCode::Home),
    (&["end"], KeyCode::End),
    (&["pageup", "pgup"], KeyCode::PageUp),
    (&["pagedown", "pgdn"], KeyCode::PageDown),
    (&["up"], KeyCode::Up),
    (&["down"], KeyCode::Down),
    (&["left"], KeyCode::Left),
    (&["right"], KeyCode::Right),
    (&["esc", "escape"], KeyCode::Esc),
    (&["space"], KeyCode::Char(' ')),
];

fn parse_key_code(name: &str) -> Result<KeyCode, String> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = name.to_lowercase();
    if let Some((_, code)) = NAMED_KEYS
        .iter()
        .find(|(aliases, _)| aliases.contains(&lower.as_str()))
    {
        return Ok(*code);
    }

    lower
        .strip_prefix('f')
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| (1..=12).contains(n))
        .map(KeyCode::F)
        .ok_or_else(|| format!("Unknown key: {}", name))
}
