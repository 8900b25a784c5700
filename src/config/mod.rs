//! Configuration management.
//!
//! Configuration is read from `~/.config/hifz/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::DEFAULT_RECITER_ID;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub reciter: ReciterConfig,
    pub share: ShareConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Where verses and audio come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Translation resource id (131 = The Clear Quran, Dr. Mustafa Khattab).
    pub translation_id: u32,
    /// Base for the relative audio paths returned by the API.
    pub audio_base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.quran.com/api/v4".to_string(),
            translation_id: 131,
            audio_base_url: "https://verses.quran.com/".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReciterConfig {
    pub default_id: u32,
}

impl Default for ReciterConfig {
    fn default() -> Self {
        Self {
            default_id: DEFAULT_RECITER_ID,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// How long the "Copied!" indicator stays visible.
    pub copy_feedback_ms: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            copy_feedback_ms: 2000,
        }
    }
}

impl ShareConfig {
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

impl Config {
    /// Load from the default path, writing a commented default file on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. Missing fields fall back to defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let invalid = config.keybindings.invalid_bindings();
        if !invalid.is_empty() {
            tracing::warn!("Ignoring unparseable keybindings: {}", invalid.join(", "));
        }

        Ok(config)
    }

    /// `~/.config/hifz/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("hifz").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn default_config_content() -> &'static str {
        r##"# Hifz Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"
# Digits and Backspace always edit the chapter/verse inputs.

[api]
base_url = "https://api.quran.com/api/v4"
# 131 = The Clear Quran (Dr. Mustafa Khattab)
translation_id = 131
audio_base_url = "https://verses.quran.com/"
timeout_secs = 10

[reciter]
# 2 = AbdulBaset AbdulSamad (Murattal). Run `hifz reciters` for the list.
default_id = 2

[share]
copy_feedback_ms = 2000

[colors]
border = "DarkGray"
focused_border = "Magenta"
arabic_text = "White"
translation_text = "Gray"
verse_key = "Yellow"
reciter = "Cyan"
error_text = "Red"
copied = "Green"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c", "Esc"]
new_verse = ["n", "Ctrl+n"]
confirm = ["Enter"]
next_field = ["Tab", "Right"]
prev_field = ["BackTab", "Shift+Tab", "Left"]
next_reciter = ["r", "Down"]
prev_reciter = ["R", "Up"]
play_audio = ["p", "Space"]
copy = ["c", "y"]
share_whatsapp = ["w"]
share_x = ["x"]
"##
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
