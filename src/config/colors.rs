//! Theme colors for the verse card, reciter box and status bar.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub focused_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub arabic_text: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub translation_text: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub verse_key: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub reciter: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error_text: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub copied: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            focused_border: Color::Magenta,
            arabic_text: Color::White,
            translation_text: Color::Gray,
            verse_key: Color::Yellow,
            reciter: Color::Cyan,
            error_text: Color::Red,
            copied: Color::Green,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Named colors, matched after lowercasing and dropping `-`, `_` and spaces.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("purple", Color::Magenta),
    ("cyan", Color::Cyan),
    ("gray", Color::Gray),
    ("grey", Color::Gray),
    ("darkgray", Color::DarkGray),
    ("darkgrey", Color::DarkGray),
    ("lightred", Color::LightRed),
    ("lightgreen", Color::LightGreen),
    ("lightyellow", Color::LightYellow),
    ("lightblue", Color::LightBlue),
    ("lightmagenta", Color::LightMagenta),
    ("lightcyan", Color::LightCyan),
    ("white", Color::White),
    ("reset", Color::Reset),
];

/// Parse a color name (`"Magenta"`, `"dark_gray"`) or hex code (`"#RRGGBB"`, `"#RGB"`).
pub fn parse_color_string(input: &str) -> Result<Color, String> {
    let input = input.trim();

    if let Some(hex) = input.strip_prefix('#') {
        return parse_hex_color(hex).ok_or_else(|| format!("Invalid hex color: {}", input));
    }

    let name: String = input
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect();

    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, color)| *color)
        .ok_or_else(|| format!("Unknown color: {}", input))
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
    };

    match hex.len() {
        6 => Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // #RGB expands each digit, 0xF -> 0xFF
        3 => Some(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => None,
    }
}
