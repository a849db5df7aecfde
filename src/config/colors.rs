//! Color configuration for the TUI.

use std::str::FromStr;

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

/// Configuration for all TUI colors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub rank: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub tally: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub help_key: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub filter_key: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub active_filter_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub active_filter_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error_fg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            rank: Color::DarkGray,
            tally: Color::Green,
            help_key: Color::Cyan,
            filter_key: Color::Green,
            active_filter_fg: Color::Green,
            active_filter_bg: Color::White,
            selection_fg: Color::Black,
            selection_bg: Color::Cyan,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
            error_fg: Color::LightRed,
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

/// Parse a color name, `#RRGGBB`, `#RGB`, or a 0-255 palette index.
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if let Some(short) = s.strip_prefix('#').filter(|hex| hex.len() == 3) {
        let mut channels = [0u8; 3];
        for (channel, digit) in channels.iter_mut().zip(short.chars()) {
            let value = digit
                .to_digit(16)
                .ok_or_else(|| format!("Invalid hex color: {}", s))?;
            *channel = (value * 17) as u8;
        }
        return Ok(Color::Rgb(channels[0], channels[1], channels[2]));
    }

    Color::from_str(s).map_err(|_| format!("Unknown color: {}", s))
}
