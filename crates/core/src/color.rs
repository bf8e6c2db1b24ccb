//! Linear RGB colors as used by node materials and config files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a `#rrggbb` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string does not start with `#` or has the wrong length.
    #[error("expected a color of the form #rrggbb, got {0:?}")]
    Format(String),
    /// One of the channels is not valid hex.
    #[error("invalid hex digits in color {0:?}")]
    Digits(String),
}

/// RGB color with channels in `0.0..=1.0`.
///
/// Serialized as a `#rrggbb` string so scene files and the viewer config stay
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Color {
    /// Pure white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Pure red, the default selection highlight.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    /// Build a color from channel values.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Pack into `0xRRGGBB`, rounding each channel to 8 bits.
    pub fn to_hex(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .filter(|rest| rest.len() == 6)
            .ok_or_else(|| ColorParseError::Format(s.to_string()))?;
        let hex = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::Digits(s.to_string()))?;
        Ok(Self::from_hex(hex))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_strings() {
        let color: Color = "#ff0000".parse().unwrap();
        assert_eq!(color, Color::RED);

        let grey: Color = "#dddddd".parse().unwrap();
        assert_eq!(grey.to_hex(), 0xdddddd);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(matches!(
            "ff0000".parse::<Color>(),
            Err(ColorParseError::Format(_))
        ));
        assert!(matches!(
            "#ff00".parse::<Color>(),
            Err(ColorParseError::Format(_))
        ));
        assert!(matches!(
            "#gg0000".parse::<Color>(),
            Err(ColorParseError::Digits(_))
        ));
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::from_hex(0x404040)).unwrap();
        assert_eq!(json, "\"#404040\"");

        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_hex(), 0x404040);

        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
