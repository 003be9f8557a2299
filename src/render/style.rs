use crate::decrypt::GlyphState;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 {
            return Err(ColorError::Length(input.to_string()));
        }
        let mut rgb = [0u8; 3];
        hex::decode_to_slice(digits, &mut rgb).map_err(|e| ColorError::Hex(input.to_string(), e))?;
        Ok(Self::new(rgb[0], rgb[1], rgb[2]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.r, self.g, self.b]))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let input = String::deserialize(deserializer)?;
        input.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        Self::Rgb { r: color.r, g: color.g, b: color.b }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ColorError {
    #[error("color '{0}' must have exactly 6 hex digits")]
    Length(String),

    #[error("invalid color '{0}': {1}")]
    Hex(String, hex::FromHexError),
}

/// Convert HSL to RGB color
/// H: hue (0-360), S: saturation (0-100), L: lightness (0-100)
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let s = s / 100.0;
    let l = l / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color::new(((r + m) * 255.0) as u8, ((g + m) * 255.0) as u8, ((b + m) * 255.0) as u8)
}

/// The colors revealed and encrypted glyphs are drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlyphTheme {
    pub revealed: Color,
    pub encrypted: Color,
}

impl GlyphTheme {
    pub fn color(&self, state: GlyphState) -> Color {
        match state {
            GlyphState::Revealed => self.revealed,
            GlyphState::Encrypted => self.encrypted,
        }
    }
}

impl Default for GlyphTheme {
    fn default() -> Self {
        // Warm white ink for real text, glitchy cyan for filler.
        Self { revealed: hsl_to_rgb(40.0, 20.0, 85.0), encrypted: hsl_to_rgb(180.0, 85.0, 55.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#ff0080", Color::new(255, 0, 128))]
    #[case("00ff00", Color::new(0, 255, 0))]
    #[case("#ABCDEF", Color::new(0xab, 0xcd, 0xef))]
    fn parse_color(#[case] input: &str, #[case] expected: Color) {
        assert_eq!(input.parse::<Color>().expect("parse failed"), expected);
    }

    #[rstest]
    #[case("#fff")]
    #[case("#gg0000")]
    #[case("")]
    fn parse_invalid_color(#[case] input: &str) {
        assert!(input.parse::<Color>().is_err());
    }

    #[test]
    fn display_color() {
        assert_eq!(Color::new(1, 2, 255).to_string(), "#0102ff");
    }

    #[rstest]
    #[case(0.0, Color::new(255, 0, 0))]
    #[case(120.0, Color::new(0, 255, 0))]
    #[case(240.0, Color::new(0, 0, 255))]
    fn primary_hues(#[case] hue: f32, #[case] expected: Color) {
        assert_eq!(hsl_to_rgb(hue, 100.0, 50.0), expected);
    }

    #[test]
    fn theme_picks_by_state() {
        let theme = GlyphTheme { revealed: Color::new(1, 1, 1), encrypted: Color::new(2, 2, 2) };
        assert_eq!(theme.color(GlyphState::Revealed), Color::new(1, 1, 1));
        assert_eq!(theme.color(GlyphState::Encrypted), Color::new(2, 2, 2));
    }
}
