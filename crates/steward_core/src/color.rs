//! RGB colors as written in configuration documents.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use steward_error::ValidationError;

/// 24-bit RGB color.
///
/// Accepts `"#rrggbb"`, `"rrggbb"` or a plain integer when deserialized and
/// always serializes back to `"#rrggbb"`.
///
/// # Examples
///
/// ```
/// use steward_core::Color;
///
/// let red: Color = "#ff0000".parse().unwrap();
/// assert_eq!(red.value(), 0xff0000);
/// assert_eq!(red.to_string(), "#ff0000");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "RawColor", into = "String")]
#[display("#{:06x}", _0)]
pub struct Color(u32);

impl Color {
    /// Pure green, the default welcome embed color.
    pub const GREEN: Color = Color(0x00ff00);
    /// Red used for goodbye embeds.
    pub const RED: Color = Color(0xe74c3c);

    /// Build a color from an RGB integer, rejecting values above `0xffffff`.
    pub fn from_rgb(value: u32) -> Result<Self, ValidationError> {
        if value > 0xff_ffff {
            return Err(ValidationError::new(format!(
                "Color value out of range: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// The RGB integer.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.is_empty() || hex.len() > 6 {
            return Err(ValidationError::new(format!("Invalid color: {}", s)));
        }
        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| ValidationError::new(format!("Invalid color: {}", s)))?;
        Self::from_rgb(value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColor {
    Hex(String),
    Int(u32),
}

impl TryFrom<RawColor> for Color {
    type Error = ValidationError;

    fn try_from(raw: RawColor) -> Result<Self, Self::Error> {
        match raw {
            RawColor::Hex(text) => text.parse(),
            RawColor::Int(value) => Color::from_rgb(value),
        }
    }
}
