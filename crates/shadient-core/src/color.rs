//! sRGB colors and the radial glow gradients used behind hero sections.

use crate::animation::{css_number, Interpolate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque sRGB color. Alpha is applied per gradient stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Black color
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White color
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create a color from channel values.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string (e.g., "#ef9364" or "ef9364").
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return Err(ColorParseError::InvalidLength(hex.len()));
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| ColorParseError::InvalidHex(hex.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Convert to lowercase hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` with the given alpha.
    #[must_use]
    pub fn rgba(&self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            css_number(alpha.clamp(0.0, 1.0))
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Invalid hex characters
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    /// Invalid string length
    #[error("invalid hex color length {0} (expected 6)")]
    InvalidLength(usize),
}

/// A point in percent of the element box, `(0, 0)` top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Horizontal position in percent
    pub x: f64,
    /// Vertical position in percent
    pub y: f64,
}

impl Anchor {
    /// Center of the box.
    pub const CENTER: Self = Self { x: 50.0, y: 50.0 };

    /// Create an anchor.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Interpolate for Anchor {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            x: f64::interpolate(&from.x, &to.x, t),
            y: f64::interpolate(&from.y, &to.y, t),
        }
    }
}

/// Alpha falloff of a glow: `(alpha, stop percent)` pairs.
const GLOW_STOPS: [(f64, f64); 4] = [(0.8, 0.0), (0.5, 10.0), (0.2, 20.0), (0.0, 25.0)];

/// Soft circular light anchored somewhere in the box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialGlow {
    /// Tint of the glow
    pub color: Color,
    /// Where the glow settles
    pub anchor: Anchor,
}

impl RadialGlow {
    /// CSS `radial-gradient` placed at `at`.
    #[must_use]
    pub fn css_at(&self, at: Anchor) -> String {
        let stops: Vec<String> = GLOW_STOPS
            .iter()
            .map(|(alpha, stop)| format!("{} {}%", self.color.rgba(*alpha), css_number(*stop)))
            .collect();
        format!(
            "radial-gradient(circle at {}% {}%, {})",
            css_number(at.x),
            css_number(at.y),
            stops.join(", ")
        )
    }

    /// CSS `radial-gradient` at the glow's resting anchor.
    #[must_use]
    pub fn css(&self) -> String {
        self.css_at(self.anchor)
    }
}

/// Layered `background` value for several glows, swept out from the center.
///
/// `sweep` of 0.0 stacks every glow at the center; 1.0 places each on its anchor.
#[must_use]
pub fn glow_background(glows: &[RadialGlow], sweep: f64) -> String {
    let sweep = if sweep.is_finite() { sweep } else { 1.0 };
    glows
        .iter()
        .map(|glow| glow.css_at(Anchor::interpolate(&Anchor::CENTER, &glow.anchor, sweep)))
        .collect::<Vec<_>>()
        .join(", ")
}
