//! Draw color conversion for field groups.
//!
//! Group colors are persisted as `rgba(r,g,b,a)` strings at reduced opacity.
//! Color pickers deal in `#rrggbb`, so input is converted before storage and
//! converted back for editing and chart fills.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opacity applied to group colors when they are stored.
pub const DEFAULT_GROUP_OPACITY: f64 = 0.2;

/// Hex rendering used when a stored color cannot be read.
pub const FALLBACK_HEX: &str = "#000";

lazy_static::lazy_static! {
    static ref HEX_COLOR_REGEX: regex::Regex =
        regex::Regex::new(r"(?i)^#?([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})$").unwrap();
    static ref RGBA_COLOR_REGEX: regex::Regex = regex::Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(\d*\.?\d+)\s*)?\)$"
    )
    .unwrap();
    static ref DIGITS_REGEX: regex::Regex = regex::Regex::new(r"\d+").unwrap();
}

/// Error type for color parsing.
#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
    #[error("Invalid rgba color: {0}")]
    InvalidRgba(String),
    #[error("Opacity must be between 0 and 1, got {0}")]
    InvalidOpacity(f64),
}

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parses `#rrggbb` (leading `#` optional, case-insensitive).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let caps = HEX_COLOR_REGEX.captures(hex.trim())?;
    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
    Some(Rgb {
        r: channel(1)?,
        g: channel(2)?,
        b: channel(3)?,
    })
}

/// Converts picker input into the persisted `rgba(r,g,b,a)` form.
pub fn hex_to_rgba(hex: &str, opacity: f64) -> Result<String, ColorError> {
    DrawColor::from_hex(hex, opacity).map(|c| c.to_string())
}

/// Converts a persisted color back to `#rrggbb`.
///
/// Only the first three numbers are read, so both `rgb(...)` and `rgba(...)`
/// work. Empty or unreadable input renders as [`FALLBACK_HEX`].
pub fn rgba_to_hex(rgba: &str) -> String {
    if rgba.is_empty() {
        return FALLBACK_HEX.to_string();
    }
    let channels: Vec<u8> = DIGITS_REGEX
        .find_iter(rgba)
        .take(3)
        .filter_map(|m| m.as_str().parse::<u8>().ok())
        .collect();
    match channels.as_slice() {
        [r, g, b] => format!("#{:02x}{:02x}{:02x}", r, g, b),
        _ => FALLBACK_HEX.to_string(),
    }
}

/// A parsed group draw color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DrawColor {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl DrawColor {
    /// Builds a color from picker input at the given opacity.
    pub fn from_hex(hex: &str, opacity: f64) -> Result<Self, ColorError> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ColorError::InvalidOpacity(opacity));
        }
        let rgb = hex_to_rgb(hex).ok_or_else(|| ColorError::InvalidHex(hex.to_string()))?;
        Ok(Self { rgb, alpha: opacity })
    }

    /// Returns the `#rrggbb` form, dropping alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb.r, self.rgb.g, self.rgb.b)
    }
}

impl FromStr for DrawColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidRgba(s.to_string());
        let caps = RGBA_COLOR_REGEX.captures(s.trim()).ok_or_else(invalid)?;
        let channel = |i: usize| caps[i].parse::<u8>().map_err(|_| invalid());
        let alpha = match caps.get(4) {
            Some(a) => a.as_str().parse::<f64>().map_err(|_| invalid())?,
            None => 1.0,
        };
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ColorError::InvalidOpacity(alpha));
        }
        Ok(Self {
            rgb: Rgb {
                r: channel(1)?,
                g: channel(2)?,
                b: channel(3)?,
            },
            alpha,
        })
    }
}

impl fmt::Display for DrawColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({},{},{},{})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

impl TryFrom<String> for DrawColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DrawColor> for String {
    fn from(color: DrawColor) -> Self {
        color.to_string()
    }
}
