//! Colors and the stroke palette.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CanvasError, CanvasResult};

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque black, the surface background.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white, the initial stroke color.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Whether the alpha channel is fully opaque.
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Channels as an `[r, g, b, a]` array.
    #[must_use]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from an `[r, g, b, a]` array.
    #[must_use]
    pub fn from_rgba(rgba: [u8; 4]) -> Self {
        Self {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
        }
    }

    /// Parse a CSS-style hex color: `#rgb`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidColor`] if the string is not a hex color.
    pub fn from_hex(input: &str) -> CanvasResult<Self> {
        let invalid = || CanvasError::InvalidColor(input.to_string());
        let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let mut out = [255u8; 4];
                for (slot, c) in out.iter_mut().zip(hex.chars()) {
                    *slot = channel(&c.to_string())? * 17;
                }
                Ok(Self::from_rgba(out))
            }
            6 | 8 => {
                let mut out = [255u8; 4];
                for (slot, pair) in out.iter_mut().zip(hex.as_bytes().chunks(2)) {
                    let pair = std::str::from_utf8(pair).map_err(|_| invalid())?;
                    *slot = channel(pair)?;
                }
                Ok(Self::from_rgba(out))
            }
            _ => Err(invalid()),
        }
    }

    /// Format as lowercase `#rrggbb`, or `#rrggbbaa` when translucent.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = CanvasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// The swatches offered to the user, in display order.
pub const SWATCHES: [Color; 11] = [
    Color::rgb(0xff, 0xff, 0xff),
    Color::rgb(0xee, 0x33, 0x33),
    Color::rgb(0xe6, 0x49, 0x80),
    Color::rgb(0xbe, 0x4b, 0xdb),
    Color::rgb(0x89, 0x32, 0x00),
    Color::rgb(0x22, 0x8b, 0xe6),
    Color::rgb(0x33, 0x33, 0xee),
    Color::rgb(0x40, 0xc0, 0x57),
    Color::rgb(0x00, 0xaa, 0x00),
    Color::rgb(0xfa, 0xb0, 0x05),
    Color::rgb(0xfd, 0x7e, 0x14),
];

/// The active stroke color, chosen from a fixed set of swatches.
///
/// Changing the selection never repaints anything; it only decides the color
/// of the next stroke to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    swatches: Vec<Color>,
    selected: Color,
}

impl Palette {
    /// Create a palette over the given swatches. The first swatch is selected.
    ///
    /// An empty swatch list falls back to the default swatches.
    #[must_use]
    pub fn new(swatches: Vec<Color>) -> Self {
        let swatches = if swatches.is_empty() {
            SWATCHES.to_vec()
        } else {
            swatches
        };
        let selected = swatches[0];
        Self { swatches, selected }
    }

    /// The offered swatches.
    #[must_use]
    pub fn swatches(&self) -> &[Color] {
        &self.swatches
    }

    /// The current selection.
    #[must_use]
    pub fn selected(&self) -> Color {
        self.selected
    }

    /// Select a color.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidColorSelection`] if the color is not one
    /// of the offered swatches. The previous selection is kept.
    pub fn select(&mut self, color: Color) -> CanvasResult<()> {
        if !self.swatches.contains(&color) {
            return Err(CanvasError::InvalidColorSelection(color.to_hex()));
        }
        tracing::debug!("Palette selection: {} -> {}", self.selected, color);
        self.selected = color;
        Ok(())
    }

    /// Select the swatch at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::SwatchOutOfRange`] if the index is past the end.
    pub fn select_index(&mut self, index: usize) -> CanvasResult<()> {
        let color = *self
            .swatches
            .get(index)
            .ok_or(CanvasError::SwatchOutOfRange {
                index,
                len: self.swatches.len(),
            })?;
        self.select(color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(SWATCHES.to_vec())
    }
}
