//! Display colors for chart slices and bars

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Build a color from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// The color as a `0xRRGGBB` value
    pub const fn to_hex(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// The five-color cycle used for category slices
pub const PALETTE: [Rgb; 5] = [
    Rgb::from_hex(0x4CAF50), // green
    Rgb::from_hex(0xFF9800), // orange
    Rgb::from_hex(0x2196F3), // blue
    Rgb::from_hex(0xE91E63), // pink
    Rgb::from_hex(0x9C27B0), // purple
];

/// Palette entry for a position, wrapping around
pub fn palette_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}
