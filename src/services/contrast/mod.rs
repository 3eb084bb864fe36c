//! Foreground selection for text drawn on an event color.
//!
//! Uses the perceived-brightness weighting (0.299 R + 0.587 G + 0.114 B)
//! and switches to dark text only above a luminance of 0.6.

use crate::error::{CalendarError, CalendarResult};

pub const DARK_FOREGROUND: &str = "#000000";
pub const LIGHT_FOREGROUND: &str = "#ffffff";

// Luminance threshold 0.6, scaled by 1000 * 255 so the boundary compares exactly.
const DARK_TEXT_THRESHOLD_SCALED: u32 = 600 * 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RGB`, `#RRGGBB`, or either form without the leading `#`.
    pub fn from_hex(hex: &str) -> CalendarResult<Self> {
        let invalid = || CalendarError::InvalidColor(hex.to_string());
        let digits = hex.trim().strip_prefix('#').unwrap_or_else(|| hex.trim());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16).map_err(|_| invalid())
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Weighted brightness scaled by 1000 * 255.
    fn weighted_sum(&self) -> u32 {
        299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)
    }

    /// Perceived brightness in `0.0..=1.0`.
    pub fn luminance(&self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }
}

/// Pick black or white text for legibility on `hex_color`.
pub fn pick_foreground(hex_color: &str) -> CalendarResult<&'static str> {
    let rgb = Rgb::from_hex(hex_color)?;
    if rgb.weighted_sum() > DARK_TEXT_THRESHOLD_SCALED {
        Ok(DARK_FOREGROUND)
    } else {
        Ok(LIGHT_FOREGROUND)
    }
}

/// Like [`pick_foreground`] but falls back to light text on bad input.
pub fn pick_foreground_or_default(hex_color: &str) -> &'static str {
    pick_foreground(hex_color).unwrap_or_else(|err| {
        log::warn!("{}; using light foreground", err);
        LIGHT_FOREGROUND
    })
}
