//! RGBA color value and its text codec.
//!
//! Parsing accepts six grammars (`#rgb`, `#rrggbb`, `#argb`, `#aarrggbb`,
//! `rgb(r,g,b)` and `rgba(r,g,b,a)`); formatting always produces the shortest
//! canonical form, `#rrggbb` for opaque colors and `rgba(r,g,b,a)` otherwise.

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static HEX_RGB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-f])([0-9a-f])([0-9a-f])$").expect("Invalid regex")
});
static HEX_RRGGBB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})$").expect("Invalid regex")
});
static HEX_ARGB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-f])([0-9a-f])([0-9a-f])([0-9a-f])$").expect("Invalid regex")
});
static HEX_AARRGGBB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})$").expect("Invalid regex")
});
static FUNC_RGB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgb\(([0-9.]+),([0-9.]+),([0-9.]+)\)$").expect("Invalid regex")
});
static FUNC_RGBA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba\(([0-9.]+),([0-9.]+),([0-9.]+),([0-9.]+)\)$").expect("Invalid regex")
});

/// Error raised when a color string cannot be turned into an [`Rgba`].
///
/// Every variant carries the offending input exactly as the caller passed it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorFormatError {
    #[error("unrecognized color format: {0:?}")]
    UnknownFormat(String),
    #[error("invalid channel value in color: {0:?}")]
    InvalidChannel(String),
    #[error("color channel out of range: {0:?}")]
    OutOfRange(String),
}

impl ColorFormatError {
    /// The input string that failed to parse
    pub fn input(&self) -> &str {
        match self {
            Self::UnknownFormat(s) | Self::InvalidChannel(s) | Self::OutOfRange(s) => s,
        }
    }
}

/// RGBA color: r, g, b in 0..=255, a in 0..=1
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn from_rgb(rgb: [f64; 3], a: f64) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], a)
    }

    pub fn rgb(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 1.0
    }

    /// Round every color channel up to the next integer
    pub fn ceil(&self) -> Self {
        Self::new(self.r.ceil(), self.g.ceil(), self.b.ceil(), self.a)
    }

    /// Integer channels as they appear in formatted output
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (channel_to_u8(self.r), channel_to_u8(self.g), channel_to_u8(self.b))
    }

    /// Format as `#rrggbb`, ignoring alpha
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Parse any of the supported color grammars
    ///
    /// The input is lowercased and stripped of whitespace first. Note that the
    /// short forms `#rgb` and `#argb` read each hex digit as a literal 0-15
    /// channel value; `#f00` is `(15, 0, 0)`, not `(255, 0, 0)`.
    pub fn parse(input: &str) -> Result<Self, ColorFormatError> {
        let value: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        let hex = |caps: &Captures, i: usize| -> Result<f64, ColorFormatError> {
            u8::from_str_radix(&caps[i], 16)
                .map(f64::from)
                .map_err(|_| ColorFormatError::InvalidChannel(input.to_string()))
        };
        let dec = |caps: &Captures, i: usize| -> Result<f64, ColorFormatError> {
            caps[i]
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ColorFormatError::InvalidChannel(input.to_string()))
        };

        let rgba = if let Some(caps) = HEX_RGB.captures(&value) {
            Self::opaque(hex(&caps, 1)?, hex(&caps, 2)?, hex(&caps, 3)?)
        } else if let Some(caps) = HEX_RRGGBB.captures(&value) {
            Self::opaque(hex(&caps, 1)?, hex(&caps, 2)?, hex(&caps, 3)?)
        } else if let Some(caps) = HEX_ARGB.captures(&value) {
            let a = hex(&caps, 1)? / 255.0;
            Self::new(hex(&caps, 2)?, hex(&caps, 3)?, hex(&caps, 4)?, a)
        } else if let Some(caps) = HEX_AARRGGBB.captures(&value) {
            let a = hex(&caps, 1)? / 255.0;
            Self::new(hex(&caps, 2)?, hex(&caps, 3)?, hex(&caps, 4)?, a)
        } else if let Some(caps) = FUNC_RGB.captures(&value) {
            Self::opaque(dec(&caps, 1)?, dec(&caps, 2)?, dec(&caps, 3)?)
        } else if let Some(caps) = FUNC_RGBA.captures(&value) {
            Self::new(dec(&caps, 1)?, dec(&caps, 2)?, dec(&caps, 3)?, dec(&caps, 4)?)
        } else {
            debug!("No color grammar matches {:?}", input);
            return Err(ColorFormatError::UnknownFormat(input.to_string()));
        };

        let in_range = rgba.rgb().iter().all(|c| (0.0..=255.0).contains(c))
            && (0.0..=1.0).contains(&rgba.a);
        if !in_range {
            debug!("Color {:?} has channels out of range: {:?}", input, rgba);
            return Err(ColorFormatError::OutOfRange(input.to_string()));
        }

        Ok(rgba)
    }
}

fn channel_to_u8(v: f64) -> u8 {
    v.ceil().clamp(0.0, 255.0) as u8
}

impl Default for Rgba {
    fn default() -> Self {
        Self::opaque(0.0, 0.0, 0.0)
    }
}

impl FromStr for Rgba {
    type Err = ColorFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            return f.write_str(&self.to_hex());
        }
        let (r, g, b) = self.to_rgb8();
        write!(f, "rgba({},{},{},{})", r, g, b, self.a.clamp(0.0, 1.0))
    }
}
