//! Track identifiers and the popup's pointer rates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the picker's draggable rails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackId {
    /// Vertical rainbow ramp
    Hue,
    /// Saturation/value square
    Square,
    /// Vertical transparency ramp
    Alpha,
}

impl TrackId {
    pub const ALL: [TrackId; 3] = [TrackId::Hue, TrackId::Square, TrackId::Alpha];

    /// Whether the track reads the horizontal pointer axis
    pub fn uses_x(&self) -> bool {
        matches!(self, TrackId::Square)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackId::Hue => "hue",
            TrackId::Square => "square",
            TrackId::Alpha => "alpha",
        }
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized pointer positions of every track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerRates {
    pub hue: f64,
    pub square_x: f64,
    pub square_y: f64,
    pub alpha: f64,
}

impl PointerRates {
    pub fn new(hue: f64, square_x: f64, square_y: f64, alpha: f64) -> Self {
        Self {
            hue,
            square_x,
            square_y,
            alpha,
        }
    }
}

impl Default for PointerRates {
    /// Handles at the top of both ramps and the top-right corner of the
    /// square, which maps to opaque red.
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.0, 0.0)
    }
}

/// Round a rate to the 2-decimal granularity of the tracks
pub fn round_rate(rate: f64) -> f64 {
    (rate * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_rate() {
        assert_eq!(round_rate(0.123), 0.12);
        assert_eq!(round_rate(0.999), 1.0);
        assert_eq!(round_rate(0.0), 0.0);
    }

    #[test]
    fn test_only_square_uses_x() {
        assert!(TrackId::Square.uses_x());
        assert!(!TrackId::Hue.uses_x());
        assert!(!TrackId::Alpha.uses_x());
    }

    #[test]
    fn test_track_id_serialization() {
        let json = serde_json::to_string(&TrackId::Square).unwrap();
        assert_eq!(json, "\"square\"");
        assert_eq!(TrackId::Alpha.to_string(), "alpha");
    }
}
