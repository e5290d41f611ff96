//! Mapping between pointer rates and colors.
//!
//! Forward: hue rate picks a base color off the ramp, the square tints it
//! towards white (x) and black (y), the alpha ramp sets opacity.
//!
//! Inverse: only the hue and alpha rates are recovered. The square position
//! is left alone, so after a programmatic value change the square handle may
//! not match the color it would produce.

use scp_types::hue::{self, HueStop};
use scp_types::{round_rate, ColorFormatError, PointerRates, Rgba};

const EPSILON: f64 = 1e-6;

/// Base color of the hue ramp at `rate`
pub fn hue_color(rate: f64) -> [f64; 3] {
    hue::hue_at(rate)
}

/// Tint a hue towards white by `1 - x`, then shade towards black by `y`
pub fn apply_square(rgb: [f64; 3], x: f64, y: f64) -> [f64; 3] {
    rgb.map(|c| {
        let tinted = c + (255.0 - c) * (1.0 - x);
        tinted - tinted * y
    })
}

/// Opacity for an alpha-track rate: 1.0 at the top, 0.0 at the bottom
///
/// Truncates to whole hundredths. Rates recovered from a color are already
/// two-decimal, so `1 - rate` must land on the same hundredth it came from.
pub fn alpha_from_rate(rate: f64) -> f64 {
    let hundredths = ((1.0 - rate) * 100.0 + EPSILON).floor();
    (hundredths / 100.0).clamp(0.0, 1.0)
}

/// Color for the current pointer rates
///
/// With `transparency` off the alpha track is ignored and the result is
/// always opaque. Color channels are rounded up to whole numbers.
pub fn pointer_to_color(rates: &PointerRates, transparency: bool) -> Rgba {
    let base = hue_color(rates.hue);
    let rgb = apply_square(base, rates.square_x, rates.square_y);
    let alpha = if transparency {
        alpha_from_rate(rates.alpha)
    } else {
        1.0
    };
    Rgba::from_rgb(rgb, alpha).ceil()
}

/// Pointer rates recovered from a color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveredPointers {
    /// `None` for achromatic colors, which sit on every hue
    pub hue: Option<f64>,
    pub alpha: f64,
}

impl RecoveredPointers {
    /// Overlay onto `rates`, keeping the square position as it was
    pub fn apply_to(&self, rates: PointerRates) -> PointerRates {
        PointerRates {
            hue: self.hue.unwrap_or(rates.hue),
            alpha: self.alpha,
            ..rates
        }
    }
}

/// Recover hue and alpha rates from a color
pub fn color_to_pointers(color: &Rgba) -> RecoveredPointers {
    RecoveredPointers {
        hue: hue_rate(color.rgb()),
        alpha: round_rate((1.0 - color.a).max(0.0).min(1.0)),
    }
}

/// Parse `value` and recover its pointer rates
pub fn value_to_pointers(value: &str) -> Result<RecoveredPointers, ColorFormatError> {
    let color = Rgba::parse(value)?;
    Ok(color_to_pointers(&color))
}

/// Position on the hue ramp for an RGB triple.
///
/// Subtracting the smallest channel strips the square's white tint; scaling
/// the remainder so its largest channel is 255 strips the black shade. The
/// result lies on one ramp segment, whose varying channels give the progress.
/// Rounded inputs make this approximate.
pub fn hue_rate(rgb: [f64; 3]) -> Option<f64> {
    let min = rgb.iter().copied().fold(f64::INFINITY, f64::min);
    let residual = rgb.map(|c| c - min);
    let max = residual.iter().copied().fold(0.0, f64::max);
    if max <= EPSILON {
        return None;
    }
    let normalized = residual.map(|c| c * 255.0 / max);

    hue::segments()
        .find(|(start, end)| bounds(start, end, &normalized))
        .map(|(start, end)| {
            let progress = progress(&start, &end, &normalized);
            round_rate(start.rate + (end.rate - start.rate) * progress)
        })
}

fn bounds(start: &HueStop, end: &HueStop, rgb: &[f64; 3]) -> bool {
    (0..3).all(|i| {
        let lo = start.color[i].min(end.color[i]);
        let hi = start.color[i].max(end.color[i]);
        rgb[i] >= lo - EPSILON && rgb[i] <= hi + EPSILON
    })
}

fn progress(start: &HueStop, end: &HueStop, rgb: &[f64; 3]) -> f64 {
    let fractions: Vec<f64> = (0..3)
        .filter(|&i| start.color[i] != end.color[i])
        .map(|i| (rgb[i] - start.color[i]) / (end.color[i] - start.color[i]))
        .collect();
    if fractions.is_empty() {
        return 0.0;
    }
    let mean = fractions.iter().sum::<f64>() / fractions.len() as f64;
    mean.max(0.0).min(1.0)
}
