//! Hue ramp used by the picker's vertical rainbow track.

/// Control point of the hue ramp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueStop {
    pub rate: f64,
    pub color: [f64; 3],
}

impl HueStop {
    pub const fn new(rate: f64, color: [f64; 3]) -> Self {
        Self { rate, color }
    }
}

const RED: [f64; 3] = [255.0, 0.0, 0.0];

/// Rainbow stops, top of the track to bottom.
///
/// The trailing `2.0` entry only bounds the search for rate 1.0; its color is
/// never interpolated towards.
pub static HUE_STOPS: [HueStop; 8] = [
    HueStop::new(0.0, RED),
    HueStop::new(0.17, [255.0, 255.0, 0.0]),
    HueStop::new(0.33, [0.0, 255.0, 0.0]),
    HueStop::new(0.5, [0.0, 255.0, 255.0]),
    HueStop::new(0.67, [0.0, 0.0, 255.0]),
    HueStop::new(0.83, [255.0, 0.0, 255.0]),
    HueStop::new(1.0, RED),
    HueStop::new(2.0, RED),
];

/// Index of the last real stop; everything after it is the sentinel
pub const LAST_STOP: usize = 6;

/// Adjacent stop pairs that make up the visible ramp (sentinel excluded)
pub fn segments() -> impl Iterator<Item = (HueStop, HueStop)> {
    HUE_STOPS[..=LAST_STOP].windows(2).map(|w| (w[0], w[1]))
}

/// Bracketing stops for `rate`: the first stop whose rate exceeds it, and
/// its predecessor.
pub fn bracket(rate: f64) -> (HueStop, HueStop) {
    let rate = clamp_rate(rate);
    let end = HUE_STOPS
        .iter()
        .position(|stop| rate < stop.rate)
        .unwrap_or(HUE_STOPS.len() - 1)
        .max(1);
    (HUE_STOPS[end - 1], HUE_STOPS[end])
}

/// Unrounded RGB of the ramp at `rate` (0.0 = top, 1.0 = bottom)
pub fn hue_at(rate: f64) -> [f64; 3] {
    let rate = clamp_rate(rate);
    let (start, end) = bracket(rate);
    // Past the last real stop the sentinel only bounds the bracket
    if start.rate >= 1.0 {
        return start.color;
    }
    let t = (rate - start.rate) / (end.rate - start.rate);
    let mut rgb = [0.0; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel = start.color[i] + (end.color[i] - start.color[i]) * t;
    }
    rgb
}

fn clamp_rate(rate: f64) -> f64 {
    if rate.is_finite() {
        rate.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
