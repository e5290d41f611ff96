//! Track geometry: where each rail sits on screen and how big its handle is.
//!
//! The drag controller never touches the view directly; it asks a
//! [`TrackGeometry`] implementation for rectangles and handle sizes.

use scp_types::{round_rate, TrackId};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Bounding boxes and handle sizes supplied by the view
pub trait TrackGeometry {
    /// Bounding box of the track's range element
    fn bounds(&self, track: TrackId) -> Rect;

    /// Size of the track's draggable handle
    fn handle_size(&self, track: TrackId) -> Size;
}

/// Geometry with fixed rectangles, for hosts without a live layout
#[derive(Debug, Clone, PartialEq)]
pub struct FixedGeometry {
    hue: (Rect, Size),
    square: (Rect, Size),
    alpha: (Rect, Size),
}

impl FixedGeometry {
    pub fn new(hue: (Rect, Size), square: (Rect, Size), alpha: (Rect, Size)) -> Self {
        Self { hue, square, alpha }
    }

    /// Stock popup layout anchored at `origin`: a 200x160 square followed by
    /// two 16x160 ramps, 8px apart.
    pub fn standard(origin: Point) -> Self {
        let square = Rect::new(origin.x, origin.y, 200.0, 160.0);
        let hue = Rect::new(origin.x + 208.0, origin.y, 16.0, 160.0);
        let alpha = Rect::new(origin.x + 232.0, origin.y, 16.0, 160.0);
        Self::new(
            (hue, Size::new(16.0, 8.0)),
            (square, Size::new(10.0, 10.0)),
            (alpha, Size::new(16.0, 8.0)),
        )
    }

    fn entry(&self, track: TrackId) -> &(Rect, Size) {
        match track {
            TrackId::Hue => &self.hue,
            TrackId::Square => &self.square,
            TrackId::Alpha => &self.alpha,
        }
    }
}

impl Default for FixedGeometry {
    fn default() -> Self {
        Self::standard(Point::default())
    }
}

impl TrackGeometry for FixedGeometry {
    fn bounds(&self, track: TrackId) -> Rect {
        self.entry(track).0
    }

    fn handle_size(&self, track: TrackId) -> Size {
        self.entry(track).1
    }
}

/// Handle offset along one axis for a pointer at `pos`.
///
/// The result is the handle's leading edge relative to the track start,
/// bounded to `[-handle/2, length - handle/2]` so the handle's center never
/// leaves the track.
pub fn clamp_offset(pos: f64, start: f64, length: f64, handle: f64) -> f64 {
    let half = handle / 2.0;
    (pos - (start + half)).max(-half).min(length - half)
}

/// Rate (0..=1, 2 decimals) for a handle offset along one axis
pub fn offset_to_rate(offset: f64, length: f64, handle: f64) -> f64 {
    let span = length - handle / 2.0;
    if span <= 0.0 || !span.is_finite() {
        return 0.0;
    }
    round_rate(offset.max(0.0).min(span) / span)
}

/// Handle offset that reads back as `rate`
pub fn rate_to_offset(rate: f64, length: f64, handle: f64) -> f64 {
    let span = (length - handle / 2.0).max(0.0);
    rate.max(0.0).min(1.0) * span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_offset_bounds() {
        // 160px track, 8px handle
        assert_eq!(clamp_offset(-1000.0, 0.0, 160.0, 8.0), -4.0);
        assert_eq!(clamp_offset(1000.0, 0.0, 160.0, 8.0), 156.0);
        assert_eq!(clamp_offset(54.0, 10.0, 160.0, 8.0), 40.0);
    }

    #[test]
    fn test_offset_to_rate() {
        assert_eq!(offset_to_rate(-4.0, 160.0, 8.0), 0.0);
        assert_eq!(offset_to_rate(156.0, 160.0, 8.0), 1.0);
        assert_eq!(offset_to_rate(78.0, 160.0, 8.0), 0.5);
    }

    #[test]
    fn test_degenerate_track_reads_zero() {
        assert_eq!(offset_to_rate(3.0, 0.0, 8.0), 0.0);
        assert_eq!(rate_to_offset(0.5, 0.0, 8.0), 0.0);
    }

    #[test]
    fn test_rate_offset_round_trip() {
        for step in 0..=100 {
            let rate = step as f64 / 100.0;
            let offset = rate_to_offset(rate, 200.0, 10.0);
            assert_eq!(offset_to_rate(offset, 200.0, 10.0), rate);
        }
    }

    #[test]
    fn test_standard_layout() {
        let geometry = FixedGeometry::standard(Point::new(10.0, 20.0));
        assert_eq!(geometry.bounds(TrackId::Square), Rect::new(10.0, 20.0, 200.0, 160.0));
        assert_eq!(geometry.bounds(TrackId::Alpha).x, 242.0);
        assert_eq!(geometry.handle_size(TrackId::Hue), Size::new(16.0, 8.0));
    }
}
