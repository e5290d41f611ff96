//! Where to put the popup relative to its field.

use scp_core::{Point, Rect, Size};

/// Top-left corner for a popup of `popup` size anchored to `target`, given
/// the visible `viewport` in the same page coordinates.
///
/// Horizontally the popup aligns with the field unless the field starts left
/// of the viewport or too far right for the popup to fit. Vertically it goes
/// below the field near the top of the viewport, above it otherwise.
pub fn popup_position(target: &Rect, popup: Size, viewport: &Rect) -> Point {
    let x_min = viewport.x;
    let x_max = viewport.x + viewport.width;
    let y_min = viewport.y;

    let left = if target.x < x_min {
        x_min + popup.width * 0.04
    } else if target.x <= x_min + popup.width * 1.04 {
        target.x
    } else {
        x_max - popup.width * 1.08
    };

    let top = if target.y <= y_min + popup.height * 1.04 {
        target.y + target.height + popup.height * 0.04
    } else {
        target.y - popup.height * 1.08
    };

    Point::new(left, top)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POPUP: Size = Size {
        width: 300.0,
        height: 200.0,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1024.0, 768.0)
    }

    #[test]
    fn test_below_field_near_top() {
        let target = Rect::new(40.0, 30.0, 120.0, 24.0);
        let pos = popup_position(&target, POPUP, &viewport());
        assert_eq!(pos.x, 40.0);
        assert!(close(pos.y, 30.0 + 24.0 + 8.0));
    }

    #[test]
    fn test_above_field_lower_down() {
        let target = Rect::new(40.0, 500.0, 120.0, 24.0);
        let pos = popup_position(&target, POPUP, &viewport());
        assert!(close(pos.y, 500.0 - 216.0));
    }

    #[test]
    fn test_horizontal_edges() {
        let scrolled = Rect::new(100.0, 0.0, 1024.0, 768.0);
        let target = Rect::new(50.0, 10.0, 120.0, 24.0);
        assert!(close(popup_position(&target, POPUP, &scrolled).x, 112.0));

        let target = Rect::new(800.0, 10.0, 120.0, 24.0);
        assert!(close(popup_position(&target, POPUP, &viewport()).x, 1024.0 - 324.0));
    }
}
