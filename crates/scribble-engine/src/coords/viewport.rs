use super::{Rect, Vec2};

/// Backing size of the drawing surface in pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Maps a client pixel position into normalized device space.
///
/// `bounds` is where the surface sits on screen; `pixel_width`/`pixel_height` is
/// its backing size. The surface center maps to the origin, the left/right
/// edges to -1/+1 and, with Y flipped, the top/bottom edges to +1/-1.
///
/// Positions outside the surface produce values outside [-1, 1].
pub fn device_to_normalized(
    bounds: Rect,
    pixel_width: f32,
    pixel_height: f32,
    client_x: f32,
    client_y: f32,
) -> Vec2 {
    let half_w = pixel_width / 2.0;
    let half_h = pixel_height / 2.0;
    Vec2::new(
        ((client_x - bounds.left()) - half_w) / half_w,
        (half_h - (client_y - bounds.top())) / half_h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn map(x: f32, y: f32) -> Vec2 {
        device_to_normalized(Rect::new(0.0, 0.0, 800.0, 600.0), 800.0, 600.0, x, y)
    }

    #[test]
    fn center_maps_to_origin() {
        assert!(map(400.0, 300.0).approx_eq(Vec2::zero(), EPS));
    }

    #[test]
    fn corners_map_to_unit_square_with_y_up() {
        assert!(map(0.0, 0.0).approx_eq(Vec2::new(-1.0, 1.0), EPS));
        assert!(map(800.0, 600.0).approx_eq(Vec2::new(1.0, -1.0), EPS));
        assert!(map(800.0, 0.0).approx_eq(Vec2::new(1.0, 1.0), EPS));
    }

    #[test]
    fn bounds_offset_is_subtracted() {
        let p = device_to_normalized(Rect::new(100.0, 50.0, 200.0, 100.0), 200.0, 100.0, 200.0, 100.0);
        assert!(p.approx_eq(Vec2::zero(), EPS), "{p:?}");
    }

    #[test]
    fn outside_points_leave_the_unit_range() {
        let p = map(1200.0, -300.0);
        assert!(p.x > 1.0 && p.y > 1.0, "{p:?}");
    }
}
