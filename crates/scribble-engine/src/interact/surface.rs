use crate::coords::{device_to_normalized, Rect, Vec2, Viewport};

/// Where the drawing surface sits on screen and how large its backing store is.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceGeometry {
    pub bounds: Rect,
    pub pixels: Viewport,
}

impl SurfaceGeometry {
    /// A surface filling a window whose client area is `width` x `height`,
    /// with pointer coordinates in the same units as the backing store.
    pub fn filling(width: f32, height: f32) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
            pixels: Viewport::new(width, height),
        }
    }

    #[inline]
    pub fn contains(&self, client: Vec2) -> bool {
        self.bounds.contains(client)
    }

    #[inline]
    pub fn to_normalized(&self, client: Vec2) -> Vec2 {
        device_to_normalized(self.bounds, self.pixels.width, self.pixels.height, client.x, client.y)
    }
}
