use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;

/// One corner of the background quad: position in normalized units and its
/// texture coordinate (u right, v down).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

impl OverlayVertex {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.pos[0], self.pos[1])
    }
}

/// Triangle-strip order: top-left, bottom-left, top-right, bottom-right.
const INITIAL_CORNERS: [OverlayVertex; 4] = [
    OverlayVertex { pos: [-1.0, 1.0], uv: [0.0, 0.0] },
    OverlayVertex { pos: [-1.0, -1.0], uv: [0.0, 1.0] },
    OverlayVertex { pos: [1.0, 1.0], uv: [1.0, 0.0] },
    OverlayVertex { pos: [1.0, -1.0], uv: [1.0, 1.0] },
];

/// Background quad state: corner geometry plus which texture slot is shown.
///
/// `dirty` is set whenever the corners move so the renderer re-uploads them
/// only when needed.
#[derive(Debug, Clone)]
pub struct TextureOverlay {
    corners: [OverlayVertex; 4],
    slot_count: usize,
    active_slot: usize,
    dirty: bool,
}

impl TextureOverlay {
    /// Creates a full-surface quad with `slot_count` selectable textures.
    pub fn new(slot_count: usize) -> Self {
        Self {
            corners: INITIAL_CORNERS,
            slot_count,
            active_slot: 0,
            dirty: true,
        }
    }

    #[inline]
    pub fn corners(&self) -> &[OverlayVertex; 4] {
        &self.corners
    }

    #[inline]
    pub fn active_slot(&self) -> usize {
        self.active_slot
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Moves every corner away from (factor > 1) or toward (factor < 1) the
    /// anchor: `corner = (corner - anchor) * factor + anchor`.
    ///
    /// The anchor is in the quad's own frame, i.e. already mapped through the
    /// view's accumulated zoom; see `Sketch::zoom_about`.
    pub fn dilate(&mut self, anchor: Vec2, factor: f32) {
        for corner in &mut self.corners {
            let p = (corner.position() - anchor) * factor + anchor;
            corner.pos = [p.x, p.y];
        }
        self.dirty = true;
    }

    /// Selects the texture slot to draw. Returns `false` (and keeps the current
    /// slot) when `slot` is not loaded.
    pub fn select_slot(&mut self, slot: usize) -> bool {
        if slot >= self.slot_count {
            log::warn!("texture slot {slot} not loaded ({} available)", self.slot_count);
            return false;
        }
        self.active_slot = slot;
        true
    }

    /// Returns whether the corners changed since the last call, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    // ── dilate ────────────────────────────────────────────────────────────

    #[test]
    fn dilate_about_origin_scales_corners() {
        let mut o = TextureOverlay::new(1);
        o.dilate(Vec2::zero(), 2.0);
        assert_eq!(o.corners()[0].pos, [-2.0, 2.0]);
        assert_eq!(o.corners()[3].pos, [2.0, -2.0]);
    }

    #[test]
    fn dilate_keeps_anchor_fixed_and_uvs_untouched() {
        let mut o = TextureOverlay::new(1);
        let anchor = Vec2::new(-1.0, 1.0);
        o.dilate(anchor, 0.5);
        assert!(o.corners()[0].position().approx_eq(anchor, EPS));
        assert!(o.corners()[3].position().approx_eq(Vec2::new(0.0, 0.0), EPS));
        assert_eq!(o.corners()[3].uv, [1.0, 1.0]);
    }

    #[test]
    fn inverse_factors_cancel() {
        let mut o = TextureOverlay::new(1);
        let anchor = Vec2::new(0.3, -0.2);
        o.dilate(anchor, 1.25);
        o.dilate(anchor, 0.8);
        for (now, start) in o.corners().iter().zip(INITIAL_CORNERS.iter()) {
            assert!(now.position().approx_eq(start.position(), 1e-5));
        }
    }

    // ── dirty ─────────────────────────────────────────────────────────────

    #[test]
    fn dirty_is_consumed_once() {
        let mut o = TextureOverlay::new(1);
        assert!(o.take_dirty());
        assert!(!o.take_dirty());
        o.dilate(Vec2::zero(), 1.1);
        assert!(o.take_dirty());
    }

    // ── slots ─────────────────────────────────────────────────────────────

    #[test]
    fn selecting_missing_slot_is_ignored() {
        let mut o = TextureOverlay::new(2);
        assert!(o.select_slot(1));
        assert!(!o.select_slot(2));
        assert_eq!(o.active_slot(), 1);
    }
}
