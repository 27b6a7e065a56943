use crate::coords::{Mat4, Vec2};

use super::{Cached, TransformError};

/// The composed 2D view transform of the single drawable.
///
/// State:
/// - `angle`: accumulated rotation in radians (counter-clockwise)
/// - `translation`: accumulated pan offset in normalized units
/// - `anchored_scale`: product of every "scale about an anchor" zoom so far
///
/// The forward (model → normalized) matrix is
/// `rotation_translation(angle, translation) * anchored_scale` and is cached.
/// Every mutator invalidates the cache; [`ViewTransform::forward`] rebuilds it
/// on the next read.
#[derive(Debug, Clone)]
pub struct ViewTransform {
    angle: f32,
    translation: Vec2,
    anchored_scale: Mat4,
    forward: Cached<Mat4>,
}

impl ViewTransform {
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            translation: Vec2::zero(),
            anchored_scale: Mat4::IDENTITY,
            forward: Cached::stale(Mat4::IDENTITY),
        }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    #[inline]
    pub fn anchored_scale(&self) -> &Mat4 {
        &self.anchored_scale
    }

    /// Rotation and pan without the accumulated zoom.
    ///
    /// The background quad zooms by moving its own corners, so it is drawn
    /// through this matrix rather than [`ViewTransform::forward`].
    pub fn rigid(&self) -> Mat4 {
        Mat4::rotation_translation(self.angle, self.translation)
    }

    /// True when the cached forward matrix must be rebuilt before use.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.forward.is_stale()
    }

    // ── mutators ──────────────────────────────────────────────────────────

    pub fn rotate_by(&mut self, delta: f32) {
        self.angle += delta;
        self.forward.invalidate();
    }

    /// Pans by a pointer delta given in device pixels.
    ///
    /// Device Y grows downward while normalized Y grows upward, so the Y
    /// component is subtracted.
    pub fn pan_by(&mut self, delta_pixels: Vec2, sensitivity: f32) {
        self.translation.x += delta_pixels.x * sensitivity;
        self.translation.y -= delta_pixels.y * sensitivity;
        self.forward.invalidate();
    }

    /// Folds a uniform scale about `anchor` into the accumulated zoom.
    ///
    /// The new step is applied to model points before the zooms already
    /// accumulated, so the model point at `anchor` keeps its on-screen position
    /// and zooms about different anchors compound instead of collapsing into a
    /// single factor.
    ///
    /// `factor` must be finite and positive; a zero factor leaves the transform
    /// singular and every later [`ViewTransform::to_model_space`] fails.
    pub fn zoom_about(&mut self, anchor: Vec2, factor: f32) {
        self.anchored_scale = self.anchored_scale * Mat4::scale_about(anchor, factor);
        self.forward.invalidate();
    }

    // ── forward ───────────────────────────────────────────────────────────

    /// Rebuilds the cached forward matrix regardless of staleness.
    pub fn recompute_forward(&mut self) -> Mat4 {
        let m = compose(self.angle, self.translation, &self.anchored_scale);
        *self.forward.refresh(m)
    }

    /// Current forward matrix, rebuilt first if any mutation happened since the
    /// last read.
    pub fn forward(&mut self) -> Mat4 {
        let (angle, translation, scale) = (self.angle, self.translation, self.anchored_scale);
        *self.forward.get_or_update(|| {
            log::trace!(
                "forward recomputed: angle={angle} translation=({}, {})",
                translation.x,
                translation.y
            );
            compose(angle, translation, &scale)
        })
    }

    /// Maps a model-space point into normalized space.
    pub fn forward_apply(&mut self, model_point: Vec2) -> Vec2 {
        self.forward().transform_point(model_point)
    }

    // ── inverse ───────────────────────────────────────────────────────────

    /// Inverse of the current forward matrix.
    ///
    /// While no zoom has been folded in, the transform is a rigid motion and
    /// its inverse is built directly from `-angle` and the back-rotated
    /// translation. Any zoom switches to the general matrix inverse.
    pub fn inverse(&mut self) -> Result<Mat4, TransformError> {
        if self.anchored_scale.is_identity() {
            return Ok(rigid_inverse(self.angle, self.translation));
        }

        let forward = self.forward();
        forward.inverse().ok_or(TransformError::Singular {
            determinant: forward.planar_determinant(),
        })
    }

    /// Maps a normalized device point back into model space.
    pub fn to_model_space(&mut self, device_point: Vec2) -> Result<Vec2, TransformError> {
        let p = self.inverse()?.transform_point(device_point);
        if p.is_finite() { Ok(p) } else { Err(TransformError::NonFinite) }
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

fn compose(angle: f32, translation: Vec2, anchored_scale: &Mat4) -> Mat4 {
    Mat4::rotation_translation(angle, translation) * *anchored_scale
}

/// Inverse of `rotation_translation(angle, translation)`.
///
/// Only valid while no scale is part of the forward transform.
fn rigid_inverse(angle: f32, translation: Vec2) -> Mat4 {
    let back = Mat4::rotation_translation(-angle, Vec2::zero()).transform_point(-translation);
    Mat4::rotation_translation(-angle, back)
}
