use crate::coords::Vec2;
use crate::overlay::TextureOverlay;
use crate::shapes::{radial_color, PolylineStore};
use crate::transform::{TransformError, ViewTransform};

/// The single drawable: its view transform, the strokes drawn so far and the
/// textured background.
///
/// Fields are public so the render stage can borrow them independently.
#[derive(Debug, Clone)]
pub struct Sketch {
    pub view: ViewTransform,
    pub shapes: PolylineStore,
    pub overlay: TextureOverlay,
}

impl Sketch {
    /// Identity view, no strokes, and a background with `texture_slots` slots.
    pub fn new(texture_slots: usize) -> Self {
        Self {
            view: ViewTransform::new(),
            shapes: PolylineStore::new(),
            overlay: TextureOverlay::new(texture_slots),
        }
    }

    /// Stores a pointer sample given in normalized device space.
    ///
    /// The sample is mapped into model space first so later view changes move
    /// it along with everything else. On error nothing is stored.
    pub fn add_point(&mut self, normalized: Vec2) -> Result<Vec2, TransformError> {
        let model = self.view.to_model_space(normalized)?;
        self.shapes.append_point(model, radial_color(normalized));
        Ok(model)
    }

    /// Closes the current stroke; the next point starts a new polyline.
    pub fn end_stroke(&mut self) {
        self.shapes.begin_polyline();
    }

    /// Zooms shapes and background together about the same anchor.
    ///
    /// The overlay corners hold the initial quad mapped through the view's
    /// accumulated zoom `A`. The view appends the step as `A * S(anchor)`,
    /// which equals `S(A(anchor)) * A` because `A` is a uniform scale plus a
    /// translation, so the corners dilate about `A(anchor)`.
    pub fn zoom_about(&mut self, anchor: Vec2, factor: f32) {
        let overlay_anchor = self.view.anchored_scale().transform_point(anchor);
        self.view.zoom_about(anchor, factor);
        self.overlay.dilate(overlay_anchor, factor);
    }
}
