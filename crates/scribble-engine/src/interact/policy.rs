use crate::coords::Vec2;
use crate::input::{ButtonState, InputEvent, Key, MouseButton};
use crate::sketch::Sketch;
use crate::transform::TransformError;

use super::{InteractionConfig, SurfaceGeometry};

/// Which drags are in progress.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DragState {
    /// Left button held after a press inside the surface.
    pub drawing: bool,
    /// Right button held.
    pub panning: bool,
}

/// Effect of one input event on the sketch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Gesture {
    /// Nothing changed.
    Ignored,
    /// A point was appended at this model-space position.
    PointAdded(Vec2),
    /// The current stroke was closed.
    StrokeEnded,
    Panned,
    Rotated,
    Zoomed { factor: f32 },
    TextureSelected(usize),
    /// The event would have added a point but the view cannot be inverted.
    Dropped(TransformError),
}

/// Stateful interpreter from input events to sketch mutations.
///
/// Holds the per-button drag state and the previous pointer position used to
/// compute pan deltas.
#[derive(Debug, Clone)]
pub struct InteractionPolicy {
    config: InteractionConfig,
    drag: DragState,
    last_pointer: Option<Vec2>,
}

impl InteractionPolicy {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            drag: DragState::default(),
            last_pointer: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    #[inline]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Applies one event to `sketch`. Runs to completion; the next render sees
    /// the full effect.
    pub fn handle(&mut self, ev: &InputEvent, surface: &SurfaceGeometry, sketch: &mut Sketch) -> Gesture {
        let gesture = match *ev {
            InputEvent::PointerButton { button, state, x, y } => {
                self.on_button(button, state, Vec2::new(x, y), surface, sketch)
            }
            InputEvent::PointerMoved { x, y } => self.on_move(Vec2::new(x, y), surface, sketch),
            InputEvent::Wheel { delta, x, y } => {
                let dy = delta.vertical();
                if dy == 0.0 || !dy.is_finite() {
                    Gesture::Ignored
                } else {
                    let factor = if dy > 0.0 { self.config.zoom_in_factor } else { self.config.zoom_out_factor };
                    sketch.zoom_about(surface.to_normalized(Vec2::new(x, y)), factor);
                    Gesture::Zoomed { factor }
                }
            }
            InputEvent::Key { key, state: ButtonState::Pressed, repeat } => self.on_key(key, repeat, sketch),
            InputEvent::Focused(false) => self.cancel_drags(sketch),
            InputEvent::PointerLeft => {
                self.last_pointer = None;
                Gesture::Ignored
            }
            InputEvent::Key { .. } | InputEvent::Focused(true) | InputEvent::ModifiersChanged(_) => {
                Gesture::Ignored
            }
        };

        match gesture {
            Gesture::Ignored => {}
            Gesture::Dropped(err) => log::warn!("pointer sample dropped: {err}"),
            other => log::debug!("{other:?}"),
        }
        gesture
    }

    fn on_button(
        &mut self,
        button: MouseButton,
        state: ButtonState,
        at: Vec2,
        surface: &SurfaceGeometry,
        sketch: &mut Sketch,
    ) -> Gesture {
        self.last_pointer = Some(at);
        match (button, state) {
            (MouseButton::Left, ButtonState::Pressed) => {
                if !surface.contains(at) {
                    return Gesture::Ignored;
                }
                self.drag.drawing = true;
                add_point(sketch, surface.to_normalized(at))
            }
            (MouseButton::Left, ButtonState::Released) => {
                if !self.drag.drawing {
                    return Gesture::Ignored;
                }
                self.drag.drawing = false;
                sketch.end_stroke();
                Gesture::StrokeEnded
            }
            (MouseButton::Right, ButtonState::Pressed) => {
                self.drag.panning = true;
                Gesture::Ignored
            }
            (MouseButton::Right, ButtonState::Released) => {
                self.drag.panning = false;
                Gesture::Ignored
            }
            _ => Gesture::Ignored,
        }
    }

    fn on_move(&mut self, at: Vec2, surface: &SurfaceGeometry, sketch: &mut Sketch) -> Gesture {
        let previous = self.last_pointer.replace(at);

        if self.drag.drawing {
            return add_point(sketch, surface.to_normalized(at));
        }

        match previous {
            Some(prev) if self.drag.panning => {
                sketch.view.pan_by(at - prev, self.config.pan_sensitivity);
                Gesture::Panned
            }
            _ => Gesture::Ignored,
        }
    }

    fn on_key(&mut self, key: Key, repeat: bool, sketch: &mut Sketch) -> Gesture {
        match key {
            Key::Letter('q') => {
                sketch.view.rotate_by(self.config.rotate_step);
                Gesture::Rotated
            }
            Key::Letter('e') => {
                sketch.view.rotate_by(-self.config.rotate_step);
                Gesture::Rotated
            }
            Key::Digit(d) if d >= 1 && !repeat => {
                let slot = usize::from(d - 1);
                if sketch.overlay.select_slot(slot) {
                    Gesture::TextureSelected(slot)
                } else {
                    Gesture::Ignored
                }
            }
            _ => Gesture::Ignored,
        }
    }

    fn cancel_drags(&mut self, sketch: &mut Sketch) -> Gesture {
        let was_drawing = self.drag.drawing;
        self.drag = DragState::default();
        self.last_pointer = None;
        if was_drawing {
            sketch.end_stroke();
            Gesture::StrokeEnded
        } else {
            Gesture::Ignored
        }
    }
}

impl Default for InteractionPolicy {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

fn add_point(sketch: &mut Sketch, normalized: Vec2) -> Gesture {
    match sketch.add_point(normalized) {
        Ok(model) => Gesture::PointAdded(model),
        Err(err) => Gesture::Dropped(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::WheelDelta;

    const EPS: f32 = 1e-5;

    fn surface() -> SurfaceGeometry {
        SurfaceGeometry::filling(200.0, 100.0)
    }

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton { button, state: ButtonState::Pressed, x, y }
    }

    fn release(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton { button, state: ButtonState::Released, x, y }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved { x, y }
    }

    fn key(key: Key) -> InputEvent {
        InputEvent::Key { key, state: ButtonState::Pressed, repeat: false }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn press_drag_release_builds_one_stroke() {
        let mut p = InteractionPolicy::default();
        let mut s = Sketch::new(1);
        let g = surface();

        assert!(matches!(p.handle(&press(MouseButton::Left, 100.0, 50.0), &g, &mut s), Gesture::PointAdded(_)));
        assert!(matches!(p.handle(&moved(150.0, 50.0), &g, &mut s), Gesture::PointAdded(_)));
        assert_eq!(p.handle(&release(MouseButton::Left, 150.0, 50.0), &g, &mut s), Gesture::StrokeEnded);

        assert_eq!(s.shapes.bounds(), &[0, 2, 2]);
        assert!(s.shapes.points_of(0)[0][0].abs() < EPS);
        assert!((s.shapes.points_of(0)[1][0] - 0.5).abs() < EPS);
        assert!(!p.drag_state().drawing);
    }

    #[test]
    fn hover_without_button_adds_nothing() {
        let mut p = InteractionPolicy::default();
        let mut s = Sketch::new(1);
        assert_eq!(p.handle(&moved(10.0, 10.0), &surface(), &mut s), Gesture::Ignored);
        assert!(s.shapes.is_empty());
    }

    #[test]
    fn press_outside_surface_is_ignored() {
        let mut p = InteractionPolicy::default();
        let mut s = Sketch::new(1);
        assert_eq!(p.handle(&press(MouseButton::Left, 500.0, 10.0), &surface(), &mut s), Gesture::Ignored);
        assert!(!p.drag_state().drawing);
    }

    #[test]
    fn singular_view_drops_sample_and_keeps_going() {
        let mut p = InteractionPolicy::default();
        let mut s = Sketch::new(1);
        s.zoom_about(Vec2::zero(), 0.0);
        let g = p.handle(&press(MouseButton::Left, 100.0, 50.0), &surface(), &mut s);
        assert!(matches!(g, Gesture::Dropped(TransformError::Singular { .. })));
        assert_eq!(p.handle(&release(MouseButton::Left, 100.0, 50.0), &surface(), &mut s), Gesture::StrokeEnded);
    }

    // ── pan ───────────────────────────────────────────────────────────────

    #[test]
    fn right_drag_pans_by_pointer_delta() {
        let mut p = InteractionPolicy::default();
        let mut s = Sketch::new(1);
        let g = surface();
        p.handle(&press(MouseButton::Right, 50.0, 50.0), &g, &mut s);
        assert_eq!(p.handle(&moved(60.0, 40.0), &g, &mut s), Gesture::Panned);
        // +10 px right, 10 px up.
        assert!(s.view.translation().approx_eq(Vec2::new(0.05, 0.05), EPS));

        p.handle(&release(MouseButton::Right, 60.0, 40.0), &g, &mut s);
        assert_eq!(p.handle(&moved(70.0, 40.0), &g, &mut s), Gesture::Ignored);
    }

    #[test]
    fn pointer_leave_prevents_pan_jump() {
        let mut p = InteractionPolicy::default();
        let mut s = Sketch::new(1);
        let g = surface();
        p.handle(&press(MouseButton::Right, 0.0, 0.0), &g, &mut s);
        p.handle(&InputEvent::PointerLeft, &g, &mut s);
        assert_eq!(p.handle(&moved(100.0, 100.0), &g, &mut s), Gesture::Ignored);
        assert_eq!(s.view.translation(), Vec2::zero());
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[test]
    fn wheel_up_zooms_in_about_pointer() {
        let mut p = InteractionPolicy::default();
        let mut s = Sketch::new(1);
        let wheel = InputEvent::Wheel { delta: WheelDelta::Line { x: 0.0, y: 1.0 }, x: 150.0, y: 50.0 };
        assert_eq!(p.handle(&wheel, &surface(), &mut s), Gesture::Zoomed { factor: 1.1 });

        let anchor = Vec2::new(0.5, 0.0);
        assert!(s.view.forward_apply(anchor).approx_eq(anchor, EPS));
        assert!(s.view.forward_apply(Vec2::new(1.5, 0.0)).approx_eq(Vec2::new(1.6, 0.0), EPS));
    }

    #[test]
    fn wheel_down_zooms_out_and_zero_is_ignored() {
        let mut p = InteractionPolicy::default();
        let mut s = Sketch::new(1);
        let down = InputEvent::Wheel { delta: WheelDelta::Pixel { x: 0.0, y: -3.0 }, x: 0.0, y: 0.0 };
        let flat = InputEvent::Wheel { delta: WheelDelta::Pixel { x: 4.0, y: 0.0 }, x: 0.0, y: 0.0 };
        assert_eq!(p.handle(&down, &surface(), &mut s), Gesture::Zoomed { factor: 0.9 });
        assert_eq!(p.handle(&flat, &surface(), &mut s), Gesture::Ignored);
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn q_and_e_rotate_in_opposite_directions() {
        let mut p = InteractionPolicy::default();
        let mut s = Sketch::new(1);
        let g = surface();
        assert_eq!(p.handle(&key(Key::Letter('q')), &g, &mut s), Gesture::Rotated);
        assert!((s.view.angle() - 0.1).abs() < EPS);
        p.handle(&key(Key::Letter('e')), &g, &mut s);
        p.handle(&key(Key::Letter('e')), &g, &mut s);
        assert!((s.view.angle() + 0.1).abs() < EPS);
    }

    #[test]
    fn digits_select_loaded_texture_slots() {
        let mut p = InteractionPolicy::default();
        let mut s = Sketch::new(2);
        let g = surface();
        assert_eq!(p.handle(&key(Key::Digit(2)), &g, &mut s), Gesture::TextureSelected(1));
        assert_eq!(p.handle(&key(Key::Digit(3)), &g, &mut s), Gesture::Ignored);
        assert_eq!(p.handle(&key(Key::Digit(0)), &g, &mut s), Gesture::Ignored);
        assert_eq!(s.overlay.active_slot(), 1);
    }

    // ── focus ─────────────────────────────────────────────────────────────

    #[test]
    fn focus_loss_ends_stroke_in_progress() {
        let mut p = InteractionPolicy::default();
        let mut s = Sketch::new(1);
        let g = surface();
        p.handle(&press(MouseButton::Left, 10.0, 10.0), &g, &mut s);
        p.handle(&press(MouseButton::Right, 10.0, 10.0), &g, &mut s);
        assert_eq!(p.handle(&InputEvent::Focused(false), &g, &mut s), Gesture::StrokeEnded);
        assert_eq!(p.drag_state(), DragState::default());
        assert_eq!(s.shapes.polyline_count(), 2);
    }
}
