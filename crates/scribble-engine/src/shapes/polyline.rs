use core::ops::Range;

use crate::coords::{ColorRgba, Vec2};

/// Ordered model-space points partitioned into polylines.
///
/// Layout:
/// - `points[i]` is `[x, y, 0]`, `colors[i]` is its color (always the same length)
/// - `bounds` is non-decreasing and starts at 0; polyline `k` covers
///   `points[bounds[k]..bounds[k + 1]]`
///
/// Points are only ever appended to the last polyline. Empty polylines are
/// legal and produce no draw call.
#[derive(Debug, Clone)]
pub struct PolylineStore {
    points: Vec<[f32; 3]>,
    colors: Vec<ColorRgba>,
    bounds: Vec<usize>,
}

impl PolylineStore {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            colors: Vec::new(),
            bounds: vec![0, 0],
        }
    }

    /// Opens a new, empty polyline after the current one.
    pub fn begin_polyline(&mut self) {
        let last = self.last_bound();
        self.bounds.push(last);
        self.debug_assert_invariants();
    }

    /// Appends a model-space point to the last polyline.
    pub fn append_point(&mut self, model_point: Vec2, color: ColorRgba) {
        self.points.push(model_point.extend());
        self.colors.push(color);
        let n = self.points.len();
        if let Some(last) = self.bounds.last_mut() {
            *last = n;
        }
        self.debug_assert_invariants();
    }

    // ── read access ───────────────────────────────────────────────────────

    /// Number of polylines, including empty ones.
    #[inline]
    pub fn polyline_count(&self) -> usize {
        self.bounds.len() - 1
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index range of polyline `k` into [`PolylineStore::points`].
    ///
    /// # Panics
    /// Panics if `k >= polyline_count()`.
    #[inline]
    pub fn range_of(&self, k: usize) -> Range<usize> {
        self.bounds[k]..self.bounds[k + 1]
    }

    /// Points of polyline `k`.
    ///
    /// # Panics
    /// Panics if `k >= polyline_count()`.
    pub fn points_of(&self, k: usize) -> &[[f32; 3]] {
        &self.points[self.range_of(k)]
    }

    /// Colors of polyline `k`, parallel to [`PolylineStore::points_of`].
    ///
    /// # Panics
    /// Panics if `k >= polyline_count()`.
    pub fn colors_of(&self, k: usize) -> &[ColorRgba] {
        &self.colors[self.range_of(k)]
    }

    #[inline]
    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    #[inline]
    pub fn colors(&self) -> &[ColorRgba] {
        &self.colors
    }

    #[inline]
    pub fn bounds(&self) -> &[usize] {
        &self.bounds
    }

    /// Ranges that need a draw call, in order. Empty polylines are skipped.
    pub fn draw_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.bounds
            .windows(2)
            .map(|w| w[0]..w[1])
            .filter(|r| !r.is_empty())
    }

    #[inline]
    fn last_bound(&self) -> usize {
        self.bounds.last().copied().unwrap_or(0)
    }

    fn debug_assert_invariants(&self) {
        debug_assert_eq!(self.points.len(), self.colors.len(), "points/colors out of step");
        debug_assert!(self.bounds.len() >= 2, "bounds lost its sentinel pair");
        debug_assert_eq!(self.bounds[0], 0, "first bound must be 0");
        debug_assert!(
            self.bounds.windows(2).all(|w| w[0] <= w[1]),
            "bounds must be non-decreasing"
        );
        debug_assert!(self.last_bound() <= self.points.len(), "bound past the end");
    }
}

impl Default for PolylineStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RED: ColorRgba = ColorRgba::opaque(1.0, 0.0, 0.0);

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn starts_with_one_empty_polyline() {
        let s = PolylineStore::new();
        assert_eq!(s.bounds(), &[0, 0]);
        assert_eq!(s.polyline_count(), 1);
        assert_eq!(s.draw_ranges().count(), 0);
    }

    // ── append ────────────────────────────────────────────────────────────

    #[test]
    fn consecutive_appends_share_a_polyline() {
        let mut s = PolylineStore::new();
        s.append_point(Vec2::new(0.1, 0.2), RED);
        s.append_point(Vec2::new(0.3, 0.4), RED);
        assert_eq!(s.polyline_count(), 1);
        assert_eq!(s.bounds(), &[0, 2]);
        assert_eq!(s.points_of(0), &[[0.1, 0.2, 0.0], [0.3, 0.4, 0.0]]);
        assert_eq!(s.colors_of(0), &[RED, RED]);
    }

    #[test]
    fn stored_points_lie_on_z_zero() {
        let mut s = PolylineStore::new();
        s.append_point(Vec2::new(5.0, -5.0), RED);
        assert_eq!(s.points()[0][2], 0.0);
    }

    // ── begin_polyline ────────────────────────────────────────────────────

    #[test]
    fn new_polyline_is_empty_and_not_drawn() {
        let mut s = PolylineStore::new();
        s.append_point(Vec2::zero(), RED);
        s.append_point(Vec2::new(1.0, 1.0), RED);
        s.begin_polyline();

        assert_eq!(s.polyline_count(), 2);
        assert!(s.points_of(1).is_empty());
        assert_eq!(s.draw_ranges().collect::<Vec<_>>(), vec![0..2]);
    }

    #[test]
    fn points_after_begin_go_to_new_polyline() {
        let mut s = PolylineStore::new();
        s.append_point(Vec2::zero(), RED);
        s.begin_polyline();
        s.append_point(Vec2::new(2.0, 0.0), RED);
        s.append_point(Vec2::new(3.0, 0.0), RED);

        assert_eq!(s.bounds(), &[0, 1, 3]);
        assert_eq!(s.points_of(1).len(), 2);
        assert_eq!(s.draw_ranges().collect::<Vec<_>>(), vec![0..1, 1..3]);
    }

    #[test]
    fn repeated_begin_leaves_empty_gaps() {
        let mut s = PolylineStore::new();
        s.begin_polyline();
        s.begin_polyline();
        s.append_point(Vec2::zero(), RED);
        assert_eq!(s.bounds(), &[0, 0, 0, 1]);
        assert_eq!(s.draw_ranges().collect::<Vec<_>>(), vec![0..1]);
    }

    // ── properties ────────────────────────────────────────────────────────

    #[derive(Debug, Clone)]
    enum Op {
        Append(f32, f32),
        Begin,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (-1.0f32..1.0, -1.0f32..1.0).prop_map(|(x, y)| Op::Append(x, y)),
            1 => Just(Op::Begin),
        ]
    }

    proptest! {
        #[test]
        fn lengths_and_last_bound_track_point_count(ops in prop::collection::vec(op(), 0..64)) {
            let mut s = PolylineStore::new();
            for op in ops {
                match op {
                    Op::Append(x, y) => {
                        s.append_point(Vec2::new(x, y), RED);
                        prop_assert_eq!(*s.bounds().last().unwrap(), s.point_count());
                    }
                    Op::Begin => s.begin_polyline(),
                }
                prop_assert_eq!(s.points().len(), s.colors().len());
                prop_assert!(s.bounds().len() >= 2);
                prop_assert!(s.bounds().windows(2).all(|w| w[0] <= w[1]));
            }
            let drawn: usize = s.draw_ranges().map(|r| r.len()).sum();
            prop_assert_eq!(drawn, s.point_count());
        }
    }
}
