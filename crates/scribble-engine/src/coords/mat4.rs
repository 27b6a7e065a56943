use core::ops::Mul;

use glam::{Affine2, Mat2, Vec3};

use super::Vec2;

/// 4x4 homogeneous matrix, column-major, backed by [`glam::Mat4`].
///
/// Element `(row, col)` lives at index `col * 4 + row`, so the translation of an
/// affine matrix sits at indices 12..15. This is the layout uploaded verbatim to
/// shader uniforms.
///
/// Every matrix built here is planar affine: a 2x2 linear block, an xy
/// translation and an independent z scale.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Mat4(glam::Mat4);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4(glam::Mat4::IDENTITY);

    #[inline]
    pub fn from_cols_array(m: [f32; 16]) -> Self {
        Self(glam::Mat4::from_cols_array(&m))
    }

    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.0.to_cols_array()
    }

    #[inline]
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self(glam::Mat4::from_translation(Vec3::new(tx, ty, tz)))
    }

    #[inline]
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self(glam::Mat4::from_scale(Vec3::new(sx, sy, sz)))
    }

    /// Counter-clockwise rotation by `angle` radians about the origin, followed by
    /// a translation of `offset`.
    pub fn rotation_translation(angle: f32, offset: Vec2) -> Self {
        Self(
            glam::Mat4::from_translation(Vec3::new(offset.x, offset.y, 0.0))
                * glam::Mat4::from_rotation_z(angle),
        )
    }

    /// Uniform scale by `factor` that keeps `anchor` fixed:
    /// `T(anchor) * S(factor) * T(-anchor)`.
    pub fn scale_about(anchor: Vec2, factor: f32) -> Self {
        Mat4::translation(anchor.x, anchor.y, 0.0)
            * Mat4::scale(factor, factor, factor)
            * Mat4::translation(-anchor.x, -anchor.y, 0.0)
    }

    /// Applies the matrix to `[p.x, p.y, 0, 1]` and keeps x and y.
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let out = self.0.transform_point3(Vec3::new(p.x, p.y, 0.0));
        Vec2::new(out.x, out.y)
    }

    pub fn is_identity(&self) -> bool {
        self.0 == glam::Mat4::IDENTITY
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Element-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Mat4, eps: f32) -> bool {
        self.0.abs_diff_eq(other.0, eps)
    }

    /// Determinant of the 2x2 linear block acting on x and y.
    ///
    /// The z scale does not take part, so a long run of uniform zoom-outs stays
    /// invertible as long as the plane itself is.
    pub fn planar_determinant(&self) -> f32 {
        let m = &self.0;
        m.x_axis.x * m.y_axis.y - m.x_axis.y * m.y_axis.x
    }

    /// Inverse of a planar affine matrix.
    ///
    /// Returns `None` when the planar determinant is zero, subnormal or not
    /// finite, or when the result is not finite.
    pub fn inverse(&self) -> Option<Mat4> {
        let det = self.planar_determinant();
        if !det.is_finite() || det.abs() < f32::MIN_POSITIVE {
            return None;
        }

        let m = &self.0;
        let linear = Mat2::from_cols(m.x_axis.truncate().truncate(), m.y_axis.truncate().truncate());
        let offset = m.w_axis.truncate().truncate();
        let plane = Affine2::from_mat2_translation(linear, offset).inverse();
        let [a, b, c, d] = plane.matrix2.to_cols_array();
        let t = plane.translation;

        let out = Mat4::from_cols_array([
            a, b, 0.0, 0.0, //
            c, d, 0.0, 0.0, //
            0.0, 0.0, m.z_axis.z.recip(), 0.0, //
            t.x, t.y, 0.0, 1.0,
        ]);
        out.is_finite().then_some(out)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    /// Standard product: `(a * b).transform_point(p) == a.transform_point(b.transform_point(p))`.
    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn translation_lives_in_last_column() {
        let t = Mat4::translation(3.0, -2.0, 0.0);
        assert_eq!(t.to_cols_array()[12], 3.0);
        assert_eq!(t.to_cols_array()[13], -2.0);
    }

    #[test]
    fn rotation_is_counter_clockwise() {
        let r = Mat4::rotation_translation(FRAC_PI_2, Vec2::zero());
        let p = r.transform_point(Vec2::new(1.0, 0.0));
        assert!(p.approx_eq(Vec2::new(0.0, 1.0), EPS), "{p:?}");
    }

    #[test]
    fn rotation_translation_rotates_then_translates() {
        let m = Mat4::rotation_translation(FRAC_PI_2, Vec2::new(10.0, 0.0));
        let p = m.transform_point(Vec2::new(1.0, 0.0));
        assert!(p.approx_eq(Vec2::new(10.0, 1.0), EPS), "{p:?}");
    }

    #[test]
    fn scale_about_keeps_anchor_fixed() {
        let anchor = Vec2::new(0.25, -0.5);
        let m = Mat4::scale_about(anchor, 3.0);
        assert!(m.transform_point(anchor).approx_eq(anchor, EPS));
        let p = m.transform_point(Vec2::new(1.25, -0.5));
        assert!(p.approx_eq(Vec2::new(3.25, -0.5), EPS), "{p:?}");
    }

    // ── composition ───────────────────────────────────────────────────────

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::rotation_translation(0.3, Vec2::new(1.0, 2.0));
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
    }

    #[test]
    fn product_applies_right_operand_first() {
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let s = Mat4::scale(2.0, 2.0, 1.0);
        let p = Vec2::new(1.0, 1.0);
        // scale then translate
        assert_eq!((t * s).transform_point(p), Vec2::new(3.0, 2.0));
        // translate then scale
        assert_eq!((s * t).transform_point(p), Vec2::new(4.0, 2.0));
    }

    // ── inversion ─────────────────────────────────────────────────────────

    #[test]
    fn inverse_of_affine_round_trips() {
        let m = Mat4::rotation_translation(0.7, Vec2::new(-0.2, 0.4))
            * Mat4::scale_about(Vec2::new(0.1, 0.1), 1.7);
        let inv = m.inverse().unwrap();
        assert!((m * inv).approx_eq(&Mat4::IDENTITY, EPS));
        assert!((inv * m).approx_eq(&Mat4::IDENTITY, EPS));
    }

    #[test]
    fn zero_scale_is_singular() {
        let m = Mat4::scale_about(Vec2::new(0.5, 0.5), 0.0);
        assert_eq!(m.planar_determinant(), 0.0);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn planar_determinant_ignores_z_scale() {
        let m = Mat4::scale(2.0, 2.0, 2.0);
        assert!((m.planar_determinant() - 4.0).abs() < EPS);
    }

    #[test]
    fn tiny_uniform_scale_still_inverts() {
        // 0.9^300: the full 4x4 determinant underflows, the plane does not.
        let f = 0.9f32.powi(300);
        let m = Mat4::scale_about(Vec2::zero(), f);
        let inv = m.inverse().unwrap();
        let p = Vec2::new(0.3, 0.4);
        assert!(inv.transform_point(m.transform_point(p)).approx_eq(p, 1e-3));
    }

    #[test]
    fn non_finite_matrix_has_no_inverse() {
        let mut raw = Mat4::IDENTITY.to_cols_array();
        raw[0] = f32::NAN;
        assert!(Mat4::from_cols_array(raw).inverse().is_none());
    }
}
