use crate::coords::{ColorRgba, Vec2};

/// Point color derived from its distance to the surface center.
///
/// `n = clamp(|p|, 0, 1)` over the normalized position gives `(n, 1 - n, n, 1)`:
/// green at the center fading to magenta at the edges.
pub fn radial_color(normalized: Vec2) -> ColorRgba {
    let n = normalized.length();
    let n = if n.is_finite() { n.clamp(0.0, 1.0) } else { 1.0 };
    ColorRgba::opaque(n, 1.0 - n, n)
}
