use winit::dpi::PhysicalSize;

/// Swapchain format: an sRGB 8-bit format if asked for and offered, else the
/// surface's first choice.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = *formats.first()?;
    if prefer_srgb {
        for f in [wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Rgba8UnormSrgb] {
            if formats.contains(&f) {
                return Some(f);
            }
        }
    }
    Some(first)
}

pub(crate) fn choose_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .into_iter()
        .chain([wgpu::CompositeAlphaMode::Opaque])
        .find(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Extent to configure the swapchain with, or `None` while minimized.
pub(crate) fn configurable_extent(size: PhysicalSize<u32>) -> Option<(u32, u32)> {
    (size.width > 0 && size.height > 0).then_some((size.width, size.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode as A, TextureFormat as F};

    #[test]
    fn srgb_preferred_when_offered() {
        let formats = [F::Bgra8Unorm, F::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&formats, false), Some(F::Bgra8Unorm));
    }

    #[test]
    fn no_formats_means_no_surface() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn alpha_mode_falls_back_to_opaque() {
        assert_eq!(choose_alpha_mode(&[A::PreMultiplied, A::Opaque], Some(A::PostMultiplied)), A::Opaque);
        assert_eq!(choose_alpha_mode(&[A::PreMultiplied], None), A::PreMultiplied);
        assert_eq!(choose_alpha_mode(&[], None), A::Auto);
    }

    #[test]
    fn zero_sized_window_is_not_configured() {
        assert_eq!(configurable_extent(PhysicalSize::new(0, 480)), None);
        assert_eq!(configurable_extent(PhysicalSize::new(640, 480)), Some((640, 480)));
    }
}
