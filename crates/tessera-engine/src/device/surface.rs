use winit::dpi::PhysicalSize;

use crate::coords::Viewport;

use super::SurfaceErrorAction;

/// Picks the first format whose sRGB-ness matches the preference, else the
/// first supported format.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Viewport covering the whole drawable area, zero sizes included.
pub(crate) fn viewport_for(size: PhysicalSize<u32>) -> Viewport {
    Viewport::full(size.width, size.height)
}

/// Records a resize. The surface is only reconfigured for a nonzero size;
/// wgpu rejects 0x0 configurations (e.g. while minimized).
///
/// Returns `true` when the surface was reconfigured.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) -> bool {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return false;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
    true
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    #[test]
    fn linear_format_preferred_by_default() {
        let formats = [F::Bgra8UnormSrgb, F::Bgra8Unorm, F::Rgba8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(F::Bgra8Unorm));
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(F::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        assert_eq!(
            choose_surface_format(&[F::Bgra8UnormSrgb], false),
            Some(F::Bgra8UnormSrgb)
        );
        assert_eq!(choose_surface_format(&[], false), None);
    }

    #[test]
    fn unsupported_alpha_mode_is_replaced() {
        let supported = [wgpu::CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
        assert_eq!(
            choose_alpha_mode(&[], None),
            wgpu::CompositeAlphaMode::Auto
        );
    }

    #[test]
    fn viewport_tracks_any_size() {
        for (w, h) in [(800, 600), (1, 1), (0, 0), (1920, 0), (3, 4000)] {
            assert_eq!(
                viewport_for(PhysicalSize::new(w, h)),
                Viewport::new(0, 0, w, h)
            );
        }
    }
}
