use anyhow::Result;

/// Computes the capture-target extent for a given drawable size.
///
/// Restricted adapters may require power-of-two (or square) textures; the
/// drawable is padded up to the nearest acceptable size and clamped to the
/// device's maximum 2D dimension. Zero-sized input yields a 1×1 extent so
/// callers never have to special-case minimized windows.
pub fn optimal_extent(
    width: u32,
    height: u32,
    require_pow2: bool,
    require_square: bool,
    max_dim: u32,
) -> (u32, u32) {
    let mut w = width.max(1);
    let mut h = height.max(1);

    if require_pow2 {
        w = w.next_power_of_two();
        h = h.next_power_of_two();
    }

    if require_square {
        let side = w.max(h);
        w = side;
        h = side;
    }

    (w.min(max_dim), h.min(max_dim))
}

/// Off-screen target the scene is captured into while the blur is active.
///
/// Holds the texture, its render/sample view, and the sampler used by the
/// composite pass. Recreated on window resize.
pub struct CaptureTarget {
    texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    extent: (u32, u32),
}

impl CaptureTarget {
    /// Allocates a capture target of `extent` pixels.
    ///
    /// Fails when the extent exceeds the device's texture limit; callers are
    /// expected to disable the post-processing path in that case rather than
    /// retry.
    pub fn create(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        extent: (u32, u32),
    ) -> Result<Self> {
        let (width, height) = extent;
        anyhow::ensure!(width > 0 && height > 0, "capture target has zero size");

        let limit = device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            width <= limit && height <= limit,
            "capture target {width}x{height} exceeds device limit {limit}"
        );

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("slipstream capture target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("slipstream capture sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
            extent,
        })
    }

    pub fn extent(&self) -> (u32, u32) {
        self.extent
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.texture.format()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── optimal_extent ────────────────────────────────────────────────────

    #[test]
    fn unrestricted_passes_through() {
        assert_eq!(optimal_extent(1280, 720, false, false, 8192), (1280, 720));
    }

    #[test]
    fn pow2_rounds_up_each_axis() {
        assert_eq!(optimal_extent(1280, 720, true, false, 8192), (2048, 1024));
    }

    #[test]
    fn pow2_keeps_exact_powers() {
        assert_eq!(optimal_extent(1024, 512, true, false, 8192), (1024, 512));
    }

    #[test]
    fn square_takes_larger_side() {
        assert_eq!(optimal_extent(1280, 720, false, true, 8192), (1280, 1280));
    }

    #[test]
    fn pow2_and_square_compose() {
        assert_eq!(optimal_extent(1280, 720, true, true, 8192), (2048, 2048));
    }

    #[test]
    fn clamps_to_device_limit() {
        assert_eq!(optimal_extent(5000, 3000, true, false, 4096), (4096, 4096));
    }

    #[test]
    fn zero_size_becomes_one_pixel() {
        assert_eq!(optimal_extent(0, 0, false, false, 8192), (1, 1));
    }
}
