/// Capability flags the post-processing path depends on.
///
/// Probed once at pass creation. Modern backends grant all of these, but
/// downlevel ones (GL, older mobile drivers) can still restrict texture
/// usage, so the probe stays explicit rather than assumed.
#[derive(Debug, Clone)]
pub struct PostCaps {
    /// The capture format supports being a render attachment *and* being
    /// sampled in a shader, the round trip the whole pass is built on.
    pub render_to_texture: bool,

    /// The capture format supports linear filtering when sampled.
    pub filterable: bool,

    /// Non-power-of-two textures are fully supported with mipmaps.
    ///
    /// The capture target carries a single mip level, so this is a
    /// diagnostic rather than a gate; restricted adapters get a warning and
    /// power-of-two sizing.
    pub npot_mip_textures: bool,

    /// Largest 2D texture edge the device accepts.
    pub max_texture_dimension_2d: u32,
}

impl PostCaps {
    /// Probes `adapter`/`device` for the flags relevant to `format`.
    ///
    /// Logs a warning per restriction, mirroring what the settings screen
    /// reports to the player.
    pub fn probe(
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
    ) -> Self {
        let format_features = adapter.get_texture_format_features(format);
        let usages = format_features.allowed_usages;

        let render_to_texture = usages.contains(wgpu::TextureUsages::RENDER_ATTACHMENT)
            && usages.contains(wgpu::TextureUsages::TEXTURE_BINDING);
        let filterable = format_features
            .flags
            .contains(wgpu::TextureFormatFeatureFlags::FILTERABLE);

        let downlevel = adapter.get_downlevel_capabilities();
        let npot_mip_textures = downlevel
            .flags
            .contains(wgpu::DownlevelFlags::NON_POWER_OF_TWO_MIPMAPPED_TEXTURES);

        let caps = Self {
            render_to_texture,
            filterable,
            npot_mip_textures,
            max_texture_dimension_2d: device.limits().max_texture_dimension_2d,
        };

        if !caps.render_to_texture {
            log::warn!("capture format {format:?} cannot be rendered to and sampled");
        }
        if !caps.filterable {
            log::warn!("capture format {format:?} is not filterable");
        }
        if !caps.npot_mip_textures {
            log::warn!("only power-of-two mipmapped textures are supported; padding the capture target");
        }

        caps
    }

    /// Whether the capture-and-composite path can run at all.
    pub fn supported(&self) -> bool {
        self.render_to_texture && self.filterable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(render_to_texture: bool, filterable: bool) -> PostCaps {
        PostCaps {
            render_to_texture,
            filterable,
            npot_mip_textures: true,
            max_texture_dimension_2d: 8192,
        }
    }

    #[test]
    fn supported_requires_render_to_texture() {
        assert!(!caps(false, true).supported());
    }

    #[test]
    fn supported_requires_filterable() {
        assert!(!caps(true, false).supported());
    }

    #[test]
    fn supported_when_both_present() {
        assert!(caps(true, true).supported());
    }
}
