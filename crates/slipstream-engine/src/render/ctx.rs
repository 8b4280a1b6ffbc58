/// Renderer-facing context: device/queue plus the format and size of whatever
/// view is being drawn into this frame (surface or an off-screen capture).
///
/// This is intentionally small and stable.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,

    /// Format of the active color target.
    pub target_format: wgpu::TextureFormat,

    /// Size of the active color target in pixels; renderers use it for the
    /// px-to-NDC transform.
    pub target_size: (u32, u32),
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        target_format: wgpu::TextureFormat,
        target_size: (u32, u32),
    ) -> Self {
        Self {
            device,
            queue,
            target_format,
            target_size,
        }
    }
}

/// Target for drawing (encoder + color view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}
