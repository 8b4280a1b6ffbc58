use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::SurfaceErrorAction;

/// GPU startup options for the race window.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB swapchain format so track colors come out gamma-correct.
    pub prefer_srgb: bool,

    /// Requested swap behavior. Falls back to `Fifo` (vsync, supported
    /// everywhere) when the surface cannot do the requested mode.
    pub present_mode: wgpu::PresentMode,

    /// Extra wgpu features to require.
    ///
    /// Kept empty so the game still starts on downlevel adapters; optional
    /// render features probe at their own init for what they need.
    pub required_features: wgpu::Features,

    /// Device limits to request.
    pub required_limits: wgpu::Limits,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
        }
    }
}

/// Owns the device, queue and swapchain configuration for the game window.
///
/// The surface borrows the window (`'w`); the window must outlive this value.
/// The wgpu instance is not kept around: once the surface and adapter exist,
/// nothing here needs it again.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
}

/// One acquired swapchain frame: texture, view, and a command encoder.
///
/// Short-lived; hand it back via [`Gpu::submit`] before acquiring the next
/// frame.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to the game window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; the runtime
    /// blocks on this during window creation.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(
            size.width > 0 && size.height > 0,
            "cannot init the GPU against a zero-sized window"
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("creating the window surface failed")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter for this surface")?;

        let info = adapter.get_info();
        log::info!("gpu: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("slipstream device"),
                required_features: init.required_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("device request failed")?;

        let caps = surface.get_capabilities(&adapter);

        let format = pick_surface_format(&caps, init.prefer_srgb)
            .context("surface reports no supported formats")?;

        let present_mode = if caps.present_modes.contains(&init.present_mode) {
            init.present_mode
        } else {
            log::debug!(
                "present mode {:?} unavailable on this surface; using Fifo",
                init.present_mode
            );
            wgpu::PresentMode::Fifo
        };

        // The game window is opaque; any supported alpha mode will do.
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        Ok(Self {
            surface,
            adapter,
            device,
            queue,
            config,
            size,
        })
    }

    /// Active swapchain format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Selected adapter.
    ///
    /// Optional render features (post-processing) probe format and downlevel
    /// capabilities through this.
    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    /// Logical device handle.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Command queue handle.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Tracks a window resize.
    ///
    /// A minimized window reports zero size, which the surface cannot be
    /// configured with; the config keeps its previous extent until a real
    /// size arrives.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Acquires the next swapchain texture and creates an encoder for the frame.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("slipstream frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(Some(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Reacts to a surface error, reconfiguring the swapchain when that can
    /// bring it back.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::classify(&err);

        if action == SurfaceErrorAction::Reconfigured
            && self.size.width > 0
            && self.size.height > 0
        {
            log::warn!("surface error ({err:?}); reconfiguring swapchain");
            self.surface.configure(&self.device, &self.config);
        }

        action
    }
}

fn pick_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    caps.formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| caps.formats.first().copied())
}
