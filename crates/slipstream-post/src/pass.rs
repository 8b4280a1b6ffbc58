use anyhow::Result;
use bytemuck::{Pod, Zeroable};

use slipstream_engine::render::quad::{self, QuadVertex};
use slipstream_engine::render::{RenderCtx, RenderTarget};

use crate::boost::BoostMeter;
use crate::caps::PostCaps;
use crate::options::PostOptions;
use crate::shaders::ShaderDir;
use crate::target::{optimal_extent, CaptureTarget};

/// Whether a frame should be captured for post-processing.
///
/// Capture is skipped when the hardware cannot do it, the player turned the
/// feature off, the screen is split between multiple players, or there is no
/// boost to visualize (capturing an idle frame would only cost bandwidth and
/// anti-aliasing).
fn captures_this_frame(supported: bool, enabled: bool, players: u32, boost_active: bool) -> bool {
    supported && enabled && players <= 1 && boost_active
}

/// Motion-blur post-processing pass.
///
/// Lifecycle per frame, inside the engine's draw closure:
/// 1. [`begin_capture`](Self::begin_capture) decides whether this frame is
///    captured and clears the capture target if so
/// 2. scene draws into [`scene_view`](Self::scene_view)
/// 3. [`end_capture`](Self::end_capture) closes the redirect
/// 4. [`render`](Self::render) composites the capture back to the surface
///    through the blur shader
///
/// [`update`](Self::update) runs once per frame with the frame's `dt`;
/// [`give_boost`](Self::give_boost) fires when the kart hits a boost pad.
///
/// All resources are owned here; dropping the pass releases them.
pub struct MotionBlurPass {
    caps: PostCaps,
    options: PostOptions,

    /// Set when the capture target could not be allocated; sticks for the
    /// whole session, overriding the user option.
    force_disabled: bool,

    boost: BoostMeter,
    resources: Option<PassResources>,

    /// True between `begin_capture` and `end_capture` of a captured frame.
    capturing: bool,

    /// True when the current frame was rendered into the capture target and
    /// still needs compositing.
    used_this_frame: bool,
}

/// GPU objects behind the pass; absent when the pass is disabled.
struct PassResources {
    target: CaptureTarget,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    boost_ubo: wgpu::Buffer,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
}

impl MotionBlurPass {
    /// Probes capabilities and builds the capture target + composite pipeline.
    ///
    /// The capture texture uses the surface format so the scene renderer's
    /// pipelines work unchanged against either target.
    ///
    /// Unsupported hardware and target-allocation failure yield a pass that is
    /// permanently disabled for the session (with a logged warning), not an
    /// error; only shader-loading problems propagate as `Err`.
    pub fn new(
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        surface_size: (u32, u32),
        shader_dir: &ShaderDir,
        options: PostOptions,
    ) -> Result<Self> {
        let caps = PostCaps::probe(adapter, device, surface_format);

        if !caps.supported() {
            log::warn!("post-processing is not supported on this adapter; motion blur disabled");
            return Ok(Self::disabled(caps, options, false));
        }

        let extent = optimal_extent(
            surface_size.0,
            surface_size.1,
            !caps.npot_mip_textures,
            false,
            caps.max_texture_dimension_2d,
        );

        let target = match CaptureTarget::create(device, surface_format, extent) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("couldn't create the capture target for post-processing, disabling it: {e:#}");
                return Ok(Self::disabled(caps, options, true));
            }
        };

        let vert_src = shader_dir.load("motion_blur.vert.wgsl")?;
        let frag_src = shader_dir.load("motion_blur.frag.wgsl")?;

        let vert = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("slipstream motion blur vs"),
            source: wgpu::ShaderSource::Wgsl(vert_src.into()),
        });
        let frag = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("slipstream motion blur fs"),
            source: wgpu::ShaderSource::Wgsl(frag_src.into()),
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("slipstream motion blur bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(boost_ubo_min_binding_size()),
                        },
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("slipstream motion blur pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("slipstream motion blur pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vert,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &frag,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    // The quad replaces the whole frame; no blending.
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        let boost_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("slipstream motion blur boost ubo"),
            size: std::mem::size_of::<BoostUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = create_bind_group(device, &bind_group_layout, &target, &boost_ubo);

        let (quad_vbo, quad_ibo) = quad::create_quad_buffers(device, "slipstream motion blur");

        log::info!(
            "motion blur ready: capture target {}x{} ({:?})",
            extent.0,
            extent.1,
            surface_format
        );

        Ok(Self {
            caps,
            options,
            force_disabled: false,
            boost: BoostMeter::new(),
            resources: Some(PassResources {
                target,
                pipeline,
                bind_group_layout,
                bind_group,
                boost_ubo,
                quad_vbo,
                quad_ibo,
            }),
            capturing: false,
            used_this_frame: false,
        })
    }

    fn disabled(caps: PostCaps, options: PostOptions, force_disabled: bool) -> Self {
        Self {
            caps,
            options,
            force_disabled,
            boost: BoostMeter::new(),
            resources: None,
            capturing: false,
            used_this_frame: false,
        }
    }

    /// Decides whether this frame is captured and, if so, clears the capture
    /// target. Returns true when the scene should render into
    /// [`scene_view`](Self::scene_view).
    pub fn begin_capture(&mut self, encoder: &mut wgpu::CommandEncoder, players: u32) -> bool {
        self.used_this_frame = false;
        self.capturing = false;

        if !captures_this_frame(
            self.caps.supported(),
            self.is_enabled(),
            players,
            self.boost.is_active(),
        ) {
            return false;
        }

        let Some(res) = self.resources.as_ref() else {
            return false;
        };

        // Clear pass on the capture target, dropped immediately; the scene
        // renderers begin their own passes with LoadOp::Load.
        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("slipstream capture clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &res.target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.capturing = true;
        self.used_this_frame = true;
        true
    }

    /// The view the scene should draw into this frame: the capture target
    /// while capturing, otherwise the surface.
    pub fn scene_view<'v>(&'v self, surface: &'v wgpu::TextureView) -> &'v wgpu::TextureView {
        match self.resources.as_ref() {
            Some(res) if self.capturing => &res.target.view,
            _ => surface,
        }
    }

    /// Closes the capture redirect; scene draws go back to the surface.
    pub fn end_capture(&mut self) {
        self.capturing = false;
    }

    /// Advances the boost decay by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.boost.decay(dt);
    }

    /// Composites the captured frame back to the surface through the blur
    /// shader. No-op when this frame was not captured.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.capturing {
            log::debug!("render called before end_capture; closing the redirect");
            self.capturing = false;
        }

        if !self.used_this_frame {
            return;
        }
        self.used_this_frame = false;

        let Some(res) = self.resources.as_ref() else {
            return;
        };

        // Push the current boost intensity to the shader before the draw.
        let u = BoostUniform {
            boost_amount: self.boost.amount(),
            _pad: [0.0; 3],
        };
        ctx.queue.write_buffer(&res.boost_ubo, 0, bytemuck::bytes_of(&u));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("slipstream motion blur composite"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&res.pipeline);
        rpass.set_bind_group(0, &res.bind_group, &[]);
        rpass.set_vertex_buffer(0, res.quad_vbo.slice(..));
        rpass.set_index_buffer(res.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..quad::QUAD_INDICES.len() as u32, 0, 0..1);
    }

    /// Fires a boost: full blur now, decaying to zero over the next frames.
    pub fn give_boost(&mut self) {
        self.boost.trigger();
    }

    /// Recreates the capture target for a new drawable size.
    ///
    /// No-op when the computed extent is unchanged or the pass is disabled.
    pub fn resize(&mut self, device: &wgpu::Device, size: (u32, u32)) {
        let extent = optimal_extent(
            size.0,
            size.1,
            !self.caps.npot_mip_textures,
            false,
            self.caps.max_texture_dimension_2d,
        );

        let Some(res) = self.resources.as_mut() else {
            return;
        };
        if res.target.extent() == extent {
            return;
        }

        match CaptureTarget::create(device, res.target.format(), extent) {
            Ok(t) => {
                res.bind_group =
                    create_bind_group(device, &res.bind_group_layout, &t, &res.boost_ubo);
                res.target = t;
            }
            Err(e) => {
                log::warn!("couldn't recreate the capture target after resize, disabling post-processing: {e:#}");
                self.resources = None;
                self.force_disabled = true;
            }
        }
    }

    /// Applies the user toggle.
    ///
    /// Ignored (with a debug log) when the pass was force-disabled for the
    /// session.
    pub fn set_enabled(&mut self, on: bool) {
        if self.force_disabled && on {
            log::debug!("post-processing was disabled for this session; ignoring enable request");
            return;
        }
        self.options.post_processing = on;
    }

    pub fn is_enabled(&self) -> bool {
        self.options.post_processing && !self.force_disabled
    }

    pub fn is_supported(&self) -> bool {
        self.caps.supported()
    }

    /// Current blur intensity, for HUD display.
    pub fn boost_amount(&self) -> f32 {
        self.boost.amount()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct BoostUniform {
    boost_amount: f32,
    _pad: [f32; 3], // 16-byte alignment
}

/// `BoostUniform` is 16 bytes by construction, so its size is always non-zero.
fn boost_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<BoostUniform>() as u64)
        .expect("BoostUniform has non-zero size by construction")
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    target: &CaptureTarget,
    boost_ubo: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("slipstream motion blur bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&target.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&target.sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: boost_ubo.as_entire_binding(),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── captures_this_frame ───────────────────────────────────────────────

    #[test]
    fn captures_when_all_conditions_hold() {
        assert!(captures_this_frame(true, true, 1, true));
    }

    #[test]
    fn skips_when_unsupported() {
        assert!(!captures_this_frame(false, true, 1, true));
    }

    #[test]
    fn skips_when_disabled() {
        assert!(!captures_this_frame(true, false, 1, true));
    }

    #[test]
    fn skips_on_split_screen() {
        assert!(!captures_this_frame(true, true, 2, true));
        assert!(!captures_this_frame(true, true, 4, true));
    }

    #[test]
    fn skips_idle_boost() {
        // Capturing a frame with nothing to blur would cost bandwidth and
        // anti-aliasing for no visual change.
        assert!(!captures_this_frame(true, true, 1, false));
    }

    // ── uniform layout ────────────────────────────────────────────────────

    #[test]
    fn boost_uniform_is_16_bytes() {
        assert_eq!(std::mem::size_of::<BoostUniform>(), 16);
    }
}
