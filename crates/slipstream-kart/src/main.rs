use anyhow::Result;
use winit::dpi::LogicalSize;

use slipstream_engine::core::{App, AppControl, FrameCtx};
use slipstream_engine::device::GpuInit;
use slipstream_engine::geom::Rect;
use slipstream_engine::input::Key;
use slipstream_engine::logging;
use slipstream_engine::paint::Color;
use slipstream_engine::render::{RectRenderer, RenderTarget, SceneRect};
use slipstream_engine::window::{Runtime, RuntimeConfig};
use slipstream_post::{MotionBlurPass, PostOptions, ShaderDir};

/// Road scroll speed at cruise, in pixels per second.
const BASE_SPEED: f32 = 420.0;

/// How hard a boost multiplies the scroll speed at full intensity.
const BOOST_SPEED_GAIN: f32 = 0.6;

/// Kart lateral steering speed, in pixels per second.
const STEER_SPEED: f32 = 520.0;

fn main() -> Result<()> {
    logging::init_logging(logging::DEFAULT_FILTER);

    println!();
    println!("  ╔══════════════════════════════════════╗");
    println!("  ║          S L I P S T R E A M         ║");
    println!("  ║  space: boost   b: blur   esc: quit  ║");
    println!("  ╚══════════════════════════════════════╝");
    println!();

    let app = KartApp::new(ShaderDir::resolve(None));

    Runtime::run(
        RuntimeConfig {
            title: "Slipstream".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        },
        GpuInit::default(),
        app,
    )
}

struct KartApp {
    shader_dir: ShaderDir,
    post: Option<MotionBlurPass>,
    road: RectRenderer,
    world: RoadWorld,
    players: u32,
}

impl KartApp {
    fn new(shader_dir: ShaderDir) -> Self {
        Self {
            shader_dir,
            post: None,
            road: RectRenderer::new(),
            world: RoadWorld::new(),
            players: 1,
        }
    }
}

impl App for KartApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let ft = ctx.time;
        let size = ctx.gpu.size();
        let (w, h) = (size.width.max(1) as f32, size.height.max(1) as f32);

        // The pass needs the adapter and surface format, so it is built on the
        // first frame rather than before the runtime starts.
        if self.post.is_none() {
            match MotionBlurPass::new(
                ctx.gpu.adapter(),
                ctx.gpu.device(),
                ctx.gpu.surface_format(),
                (size.width, size.height),
                &self.shader_dir,
                PostOptions::default(),
            ) {
                Ok(pass) => self.post = Some(pass),
                Err(e) => {
                    log::error!("failed to set up post-processing: {e:#}");
                    return AppControl::Exit;
                }
            }
        }
        let Some(post) = self.post.as_mut() else {
            return AppControl::Exit;
        };

        // Controls.
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }
        if ctx.input_frame.pressed(Key::Space) {
            post.give_boost();
            log::debug!("boost fired");
        }
        if ctx.input_frame.pressed(Key::B) {
            let on = !post.is_enabled();
            post.set_enabled(on);
            log::info!("post-processing {}", if on { "enabled" } else { "disabled" });
        }

        let mut steer = 0.0;
        if ctx.input.key_down(Key::ArrowLeft) || ctx.input.key_down(Key::A) {
            steer -= 1.0;
        }
        if ctx.input.key_down(Key::ArrowRight) || ctx.input.key_down(Key::D) {
            steer += 1.0;
        }

        // Simulation: blur intensity feeds back into the visible scroll speed.
        post.update(ft.dt);
        post.resize(ctx.gpu.device(), (size.width, size.height));

        let speed = BASE_SPEED * (1.0 + post.boost_amount() * BOOST_SPEED_GAIN);
        self.world.advance(ft.dt, speed, steer, w);

        let rects = self.world.rects(w, h);
        let players = self.players;
        let road = &mut self.road;

        ctx.render(Color::from_srgb_u8(28, 88, 42, 255), |rctx, target| {
            post.begin_capture(target.encoder, players);
            {
                let view = post.scene_view(target.color_view);
                let mut scene = RenderTarget::new(target.encoder, view);
                road.render(rctx, &mut scene, &rects);
            }
            post.end_capture();
            post.render(rctx, target);
        })
    }
}

/// Flat top-down road the kart races along.
///
/// Everything is rectangles: asphalt, kerb blocks, lane dashes, kart. The
/// road scrolls toward the bottom of the screen to fake forward motion.
struct RoadWorld {
    /// Scroll position in pixels; wraps per kerb period.
    scroll: f32,
    /// Kart center X, in pixels. Initialized on first layout.
    kart_x: Option<f32>,
}

impl RoadWorld {
    const KERB_PERIOD: f32 = 64.0;
    const DASH_PERIOD: f32 = 128.0;

    fn new() -> Self {
        Self {
            scroll: 0.0,
            kart_x: None,
        }
    }

    fn advance(&mut self, dt: f32, speed: f32, steer: f32, screen_w: f32) {
        self.scroll = (self.scroll + speed * dt) % (Self::KERB_PERIOD * Self::DASH_PERIOD);

        let road_left = screen_w * 0.25;
        let road_right = screen_w * 0.75;
        let x = self
            .kart_x
            .get_or_insert(screen_w * 0.5);
        *x = (*x + steer * STEER_SPEED * dt).clamp(road_left + 24.0, road_right - 24.0);
    }

    fn rects(&self, w: f32, h: f32) -> Vec<SceneRect> {
        let asphalt = Color::from_srgb_u8(52, 52, 58, 255);
        let kerb_red = Color::from_srgb_u8(196, 40, 40, 255);
        let kerb_white = Color::from_srgb_u8(230, 230, 230, 255);
        let dash = Color::from_srgb_u8(214, 214, 190, 255);
        let kart = Color::from_srgb_u8(226, 62, 26, 255);

        let road_left = w * 0.25;
        let road_width = w * 0.5;
        let kerb_w = 14.0;

        let mut out = Vec::new();

        out.push(SceneRect {
            rect: Rect::new(road_left, 0.0, road_width, h),
            color: asphalt,
        });

        // Kerb blocks and lane dashes scroll downward with the road.
        let kerb = Self::KERB_PERIOD;
        let phase = self.scroll % kerb;
        let mut y = phase - kerb;
        let mut red = ((self.scroll / kerb) as i64) % 2 == 0;
        while y < h {
            let color = if red { kerb_red } else { kerb_white };
            out.push(SceneRect {
                rect: Rect::new(road_left - kerb_w, y, kerb_w, kerb),
                color,
            });
            out.push(SceneRect {
                rect: Rect::new(road_left + road_width, y, kerb_w, kerb),
                color,
            });
            y += kerb;
            red = !red;
        }

        let dash_period = Self::DASH_PERIOD;
        let dash_len = dash_period * 0.5;
        let dash_phase = self.scroll % dash_period;
        let mut y = dash_phase - dash_period;
        while y < h {
            out.push(SceneRect {
                rect: Rect::new(w * 0.5 - 4.0, y, 8.0, dash_len),
                color: dash,
            });
            y += dash_period;
        }

        let kart_x = self.kart_x.unwrap_or(w * 0.5);
        out.push(SceneRect {
            rect: Rect::new(kart_x - 22.0, h * 0.78, 44.0, 64.0),
            color: kart,
        });

        out
    }
}
