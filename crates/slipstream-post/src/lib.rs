//! Full-screen post-processing for the race view.
//!
//! The only effect at this layer is motion blur: while the kart is boosting,
//! the scene is rendered into an off-screen capture target and composited back
//! to the surface through a radial-blur shader whose strength decays over
//! time. When the hardware cannot support the capture path, or the player has
//! turned post-processing off, the scene renders straight to the surface and
//! this crate stays out of the way.
//!
//! Typical per-frame flow, inside the engine's draw closure:
//!
//! ```text
//! pass.begin_capture(encoder, players);
//! // draw the scene into pass.scene_view(surface_view)
//! pass.end_capture();
//! pass.render(ctx, target);
//! ```

pub mod boost;
pub mod caps;
pub mod options;
pub mod pass;
pub mod shaders;
pub mod target;

pub use options::PostOptions;
pub use pass::MotionBlurPass;
pub use shaders::ShaderDir;
