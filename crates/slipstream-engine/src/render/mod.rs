//! GPU rendering subsystem.
//!
//! Renderers issue GPU commands via wgpu and own their resources (pipelines,
//! buffers), creating them lazily against the active target format.
//!
//! Convention:
//! - CPU geometry is in pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
pub mod quad;
mod rect;

pub use ctx::{RenderCtx, RenderTarget};
pub use rect::{RectRenderer, SceneRect};
