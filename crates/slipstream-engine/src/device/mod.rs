//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Adapter/Device/Queue for the game window
//! - configuring the swapchain and keeping it alive across resizes and losses
//! - acquiring frames and providing encoders/views for rendering

mod error;
mod gpu;

pub use error::SurfaceErrorAction;
pub use gpu::{Gpu, GpuFrame, GpuInit};
