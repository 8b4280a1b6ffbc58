//! Slipstream engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the game layers:
//! window/event loop, wgpu device and surface management, frame timing,
//! keyboard input, and the basic scene renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod geom;
pub mod render;
pub mod paint;
