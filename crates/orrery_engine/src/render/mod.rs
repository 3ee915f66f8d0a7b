//! Rendering
//!
//! The ray tracer shades individual rays; the frame renderer drives it
//! once per pixel over a snapshot and produces a framebuffer for the
//! image writer.

mod frame;
mod tracer;

pub use frame::{render_frame, Framebuffer, FIELD_OF_VIEW};
pub use tracer::{background_color, trace, MAX_RAY_DEPTH};
