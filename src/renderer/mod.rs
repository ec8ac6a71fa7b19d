//! WebGPU rendering module
//!
//! Draw commands are tessellated into colored triangles in viewport pixels and
//! drawn by a single alpha-blended pipeline. Text is left to the host overlay.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
