//! WebGPU rendering module
//!
//! Live cells are drawn as flat-colored quads over a cleared background.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, pixel_to_ndc};
pub use vertex::Vertex;
