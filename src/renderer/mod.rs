//! WebGPU rendering module
//!
//! One colored-triangle pipeline; every neon shape is built CPU-side as a
//! triangle list each frame and drawn in a single pass.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
