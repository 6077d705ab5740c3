//! WebGPU rendering module
//!
//! The scene is built as flat-colored triangles in playfield coordinates,
//! then mapped to NDC and drawn by a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
