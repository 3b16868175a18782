//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as a flat triangle list: background
//! clear, road markings, then cars.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene;
pub use vertex::Vertex;
