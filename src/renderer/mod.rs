//! Rendering module
//!
//! `scene` turns a read-only view of the game state into a triangle list in
//! playfield coordinates; `pipeline` maps it to clip space and draws it with
//! wgpu.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{SceneOptions, build_scene};
pub use vertex::{Vertex, colors};
