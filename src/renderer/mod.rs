//! wgpu rendering module
//!
//! A shared `GpuContext` owns the surface and device; each demo drives one of
//! two pipelines: `FlatPipeline` for colored 2D triangle lists rebuilt every
//! frame, `ScenePipeline` for the depth-tested, textured, Phong-lit 3D scene.

pub mod context;
pub mod flat_pipeline;
pub mod mesh;
pub mod scene_pipeline;
pub mod shapes;
pub mod texture;
pub mod vertex;

pub use context::GpuContext;
pub use flat_pipeline::FlatPipeline;
pub use mesh::{GpuMesh, MeshData};
pub use scene_pipeline::{Material, SceneLights, SceneObject, ScenePipeline};
pub use texture::Texture;
pub use vertex::{FlatVertex, SceneVertex};
