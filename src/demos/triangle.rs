//! Two flat-shaded triangles with interpolated vertex colors

use crate::app::Demo;
use crate::input::InputState;
use crate::renderer::{FlatPipeline, FlatVertex, GpuContext};

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

pub struct TriangleDemo {
    pipeline: FlatPipeline,
    vertices: Vec<FlatVertex>,
}

impl TriangleDemo {
    pub fn new(gpu: &GpuContext) -> Self {
        let pipeline = FlatPipeline::new(gpu, wgpu::Color::BLACK, false);
        let vertices = vec![
            // left triangle
            FlatVertex::new(-0.9, -0.5, RED),
            FlatVertex::new(-0.1, -0.5, GREEN),
            FlatVertex::new(-0.5, 0.5, BLUE),
            // right triangle
            FlatVertex::new(0.1, -0.5, GREEN),
            FlatVertex::new(0.9, -0.5, YELLOW),
            FlatVertex::new(0.5, 0.5, RED),
        ];
        Self { pipeline, vertices }
    }
}

impl Demo for TriangleDemo {
    fn frame(
        &mut self,
        gpu: &mut GpuContext,
        _input: &InputState,
        _dt: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        self.pipeline.render(gpu, &self.vertices)
    }
}
