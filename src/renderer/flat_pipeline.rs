//! 2D colored-vertex pipeline
//!
//! Vertex data is rebuilt on the CPU and re-uploaded every frame; the demos
//! using it draw a few hundred triangles at most.

use wgpu::util::DeviceExt;

use super::context::GpuContext;
use super::vertex::FlatVertex;

pub struct FlatPipeline {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    clear_color: wgpu::Color,
    /// Letterbox the x axis so a [-1, 1] square world stays square
    square_world: bool,
}

impl FlatPipeline {
    pub fn new(gpu: &GpuContext, clear_color: wgpu::Color, square_world: bool) -> Self {
        let shader = gpu
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("flat_shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("flat.wgsl").into()),
            });

        let pipeline_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("flat_pipeline_layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline = gpu
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("flat_pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[FlatVertex::desc()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("flat_vertex_buffer"),
                contents: bytemuck::cast_slice(&[FlatVertex::new(0.0, 0.0, [1.0; 4])]),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            pipeline,
            vertex_buffer,
            vertex_count: 0,
            clear_color,
            square_world,
        }
    }

    /// Map a world position into clip space, letterboxing if requested.
    fn to_clip(&self, aspect: f32, x: f32, y: f32) -> (f32, f32) {
        if !self.square_world {
            return (x, y);
        }
        if aspect > 1.0 {
            (x / aspect, y)
        } else {
            (x, y * aspect)
        }
    }

    /// Upload the frame's vertices and draw them.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        vertices: &[FlatVertex],
    ) -> Result<(), wgpu::SurfaceError> {
        let aspect = gpu.aspect();
        let clip_vertices: Vec<FlatVertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = self.to_clip(aspect, v.position[0], v.position[1]);
                FlatVertex::new(x, y, v.color)
            })
            .collect();

        if !clip_vertices.is_empty() {
            self.vertex_buffer =
                gpu.device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("flat_vertex_buffer"),
                        contents: bytemuck::cast_slice(&clip_vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
        }
        self.vertex_count = clip_vertices.len() as u32;

        let output = gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("flat_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("flat_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.vertex_count > 0 {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
