//! Depth-tested, textured, Phong-lit pipeline for the 3D scene
//!
//! One globals uniform (view-projection, camera position, key + fill lights)
//! in bind group 0, and a per-object bind group 1 carrying the material
//! uniform plus the diffuse texture. Object transforms are baked into the
//! vertex buffers, so nothing per-object changes frame to frame.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::context::GpuContext;
use super::mesh::{GpuMesh, MeshData};
use super::texture::Texture;
use super::vertex::SceneVertex;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    key_dir: [f32; 4],
    key_color: [f32; 4],
    fill_dir: [f32; 4],
    fill_color: [f32; 4],
    ambient: [f32; 4],
}

/// Two directional lights plus an ambient floor.
#[derive(Debug, Clone, Copy)]
pub struct SceneLights {
    pub key_dir: Vec3,
    pub key_color: [f32; 3],
    pub fill_dir: Vec3,
    pub fill_color: [f32; 3],
    pub ambient: [f32; 3],
}

impl Default for SceneLights {
    fn default() -> Self {
        Self {
            key_dir: Vec3::new(-0.4, -1.0, -0.3),
            key_color: [1.0, 0.98, 0.92],
            fill_dir: Vec3::new(0.6, -0.2, 0.5),
            fill_color: [0.18, 0.2, 0.28],
            ambient: [0.12, 0.12, 0.14],
        }
    }
}

/// Surface properties for one object.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub tint: [f32; 4],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            tint: [1.0; 4],
            specular: [0.5, 0.5, 0.5],
            shininess: 32.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct MaterialUniform {
    tint: [f32; 4],
    specular: [f32; 4],
}

impl From<Material> for MaterialUniform {
    fn from(m: Material) -> Self {
        Self {
            tint: m.tint,
            specular: [m.specular[0], m.specular[1], m.specular[2], m.shininess],
        }
    }
}

/// One draw-list entry: a baked mesh plus its material/texture bind group.
pub struct SceneObject {
    mesh: GpuMesh,
    bind_group: wgpu::BindGroup,
}

pub struct ScenePipeline {
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    depth_view: wgpu::TextureView,
    lights: SceneLights,
    clear_color: wgpu::Color,
}

impl ScenePipeline {
    pub fn new(gpu: &GpuContext, lights: SceneLights, clear_color: wgpu::Color) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_globals"),
            contents: bytemuck::bytes_of(&Globals {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                camera_pos: [0.0; 4],
                key_dir: [0.0; 4],
                key_color: [0.0; 4],
                fill_dir: [0.0; 4],
                fill_color: [0.0; 4],
                ambient: [0.0; 4],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_globals_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_object_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &object_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[SceneVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let depth_view = create_depth_view(device, gpu.size.0, gpu.size.1);

        Self {
            pipeline,
            globals_buffer,
            globals_bind_group,
            object_layout,
            depth_view,
            lights,
            clear_color,
        }
    }

    /// Recreate the depth buffer after a surface resize.
    pub fn resize(&mut self, gpu: &GpuContext) {
        self.depth_view = create_depth_view(&gpu.device, gpu.size.0, gpu.size.1);
    }

    /// Bake a transform into a mesh, upload it, and pair it with a material
    /// and diffuse texture.
    pub fn build_object(
        &self,
        gpu: &GpuContext,
        mesh: &MeshData,
        model: Mat4,
        material: Material,
        texture: &Texture,
    ) -> SceneObject {
        let baked = mesh.transformed(model);
        let gpu_mesh = GpuMesh::upload(&gpu.device, &baked);

        let material_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("scene_material"),
                contents: bytemuck::bytes_of(&MaterialUniform::from(material)),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_object_bind_group"),
            layout: &self.object_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: material_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        SceneObject {
            mesh: gpu_mesh,
            bind_group,
        }
    }

    /// Draw the object list with the given camera.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        objects: &[SceneObject],
        view_proj: Mat4,
        camera_pos: Vec3,
    ) -> Result<(), wgpu::SurfaceError> {
        let globals = Globals {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: [camera_pos.x, camera_pos.y, camera_pos.z, 1.0],
            key_dir: dir4(self.lights.key_dir),
            key_color: rgb4(self.lights.key_color),
            fill_dir: dir4(self.lights.fill_dir),
            fill_color: rgb4(self.lights.fill_color),
            ambient: rgb4(self.lights.ambient),
        };
        gpu.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let output = gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for object in objects {
                render_pass.set_bind_group(1, &object.bind_group, &[]);
                render_pass.set_vertex_buffer(0, object.mesh.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(object.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..object.mesh.index_count, 0, 0..1);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("scene_depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn dir4(v: Vec3) -> [f32; 4] {
    let n = v.normalize_or_zero();
    [n.x, n.y, n.z, 0.0]
}

fn rgb4(c: [f32; 3]) -> [f32; 4] {
    [c[0], c[1], c[2], 1.0]
}
