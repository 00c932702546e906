//! Textured still-life scene with a free-fly camera
//!
//! A tabletop of procedural primitives, each placed by a static transform
//! baked at build time. WASD moves, Q/E rises and sinks, the mouse looks,
//! the scroll wheel zooms, and P/O switch between perspective and
//! orthographic projection.

use std::path::{Path, PathBuf};

use glam::{Mat4, Quat, Vec3};
use winit::keyboard::KeyCode;

use crate::app::Demo;
use crate::camera::Camera;
use crate::input::InputState;
use crate::renderer::{
    GpuContext, Material, SceneLights, SceneObject, ScenePipeline, Texture, mesh,
};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Projection {
    Perspective,
    Orthographic,
}

pub struct SceneDemo {
    pipeline: ScenePipeline,
    objects: Vec<SceneObject>,
    camera: Camera,
    projection: Projection,
}

impl SceneDemo {
    pub fn new(gpu: &GpuContext, settings: &Settings) -> Self {
        let clear = wgpu::Color {
            r: 0.05,
            g: 0.06,
            b: 0.09,
            a: 1.0,
        };
        let pipeline = ScenePipeline::new(gpu, SceneLights::default(), clear);
        let objects = build_still_life(gpu, &pipeline, Path::new(&settings.texture_dir));

        let mut camera = Camera::new(Vec3::new(0.0, 1.5, 5.0));
        camera.move_speed = settings.move_speed;
        camera.sensitivity = settings.mouse_sensitivity;
        camera.zoom = settings.fov_degrees;

        Self {
            pipeline,
            objects,
            camera,
            projection: Projection::Perspective,
        }
    }

    fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective => {
                Mat4::perspective_rh(self.camera.zoom.to_radians(), aspect, 0.1, 100.0)
            }
            Projection::Orthographic => {
                let half_h = 4.0;
                let half_w = half_h * aspect;
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, 0.1, 100.0)
            }
        }
    }

    fn drive_camera(&mut self, input: &InputState, dt: f32) {
        let step = self.camera.move_speed * dt;
        let axis = |pos: KeyCode, neg: KeyCode| {
            (input.held(pos) as i32 - input.held(neg) as i32) as f32
        };
        let forward = axis(KeyCode::KeyW, KeyCode::KeyS) * step;
        let strafe = axis(KeyCode::KeyD, KeyCode::KeyA) * step;
        let vertical = axis(KeyCode::KeyE, KeyCode::KeyQ) * step;
        self.camera.translate(forward, strafe, vertical);

        let look = input.mouse_delta();
        if look != glam::Vec2::ZERO {
            self.camera.look(look.x, look.y);
        }
        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            self.camera.zoom_by(scroll);
        }

        if input.pressed(KeyCode::KeyP) && self.projection != Projection::Perspective {
            self.projection = Projection::Perspective;
            log::info!("projection: perspective");
        }
        if input.pressed(KeyCode::KeyO) && self.projection != Projection::Orthographic {
            self.projection = Projection::Orthographic;
            log::info!("projection: orthographic");
        }
    }
}

impl Demo for SceneDemo {
    fn resize(&mut self, gpu: &GpuContext) {
        self.pipeline.resize(gpu);
    }

    fn frame(
        &mut self,
        gpu: &mut GpuContext,
        input: &InputState,
        dt: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        self.drive_camera(input, dt);

        let view_proj = self.projection_matrix(gpu.aspect()) * self.camera.view_matrix();
        self.pipeline
            .render(gpu, &self.objects, view_proj, self.camera.position)
    }
}

/// Assemble the tabletop: one object per primitive kind, textures loaded
/// from fixed names under the texture directory.
fn build_still_life(
    gpu: &GpuContext,
    pipeline: &ScenePipeline,
    texture_dir: &Path,
) -> Vec<SceneObject> {
    let load = |name: &str| -> Texture {
        let path: PathBuf = texture_dir.join(name);
        Texture::load_or_white(&gpu.device, &gpu.queue, &path, true)
    };

    let wood = load("wood.png");
    let book = load("book.png");
    let ceramic = load("ceramic.png");
    let marble = load("marble.png");
    let brass = load("brass.png");
    let felt = load("felt.png");

    let matte = Material {
        specular: [0.1, 0.1, 0.1],
        shininess: 8.0,
        ..Default::default()
    };
    let glossy = Material {
        specular: [0.9, 0.9, 0.9],
        shininess: 64.0,
        ..Default::default()
    };

    let place = |translation: Vec3, rotation: Quat, scale: Vec3| {
        Mat4::from_scale_rotation_translation(scale, rotation, translation)
    };

    vec![
        // tabletop
        pipeline.build_object(
            gpu,
            &mesh::plane(10.0, 10.0, 4.0),
            Mat4::IDENTITY,
            matte,
            &wood,
        ),
        // a closed book lying flat
        pipeline.build_object(
            gpu,
            &mesh::cube(1.0),
            place(
                Vec3::new(-1.2, 0.15, 0.5),
                Quat::from_rotation_y(0.35),
                Vec3::new(1.6, 0.3, 1.1),
            ),
            matte,
            &book,
        ),
        // a mug
        pipeline.build_object(
            gpu,
            &mesh::cylinder(0.35, 0.9, 32),
            place(Vec3::new(0.8, 0.45, 0.3), Quat::IDENTITY, Vec3::ONE),
            glossy,
            &ceramic,
        ),
        // an ornament ball
        pipeline.build_object(
            gpu,
            &mesh::sphere(0.35, 32, 24),
            place(Vec3::new(-0.5, 0.35, -0.8), Quat::IDENTITY, Vec3::ONE),
            glossy,
            &marble,
        ),
        // a napkin ring on its side
        pipeline.build_object(
            gpu,
            &mesh::torus(0.4, 0.12, 36, 18),
            place(
                Vec3::new(1.6, 0.12, -1.0),
                Quat::from_rotation_z(0.2),
                Vec3::ONE,
            ),
            glossy,
            &brass,
        ),
        // a door stop wedge
        pipeline.build_object(
            gpu,
            &mesh::prism(0.8, 0.5, 1.2),
            place(
                Vec3::new(0.1, 0.25, -1.8),
                Quat::from_rotation_y(-0.6),
                Vec3::ONE,
            ),
            matte,
            &felt,
        ),
    ]
}
