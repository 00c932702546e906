//! The marble toy: paddle, bricks, and randomly bouncing marbles
//!
//! Space spawns a marble at the center; the arrow keys slide the paddle.
//! The simulation advances one tick per presented frame.

use std::time::{SystemTime, UNIX_EPOCH};

use winit::keyboard::KeyCode;

use crate::app::Demo;
use crate::consts::BALL_SEGMENTS;
use crate::input::InputState;
use crate::renderer::shapes::{push_circle, push_square};
use crate::renderer::{FlatPipeline, FlatVertex, GpuContext};
use crate::settings::Settings;
use crate::sim::{Brick, TickInput, WorldState, tick};

pub struct MarblesDemo {
    pipeline: FlatPipeline,
    world: WorldState,
    vertices: Vec<FlatVertex>,
}

impl MarblesDemo {
    pub fn new(gpu: &GpuContext, settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
        log::info!("marble world seed: {seed}");

        Self {
            pipeline: FlatPipeline::new(gpu, wgpu::Color::BLACK, true),
            world: WorldState::new(seed),
            vertices: Vec::new(),
        }
    }

    fn tessellate(&mut self) {
        self.vertices.clear();

        push_brick(&mut self.vertices, &self.world.paddle);
        for brick in &self.world.bricks {
            push_brick(&mut self.vertices, brick);
        }
        for ball in self.world.balls.iter().filter(|b| b.is_live()) {
            let [r, g, b] = ball.color;
            push_circle(
                &mut self.vertices,
                ball.pos,
                ball.radius,
                [r, g, b, 1.0],
                BALL_SEGMENTS,
            );
        }
    }
}

fn push_brick(out: &mut Vec<FlatVertex>, brick: &Brick) {
    if !brick.active {
        return;
    }
    let [r, g, b] = brick.color;
    push_square(out, brick.pos, brick.width / 2.0, [r, g, b, 1.0]);
}

impl Demo for MarblesDemo {
    fn frame(
        &mut self,
        gpu: &mut GpuContext,
        input: &InputState,
        _dt: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let commands = TickInput {
            spawn: input.pressed(KeyCode::Space),
            move_left: input.held(KeyCode::ArrowLeft),
            move_right: input.held(KeyCode::ArrowRight),
        };
        tick(&mut self.world, &commands);

        self.tessellate();
        self.pipeline.render(gpu, &self.vertices)
    }
}
