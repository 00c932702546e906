//! Marbleworks - a small GPU sketchbook
//!
//! Three demos share one renderer and one window shell:
//! - `triangle`: two flat-shaded triangles
//! - `scene`: a textured, Phong-lit still life with a free-fly camera
//! - `marbles`: a paddle-and-bricks toy with randomly bouncing marbles
//!
//! Core modules:
//! - `sim`: the marble simulation (movement, collisions, lifecycle)
//! - `renderer`: wgpu pipelines, meshes, textures
//! - `app`: winit application shell and the `Demo` trait
//! - `demos`: the three demo implementations

pub mod app;
pub mod camera;
pub mod demos;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Shared configuration constants
pub mod consts {
    /// Simulation world extent on both axes
    pub const WORLD_MIN: f32 = -1.0;
    pub const WORLD_MAX: f32 = 1.0;

    /// Marble defaults
    pub const BALL_RADIUS: f32 = 0.05;
    pub const BALL_SPEED: f32 = 0.03;
    /// Segments in a marble's tessellated fan
    pub const BALL_SEGMENTS: u32 = 360;

    /// Destructible bricks absorb this many hits
    pub const BRICK_LIFE: u8 = 5;

    /// Paddle movement per frame while an arrow key is held
    pub const PADDLE_STEP: f32 = 0.05;

    /// Dead marbles are swept out of the world every this many ticks
    pub const COMPACT_INTERVAL_TICKS: u64 = 120;
}
