//! The three demos

pub mod marbles;
pub mod scene;
pub mod triangle;

pub use marbles::MarblesDemo;
pub use scene::SceneDemo;
pub use triangle::TriangleDemo;
