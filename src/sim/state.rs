//! World state and core simulation types

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// One of eight compass movement directions.
///
/// `Up` runs toward -y: the simulation's y axis points down, matching the
/// window's coordinate convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
}

impl Direction {
    /// Sample a direction uniformly from all eight.
    pub fn sample(rng: &mut Pcg32) -> Self {
        match rng.random_range(0..8u8) {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Down,
            3 => Direction::Left,
            4 => Direction::UpRight,
            5 => Direction::UpLeft,
            6 => Direction::DownRight,
            _ => Direction::DownLeft,
        }
    }

    #[inline]
    pub fn moves_up(self) -> bool {
        matches!(self, Direction::Up | Direction::UpRight | Direction::UpLeft)
    }

    #[inline]
    pub fn moves_right(self) -> bool {
        matches!(
            self,
            Direction::Right | Direction::UpRight | Direction::DownRight
        )
    }

    #[inline]
    pub fn moves_down(self) -> bool {
        matches!(
            self,
            Direction::Down | Direction::DownRight | Direction::DownLeft
        )
    }

    #[inline]
    pub fn moves_left(self) -> bool {
        matches!(self, Direction::Left | Direction::UpLeft | Direction::DownLeft)
    }
}

/// Positional nudge applied to a marble that hits a wall brick
pub const BRICK_NUDGE: Vec2 = Vec2::new(0.03, 0.04);
/// Larger nudge applied on a paddle hit
pub const PADDLE_NUDGE: Vec2 = Vec2::new(0.06, 0.04);

/// Brick behavior on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickKind {
    /// Indestructible, redirects marbles
    Reflective,
    /// Absorbs hits until `life` reaches zero, then deactivates for good
    Destructible { life: u8 },
    /// The player-controlled paddle
    Paddle,
}

/// A static rectangular obstacle (or the paddle).
#[derive(Debug, Clone)]
pub struct Brick {
    pub pos: Vec2,
    /// Drawn with half this extent per side. The collision reach is the FULL
    /// extent per axis, double the drawn footprint.
    pub width: f32,
    pub color: [f32; 3],
    pub kind: BrickKind,
    /// Cleared permanently when a destructible brick runs out of life
    pub active: bool,
}

impl Brick {
    pub fn new(kind: BrickKind, pos: Vec2, width: f32, color: [f32; 3]) -> Self {
        Self {
            pos,
            width,
            color,
            kind,
            active: true,
        }
    }

    /// Whether this brick still participates in collision tests and drawing.
    #[inline]
    pub fn hittable(&self) -> bool {
        self.active
    }

    /// Apply this brick's hit response and return the positional nudge for
    /// the marble, or `None` if the brick ignores the contact.
    pub fn on_ball_hit(&mut self) -> Option<Vec2> {
        match &mut self.kind {
            BrickKind::Reflective => Some(BRICK_NUDGE),
            BrickKind::Destructible { life } => {
                *life = life.saturating_sub(1);
                if *life == 0 {
                    self.active = false;
                }
                // struck bricks bleach toward white
                self.color[2] = 1.0;
                Some(BRICK_NUDGE)
            }
            BrickKind::Paddle => Some(PADDLE_NUDGE),
        }
    }
}

/// A moving marble. Radius 0 marks a destroyed marble awaiting compaction.
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: [f32; 3],
    pub speed: f32,
    pub direction: Direction,
}

impl Ball {
    #[inline]
    pub fn is_live(&self) -> bool {
        self.radius > 0.0
    }

    /// Redirect after a brick contact: fresh random direction plus a fixed
    /// positional nudge.
    pub fn deflect(&mut self, nudge: Vec2, rng: &mut Pcg32) {
        self.direction = Direction::sample(rng);
        self.pos += nudge;
    }

    /// Advance one step along the current direction.
    ///
    /// The direction decomposes into up/right/down/left components evaluated
    /// in that order against the direction as it stands; a component that
    /// would cross the world boundary resamples the direction instead of
    /// moving, and the remaining components see the new direction.
    pub fn move_one_step(&mut self, rng: &mut Pcg32) {
        if self.direction.moves_up() {
            if self.pos.y > WORLD_MIN + self.radius {
                self.pos.y -= self.speed;
            } else {
                self.direction = Direction::sample(rng);
            }
        }
        if self.direction.moves_right() {
            if self.pos.x < WORLD_MAX - self.radius {
                self.pos.x += self.speed;
            } else {
                self.direction = Direction::sample(rng);
            }
        }
        if self.direction.moves_down() {
            if self.pos.y < WORLD_MAX - self.radius {
                self.pos.y += self.speed;
            } else {
                self.direction = Direction::sample(rng);
            }
        }
        if self.direction.moves_left() {
            if self.pos.x > WORLD_MIN + self.radius {
                self.pos.x -= self.speed;
            } else {
                self.direction = Direction::sample(rng);
            }
        }
    }
}

/// Complete simulation state. Owns every entity plus the run's RNG; update
/// and render code receives this context instead of reaching for globals.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub seed: u64,
    pub rng: Pcg32,
    pub time_ticks: u64,
    pub paddle: Brick,
    pub bricks: Vec<Brick>,
    pub balls: Vec<Ball>,
    next_id: u32,
}

impl WorldState {
    /// Create the standard layout: a paddle on the bottom edge, two
    /// reflective "eyes" and a seven-brick destructible "mouth".
    pub fn new(seed: u64) -> Self {
        let eye = [0.0, 0.68, 0.93];
        let tooth = [1.0, 1.0, 0.0];
        let bricks = vec![
            Brick::new(BrickKind::Reflective, Vec2::new(0.4, 0.4), 0.2, eye),
            Brick::new(BrickKind::Reflective, Vec2::new(-0.4, 0.4), 0.2, eye),
            Brick::destructible(Vec2::new(-0.1, -0.3), 0.1, tooth),
            Brick::destructible(Vec2::new(0.0, -0.3), 0.1, tooth),
            Brick::destructible(Vec2::new(0.1, -0.3), 0.1, tooth),
            Brick::destructible(Vec2::new(-0.2, -0.2), 0.1, tooth),
            Brick::destructible(Vec2::new(0.2, -0.2), 0.1, tooth),
            Brick::destructible(Vec2::new(0.3, -0.1), 0.1, tooth),
            Brick::destructible(Vec2::new(-0.3, -0.1), 0.1, tooth),
        ];
        let paddle = Brick::new(
            BrickKind::Paddle,
            Vec2::new(0.0, -1.0),
            0.2,
            [0.58, 0.58, 0.58],
        );
        Self::with_layout(seed, paddle, bricks)
    }

    /// Build a world around an explicit layout.
    pub fn with_layout(seed: u64, paddle: Brick, bricks: Vec<Brick>) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            paddle,
            bricks,
            balls: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a marble at the origin with a random direction and color.
    pub fn spawn_ball(&mut self) {
        let id = self.next_entity_id();
        let direction = Direction::sample(&mut self.rng);
        let color = [
            self.rng.random_range(0.2..1.0),
            self.rng.random_range(0.2..1.0),
            self.rng.random_range(0.2..1.0),
        ];
        self.balls.push(Ball {
            id,
            pos: Vec2::ZERO,
            radius: BALL_RADIUS,
            color,
            speed: BALL_SPEED,
            direction,
        });
    }

    /// Count of marbles still in play.
    pub fn live_balls(&self) -> usize {
        self.balls.iter().filter(|b| b.is_live()).count()
    }
}

impl Brick {
    fn destructible(pos: Vec2, width: f32, color: [f32; 3]) -> Self {
        Self::new(BrickKind::Destructible { life: BRICK_LIFE }, pos, width, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_adds_exactly_one_ball_at_origin() {
        let mut world = WorldState::new(7);
        assert!(world.balls.is_empty());

        world.spawn_ball();
        assert_eq!(world.balls.len(), 1);
        let ball = &world.balls[0];
        assert_eq!(ball.pos, Vec2::ZERO);
        assert_eq!(ball.radius, BALL_RADIUS);
        assert_eq!(ball.speed, BALL_SPEED);
        for c in ball.color {
            assert!((0.2..1.0).contains(&c));
        }

        world.spawn_ball();
        assert_eq!(world.balls.len(), 2);
        assert_ne!(world.balls[0].id, world.balls[1].id);
    }

    #[test]
    fn spawns_are_seed_deterministic() {
        let mut a = WorldState::new(42);
        let mut b = WorldState::new(42);
        for _ in 0..10 {
            a.spawn_ball();
            b.spawn_ball();
        }
        for (x, y) in a.balls.iter().zip(&b.balls) {
            assert_eq!(x.direction, y.direction);
            assert_eq!(x.color, y.color);
        }
    }

    #[test]
    fn destructible_deactivates_exactly_at_zero_life() {
        let mut brick = Brick::destructible(Vec2::ZERO, 0.1, [1.0, 1.0, 0.0]);

        for hit in 1..=BRICK_LIFE {
            assert!(brick.active, "brick died early at hit {hit}");
            let nudge = brick.on_ball_hit();
            assert_eq!(nudge, Some(BRICK_NUDGE));
            // first hit already bleaches the blue channel
            assert_eq!(brick.color[2], 1.0);
            let BrickKind::Destructible { life } = brick.kind else {
                panic!("kind changed");
            };
            assert_eq!(life, BRICK_LIFE - hit);
        }
        assert!(!brick.active);

        // a dead brick never reactivates
        brick.on_ball_hit();
        assert!(!brick.active);
    }

    #[test]
    fn reflective_and_paddle_keep_their_nudges() {
        let mut wall = Brick::new(BrickKind::Reflective, Vec2::ZERO, 0.2, [0.0; 3]);
        assert_eq!(wall.on_ball_hit(), Some(BRICK_NUDGE));
        assert!(wall.active);

        let mut paddle = Brick::new(BrickKind::Paddle, Vec2::ZERO, 0.2, [0.0; 3]);
        assert_eq!(paddle.on_ball_hit(), Some(PADDLE_NUDGE));
    }

    #[test]
    fn up_direction_decrements_y() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut ball = Ball {
            id: 1,
            pos: Vec2::ZERO,
            radius: 0.05,
            color: [1.0; 3],
            speed: 0.03,
            direction: Direction::Up,
        };
        ball.move_one_step(&mut rng);
        assert!((ball.pos.y - (-0.03)).abs() < 1e-6);
        assert_eq!(ball.pos.x, 0.0);
    }

    #[test]
    fn blocked_axis_resamples_instead_of_moving() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ball = Ball {
            id: 1,
            pos: Vec2::new(0.97, 0.0),
            radius: 0.05,
            color: [1.0; 3],
            speed: 0.03,
            direction: Direction::Right,
        };
        // x == 0.97 > 1 - 0.05, so the rightward move is refused. The
        // resampled direction may still move the remaining axes this step.
        ball.move_one_step(&mut rng);
        assert!(ball.pos.x <= 0.97);
        assert!(ball.pos.y.abs() <= 0.03 + 1e-6);
    }
}
