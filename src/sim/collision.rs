//! Overlap tests for marbles, bricks, and the paddle
//!
//! Both tests are center-in-box checks, not true circle intersection. The
//! brick test reaches the brick's FULL width on each axis (double the drawn
//! half-side), and the marble-pair test reuses the radius as a box
//! half-width. The reach and the `>` / `<=` bound pairing are load-bearing
//! for the toy's feel and are covered by tests.

use super::state::{Ball, Brick};

/// Does the marble's center fall inside the brick's collision box?
#[inline]
pub fn ball_hits_brick(ball: &Ball, brick: &Brick) -> bool {
    ball.pos.x > brick.pos.x - brick.width
        && ball.pos.x <= brick.pos.x + brick.width
        && ball.pos.y > brick.pos.y - brick.width
        && ball.pos.y <= brick.pos.y + brick.width
}

/// Does `a`'s center fall inside `b`'s radius box, in either orientation?
#[inline]
pub fn balls_overlap(a: &Ball, b: &Ball) -> bool {
    center_in_radius_box(a, b) || center_in_radius_box(b, a)
}

#[inline]
fn center_in_radius_box(a: &Ball, b: &Ball) -> bool {
    a.pos.x > b.pos.x - b.radius
        && a.pos.x <= b.pos.x + b.radius
        && a.pos.y > b.pos.y - b.radius
        && a.pos.y <= b.pos.y + b.radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BrickKind, Direction};
    use glam::Vec2;

    fn ball_at(x: f32, y: f32, radius: f32) -> Ball {
        Ball {
            id: 0,
            pos: Vec2::new(x, y),
            radius,
            color: [1.0; 3],
            speed: 0.03,
            direction: Direction::Up,
        }
    }

    fn brick_at(x: f32, y: f32, width: f32) -> Brick {
        Brick::new(BrickKind::Reflective, Vec2::new(x, y), width, [1.0; 3])
    }

    #[test]
    fn brick_reach_is_the_full_width() {
        let brick = brick_at(0.0, 0.0, 0.1);
        // the drawn square only spans +/-0.05, but the hit box spans +/-0.1
        assert!(ball_hits_brick(&ball_at(0.09, 0.0, 0.05), &brick));
        assert!(ball_hits_brick(&ball_at(0.1, 0.09, 0.05), &brick));
        assert!(!ball_hits_brick(&ball_at(0.11, 0.0, 0.05), &brick));
    }

    #[test]
    fn brick_bounds_are_open_low_closed_high() {
        let brick = brick_at(0.0, 0.0, 0.1);
        // exactly on the upper bound counts, exactly on the lower does not
        assert!(ball_hits_brick(&ball_at(0.1, 0.0, 0.05), &brick));
        assert!(!ball_hits_brick(&ball_at(-0.1, 0.0, 0.05), &brick));
    }

    #[test]
    fn ball_pair_test_uses_radius_as_half_width() {
        let a = ball_at(0.0, 0.0, 0.05);
        let b = ball_at(0.04, 0.04, 0.05);
        assert!(balls_overlap(&a, &b));

        let far = ball_at(0.2, 0.0, 0.05);
        assert!(!balls_overlap(&a, &far));
    }

    #[test]
    fn ball_pair_test_is_symmetric_over_unequal_radii() {
        // a's center sits in b's wide box but not vice versa; the either-way
        // check still reports an overlap regardless of argument order
        let a = ball_at(0.0, 0.0, 0.01);
        let b = ball_at(0.08, 0.0, 0.1);
        assert!(balls_overlap(&a, &b));
        assert!(balls_overlap(&b, &a));
    }
}
