//! 2D shape tessellation for the flat pipeline

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::FlatVertex;

/// Append a filled circle as a triangle fan around its center.
pub fn push_circle(
    out: &mut Vec<FlatVertex>,
    center: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    if radius <= 0.0 || segments < 3 {
        return;
    }
    out.reserve((segments * 3) as usize);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        out.push(FlatVertex::new(center.x, center.y, color));
        out.push(FlatVertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(FlatVertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Append an axis-aligned filled square with the given half-side.
pub fn push_square(out: &mut Vec<FlatVertex>, center: Vec2, half_side: f32, color: [f32; 4]) {
    let (l, r) = (center.x - half_side, center.x + half_side);
    let (b, t) = (center.y - half_side, center.y + half_side);

    out.push(FlatVertex::new(l, b, color));
    out.push(FlatVertex::new(r, b, color));
    out.push(FlatVertex::new(r, t, color));

    out.push(FlatVertex::new(l, b, color));
    out.push(FlatVertex::new(r, t, color));
    out.push(FlatVertex::new(l, t, color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_emits_three_vertices_per_segment() {
        let mut out = Vec::new();
        push_circle(&mut out, Vec2::ZERO, 1.0, [1.0; 4], 16);
        assert_eq!(out.len(), 48);
        // every rim vertex sits on the radius
        for v in out.iter().skip(1).step_by(3) {
            let r = (v.position[0].powi(2) + v.position[1].powi(2)).sqrt();
            assert!((r - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn zero_radius_circle_emits_nothing() {
        let mut out = Vec::new();
        push_circle(&mut out, Vec2::ZERO, 0.0, [1.0; 4], 360);
        assert!(out.is_empty());
    }

    #[test]
    fn square_emits_two_triangles() {
        let mut out = Vec::new();
        push_square(&mut out, Vec2::new(0.5, -0.5), 0.1, [1.0; 4]);
        assert_eq!(out.len(), 6);
        for v in &out {
            assert!((v.position[0] - 0.5).abs() <= 0.1 + 1e-6);
            assert!((v.position[1] + 0.5).abs() <= 0.1 + 1e-6);
        }
    }
}
