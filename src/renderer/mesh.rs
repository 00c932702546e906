//! Procedural meshes for the 3D scene
//!
//! Plane, box, cylinder, sphere, torus, and triangular prism, generated as
//! indexed triangle lists. Transforms are static in the scene, so
//! `MeshData::transformed` bakes the model matrix into the vertex data once
//! at build time and the shader only applies the view-projection.

use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::TAU;
use wgpu::util::DeviceExt;

use super::vertex::SceneVertex;

/// CPU-side mesh: vertices plus triangle indices.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<SceneVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices
            .push(SceneVertex::new(position.to_array(), normal.to_array(), uv));
        idx
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    /// Bake a model transform into the vertex data. Normals go through the
    /// inverse-transpose so nonuniform scales stay correct.
    pub fn transformed(&self, model: Mat4) -> MeshData {
        let normal_matrix = Mat3::from_mat4(model).inverse().transpose();
        let vertices = self
            .vertices
            .iter()
            .map(|v| {
                let p = model.transform_point3(Vec3::from_array(v.position));
                let n = (normal_matrix * Vec3::from_array(v.normal)).normalize_or_zero();
                SceneVertex::new(p.to_array(), n.to_array(), v.uv)
            })
            .collect();
        MeshData {
            vertices,
            indices: self.indices.clone(),
        }
    }
}

/// A flat plane in the xz plane, centered at the origin, normal +y.
pub fn plane(width: f32, depth: f32, uv_scale: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let (hw, hd) = (width / 2.0, depth / 2.0);
    let n = Vec3::Y;

    let a = mesh.push(Vec3::new(-hw, 0.0, -hd), n, [0.0, 0.0]);
    let b = mesh.push(Vec3::new(-hw, 0.0, hd), n, [0.0, uv_scale]);
    let c = mesh.push(Vec3::new(hw, 0.0, hd), n, [uv_scale, uv_scale]);
    let d = mesh.push(Vec3::new(hw, 0.0, -hd), n, [uv_scale, 0.0]);
    mesh.quad(a, b, c, d);
    mesh
}

/// A unit-ish box centered at the origin: one quad per face with its own
/// normal, 24 vertices, 36 indices.
pub fn cube(size: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let h = size / 2.0;

    // (normal, four corners counterclockwise seen from outside)
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (
            Vec3::Z,
            [
                Vec3::new(-h, -h, h),
                Vec3::new(h, -h, h),
                Vec3::new(h, h, h),
                Vec3::new(-h, h, h),
            ],
        ),
        (
            Vec3::NEG_Z,
            [
                Vec3::new(h, -h, -h),
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, h, -h),
                Vec3::new(h, h, -h),
            ],
        ),
        (
            Vec3::X,
            [
                Vec3::new(h, -h, h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, h, -h),
                Vec3::new(h, h, h),
            ],
        ),
        (
            Vec3::NEG_X,
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, -h, h),
                Vec3::new(-h, h, h),
                Vec3::new(-h, h, -h),
            ],
        ),
        (
            Vec3::Y,
            [
                Vec3::new(-h, h, h),
                Vec3::new(h, h, h),
                Vec3::new(h, h, -h),
                Vec3::new(-h, h, -h),
            ],
        ),
        (
            Vec3::NEG_Y,
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, -h, h),
                Vec3::new(-h, -h, h),
            ],
        ),
    ];

    let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    for (normal, corners) in faces {
        let idx: Vec<u32> = corners
            .iter()
            .zip(uvs)
            .map(|(&p, uv)| mesh.push(p, normal, uv))
            .collect();
        mesh.quad(idx[0], idx[1], idx[2], idx[3]);
    }
    mesh
}

/// A capped cylinder along the y axis, centered at the origin.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let h = height / 2.0;

    // side: duplicated ring vertices so the seam gets clean UVs
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let theta = t * TAU;
        let (sin, cos) = theta.sin_cos();
        let normal = Vec3::new(cos, 0.0, sin);
        mesh.push(Vec3::new(radius * cos, -h, radius * sin), normal, [t, 1.0]);
        mesh.push(Vec3::new(radius * cos, h, radius * sin), normal, [t, 0.0]);
    }
    for i in 0..segments {
        let base = i * 2;
        mesh.quad(base, base + 2, base + 3, base + 1);
    }

    // caps: center fan with axial normals
    for &(y, normal) in &[(-h, Vec3::NEG_Y), (h, Vec3::Y)] {
        let center = mesh.push(Vec3::new(0.0, y, 0.0), normal, [0.5, 0.5]);
        let ring_start = mesh.vertices.len() as u32;
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.push(
                Vec3::new(radius * cos, y, radius * sin),
                normal,
                [0.5 + cos / 2.0, 0.5 + sin / 2.0],
            );
        }
        for i in 0..segments {
            mesh.indices
                .extend_from_slice(&[center, ring_start + i, ring_start + i + 1]);
        }
    }
    mesh
}

/// A latitude/longitude sphere centered at the origin.
pub fn sphere(radius: f32, sectors: u32, stacks: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let phi = v * std::f32::consts::PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for sector in 0..=sectors {
            let u = sector as f32 / sectors as f32;
            let theta = u * TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let normal = Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta);
            mesh.push(normal * radius, normal, [u, v]);
        }
    }

    let stride = sectors + 1;
    for stack in 0..stacks {
        for sector in 0..sectors {
            let a = stack * stride + sector;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    mesh
}

/// A torus around the y axis, centered at the origin.
pub fn torus(major_radius: f32, minor_radius: f32, major_segments: u32, minor_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for i in 0..=major_segments {
        let u = i as f32 / major_segments as f32;
        let theta = u * TAU;
        let (sin_theta, cos_theta) = theta.sin_cos();
        let ring_center = Vec3::new(major_radius * cos_theta, 0.0, major_radius * sin_theta);

        for j in 0..=minor_segments {
            let v = j as f32 / minor_segments as f32;
            let phi = v * TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = Vec3::new(cos_phi * cos_theta, sin_phi, cos_phi * sin_theta);
            mesh.push(ring_center + normal * minor_radius, normal, [u, v]);
        }
    }

    let stride = minor_segments + 1;
    for i in 0..major_segments {
        for j in 0..minor_segments {
            let a = i * stride + j;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    mesh
}

/// A triangular prism: an isoceles cross-section in the xy plane extruded
/// along z, centered at the origin.
pub fn prism(width: f32, height: f32, depth: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);

    // triangle corners, apex up
    let apex = Vec3::new(0.0, hh, 0.0);
    let left = Vec3::new(-hw, -hh, 0.0);
    let right = Vec3::new(hw, -hh, 0.0);

    // front and back faces
    for &(z, normal) in &[(hd, Vec3::Z), (-hd, Vec3::NEG_Z)] {
        let offset = Vec3::new(0.0, 0.0, z);
        let a = mesh.push(left + offset, normal, [0.0, 1.0]);
        let b = mesh.push(right + offset, normal, [1.0, 1.0]);
        let c = mesh.push(apex + offset, normal, [0.5, 0.0]);
        mesh.indices.extend_from_slice(&[a, b, c]);
    }

    // bottom
    let n = Vec3::NEG_Y;
    let a = mesh.push(Vec3::new(-hw, -hh, hd), n, [0.0, 1.0]);
    let b = mesh.push(Vec3::new(hw, -hh, hd), n, [1.0, 1.0]);
    let c = mesh.push(Vec3::new(hw, -hh, -hd), n, [1.0, 0.0]);
    let d = mesh.push(Vec3::new(-hw, -hh, -hd), n, [0.0, 0.0]);
    mesh.quad(a, b, c, d);

    // slanted sides
    for (foot, flip) in [(right, false), (left, true)] {
        let edge = (apex - foot).normalize();
        let mut normal = edge.cross(Vec3::Z).normalize();
        if flip {
            normal = -normal;
        }
        let a = mesh.push(foot + Vec3::new(0.0, 0.0, hd), normal, [0.0, 1.0]);
        let b = mesh.push(foot + Vec3::new(0.0, 0.0, -hd), normal, [1.0, 1.0]);
        let c = mesh.push(apex + Vec3::new(0.0, 0.0, -hd), normal, [1.0, 0.0]);
        let d = mesh.push(apex + Vec3::new(0.0, 0.0, hd), normal, [0.0, 0.0]);
        mesh.quad(a, b, c, d);
    }

    mesh
}

/// Mesh data uploaded to GPU buffers.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(mesh: &MeshData) {
        for v in &mesh.vertices {
            let len = Vec3::from_array(v.normal).length();
            assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
        }
    }

    fn assert_indices_in_range(mesh: &MeshData) {
        let count = mesh.vertices.len() as u32;
        assert_eq!(mesh.indices.len() % 3, 0);
        for &i in &mesh.indices {
            assert!(i < count);
        }
    }

    #[test]
    fn plane_is_one_quad() {
        let mesh = plane(10.0, 10.0, 4.0);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn cube_has_per_face_normals() {
        let mesh = cube(1.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_unit_normals(&mesh);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn cylinder_counts() {
        let segments = 24;
        let mesh = cylinder(0.5, 2.0, segments);
        // side ring pairs + 2 caps (center + closed ring each)
        let expected_vertices = 2 * (segments + 1) + 2 * (1 + segments + 1);
        assert_eq!(mesh.vertices.len() as u32, expected_vertices);
        // side quads + 2 cap fans
        assert_eq!(mesh.indices.len() as u32, segments * 6 + 2 * segments * 3);
        assert_unit_normals(&mesh);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn sphere_counts() {
        let mesh = sphere(1.0, 16, 12);
        assert_eq!(mesh.vertices.len(), 17 * 13);
        assert_eq!(mesh.indices.len(), (16 * 12 * 6) as usize);
        assert_unit_normals(&mesh);
        assert_indices_in_range(&mesh);
        // every vertex sits on the sphere
        for v in &mesh.vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_counts() {
        let mesh = torus(1.0, 0.25, 24, 12);
        assert_eq!(mesh.vertices.len(), 25 * 13);
        assert_eq!(mesh.indices.len(), (24 * 12 * 6) as usize);
        assert_unit_normals(&mesh);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn prism_counts() {
        let mesh = prism(1.0, 1.0, 2.0);
        assert_eq!(mesh.vertices.len(), 3 + 3 + 4 + 4 + 4);
        assert_eq!(mesh.indices.len(), 3 + 3 + 6 + 6 + 6);
        assert_unit_normals(&mesh);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn transform_bakes_translation_and_keeps_normals() {
        let mesh = plane(2.0, 2.0, 1.0);
        let moved = mesh.transformed(Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0)));
        for v in &moved.vertices {
            assert_eq!(v.position[1], 3.0);
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }

        // nonuniform scale still yields unit normals via the inverse-transpose
        let squashed = mesh.transformed(Mat4::from_scale(Vec3::new(4.0, 1.0, 0.5)));
        assert_unit_normals(&squashed);
    }
}
