//! Primitive geometries and their flat-shaded triangle data.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Most segments a cylinder can have while its vertices stay addressable
/// by `u16` indices (`6 * segments + 2` vertices).
pub const MAX_RADIAL_SEGMENTS: u16 = 10_922;

/// Vertex with position and face normal. 24 bytes, tightly packed.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Indexed triangle list, counter-clockwise when seen from outside.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Raw vertex bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let index = self.vertices.len() as u16;
        self.vertices.push(Vertex::new(position, normal));
        index
    }
}

/// A primitive solid centered on the origin, y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u16,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u16,
    },
}

impl Geometry {
    /// Unscaled height along y
    pub fn height(&self) -> f32 {
        match *self {
            Geometry::Box { height, .. }
            | Geometry::Cylinder { height, .. }
            | Geometry::Cone { height, .. } => height,
        }
    }

    /// Unscaled extent on the ground plane (x, z)
    pub fn footprint(&self) -> (f32, f32) {
        match *self {
            Geometry::Box { width, depth, .. } => (width, depth),
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                ..
            } => {
                let diameter = 2.0 * radius_top.max(radius_bottom);
                (diameter, diameter)
            }
            Geometry::Cone { radius, .. } => (2.0 * radius, 2.0 * radius),
        }
    }

    /// Triangulate into flat-shaded vertex data
    pub fn tessellate(&self) -> MeshData {
        match *self {
            Geometry::Box {
                width,
                height,
                depth,
            } => box_mesh(Vec3::new(width, height, depth) / 2.0),
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => frustum_mesh(radius_top, radius_bottom, height, radial_segments),
            Geometry::Cone {
                radius,
                height,
                radial_segments,
            } => frustum_mesh(0.0, radius, height, radial_segments),
        }
    }
}

fn box_mesh(half: Vec3) -> MeshData {
    // (normal, u, v) with u x v = normal
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut mesh = MeshData {
        vertices: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };

    for (normal, u, v) in FACES {
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        let base = mesh.vertices.len() as u16;
        for (su, sv) in corners {
            mesh.push_vertex((normal + u * su + v * sv) * half, normal);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

/// Cylinder-like solid; a zero top radius gives a cone.
///
/// Segments are clamped to `3..=MAX_RADIAL_SEGMENTS`.
fn frustum_mesh(radius_top: f32, radius_bottom: f32, height: f32, segments: u16) -> MeshData {
    let segments = segments.clamp(3, MAX_RADIAL_SEGMENTS);
    let half = height / 2.0;
    let ring = |radius: f32, y: f32, i: u16| {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        Vec3::new(radius * angle.sin(), y, radius * angle.cos())
    };

    let mut mesh = MeshData::default();

    // Sides
    for i in 0..segments {
        let b0 = ring(radius_bottom, -half, i);
        let b1 = ring(radius_bottom, -half, i + 1);
        let t0 = ring(radius_top, half, i);
        let t1 = ring(radius_top, half, i + 1);
        let normal = (b1 - b0).cross(t0 - b0).normalize_or_zero();

        if radius_top > 0.0 {
            let a = mesh.push_vertex(b0, normal);
            let b = mesh.push_vertex(b1, normal);
            let c = mesh.push_vertex(t1, normal);
            let d = mesh.push_vertex(t0, normal);
            mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
        } else {
            let a = mesh.push_vertex(b0, normal);
            let b = mesh.push_vertex(b1, normal);
            let c = mesh.push_vertex(t0, normal);
            mesh.indices.extend_from_slice(&[a, b, c]);
        }
    }

    // Caps
    if radius_top > 0.0 {
        let center = mesh.push_vertex(Vec3::new(0.0, half, 0.0), Vec3::Y);
        let first = center + 1;
        for i in 0..segments {
            mesh.push_vertex(ring(radius_top, half, i), Vec3::Y);
        }
        for i in 0..segments {
            let next = (i + 1) % segments;
            mesh.indices
                .extend_from_slice(&[center, first + i, first + next]);
        }
    }

    if radius_bottom > 0.0 {
        let center = mesh.push_vertex(Vec3::new(0.0, -half, 0.0), Vec3::NEG_Y);
        let first = center + 1;
        for i in 0..segments {
            mesh.push_vertex(ring(radius_bottom, -half, i), Vec3::NEG_Y);
        }
        for i in 0..segments {
            let next = (i + 1) % segments;
            mesh.indices
                .extend_from_slice(&[center, first + next, first + i]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(mesh: &MeshData) -> (Vec3, Vec3) {
        let first = Vec3::from_array(mesh.vertices[0].position);
        mesh.vertices
            .iter()
            .map(|v| Vec3::from_array(v.position))
            .fold((first, first), |(min, max), p| (min.min(p), max.max(p)))
    }

    fn assert_indices_in_range(mesh: &MeshData) {
        let count = mesh.vertices.len();
        assert!(count <= u16::MAX as usize + 1, "{} vertices", count);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < count));
    }

    fn assert_outward(mesh: &MeshData) {
        for tri in mesh.indices.chunks(3) {
            let p = |i: u16| Vec3::from_array(mesh.vertices[i as usize].position);
            let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
            let face = (b - a).cross(c - a);
            let normal = Vec3::from_array(mesh.vertices[tri[0] as usize].normal);
            assert!(face.dot(normal) > 0.0, "triangle {:?} winds inward", tri);
        }
    }

    #[test]
    fn test_vertex_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn test_box_geometry() {
        let mesh = Geometry::Box {
            width: 2.0,
            height: 4.0,
            depth: 1.0,
        }
        .tessellate();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);

        let (min, max) = bounds(&mesh);
        assert!((min - Vec3::new(-1.0, -2.0, -0.5)).length() < 0.001);
        assert!((max - Vec3::new(1.0, 2.0, 0.5)).length() < 0.001);
        assert_outward(&mesh);
    }

    #[test]
    fn test_cylinder_geometry() {
        let mesh = Geometry::Cylinder {
            radius_top: 0.25,
            radius_bottom: 0.25,
            height: 0.5,
            radial_segments: 8,
        }
        .tessellate();
        // 8 side quads + two capped fans
        assert_eq!(mesh.vertices.len(), 8 * 4 + 2 * 9);
        assert_eq!(mesh.indices.len(), 8 * 6 + 2 * 8 * 3);

        let (min, max) = bounds(&mesh);
        assert!((min.y + 0.25).abs() < 0.001);
        assert!((max.y - 0.25).abs() < 0.001);
        assert_outward(&mesh);
    }

    #[test]
    fn test_cone_geometry() {
        let mesh = Geometry::Cone {
            radius: 0.3,
            height: 0.5,
            radial_segments: 8,
        }
        .tessellate();
        assert_eq!(mesh.vertices.len(), 8 * 3 + 9);
        assert_eq!(mesh.triangle_count(), 16);
        assert_outward(&mesh);
    }

    #[test]
    fn test_height_and_footprint() {
        let cone = Geometry::Cone {
            radius: 0.3,
            height: 0.5,
            radial_segments: 8,
        };
        assert_eq!(cone.height(), 0.5);
        assert_eq!(cone.footprint(), (0.6, 0.6));
    }

    #[test]
    fn test_max_segments_stay_addressable() {
        let mesh = Geometry::Cylinder {
            radius_top: 0.25,
            radius_bottom: 0.25,
            height: 0.5,
            radial_segments: MAX_RADIAL_SEGMENTS,
        }
        .tessellate();
        assert_eq!(mesh.vertices.len(), 6 * MAX_RADIAL_SEGMENTS as usize + 2);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn test_oversized_segments_clamped() {
        let mesh = Geometry::Cylinder {
            radius_top: 0.25,
            radius_bottom: 0.25,
            height: 0.5,
            radial_segments: 20_000,
        }
        .tessellate();
        assert_eq!(mesh.vertices.len(), 6 * MAX_RADIAL_SEGMENTS as usize + 2);
        assert_indices_in_range(&mesh);

        let cone = Geometry::Cone {
            radius: 0.3,
            height: 0.5,
            radial_segments: u16::MAX,
        }
        .tessellate();
        assert_indices_in_range(&cone);
    }

    #[test]
    fn test_byte_views() {
        let mesh = Geometry::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
        .tessellate();
        assert_eq!(mesh.vertex_bytes().len(), 24 * 24);
        assert_eq!(mesh.index_bytes().len(), 36 * 2);
    }
}
