use super::constants::{TUBE_RADIAL_SEGMENTS, TUBE_TUBULAR_SEGMENTS};
use super::curve::PathCurve;
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

/// Tube surface swept along a [`PathCurve`].
///
/// Topology depends only on the segment counts, so `rebuild` rewrites the
/// vertex arrays in place and leaves `indices` untouched.
#[derive(Clone, Debug)]
pub struct TubeGeometry {
    pub radius: f32,
    pub tubular_segments: usize,
    pub radial_segments: usize,
    pub positions: Vec<Vec3>,
    /// Outward unit normals. The flat-shaded materials upload only positions
    /// and uvs; normals place each ring vertex and stay available to callers.
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl TubeGeometry {
    pub fn new(radius: f32) -> Self {
        Self::with_segments(radius, TUBE_TUBULAR_SEGMENTS, TUBE_RADIAL_SEGMENTS)
    }

    pub fn with_segments(radius: f32, tubular_segments: usize, radial_segments: usize) -> Self {
        let vertex_count = (tubular_segments + 1) * (radial_segments + 1);
        let ring = radial_segments as u32 + 1;
        let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);
        for i in 1..=tubular_segments as u32 {
            for j in 1..=radial_segments as u32 {
                let a = ring * (i - 1) + (j - 1);
                let b = ring * i + (j - 1);
                let c = ring * i + j;
                let d = ring * (i - 1) + j;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        let mut uvs = Vec::with_capacity(vertex_count);
        for i in 0..=tubular_segments {
            for j in 0..=radial_segments {
                uvs.push(Vec2::new(
                    i as f32 / tubular_segments as f32,
                    j as f32 / radial_segments as f32,
                ));
            }
        }

        Self {
            radius,
            tubular_segments,
            radial_segments,
            positions: vec![Vec3::ZERO; vertex_count],
            normals: vec![Vec3::ZERO; vertex_count],
            uvs,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn rebuild(&mut self, curve: &PathCurve) {
        let frames = curve.frames(self.tubular_segments);
        let ring = self.radial_segments + 1;
        for i in 0..=self.tubular_segments {
            let center = curve.point_at(i as f32 / self.tubular_segments as f32);
            let n = frames.normals[i];
            let b = frames.binormals[i];
            for j in 0..=self.radial_segments {
                let v = j as f32 / self.radial_segments as f32 * TAU;
                let normal = (n * -v.cos() + b * v.sin()).normalize_or_zero();
                let k = i * ring + j;
                self.normals[k] = normal;
                self.positions[k] = center + normal * self.radius;
            }
        }
    }
}
