use super::constants::*;
use super::curve::PathCurve;
use super::palette::srgb_to_linear;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Fixed-size particle cloud that hugs the ray.
///
/// Arrays are flat (`xyz` / `rgb` triples) so they can be uploaded as-is.
#[derive(Clone, Debug)]
pub struct ParticleBuffer {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub sizes: Vec<f32>,
    dirty: bool,
}

impl ParticleBuffer {
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        let mut colors = Vec::with_capacity(count * 3);
        let mut sizes = Vec::with_capacity(count);
        for _ in 0..count {
            let tone = PARTICLE_TONES[rng.gen_range(0..PARTICLE_TONES.len())];
            colors.extend(tone.map(srgb_to_linear));
            sizes.push(rng.gen::<f32>() * PARTICLE_SIZE_SPAN + PARTICLE_SIZE_MIN);
        }
        Self {
            positions: vec![0.0; count * 3],
            colors,
            sizes,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag once positions have been uploaded.
    pub fn mark_uploaded(&mut self) {
        self.dirty = false;
    }

    /// Re-sample every particle along `curve` with a random offset in the
    /// local (normal, binormal) plane.
    pub fn update(&mut self, curve: &PathCurve, rng: &mut impl Rng) {
        let count = self.len();
        for i in 0..count {
            let u = i as f32 / count as f32 * PARTICLE_SPREAD + rng.gen::<f32>() * PARTICLE_JITTER;
            let center = curve.point_at(u);
            let (normal, binormal) = local_frame(curve.tangent_at(u));

            let angle = rng.gen::<f32>() * TAU;
            let radius = rng.gen::<f32>() * PARTICLE_MAX_OFFSET;
            let p = center + (normal * angle.cos() + binormal * angle.sin()) * radius;
            self.positions[i * 3..i * 3 + 3].copy_from_slice(&p.to_array());
        }
        self.dirty = true;
    }
}

/// (normal, binormal) around `tangent`, with the normal in the xy plane
/// unless the tangent points along z.
fn local_frame(tangent: Vec3) -> (Vec3, Vec3) {
    let planar = Vec3::new(-tangent.y, tangent.x, 0.0);
    if planar.length_squared() > 1e-8 && tangent.length_squared() > 0.0 {
        let normal = planar.normalize();
        (normal, tangent.cross(normal).normalize_or_zero())
    } else if tangent.length_squared() > 0.0 {
        tangent.normalize().any_orthonormal_pair()
    } else {
        (Vec3::X, Vec3::Y)
    }
}
