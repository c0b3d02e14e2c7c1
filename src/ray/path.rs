use super::constants::*;
use super::curve::PathCurve;
use super::interaction::InteractionField;
use super::noise::Simplex;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

pub const PATH_POINT_COUNT: usize = PATH_SEGMENTS + 1;

/// Produces the ray's control points from layered noise and interaction points.
#[derive(Clone)]
pub struct PathGenerator {
    noise: Simplex,
}

impl PathGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            noise: Simplex::new(seed),
        }
    }

    /// Noise-only sample at arc fraction `u`.
    pub fn base_point(&self, u: f32, time: f64, scroll_factor: f32) -> Vec3 {
        let nt = time * f64::from(NOISE_TIME_RATE);
        let sample = |x: f32, t: f64, scroll: f32| {
            self.noise
                .noise3_f64(f64::from(x), t, f64::from(scroll_factor * scroll))
        };
        let noise_x = sample(u * NOISE_XY_FREQ, nt, NOISE_X_SCROLL) * NOISE_X_AMPLITUDE;
        let noise_y = sample(
            u * NOISE_XY_FREQ + 1.0,
            nt + f64::from(NOISE_Y_OFFSET),
            NOISE_Y_SCROLL,
        ) * NOISE_Y_AMPLITUDE;
        let noise_z = sample(
            u * NOISE_Z_FREQ,
            nt + f64::from(NOISE_Z_OFFSET),
            NOISE_Z_SCROLL,
        ) * NOISE_Z_AMPLITUDE;
        let wave_phase =
            (time * f64::from(PATH_Z_TIME_RATE)).rem_euclid(std::f64::consts::TAU) as f32;

        let x = (u * 2.0 - 1.0) * PATH_HALF_WIDTH + noise_x;
        let y = (u * PI * 1.5).sin() * PATH_Y_AMPLITUDE + noise_y;
        let z = (u * TAU + wave_phase).sin() * PATH_Z_AMPLITUDE + noise_z;
        Vec3::new(x, y, z)
    }

    /// Control points at `time`. Expired interaction points are pruned from
    /// `field` before their influence is summed.
    pub fn control_points(
        &self,
        time: f64,
        scroll_factor: f32,
        field: &mut InteractionField,
    ) -> [Vec3; PATH_POINT_COUNT] {
        field.prune(time);
        std::array::from_fn(|i| {
            let u = i as f32 / PATH_SEGMENTS as f32;
            let base = self.base_point(u, time, scroll_factor);
            base + field.influence(base, time)
        })
    }

    pub fn curve(&self, time: f64, scroll_factor: f32, field: &mut InteractionField) -> PathCurve {
        PathCurve::new(self.control_points(time, scroll_factor, field).to_vec())
    }
}
