//! Decides how the three canvases stack against page content.
//!
//! The ray "weaves" through the page: when most of its length is in front of
//! the content plane (z > 0) the canvases are raised above the content,
//! otherwise they sink behind it.

use super::constants::*;
use super::curve::PathCurve;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerBand {
    Foreground,
    Mixed,
    Background,
}

/// CSS z-index per canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZOrder {
    pub ray: i32,
    pub glow: i32,
    pub particles: i32,
}

impl LayerBand {
    pub fn for_ratio(ratio: f32) -> Self {
        if ratio > FOREGROUND_RATIO {
            Self::Foreground
        } else if ratio > MIXED_RATIO {
            Self::Mixed
        } else {
            Self::Background
        }
    }

    pub fn z_order(self) -> ZOrder {
        match self {
            Self::Foreground => ZOrder {
                ray: 5,
                glow: 22,
                particles: 23,
            },
            Self::Mixed => ZOrder {
                ray: 5,
                glow: 18,
                particles: 19,
            },
            Self::Background => ZOrder {
                ray: 3,
                glow: 4,
                particles: 5,
            },
        }
    }
}

/// Remembers the band last written to the page so stacking styles are only
/// touched when it changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BandTracker {
    applied: Option<LayerBand>,
}

impl BandTracker {
    /// z-order to write for `band`, or `None` when the page already shows it.
    pub fn pending(&mut self, band: LayerBand) -> Option<ZOrder> {
        if self.applied == Some(band) {
            return None;
        }
        self.applied = Some(band);
        Some(band.z_order())
    }
}

/// Share of `DEPTH_SAMPLES` evenly spaced curve samples lying in front of the page.
pub fn front_ratio(curve: &PathCurve) -> f32 {
    let last = (DEPTH_SAMPLES - 1) as f32;
    let front = (0..DEPTH_SAMPLES)
        .filter(|&i| curve.point_at(i as f32 / last).z > 0.0)
        .count();
    front as f32 / DEPTH_SAMPLES as f32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerOpacity {
    pub ray: f32,
    pub glow: f32,
    pub particles: f32,
}

/// Slow breathing of the canvas opacities; independent of the band.
pub fn opacity_at(time: f64) -> LayerOpacity {
    let phase =
        (time * f64::from(OPACITY_WAVE_RATE)).rem_euclid(std::f64::consts::TAU) as f32;
    let variation = phase.sin() * OPACITY_WAVE_AMPLITUDE + OPACITY_WAVE_BIAS;
    LayerOpacity {
        ray: RAY_BASE_OPACITY - variation,
        glow: GLOW_BASE_OPACITY - variation,
        particles: PARTICLES_BASE_OPACITY - variation,
    }
}
