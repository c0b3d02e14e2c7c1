//! Owned update context for the light ray.
//!
//! Input handlers never touch this directly; they queue [`EffectInput`]
//! messages which the frame loop feeds through [`RayEffect::apply`] before
//! calling [`RayEffect::advance`].

use super::camera::Camera;
use super::constants::*;
use super::interaction::{InteractionField, InteractionKind, InteractionPoint};
use super::layering::{front_ratio, opacity_at, LayerBand, LayerOpacity};
use super::palette::{colors_at, PaletteColors};
use super::params::EffectParams;
use super::particles::ParticleBuffer;
use super::path::PathGenerator;
use super::scroll::{frame_alpha, ScrollState};
use super::tube::TubeGeometry;
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectInput {
    /// New page scroll offset in CSS pixels.
    Scroll(f32),
    /// Element centre relative to the viewport middle, in CSS pixels.
    Interaction { kind: InteractionKind, center: Vec2 },
    /// Viewport size in CSS pixels.
    Resize { width: f32, height: f32 },
}

/// Per-frame values the renderer and DOM layer consume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    pub time: f64,
    pub palette: PaletteColors,
    pub band: LayerBand,
    pub band_changed: bool,
    pub opacity: LayerOpacity,
}

impl FrameState {
    /// Clock folded into `[0, SHADER_TIME_PERIOD)` for the f32 shader uniform.
    pub fn shader_time(&self) -> f32 {
        self.time.rem_euclid(SHADER_TIME_PERIOD) as f32
    }
}

pub struct RayEffect {
    params: EffectParams,
    /// Animation clock; double precision so a page left open for days keeps moving.
    time: f64,
    scroll: ScrollState,
    field: InteractionField,
    generator: PathGenerator,
    ray: TubeGeometry,
    glow: TubeGeometry,
    particles: ParticleBuffer,
    camera: Camera,
    band: LayerBand,
    rng: StdRng,
}

impl RayEffect {
    pub fn new(params: EffectParams) -> Self {
        let mut rng = StdRng::seed_from_u64(params.seed ^ 0x9E37_79B9_7F4A_7C15);
        let generator = PathGenerator::new(params.seed);
        let particles = ParticleBuffer::new(PARTICLE_COUNT, &mut rng);

        let mut effect = Self {
            params,
            time: 0.0,
            scroll: ScrollState::default(),
            field: InteractionField::default(),
            generator,
            ray: TubeGeometry::new(RAY_RADIUS),
            glow: TubeGeometry::new(GLOW_RADIUS),
            particles,
            camera: Camera::default(),
            band: LayerBand::Background,
            rng,
        };
        effect.update();
        effect
    }

    pub fn apply(&mut self, input: EffectInput) {
        match input {
            EffectInput::Scroll(offset) => self.scroll.set_target(offset),
            EffectInput::Interaction { kind, center } => {
                self.field
                    .push(InteractionPoint::new(kind, center, self.time));
            }
            EffectInput::Resize { width, height } => self.camera.set_viewport(width, height),
        }
    }

    /// Advance the clock and smoothed scroll by one frame of `dt_sec`, then
    /// rebuild everything for the new instant.
    pub fn advance(&mut self, dt_sec: f32) -> FrameState {
        let dt = dt_sec.clamp(0.0, self.params.max_frame_dt);
        self.scroll
            .step(frame_alpha(self.params.scroll_smoothing, dt, REFERENCE_FPS));
        self.time += f64::from(self.params.time_rate) * f64::from(dt);
        self.update()
    }

    /// Rebuild path, geometry, particles, colours and layering for the
    /// current time without advancing it.
    pub fn update(&mut self) -> FrameState {
        let scroll_factor = self.scroll_factor();

        let ray_curve = self
            .generator
            .curve(self.time, scroll_factor, &mut self.field);
        self.ray.rebuild(&ray_curve);

        let glow_curve = self.generator.curve(
            self.time + f64::from(self.params.glow_time_offset),
            scroll_factor * self.params.glow_scroll_scale,
            &mut self.field,
        );
        self.glow.rebuild(&glow_curve);

        self.particles.update(&ray_curve, &mut self.rng);

        let band = LayerBand::for_ratio(front_ratio(&ray_curve));
        let band_changed = band != self.band;
        self.band = band;

        self.camera.sway(self.time);

        FrameState {
            time: self.time,
            palette: colors_at(self.time),
            band,
            band_changed,
            opacity: opacity_at(self.time),
        }
    }

    pub fn params(&self) -> &EffectParams {
        &self.params
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn scroll_factor(&self) -> f32 {
        self.scroll.smoothed * self.params.scroll_scale
    }

    pub fn interactions(&self) -> &InteractionField {
        &self.field
    }

    pub fn ray_tube(&self) -> &TubeGeometry {
        &self.ray
    }

    pub fn glow_tube(&self) -> &TubeGeometry {
        &self.glow
    }

    pub fn particles(&self) -> &ParticleBuffer {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleBuffer {
        &mut self.particles
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn band(&self) -> LayerBand {
        self.band
    }
}
