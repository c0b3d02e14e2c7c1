/// Tuning constants for the light ray.
///
/// Units are "ray space" (the world space the camera looks into) unless noted.
/// Time is the effect's own animation clock, not wall-clock seconds.

// Path control points
pub const PATH_SEGMENTS: usize = 12; // 13 control points
pub const PATH_HALF_WIDTH: f32 = 80.0;
pub const PATH_Y_AMPLITUDE: f32 = 15.0;
pub const PATH_Z_AMPLITUDE: f32 = 12.0;
pub const PATH_Z_TIME_RATE: f32 = 0.15;

// Noise layers (amplitude, input scale)
pub const NOISE_TIME_RATE: f32 = 0.08;
pub const NOISE_X_AMPLITUDE: f32 = 20.0;
pub const NOISE_Y_AMPLITUDE: f32 = 15.0;
pub const NOISE_Z_AMPLITUDE: f32 = 8.0;
pub const NOISE_XY_FREQ: f32 = 1.5;
pub const NOISE_Z_FREQ: f32 = 2.0;
pub const NOISE_X_SCROLL: f32 = 0.08;
pub const NOISE_Y_SCROLL: f32 = 0.12;
pub const NOISE_Z_SCROLL: f32 = 0.15;
pub const NOISE_Y_OFFSET: f32 = 100.0; // decorrelates the y layer in time
pub const NOISE_Z_OFFSET: f32 = 200.0;

// Interaction points
pub const INTERACTION_LIFETIME: f32 = 5.0;
pub const INTERACTION_RADIUS: f32 = 100.0; // page pixels
pub const INTERACTION_DECAY_SCALE: f32 = 10.0;
pub const INTERACTION_FALLOFF: f32 = 0.1;
pub const INTERACTION_MIN_DISTANCE: f32 = 1.0;

pub const CARD_HOVER_Z: f32 = 20.0;
pub const CARD_HOVER_STRENGTH: f32 = 25.0;
pub const CARD_HOVER_DECAY: f32 = 0.02;
pub const SECTION_VISIBLE_Z: f32 = 10.0;
pub const SECTION_VISIBLE_STRENGTH: f32 = 15.0;
pub const SECTION_VISIBLE_DECAY: f32 = 0.01;
pub const SECTION_VISIBILITY_THRESHOLD: f64 = 0.3;

// Tube geometry
pub const TUBE_TUBULAR_SEGMENTS: usize = 200;
pub const TUBE_RADIAL_SEGMENTS: usize = 12;
pub const RAY_RADIUS: f32 = 1.2;
pub const GLOW_RADIUS: f32 = 2.5;

// Spline arc-length table resolution
pub const ARC_LENGTH_DIVISIONS: usize = 200;

// Particles
pub const PARTICLE_COUNT: usize = 120;
pub const PARTICLE_SPREAD: f32 = 0.95; // share of the curve covered by the even spacing
pub const PARTICLE_JITTER: f32 = 0.05;
pub const PARTICLE_MAX_OFFSET: f32 = 5.0;
pub const PARTICLE_SIZE_MIN: f32 = 0.1;
pub const PARTICLE_SIZE_SPAN: f32 = 0.8;
// sRGB
pub const PARTICLE_TONES: [[f32; 3]; 3] = [
    [0.02, 0.08, 0.2],
    [0.04, 0.15, 0.3],
    [0.06, 0.22, 0.4],
];

// Palette
pub const PALETTE_CYCLE: f32 = 60.0;

// Depth layering
pub const DEPTH_SAMPLES: usize = 5;
pub const FOREGROUND_RATIO: f32 = 0.7;
pub const MIXED_RATIO: f32 = 0.4;

// Canvas opacity
pub const RAY_BASE_OPACITY: f32 = 0.65;
pub const GLOW_BASE_OPACITY: f32 = 0.25;
pub const PARTICLES_BASE_OPACITY: f32 = 0.2;
pub const OPACITY_WAVE_RATE: f32 = 0.15;
pub const OPACITY_WAVE_AMPLITUDE: f32 = 0.05;
pub const OPACITY_WAVE_BIAS: f32 = 0.08;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 40.0;
pub const CAMERA_Z: f32 = 120.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 2000.0;
pub const CAMERA_SWAY: f32 = 1.5;
pub const CAMERA_SWAY_RATE_X: f32 = 0.03;
pub const CAMERA_SWAY_RATE_Y: f32 = 0.04;

// Frame timing; the animation was tuned per 60 Hz frame
pub const REFERENCE_FPS: f32 = 60.0;
pub const TIME_STEP_PER_FRAME: f32 = 0.003;
pub const SCROLL_SMOOTHING_PER_FRAME: f32 = 0.015;
pub const SCROLL_FACTOR_SCALE: f32 = 0.0004;
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Glow trails the ray slightly in time and reacts a little more to scroll
pub const GLOW_TIME_OFFSET: f32 = 0.2;
// Shader time rates are all multiples of 0.01, so 2π / 0.01 wraps them seamlessly
pub const SHADER_TIME_PERIOD: f64 = 200.0 * std::f64::consts::PI;
pub const GLOW_SCROLL_SCALE: f32 = 1.1;

// Materials
pub const GLOW_OPACITY: f32 = 0.08;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Post-processing
pub const BLOOM_STRENGTH: f32 = 0.3;
pub const BLOOM_RADIUS: f32 = 0.2;
pub const BLOOM_THRESHOLD: f32 = 0.3;

// Lifecycle
pub const REVEAL_DELAY_MS: i32 = 800;
