pub mod camera;
pub mod constants;
pub mod curve;
pub mod effect;
pub mod interaction;
pub mod layering;
pub mod noise;
pub mod palette;
pub mod params;
pub mod particles;
pub mod path;
pub mod scroll;
pub mod tube;

pub use camera::Camera;
pub use curve::PathCurve;
pub use effect::{EffectInput, FrameState, RayEffect};
pub use interaction::{InteractionField, InteractionKind, InteractionPoint};
pub use layering::{BandTracker, LayerBand, LayerOpacity, ZOrder};
pub use palette::PaletteColors;
pub use params::EffectParams;
pub use particles::ParticleBuffer;
pub use path::PathGenerator;
pub use scroll::ScrollState;
pub use tube::TubeGeometry;

// Shaders bundled as string constants
pub static RAY_WGSL: &str = include_str!("../../shaders/ray.wgsl");
pub static GLOW_WGSL: &str = include_str!("../../shaders/glow.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../../shaders/particles.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
