//! Artistic light ray: a procedural ray, its glow and a particle cloud that
//! weave through a web page.
//!
//! `ray` holds the platform-neutral animation (path, geometry, palette,
//! layering) and builds on any target. The WebGPU renderer and DOM wiring are
//! compiled for `wasm32` only.

pub mod error;
pub mod ray;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use app::start;
