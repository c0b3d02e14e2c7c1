use crate::ray::{FrameState, RayEffect};
use glam::Vec3;
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod targets;

use post::{PostBindGroups, PostResources};
use scene::{ParticleResources, SceneResources, SceneUniforms, TubeResources};
use targets::{RenderTargets, HDR_FORMAT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Ray,
    Glow,
    Particles,
}

impl LayerKind {
    fn label(self) -> &'static str {
        match self {
            Self::Ray => "ray",
            Self::Glow => "glow",
            Self::Particles => "particles",
        }
    }
}

/// One canvas with its own surface, offscreen targets and bloom chain.
struct Layer {
    kind: LayerKind,
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    scene: SceneResources,
}

impl Layer {
    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

/// Shared device/queue driving the ray, glow and particle canvases.
pub struct GpuState {
    device: wgpu::Device,
    queue: wgpu::Queue,
    linear_sampler: wgpu::Sampler,
    layers: Vec<Layer>,
}

fn pick_surface_config(
    surface: &wgpu::Surface<'static>,
    adapter: &wgpu::Adapter,
    width: u32,
    height: u32,
) -> anyhow::Result<wgpu::SurfaceConfiguration> {
    let caps = surface.get_capabilities(adapter);
    let format = caps
        .formats
        .iter()
        .copied()
        .find(|f| {
            matches!(
                f,
                wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
            )
        })
        .or_else(|| caps.formats.first().copied())
        .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
    // Canvases overlay page content, so keep their transparency
    let alpha_mode = if caps
        .alpha_modes
        .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
    {
        wgpu::CompositeAlphaMode::PreMultiplied
    } else {
        caps.alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto)
    };
    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode,
        // Linear scene colour is written through an sRGB view
        view_formats: if format.is_srgb() {
            vec![]
        } else {
            vec![format.add_srgb_suffix()]
        },
        desired_maximum_frame_latency: 2,
    })
}

/// Format of the swapchain view the composite pass renders into.
#[inline]
fn output_view_format(config: &wgpu::SurfaceConfiguration) -> wgpu::TextureFormat {
    config.format.add_srgb_suffix()
}

impl GpuState {
    /// `canvases` are the ray, glow and particle canvases in that order.
    pub async fn new(
        canvases: [web::HtmlCanvasElement; 3],
        effect: &RayEffect,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let kinds = [LayerKind::Ray, LayerKind::Glow, LayerKind::Particles];

        let mut surfaces = Vec::with_capacity(3);
        for (canvas, kind) in canvases.iter().zip(kinds) {
            let surface = instance
                .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
                .map_err(|e| anyhow::anyhow!("{} surface: {e}", kind.label()))?;
            surfaces.push(surface);
        }

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: surfaces.first(),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(crate::error::SetupError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::ray::POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let mut layers = Vec::with_capacity(3);
        for ((canvas, surface), kind) in canvases.into_iter().zip(surfaces).zip(kinds) {
            let config = pick_surface_config(&surface, &adapter, canvas.width(), canvas.height())?;
            surface.configure(&device, &config);

            let label = kind.label();
            let targets = RenderTargets::new(&device, label, config.width, config.height);
            let post = post::create_post_resources(
                &device,
                &post_shader,
                HDR_FORMAT,
                output_view_format(&config),
            );
            let (bw, bh) = targets::bloom_size(config.width, config.height);
            post::write_post_uniforms(&queue, &post, [bw as f32, bh as f32]);
            let post_groups = post::build_bind_groups(&device, &post, &linear_sampler, &targets);

            let scene = match kind {
                LayerKind::Ray => SceneResources::Tube(TubeResources::new(
                    &device,
                    label,
                    crate::ray::RAY_WGSL,
                    effect.ray_tube(),
                    HDR_FORMAT,
                )),
                LayerKind::Glow => SceneResources::Tube(TubeResources::new(
                    &device,
                    label,
                    crate::ray::GLOW_WGSL,
                    effect.glow_tube(),
                    HDR_FORMAT,
                )),
                LayerKind::Particles => SceneResources::Particles(ParticleResources::new(
                    &device,
                    label,
                    effect.particles(),
                    HDR_FORMAT,
                )),
            };

            log::info!(
                "[gpu] {} layer {}x{} {:?} {:?}",
                label,
                config.width,
                config.height,
                config.format,
                config.alpha_mode
            );
            layers.push(Layer {
                kind,
                canvas,
                surface,
                config,
                targets,
                post,
                post_groups,
                scene,
            });
        }

        Ok(Self {
            device,
            queue,
            linear_sampler,
            layers,
        })
    }

    /// Follow the canvases' backing sizes; no-op while they are unchanged.
    pub fn resize_if_needed(&mut self) {
        for layer in &mut self.layers {
            let width = layer.canvas.width();
            let height = layer.canvas.height();
            if width == 0 || height == 0 || (width, height) == layer.size() {
                continue;
            }
            layer.config.width = width;
            layer.config.height = height;
            layer.surface.configure(&self.device, &layer.config);

            // Recreate offscreen render targets and dependent bind groups
            let label = layer.kind.label();
            layer.targets.recreate(&self.device, label, width, height);
            let (bw, bh) = targets::bloom_size(width, height);
            post::write_post_uniforms(&self.queue, &layer.post, [bw as f32, bh as f32]);
            layer.post_groups = post::build_bind_groups(
                &self.device,
                &layer.post,
                &self.linear_sampler,
                &layer.targets,
            );
            log::info!("[gpu] {} resized to {}x{}", label, width, height);
        }
    }

    /// Reconfigure every surface after it was lost or became outdated.
    pub fn reconfigure(&mut self) {
        for layer in &self.layers {
            layer.surface.configure(&self.device, &layer.config);
        }
    }

    pub fn render(
        &mut self,
        effect: &mut RayEffect,
        frame: &FrameState,
        pixel_ratio: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        self.resize_if_needed();

        // Acquire every swapchain image up front so a failure skips the whole frame
        let mut outputs = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            outputs.push(layer.surface.get_current_texture()?);
        }

        let view_proj = effect.camera().view_proj().to_cols_array_2d();
        let rgba = |c: Vec3, a: f32| [c.x, c.y, c.z, a];
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        for (layer, output) in self.layers.iter_mut().zip(&outputs) {
            let (width, height) = layer.size();
            let (colors, opacity) = match layer.kind {
                LayerKind::Ray => (frame.palette.ray, 1.0),
                LayerKind::Glow => (
                    [frame.palette.glow; 3],
                    crate::ray::constants::GLOW_OPACITY,
                ),
                LayerKind::Particles => ([Vec3::ONE; 3], 1.0),
            };
            let uniforms = SceneUniforms {
                view_proj,
                color1: rgba(colors[0], 1.0),
                color2: rgba(colors[1], 1.0),
                color3: rgba(colors[2], 1.0),
                resolution: [width as f32, height as f32],
                time: frame.shader_time(),
                opacity,
                pixel_ratio,
                _pad: [0.0; 3],
            };
            self.queue.write_buffer(
                layer.scene.uniform_buffer(),
                0,
                bytemuck::bytes_of(&uniforms),
            );

            match (&mut layer.scene, layer.kind) {
                (SceneResources::Tube(t), LayerKind::Ray) => t.upload(&self.queue, effect.ray_tube()),
                (SceneResources::Tube(t), _) => t.upload(&self.queue, effect.glow_tube()),
                (SceneResources::Particles(p), _) => p.upload(&self.queue, effect.particles_mut()),
            }

            layer.scene.encode(&mut encoder, &layer.targets.hdr_view);
            let view = output
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    format: Some(output_view_format(&layer.config)),
                    ..Default::default()
                });
            post::encode_bloom(
                &mut encoder,
                &layer.post,
                &layer.post_groups,
                &layer.targets,
                &view,
            );
        }

        self.queue.submit(Some(encoder.finish()));
        for output in outputs {
            output.present();
        }
        Ok(())
    }
}
