use super::helpers::{self, PipelineSpec};
use crate::ray::{ParticleBuffer, TubeGeometry};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) color1: [f32; 4],
    pub(crate) color2: [f32; 4],
    pub(crate) color3: [f32; 4],
    pub(crate) resolution: [f32; 2],
    pub(crate) time: f32,
    pub(crate) opacity: f32,
    pub(crate) pixel_ratio: f32,
    pub(crate) _pad: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct TubeVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

const TUBE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleInstance {
    pos_size: [f32; 4],
    color: [f32; 4],
}

const PARTICLE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

const QUAD_VERTICES: u32 = 6;

/// Pipeline, uniforms and buffers for drawing one layer's content.
pub(crate) enum SceneResources {
    Tube(TubeResources),
    Particles(ParticleResources),
}

pub(crate) struct TubeResources {
    pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    scratch: Vec<TubeVertex>,
}

pub(crate) struct ParticleResources {
    pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    scratch: Vec<ParticleInstance>,
}

fn uniform_binding(
    device: &wgpu::Device,
    label: &str,
) -> (wgpu::BindGroupLayout, wgpu::Buffer, wgpu::BindGroup) {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[helpers::uniform_layout_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    (bgl, buffer, bind_group)
}

impl TubeResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        label: &str,
        wgsl: &str,
        geometry: &TubeGeometry,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(wgsl.into()),
        });
        let (bgl, uniform_buffer, bind_group) = uniform_binding(device, label);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &TUBE_ATTRS,
        }];
        let pipeline =
            PipelineSpec::scene(label, &layout, &shader, &buffers, color_format).build(device);

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (geometry.vertex_count() * std::mem::size_of::<TubeVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Topology is fixed for the lifetime of the tube
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
            scratch: Vec::with_capacity(geometry.vertex_count()),
        }
    }

    pub(crate) fn upload(&mut self, queue: &wgpu::Queue, geometry: &TubeGeometry) {
        self.scratch.clear();
        self.scratch.extend(
            geometry
                .positions
                .iter()
                .zip(&geometry.uvs)
                .map(|(p, uv)| TubeVertex {
                    position: p.to_array(),
                    uv: uv.to_array(),
                }),
        );
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.scratch));
    }

    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

impl ParticleResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        label: &str,
        particles: &ParticleBuffer,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(crate::ray::PARTICLES_WGSL.into()),
        });
        let (bgl, uniform_buffer, bind_group) = uniform_binding(device, label);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &PARTICLE_ATTRS,
        }];
        let pipeline =
            PipelineSpec::scene(label, &layout, &shader, &buffers, color_format).build(device);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (particles.len() * std::mem::size_of::<ParticleInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            instance_buffer,
            instance_count: particles.len() as u32,
            scratch: Vec::with_capacity(particles.len()),
        }
    }

    pub(crate) fn upload(&mut self, queue: &wgpu::Queue, particles: &mut ParticleBuffer) {
        if !particles.is_dirty() {
            return;
        }
        self.scratch.clear();
        self.scratch.extend((0..particles.len()).map(|i| {
            let p = particles.position(i);
            let c = &particles.colors[i * 3..i * 3 + 3];
            ParticleInstance {
                pos_size: [p.x, p.y, p.z, particles.sizes[i]],
                color: [c[0], c[1], c[2], 1.0],
            }
        }));
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.scratch));
        particles.mark_uploaded();
    }

    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..QUAD_VERTICES, 0..self.instance_count);
    }
}

impl SceneResources {
    pub(crate) fn uniform_buffer(&self) -> &wgpu::Buffer {
        match self {
            Self::Tube(t) => &t.uniform_buffer,
            Self::Particles(p) => &p.uniform_buffer,
        }
    }

    /// Clear `target` and draw the layer's content into it.
    pub(crate) fn encode(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        match self {
            Self::Tube(t) => t.draw(&mut rpass),
            Self::Particles(p) => p.draw(&mut rpass),
        }
    }
}
