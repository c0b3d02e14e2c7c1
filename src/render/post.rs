use super::helpers::{self, PipelineSpec};
use super::targets::RenderTargets;
use crate::ray::constants::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    bloom_strength: f32,
    bloom_radius: f32,
    threshold: f32,
    _pad: f32,
}

/// Bloom chain for one layer: bright pass → horizontal blur → vertical blur
/// → composite over the scene.
///
/// Queued buffer writes all land before the frame's submission, so every
/// pass needs its own uniform buffer.
pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) base_uniforms: wgpu::Buffer,
    pub(crate) blur_h_uniforms: wgpu::Buffer,
    pub(crate) blur_v_uniforms: wgpu::Buffer,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

pub(crate) struct PostBindGroups {
    pub(crate) hdr: wgpu::BindGroup,
    pub(crate) blur_h: wgpu::BindGroup,
    pub(crate) blur_v: wgpu::BindGroup,
    pub(crate) bloom: wgpu::BindGroup,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

fn uniform_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<PostUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    bloom_format: wgpu::TextureFormat,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            texture_entry(0),
            sampler_entry(1),
            helpers::uniform_layout_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[texture_entry(0), sampler_entry(1)],
    });
    let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline =
        PipelineSpec::post(&pl_bright_blur, post_shader, "fs_bright", bloom_format, None)
            .build(device);
    let blur_pipeline =
        PipelineSpec::post(&pl_bright_blur, post_shader, "fs_blur", bloom_format, None)
            .build(device);
    let composite_pipeline = PipelineSpec::post(
        &pl_composite,
        post_shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    )
    .build(device);

    PostResources {
        bgl0,
        bgl1,
        base_uniforms: uniform_buffer(device, "post_base_uniforms"),
        blur_h_uniforms: uniform_buffer(device, "post_blur_h_uniforms"),
        blur_v_uniforms: uniform_buffer(device, "post_blur_v_uniforms"),
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

/// Write all three uniform blocks for a bloom chain at `bloom_res`.
pub(crate) fn write_post_uniforms(queue: &wgpu::Queue, post: &PostResources, bloom_res: [f32; 2]) {
    let at = |blur_dir: [f32; 2]| PostUniforms {
        resolution: bloom_res,
        blur_dir,
        bloom_strength: BLOOM_STRENGTH,
        bloom_radius: BLOOM_RADIUS,
        threshold: BLOOM_THRESHOLD,
        _pad: 0.0,
    };
    queue.write_buffer(&post.base_uniforms, 0, bytemuck::bytes_of(&at([0.0, 0.0])));
    queue.write_buffer(&post.blur_h_uniforms, 0, bytemuck::bytes_of(&at([1.0, 0.0])));
    queue.write_buffer(&post.blur_v_uniforms, 0, bytemuck::bytes_of(&at([0.0, 1.0])));
}

fn source_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    uniforms: Option<&wgpu::Buffer>,
) -> wgpu::BindGroup {
    let mut entries = vec![
        wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::TextureView(view),
        },
        wgpu::BindGroupEntry {
            binding: 1,
            resource: wgpu::BindingResource::Sampler(sampler),
        },
    ];
    if let Some(buf) = uniforms {
        entries.push(wgpu::BindGroupEntry {
            binding: 2,
            resource: buf.as_entire_binding(),
        });
    }
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &entries,
    })
}

/// Bind groups referencing the current target views; rebuilt after resize.
pub(crate) fn build_bind_groups(
    device: &wgpu::Device,
    post: &PostResources,
    sampler: &wgpu::Sampler,
    targets: &RenderTargets,
) -> PostBindGroups {
    PostBindGroups {
        hdr: source_group(
            device,
            "bg_hdr",
            &post.bgl0,
            &targets.hdr_view,
            sampler,
            Some(&post.base_uniforms),
        ),
        blur_h: source_group(
            device,
            "bg_blur_h",
            &post.bgl0,
            &targets.bloom_a_view,
            sampler,
            Some(&post.blur_h_uniforms),
        ),
        blur_v: source_group(
            device,
            "bg_blur_v",
            &post.bgl0,
            &targets.bloom_b_view,
            sampler,
            Some(&post.blur_v_uniforms),
        ),
        bloom: source_group(
            device,
            "bg_bloom",
            &post.bgl1,
            &targets.bloom_a_view,
            sampler,
            None,
        ),
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
    drop(r);
}

/// Encode the full bloom chain from `targets.hdr_view` onto `output`.
pub(crate) fn encode_bloom(
    encoder: &mut wgpu::CommandEncoder,
    post: &PostResources,
    groups: &PostBindGroups,
    targets: &RenderTargets,
    output: &wgpu::TextureView,
) {
    blit(
        encoder,
        "bright_pass",
        &targets.bloom_a_view,
        wgpu::Color::TRANSPARENT,
        &post.bright_pipeline,
        &groups.hdr,
        None,
    );
    blit(
        encoder,
        "blur_h",
        &targets.bloom_b_view,
        wgpu::Color::TRANSPARENT,
        &post.blur_pipeline,
        &groups.blur_h,
        None,
    );
    blit(
        encoder,
        "blur_v",
        &targets.bloom_a_view,
        wgpu::Color::TRANSPARENT,
        &post.blur_pipeline,
        &groups.blur_v,
        None,
    );
    blit(
        encoder,
        "composite",
        output,
        wgpu::Color::TRANSPARENT,
        &post.composite_pipeline,
        &groups.hdr,
        Some(&groups.bloom),
    );
}
