/// Additive blending for premultiplied output; the ray, glow and particles
/// all brighten whatever is beneath them.
pub const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Everything that differs between the scene and post pipelines.
pub struct PipelineSpec<'a> {
    pub label: &'a str,
    pub layout: &'a wgpu::PipelineLayout,
    pub shader: &'a wgpu::ShaderModule,
    pub vs_entry: &'a str,
    pub fs_entry: &'a str,
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub format: wgpu::TextureFormat,
    pub blend: Option<wgpu::BlendState>,
}

impl<'a> PipelineSpec<'a> {
    /// Fullscreen-triangle pass reading one or two textures.
    pub fn post(
        layout: &'a wgpu::PipelineLayout,
        shader: &'a wgpu::ShaderModule,
        fs_entry: &'a str,
        format: wgpu::TextureFormat,
        blend: Option<wgpu::BlendState>,
    ) -> Self {
        Self {
            label: fs_entry,
            layout,
            shader,
            vs_entry: "vs_fullscreen",
            fs_entry,
            buffers: &[],
            format,
            blend,
        }
    }

    /// Additive layer content drawn from `buffers`.
    pub fn scene(
        label: &'a str,
        layout: &'a wgpu::PipelineLayout,
        shader: &'a wgpu::ShaderModule,
        buffers: &'a [wgpu::VertexBufferLayout<'a>],
        format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            label,
            layout,
            shader,
            vs_entry: "vs_main",
            fs_entry: "fs_main",
            buffers,
            format,
            blend: Some(ADDITIVE),
        }
    }

    pub fn build(&self, device: &wgpu::Device) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: Some(self.layout),
            vertex: wgpu::VertexState {
                module: self.shader,
                entry_point: Some(self.vs_entry),
                buffers: self.buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // Tubes are seen from both sides
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: self.shader,
                entry_point: Some(self.fs_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend: self.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        })
    }
}

pub fn uniform_layout_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
