pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen colour targets for one layer.
///
/// - `hdr_*` hold the layer's scene colour before post-processing.
/// - `bloom_*` are half-resolution ping-pong buffers for bright-pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

#[inline]
pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}

/// Sampled render target in `HDR_FORMAT`.
fn layer_texture(
    device: &wgpu::Device,
    label: &str,
    (width, height): (u32, u32),
) -> (wgpu::Texture, wgpu::TextureView) {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: HDR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    (tex, view)
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, label: &str, width: u32, height: u32) -> Self {
        let bloom = bloom_size(width, height);
        let (hdr_tex, hdr_view) = layer_texture(device, &format!("{label}_hdr"), (width, height));
        let (bloom_a, bloom_a_view) = layer_texture(device, &format!("{label}_bloom_a"), bloom);
        let (bloom_b, bloom_b_view) = layer_texture(device, &format!("{label}_bloom_b"), bloom);
        Self {
            hdr_tex,
            hdr_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
        }
    }

    /// Release the old textures and allocate new ones at the given size.
    pub(crate) fn recreate(&mut self, device: &wgpu::Device, label: &str, width: u32, height: u32) {
        self.hdr_tex.destroy();
        self.bloom_a.destroy();
        self.bloom_b.destroy();
        *self = Self::new(device, label, width, height);
    }
}
