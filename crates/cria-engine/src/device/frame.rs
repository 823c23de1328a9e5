/// Surface texture acquired for one frame.
///
/// Holding it blocks acquisition of the next one; it is consumed by `submit`.
pub struct SurfaceFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}

impl SurfaceFrame {
    pub(crate) fn new(surface_texture: wgpu::SurfaceTexture) -> Self {
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                label: Some("cria surface view"),
                ..Default::default()
            });
        Self { surface_texture, view }
    }

    /// `true` when the surface still presents but no longer matches the display
    /// optimally; the next resize reconfigures it.
    pub fn is_suboptimal(&self) -> bool {
        self.surface_texture.suboptimal
    }
}
