use super::helpers;

/// Scene color and light buffers are plain 8-bit RGBA, matching what the
/// decay bias is tuned for.
pub(crate) const SCENE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
pub(crate) const LIGHT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Offscreen color targets, all at the canvas backing size.
///
/// - `scene_view` receives the ocean pass and feeds the post pass.
/// - `light_views` are the two sky-light buffers the light pass ping-pongs
///   between. wgpu zero-initialises new textures, so both start as
///   transparent black.
///
/// The textures are held only so they outlive their views.
pub(crate) struct RenderTargets {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) scene_view: wgpu::TextureView,
    pub(crate) light_views: [wgpu::TextureView; 2],
    _textures: [wgpu::Texture; 3],
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (scene_tex, scene_view) =
            helpers::create_color_texture(device, "scene_tex", width, height, SCENE_FORMAT, usage);
        let (light_a, light_a_view) =
            helpers::create_color_texture(device, "light_a", width, height, LIGHT_FORMAT, usage);
        let (light_b, light_b_view) =
            helpers::create_color_texture(device, "light_b", width, height, LIGHT_FORMAT, usage);
        Self {
            width,
            height,
            scene_view,
            light_views: [light_a_view, light_b_view],
            _textures: [scene_tex, light_a, light_b],
        }
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Replaces every target when the size changed. Returns `true` if it did;
    /// callers must then rebuild the bind groups that referenced the old views.
    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 || (width, height) == self.size() {
            return false;
        }
        *self = Self::new(device, width, height);
        true
    }
}
