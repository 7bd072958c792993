use crate::core::{FrameParams, LightDecay, QualityTier};
use web_sys as web;

mod helpers;
mod light;
mod ocean;
mod post;
mod targets;

use light::LightPass;
use ocean::{OceanResources, OceanUniforms};
use post::{PostResources, PostUniforms};
use targets::RenderTargets;

/// GPU side of the background: surface, offscreen targets and the three
/// passes (light → ocean → post), in that order every frame.
pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,

    light: LightPass,
    ocean: OceanResources,
    post: PostResources,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, tier: QualityTier) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 limits keep the fallback path usable
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        device.on_uncaptured_error(Box::new(|e| {
            log::error!("[gpu] uncaptured error: {}", e);
        }));

        let caps = surface.get_capabilities(&adapter);
        // Shaders output display-ready values; avoid a second sRGB encode.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] {:?} adapter, surface {:?} {}x{}",
            adapter.get_info().backend,
            format,
            width,
            height
        );

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = helpers::create_linear_sampler(&device);
        let light = LightPass::new(&device, &targets);
        let ocean = OceanResources::new(&device, &queue, &targets, &linear_sampler, tier);
        let post = PostResources::new(&device, &targets, &linear_sampler, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            light,
            ocean,
            post,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        self.targets.size()
    }

    /// True once the current ocean program failed validation.
    pub fn is_failed(&self) -> bool {
        self.ocean.program.is_failed()
    }

    /// Recompiles the ocean program for `tier` if it differs from the current one.
    pub fn set_quality(&mut self, tier: QualityTier) {
        if tier != self.ocean.program.tier {
            self.ocean.rebuild_program(&self.device, tier);
        }
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if !self.targets.recreate(&self.device, width, height) {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.light.on_targets_recreated(&self.device, &self.targets);
        self.ocean
            .rebuild_bind_groups(&self.device, &self.targets, &self.linear_sampler);
        self.post
            .rebuild_bind_group(&self.device, &self.targets, &self.linear_sampler);
        log::info!("[gpu] targets resized to {}x{}", width, height);
    }

    /// Reapplies the current configuration after a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn set_logo(&mut self, width: u32, height: u32, rgba: &[u8]) {
        self.ocean.set_logo(
            &self.device,
            &self.queue,
            &self.targets,
            &self.linear_sampler,
            width,
            height,
            rgba,
        );
    }

    pub fn render(&mut self, params: &FrameParams, decay: &LightDecay) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let (width, height) = self.targets.size();

        // Pass 1: decay the sky light and add pending splats
        self.light.encode(
            &self.queue,
            &mut encoder,
            &self.targets,
            decay,
            params.light_decay,
            &params.splats,
        );

        // Pass 2: ocean + sky into the scene target
        let ocean_uniforms = OceanUniforms::from_frame(params, width, height);
        self.ocean.encode(
            &self.queue,
            &mut encoder,
            &self.targets,
            self.light.ping_pong.read(),
            &ocean_uniforms,
        );

        // Pass 3: grain and palette to the surface
        self.post.encode(
            &self.queue,
            &mut encoder,
            &view,
            &PostUniforms {
                resolution: [width as f32, height as f32],
                time: params.time_sec,
                night: params.night,
                noise_scale: params.noise_scale,
                _pad: [0.0; 3],
            },
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
