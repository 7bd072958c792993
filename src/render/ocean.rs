use super::helpers;
use super::targets::{RenderTargets, SCENE_FORMAT};
use crate::core::constants::MAX_RIPPLES;
use crate::core::shader::{build_ocean_wgsl, program_label};
use crate::core::{FrameParams, QualityTier};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct OceanUniforms {
    resolution: [f32; 2],
    time: f32,
    night: f32,
    ambient: f32,
    camera_y: f32,
    camera_z: f32,
    camera_tilt: f32,
    logo_center: [f32; 2],
    logo_size: [f32; 2],
    logo_fade: f32,
    ripple_count: u32,
    _pad: [f32; 2],
    ripples: [[f32; 4]; MAX_RIPPLES],
}

impl OceanUniforms {
    pub(crate) fn from_frame(p: &FrameParams, width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            time: p.time_sec,
            night: p.night,
            ambient: p.ambient,
            camera_y: p.pose.y_offset,
            camera_z: p.pose.z_offset,
            camera_tilt: p.pose.tilt_offset,
            logo_center: p.logo_rect.center.to_array(),
            logo_size: p.logo_rect.size.to_array(),
            logo_fade: p.logo_fade,
            ripple_count: p.ripple_count,
            _pad: [0.0; 2],
            ripples: p.ripples,
        }
    }
}

/// Ocean pipeline compiled for one quality tier.
///
/// Validation errors surface asynchronously through an error scope; once
/// reported the program stays failed and the frame loop stops drawing.
pub(crate) struct OceanProgram {
    pub(crate) tier: QualityTier,
    pipeline: wgpu::RenderPipeline,
    failed: Rc<Cell<bool>>,
}

impl OceanProgram {
    pub(crate) fn build(device: &wgpu::Device, layout: &wgpu::PipelineLayout, tier: QualityTier) -> Self {
        let profile = tier.profile();
        let label = program_label(profile);
        let source = build_ocean_wgsl(profile);

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        let pipeline = helpers::make_fullscreen_pipeline(
            device,
            &label,
            layout,
            &shader,
            "fs_ocean",
            SCENE_FORMAT,
            None,
        );
        let scope = device.pop_error_scope();

        let failed = Rc::new(Cell::new(false));
        let failed_flag = failed.clone();
        spawn_local(async move {
            if let Some(err) = scope.await {
                log::error!("[gpu] {} failed to compile: {}", label, err);
                failed_flag.set(true);
            }
        });
        log::info!("[gpu] built ocean program for {} quality", tier);

        Self {
            tier,
            pipeline,
            failed,
        }
    }

    pub(crate) fn is_failed(&self) -> bool {
        self.failed.get()
    }
}

/// Everything the ocean pass binds besides the program itself.
pub(crate) struct OceanResources {
    bgl: wgpu::BindGroupLayout,
    pub(crate) pipeline_layout: wgpu::PipelineLayout,
    uniform_buffer: wgpu::Buffer,
    _logo_tex: wgpu::Texture,
    logo_view: wgpu::TextureView,
    /// `bind_groups[i]` samples light buffer `i`.
    bind_groups: [wgpu::BindGroup; 2],
    pub(crate) program: OceanProgram,
}

impl OceanResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        targets: &RenderTargets,
        sampler: &wgpu::Sampler,
        tier: QualityTier,
    ) -> Self {
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ocean_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT),
                helpers::texture_entry(1, true),
                helpers::texture_entry(2, true),
                helpers::sampler_entry(3),
            ],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ocean_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let uniform_buffer = helpers::create_uniform_buffer::<OceanUniforms>(device, "ocean_uniforms");

        // Transparent until the logo image arrives.
        let (logo_tex, logo_view) = create_logo_texture(device, queue, 1, 1, &[0, 0, 0, 0]);
        let bind_groups =
            Self::make_bind_groups(device, &bgl, &uniform_buffer, targets, &logo_view, sampler);
        let program = OceanProgram::build(device, &pipeline_layout, tier);

        Self {
            bgl,
            pipeline_layout,
            uniform_buffer,
            _logo_tex: logo_tex,
            logo_view,
            bind_groups,
            program,
        }
    }

    fn make_bind_groups(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniforms: &wgpu::Buffer,
        targets: &RenderTargets,
        logo_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> [wgpu::BindGroup; 2] {
        let make = |i: usize| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(if i == 0 { "ocean_bg_a" } else { "ocean_bg_b" }),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniforms.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&targets.light_views[i]),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(logo_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            })
        };
        [make(0), make(1)]
    }

    pub(crate) fn rebuild_bind_groups(
        &mut self,
        device: &wgpu::Device,
        targets: &RenderTargets,
        sampler: &wgpu::Sampler,
    ) {
        self.bind_groups = Self::make_bind_groups(
            device,
            &self.bgl,
            &self.uniform_buffer,
            targets,
            &self.logo_view,
            sampler,
        );
    }

    /// Swaps in a program for `tier`; the old pipeline is dropped here.
    pub(crate) fn rebuild_program(&mut self, device: &wgpu::Device, tier: QualityTier) {
        self.program = OceanProgram::build(device, &self.pipeline_layout, tier);
    }

    /// Uploads a rasterised logo (tightly packed RGBA8 rows).
    pub(crate) fn set_logo(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        targets: &RenderTargets,
        sampler: &wgpu::Sampler,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) {
        if width == 0 || height == 0 || rgba.len() != (width * height * 4) as usize {
            log::warn!("[logo] ignoring malformed image {}x{}", width, height);
            return;
        }
        let (tex, view) = create_logo_texture(device, queue, width, height, rgba);
        self._logo_tex = tex;
        self.logo_view = view;
        self.rebuild_bind_groups(device, targets, sampler);
    }

    pub(crate) fn encode(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        light_slot: usize,
        uniforms: &OceanUniforms,
    ) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        helpers::blit(
            encoder,
            "ocean_pass",
            &targets.scene_view,
            wgpu::Color::BLACK,
            &self.program.pipeline,
            &self.bind_groups[light_slot],
        );
    }
}

fn create_logo_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> (wgpu::Texture, wgpu::TextureView) {
    let (tex, view) = helpers::create_color_texture(
        device,
        "logo_tex",
        width,
        height,
        wgpu::TextureFormat::Rgba8Unorm,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    (tex, view)
}
