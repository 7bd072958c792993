use super::helpers;
use super::targets::{RenderTargets, LIGHT_FORMAT};
use crate::core::constants::{MAX_PENDING_SPLATS, PAINT_INTENSITY};
use crate::core::light::{LightDecay, PingPong, SplatInstance};
use crate::core::projection::LightSplat;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct DecayUniforms {
    decay: f32,
    cutoff: f32,
    bias: f32,
    _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SplatUniforms {
    tex_size: [f32; 2],
    intensity: f32,
    _pad: f32,
}

const SPLAT_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4, 2 => Float32];

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
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

/// Decay + splat passes over the two light buffers.
pub(crate) struct LightPass {
    decay_bgl: wgpu::BindGroupLayout,
    decay_pipeline: wgpu::RenderPipeline,
    splat_pipeline: wgpu::RenderPipeline,
    decay_uniforms: wgpu::Buffer,
    splat_uniforms: wgpu::Buffer,
    /// `decay_bgs[i]` reads light buffer `i`.
    decay_bgs: [wgpu::BindGroup; 2],
    splat_bg: wgpu::BindGroup,
    instances: wgpu::Buffer,
    pub(crate) ping_pong: PingPong,
}

impl LightPass {
    pub(crate) fn new(device: &wgpu::Device, targets: &RenderTargets) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("light_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::LIGHT_WGSL.into()),
        });
        let decay_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("light_decay_bgl"),
            entries: &[
                helpers::texture_entry(0, false),
                helpers::uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
            ],
        });
        let splat_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("light_splat_bgl"),
            entries: &[helpers::uniform_entry(
                2,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let decay_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("light_decay_pl"),
            bind_group_layouts: &[&decay_bgl],
            push_constant_ranges: &[],
        });
        let splat_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("light_splat_pl"),
            bind_group_layouts: &[&splat_bgl],
            push_constant_ranges: &[],
        });

        let decay_pipeline = helpers::make_fullscreen_pipeline(
            device,
            "light_decay_pipeline",
            &decay_pl,
            &shader,
            "fs_decay",
            LIGHT_FORMAT,
            None,
        );
        let splat_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("light_splat_pipeline"),
            layout: Some(&splat_pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_splat"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<SplatInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &SPLAT_ATTRIBUTES,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_splat"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: LIGHT_FORMAT,
                    blend: Some(ADDITIVE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let decay_uniforms = helpers::create_uniform_buffer::<DecayUniforms>(device, "light_decay_uniforms");
        let splat_uniforms = helpers::create_uniform_buffer::<SplatUniforms>(device, "light_splat_uniforms");
        let splat_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("light_splat_bg"),
            layout: &splat_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 2,
                resource: splat_uniforms.as_entire_binding(),
            }],
        });
        let instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("light_splat_instances"),
            size: (MAX_PENDING_SPLATS * std::mem::size_of::<SplatInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let decay_bgs = Self::decay_bind_groups(device, &decay_bgl, &decay_uniforms, targets);

        Self {
            decay_bgl,
            decay_pipeline,
            splat_pipeline,
            decay_uniforms,
            splat_uniforms,
            decay_bgs,
            splat_bg,
            instances,
            ping_pong: PingPong::default(),
        }
    }

    fn decay_bind_groups(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniforms: &wgpu::Buffer,
        targets: &RenderTargets,
    ) -> [wgpu::BindGroup; 2] {
        let make = |i: usize| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(if i == 0 { "light_decay_bg_a" } else { "light_decay_bg_b" }),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&targets.light_views[i]),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: uniforms.as_entire_binding(),
                    },
                ],
            })
        };
        [make(0), make(1)]
    }

    /// New light buffers start empty, so painting restarts from slot 0.
    pub(crate) fn on_targets_recreated(&mut self, device: &wgpu::Device, targets: &RenderTargets) {
        self.decay_bgs =
            Self::decay_bind_groups(device, &self.decay_bgl, &self.decay_uniforms, targets);
        self.ping_pong.reset();
    }

    /// Decays the previous buffer into the other one, adds `splats` on top,
    /// then swaps roles.
    pub(crate) fn encode(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        decay: &LightDecay,
        decay_factor: f32,
        splats: &[LightSplat],
    ) {
        let read = self.ping_pong.read();
        let write = self.ping_pong.write();

        queue.write_buffer(
            &self.decay_uniforms,
            0,
            bytemuck::bytes_of(&DecayUniforms {
                decay: decay_factor,
                cutoff: decay.cutoff,
                bias: decay.bias,
                _pad: 0.0,
            }),
        );

        let instances: Vec<SplatInstance> = splats
            .iter()
            .take(MAX_PENDING_SPLATS)
            .map(SplatInstance::from)
            .collect();
        if !instances.is_empty() {
            queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(&instances));
            queue.write_buffer(
                &self.splat_uniforms,
                0,
                bytemuck::bytes_of(&SplatUniforms {
                    tex_size: [targets.width as f32, targets.height as f32],
                    intensity: PAINT_INTENSITY,
                    _pad: 0.0,
                }),
            );
        }

        let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("light_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &targets.light_views[write],
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
        r.set_pipeline(&self.decay_pipeline);
        r.set_bind_group(0, &self.decay_bgs[read], &[]);
        r.draw(0..3, 0..1);

        if !instances.is_empty() {
            r.set_pipeline(&self.splat_pipeline);
            r.set_bind_group(0, &self.splat_bg, &[]);
            r.set_vertex_buffer(0, self.instances.slice(..));
            r.draw(0..6, 0..instances.len() as u32);
        }
        drop(r);

        self.ping_pong.swap();
    }
}
