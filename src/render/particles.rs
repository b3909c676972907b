use super::helpers;
use crate::core::constants::SPECTRUM_BINS;
use crate::core::{ParticlePopulation, PopulationKind, SceneLayout};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    resolution: [f32; 2],
    time: f32,
    step: f32,
}

impl SceneUniforms {
    pub(crate) fn new(view: Mat4, proj: Mat4, resolution: [f32; 2], time_ms: f32, step: u32) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            resolution,
            time: time_ms,
            step: step as f32,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniforms {
    origin: [f32; 4],
    params: [f32; 4],
}

impl ModelUniforms {
    fn for_population(pop: &ParticlePopulation) -> Self {
        let (kind, variant) = match pop.kind {
            PopulationKind::Tree => (0.0, 0.0),
            PopulationKind::Snow { variant } => (1.0, variant as f32),
        };
        Self {
            origin: pop.origin.extend(0.0).to_array(),
            params: [kind, variant, 0.0, 0.0],
        }
    }
}

/// Per-point attributes, one instance per billboard quad.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointInstance {
    position: [f32; 3],
    size: f32,
    color: [f32; 3],
    phase: f32,
    phase_secondary: f32,
    spectrum_coord: f32,
}

impl PointInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32,
        2 => Float32x3,
        3 => Float32,
        4 => Float32,
        5 => Float32,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    fn pack(pop: &ParticlePopulation) -> Vec<PointInstance> {
        (0..pop.len())
            .map(|i| PointInstance {
                position: pop.positions[i].to_array(),
                size: pop.sizes[i],
                color: pop.colors[i],
                phase: pop.phases[i],
                phase_secondary: pop.phases_secondary[i],
                spectrum_coord: pop.spectrum_coords[i],
            })
            .collect()
    }
}

struct PopulationBuffers {
    instances: wgpu::Buffer,
    count: u32,
    bind_group: wgpu::BindGroup,
}

/// Scene uniforms, the spectrum texture, and one instance buffer per
/// population. Built once when the scene starts.
pub(crate) struct SceneResources {
    scene_uniforms: wgpu::Buffer,
    spectrum: wgpu::Texture,
    scene_bind_group: wgpu::BindGroup,
    points_pipeline: wgpu::RenderPipeline,
    ground_pipeline: Option<wgpu::RenderPipeline>,
    populations: Vec<PopulationBuffers>,
}

impl SceneResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        layout: &SceneLayout,
        color_format: wgpu::TextureFormat,
        show_ground: bool,
    ) -> Self {
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX),
                helpers::texture_entry(1, wgpu::ShaderStages::VERTEX),
            ],
        });
        let model_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("model_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });

        let scene_uniforms = helpers::create_uniform_buffer::<SceneUniforms>(device, "scene_uniforms");
        let spectrum = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("spectrum"),
            size: wgpu::Extent3d {
                width: SPECTRUM_BINS as u32,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let spectrum_view = spectrum.create_view(&wgpu::TextureViewDescriptor::default());
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&spectrum_view),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::PARTICLES_WGSL.into()),
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&scene_bgl, &model_bgl],
            push_constant_ranges: &[],
        });
        let points_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("points_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_points"),
                buffers: &[PointInstance::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_points"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(helpers::ADDITIVE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let ground_pipeline =
            show_ground.then(|| super::ground::create_ground_pipeline(device, &scene_bgl, color_format));

        let populations = layout
            .populations()
            .filter(|pop| !pop.is_empty())
            .map(|pop| {
                let instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("point_instances"),
                    contents: bytemuck::cast_slice(&PointInstance::pack(pop)),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let model = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("model_uniforms"),
                    contents: bytemuck::bytes_of(&ModelUniforms::for_population(pop)),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("model_bg"),
                    layout: &model_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: model.as_entire_binding(),
                    }],
                });
                PopulationBuffers {
                    instances,
                    count: pop.len() as u32,
                    bind_group,
                }
            })
            .collect::<Vec<_>>();
        log::info!(
            "[render] {} populations, {} points",
            populations.len(),
            populations.iter().map(|p| p.count as u64).sum::<u64>()
        );

        Self {
            scene_uniforms,
            spectrum,
            scene_bind_group,
            points_pipeline,
            ground_pipeline,
            populations,
        }
    }

    pub(crate) fn write_scene(&self, queue: &wgpu::Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.scene_uniforms, 0, bytemuck::bytes_of(uniforms));
    }

    /// Upload byte magnitudes into the 1-row spectrum texture.
    pub(crate) fn write_spectrum(&self, queue: &wgpu::Queue, bins: &[u8]) {
        let n = bins.len().min(SPECTRUM_BINS);
        if n == 0 {
            return;
        }
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.spectrum,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &bins[..n],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(n as u32),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: n as u32,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Ground first, then every population additively on top.
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.scene_bind_group, &[]);
        if let Some(ground) = &self.ground_pipeline {
            pass.set_pipeline(ground);
            pass.draw(0..4, 0..1);
        }
        pass.set_pipeline(&self.points_pipeline);
        for pop in &self.populations {
            pass.set_bind_group(1, &pop.bind_group, &[]);
            pass.set_vertex_buffer(0, pop.instances.slice(..));
            pass.draw(0..4, 0..pop.count);
        }
    }
}
