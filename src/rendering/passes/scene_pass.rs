use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use id_arena::Arena;
use wgpu::{
    DepthBiasState, MultisampleState, PipelineCompilationOptions, RenderPassDescriptor,
    ShaderSource, StencilState,
};

use crate::materials::Surface;
use crate::model::VERTEX_LAYOUT;
use crate::rendering::render_model::{RenderModel, RenderModelId};
use crate::rendering::surface_textures::SurfaceTextureManager;
use crate::rendering::texture::DepthTexture;

const SCENE_SHADER: &str = include_str!("../../shaders/scene.wgsl");

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    /// kind, theme mix, highlight, unused
    pub params: [f32; 4],
}

impl ObjectUniform {
    pub fn new(world: Mat4, base_color: [f32; 4], surface: &Surface, highlighted: bool) -> Self {
        Self {
            model: world.to_cols_array_2d(),
            normal_matrix: world.inverse().transpose().to_cols_array_2d(),
            base_color,
            params: [
                surface.kind() as u32 as f32,
                surface.theme_mix(),
                if highlighted { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// One primitive of one object.
pub struct SceneDraw {
    pub render_model: RenderModelId,
    pub primitive: usize,
    pub surface: Surface,
    pub uniform: ObjectUniform,
    /// Squared distance to the camera, used to sort transparent draws
    pub depth: f32,
}

pub struct SceneTextureViews<'a> {
    pub color: &'a wgpu::TextureView,
    pub depth: &'a wgpu::TextureView,
}

pub struct ScenePass {
    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,

    object_bind_group_layout: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_capacity: usize,
    object_stride: u64,
}

impl ScenePass {
    const INITIAL_CAPACITY: usize = 256;

    pub fn create(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        global_layout: &wgpu::BindGroupLayout,
        surface_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let object_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object bind group layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ObjectUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene pipeline layout"),
                bind_group_layouts: &[global_layout, &object_bind_group_layout, surface_layout],
                push_constant_ranges: &[],
            });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene shader"),
            source: ShaderSource::Wgsl(SCENE_SHADER.into()),
        });

        let create_pipeline = |label: &str, transparent: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&render_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[VERTEX_LAYOUT],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: output_format,
                        blend: Some(if transparent {
                            wgpu::BlendState::ALPHA_BLENDING
                        } else {
                            wgpu::BlendState::REPLACE
                        }),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Glass and steam cards are seen from both sides
                    cull_mode: if transparent {
                        None
                    } else {
                        Some(wgpu::Face::Back)
                    },
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthTexture::DEPTH_FORMAT,
                    depth_write_enabled: !transparent,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: StencilState::default(),
                    bias: DepthBiasState::default(),
                }),
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let opaque_pipeline = create_pipeline("Scene opaque pipeline", false);
        let transparent_pipeline = create_pipeline("Scene transparent pipeline", true);

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let object_stride = (std::mem::size_of::<ObjectUniform>() as u64).next_multiple_of(alignment);
        let (object_buffer, object_bind_group) = Self::create_object_buffer(
            device,
            &object_bind_group_layout,
            Self::INITIAL_CAPACITY,
            object_stride,
        );

        Self {
            opaque_pipeline,
            transparent_pipeline,
            object_bind_group_layout,
            object_buffer,
            object_bind_group,
            object_capacity: Self::INITIAL_CAPACITY,
            object_stride,
        }
    }

    fn create_object_buffer(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        capacity: usize,
        stride: u64,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object uniform buffer"),
            size: capacity as u64 * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                }),
            }],
        });

        (buffer, bind_group)
    }

    /// Writes every draw's uniform into its slot, growing the buffer as needed.
    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, draws: &[SceneDraw]) {
        if draws.len() > self.object_capacity {
            let capacity = draws.len().next_power_of_two();
            let (buffer, bind_group) = Self::create_object_buffer(
                device,
                &self.object_bind_group_layout,
                capacity,
                self.object_stride,
            );
            self.object_buffer = buffer;
            self.object_bind_group = bind_group;
            self.object_capacity = capacity;
        }

        let stride = self.object_stride as usize;
        let mut bytes = vec![0u8; draws.len() * stride];
        for (slot, draw) in draws.iter().enumerate() {
            let uniform = bytemuck::bytes_of(&draw.uniform);
            bytes[slot * stride..slot * stride + uniform.len()].copy_from_slice(uniform);
        }

        if !bytes.is_empty() {
            queue.write_buffer(&self.object_buffer, 0, &bytes);
        }
    }

    /// `draws` must hold the opaque draws first, then the transparent ones
    /// sorted back to front.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        texture_views: &SceneTextureViews,
        clear_color: wgpu::Color,
        global_bind_group: &wgpu::BindGroup,
        render_models: &Arena<RenderModel>,
        surfaces: &mut SurfaceTextureManager,
        draws: &[SceneDraw],
    ) {
        self.upload(device, queue, draws);

        let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: texture_views.color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: texture_views.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, global_bind_group, &[]);

        let mut transparent = None;
        for (slot, draw) in draws.iter().enumerate() {
            let Some(primitive) = render_models
                .get(draw.render_model)
                .and_then(|model| model.primitives.get(draw.primitive))
            else {
                continue;
            };

            let is_transparent = draw.surface.is_transparent();
            if transparent != Some(is_transparent) {
                render_pass.set_pipeline(if is_transparent {
                    &self.transparent_pipeline
                } else {
                    &self.opaque_pipeline
                });
                transparent = Some(is_transparent);
            }

            let offset = (slot as u64 * self.object_stride) as u32;
            render_pass.set_bind_group(1, &self.object_bind_group, &[offset]);
            render_pass.set_bind_group(2, surfaces.bind_group(&draw.surface), &[]);

            primitive.draw(&mut render_pass);
        }
    }
}

/// Puts opaque draws first and sorts transparent ones back to front.
pub fn order_draws(draws: &mut [SceneDraw]) {
    draws.sort_by(|a, b| {
        let a_transparent = a.surface.is_transparent();
        let b_transparent = b.surface.is_transparent();

        a_transparent.cmp(&b_transparent).then_with(|| {
            if a_transparent {
                b.depth.total_cmp(&a.depth)
            } else {
                std::cmp::Ordering::Equal
            }
        })
    });
}
