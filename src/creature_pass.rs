//! 3D render pass for the blockling's cube parts.
//!
//! This module provides [`CreaturePass`], which draws the assembled creature
//! with depth testing. Every part shares one unit-cube vertex buffer; the
//! per-part model matrix and color travel in an instance buffer that is
//! written once per frame. The pass still issues one draw call per part, so
//! a frame of the creature is exactly [`PART_COUNT`] draws over the same 36
//! vertices.
//!
//! The view rotation (session spin plus mouse orbit) is the only uniform.
//! There is no projection matrix: clip position is the rotated model-space
//! position, with the z range remapped from GL conventions in the shader.

use crate::creature::{Part, PART_COUNT};
use crate::gpu::GpuContext;
use crate::mesh::{CubeMesh, Vertex};
use crate::transform::Transform;

/// Per-frame uniforms shared by every part.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    /// Combined view rotation applied after each part's model matrix.
    pub view_rotation: [[f32; 4]; 4],
}

/// Per-part instance data: the full model matrix and a flat color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PartInstance {
    /// Model matrix (part space to creature space), column major.
    pub model: [[f32; 4]; 4],
    /// RGBA color for the whole part.
    pub color: [f32; 4],
}

impl PartInstance {
    /// The wgpu vertex buffer layout for instance data, stepping per instance.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PartInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            // model matrix column 0
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
            // model matrix column 1
            wgpu::VertexAttribute {
                offset: 16,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
            // model matrix column 2
            wgpu::VertexAttribute {
                offset: 32,
                shader_location: 3,
                format: wgpu::VertexFormat::Float32x4,
            },
            // model matrix column 3
            wgpu::VertexAttribute {
                offset: 48,
                shader_location: 4,
                format: wgpu::VertexFormat::Float32x4,
            },
            // color
            wgpu::VertexAttribute {
                offset: 64,
                shader_location: 5,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };
}

impl From<&Part> for PartInstance {
    fn from(part: &Part) -> Self {
        Self {
            model: part.transform.matrix().to_cols_array_2d(),
            color: part.color.to_array(),
        }
    }
}

/// Handles rendering of the creature's parts with depth testing.
///
/// `CreaturePass` owns the render pipeline, the shared cube mesh, the frame
/// uniform buffer, the instance buffer sized for [`PART_COUNT`] parts, and a
/// depth buffer that tracks the surface size.
///
/// # Pipeline Configuration
///
/// - No face culling, matching the source program's raster state
/// - Opaque replace blending
/// - Depth write with Less-than comparison against a cleared 1.0 buffer
pub struct CreaturePass {
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    mesh: CubeMesh,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
}

impl CreaturePass {
    /// Creates the creature rendering pass.
    ///
    /// This initializes all GPU resources: the render pipeline, the frame
    /// uniform buffer, the instance buffer, the shared cube mesh, and a
    /// depth buffer sized to the current surface dimensions.
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Creature Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/creature.wgsl").into()),
        });

        // Frame uniform buffer (group 0)
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        // One slot per part, rewritten every frame
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Part Instance Buffer"),
            size: (PART_COUNT * std::mem::size_of::<PartInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Creature Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout],
            push_constant_ranges: &[],
        });

        let (depth_texture, depth_view) = Self::create_depth_texture(gpu);

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Creature Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex::LAYOUT, PartInstance::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let mesh = CubeMesh::new(gpu);

        Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            instance_buffer,
            mesh,
            depth_texture,
            depth_view,
            depth_size: (gpu.width(), gpu.height()),
        }
    }

    fn create_depth_texture(gpu: &GpuContext) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    /// Ensures the depth buffer matches the current surface size.
    ///
    /// Call this at the start of each frame; after a resize the old depth
    /// texture is dropped and a new one created at the surface dimensions.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            let (texture, view) = Self::create_depth_texture(gpu);
            self.depth_texture = texture;
            self.depth_view = view;
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    /// Records the creature into `encoder`, clearing `target` to black.
    ///
    /// Uploads the frame uniforms and the full instance list, then issues
    /// one draw per part over the shared cube vertices.
    pub fn render(
        &self,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        view_rotation: Transform,
        parts: &[Part],
    ) {
        debug_assert!(parts.len() <= PART_COUNT);

        let uniforms = FrameUniforms {
            view_rotation: view_rotation.matrix().to_cols_array_2d(),
        };
        gpu.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniforms));

        let instances: Vec<PartInstance> = parts.iter().map(PartInstance::from).collect();
        gpu.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Creature Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

        for i in 0..parts.len() as u32 {
            pass.draw(0..self.mesh.vertex_count, i..i + 1);
        }
    }
}
