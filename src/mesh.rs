//! The shared cube mesh every body part is drawn from.
//!
//! One unit cube, built once at startup and never touched again. The vertex
//! list is a plain non-indexed triangle list, so the table below is the
//! entire geometry story: 6 faces, 2 triangles each, 36 vertices, position
//! only. Faces wind counter-clockwise seen from outside, which keeps the
//! mesh ready for back-face culling even though the creature pass leaves
//! culling off.

use crate::gpu::GpuContext;

/// A position-only vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// The 3D position of this vertex in model space.
    pub position: [f32; 3],
}

impl Vertex {
    /// The wgpu vertex buffer layout descriptor for this vertex type.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };
}

const fn v(x: f32, y: f32, z: f32) -> Vertex {
    Vertex { position: [x, y, z] }
}

/// Unit cube centered at the origin, side length 1.
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 36] = [
    // Front face (Z+)
    v(-0.5, -0.5,  0.5), v( 0.5, -0.5,  0.5), v( 0.5,  0.5,  0.5),
    v(-0.5, -0.5,  0.5), v( 0.5,  0.5,  0.5), v(-0.5,  0.5,  0.5),
    // Back face (Z-)
    v( 0.5, -0.5, -0.5), v(-0.5, -0.5, -0.5), v(-0.5,  0.5, -0.5),
    v( 0.5, -0.5, -0.5), v(-0.5,  0.5, -0.5), v( 0.5,  0.5, -0.5),
    // Right face (X+)
    v( 0.5, -0.5,  0.5), v( 0.5, -0.5, -0.5), v( 0.5,  0.5, -0.5),
    v( 0.5, -0.5,  0.5), v( 0.5,  0.5, -0.5), v( 0.5,  0.5,  0.5),
    // Left face (X-)
    v(-0.5, -0.5, -0.5), v(-0.5, -0.5,  0.5), v(-0.5,  0.5,  0.5),
    v(-0.5, -0.5, -0.5), v(-0.5,  0.5,  0.5), v(-0.5,  0.5, -0.5),
    // Top face (Y+)
    v(-0.5,  0.5,  0.5), v( 0.5,  0.5,  0.5), v( 0.5,  0.5, -0.5),
    v(-0.5,  0.5,  0.5), v( 0.5,  0.5, -0.5), v(-0.5,  0.5, -0.5),
    // Bottom face (Y-)
    v(-0.5, -0.5, -0.5), v( 0.5, -0.5, -0.5), v( 0.5, -0.5,  0.5),
    v(-0.5, -0.5, -0.5), v( 0.5, -0.5,  0.5), v(-0.5, -0.5,  0.5),
];

/// GPU-resident cube geometry, uploaded once and shared by every draw.
pub struct CubeMesh {
    /// The GPU buffer containing vertex data.
    pub vertex_buffer: wgpu::Buffer,
    /// The number of vertices (always 36; determines draw call size).
    pub vertex_count: u32,
}

impl CubeMesh {
    /// Uploads the cube vertex table to the GPU.
    pub fn new(gpu: &GpuContext) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertex Buffer"),
                contents: bytemuck::cast_slice(&CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            vertex_buffer,
            vertex_count: CUBE_VERTICES.len() as u32,
        }
    }
}
