//! Shared unit-quad geometry for quad-based renderers.
//!
//! Scene renderers instance this quad per shape; screen-space passes stretch a
//! single instance over the whole target.

use bytemuck::{Pod, Zeroable};

/// Unit-quad corner in `[0, 1]²`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Creates the shared vertex/index buffer pair for a quad pipeline.
pub fn create_quad_buffers(device: &wgpu::Device, label: &str) -> (wgpu::Buffer, wgpu::Buffer) {
    use wgpu::util::DeviceExt;

    let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} quad vbo")),
        contents: bytemuck::cast_slice(&QUAD_VERTICES),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} quad ibo")),
        contents: bytemuck::cast_slice(&QUAD_INDICES),
        usage: wgpu::BufferUsages::INDEX,
    });

    (vbo, ibo)
}
