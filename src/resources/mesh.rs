use wgpu::util::DeviceExt;

use crate::{data_structures::model, resources::primitives::Geometry};

/**
 * Moves generated geometry onto the GPU.
 *
 * Indices are uploaded as `u32`, the index format `DrawModel` binds.
 */
pub fn upload_mesh(
    device: &wgpu::Device,
    name: &str,
    geometry: &Geometry,
    material: usize,
) -> model::Mesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Vertex Buffer", name)),
        contents: bytemuck::cast_slice(&geometry.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Index Buffer", name)),
        contents: bytemuck::cast_slice(&geometry.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    model::Mesh {
        name: name.to_string(),
        vertex_buffer,
        index_buffer,
        num_elements: geometry.indices.len() as u32,
        material,
    }
}
