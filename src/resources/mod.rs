use crate::{
    data_structures::model::{self, MaterialUniform},
    resources::primitives::Geometry,
};

/**
 * This module contains everything needed to turn generated shapes into GPU models.
 */
pub mod colour;
pub mod mesh;
pub mod primitives;

/// Layout of the per-material uniform bound at group 0 of the Phong pipelines.
pub fn material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("material_bind_group_layout"),
    })
}

/// Builds a single-mesh, single-material model.
pub fn mk_model(
    device: &wgpu::Device,
    name: &str,
    geometry: &Geometry,
    material: MaterialUniform,
) -> model::Model {
    let layout = material_layout(device);
    let materials = vec![model::Material::new(device, name, material, &layout)];
    let meshes = vec![mesh::upload_mesh(device, name, geometry, 0)];
    model::Model { meshes, materials }
}
