use cgmath::InnerSpace;
use wgpu::util::DeviceExt;

use crate::resources::colour::linear_rgb;

/// The light rig: one ambient term plus one directional light.
#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub ambient: [f32; 3],
    pub ambient_intensity: f32,
    /// Unit vector pointing from the scene towards the light.
    pub direction: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    pub colour: [f32; 3],
    pub intensity: f32,
}

impl LightUniform {
    /// A directional light shining from `position` towards the origin.
    pub fn new(
        ambient_hex: u32,
        ambient_intensity: f32,
        position: cgmath::Vector3<f32>,
        colour_hex: u32,
        intensity: f32,
    ) -> Self {
        Self {
            ambient: linear_rgb(ambient_hex),
            ambient_intensity,
            direction: position.normalize().into(),
            _padding: 0,
            colour: linear_rgb(colour_hex),
            intensity,
        }
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}

impl LightResources {
    pub fn new(uniform: LightUniform, device: &wgpu::Device) -> Self {
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Replaces the rig and uploads it.
    pub fn set(&mut self, queue: &wgpu::Queue, uniform: LightUniform) {
        self.uniform = uniform;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_matches_wgsl_layout() {
        // three 16 byte rows: ambient, direction, colour
        assert_eq!(std::mem::size_of::<LightUniform>(), 48);
    }

    #[test]
    fn direction_points_at_the_light() {
        let light = LightUniform::new(0xffffff, 0.6, [10.0, 20.0, 10.0].into(), 0xffffff, 0.8);
        let direction: cgmath::Vector3<f32> = light.direction.into();
        assert!((direction.magnitude() - 1.0).abs() < 1e-6);
        assert!(direction.y > direction.x && direction.x == direction.z);
    }
}
