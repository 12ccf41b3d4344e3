//! Render pipelines.
//!
//! - `basic` draws closed, opaque meshes with back-face culling
//! - `double_sided` draws open surfaces from both sides
//! - `light` owns the ambient + directional light uniform shared by both

pub mod basic;
pub mod double_sided;
pub mod light;

/// All pipelines the renderer switches between while drawing a frame.
#[derive(Debug)]
pub struct Pipelines {
    pub basic: wgpu::RenderPipeline,
    pub double_sided: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        light_bind_group_layout: &wgpu::BindGroupLayout,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        Self {
            basic: basic::mk_basic_pipeline(
                device,
                config,
                light_bind_group_layout,
                camera_bind_group_layout,
            ),
            double_sided: double_sided::mk_double_sided_pipeline(
                device,
                config,
                light_bind_group_layout,
                camera_bind_group_layout,
            ),
        }
    }
}
