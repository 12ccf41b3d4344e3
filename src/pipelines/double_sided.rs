use crate::pipelines::basic::mk_phong_pipeline;

/**
 * Same shading as the basic pipeline but without face culling.
 *
 * Used for open surfaces such as the ground, which has to stay visible when the
 * airplane dives below it. The shader flips the normal of back faces.
 */
pub fn mk_double_sided_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    light_bind_group_layout: &wgpu::BindGroupLayout,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    mk_phong_pipeline(
        device,
        config,
        light_bind_group_layout,
        camera_bind_group_layout,
        None,
    )
}
