//! The central GPU and window context.
//!
//! [`Context`] owns the surface, device, queue, camera, light rig and
//! pipelines. Flows read it every hook and may change its knobs (clear colour,
//! redraw policy, camera pose) through [`crate::flow::Out::Configure`].

use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    camera::{Camera, CameraResources, Projection},
    data_structures::texture,
    pipelines::{
        Pipelines,
        light::{LightResources, LightUniform},
    },
    render::Render,
};

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub light: LightResources,
    pub pipelines: Pipelines,
    pub clear_colour: wgpu::Color,
    /// Whether a new frame is requested as soon as one was presented.
    ///
    /// Flows switch this off to stop the loop for good; resizes still repaint once.
    pub continuous_redraw: bool,
}

impl Context {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // The instance is a handle to our GPU
        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("cannot create a render surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter is compatible with the surface")?;

        log::info!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                ..Default::default()
            })
            .await
            .context("cannot open the GPU device")?;

        log::info!("Surface");
        let surface_caps = surface.get_capabilities(&adapter);
        let config = surface_configuration(&surface_caps, size.width, size.height)?;
        log::info!(
            "Surface format {:?}, present mode {:?}",
            config.format,
            config.present_mode
        );

        let projection =
            Projection::new(config.width, config.height, cgmath::Deg(75.0), 0.1, 1000.0);
        let camera = CameraResources::new(
            &device,
            Camera::new((0.0, 5.0, 10.0), (0.0, 0.0, 0.0)),
            &projection,
        );

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let light = LightResources::new(
            LightUniform::new(0xffffff, 0.3, [0.0, 1.0, 0.0].into(), 0xffffff, 1.0),
            &device,
        );

        let pipelines = Pipelines::new(
            &device,
            &config,
            &light.bind_group_layout,
            &camera.bind_group_layout,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            light,
            pipelines,
            window,
            depth_texture,
            clear_colour: wgpu::Color::BLACK,
            continuous_redraw: true,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

/// Surface setup for a `width` x `height` window.
///
/// Game motion is per frame, so presentation always waits for the display.
/// The shaders output linear colour, so an sRGB format is preferred.
pub(crate) fn surface_configuration(
    caps: &wgpu::SurfaceCapabilities,
    width: u32,
    height: u32,
) -> anyhow::Result<wgpu::SurfaceConfiguration> {
    let format = caps
        .formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first().copied())
        .context("the surface reports no texture formats")?;
    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode: caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

/// The subset of the context flow constructors get to build their GPU resources with.
///
/// Device and queue are internally reference counted, so this is cheap to create.
#[derive(Clone, Debug)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
        }
    }
}

/// Anything that keeps CPU-side state mirrored in GPU buffers and can be drawn.
pub trait GPUResource<'a, 'pass> {
    fn write_to_buffer(&mut self, queue: &wgpu::Queue, device: &wgpu::Device);

    fn to_render(&'a self) -> Render<'a, 'pass>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        let mut caps = wgpu::SurfaceCapabilities::default();
        caps.formats = formats;
        caps.present_modes = vec![
            wgpu::PresentMode::Immediate,
            wgpu::PresentMode::Mailbox,
            wgpu::PresentMode::Fifo,
        ];
        caps
    }

    #[test]
    fn frames_wait_for_the_display_even_if_immediate_is_listed_first() {
        let config =
            surface_configuration(&caps(vec![wgpu::TextureFormat::Bgra8Unorm]), 800, 600)
                .unwrap();
        assert_eq!(config.present_mode, wgpu::PresentMode::AutoVsync);
    }

    #[test]
    fn srgb_format_is_preferred() {
        let config = surface_configuration(
            &caps(vec![
                wgpu::TextureFormat::Bgra8Unorm,
                wgpu::TextureFormat::Bgra8UnormSrgb,
            ]),
            800,
            600,
        )
        .unwrap();
        assert_eq!(config.format, wgpu::TextureFormat::Bgra8UnormSrgb);
    }

    #[test]
    fn minimised_window_still_gets_a_valid_size() {
        let config =
            surface_configuration(&caps(vec![wgpu::TextureFormat::Rgba8Unorm]), 0, 0).unwrap();
        assert_eq!((config.width, config.height), (1, 1));
    }

    #[test]
    fn surface_without_formats_is_an_error() {
        assert!(surface_configuration(&caps(vec![]), 800, 600).is_err());
    }
}
