//! Flow control and application event loop.
//!
//! A "flow" is a self-contained part of the application that reacts to input,
//! advances its own state and hands the engine something to draw. The engine
//! owns the window, the GPU context and the list of flows and drives all of
//! them from winit's event loop.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow<S, E>`] is the trait every flow implements
//! - [`Out<E>`] is what lifecycle hooks return to request side effects
//!
//! # Frame
//!
//! Every `RedrawRequested` runs these steps:
//! 1. `on_update` on all flows, applying their outputs immediately
//! 2. upload the camera uniform
//! 3. collect `on_render` from all flows and draw them in pipeline batches
//! 4. present, then request the next frame if `continuous_redraw` is still set
//!
//! Window and device events are forwarded to every flow as they arrive.
//! Events emitted through [`Out::FutEvent`] come back through the event loop
//! and are offered to the flows in order via `on_custom_events`.

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use instant::{Duration, Instant};

#[cfg(feature = "integration-tests")]
use anyhow::Context as _;
#[cfg(feature = "integration-tests")]
use tokio::runtime::Runtime;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowAttributes},
};

use crate::{
    context::{Context, InitContext},
    data_structures::{model::DrawModel, texture::Texture},
    render::{Instanced, Render},
};

///
/// This is the Output Type for every lifecycle hook where the user can pass async events that are
/// handled according to the platform you're running on.
///
/// `Out::FutEvent` resolves futures of events that are put in the event queue and delivered to
/// every flow's `on_custom_events` afterwards.
///
/// `Out::Configure` can be used to modify the Context during runtime for instance to move the
/// camera, change the clear colour or stop the frame loop.
///
/// `Out::Batch` carries several outputs from one hook; they are handled in order.
///
/// `Empty` is the default output used when no eventing/futures need to be handled.
///
pub enum Out<E> {
    FutEvent(Vec<Box<dyn Future<Output = E>>>),
    Configure(Box<dyn FnOnce(&mut Context)>),
    Batch(Vec<Out<E>>),
    Empty,
}

impl<E> Default for Out<E> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<E: 'static> Out<E> {
    /// Emits already available events.
    pub fn events(events: impl IntoIterator<Item = E>) -> Self {
        let futures: Vec<Box<dyn Future<Output = E>>> = events
            .into_iter()
            .map(|event| Box::new(futures::future::ready(event)) as Box<dyn Future<Output = E>>)
            .collect();
        if futures.is_empty() {
            Out::Empty
        } else {
            Out::FutEvent(futures)
        }
    }
}

#[cfg(feature = "integration-tests")]
pub enum ImageTestResult {
    Passed,
    Waiting,
    Failed,
}

/// Trait for implementing a renderable part of the application.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is created; configure the context here
/// 2. `on_window_events()` and `on_device_events()` are called for each winit input event
/// 3. `on_update()` is called every frame
/// 4. `on_custom_events()` is called for events emitted by any flow
/// 5. `on_render()` is called each frame and specifies how to render `self`
///
pub trait GraphicsFlow<S, E> {
    /// Initialize the flow and configure the context.
    ///
    /// Sets things such as the background colour, lights or camera start position.
    fn on_init(&mut self, ctx: &mut Context, state: &mut S) -> Out<E>;

    /// Update state every frame.
    ///
    /// Called every frame with the elapsed time `dt`, before anything is drawn.
    fn on_update(&mut self, ctx: &Context, state: &mut S, dt: Duration) -> Out<E>;

    /// Handle raw device events.
    fn on_device_events(&mut self, ctx: &Context, state: &mut S, event: &DeviceEvent) -> Out<E>;

    /// Handle window events (keyboard, focus, resizing, etc.).
    fn on_window_events(&mut self, ctx: &Context, state: &mut S, event: &WindowEvent) -> Out<E>;

    /// Handle custom application events.
    ///
    /// Returns the event if it was not consumed, allowing it to be passed to
    /// the next flow. Returning `None` means the event was consumed.
    fn on_custom_events(&mut self, ctx: &Context, state: &mut S, event: E) -> Option<E>;

    /// Return renderable objects for this flow.
    fn on_render<'pass>(&self) -> Render<'_, 'pass>;

    #[cfg(feature = "integration-tests")]
    fn render_to_texture(
        &self,
        ctx: &Context,
        state: &mut S,
        texture: &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
    ) -> Result<ImageTestResult, anyhow::Error>;
}

// Dummy impl to make wasm work
impl<State, Event> Debug for dyn GraphicsFlow<State, Event> + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an `InitContext` and asynchronously returns a
/// boxed `GraphicsFlow`, so flows can build their GPU resources up front.
pub type FlowConstructor<S, E> =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = Box<dyn GraphicsFlow<S, E>>>>>>;

/// Application state bundle: GPU context, app state, and surface status.
#[derive(Debug)]
pub struct AppState<State: 'static> {
    pub(crate) ctx: Context,
    state: State,
    is_surface_configured: bool,
}

impl<State: Default> AppState<State> {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        Ok(Self {
            ctx,
            state: State::default(),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    #[cfg(feature = "integration-tests")]
    fn get_test_texture(&self, extent3d: wgpu::Extent3d) -> wgpu::Texture {
        self.ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Golden Image Test Output Texture"),
            size: extent3d,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.ctx.config.format,
            usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
    }

    #[cfg(feature = "integration-tests")]
    fn get_test_depth_texture(&self, extent3d: wgpu::Extent3d) -> wgpu::Texture {
        self.ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Golden Image Test Depth Texture"),
            size: extent3d,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Texture::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
    }

    /// Surface size rounded up to multiples of 256, as buffer copies require aligned rows.
    #[cfg(feature = "integration-tests")]
    fn get_width_height(&self) -> (u32, u32) {
        let align = |v: u32| v.div_ceil(256) * 256;
        (align(self.ctx.config.width), align(self.ctx.config.height))
    }

    #[cfg(feature = "integration-tests")]
    fn get_test_3d_extent(&self) -> wgpu::Extent3d {
        let (width, height) = self.get_width_height();
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        }
    }

    fn render<Event>(
        &mut self,
        graphics_flows: &mut Vec<Box<dyn GraphicsFlow<State, Event>>>,
        #[cfg(feature = "integration-tests")] async_runtime: &Runtime,
        #[cfg(feature = "integration-tests")] event_loop: &EventLoopProxy<
            FlowEvent<State, Event>,
        >,
    ) -> anyhow::Result<()> {
        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        #[cfg(not(feature = "integration-tests"))]
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        #[cfg(feature = "integration-tests")]
        let (tex, depth) = {
            let extent3d = self.get_test_3d_extent();
            let tex = self.get_test_texture(extent3d);
            let depth = self.get_test_depth_texture(extent3d);
            (tex, depth)
        };

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        #[cfg(feature = "integration-tests")]
                        view: &tex.create_view(&wgpu::TextureViewDescriptor::default()),
                        #[cfg(not(feature = "integration-tests"))]
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        #[cfg(feature = "integration-tests")]
                        view: &depth.create_view(&wgpu::TextureViewDescriptor::default()),
                        #[cfg(not(feature = "integration-tests"))]
                        view: &self.ctx.depth_texture.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                    ..Default::default()
                });

            let mut basics: Vec<Instanced> = Vec::new();
            let mut double_sideds: Vec<Instanced> = Vec::new();
            graphics_flows.iter().for_each(|flow| {
                let render = flow.on_render();
                render.set_pipelines(
                    &self.ctx,
                    &mut render_pass,
                    &mut basics,
                    &mut double_sideds,
                );
            });

            let batches = [
                (&self.ctx.pipelines.basic, basics),
                (&self.ctx.pipelines.double_sided, double_sideds),
            ];
            for (pipeline, batch) in batches {
                if batch.is_empty() {
                    continue;
                }
                render_pass.set_pipeline(pipeline);
                for instanced in batch {
                    if instanced.amount == 0 || instanced.instance.size() == 0 {
                        log::warn!("you attempted to render something with zero instances");
                        continue;
                    }
                    render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                    render_pass.draw_model_instanced(
                        instanced.model,
                        0..instanced.amount as u32,
                        &self.ctx.camera.bind_group,
                        &self.ctx.light.bind_group,
                    );
                }
            }
        }

        #[cfg(feature = "integration-tests")]
        let output_buffer = {
            let u32_size = std::mem::size_of::<u32>() as u32;
            let (width, height) = self.get_width_height();
            let output_buffer_size = (u32_size * width * height) as wgpu::BufferAddress;
            let output_buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
                size: output_buffer_size,
                usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
                label: Some("Golden Image Test Output Buffer"),
                mapped_at_creation: false,
            });
            encoder.copy_texture_to_buffer(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &tex,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                },
                wgpu::TexelCopyBufferInfo {
                    buffer: &output_buffer,
                    layout: wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(u32_size * width),
                        rows_per_image: Some(height),
                    },
                },
                self.get_test_3d_extent(),
            );
            output_buffer
        };

        self.ctx.queue.submit(iter::once(encoder.finish()));

        #[cfg(feature = "integration-tests")]
        {
            let buffer_slice = output_buffer.slice(..);
            let (width, height) = self.get_width_height();
            let mapped = async {
                let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
                buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
                    let _ = tx.send(result);
                });
                self.ctx.device.poll(wgpu::PollType::Wait {
                    submission_index: None,
                    timeout: Some(Duration::from_secs(3)),
                })?;
                rx.receive()
                    .await
                    .context("the GPU dropped the buffer mapping request")??;
                anyhow::Ok(())
            };
            async_runtime.block_on(mapped)?;
            let data = buffer_slice.get_mapped_range();
            let mut img = image::ImageBuffer::<image::Rgba<u8>, _>::from_raw(width, height, data)
                .context("mapped buffer is smaller than the test texture")?;

            let state = &mut self.state;
            let mut all_passed = true;
            for flow in graphics_flows.iter() {
                match flow.render_to_texture(&self.ctx, state, &mut img)? {
                    ImageTestResult::Passed => (),
                    ImageTestResult::Waiting => all_passed = false,
                    ImageTestResult::Failed => panic!("golden image assertion failed"),
                }
            }
            if all_passed {
                event_loop
                    .send_event(FlowEvent::Exit)
                    .context("all assertions passed but the event loop is already closed")?;
            }
        }

        output.present();
        Ok(())
    }
}

/// Cleanup that runs when the loop exits, whether or not the flows ever started.
#[derive(Default)]
pub(crate) struct Teardown(Vec<Box<dyn FnOnce()>>);

impl Teardown {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub(crate) fn push(&mut self, step: impl FnOnce() + 'static) {
        self.0.push(Box::new(step));
    }

    /// Runs every step once, in the order they were added.
    pub(crate) fn run(&mut self) {
        self.0.drain(..).for_each(|step| step());
    }
}

pub struct App<State: 'static, Event: 'static> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<FlowEvent<State, Event>>,
    state: Option<AppState<State>>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow<State, Event>>>,
    // This holds the constructors at the start.
    // We use Option to `take()` it after use.
    constructors: Option<Vec<FlowConstructor<State, Event>>>,
    window_attributes: WindowAttributes,
    teardown: Teardown,
    last_time: Instant,
}

impl<State, Event> App<State, Event>
where
    State: 'static,
    Event: 'static,
{
    fn new(
        event_loop: &EventLoop<FlowEvent<State, Event>>,
        constructors: Vec<FlowConstructor<State, Event>>,
        window_attributes: WindowAttributes,
    ) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            window_attributes,
            teardown: Teardown::default(),
            last_time: Instant::now(),
        })
    }

    fn init_flows(&mut self) {
        let Some(app_state) = self.state.as_mut() else {
            return;
        };
        self.graphics_flows.iter_mut().for_each(|flow| {
            let events = flow.on_init(&mut app_state.ctx, &mut app_state.state);
            handle_flow_output(
                #[cfg(not(target_arch = "wasm32"))]
                &self.async_runtime,
                &mut app_state.ctx,
                self.proxy.clone(),
                events,
            );
        });
        app_state.ctx.window.request_redraw();
    }
}

pub(crate) enum FlowEvent<State: 'static, Event: 'static> {
    #[allow(dead_code)]
    Initialized {
        state: AppState<State>,
        flows: Vec<Box<dyn GraphicsFlow<State, Event>>>,
    },
    Custom(Event),
    #[allow(dead_code)]
    Exit,
}

impl<State, Event> Debug for FlowEvent<State, Event> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized { state: _, flows } => {
                f.debug_struct("Initialized").field("flows", flows).finish()
            }
            Self::Custom(_) => f.write_str("Custom(E)"),
            Self::Exit => f.write_str("Exit"),
        }
    }
}

impl<State: 'static + Default, Event: 'static> ApplicationHandler<FlowEvent<State, Event>>
    for App<State, Event>
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructors) = self.constructors.take() else {
            // Already initialized; resumed can fire more than once on some platforms
            return;
        };

        let window = match event_loop.create_window(self.window_attributes.clone()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Cannot create a window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let init_future = async move {
            let app_state = AppState::new(window).await?;

            let flow_futures: Vec<_> = constructors
                .into_iter()
                // The clone in into() leverages the internal Arcs of Device and Queue and thus only clones the ref
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows: Vec<_> = futures::future::join_all(flow_futures).await;
            anyhow::Ok((app_state, flows))
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok((app_state, flows)) => {
                    self.state = Some(app_state);
                    self.graphics_flows = flows;
                    self.init_flows();
                }
                Err(e) => {
                    log::error!("App initialization failed: {:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init_future.await {
                    Ok((state, flows)) => {
                        if proxy
                            .send_event(FlowEvent::Initialized { state, flows })
                            .is_err()
                        {
                            log::warn!("Unmounted before initialization finished");
                        }
                    }
                    Err(e) => {
                        log::error!("App initialization failed: {:#}", e);
                        let _ = proxy.send_event(FlowEvent::Exit);
                    }
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent<State, Event>) {
        match event {
            FlowEvent::Initialized { state, flows } => {
                // This is the message from our wasm `spawn_local`
                let size = state.ctx.window.inner_size();
                self.state = Some(state);
                self.graphics_flows = flows;
                if let Some(app_state) = self.state.as_mut() {
                    app_state.resize(size.width, size.height);
                    // Keyboard events are only delivered to a focused canvas
                    app_state.ctx.window.focus_window();
                }
                self.init_flows();
            }
            FlowEvent::Custom(custom_event) => {
                if let Some(state) = &mut self.state {
                    let result = self
                        .graphics_flows
                        .iter_mut()
                        .fold(Some(custom_event), |event, flow| {
                            flow.on_custom_events(&state.ctx, &mut state.state, event?)
                        });
                    if result.is_some() {
                        log::warn!("Custom event was not consumed by any flow");
                    }
                }
            }
            FlowEvent::Exit => {
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        self.graphics_flows.iter_mut().for_each(|f| {
            let events = f.on_device_events(&state.ctx, &mut state.state, &event);
            handle_flow_output(
                #[cfg(not(target_arch = "wasm32"))]
                &self.async_runtime,
                &mut state.ctx,
                self.proxy.clone(),
                events,
            );
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        self.graphics_flows.iter_mut().for_each(|f| {
            let events = f.on_window_events(&state.ctx, &mut state.state, &event);
            handle_flow_output(
                #[cfg(not(target_arch = "wasm32"))]
                &self.async_runtime,
                &mut state.ctx,
                self.proxy.clone(),
                events,
            );
        });

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                state.resize(size.width, size.height);
                // Repaint once even if the frame loop has stopped
                state.ctx.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                self.graphics_flows.iter_mut().for_each(|f| {
                    let events = f.on_update(&state.ctx, &mut state.state, dt);
                    handle_flow_output(
                        #[cfg(not(target_arch = "wasm32"))]
                        &self.async_runtime,
                        &mut state.ctx,
                        self.proxy.clone(),
                        events,
                    );
                });

                state.ctx.camera.upload(&state.ctx.queue, &state.ctx.projection);

                if let Err(e) = state.render(
                    &mut self.graphics_flows,
                    #[cfg(feature = "integration-tests")]
                    &self.async_runtime,
                    #[cfg(feature = "integration-tests")]
                    &self.proxy,
                ) {
                    match e.downcast_ref::<wgpu::SurfaceError>() {
                        // Reconfigure the surface if it's lost or outdated
                        Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let size = state.ctx.window.inner_size();
                            state.resize(size.width, size.height);
                        }
                        _ => log::error!("Unable to render: {:#}", e),
                    }
                }

                if state.ctx.continuous_redraw {
                    state.ctx.window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("Shutting down");
        // Flows release their own resources (and DOM nodes) on drop
        self.graphics_flows.clear();
        self.state = None;
        self.teardown.run();
    }
}

fn handle_flow_output<State, Event>(
    #[cfg(not(target_arch = "wasm32"))] async_runtime: &tokio::runtime::Runtime,
    ctx: &mut Context,
    proxy: EventLoopProxy<FlowEvent<State, Event>>,
    out: Out<Event>,
) {
    match out {
        // Send the events passed by the user to winit
        Out::FutEvent(futures) => {
            let fut =
                async move { futures::future::join_all(futures.into_iter().map(Pin::from)).await };
            #[cfg(not(target_arch = "wasm32"))]
            {
                let resolved = async_runtime.block_on(fut);
                for event in resolved {
                    if proxy.send_event(FlowEvent::Custom(event)).is_err() {
                        log::warn!("Event loop was closed before all events could be processed");
                        break;
                    }
                }
            }

            #[cfg(target_arch = "wasm32")]
            {
                wasm_bindgen_futures::spawn_local(async move {
                    let resolved = fut.await;
                    for event in resolved {
                        if proxy.send_event(FlowEvent::Custom(event)).is_err() {
                            log::warn!("Event loop was closed before all events could be processed");
                            break;
                        }
                    }
                });
            }
        }
        Out::Configure(f) => f(ctx),
        Out::Batch(outs) => outs.into_iter().for_each(|out| {
            handle_flow_output(
                #[cfg(not(target_arch = "wasm32"))]
                async_runtime,
                ctx,
                proxy.clone(),
                out,
            )
        }),
        Out::Empty => (),
    }
}

fn init_logger() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        // Already set when the game is mounted a second time
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

/// Runs the flows in a new window until it is closed.
///
/// Blocks the calling thread on native targets.
pub fn run<State: 'static + Default, Event: 'static>(
    constructors: Vec<FlowConstructor<State, Event>>,
    window_attributes: WindowAttributes,
) -> anyhow::Result<()> {
    init_logger();

    #[cfg(all(feature = "integration-tests", target_os = "linux"))]
    let event_loop: EventLoop<FlowEvent<State, Event>> = {
        use winit::platform::wayland::EventLoopBuilderExtWayland;

        EventLoop::with_user_event().with_any_thread(true).build()?
    };

    #[cfg(all(feature = "integration-tests", target_os = "windows"))]
    let event_loop: EventLoop<FlowEvent<State, Event>> = {
        use winit::platform::windows::EventLoopBuilderExtWindows;

        EventLoop::with_user_event().with_any_thread(true).build()?
    };

    #[cfg(not(feature = "integration-tests"))]
    let event_loop: EventLoop<FlowEvent<State, Event>> = EventLoop::with_user_event().build()?;

    let mut app: App<State, Event> = App::new(&event_loop, constructors, window_attributes)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}

/// Starts the flows on `canvas` in the browser's event loop and returns immediately.
///
/// Sending [`FlowEvent::Exit`] through the returned proxy stops the loop and
/// takes the canvas off the page, even if the GPU was still being set up.
#[cfg(target_arch = "wasm32")]
pub(crate) fn spawn<State: 'static + Default, Event: 'static>(
    constructors: Vec<FlowConstructor<State, Event>>,
    canvas: web_sys::HtmlCanvasElement,
) -> anyhow::Result<EventLoopProxy<FlowEvent<State, Event>>> {
    use winit::platform::web::{EventLoopExtWebSys, WindowAttributesExtWebSys};

    init_logger();
    let event_loop: EventLoop<FlowEvent<State, Event>> = EventLoop::with_user_event().build()?;
    let window_attributes = Window::default_attributes().with_canvas(Some(canvas.clone()));
    let mut app: App<State, Event> = App::new(&event_loop, constructors, window_attributes)?;
    app.teardown.push(move || canvas.remove());
    let proxy = event_loop.create_proxy();
    event_loop.spawn_app(app);
    Ok(proxy)
}
