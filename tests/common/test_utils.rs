#![allow(dead_code)]

use ring_flight::{GameSession, KeyCode, input::InputSource};

#[cfg(feature = "integration-tests")]
use ring_flight::{
    GameEvent,
    context::Context,
    flow::{GraphicsFlow, ImageTestResult, Out},
    render::Render,
    scene::{self, Scene},
};

/// A fixed keyboard snapshot.
pub(crate) struct HeldKeys(pub(crate) Vec<KeyCode>);

impl HeldKeys {
    pub(crate) fn none() -> Self {
        Self(vec![])
    }
}

impl InputSource for HeldKeys {
    fn is_pressed(&self, key: KeyCode) -> bool {
        self.0.contains(&key)
    }
}

/// Moves every ring well out of the way of an airplane flying near the origin.
pub(crate) fn park_rings(session: &mut GameSession) {
    session
        .rings_mut()
        .iter_mut()
        .for_each(|ring| ring.position = [0.0, 60.0, 90.0].into());
}

pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {} to be close to {}",
        actual,
        expected
    );
}

pub(crate) struct FrameCounter(pub(crate) u32);
impl Default for FrameCounter {
    fn default() -> Self {
        Self(0)
    }
}
impl FrameCounter {
    pub(crate) fn frame(&self) -> u32 {
        self.0
    }

    pub(crate) fn progress(&mut self) {
        self.0 += 1;
    }
}

#[cfg(feature = "integration-tests")]
pub(crate) type Image = image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>;

/// Reads a pixel as `[r, g, b]` whatever the channel order of the surface.
#[cfg(feature = "integration-tests")]
pub(crate) fn rgb_at(ctx: &Context, img: &Image, x: u32, y: u32) -> [u8; 3] {
    let [a, g, b, _] = img.get_pixel(x, y).0;
    match ctx.config.format {
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => [b, g, a],
        _ => [a, g, b],
    }
}

/// The bytes a hex colour ends up as on the surface.
#[cfg(feature = "integration-tests")]
pub(crate) fn expected_rgb(ctx: &Context, hex: u32) -> [u8; 3] {
    let bytes = [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8];
    if ctx.config.format.is_srgb() {
        bytes
    } else {
        ring_flight::resources::colour::linear_rgb(hex).map(|c| (c * 255.0).round() as u8)
    }
}

#[cfg(feature = "integration-tests")]
pub(crate) fn assert_pixel_close(actual: [u8; 3], expected: [u8; 3]) {
    let close = actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= 2);
    assert!(close, "pixel {:?} differs from {:?}", actual, expected);
}

/// Draws the game scene (or nothing) under the game's lights and sky, then
/// hands the first rendered frame to `validate`.
#[cfg(feature = "integration-tests")]
pub(crate) struct SceneProbe {
    pub(crate) scene: Option<Scene>,
    pub(crate) session: GameSession,
    pub(crate) validate: fn(&Context, &mut Image) -> Result<ImageTestResult, anyhow::Error>,
}

#[cfg(feature = "integration-tests")]
impl GraphicsFlow<FrameCounter, GameEvent> for SceneProbe {
    fn on_init(&mut self, ctx: &mut Context, _: &mut FrameCounter) -> Out<GameEvent> {
        ctx.clear_colour = scene::sky_colour();
        ctx.light.set(&ctx.queue, scene::light_rig());
        ctx.camera.camera.position = self.session.camera().position;
        ctx.camera.camera.target = self.session.camera().target;
        if let Some(scene) = &mut self.scene {
            scene.sync(&self.session, &ctx.queue, &ctx.device);
        }
        Out::Empty
    }

    fn on_update(
        &mut self,
        _: &Context,
        state: &mut FrameCounter,
        _: std::time::Duration,
    ) -> Out<GameEvent> {
        state.progress();
        Out::Empty
    }

    fn on_device_events(
        &mut self,
        _: &Context,
        _: &mut FrameCounter,
        _: &ring_flight::DeviceEvent,
    ) -> Out<GameEvent> {
        Out::Empty
    }

    fn on_window_events(
        &mut self,
        _: &Context,
        _: &mut FrameCounter,
        _: &ring_flight::WindowEvent,
    ) -> Out<GameEvent> {
        Out::Empty
    }

    fn on_custom_events(
        &mut self,
        _: &Context,
        _: &mut FrameCounter,
        event: GameEvent,
    ) -> Option<GameEvent> {
        Some(event)
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        match &self.scene {
            Some(scene) => scene.render(),
            None => Render::None,
        }
    }

    fn render_to_texture(
        &self,
        ctx: &Context,
        state: &mut FrameCounter,
        texture: &mut Image,
    ) -> Result<ImageTestResult, anyhow::Error> {
        if state.frame() > 0 {
            (self.validate)(ctx, texture)
        } else {
            Ok(ImageTestResult::Waiting)
        }
    }
}

#[macro_export]
macro_rules! golden_image_test {
    ($graphics_elem:expr) => {{
        use crate::common::test_utils::FrameCounter;
        use ring_flight::GameEvent;
        use ring_flight::context::InitContext;
        use ring_flight::flow::FlowConstructor;
        use ring_flight::flow::GraphicsFlow;
        let make = $graphics_elem;
        let constructor: FlowConstructor<FrameCounter, GameEvent> =
            Box::new(move |ctx: InitContext| {
                Box::pin(async move {
                    let g_flow: Box<dyn GraphicsFlow<FrameCounter, GameEvent>> =
                        Box::new(make(ctx));
                    g_flow
                })
            });

        ring_flight::flow::run(
            vec![constructor],
            winit::window::Window::default_attributes().with_title("golden image test"),
        )
        .expect("Failed to run flow for integration test.");
    }};
}
