//! The flow that plays the game: polls the keyboard, advances the session,
//! moves the camera and draws the scene.

use instant::Duration;
use winit::event::{DeviceEvent, WindowEvent};

use crate::{
    context::{Context, InitContext},
    flow::{GraphicsFlow, Out},
    game::{FollowCamera, GameEvent, GameSession},
    input::KeyTracker,
    render::Render,
    scene::{self, Scene},
};

pub struct FlightFlow {
    scene: Scene,
    keys: KeyTracker,
}

impl FlightFlow {
    pub fn new(ctx: &InitContext) -> Self {
        Self {
            scene: Scene::build(&ctx.device, &ctx.queue),
            keys: KeyTracker::new(),
        }
    }
}

fn point_camera(ctx: &mut Context, camera: &FollowCamera) {
    ctx.camera.camera.position = camera.position;
    ctx.camera.camera.target = camera.target;
}

impl GraphicsFlow<GameSession, GameEvent> for FlightFlow {
    fn on_init(
        &mut self,
        ctx: &mut Context,
        session: &mut GameSession,
    ) -> Out<GameEvent> {
        ctx.clear_colour = scene::sky_colour();
        ctx.light.set(&ctx.queue, scene::light_rig());
        point_camera(ctx, session.camera());
        self.scene.sync(session, &ctx.queue, &ctx.device);
        Out::Empty
    }

    /// One game frame. Motion is per frame, so `dt` is ignored.
    fn on_update(
        &mut self,
        ctx: &Context,
        session: &mut GameSession,
        _: Duration,
    ) -> Out<GameEvent> {
        let events = session.update(&self.keys);
        self.scene.sync(session, &ctx.queue, &ctx.device);

        let camera = session.camera().clone();
        let over = session.is_over();
        Out::Batch(vec![
            Out::Configure(Box::new(move |ctx| {
                point_camera(ctx, &camera);
                if over {
                    ctx.continuous_redraw = false;
                }
            })),
            Out::events(events),
        ])
    }

    fn on_device_events(
        &mut self,
        _: &Context,
        _: &mut GameSession,
        _: &DeviceEvent,
    ) -> Out<GameEvent> {
        Out::Empty
    }

    fn on_window_events(
        &mut self,
        _: &Context,
        _: &mut GameSession,
        event: &WindowEvent,
    ) -> Out<GameEvent> {
        self.keys.handle_window_event(event);
        Out::Empty
    }

    fn on_custom_events(
        &mut self,
        _: &Context,
        _: &mut GameSession,
        event: GameEvent,
    ) -> Option<GameEvent> {
        Some(event)
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        self.scene.render()
    }

    #[cfg(feature = "integration-tests")]
    fn render_to_texture(
        &self,
        _: &Context,
        _: &mut GameSession,
        _: &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
    ) -> Result<crate::flow::ImageTestResult, anyhow::Error> {
        Ok(crate::flow::ImageTestResult::Passed)
    }
}
