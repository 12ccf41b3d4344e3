#[cfg(feature = "integration-tests")]
use ring_flight::{
    DeviceEvent, GameEvent, GameSession, WindowEvent,
    context::Context,
    flow::{GraphicsFlow, ImageTestResult, Out},
    render::Render,
};

/// Pushes the airplane out of the world once a frame has been drawn, then
/// checks the frame loop stopped on the frame the game ended.
#[cfg(feature = "integration-tests")]
struct OutOfBounds;

#[cfg(feature = "integration-tests")]
impl GraphicsFlow<GameSession, GameEvent> for OutOfBounds {
    fn on_init(&mut self, _: &mut Context, _: &mut GameSession) -> Out<GameEvent> {
        Out::Empty
    }

    fn on_update(
        &mut self,
        _: &Context,
        _: &mut GameSession,
        _: std::time::Duration,
    ) -> Out<GameEvent> {
        Out::Empty
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
        _: &WindowEvent,
    ) -> Out<GameEvent> {
        Out::Empty
    }

    fn on_custom_events(
        &mut self,
        _: &Context,
        _: &mut GameSession,
        _: GameEvent,
    ) -> Option<GameEvent> {
        None
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        Render::None
    }

    fn render_to_texture(
        &self,
        ctx: &Context,
        session: &mut GameSession,
        _: &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
    ) -> Result<ImageTestResult, anyhow::Error> {
        if !session.is_over() {
            assert!(ctx.continuous_redraw);
            session.airplane_mut().position = [0.0, 0.0, -101.0].into();
            return Ok(ImageTestResult::Waiting);
        }
        if ctx.continuous_redraw {
            Ok(ImageTestResult::Failed)
        } else {
            Ok(ImageTestResult::Passed)
        }
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_stop_requesting_frames_once_the_game_is_over() {
    use ring_flight::{
        context::InitContext,
        flight::FlightFlow,
        flow::{self, FlowConstructor},
    };

    let flight: FlowConstructor<GameSession, GameEvent> = Box::new(|ctx: InitContext| {
        Box::pin(async move {
            Box::new(FlightFlow::new(&ctx)) as Box<dyn GraphicsFlow<GameSession, GameEvent>>
        })
    });
    let out_of_bounds: FlowConstructor<GameSession, GameEvent> = Box::new(|_: InitContext| {
        Box::pin(async move {
            Box::new(OutOfBounds) as Box<dyn GraphicsFlow<GameSession, GameEvent>>
        })
    });

    flow::run(
        vec![flight, out_of_bounds],
        winit::window::Window::default_attributes().with_title("game over test"),
    )
    .expect("Failed to run flow for integration test.");
}
