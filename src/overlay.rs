//! Instruction overlay and game notifications.
//!
//! In the browser the instructions are a fixed, non-interactive label on top
//! of the canvas, and every [`GameEvent`] is re-dispatched on the container
//! element as a DOM `CustomEvent` carrying the score. Natively the
//! instructions become the window title. Both log every event.

use instant::Duration;
use winit::event::{DeviceEvent, WindowEvent};

use crate::{
    context::Context,
    flow::{GraphicsFlow, Out},
    game::{GameEvent, GameSession},
    render::Render,
};

pub const INSTRUCTIONS: &str = "Use WASD or Arrow keys to control the plane";

/// Name of the DOM event dispatched after each collected ring.
pub const SCORE_EVENT: &str = "ring-flight:score";
/// Name of the DOM event dispatched once the game is over.
pub const GAME_OVER_EVENT: &str = "ring-flight:game-over";

#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error(value: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", value)
}

#[cfg(target_arch = "wasm32")]
const LABEL_STYLE: [(&str, &str); 8] = [
    ("position", "fixed"),
    ("top", "20px"),
    ("left", "20px"),
    ("color", "white"),
    ("font-family", "Arial"),
    ("font-size", "24px"),
    ("text-shadow", "2px 2px 4px rgba(0,0,0,0.5)"),
    ("pointer-events", "none"),
];

pub struct OverlayFlow {
    #[cfg(target_arch = "wasm32")]
    container: web_sys::Element,
    #[cfg(target_arch = "wasm32")]
    label: web_sys::HtmlElement,
}

impl OverlayFlow {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {}
    }

    /// Adds the instruction label to `container`. The label is removed again on drop.
    #[cfg(target_arch = "wasm32")]
    pub fn mount(container: &web_sys::Element) -> anyhow::Result<Self> {
        use anyhow::Context as _;
        use wasm_bindgen::JsCast;

        let document = container
            .owner_document()
            .context("container is not attached to a document")?;
        let label: web_sys::HtmlElement = document
            .create_element("div")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| anyhow::anyhow!("created element is not an HTML element"))?;
        label.set_text_content(Some(INSTRUCTIONS));
        let style = label.style();
        for (property, value) in LABEL_STYLE {
            style.set_property(property, value).map_err(js_error)?;
        }
        container.append_child(&label).map_err(js_error)?;

        Ok(Self {
            container: container.clone(),
            label,
        })
    }

    #[cfg(target_arch = "wasm32")]
    fn dispatch(&self, event: &GameEvent) {
        let (name, score) = match *event {
            GameEvent::Score(score) => (SCORE_EVENT, score),
            GameEvent::GameOver { final_score } => (GAME_OVER_EVENT, final_score),
        };
        let init = web_sys::CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&wasm_bindgen::JsValue::from(score));
        match web_sys::CustomEvent::new_with_event_init_dict(name, &init) {
            Ok(dom_event) => {
                if let Err(e) = self.container.dispatch_event(&dom_event) {
                    log::warn!("Cannot dispatch {}: {:?}", name, e);
                }
            }
            Err(e) => log::warn!("Cannot create {}: {:?}", name, e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for OverlayFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for OverlayFlow {
    fn drop(&mut self) {
        self.label.remove();
    }
}

impl GraphicsFlow<GameSession, GameEvent> for OverlayFlow {
    fn on_init(&mut self, ctx: &mut Context, _: &mut GameSession) -> Out<GameEvent> {
        log::info!("{}", INSTRUCTIONS);
        #[cfg(not(target_arch = "wasm32"))]
        ctx.window().set_title(INSTRUCTIONS);
        #[cfg(target_arch = "wasm32")]
        let _ = ctx;
        Out::Empty
    }

    fn on_update(
        &mut self,
        _: &Context,
        _: &mut GameSession,
        _: Duration,
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
        event: GameEvent,
    ) -> Option<GameEvent> {
        log::info!("{}", event);
        #[cfg(target_arch = "wasm32")]
        self.dispatch(&event);
        None
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        Render::None
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
