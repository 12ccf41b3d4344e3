//! ring-flight
//!
//! A small flight game: steer an airplane through glowing rings for points
//! and stay inside the world. Runs natively in a window or in the browser
//! through WASM, on top of a minimal flow-based wgpu engine.
//!
//! High-level modules
//! - `game`: the session state machine, its tuning and its events (no GPU needed)
//! - `input`: polled keyboard state and the control bindings
//! - `scene`: construction of airplane, rings, ground, lights and sky
//! - `flight` / `overlay`: the two flows that make up the game
//! - `flow`: event loop, frame order and the `GraphicsFlow` trait
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `camera`: look-at camera, projection and its uniform
//! - `data_structures`: models, instances, scene graph and depth texture
//! - `pipelines`: the Phong pipelines and the light rig
//! - `resources`: procedural geometry, colours and model upload
//! - `render`: render composition for efficient pipeline reuse
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod flight;
pub mod flow;
pub mod game;
pub mod input;
pub mod overlay;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

pub use game::{GameEvent, GameSession};

// Re-exports commonly used types for convenience in downstream code.
pub use winit::event::{DeviceEvent, WindowEvent};
pub use winit::keyboard::KeyCode;

use flow::{FlowConstructor, GraphicsFlow};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

fn flight_constructor() -> FlowConstructor<GameSession, GameEvent> {
    Box::new(|ctx| {
        Box::pin(async move {
            Box::new(flight::FlightFlow::new(&ctx)) as Box<dyn GraphicsFlow<_, _>>
        })
    })
}

fn overlay_constructor(
    overlay: overlay::OverlayFlow,
) -> FlowConstructor<GameSession, GameEvent> {
    Box::new(move |_| Box::pin(async move { Box::new(overlay) as Box<dyn GraphicsFlow<_, _>> }))
}

/// Opens a window and plays until it is closed.
#[cfg(not(target_arch = "wasm32"))]
pub fn start() -> anyhow::Result<()> {
    let window_attributes = winit::window::Window::default_attributes()
        .with_title("ring-flight")
        .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));
    flow::run(
        vec![
            flight_constructor(),
            overlay_constructor(overlay::OverlayFlow::new()),
        ],
        window_attributes,
    )
}

/// A running game inside a page. Dropping the handle leaves the game running.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct Mount {
    proxy: winit::event_loop::EventLoopProxy<flow::FlowEvent<GameSession, GameEvent>>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl Mount {
    /// Stops the game and removes its canvas and overlay from the page.
    pub fn unmount(self) {
        if self.proxy.send_event(flow::FlowEvent::Exit).is_err() {
            log::warn!("ring-flight was already stopped");
        }
    }
}

/// Starts the game inside the element with id `container_id`.
///
/// The browser event loop can only be created once per page, so a second
/// mount fails even after `unmount`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn mount(container_id: &str) -> Result<Mount, JsValue> {
    mount_into(container_id).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

#[cfg(target_arch = "wasm32")]
fn mount_into(container_id: &str) -> anyhow::Result<Mount> {
    use anyhow::Context as _;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .context("no document to mount into")?;
    let container = document
        .get_element_by_id(container_id)
        .with_context(|| format!("no element with id {:?}", container_id))?;

    let canvas: web_sys::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(overlay::js_error)?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("created element is not a canvas"))?;
    let style = canvas.style();
    for (property, value) in [("display", "block"), ("width", "100vw"), ("height", "100vh")] {
        style.set_property(property, value).map_err(overlay::js_error)?;
    }
    container.append_child(&canvas).map_err(overlay::js_error)?;

    // Dropping the overlay on any error below takes its label off the page again
    let overlay = match overlay::OverlayFlow::mount(&container) {
        Ok(overlay) => overlay,
        Err(e) => {
            canvas.remove();
            return Err(e);
        }
    };

    // Once spawned, the event loop removes the canvas when it exits
    match flow::spawn(
        vec![flight_constructor(), overlay_constructor(overlay)],
        canvas.clone(),
    ) {
        Ok(proxy) => Ok(Mount { proxy }),
        Err(e) => {
            canvas.remove();
            Err(e)
        }
    }
}
