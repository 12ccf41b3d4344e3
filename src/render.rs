//! Render composition and pipeline batching.
//!
//! Flows describe what they want drawn with a [`Render`] value. The engine walks
//! every flow's render tree once per frame and sorts the instanced draws into
//! one batch per pipeline, so each pipeline is bound once.
//!
//! # Key types
//!
//! - [`Render<'a, 'pass>`] is the enum flows return from `on_render`
//! - [`Instanced<'a>`] is one model drawn from an instance buffer
//!

use wgpu::RenderPass;

use crate::{context::Context, data_structures::model::Model};

/// A model plus the buffer holding its per-instance transforms.
#[derive(Clone)]
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub model: &'a Model,
    pub amount: usize,
}

/// Specifies how a scene object should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Default(Instanced)` renders a closed opaque mesh with back-face culling
/// - `Defaults(Vec<Instanced>)` renders a batch of those
/// - `DoubleSided(Instanced)` renders an open surface visible from both sides
/// - `DoubleSideds(Vec<Instanced>)` renders a batch of those
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
/// - `Custom(...)` invokes a closure with direct access to the render pass
///
pub enum Render<'a, 'pass>
where
    'pass: 'a,
{
    None,
    Default(Instanced<'a>),
    Defaults(Vec<Instanced<'a>>),
    DoubleSided(Instanced<'a>),
    DoubleSideds(Vec<Instanced<'a>>),
    Composed(Vec<Render<'a, 'pass>>),
    Custom(Box<dyn 'a + FnOnce(&Context, &mut wgpu::RenderPass<'pass>)>),
}

impl<'a, 'pass> Render<'a, 'pass> {
    /// Flattens the tree into one list per pipeline. Custom closures run immediately.
    pub(crate) fn set_pipelines(
        self,
        ctx: &Context,
        render_pass: &mut RenderPass<'pass>,
        basics: &mut Vec<Instanced<'a>>,
        double_sideds: &mut Vec<Instanced<'a>>,
    ) {
        match self {
            Render::Default(instanced) => basics.push(instanced),
            Render::Defaults(mut vec) => basics.append(&mut vec),
            Render::DoubleSided(instanced) => double_sideds.push(instanced),
            Render::DoubleSideds(mut vec) => double_sideds.append(&mut vec),
            Render::Composed(renders) => renders.into_iter().for_each(|render| {
                render.set_pipelines(ctx, render_pass, basics, double_sideds)
            }),
            Render::Custom(f) => f(ctx, render_pass),
            Render::None => (),
        }
    }
}
