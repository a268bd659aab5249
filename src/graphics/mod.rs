//! Module that defines the graphics primitives and the triangle renderer that uses them.
//! The graphics primitives are stored in the domain [`GraphicsState`].

mod state;
mod color;
mod error;
mod vertex;
mod triangle;

pub use state::*;
pub use color::*;
pub use error::*;
pub use vertex::*;
pub use triangle::*;

use anyhow::bail;
use tracing::instrument;
use wgpu::{CommandEncoderDescriptor, LoadOp, Operations, RenderPassColorAttachment, RenderPassDescriptor, StoreOp, SurfaceError, SurfaceTexture};
use crate::{AppBuilder, ColorCycle, Game, Plugin, RunContext, Stage};


/// Adds a [`TriangleRenderer`] built against the [`GraphicsState`].
/// Draws the triangle over the scene's clear color every frame.
pub struct GraphicsPlugin;
impl Plugin for GraphicsPlugin {
    fn install(&mut self, builder: &mut AppBuilder) -> anyhow::Result<()> {
        let game = builder.game();
        if !game.contains::<GraphicsState>() {
            bail!("GraphicsPlugin requires a GraphicsState, install a window first");
        }
        game
            .init(|_| ColorCycle::default())
            .init(|game| {
                let state = game.get::<&GraphicsState>();
                TriangleRenderer::new(&state.device, state.surface_format())
            });
        builder.system(Stage::Render, render);
        Ok(())
    }
}

fn render(game: &mut Game, mut ctx: RunContext) {
    let (mut graphics_state, triangle, cycle) = game.all::<(
        &mut GraphicsState,
        &TriangleRenderer,
        &ColorCycle,
    )>();
    let surface_tex = match graphics_state.surface().get_current_texture() {
        Ok(surface_tex) => surface_tex,
        Err(SurfaceError::Lost | SurfaceError::Outdated) => {
            log::warn!("Surface lost or outdated, reconfiguring");
            graphics_state.reconfigure();
            return;
        },
        Err(SurfaceError::Timeout) => {
            log::warn!("Timed out acquiring surface texture, skipping frame");
            return;
        },
        Err(err) => {
            log::error!("{err}");
            ctx.quit();
            return;
        },
    };
    enqueue_render(&graphics_state, &triangle, cycle.color(), &surface_tex);
    surface_tex.present();
}

#[instrument(skip_all)]
fn enqueue_render(
    graphics_state: &GraphicsState,
    triangle: &TriangleRenderer,
    clear_color: Color,
    surface_tex: &SurfaceTexture,
) {
    let view = surface_tex.texture.create_view(&Default::default());
    let mut encoder = graphics_state.device.create_command_encoder(&CommandEncoderDescriptor {
        label: Some("triangle_encoder"),
    });
    {
        // Clears the back buffer to the animated color
        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("triangle_pass"),
            color_attachments: &[
                Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(clear_color.into()),
                        store: StoreOp::Store,
                    },
                })
            ],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        // Draws triangle
        triangle.render(&mut pass, graphics_state.viewport());
    }

    // Submits render commands
    let commands = [encoder.finish()];
    graphics_state.queue.submit(commands);
}
