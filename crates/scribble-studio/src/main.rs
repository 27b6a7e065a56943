//! Scribble studio: draw with the left button, pan with the right, zoom with
//! the wheel, rotate with Q/E, switch backgrounds with 1..9, quit with Esc.
//!
//! Usage: `scribble-studio [IMAGE...]`. Without images two built-in
//! backgrounds are used.

mod textures;

use anyhow::Result;
use scribble_engine::coords::ColorRgba;
use scribble_engine::core::{App, AppControl, FrameCtx};
use scribble_engine::device::GpuInit;
use scribble_engine::input::Key;
use scribble_engine::interact::{InteractionConfig, InteractionPolicy, SurfaceGeometry};
use scribble_engine::logging::{init_logging, LoggingConfig};
use scribble_engine::render::{PolylineRenderer, TextureImage, TextureQuadRenderer};
use scribble_engine::sketch::Sketch;
use scribble_engine::window::{Runtime, RuntimeConfig};

const CLEAR: ColorRgba = ColorRgba::opaque(0.0, 0.0, 0.0);

struct StudioApp {
    sketch: Sketch,
    policy: InteractionPolicy,
    strokes: PolylineRenderer,
    background: TextureQuadRenderer,
}

impl StudioApp {
    fn new(config: InteractionConfig, images: Vec<TextureImage>) -> Self {
        Self {
            sketch: Sketch::new(images.len()),
            policy: InteractionPolicy::new(config),
            strokes: PolylineRenderer::new(),
            background: TextureQuadRenderer::new(images),
        }
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.keys_pressed.contains(&Key::Escape) {
            return AppControl::Exit;
        }

        let (width, height) = ctx.window.logical_size();
        let surface = SurfaceGeometry::filling(width, height);
        for ev in &ctx.input_frame.events {
            self.policy.handle(ev, &surface, &mut self.sketch);
        }

        let forward = self.sketch.view.forward();
        let rigid = self.sketch.view.rigid();
        let Self {
            sketch,
            strokes,
            background,
            ..
        } = self;

        ctx.render(CLEAR, |rctx, target| {
            background.render(rctx, target, &mut sketch.overlay, rigid);
            strokes.render(rctx, target, &sketch.shapes, forward);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let paths: Vec<String> = std::env::args().skip(1).collect();
    let mut images = textures::load_all(&paths);
    if images.is_empty() {
        if !paths.is_empty() {
            log::warn!("no image could be loaded; using built-in backgrounds");
        }
        images = textures::builtin()?;
    }

    let config = InteractionConfig::default().validated()?;
    let app = StudioApp::new(config, images);

    Runtime::run(
        RuntimeConfig {
            title: "Scribble".to_string(),
            ..Default::default()
        },
        GpuInit::default(),
        app,
    )
}
