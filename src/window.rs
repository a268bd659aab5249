use std::time::Instant;
use anyhow::{anyhow, Context};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::keyboard::PhysicalKey;
use winit::window::{Window as WinitWindow, WindowBuilder};
use crate::{App, AppBuilder, AppRunner, GraphicsConfig, GraphicsState, Keyboard, Plugin, WindowConfig};

/// Opens a window and injects a [`GraphicsState`] presenting to it.
/// Adds a runner that renders a frame every time the window redraws.
#[derive(Clone, Default, Debug)]
pub struct WindowPlugin {
    pub window: WindowConfig,
    pub graphics: GraphicsConfig,
}

impl Plugin for WindowPlugin {
    fn install(&mut self, builder: &mut AppBuilder) -> anyhow::Result<()> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;
        let window = WindowBuilder::new()
            .with_title(self.window.title.as_str())
            .with_inner_size(PhysicalSize::new(self.window.width, self.window.height))
            .build(&event_loop)
            .context("Failed to create window")?;
        log::info!("Opened window {:?} ({}x{})", self.window.title, self.window.width, self.window.height);

        let graphics_state = GraphicsState::new(&window, &self.graphics)
            .context("Failed to initialize graphics")?;
        builder.game().add(graphics_state);
        builder.runner(WindowRunner {
            event_loop: Some(event_loop),
            window,
        });
        Ok(())
    }
}

/**
 * Uses a window to power an underlying [`App`].
 * The window outlives the app, so the GPU resources it holds are released first.
 */
pub struct WindowRunner {
    event_loop: Option<EventLoop<()>>,
    window: WinitWindow,
}

impl AppRunner for WindowRunner {
    fn run(&mut self, mut app: App) -> anyhow::Result<()> {
        let event_loop = self.event_loop
            .take()
            .ok_or_else(|| anyhow!("Window runner already ran"))?;
        let window = &self.window;

        // Starts render loop
        let mut last_update: Option<Instant> = None;
        window.request_redraw();
        event_loop.run(move |event, target| {
            match event {
                Event::WindowEvent { event, .. } => handle_window_event(
                    event,
                    window,
                    target,
                    &mut app,
                    &mut last_update,
                ),
                Event::LoopExiting => {
                    log::info!("Exiting after {} ticks, releasing GPU resources", app.ticks_elapsed());
                },
                _ => {}
            }
        })?;
        Ok(())
    }
}

fn handle_window_event(
    event: WindowEvent,
    window: &WinitWindow,
    target: &EventLoopWindowTarget<()>,
    app: &mut App,
    last_update: &mut Option<Instant>,
) {
    match event {
        WindowEvent::Resized(size) => {
            log::debug!("Resized to {}x{}", size.width, size.height);
            app.game
                .get::<&mut GraphicsState>()
                .resize(size.width, size.height)
        },
        WindowEvent::KeyboardInput { event, .. } => {
            let key_code = match event.physical_key {
                PhysicalKey::Code(key_code) => key_code,
                PhysicalKey::Unidentified(_) => return,
            };
            let Some(keyboard) = app.game.try_get_cell::<Keyboard>() else { return };
            let mut keyboard = keyboard.borrow_mut();
            match event.state {
                ElementState::Pressed => keyboard.press(key_code),
                ElementState::Released => keyboard.release(key_code),
            }
        },
        WindowEvent::RedrawRequested => {
            run_frame(app, last_update, target);    // Update and draw
            window.request_redraw();                // Submits request to render next frame
        },
        WindowEvent::CloseRequested => target.exit(),
        _ => {}
    }
}

fn run_frame(
    app: &mut App,
    last_update: &mut Option<Instant>,
    target: &EventLoopWindowTarget<()>,
) {
    // Computes delta since last frame.
    let now = Instant::now();
    let delta = match *last_update {
        Some(last_update) => now.duration_since(last_update),
        None => app.tick_duration(),
    };
    *last_update = Some(now);

    app.run_frame(delta);
    if app.quit_requested() {
        target.exit();
    }
}
