#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod canvas;
mod font;
mod input;
mod widgets;

pub use canvas::{Canvas, Rect};
pub use input::{KeyAction, key_action};
pub use widgets::{ControlBar, Widget};

use life_grid::{Event, Random, Simulation};
use log::{debug, error, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, KeyEvent, MouseButton, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

/// Width and height of the window, and of the pixel buffer drawn into it.
pub const WINDOW_SIZE: u32 = 500;
const WINDOW_TITLE: &str = "Conway's Game of Life";
const CLEAR_COLOR: Color = Color::BLACK;

pub const BACKGROUND_COLOR: [u8; 4] = [25, 25, 25, 0xff];
pub const ALIVE_COLOR: [u8; 4] = [0, 0, 0xff, 0xff];
pub const DEAD_COLOR: [u8; 4] = [0, 0, 0, 0xff];

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("could not create window: {0}")]
    Window(#[from] OsError),
    #[error("pixel buffer failed: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("could not resize surface: {0}")]
    Surface(#[from] pixels::TextureError),
}

/// Opens the window and runs the game until the window is closed.
///
/// `build_simulation` is called once the window exists, with the size of the
/// pixel buffer. `rand` supplies every random grid, including restarts.
pub fn animate<F>(
    cell_pixel_width: u32,
    rand: Random,
    build_simulation: F,
) -> Result<(), ShellError>
where
    F: Fn(PhysicalSize<u32>, &mut Random) -> Simulation,
{
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut handler = AppEventHandler::new(cell_pixel_width, rand, build_simulation);
    event_loop.run_app(&mut handler)?;
    match handler.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Returns `(rows, cols)`.
pub fn window_size_to_grid_size(
    window_size: PhysicalSize<u32>,
    cell_pixel_width: u32,
) -> (u32, u32) {
    assert!(cell_pixel_width > 0);
    (
        window_size.height / cell_pixel_width,
        window_size.width / cell_pixel_width,
    )
}

/// Paints one whole frame: background, cells, then the control bar on top.
pub fn draw_frame(
    canvas: &mut Canvas,
    simulation: &Simulation,
    controls: &ControlBar,
    cell_pixel_width: u32,
) {
    canvas.fill(BACKGROUND_COLOR);
    canvas.paint_grid(simulation.grid(), cell_pixel_width, ALIVE_COLOR, DEAD_COLOR);
    controls.draw(canvas);
}

struct App {
    simulation: Simulation,
    controls: ControlBar,
    cell_pixel_width: u32,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    cursor: Option<PhysicalPosition<f64>>,
    next_update: Instant,
}

impl App {
    fn new(
        event_loop: &ActiveEventLoop,
        cell_pixel_width: u32,
        simulation: Simulation,
    ) -> Result<Self, ShellError> {
        let window = Arc::new(Self::build_window(event_loop)?);
        let pixels = Self::build_pixels(&window)?;
        info!(
            "{}x{} grid in a {WINDOW_SIZE}x{WINDOW_SIZE} window",
            simulation.grid().rows(),
            simulation.grid().cols()
        );
        let mut controls = ControlBar::new(WINDOW_SIZE);
        controls.update_labels(&simulation);
        let next_update = Instant::now() + simulation.speed().tick_interval();
        Ok(Self {
            simulation,
            controls,
            cell_pixel_width,
            window,
            pixels,
            cursor: None,
            next_update,
        })
    }

    fn build_window(event_loop: &ActiveEventLoop) -> Result<Window, OsError> {
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_SIZE, WINDOW_SIZE))
            .with_resizable(false)
            .with_visible(false);
        event_loop.create_window(window_attributes)
    }

    fn build_pixels(window: &Arc<Window>) -> Result<Pixels<'static>, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(WINDOW_SIZE, WINDOW_SIZE, surface_texture)
            .clear_color(CLEAR_COLOR)
            .build()
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn apply(&mut self, event: Event, rand: &mut Random) {
        self.simulation = self.simulation.apply(event, rand);
        self.controls.update_labels(&self.simulation);
        self.window.request_redraw();
    }

    fn on_time_step(&mut self, rand: &mut Random) {
        self.apply(Event::Tick, rand);

        let interval = self.simulation.speed().tick_interval();
        let now = Instant::now();
        while self.next_update <= now {
            self.next_update += interval;
        }
    }

    fn on_control(&mut self, event: Event, rand: &mut Random) {
        debug!("{event:?}");
        let speed = self.simulation.speed();
        self.apply(event, rand);
        if self.simulation.speed() != speed {
            self.next_update = Instant::now() + self.simulation.speed().tick_interval();
        }
    }

    fn on_click(&mut self, rand: &mut Random) {
        let Some(position) = self.cursor else {
            return;
        };
        let Ok((x, y)) = self
            .pixels
            .window_pos_to_pixel((position.x as f32, position.y as f32))
        else {
            return;
        };
        if let Some(event) = self.controls.hit(x as u32, y as u32) {
            self.on_control(event, rand);
        }
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) -> Result<(), ShellError> {
        if size.width > 0 && size.height > 0 {
            self.pixels.resize_surface(size.width, size.height)?;
            self.window.request_redraw();
        }
        Ok(())
    }

    fn on_redraw(&mut self) -> Result<(), ShellError> {
        let mut canvas = Canvas::new(self.pixels.frame_mut(), WINDOW_SIZE, WINDOW_SIZE);
        draw_frame(
            &mut canvas,
            &self.simulation,
            &self.controls,
            self.cell_pixel_width,
        );
        self.pixels.render()?;
        Ok(())
    }
}

struct AppEventHandler<F>
where
    F: Fn(PhysicalSize<u32>, &mut Random) -> Simulation,
{
    build_simulation: F,
    cell_pixel_width: u32,
    rand: Random,
    app: Option<App>,
    error: Option<ShellError>,
}

impl<F> AppEventHandler<F>
where
    F: Fn(PhysicalSize<u32>, &mut Random) -> Simulation,
{
    fn new(cell_pixel_width: u32, rand: Random, build_simulation: F) -> Self {
        Self {
            build_simulation,
            cell_pixel_width,
            rand,
            app: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ShellError) {
        error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl<F> ApplicationHandler for AppEventHandler<F>
where
    F: Fn(PhysicalSize<u32>, &mut Random) -> Simulation,
{
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(app) = self.app.as_mut()
        {
            app.on_time_step(&mut self.rand);
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        let frame_size = PhysicalSize::new(WINDOW_SIZE, WINDOW_SIZE);
        let simulation = (self.build_simulation)(frame_size, &mut self.rand);
        match App::new(event_loop, self.cell_pixel_width, simulation) {
            Ok(mut app) => {
                app.on_create();
                self.app = Some(app);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        let result = match event {
            WindowEvent::CloseRequested => {
                info!("window closed");
                event_loop.exit();
                Ok(())
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                match key_action(code) {
                    Some(KeyAction::Exit) => {
                        info!("quit key pressed");
                        event_loop.exit();
                    }
                    Some(KeyAction::Control(control)) => app.on_control(control, &mut self.rand),
                    None => (),
                }
                Ok(())
            }
            WindowEvent::CursorMoved { position, .. } => {
                app.cursor = Some(position);
                Ok(())
            }
            WindowEvent::CursorLeft { .. } => {
                app.cursor = None;
                Ok(())
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                app.on_click(&mut self.rand);
                Ok(())
            }
            WindowEvent::Resized(size) => app.on_resize(size),
            WindowEvent::RedrawRequested => app.on_redraw(),
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_ref() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_update));
        }
    }
}
