use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use cone_grid::camera::ORBIT_SENSITIVITY;
use cone_grid::cli::Cli;
use cone_grid::core::{FixedStep, FpsCounter, FrameClock};
use cone_grid::render::Viewer;
use cone_grid::ui::ControlPanel;
use cone_grid::{Scene, SceneConfig};

// === Constants ===

const SIMULATION_HZ: f32 = 60.0;
const MAX_STEPS_PER_FRAME: u8 = 8;
const FPS_LOG_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 720;

// === Application ===

struct App {
    scene: Scene,
    show_ui: bool,
    window: Option<Arc<Window>>,
    viewer: Option<Viewer>,
    panel: Option<ControlPanel>,
    clock: FrameClock,
    steps: FixedStep,
    fps: FpsCounter,
    dragging: bool,
    cursor: Option<PhysicalPosition<f64>>,
}

impl App {
    fn new(scene: Scene, show_ui: bool) -> Self {
        Self {
            scene,
            show_ui,
            window: None,
            viewer: None,
            panel: None,
            clock: FrameClock::new(),
            steps: FixedStep::new(SIMULATION_HZ, MAX_STEPS_PER_FRAME),
            fps: FpsCounter::new(FPS_LOG_INTERVAL),
            dragging: false,
            cursor: None,
        }
    }

    fn orbit(&mut self, position: PhysicalPosition<f64>) {
        if let (true, Some(last)) = (self.dragging, self.cursor) {
            let dx = (position.x - last.x) as f32;
            let dy = (position.y - last.y) as f32;
            self.scene
                .rig_mut()
                .camera
                .rotate(-dx * ORBIT_SENSITIVITY, -dy * ORBIT_SENSITIVITY);
        }
        self.cursor = Some(position);
    }

    fn frame(&mut self) {
        let delta = self.clock.tick();
        for _ in 0..self.steps.advance(delta) {
            self.scene.tick(self.steps.timestep());
        }

        if let Some(fps) = self.fps.frame(delta) {
            debug!("FPS: {:.1}", fps);
        }

        let (Some(viewer), Some(window)) = (&mut self.viewer, &self.window) else {
            return;
        };
        match viewer.render(window, &self.scene, self.panel.as_mut()) {
            Ok(changes) => {
                for change in changes {
                    self.scene.apply(change);
                }
            }
            Err(e) => error!("Render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Cone Grid")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let viewer = match pollster::block_on(Viewer::new(window.clone())) {
            Ok(v) => v,
            Err(e) => {
                error!("Failed to initialize viewer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.scene.resize(size.width, size.height);
        if self.show_ui {
            self.panel = Some(ControlPanel::new(&self.scene));
        }

        self.clock.reset();
        self.window = Some(window);
        self.viewer = Some(viewer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(viewer), Some(window), true) = (&mut self.viewer, &self.window, self.show_ui) {
            if viewer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(viewer) = &mut self.viewer {
                    viewer.resize(size.width, size.height);
                }
                self.scene.resize(size.width, size.height);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.dragging = state.is_pressed(),
            WindowEvent::CursorMoved { position, .. } => self.orbit(position),
            WindowEvent::RedrawRequested => self.frame(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.scene.teardown();
    }
}

/// Simulate `frames` fixed steps without a window and report where the scene ended up
fn run_headless(config: &SceneConfig, frames: u64) -> anyhow::Result<()> {
    let mut scene = Scene::build(config, INITIAL_WINDOW_WIDTH as f32 / INITIAL_WINDOW_HEIGHT as f32)
        .context("Failed to build scene")?;

    let timestep = 1.0 / SIMULATION_HZ;
    for _ in 0..frames {
        scene.tick(timestep);
    }

    println!(
        "{} frames ({:.2}s simulated): {} cycles, flipped: {}",
        frames,
        frames as f32 * timestep,
        scene.cycles(),
        scene.rig().state().flipped
    );
    if let Some(state) = scene.wave_state() {
        println!("Wave angle: {:.3}", state.angle);
    }

    scene.teardown();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli
        .scene_config()
        .context("Failed to load scene configuration")?;

    if cli.headless {
        return run_headless(&config, cli.frames);
    }

    let scene = Scene::build(&config, INITIAL_WINDOW_WIDTH as f32 / INITIAL_WINDOW_HEIGHT as f32)
        .context("Failed to build scene")?;

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(scene, !cli.no_ui);

    info!("Cone grid - drag to orbit, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
