//! Shmup -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Keyboard events are queued
//! as press/release transitions as they arrive; everything else happens inside
//! `RedrawRequested`, once per displayed frame:
//!
//!   1. `begin_frame()` -- measure the wall-clock delta since the last frame
//!   2. drain queued key transitions into the ship's velocity and trigger
//!   3. `GameState::update(dt)` -- move, animate, fire, prune
//!   4. rebuild the sprite mesh and present (vsync paces the loop)
//!
//! There is no fixed timestep: the simulation always advances by the measured
//! delta. Any startup failure is logged and the process exits with status 1.

mod atlas;
mod config;
mod controller;
mod entity;
mod error;
mod projectiles;
mod render;
#[cfg(test)]
mod replay;
mod simulation;
mod state;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use config::GameConfig;
use controller::handle_transition;
use error::StartupError;
use render::SceneRenderer;
use shmup_core::{FrameClock, InputState, Key};
use shmup_render::GpuContext;
use state::GameState;

const CONFIG_PATH: &str = "data/game.json";
const FPS_LOG_INTERVAL_FRAMES: u64 = 300;

/// Everything that exists only while the window is open. Built in
/// `ApplicationHandler::resumed` once the window and GPU surface are available.
/// Field order is drop order: GPU resources go before the window they render to.
struct GameRuntime {
    renderer: SceneRenderer,
    gpu: GpuContext,
    window: Arc<Window>,
    clock: FrameClock,
    input: InputState,
    state: GameState,
}

impl GameRuntime {
    fn new(window: Arc<Window>, config: GameConfig) -> Result<Self, StartupError> {
        let gpu = GpuContext::new(window.clone())?;
        let renderer = SceneRenderer::new(&gpu, &config)?;
        let clock = FrameClock::new().with_long_frame_warning(config.long_frame_warn_ms);
        let state = GameState::new(config);

        log::info!(
            "Game ready: ship at ({}, {}), projectile capacity {}",
            state.ship.body.position.x,
            state.ship.body.position.y,
            state.projectiles.capacity()
        );

        Ok(Self {
            renderer,
            gpu,
            window,
            clock,
            input: InputState::new(),
            state,
        })
    }

    fn frame(&mut self) {
        let dt = self.clock.begin_frame();

        let speed = self.state.config.ship_speed_pps;
        for transition in self.input.drain_transitions() {
            handle_transition(&mut self.state.ship, transition, speed);
        }

        self.state.update(dt);

        if self.clock.frame_count % FPS_LOG_INTERVAL_FRAMES == 0 {
            log::debug!(
                "{:.1} fps ({:.2} ms), {} projectiles live",
                self.clock.smoothed_fps,
                self.clock.smoothed_frame_time_ms,
                self.state.projectiles.len()
            );
        }

        if self.gpu.size.0 == 0 || self.gpu.size.1 == 0 {
            return;
        }
        self.renderer.render(&self.gpu, &self.state);
    }
}

struct App {
    config: GameConfig,
    runtime: Option<GameRuntime>,
    startup_error: Option<StartupError>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        Self {
            config,
            runtime: None,
            startup_error: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<GameRuntime, StartupError> {
        let platform = self.config.platform_config();
        let window = shmup_platform::create_window(event_loop, &platform)?;
        log::info!("Window created: {}x{}", platform.width, platform.height);
        GameRuntime::new(window, self.config.clone())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.runtime.is_some() || self.startup_error.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(runtime) => self.runtime = Some(runtime),
            Err(err) => {
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(runtime) = &self.runtime {
            runtime.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let runtime = match self.runtime.as_mut() {
            Some(r) => r,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    runtime.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(game_key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => {
                                runtime.input.key_down(game_key, event.repeat);
                            }
                            ElementState::Released => runtime.input.key_up(game_key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => runtime.frame(),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(runtime) = self.runtime.take() {
            log::info!(
                "Shutting down after {} frames",
                runtime.clock.frame_count
            );
        }
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Space => Some(Key::Space),
        _ => None,
    }
}

fn run() -> Result<(), StartupError> {
    let config = config::load_or_default(Path::new(CONFIG_PATH)).map_err(StartupError::Config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Shmup starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Startup failed: {err}");
            ExitCode::FAILURE
        }
    }
}
