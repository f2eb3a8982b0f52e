//! Window host: plays a shower in a native window.

use crate::config::ShowerConfig;
use crate::error::ShowerError;
use crate::gpu::{GpuState, InstanceSurface};
use crate::projection::Viewport;
use crate::shader::CoinInstance;
use crate::shower::{CoinShower, ShowerState, StepOutcome};
use crate::sprite::CoinSprite;
use crate::time::Time;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Builder for a windowed coin shower.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// ```ignore
/// Coinfall::new()
///     .with_config(ShowerConfig::default().with_coin_count(40))
///     .with_seed(7)
///     .exit_when_finished(true)
///     .run()?;
/// ```
pub struct Coinfall {
    config: ShowerConfig,
    seed: Option<u64>,
    sprite: Option<CoinSprite>,
    window_size: (u32, u32),
    exit_when_finished: bool,
}

impl Coinfall {
    /// Create a shower with default settings.
    pub fn new() -> Self {
        Self {
            config: ShowerConfig::default(),
            seed: None,
            sprite: None,
            window_size: (1280, 720),
            exit_when_finished: false,
        }
    }

    /// Replace the tunables.
    pub fn with_config(mut self, config: ShowerConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the random source for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draw coins with this sprite instead of the procedural gold coin.
    pub fn with_sprite(mut self, sprite: CoinSprite) -> Self {
        self.sprite = Some(sprite);
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Close the window once the last coin has faded.
    pub fn exit_when_finished(mut self, exit: bool) -> Self {
        self.exit_when_finished = exit;
        self
    }

    /// Run the shower. This blocks until the window is closed.
    pub fn run(self) -> Result<(), ShowerError> {
        self.config.validate()?;

        let shower = match self.seed {
            Some(seed) => CoinShower::seeded(self.config, seed),
            None => CoinShower::from_entropy(self.config),
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App {
            window: None,
            gpu_state: None,
            shower,
            surface: InstanceSurface::new(),
            instances: Vec::new(),
            time: Time::new(),
            sprite: self.sprite.unwrap_or_default(),
            window_size: self.window_size,
            exit_when_finished: self.exit_when_finished,
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Coinfall {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    shower: CoinShower,
    surface: InstanceSurface,
    /// Scratch buffer reused every frame.
    instances: Vec<CoinInstance>,
    time: Time,
    sprite: CoinSprite,
    window_size: (u32, u32),
    exit_when_finished: bool,
    /// Setup failure to report once the event loop returns.
    error: Option<ShowerError>,
}

impl App {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ShowerError> {
        let window_attrs = Window::default_attributes()
            .with_title("coinfall")
            .with_inner_size(winit::dpi::LogicalSize::new(self.window_size.0, self.window_size.1));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), &self.sprite))?;

        self.window = Some(window.clone());
        self.gpu_state = Some(gpu_state);

        // The window is up: this is the one and only activation.
        self.time.reset();
        self.shower.activate();
        window.request_redraw();
        Ok(())
    }

    fn viewport(&self) -> Option<Viewport> {
        let window = self.window.as_ref()?;
        if window.is_minimized() == Some(true) {
            return Some(Viewport::new(0.0, 0.0));
        }
        let logical = window.inner_size().to_logical::<f64>(window.scale_factor());
        Some(Viewport::from(logical))
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(viewport) = self.viewport() else {
            return;
        };

        // Hidden: hold the clock and stop redrawing until the window is back.
        if viewport.is_empty() {
            if !self.time.is_paused() {
                log::debug!("Window hidden, pausing coin shower");
                self.time.pause();
            }
            return;
        }
        if self.time.is_paused() {
            log::debug!("Window visible again, resuming coin shower");
            self.time.resume();
        }

        let was_running = self.shower.state() == ShowerState::Running;
        let elapsed = self.time.elapsed();
        self.time.update();
        let outcome = self.shower.step(elapsed, viewport, &mut self.surface);
        self.surface.collect_into(&mut self.instances);

        if let Some(gpu_state) = &mut self.gpu_state {
            match gpu_state.render(&self.instances, viewport) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory, closing");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        match outcome {
            StepOutcome::Continue | StepOutcome::Idle => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            StepOutcome::Finished if was_running => {
                log::info!("Animation complete at {:.1} fps", self.time.fps());
                if self.exit_when_finished {
                    event_loop.exit();
                }
            }
            StepOutcome::Finished => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("{}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::Occluded(false) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
