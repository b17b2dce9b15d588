//! Vibescope - real-time audio-reactive visualizer
//!
//! Captures the default input device, analyzes each chunk, and draws one of
//! five visualization modes in a window.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use vibescope::audio::{AudioSource, CpalBackend};
use vibescope::cli::Args;
use vibescope::frame_loop::{FrameLoop, Key, LoopControl};
use vibescope::pacing::{FpsTracker, FramePacer};
use vibescope::params::{CaptureConfig, ParticleParams, RenderConfig};
use vibescope::particles::ParticleField;
use vibescope::render::RenderSystem;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Visualizer state
    frame_loop: FrameLoop<CpalBackend>,
    render_config: RenderConfig,

    // Frame timing
    pacer: FramePacer,
    fps: FpsTracker,

    title: String,
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(frame_loop: FrameLoop<CpalBackend>, render_config: RenderConfig) -> Self {
        let now = Instant::now();
        Self {
            window: None,
            render_system: None,
            frame_loop,
            pacer: FramePacer::new(render_config.target_fps, now),
            fps: FpsTracker::new(now),
            render_config,
            title: String::new(),
            fatal: None,
        }
    }

    fn window_title(&self) -> String {
        format!(
            "Audio Visualizer - {} - {}",
            self.frame_loop.mode().label(),
            self.frame_loop.status_line()
        )
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let title = self.window_title();
        let window_attributes = Window::default_attributes()
            .with_title(title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let mut render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.render_config.window_width,
            self.render_config.window_height,
        ))
        .context("failed to initialize rendering")?;

        log::info!("Press SPACE to toggle recording, 1-5 to switch modes, ESC to quit");

        // Draw at the window's physical size from the first frame
        let size = window.inner_size();
        render_system.resize(size.width, size.height);
        let (canvas_width, canvas_height) = render_system.canvas_size();
        self.frame_loop.resize(canvas_width, canvas_height);

        self.title = title;
        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    fn quit(&mut self, event_loop: &ActiveEventLoop) {
        self.frame_loop.shutdown();
        event_loop.exit();
    }

    /// Render and present a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        let canvas = self.frame_loop.frame();
        render_system.upload(canvas);

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                self.quit(event_loop);
                return;
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        self.fps.record_frame(Instant::now());

        let title = self.window_title();
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }
}

fn translate_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::Digit0 => Key::Digit(0),
        KeyCode::Digit1 => Key::Digit(1),
        KeyCode::Digit2 => Key::Digit(2),
        KeyCode::Digit3 => Key::Digit(3),
        KeyCode::Digit4 => Key::Digit(4),
        KeyCode::Digit5 => Key::Digit(5),
        KeyCode::Digit6 => Key::Digit(6),
        KeyCode::Digit7 => Key::Digit(7),
        KeyCode::Digit8 => Key::Digit(8),
        KeyCode::Digit9 => Key::Digit(9),
        _ => Key::Other,
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if self.pacer.is_due(now) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.pacer.mark(now);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.next_deadline()));
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init_window(event_loop) {
            self.fatal = Some(e);
            self.quit(event_loop);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.quit(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if self.frame_loop.handle_key(translate_key(code)) == LoopControl::Exit {
                    self.quit(event_loop);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                    let (width, height) = render_system.canvas_size();
                    self.frame_loop.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    run().inspect_err(|e| log::error!("{:#}", e))
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let render_config = args.render_config();

    let text = args
        .text_renderer()
        .context("failed to load overlay font")?;

    let audio = AudioSource::new(CpalBackend::new(), CaptureConfig::default())?;
    let particles = ParticleField::new(
        render_config.window_width,
        render_config.window_height,
        ParticleParams::default(),
        &mut StdRng::from_entropy(),
    );

    let mut frame_loop = FrameLoop::new(
        audio,
        particles,
        render_config.clone(),
        args.initial_mode(),
        text,
    );
    if args.record {
        frame_loop.toggle_recording();
    }

    log::info!("Vibescope starting in {} mode", frame_loop.mode().label());

    let mut app = App::new(frame_loop, render_config);
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.run_app(&mut app)?;
    app.frame_loop.shutdown();

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
