//! Per-frame orchestration: input, mode switching, trail compositing, drawing.

use crate::audio::{AudioSource, CaptureBackend};
use crate::params::RenderConfig;
use crate::particles::ParticleField;
use crate::render::{
    draw_overlay, status_line, Canvas, DrawList, FrameContext, TextRenderer, VisualizationMode,
};

/// Keyboard input the loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Space,
    /// Number row key 0–9
    Digit(u8),
    Other,
}

/// Whether the event loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Visualizer state driven once per frame by the window event loop
pub struct FrameLoop<B: CaptureBackend> {
    audio: AudioSource<B>,
    particles: ParticleField,
    mode: VisualizationMode,
    time: u64,
    config: RenderConfig,
    canvas: Canvas,
    draw_list: DrawList,
    text: TextRenderer,
}

impl<B: CaptureBackend> FrameLoop<B> {
    pub fn new(
        audio: AudioSource<B>,
        particles: ParticleField,
        config: RenderConfig,
        mode: VisualizationMode,
        text: TextRenderer,
    ) -> Self {
        let canvas = Canvas::new(
            config.window_width,
            config.window_height,
            config.palette.background,
        );
        Self {
            audio,
            particles,
            mode,
            time: 0,
            config,
            canvas,
            draw_list: DrawList::new(),
            text,
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: Key) -> LoopControl {
        match key {
            Key::Escape => return LoopControl::Exit,
            Key::Space => self.toggle_recording(),
            Key::Digit(n) => {
                if let Some(mode) = VisualizationMode::from_ordinal(n) {
                    self.select_mode(mode);
                }
            }
            Key::Other => {}
        }
        LoopControl::Continue
    }

    /// Switch modes; particle state carries over untouched
    pub fn select_mode(&mut self, mode: VisualizationMode) {
        if mode != self.mode {
            log::info!("Mode: {}", mode.label());
            self.mode = mode;
        }
    }

    /// Start or stop capture. Device errors are logged and leave the loop idle.
    pub fn toggle_recording(&mut self) {
        if let Err(e) = self.audio.toggle() {
            log::warn!("Audio unavailable, staying idle: {}", e);
        }
    }

    /// Build the next frame on the canvas and return it for presentation
    pub fn frame(&mut self) -> &Canvas {
        self.time += 1;

        let signal = self.audio.state().snapshot();
        self.particles.update(&signal.spectrum);

        self.canvas
            .fade_toward(self.config.palette.background, self.config.trail_fade);

        let ctx = FrameContext {
            width: self.config.window_width,
            height: self.config.window_height,
            time: self.time,
            palette: self.config.palette,
        };

        self.draw_list.clear();
        self.mode
            .render(&ctx, &signal, &self.particles, &mut self.draw_list);
        draw_overlay(
            &ctx,
            &self.config,
            self.mode,
            self.audio.is_recording(),
            &mut self.draw_list,
        );

        self.canvas.draw(&self.draw_list, Some(&self.text));
        &self.canvas
    }

    /// Follow a new drawing size. The trail restarts on a blank canvas and
    /// particles wrap into the new bounds; zero or unchanged sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0
            || height == 0
            || (width, height) == (self.config.window_width, self.config.window_height)
        {
            return;
        }

        log::debug!("Canvas resized to {}x{}", width, height);
        self.config.window_width = width;
        self.config.window_height = height;
        self.canvas = Canvas::new(width, height, self.config.palette.background);
        self.particles.resize(width, height);
    }

    /// Stop capture before exit
    pub fn shutdown(&mut self) {
        self.audio.stop();
    }

    pub fn mode(&self) -> VisualizationMode {
        self.mode
    }

    /// Frames rendered so far
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn is_recording(&self) -> bool {
        self.audio.is_recording()
    }

    pub fn status_line(&self) -> &'static str {
        status_line(self.is_recording())
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn audio(&self) -> &AudioSource<B> {
        &self.audio
    }

    /// Primitives issued for the most recent frame
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}
