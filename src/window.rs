//! SDL2 presentation for the demo binary.
//!
//! The renderer never sees SDL; it hands over an ARGB8888 byte slice and this
//! module copies it into a streaming texture.

use std::time::Duration;

use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: u64 = 1000 / FPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
    /// Space toggles the cube's rotation.
    TogglePause,
}

/// Sleeps away the rest of each frame to hold the target frame rate.
pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.ticks(),
        }
    }

    /// Waits if necessary and returns the seconds elapsed since the last call.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> f32 {
        let mut current_time = window.ticks();
        let elapsed = current_time.saturating_sub(self.previous_frame_time);

        if elapsed < FRAME_TARGET_TIME {
            std::thread::sleep(Duration::from_millis(FRAME_TARGET_TIME - elapsed));
            current_time = window.ticks();
        }

        let delta = current_time.saturating_sub(self.previous_frame_time);
        self.previous_frame_time = current_time;
        delta as f32 / 1000.0
    }
}

pub struct Window {
    // Field order matters: `texture` must drop before `texture_creator`.
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    canvas: Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        let texture = Self::streaming_texture(&texture_creator, width, height)?;

        debug!("opened {}x{} window", width, height);
        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    fn streaming_texture(
        creator: &TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Texture<'static>, String> {
        // SAFETY: the creator is boxed, so its address is stable, and it is
        // owned by the same `Window` as every texture made here. Field order
        // drops the texture first.
        let creator: &'static TextureCreator<WindowContext> =
            unsafe { &*(creator as *const TextureCreator<WindowContext>) };
        creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())
    }

    /// Drain pending events, reporting the most significant one.
    pub fn poll_events(&mut self) -> WindowEvent {
        let mut result = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    repeat: false,
                    ..
                } => result = WindowEvent::TogglePause,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } if w > 0 && h > 0 => result = WindowEvent::Resize(w as u32, h as u32),
                _ => {}
            }
        }
        result
    }

    /// Upload an ARGB8888 frame and show it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.texture = Self::streaming_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        debug!("resized window to {}x{}", width, height);
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Milliseconds since SDL initialization.
    pub fn ticks(&self) -> u64 {
        self.timer_subsystem.ticks64()
    }
}
