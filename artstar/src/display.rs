//! Display window
//!
//! Thin wrapper over a `minifb` window: present RGB rasters as a 0RGB
//! `u32` framebuffer, report the client size for viewport fitting, and
//! hand keypresses (with shift state) to the command table.

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use thiserror::Error;

use artstar_core::{PixelFormat, Raster};

pub const WINDOW_TITLE: &str = "Art Star";
const DEFAULT_WIDTH: usize = 960;
const DEFAULT_HEIGHT: usize = 720;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("cannot present {0:?} raster, expected Rgb8")]
    UnsupportedFormat(PixelFormat),
}

pub type DisplayResult<T> = Result<T, DisplayError>;

/// The interactive output window
pub struct Display {
    window: Window,
}

impl Display {
    pub fn open() -> DisplayResult<Self> {
        let mut window = Window::new(
            WINDOW_TITLE,
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Client area in the signed form the viewport fitter takes.
    pub fn client_size(&self) -> (i32, i32) {
        let (w, h) = self.window.get_size();
        (w as i32, h as i32)
    }

    pub fn shift_down(&self) -> bool {
        self.window.is_key_down(Key::LeftShift) || self.window.is_key_down(Key::RightShift)
    }

    /// Keys newly pressed since the last update, with auto-repeat.
    pub fn pressed_keys(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::Yes)
    }

    /// Append session status to the window title.
    pub fn set_annotation(&mut self, annotation: &str) {
        self.window.set_title(&format!("{WINDOW_TITLE} | {annotation}"));
    }

    /// Push a frame to the window.
    pub fn present(&mut self, frame: &Raster) -> DisplayResult<()> {
        if frame.format() != PixelFormat::Rgb8 {
            return Err(DisplayError::UnsupportedFormat(frame.format()));
        }
        let buffer = pack_0rgb(frame);
        self.window
            .update_with_buffer(&buffer, frame.width() as usize, frame.height() as usize)?;
        Ok(())
    }

    /// Pump window events without pushing a new frame.
    pub fn pump(&mut self) {
        self.window.update();
    }
}

/// Interleaved RGB bytes to the 0RGB words minifb wants.
fn pack_0rgb(frame: &Raster) -> Vec<u32> {
    frame
        .data()
        .chunks_exact(3)
        .map(|px| (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]))
        .collect()
}
