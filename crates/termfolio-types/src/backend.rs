//! Backend trait definitions.
//!
//! Every front end implements these traits. The session dispatches all
//! terminal I/O through trait boundaries and never calls a platform API.

use crate::error::{Result, TermfolioError};
use crate::input::InputEvent;

/// A color in RGBA format (0-255 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Return the same color with a different alpha value.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 && digits.len() != 8 {
            return Err(TermfolioError::Theme(format!("invalid hex color: {hex}")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| TermfolioError::Theme(format!("invalid hex color: {hex}")))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Blend this color over `bg` using its alpha channel, producing an
    /// opaque color. Terminals have no alpha, so translucent theme tokens
    /// are flattened against the background before drawing.
    pub fn over(self, bg: Color) -> Color {
        let a = self.a as u16;
        let mix = |fg: u8, bg: u8| ((fg as u16 * a + bg as u16 * (255 - a)) / 255) as u8;
        Color::rgb(mix(self.r, bg.r), mix(self.g, bg.g), mix(self.b, bg.b))
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
}

/// Input source for a front end.
pub trait InputBackend {
    /// Wait at most `timeout_ms` for input and return every pending event.
    fn poll_events(&mut self, timeout_ms: u32) -> Result<Vec<InputEvent>>;
}

/// Something that can show a document (the resume) outside the terminal.
pub trait DocumentOpener {
    /// Open `target` (a URL or path) in an external viewer.
    fn open(&self, target: &str) -> Result<()>;
}

/// A `DocumentOpener` that only records the request in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOpener;

impl DocumentOpener for LogOpener {
    fn open(&self, target: &str) -> Result<()> {
        log::info!("open document requested: {target}");
        Ok(())
    }
}
