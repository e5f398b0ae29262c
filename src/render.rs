//! The drawing capability the scheduler renders through.
//!
//! Backends implement [`Renderer`]; everything the core draws goes through a
//! [`Frame`], which bundles the renderer with the theme and the instant the
//! frame is drawn at.

use serde::{Deserialize, Serialize};

use crate::clock::Instant;
use crate::error::Result;

/// RGBA color with channels in `[0, 1]`.
///
/// Deserializes from `[r, g, b]` or `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// 8-bit channels, clamped.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl TryFrom<Vec<f32>> for Color {
    type Error = String;

    fn try_from(c: Vec<f32>) -> std::result::Result<Self, Self::Error> {
        match c.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
            other => Err(format!("color needs 3 or 4 channels, got {}", other.len())),
        }
    }
}

/// Opaque handle to a font loaded by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FontId(pub usize);

/// Opaque handle to an image loaded by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ImageId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

pub trait Renderer {
    fn clear(&mut self, color: Color);

    fn draw_text(&mut self, font: FontId, text: &str, x: f32, y: f32, size: f32, color: Color);

    fn draw_rectangle(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32, opacity: f32);

    fn measure_text(&mut self, font: FontId, text: &str, size: f32) -> Result<TextSize>;

    /// Translates every following draw call until the matching [`Renderer::pop_offset`].
    fn push_offset(&mut self, dx: f32, dy: f32);

    fn pop_offset(&mut self);
}

/// Runs `block` with drawing translated by `(dx, dy)`.
pub fn with_offset<R: Renderer + ?Sized>(gfx: &mut R, dx: f32, dy: f32, block: impl FnOnce(&mut R)) {
    gfx.push_offset(dx, dy);
    block(gfx);
    gfx.pop_offset();
}

#[derive(Debug, Clone, Copy)]
pub struct Fonts {
    pub normal: FontId,
    pub light: FontId,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub black: Color,
    pub white: Color,
    pub red: Color,
    pub yellow: Color,
    pub background: Color,
    pub title: Color,
    pub body: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            black: Color::BLACK,
            white: Color::WHITE,
            red: Color::RED,
            yellow: Color::YELLOW,
            background: Color::rgb(0.8, 0.9, 1.0),
            title: Color::rgb(0.1, 0.2, 0.5),
            body: Color::rgb(0.1, 0.2, 0.5),
        }
    }
}

/// A loaded image placed at fixed geometry on every frame.
#[derive(Debug, Clone, Copy)]
pub struct Logo {
    pub image: ImageId,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub opacity: f32,
}

/// Resources resolved once at startup and shared by every component.
#[derive(Debug, Clone)]
pub struct Theme {
    pub fonts: Fonts,
    pub palette: Palette,
    pub logo: Option<Logo>,
}

impl Theme {
    pub fn new(fonts: Fonts, palette: Palette) -> Self {
        Self { fonts, palette, logo: None }
    }
}

/// Everything a component needs to draw one frame.
pub struct Frame<'a> {
    pub gfx: &'a mut dyn Renderer,
    pub theme: &'a Theme,
    pub now: Instant,
    pub width: f32,
    pub height: f32,
}

impl<'a> Frame<'a> {
    pub fn new(gfx: &'a mut dyn Renderer, theme: &'a Theme, now: Instant, width: f32, height: f32) -> Self {
        Self { gfx, theme, now, width, height }
    }

    pub fn with_offset(&mut self, dx: f32, dy: f32, block: impl FnOnce(&mut Self)) {
        self.gfx.push_offset(dx, dy);
        block(self);
        self.gfx.pop_offset();
    }
}
