//! Headless backend that records draw calls instead of rasterizing them.
//!
//! Offsets are applied when a call is recorded, so positions in
//! [`DrawCall`] are absolute screen coordinates.

use serde::Serialize;

use crate::error::Result;
use crate::render::{Color, FontId, ImageId, Renderer, TextSize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCall {
    Clear { color: Color },
    Text { font: FontId, text: String, x: f32, y: f32, size: f32, color: Color },
    Rectangle { x: f32, y: f32, w: f32, h: f32, color: Color },
    Image { image: ImageId, x: f32, y: f32, w: f32, h: f32, opacity: f32 },
}

type Metrics = Box<dyn FnMut(FontId, &str, f32) -> Result<TextSize>>;

pub struct RecordingRenderer {
    calls: Vec<DrawCall>,
    offset: (f32, f32),
    offsets: Vec<(f32, f32)>,
    metrics: Metrics,
    measured: usize,
}

impl RecordingRenderer {
    /// Monospace metrics with glyphs half as wide as they are tall.
    pub fn new() -> Self {
        Self::monospace(0.5)
    }

    /// Every glyph is `advance * size` wide; lines are `size` tall.
    pub fn monospace(advance: f32) -> Self {
        Self::with_metrics(move |_, text, size| {
            Ok(TextSize { width: text.chars().count() as f32 * size * advance, height: size })
        })
    }

    pub fn with_metrics(metrics: impl FnMut(FontId, &str, f32) -> Result<TextSize> + 'static) -> Self {
        Self {
            calls: Vec::new(),
            offset: (0.0, 0.0),
            offsets: Vec::new(),
            metrics: Box::new(metrics),
            measured: 0,
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Text of every recorded text call, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn measure_count(&self) -> usize {
        self.measured
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear { color });
    }

    fn draw_text(&mut self, font: FontId, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let (dx, dy) = self.offset;
        self.calls.push(DrawCall::Text { font, text: text.to_owned(), x: x + dx, y: y + dy, size, color });
    }

    fn draw_rectangle(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let (dx, dy) = self.offset;
        self.calls.push(DrawCall::Rectangle { x: x + dx, y: y + dy, w, h, color });
    }

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32, opacity: f32) {
        let (dx, dy) = self.offset;
        self.calls.push(DrawCall::Image { image, x: x + dx, y: y + dy, w, h, opacity });
    }

    fn measure_text(&mut self, font: FontId, text: &str, size: f32) -> Result<TextSize> {
        self.measured += 1;
        (self.metrics)(font, text, size)
    }

    fn push_offset(&mut self, dx: f32, dy: f32) {
        self.offsets.push((dx, dy));
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    fn pop_offset(&mut self) {
        // Unbalanced pops are ignored.
        if let Some((dx, dy)) = self.offsets.pop() {
            self.offset.0 -= dx;
            self.offset.1 -= dy;
        }
    }
}
