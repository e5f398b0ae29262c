use crate::clock::{fmt_am_pm, fmt_clock, fmt_time};
use crate::render::Frame;

/// The current time, centered on a filled background.
///
/// Inside a rotation it counts down like any other slide; drawn on its own
/// it is an always-on overlay and its timer is never consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockSlide {
    duration: f32,
    time_remaining: f32,
    pub font_size: f32,
    pub show_seconds: bool,
}

impl ClockSlide {
    pub fn new(duration: f32) -> Self {
        Self { duration, time_remaining: duration, font_size: 64.0, show_seconds: false }
    }

    pub fn with_seconds(mut self, show_seconds: bool) -> Self {
        self.show_seconds = show_seconds;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn reset(&mut self) {
        self.time_remaining = self.duration;
    }

    pub fn tick(&mut self, dt: f32) -> f32 {
        self.time_remaining -= dt;
        self.time_remaining
    }

    pub fn text(&self, frame: &Frame<'_>) -> String {
        if self.show_seconds {
            fmt_clock(&frame.now)
        } else {
            format!("{} {}", fmt_time(&frame.now), fmt_am_pm(&frame.now))
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>) {
        let font = frame.theme.fonts.normal;
        let palette = frame.theme.palette;
        let (width, height) = (frame.width, frame.height);

        frame.gfx.draw_rectangle(0.0, 0.0, width, height, palette.background);

        let text = self.text(frame);
        let (x, y) = match frame.gfx.measure_text(font, &text, self.font_size) {
            Ok(size) => ((width - size.width) / 2.0, (height - size.height) / 2.0),
            Err(_) => (0.0, (height - self.font_size) / 2.0),
        };
        frame.gfx.draw_text(font, &text, x, y, self.font_size, palette.title);
    }
}
