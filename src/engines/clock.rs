use serde_json::Value;

use crate::clock::Instant;
use crate::config::AppConfig;
use crate::engine::{Engine, Feed};
use crate::error::Result;
use crate::fps::Fps;
use crate::render::Frame;
use crate::slide::ClockSlide;

/// A full-screen clock with seconds. Reads no feeds.
pub struct ClockEngine {
    clock: ClockSlide,
    fps: Option<Fps>,
}

impl ClockEngine {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            clock: ClockSlide::new(0.0).with_seconds(true).with_font_size(config.slides.clock_font_size),
            fps: config.show_fps.then(|| Fps::new(config.width() - 100.0, 10.0, 20.0)),
        }
    }
}

impl Engine for ClockEngine {
    fn feeds(&self) -> &'static [Feed] {
        &[]
    }

    fn reload(&mut self, _feed: Feed, _data: &Value, _now: Instant) -> Result<()> {
        Ok(())
    }

    fn render_frame(&mut self, dt: f32, frame: &mut Frame<'_>) {
        frame.gfx.clear(frame.theme.palette.black);
        self.clock.render(frame);
        if let Some(fps) = self.fps.as_mut() {
            fps.draw(dt, frame);
        }
    }
}
