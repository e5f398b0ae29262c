use serde_json::Value;

use crate::clock::Instant;
use crate::error::Result;
use crate::render::Frame;

/// A data file an engine can be fed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    Slides,
    Ticker,
    Events,
}

impl Feed {
    pub fn name(self) -> &'static str {
        match self {
            Feed::Slides => "slides",
            Feed::Ticker => "ticker",
            Feed::Events => "events",
        }
    }
}

pub trait Engine {
    /// Feeds this engine wants delivered to [`Engine::reload`].
    fn feeds(&self) -> &'static [Feed];

    /// Replaces the state backing `feed`. On error the previous state stays.
    fn reload(&mut self, feed: Feed, data: &Value, now: Instant) -> Result<()>;

    fn render_frame(&mut self, dt: f32, frame: &mut Frame<'_>);
}
