//! Drives one engine frame by frame, independent of the backend.
//!
//! Backends load the normal font as `FontId(0)`, the light font as
//! `FontId(1)` and the logo, when configured, as `ImageId(0)`.

use std::path::Path;
use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use crate::clock::{Instant, WallClock};
use crate::config::AppConfig;
use crate::constants::PERF_REPORT_SECS;
use crate::engine::{Engine, Feed};
use crate::error::Result;
use crate::perf::Perf;
use crate::reload::JsonWatcher;
use crate::render::{FontId, Fonts, Frame, ImageId, Logo, Renderer, Theme};

pub struct App {
    engine: Box<dyn Engine>,
    config: AppConfig,
    theme: Theme,
    clock: WallClock,
    watcher: Option<JsonWatcher<Feed>>,
    perf: Perf,
}

impl App {
    pub fn new(engine: Box<dyn Engine>, config: AppConfig, clock: WallClock) -> Self {
        let theme = theme_for(&config);
        Self { engine, config, theme, clock, watcher: None, perf: Perf::new("frame") }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Loads every feed the engine reads from `app_dir` and keeps watching
    /// the files for changes.
    pub fn watch_feeds(&mut self, app_dir: &Path) -> Result<()> {
        let mut watcher = JsonWatcher::new(app_dir)?;
        let now = self.clock.now();
        for &feed in self.engine.feeds() {
            let data = watcher.watch(self.config.feeds.path(feed), feed);
            apply(self.engine.as_mut(), feed, data, now);
        }
        self.watcher = Some(watcher);
        Ok(())
    }

    /// Applies changed feeds, draws one frame and moves the clock on by `dt`.
    pub fn frame(&mut self, dt: f32, gfx: &mut dyn Renderer) {
        let now = self.clock.now();
        if let Some(watcher) = self.watcher.as_mut() {
            for (feed, data) in watcher.poll() {
                apply(self.engine.as_mut(), feed, data, now);
            }
        }

        self.perf.start();
        let mut frame = Frame::new(gfx, &self.theme, now, self.config.width(), self.config.height());
        self.engine.render_frame(dt, &mut frame);
        self.perf.stop();
        self.perf.report_after(Duration::from_secs(PERF_REPORT_SECS));

        self.clock.advance(dt);
    }
}

fn apply(engine: &mut dyn Engine, feed: Feed, data: Result<Value>, now: Instant) {
    if let Err(e) = data.and_then(|data| engine.reload(feed, &data, now)) {
        warn!(feed = feed.name(), "keeping previous data: {e}");
    }
}

fn theme_for(config: &AppConfig) -> Theme {
    let mut theme = Theme::new(Fonts { normal: FontId(0), light: FontId(1) }, config.colors);
    theme.logo = config.logo.as_ref().map(|logo| Logo {
        image: ImageId(0),
        x: logo.x,
        y: logo.y,
        w: logo.w,
        h: logo.h,
        opacity: logo.opacity,
    });
    theme
}
