//! Application configuration, read once from `app.json` in the app directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::constants::*;
use crate::engine::Feed;
use crate::error::{Error, Result};
use crate::render::Palette;

pub const CONFIG_FILE: &str = "app.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontPaths {
    pub normal: PathBuf,
    pub light: PathBuf,
}

impl Default for FontPaths {
    fn default() -> Self {
        Self {
            normal: PathBuf::from("assets/Roboto-Regular.ttf"),
            light: PathBuf::from("assets/Roboto-Thin.ttf"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    pub size: f32,
    pub speed: f32,
    pub y: f32,
    /// Defaults to the screen width.
    pub width: Option<f32>,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self { size: TICKER_SIZE, speed: TICKER_SPEED, y: TICKER_Y, width: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SlidesConfig {
    pub progress_height: f32,
    pub items_per_page: usize,
    pub page_duration: f32,
    pub clock_font_size: f32,
    pub clock_show_seconds: bool,
}

impl Default for SlidesConfig {
    fn default() -> Self {
        Self {
            progress_height: PROGRESS_BAR_HEIGHT,
            items_per_page: ITEMS_PER_PAGE,
            page_duration: PAGE_DURATION,
            clock_font_size: 64.0,
            clock_show_seconds: false,
        }
    }
}

/// Data files watched for hot reload, relative to the app directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedPaths {
    pub slides: PathBuf,
    pub ticker: PathBuf,
    pub events: PathBuf,
}

impl Default for FeedPaths {
    fn default() -> Self {
        Self {
            slides: PathBuf::from("slides.json"),
            ticker: PathBuf::from("ticker.json"),
            events: PathBuf::from("events.json"),
        }
    }
}

impl FeedPaths {
    pub fn path(&self, feed: Feed) -> &Path {
        match feed {
            Feed::Slides => &self.slides,
            Feed::Ticker => &self.ticker,
            Feed::Events => &self.events,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogoConfig {
    pub path: PathBuf,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default = "full_opacity")]
    pub opacity: f32,
}

fn full_opacity() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub resolution: [u32; 2],
    pub fps: u32,
    pub fonts: FontPaths,
    pub colors: Palette,
    pub ticker: TickerConfig,
    pub slides: SlidesConfig,
    pub feeds: FeedPaths,
    pub show_fps: bool,
    pub logo: Option<LogoConfig>,
    pub guide_refresh_secs: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resolution: [RENDER_WIDTH, RENDER_HEIGHT],
            fps: FPS,
            fonts: FontPaths::default(),
            colors: Palette::default(),
            ticker: TickerConfig::default(),
            slides: SlidesConfig::default(),
            feeds: FeedPaths::default(),
            show_fps: false,
            logo: None,
            guide_refresh_secs: GUIDE_REFRESH_SECS,
        }
    }
}

impl AppConfig {
    /// Reads `app.json` from `app_dir`; a missing file means all defaults.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let path = app_dir.join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(text) => {
                let config = Self::from_json_str(&text)?;
                info!(path = %path.display(), "loaded configuration");
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let [w, h] = self.resolution;
        if w == 0 || h == 0 {
            return Err(Error::Config(format!("resolution {w}x{h} must be non-zero")));
        }
        if self.fps == 0 {
            return Err(Error::Config("fps must be non-zero".into()));
        }
        if self.slides.items_per_page == 0 {
            return Err(Error::Config("slides.items_per_page must be at least 1".into()));
        }
        if !(self.slides.page_duration > 0.0) {
            return Err(Error::Config("slides.page_duration must be positive".into()));
        }
        if !(self.guide_refresh_secs > 0.0) {
            return Err(Error::Config("guide_refresh_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn width(&self) -> f32 {
        self.resolution[0] as f32
    }

    pub fn height(&self) -> f32 {
        self.resolution[1] as f32
    }

    pub fn ticker_width(&self) -> f32 {
        self.ticker.width.unwrap_or_else(|| self.width())
    }

    pub fn frame_time(&self) -> f32 {
        1.0 / self.fps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.resolution, [640, 480]);
        assert_eq!(config.ticker_width(), 640.0);
        assert_eq!(config.feeds.path(Feed::Slides), Path::new("slides.json"));
        assert_eq!(config.feeds.path(Feed::Events), Path::new("events.json"));
        assert!(config.logo.is_none());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{
                "resolution": [1920, 1080],
                "ticker": { "speed": 60 },
                "slides": { "items_per_page": 4 },
                "logo": { "path": "logo.png", "x": 10, "y": 10, "w": 64, "h": 64 }
            }"#,
        )
        .unwrap();

        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.width(), 1920.0);
        assert_eq!(config.ticker.speed, 60.0);
        assert_eq!(config.ticker.size, TICKER_SIZE);
        assert_eq!(config.slides.items_per_page, 4);
        assert_eq!(config.slides.page_duration, PAGE_DURATION);
        assert_eq!(config.logo.unwrap().opacity, 1.0);
    }

    #[test]
    fn rejects_unusable_values() {
        for text in [
            r#"{ "resolution": [0, 480] }"#,
            r#"{ "fps": 0 }"#,
            r#"{ "slides": { "items_per_page": 0 } }"#,
            r#"{ "slides": { "page_duration": -1 } }"#,
        ] {
            assert!(matches!(AppConfig::from_json_str(text), Err(Error::Config(_))), "{text}");
        }
        assert!(matches!(AppConfig::from_json_str("{"), Err(Error::Json(_))));
    }
}
