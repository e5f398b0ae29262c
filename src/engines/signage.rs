use serde_json::Value;
use tracing::debug;

use crate::clock::Instant;
use crate::config::{AppConfig, SlidesConfig};
use crate::engine::{Engine, Feed};
use crate::error::Result;
use crate::fps::Fps;
use crate::guide::{Event, EventGuide};
use crate::render::Frame;
use crate::slide_manager::SlideManager;
use crate::ticker::Ticker;

/// Rotating slides over a scrolling ticker, with "happening now" slides
/// fed from the event guide.
pub struct SignageEngine {
    settings: SlidesConfig,
    slides: SlideManager,
    ticker: Ticker,
    guide: EventGuide,
    fps: Option<Fps>,
    refresh_interval: f32,
    since_refresh: f32,
}

impl SignageEngine {
    pub fn new(config: &AppConfig) -> Self {
        let ticker = Ticker::new(config.ticker_width())
            .with_speed(config.ticker.speed)
            .with_size(config.ticker.size)
            .with_y(config.ticker.y);

        Self {
            settings: config.slides.clone(),
            slides: SlideManager::new().with_progress_height(config.slides.progress_height),
            ticker,
            guide: EventGuide::new(),
            fps: config.show_fps.then(|| Fps::new(config.width() - 100.0, 10.0, 20.0)),
            refresh_interval: config.guide_refresh_secs,
            since_refresh: 0.0,
        }
    }

    pub fn slides(&self) -> &SlideManager {
        &self.slides
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn guide(&self) -> &EventGuide {
        &self.guide
    }

    /// Hands the events running at `now` to every event slide; each one picks
    /// them up the next time it becomes active.
    fn refresh_event_slides(&mut self, now: Instant) {
        let running: Vec<Event> = self.guide.running(now).cloned().collect();
        debug!(running = running.len(), "refreshing event slides");
        for slide in self.slides.slides_mut() {
            if let Some(events) = slide.as_event_mut() {
                events.set_items(running.clone());
            }
        }
        self.since_refresh = 0.0;
    }
}

impl Engine for SignageEngine {
    fn feeds(&self) -> &'static [Feed] {
        &[Feed::Slides, Feed::Ticker, Feed::Events]
    }

    fn reload(&mut self, feed: Feed, data: &Value, now: Instant) -> Result<()> {
        match feed {
            Feed::Slides => {
                self.slides.reload(data, &self.settings)?;
                self.refresh_event_slides(now);
            }
            Feed::Ticker => self.ticker.reload(data)?,
            Feed::Events => {
                self.guide.reload(data)?;
                self.refresh_event_slides(now);
            }
        }
        Ok(())
    }

    fn render_frame(&mut self, dt: f32, frame: &mut Frame<'_>) {
        frame.gfx.clear(frame.theme.palette.background);

        self.since_refresh += dt;
        if self.since_refresh >= self.refresh_interval {
            self.refresh_event_slides(frame.now);
        }

        self.slides.draw(dt, frame);
        self.ticker.draw(dt, frame);

        if let Some(logo) = frame.theme.logo {
            frame.gfx.draw_image(logo.image, logo.x, logo.y, logo.w, logo.h, logo.opacity);
        }
        if let Some(fps) = self.fps.as_mut() {
            fps.draw(dt, frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawCall, RecordingRenderer};
    use crate::clock::parse_instant;
    use crate::render::{FontId, Fonts, ImageId, Logo, Palette, Theme};
    use crate::slide::Slide;
    use serde_json::json;

    fn theme() -> Theme {
        Theme::new(Fonts { normal: FontId(0), light: FontId(1) }, Palette::default())
    }

    fn at(hm: &str) -> Instant {
        parse_instant(&format!("2024-05-01T{hm}:00Z")).unwrap()
    }

    fn events() -> Value {
        json!([
            { "name": "Breakfast", "location": "Cafe", "start": "2024-05-01T08:00:00+0000", "finish": "2024-05-01T09:30:00+0000" },
            { "name": "Keynote", "location": "Hall A", "start": "2024-05-01T09:00:00+0000", "finish": "2024-05-01T10:00:00+0000" },
            { "name": "Lunch", "location": "Cafe", "start": "2024-05-01T12:00:00+0000", "finish": "2024-05-01T13:00:00+0000" }
        ])
    }

    fn render(engine: &mut SignageEngine, theme: &Theme, gfx: &mut RecordingRenderer, dt: f32, now: Instant) {
        let mut frame = Frame::new(gfx, theme, now, 640.0, 480.0);
        engine.render_frame(dt, &mut frame);
    }

    #[test]
    fn event_slide_shows_events_running_at_reload_time() {
        let mut engine = SignageEngine::new(&AppConfig::default());
        let now = at("09:15");
        engine.reload(Feed::Events, &events(), now).unwrap();
        engine.reload(Feed::Slides, &json!([{ "type": "events", "title": "Happening Now" }]), now).unwrap();

        let theme = theme();
        let mut gfx = RecordingRenderer::new();
        render(&mut engine, &theme, &mut gfx, 0.0, now);

        let texts = gfx.texts();
        assert!(texts.contains(&"Breakfast"));
        assert!(texts.contains(&"Keynote"));
        assert!(!texts.contains(&"Lunch"));
        match engine.slides().active_slide() {
            Some(Slide::Event(slide)) => assert_eq!(slide.duration(), 5.0),
            other => panic!("expected event slide, got {other:?}"),
        }
    }

    #[test]
    fn rejected_reload_keeps_previous_state() {
        let mut engine = SignageEngine::new(&AppConfig::default());
        let now = at("09:15");
        engine.reload(Feed::Events, &events(), now).unwrap();
        engine.reload(Feed::Ticker, &json!({ "messages": ["hello"] }), now).unwrap();

        assert!(engine.reload(Feed::Events, &json!([{ "name": "x", "start": "bad", "finish": "bad" }]), now).is_err());
        assert!(engine.reload(Feed::Ticker, &json!(42), now).is_err());

        assert_eq!(engine.guide().len(), 3);
        assert_eq!(engine.ticker().messages(), &["hello".to_string()][..]);
    }

    #[test]
    fn periodic_refresh_follows_the_clock() {
        let mut config = AppConfig::default();
        config.guide_refresh_secs = 60.0;
        let mut engine = SignageEngine::new(&config);
        engine.reload(Feed::Events, &events(), at("11:00")).unwrap();
        engine
            .reload(
                Feed::Slides,
                &json!([{ "type": "events", "title": "Now" }, { "title": "Filler", "duration": 30 }]),
                at("11:00"),
            )
            .unwrap();

        let theme = theme();
        let mut gfx = RecordingRenderer::new();
        // Nothing runs at 11:00, so the event slide yields straight away.
        render(&mut engine, &theme, &mut gfx, 0.1, at("11:00"));
        assert_eq!(engine.slides().active_index(), Some(1));

        // By the time the filler ends a refresh at 12:15 has staged lunch.
        render(&mut engine, &theme, &mut gfx, 60.0, at("12:15"));
        assert_eq!(engine.slides().active_index(), Some(0));
        gfx.take_calls();
        render(&mut engine, &theme, &mut gfx, 0.1, at("12:15"));
        assert!(gfx.texts().contains(&"Lunch"));
    }

    #[test]
    fn draws_background_slides_ticker_and_overlays_in_order() {
        let mut config = AppConfig::default();
        config.show_fps = true;
        let mut engine = SignageEngine::new(&config);
        let now = at("09:15");
        engine.reload(Feed::Slides, &json!([{ "title": "Hi", "body": "there", "duration": 5 }]), now).unwrap();
        engine.reload(Feed::Ticker, &json!(["news"]), now).unwrap();

        let mut theme = theme();
        theme.logo = Some(Logo { image: ImageId(7), x: 580.0, y: 420.0, w: 48.0, h: 48.0, opacity: 0.5 });
        let mut gfx = RecordingRenderer::new();
        render(&mut engine, &theme, &mut gfx, 1.0 / 60.0, now);
        gfx.take_calls();
        render(&mut engine, &theme, &mut gfx, 1.0 / 60.0, now);

        let calls = gfx.calls();
        assert_eq!(calls[0], DrawCall::Clear { color: Palette::default().background });
        assert!(matches!(&calls[1], DrawCall::Text { text, .. } if text == "Hi"));
        assert!(calls.iter().any(|c| matches!(c, DrawCall::Text { text, y, .. } if text == "news" && *y == 440.0)));
        let image = calls.iter().position(|c| matches!(c, DrawCall::Image { image: ImageId(7), .. })).unwrap();
        let fps = calls.iter().position(|c| matches!(c, DrawCall::Text { text, .. } if text.starts_with("FPS"))).unwrap();
        assert!(image < fps);
        assert_eq!(fps, calls.len() - 1);
    }
}
