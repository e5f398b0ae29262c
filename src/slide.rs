//! Slides: units of content with a display duration, rotated by the
//! [`SlideManager`](crate::slide_manager::SlideManager).

mod clock;
mod event;
mod text;

pub use clock::ClockSlide;
pub use event::EventSlide;
pub use text::TextSlide;

use serde::Deserialize;
use serde_json::Value;

use crate::config::SlidesConfig;
use crate::error::{Error, Result};
use crate::render::Frame;

#[derive(Debug, Clone)]
pub enum Slide {
    Text(TextSlide),
    Event(EventSlide),
    Clock(ClockSlide),
}

impl Slide {
    pub fn title(&self) -> &str {
        match self {
            Slide::Text(s) => &s.title,
            Slide::Event(s) => &s.title,
            Slide::Clock(_) => "",
        }
    }

    pub fn duration(&self) -> f32 {
        match self {
            Slide::Text(s) => s.duration(),
            Slide::Event(s) => s.duration(),
            Slide::Clock(s) => s.duration(),
        }
    }

    pub fn time_remaining(&self) -> f32 {
        match self {
            Slide::Text(s) => s.time_remaining(),
            Slide::Event(s) => s.time_remaining(),
            Slide::Clock(s) => s.time_remaining(),
        }
    }

    /// Called every time the slide becomes active.
    pub fn reset(&mut self) {
        match self {
            Slide::Text(s) => s.reset(),
            Slide::Event(s) => s.reset(),
            Slide::Clock(s) => s.reset(),
        }
    }

    /// Advances the slide's timer and returns the seconds left.
    pub fn tick(&mut self, dt: f32) -> f32 {
        match self {
            Slide::Text(s) => s.tick(dt),
            Slide::Event(s) => s.tick(dt),
            Slide::Clock(s) => s.tick(dt),
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>) {
        match self {
            Slide::Text(s) => s.render(frame),
            Slide::Event(s) => s.render(frame),
            Slide::Clock(s) => s.render(frame),
        }
    }

    /// Fraction of the display time still left, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let duration = self.duration();
        if duration > 0.0 {
            (self.time_remaining() / duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn as_event_mut(&mut self) -> Option<&mut EventSlide> {
        match self {
            Slide::Event(s) => Some(s),
            _ => None,
        }
    }
}

impl From<TextSlide> for Slide {
    fn from(slide: TextSlide) -> Self {
        Slide::Text(slide)
    }
}

impl From<EventSlide> for Slide {
    fn from(slide: EventSlide) -> Self {
        Slide::Event(slide)
    }
}

impl From<ClockSlide> for Slide {
    fn from(slide: ClockSlide) -> Self {
        Slide::Clock(slide)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SlideKind {
    #[default]
    Text,
    Events,
    Clock,
}

/// One entry of the slides feed. `type` defaults to a text slide.
#[derive(Debug, Deserialize)]
struct SlideSpec {
    #[serde(default, rename = "type")]
    kind: SlideKind,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
    duration: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SlidesPayload {
    List(Vec<SlideSpec>),
    Wrapped { slides: Vec<SlideSpec> },
}

fn positive_duration(index: usize, duration: Option<f32>) -> Result<f32> {
    match duration {
        Some(d) if d.is_finite() && d > 0.0 => Ok(d),
        Some(d) => Err(Error::malformed("slides", format!("slide {index}: duration {d} must be positive"))),
        None => Err(Error::malformed("slides", format!("slide {index}: missing duration"))),
    }
}

/// Builds the slide list from a slides feed payload.
///
/// Either every entry is valid or nothing is returned. Event slides take
/// their duration from paging, so theirs is ignored.
pub fn parse_slides(data: &Value, settings: &SlidesConfig) -> Result<Vec<Slide>> {
    let specs = match SlidesPayload::deserialize(data) {
        Ok(SlidesPayload::List(specs)) | Ok(SlidesPayload::Wrapped { slides: specs }) => specs,
        Err(e) => return Err(Error::malformed("slides", e.to_string())),
    };

    specs
        .into_iter()
        .enumerate()
        .map(|(i, spec)| -> Result<Slide> {
            Ok(match spec.kind {
                SlideKind::Text => TextSlide::new(spec.title, spec.body, positive_duration(i, spec.duration)?).into(),
                SlideKind::Events => {
                    EventSlide::with_paging(spec.title, settings.items_per_page, settings.page_duration).into()
                }
                SlideKind::Clock => ClockSlide::new(positive_duration(i, spec.duration)?)
                    .with_seconds(settings.clock_show_seconds)
                    .with_font_size(settings.clock_font_size)
                    .into(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_mixed_slide_list() {
        let data = json!([
            { "title": "Welcome", "body": "Hello there", "duration": 5 },
            { "type": "events", "title": "Happening Now" },
            { "type": "clock", "duration": 3.5 }
        ]);
        let slides = parse_slides(&data, &SlidesConfig::default()).unwrap();

        assert_eq!(slides.len(), 3);
        assert!(matches!(&slides[0], Slide::Text(s) if s.body == "Hello there" && s.duration() == 5.0));
        assert!(matches!(&slides[1], Slide::Event(s) if s.title == "Happening Now"));
        assert!(matches!(&slides[2], Slide::Clock(s) if s.duration() == 3.5));
    }

    #[test]
    fn accepts_wrapped_payload() {
        let data = json!({ "slides": [{ "title": "A", "duration": 1 }] });
        assert_eq!(parse_slides(&data, &SlidesConfig::default()).unwrap().len(), 1);
    }

    #[test]
    fn rejects_whole_list_on_one_bad_entry() {
        let settings = SlidesConfig::default();
        for bad in [
            json!([{ "title": "A", "duration": 2 }, { "title": "B", "duration": 0 }]),
            json!([{ "title": "A", "duration": -1 }]),
            json!([{ "title": "A" }]),
            json!([{ "type": "video", "duration": 1 }]),
            json!("slides"),
        ] {
            let err = parse_slides(&bad, &settings).unwrap_err();
            assert!(matches!(err, Error::MalformedData { feed: "slides", .. }), "{bad} gave {err}");
        }
    }

    #[test]
    fn progress_is_clamped() {
        let mut slide = Slide::from(TextSlide::new("A", "", 4.0));
        assert_eq!(slide.progress(), 1.0);
        slide.tick(1.0);
        assert_eq!(slide.progress(), 0.75);
        slide.tick(3.5);
        assert_eq!(slide.progress(), 0.0);

        let empty = Slide::from(EventSlide::new("Now"));
        assert_eq!(empty.progress(), 0.0);
    }
}
