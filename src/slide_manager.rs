use serde_json::Value;
use tracing::{debug, info};

use crate::config::SlidesConfig;
use crate::constants::*;
use crate::error::Result;
use crate::render::Frame;
use crate::slide::{Slide, parse_slides};
use crate::state::ManagerState;

/// Cycles through slides, each shown until its time runs out, with a
/// shared progress bar along the top edge.
#[derive(Debug)]
pub struct SlideManager {
    slides: Vec<Slide>,
    state: ManagerState,
    progress_height: f32,
}

impl SlideManager {
    pub fn new() -> Self {
        Self { slides: Vec::new(), state: ManagerState::Empty, progress_height: PROGRESS_BAR_HEIGHT }
    }

    pub fn with_progress_height(mut self, height: f32) -> Self {
        self.progress_height = height;
        self
    }

    /// Drops every slide and forgets the active one.
    pub fn clear(&mut self) {
        self.slides.clear();
        self.state = ManagerState::Empty;
    }

    /// Appends a slide. The active slide is left alone; after a `clear` the
    /// first slide is only activated by the next `draw`.
    pub fn add(&mut self, slide: impl Into<Slide>) {
        self.slides.push(slide.into());
    }

    /// Rebuilds the rotation from scratch.
    pub fn replace(&mut self, slides: Vec<Slide>) {
        self.clear();
        for slide in slides {
            self.add(slide);
        }
    }

    /// Hot reload entry point for the slides feed. A rejected payload leaves
    /// the current rotation running.
    pub fn reload(&mut self, data: &Value, settings: &SlidesConfig) -> Result<()> {
        let slides = parse_slides(data, settings)?;
        info!(count = slides.len(), "slides reloaded");
        self.replace(slides);
        Ok(())
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    pub fn active_index(&self) -> Option<usize> {
        match self.state {
            ManagerState::Active(i) => Some(i),
            ManagerState::Empty => None,
        }
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.active_index().and_then(|i| self.slides.get(i))
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slides_mut(&mut self) -> &mut [Slide] {
        &mut self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn draw(&mut self, dt: f32, frame: &mut Frame<'_>) {
        let index = match self.state {
            ManagerState::Active(i) => i,
            ManagerState::Empty => {
                let Some(first) = self.slides.first_mut() else { return };
                first.reset();
                self.state = ManagerState::Active(0);
                0
            }
        };

        let slide = &mut self.slides[index];
        let remaining = slide.tick(dt);
        slide.render(frame);
        draw_progress(slide.progress(), self.progress_height, frame);

        // Strictly negative: a slide gets at least its full duration.
        if remaining < 0.0 {
            let next = (index + 1) % self.slides.len();
            self.slides[next].reset();
            self.state = ManagerState::Active(next);
            debug!(from = index, to = next, title = self.slides[next].title(), "slide rotated");
        }
    }
}

impl Default for SlideManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Dark track across the full width; the remaining time fills it from the right.
fn draw_progress(fraction: f32, height: f32, frame: &mut Frame<'_>) {
    let palette = frame.theme.palette;
    let width = frame.width;
    let filled = fraction * width;
    frame.gfx.draw_rectangle(0.0, 0.0, width, height, palette.black);
    frame.gfx.draw_rectangle(width - filled, 0.0, filled, height, palette.white);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawCall, RecordingRenderer};
    use crate::clock::parse_instant;
    use crate::render::{FontId, Fonts, Palette, Theme};
    use crate::slide::{ClockSlide, TextSlide};
    use serde_json::json;

    struct Harness {
        theme: Theme,
        gfx: RecordingRenderer,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                theme: Theme::new(Fonts { normal: FontId(0), light: FontId(1) }, Palette::default()),
                gfx: RecordingRenderer::new(),
            }
        }

        fn draw(&mut self, manager: &mut SlideManager, dt: f32) -> Vec<DrawCall> {
            let now = parse_instant("2024-05-01T10:00:00Z").unwrap();
            let mut frame = Frame::new(&mut self.gfx, &self.theme, now, 640.0, 480.0);
            manager.draw(dt, &mut frame);
            self.gfx.take_calls()
        }
    }

    fn text(title: &str, duration: f32) -> TextSlide {
        TextSlide::new(title, "", duration)
    }

    fn active_title(manager: &SlideManager) -> &str {
        manager.active_slide().map(Slide::title).unwrap_or("")
    }

    #[test]
    fn draw_on_empty_does_nothing() {
        let mut h = Harness::new();
        let mut manager = SlideManager::new();
        assert!(h.draw(&mut manager, 1.0).is_empty());
        assert_eq!(manager.state(), ManagerState::Empty);
        assert!(manager.active_slide().is_none());
    }

    #[test]
    fn add_does_not_activate_until_draw() {
        let mut h = Harness::new();
        let mut manager = SlideManager::new();
        manager.add(text("A", 5.0));
        assert_eq!(manager.state(), ManagerState::Empty);

        h.draw(&mut manager, 0.5);
        assert_eq!(manager.state(), ManagerState::Active(0));
        assert_eq!(manager.active_slide().unwrap().time_remaining(), 4.5);
    }

    #[test]
    fn rotates_once_time_runs_out() {
        let mut h = Harness::new();
        let mut manager = SlideManager::new();
        manager.add(text("A", 5.0));
        manager.add(text("B", 3.0));

        h.draw(&mut manager, 5.1);

        assert_eq!(active_title(&manager), "B");
        assert_eq!(manager.active_slide().unwrap().time_remaining(), 3.0);
    }

    #[test]
    fn slide_gets_its_full_duration() {
        let mut h = Harness::new();
        let mut manager = SlideManager::new();
        manager.add(text("A", 5.0));
        manager.add(text("B", 3.0));

        h.draw(&mut manager, 2.5);
        h.draw(&mut manager, 2.5);
        assert_eq!(active_title(&manager), "A");
        assert_eq!(manager.active_slide().unwrap().time_remaining(), 0.0);

        h.draw(&mut manager, 0.25);
        assert_eq!(active_title(&manager), "B");
    }

    #[test]
    fn visits_every_slide_and_wraps() {
        let mut h = Harness::new();
        let mut manager = SlideManager::new();
        for (title, duration) in [("A", 1.0), ("B", 0.5), ("C", 2.0)] {
            manager.add(text(title, duration));
        }

        let mut seen = Vec::new();
        for _ in 0..200 {
            h.draw(&mut manager, 0.125);
            let i = manager.active_index().unwrap();
            if seen.last() != Some(&i) {
                seen.push(i);
            }
        }
        assert_eq!(&seen[..7], &[0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn single_slide_restarts_itself() {
        let mut h = Harness::new();
        let mut manager = SlideManager::new();
        manager.add(text("Only", 1.0));

        h.draw(&mut manager, 1.5);
        assert_eq!(manager.state(), ManagerState::Active(0));
        assert_eq!(manager.active_slide().unwrap().time_remaining(), 1.0);
    }

    #[test]
    fn add_keeps_active_index() {
        let mut h = Harness::new();
        let mut manager = SlideManager::new();
        manager.add(text("A", 1.0));
        manager.add(text("B", 1.0));
        h.draw(&mut manager, 1.5);
        assert_eq!(manager.active_index(), Some(1));

        manager.add(text("C", 1.0));
        assert_eq!(manager.active_index(), Some(1));
        h.draw(&mut manager, 1.5);
        assert_eq!(active_title(&manager), "C");
    }

    #[test]
    fn clear_returns_to_empty_and_rebuild_starts_over() {
        let mut h = Harness::new();
        let mut manager = SlideManager::new();
        manager.add(text("A", 1.0));
        manager.add(text("B", 1.0));
        h.draw(&mut manager, 1.5);

        manager.clear();
        assert_eq!(manager.state(), ManagerState::Empty);
        assert!(h.draw(&mut manager, 1.0).is_empty());

        manager.add(text("X", 2.0));
        manager.add(ClockSlide::new(2.0));
        h.draw(&mut manager, 0.0);
        assert_eq!(active_title(&manager), "X");
    }

    #[test]
    fn renders_slide_then_progress_bar() {
        let mut h = Harness::new();
        let mut manager = SlideManager::new().with_progress_height(6.0);
        manager.add(TextSlide::new("Title", "Body", 4.0));

        let calls = h.draw(&mut manager, 1.0);
        let palette = Palette::default();

        assert_eq!(calls.len(), 4);
        assert!(matches!(&calls[0], DrawCall::Text { text, .. } if text == "Title"));
        assert!(matches!(&calls[1], DrawCall::Text { text, .. } if text == "Body"));
        assert_eq!(calls[2], DrawCall::Rectangle { x: 0.0, y: 0.0, w: 640.0, h: 6.0, color: palette.black });
        assert_eq!(calls[3], DrawCall::Rectangle { x: 160.0, y: 0.0, w: 480.0, h: 6.0, color: palette.white });
    }

    #[test]
    fn progress_bar_empties_on_final_frame() {
        let mut h = Harness::new();
        let mut manager = SlideManager::new();
        manager.add(text("A", 1.0));
        manager.add(text("B", 1.0));

        let calls = h.draw(&mut manager, 1.5);
        assert!(matches!(calls.last(), Some(DrawCall::Rectangle { w, .. }) if *w == 0.0));
    }

    #[test]
    fn reload_replaces_or_keeps_rotation() {
        let mut h = Harness::new();
        let mut manager = SlideManager::new();
        let settings = SlidesConfig::default();

        manager.reload(&json!([{ "title": "A", "duration": 1 }, { "title": "B", "duration": 1 }]), &settings).unwrap();
        h.draw(&mut manager, 1.5);
        assert_eq!(active_title(&manager), "B");

        assert!(manager.reload(&json!([{ "title": "C", "duration": "long" }]), &settings).is_err());
        assert_eq!(manager.len(), 2);
        assert_eq!(active_title(&manager), "B");

        manager.reload(&json!([{ "title": "C", "duration": 2 }]), &settings).unwrap();
        assert_eq!(manager.state(), ManagerState::Empty);
        h.draw(&mut manager, 0.1);
        assert_eq!(active_title(&manager), "C");
    }
}
