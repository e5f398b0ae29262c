use crate::clock::{fmt_am_pm, fmt_time};
use crate::constants::*;
use crate::guide::Event;
use crate::render::Frame;

const FIRST_ROW_Y: f32 = 100.0;
const ROW_HEIGHT: f32 = 60.0;

/// Lists events a page at a time; runs as long as it takes to show every page.
///
/// Items handed over with [`EventSlide::set_items`] are only picked up by
/// the next [`EventSlide::reset`], so a page never changes under the viewer.
#[derive(Debug, Clone)]
pub struct EventSlide {
    pub title: String,
    items_per_page: usize,
    page_duration: f32,

    staged: Vec<Event>,
    items: Vec<Event>,

    num_pages: usize,
    active_page: usize,
    duration: f32,
    time_remaining: f32,
    page_time_remaining: f32,
}

impl EventSlide {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_paging(title, ITEMS_PER_PAGE, PAGE_DURATION)
    }

    pub fn with_paging(title: impl Into<String>, items_per_page: usize, page_duration: f32) -> Self {
        let mut slide = Self {
            title: title.into(),
            items_per_page: items_per_page.max(1),
            page_duration,
            staged: Vec::new(),
            items: Vec::new(),
            num_pages: 0,
            active_page: 0,
            duration: 0.0,
            time_remaining: 0.0,
            page_time_remaining: 0.0,
        };
        slide.reset();
        slide
    }

    pub fn set_items(&mut self, items: Vec<Event>) {
        self.staged = items;
    }

    pub fn reset(&mut self) {
        self.items = self.staged.clone();
        self.num_pages = self.items.len().div_ceil(self.items_per_page);
        self.active_page = 0;
        self.duration = self.num_pages as f32 * self.page_duration;
        self.time_remaining = self.duration;
        self.page_time_remaining = self.page_duration;
    }

    pub fn tick(&mut self, dt: f32) -> f32 {
        self.time_remaining -= dt;
        self.page_time_remaining -= dt;

        if self.page_time_remaining <= 0.0 {
            self.active_page += 1;
            self.page_time_remaining = self.page_duration;
        }

        self.time_remaining
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    pub fn active_page(&self) -> usize {
        self.active_page
    }

    pub fn items(&self) -> &[Event] {
        &self.items
    }

    /// Events on the active page; empty once the last page has run out.
    pub fn page_items(&self) -> &[Event] {
        let start = (self.active_page * self.items_per_page).min(self.items.len());
        let end = (start + self.items_per_page).min(self.items.len());
        &self.items[start..end]
    }

    pub fn render(&self, frame: &mut Frame<'_>) {
        let fonts = frame.theme.fonts;
        let palette = frame.theme.palette;
        let offset = *frame.now.offset();

        frame.gfx.draw_text(fonts.light, &self.title, 20.0, 24.0, 64.0, palette.title);

        for (i, item) in self.page_items().iter().enumerate() {
            let start = item.start.with_timezone(&offset);
            let time = fmt_time(&start);

            frame.with_offset(0.0, FIRST_ROW_Y + i as f32 * ROW_HEIGHT, |frame| {
                frame.gfx.draw_rectangle(15.0, 0.0, 70.0, 55.0, palette.body);

                // Right-align the time inside the block; unmeasurable text sits flush left.
                let w = frame.gfx.measure_text(fonts.normal, &time, 28.0).map_or(60.0, |s| s.width);
                frame.gfx.draw_text(fonts.normal, &time, 20.0 + (60.0 - w), 4.0, 28.0, palette.white);
                frame.gfx.draw_text(fonts.normal, fmt_am_pm(&start), 50.0, 28.0, 24.0, palette.white);

                frame.gfx.draw_text(fonts.normal, &item.name, 90.0, 0.0, 36.0, palette.body);
                frame.gfx.draw_text(fonts.normal, &item.location, 90.0, 30.0, 24.0, palette.body);
            });
        }
    }
}
