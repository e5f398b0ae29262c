use crate::render::Frame;

/// A title and a line of body text shown for a fixed time.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSlide {
    pub title: String,
    pub body: String,
    duration: f32,
    time_remaining: f32,
}

impl TextSlide {
    pub fn new(title: impl Into<String>, body: impl Into<String>, duration: f32) -> Self {
        Self { title: title.into(), body: body.into(), duration, time_remaining: duration }
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

    pub fn render(&self, frame: &mut Frame<'_>) {
        let fonts = frame.theme.fonts;
        let palette = frame.theme.palette;
        frame.gfx.draw_text(fonts.light, &self.title, 20.0, 24.0, 64.0, palette.title);
        frame.gfx.draw_text(fonts.normal, &self.body, 20.0, 96.0, 18.0, palette.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_from_duration() {
        let mut slide = TextSlide::new("Welcome", "Doors open at nine", 5.0);
        assert_eq!(slide.time_remaining(), 5.0);
        assert_eq!(slide.tick(2.0), 3.0);
        assert_eq!(slide.tick(3.5), -0.5);
        slide.reset();
        assert_eq!(slide.time_remaining(), 5.0);
    }
}
