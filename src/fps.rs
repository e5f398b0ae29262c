use crate::render::{Color, Frame};

/// Smoothed frame rate overlay.
#[derive(Debug, Clone)]
pub struct Fps {
    prev_fps: f32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Fps {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self { prev_fps: 0.0, x, y, size }
    }

    /// Folds one frame time into the running average and returns it.
    pub fn update(&mut self, dt: f32) -> f32 {
        if dt > 0.0 {
            self.prev_fps = 0.1 * (1.0 / dt) + 0.9 * self.prev_fps;
        }
        self.prev_fps
    }

    pub fn value(&self) -> f32 {
        self.prev_fps
    }

    /// Red when dropping frames, yellow when running faster than the display.
    pub fn color(&self, frame: &Frame<'_>) -> Color {
        let palette = frame.theme.palette;
        if self.prev_fps < 58.0 {
            palette.red
        } else if self.prev_fps > 62.0 {
            palette.yellow
        } else {
            palette.white
        }
    }

    pub fn draw(&mut self, dt: f32, frame: &mut Frame<'_>) {
        let fps = self.update(dt);
        let color = self.color(frame);
        let font = frame.theme.fonts.normal;
        frame.gfx.draw_text(font, &format!("FPS: {fps:.2}"), self.x, self.y, self.size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawCall, RecordingRenderer};
    use crate::clock::parse_instant;
    use crate::render::{FontId, Fonts, Palette, Theme};

    #[test]
    fn converges_on_steady_rate() {
        let mut fps = Fps::new(0.0, 0.0, 20.0);
        for _ in 0..200 {
            fps.update(1.0 / 60.0);
        }
        assert!((fps.value() - 60.0).abs() < 0.01);
    }

    #[test]
    fn ignores_non_positive_frame_times() {
        let mut fps = Fps::new(0.0, 0.0, 20.0);
        fps.update(0.5);
        assert_eq!(fps.update(0.0), 0.2);
        assert_eq!(fps.update(-1.0), 0.2);
    }

    #[test]
    fn colors_by_threshold() {
        let theme = Theme::new(Fonts { normal: FontId(0), light: FontId(1) }, Palette::default());
        let now = parse_instant("2024-05-01T10:00:00Z").unwrap();
        let mut gfx = RecordingRenderer::new();
        let mut fps = Fps::new(540.0, 10.0, 20.0);

        let mut color_at = |rate: f32| {
            fps.prev_fps = rate;
            let frame = Frame::new(&mut gfx, &theme, now, 640.0, 480.0);
            fps.color(&frame)
        };
        assert_eq!(color_at(30.0), Color::RED);
        assert_eq!(color_at(60.0), Color::WHITE);
        assert_eq!(color_at(90.0), Color::YELLOW);
    }

    #[test]
    fn draws_label_with_two_decimals() {
        let theme = Theme::new(Fonts { normal: FontId(0), light: FontId(1) }, Palette::default());
        let now = parse_instant("2024-05-01T10:00:00Z").unwrap();
        let mut gfx = RecordingRenderer::new();
        let mut fps = Fps::new(540.0, 10.0, 20.0);

        fps.draw(0.1, &mut Frame::new(&mut gfx, &theme, now, 640.0, 480.0));

        assert_eq!(
            gfx.calls()[0],
            DrawCall::Text {
                font: FontId(0),
                text: "FPS: 1.00".into(),
                x: 540.0,
                y: 10.0,
                size: 20.0,
                color: Color::RED,
            }
        );
    }
}
