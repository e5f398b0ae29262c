//! Windowed backend. Frames are drawn into a framebuffer at the configured
//! resolution, which is then scaled to whatever size the window has.

use std::collections::HashMap;
use std::path::Path;

use ::raylib::prelude::*;
use tracing::info;

use crate::app::App;
use crate::backend::texture_loader::load_texture_with_exif_rotation;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::render::{self, FontId, ImageId, Renderer, TextSize};

// Glyphs are rasterized once at this size and scaled when drawn.
const FONT_LOAD_SIZE: i32 = 64;

fn render_error(e: impl std::fmt::Display) -> Error {
    Error::Render(e.to_string())
}

fn to_raylib(color: render::Color) -> Color {
    let [r, g, b, a] = color.to_rgba8();
    Color::new(r, g, b, a)
}

/// Fonts and images in the order the theme refers to them, plus measured
/// text sizes keyed by (font, text, size).
pub struct Assets {
    fonts: Vec<Font>,
    images: Vec<Texture2D>,
    measured: HashMap<(usize, String, u32), TextSize>,
}

impl Assets {
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, config: &AppConfig, app_dir: &Path) -> Result<Self> {
        let mut fonts = Vec::new();
        for path in [&config.fonts.normal, &config.fonts.light] {
            let path = app_dir.join(path);
            let font = rl
                .load_font_ex(thread, &path.to_string_lossy(), FONT_LOAD_SIZE, None)
                .map_err(|e| Error::Render(format!("failed to load font {}: {e}", path.display())))?;
            fonts.push(font);
        }

        let mut images = Vec::new();
        if let Some(logo) = &config.logo {
            images.push(load_texture_with_exif_rotation(rl, thread, &app_dir.join(&logo.path))?);
        }

        info!(fonts = fonts.len(), images = images.len(), "assets loaded");
        Ok(Self { fonts, images, measured: HashMap::new() })
    }
}

pub struct RaylibRenderer<'a, D: RaylibDraw> {
    d: &'a mut D,
    assets: &'a mut Assets,
    offset: Vector2,
    offsets: Vec<Vector2>,
}

impl<'a, D: RaylibDraw> RaylibRenderer<'a, D> {
    pub fn new(d: &'a mut D, assets: &'a mut Assets) -> Self {
        Self { d, assets, offset: Vector2::zero(), offsets: Vec::new() }
    }

    fn at(&self, x: f32, y: f32) -> Vector2 {
        Vector2::new(x + self.offset.x, y + self.offset.y)
    }
}

impl<D: RaylibDraw> Renderer for RaylibRenderer<'_, D> {
    fn clear(&mut self, color: render::Color) {
        self.d.clear_background(to_raylib(color));
    }

    fn draw_text(&mut self, font: FontId, text: &str, x: f32, y: f32, size: f32, color: render::Color) {
        let position = self.at(x, y);
        match self.assets.fonts.get(font.0) {
            Some(f) => self.d.draw_text_ex(f, text, position, size, 0.0, to_raylib(color)),
            None => self.d.draw_text(text, position.x as i32, position.y as i32, size as i32, to_raylib(color)),
        }
    }

    fn draw_rectangle(&mut self, x: f32, y: f32, w: f32, h: f32, color: render::Color) {
        let position = self.at(x, y);
        self.d.draw_rectangle_v(position, Vector2::new(w, h), to_raylib(color));
    }

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32, opacity: f32) {
        let Some(texture) = self.assets.images.get(image.0) else { return };
        let position = self.at(x, y);
        let source = Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32);
        let tint = to_raylib(render::Color::WHITE.with_alpha(opacity));
        self.d
            .draw_texture_pro(texture, source, Rectangle::new(position.x, position.y, w, h), Vector2::zero(), 0.0, tint);
    }

    fn measure_text(&mut self, font: FontId, text: &str, size: f32) -> Result<TextSize> {
        let key = (font.0, text.to_owned(), size.to_bits());
        if let Some(measured) = self.assets.measured.get(&key) {
            return Ok(*measured);
        }

        let f = self.assets.fonts.get(font.0).ok_or_else(|| Error::Render(format!("unknown font {}", font.0)))?;
        let v = measure_text_ex(f, text, size, 0.0);
        let measured = TextSize { width: v.x, height: v.y };
        self.assets.measured.insert(key, measured);
        Ok(measured)
    }

    fn push_offset(&mut self, dx: f32, dy: f32) {
        self.offsets.push(Vector2::new(dx, dy));
        self.offset.x += dx;
        self.offset.y += dy;
    }

    fn pop_offset(&mut self) {
        if let Some(v) = self.offsets.pop() {
            self.offset.x -= v.x;
            self.offset.y -= v.y;
        }
    }
}

/// Opens a window and drives `app` until it is closed.
pub fn run(app: &mut App, app_dir: &Path) -> Result<()> {
    let config = app.config().clone();
    let [width, height] = config.resolution;

    let (mut rl, thread) = ::raylib::init()
        .size((width / 2) as i32, (height / 2) as i32)
        .title("Signage")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(config.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut assets = Assets::load(&mut rl, &thread, &config, app_dir)?;
    let mut framebuffer = rl.load_render_texture(&thread, width, height).map_err(render_error)?;

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let mut d = rl.begin_drawing(&thread);

        {
            let mut tmd = d.begin_texture_mode(&thread, &mut framebuffer);
            let mut gfx = RaylibRenderer::new(&mut tmd, &mut assets);
            app.frame(dt, &mut gfx);
        }

        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;

        // Render textures are stored upside down
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::zero(),
            0.0,
            Color::WHITE,
        );
    }

    Ok(())
}
