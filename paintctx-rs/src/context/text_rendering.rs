//! Text rendering operations for Context.

use super::drawing::DrawMode;
use super::Context;
use crate::error::ContextResult;
use crate::font::Font;
use crate::geometry::{ensure_finite, Point};
use crate::style::FillRule;
use cosmic_text::{Buffer, CacheKeyFlags, Command, FontSystem, Metrics, Shaping};
use tiny_skia::Transform;

impl Context {
    /// Fill UTF-8 text with its baseline origin at `pt`.
    pub fn fill_text(&mut self, pt: Point, font: &Font, text: &str) -> ContextResult<()> {
        log::debug!(target: "canvas", "fill_text \"{}\" {} {}", text, pt.x, pt.y);
        self.render_text_impl(pt, font, text, DrawMode::Fill(FillRule::NonZero))
    }

    /// Stroke UTF-8 text with its baseline origin at `pt`.
    pub fn stroke_text(&mut self, pt: Point, font: &Font, text: &str) -> ContextResult<()> {
        log::debug!(target: "canvas", "stroke_text \"{}\" {} {}", text, pt.x, pt.y);
        self.render_text_impl(pt, font, text, DrawMode::Stroke)
    }

    fn render_text_impl(
        &mut self,
        pt: Point,
        font: &Font,
        text: &str,
        mode: DrawMode,
    ) -> ContextResult<()> {
        self.ensure_attached()?;
        ensure_finite("text origin", &[pt.x, pt.y])?;
        if text.is_empty() {
            return Ok(());
        }
        let Some(path) = self.text_path(font, text) else {
            return Ok(());
        };
        let transform = Transform::from(self.state.final_transform())
            .pre_translate(pt.x as f32, pt.y as f32);
        self.queue_path(path, mode, transform)
    }

    /// Shape `text` and collect its glyph outlines into one path whose
    /// origin is on the baseline of the first line.
    pub(crate) fn text_path(&mut self, font: &Font, text: &str) -> Option<tiny_skia::Path> {
        let face = font.face();
        let options = &self.options;
        let font_system = self.font_system.get_or_insert_with(|| {
            let db = options.font_config.to_fontdb();
            FontSystem::new_with_locale_and_db("en".to_string(), db)
        });
        if self.registered_faces.insert(face.key()) {
            log::debug!(target: "canvas", "registering font face {}", face.family());
            font_system
                .db_mut()
                .load_font_source(fontdb::Source::Binary(face.data()));
        }

        let metrics = Metrics::new(font.size(), font.size() * 1.2);
        let mut buffer = Buffer::new(font_system, metrics);

        let mut attrs = face.attrs();
        if !options.font_config.hinting_enabled {
            attrs = attrs.cache_key_flags(CacheKeyFlags::DISABLE_HINTING);
        }
        buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(font_system, false);

        let mut path_builder = tiny_skia::PathBuilder::new();
        let mut first_baseline = None;
        for run in buffer.layout_runs() {
            let line_offset = run.line_y - *first_baseline.get_or_insert(run.line_y);
            for glyph in run.glyphs.iter() {
                // Position comes from the layout, not the physical glyph
                let physical_glyph = glyph.physical((0.0, 0.0), 1.0);
                let glyph_x = glyph.x + glyph.font_size * glyph.x_offset;
                let glyph_y = glyph.y - glyph.font_size * glyph.y_offset + line_offset;

                let Some(commands) = self
                    .swash_cache
                    .get_outline_commands(font_system, physical_glyph.cache_key)
                else {
                    continue;
                };

                // Font outlines have Y pointing up
                for cmd in commands {
                    match cmd {
                        Command::MoveTo(p) => path_builder.move_to(glyph_x + p.x, glyph_y - p.y),
                        Command::LineTo(p) => path_builder.line_to(glyph_x + p.x, glyph_y - p.y),
                        Command::QuadTo(ctrl, end) => path_builder.quad_to(
                            glyph_x + ctrl.x,
                            glyph_y - ctrl.y,
                            glyph_x + end.x,
                            glyph_y - end.y,
                        ),
                        Command::CurveTo(c1, c2, end) => path_builder.cubic_to(
                            glyph_x + c1.x,
                            glyph_y - c1.y,
                            glyph_x + c2.x,
                            glyph_y - c2.y,
                            glyph_x + end.x,
                            glyph_y - end.y,
                        ),
                        Command::Close => path_builder.close(),
                    }
                }
            }
        }

        path_builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Rgba32;
    use crate::geometry::Point;
    use crate::image::{Image, ImageFormat};
    use crate::{Context, Font, FontFace};

    /// A Latin sans-serif face from the system, if one is installed.
    fn system_face() -> Option<FontFace> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let path = db.faces().find_map(|face| {
            let latin = face
                .families
                .iter()
                .any(|(name, _)| name == "DejaVu Sans" || name == "Liberation Sans");
            match &face.source {
                fontdb::Source::File(path) if latin => Some(path.clone()),
                _ => None,
            }
        })?;
        FontFace::from_file(path).ok()
    }

    #[test]
    fn test_fill_text_draws_glyphs_above_baseline() {
        let Some(face) = system_face() else {
            return;
        };
        let font = Font::new(&face, 24.0).unwrap();
        let image = Image::new(200, 50, ImageFormat::Prgb32).unwrap();
        let mut ctx = Context::with_image(&image);
        ctx.set_fill_style(Rgba32::WHITE).unwrap();

        ctx.fill_text(Point::new(5.0, 35.0), &font, "").unwrap();
        assert_eq!(ctx.pending_ops(), 0);
        ctx.fill_text(Point::new(5.0, 35.0), &font, "Hello").unwrap();
        assert_eq!(ctx.pending_ops(), 1);
        ctx.flush().unwrap();

        let rgba = image.to_rgba8();
        let inked_row = |y: usize| (0..200).any(|x| rgba[(y * 200 + x) * 4 + 3] > 0);
        assert!((15..35).any(inked_row));
        assert!(!inked_row(0));
        assert!(!inked_row(49));
    }

    #[test]
    fn test_stroke_text_is_queued_once() {
        let Some(face) = system_face() else {
            return;
        };
        let font = Font::new(&face, 12.0).unwrap();
        let image = Image::new(100, 30, ImageFormat::Prgb32).unwrap();
        let mut ctx = Context::builder().flush_threshold(0).build_with_image(&image);
        ctx.stroke_text(Point::new(2.0, 20.0), &font, "ab\ncd").unwrap();
        assert_eq!(ctx.pending_ops(), 1);
        assert_eq!(ctx.registered_faces.len(), 1);
    }

    #[test]
    fn test_same_font_bytes_register_once() {
        let Some(face) = system_face() else {
            return;
        };
        let reloaded = FontFace::from_data(face.data().as_ref().clone()).unwrap();
        let image = Image::new(60, 30, ImageFormat::Prgb32).unwrap();
        let mut ctx = Context::builder().flush_threshold(0).build_with_image(&image);

        ctx.fill_text(Point::new(2.0, 20.0), &Font::new(&face, 12.0).unwrap(), "a")
            .unwrap();
        let faces = ctx.font_system.as_ref().map(|fs| fs.db().len());
        ctx.fill_text(Point::new(2.0, 20.0), &Font::new(&reloaded, 12.0).unwrap(), "b")
            .unwrap();

        assert_eq!(ctx.registered_faces.len(), 1);
        assert_eq!(ctx.font_system.as_ref().map(|fs| fs.db().len()), faces);
    }
}
