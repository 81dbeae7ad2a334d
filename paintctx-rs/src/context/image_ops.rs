//! Image blit operations for Context.

use super::Context;
use crate::error::ContextResult;
use crate::geometry::{ensure_finite, BlitDest, RectI};
use crate::image::Image;
use crate::paint_op::{BlitOp, PaintOp};

impl Context {
    /// Draw `image` (or the `area` of it) at a point or scaled into a rectangle.
    ///
    /// A point destination draws the source unscaled with its top-left corner
    /// at the point; a rectangle destination scales the source to fill it.
    /// The source pixels are captured when the call is made.
    pub fn blit_image(
        &mut self,
        dest: impl Into<BlitDest>,
        image: &Image,
        area: Option<RectI>,
    ) -> ContextResult<()> {
        let dest = dest.into();
        log::debug!(
            target: "canvas",
            "blit_image {}x{} to {:?} area {:?}",
            image.width(),
            image.height(),
            dest,
            area
        );
        self.ensure_attached()?;
        match dest {
            BlitDest::Point(pt) => ensure_finite("blit point", &[pt.x, pt.y])?,
            BlitDest::Rect(r) => ensure_finite("blit rect", &[r.x, r.y, r.w, r.h])?,
        }
        if let Some(area) = area {
            area.check_within(image.width(), image.height())?;
        }
        if let BlitDest::Rect(r) = dest {
            if r.w <= 0.0 || r.h <= 0.0 {
                return Ok(());
            }
        }

        // Drawing an image into itself reads what has been painted so far
        if self.target().is_some_and(|target| target.is_same(image)) {
            self.flush()?;
        }

        let state = &self.state;
        let op = BlitOp {
            source: image.snapshot(),
            dest,
            area,
            alpha: state.global_alpha as f32,
            blend: state.comp_op.into(),
            transform: state.final_transform().into(),
            clip: state.clip.clone(),
        };
        self.submit(PaintOp::Blit(op))
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Rgba32;
    use crate::geometry::{BlitDest, Point, Rect, RectI};
    use crate::image::{Image, ImageFormat};
    use crate::paint_op::PaintOp;
    use crate::{Context, ContextError};
    use rstest::rstest;

    fn red_source() -> Image {
        let source = Image::new(4, 4, ImageFormat::Prgb32).unwrap();
        source.pixmap_mut().fill(tiny_skia::Color::from_rgba8(255, 0, 0, 255));
        source
    }

    #[rstest]
    #[case(BlitDest::Point(Point::new(1.0, 2.0)), None)]
    #[case(BlitDest::Point(Point::new(3.0, 4.0)), Some(RectI::new(0, 0, 2, 2)))]
    #[case(BlitDest::Rect(Rect::new(1.0, 2.0, 8.0, 8.0)), None)]
    #[case(BlitDest::Rect(Rect::new(0.0, 0.0, 5.0, 6.0)), Some(RectI::new(1, 1, 3, 3)))]
    fn test_blit_queues_supplied_arguments(#[case] dest: BlitDest, #[case] area: Option<RectI>) {
        let target = Image::new(16, 16, ImageFormat::Prgb32).unwrap();
        let mut ctx = Context::builder().flush_threshold(0).build_with_image(&target);
        ctx.blit_image(dest, &red_source(), area).unwrap();

        assert_eq!(ctx.pending_ops(), 1);
        match &ctx.pending()[0] {
            PaintOp::Blit(op) => {
                assert_eq!(op.dest, dest);
                assert_eq!(op.area, area);
                assert_eq!((op.source.width(), op.source.height()), (4, 4));
            }
            other => panic!("expected a blit, got {:?}", other),
        }
    }

    #[test]
    fn test_blit_pixels() {
        let target = Image::new(16, 16, ImageFormat::Prgb32).unwrap();
        let mut ctx = Context::with_image(&target);
        ctx.blit_image(Point::new(2.0, 2.0), &red_source(), None).unwrap();
        ctx.blit_image(Rect::new(8.0, 8.0, 8.0, 8.0), &red_source(), Some(RectI::new(0, 0, 1, 1)))
            .unwrap();
        ctx.flush().unwrap();

        assert_eq!(target.pixel(3, 3), Some(Rgba32::new(255, 0, 0, 255)));
        assert_eq!(target.pixel(7, 7).map(|c| c.a()), Some(0));
        assert_eq!(target.pixel(12, 12), Some(Rgba32::new(255, 0, 0, 255)));
    }

    #[test]
    fn test_blit_area_outside_source_is_rejected() {
        let target = Image::new(16, 16, ImageFormat::Prgb32).unwrap();
        let mut ctx = Context::with_image(&target);
        assert!(matches!(
            ctx.blit_image(Point::new(0.0, 0.0), &red_source(), Some(RectI::new(2, 2, 4, 4))),
            Err(ContextError::InvalidGeometry(_))
        ));
        assert_eq!(ctx.pending_ops(), 0);
    }

    #[test]
    fn test_blit_captures_source_at_submission() {
        let target = Image::new(8, 8, ImageFormat::Prgb32).unwrap();
        let source = red_source();
        let mut ctx = Context::with_image(&target);
        ctx.blit_image(Point::new(0.0, 0.0), &source, None).unwrap();
        source.pixmap_mut().fill(tiny_skia::Color::TRANSPARENT);
        ctx.flush().unwrap();
        assert_eq!(target.pixel(1, 1), Some(Rgba32::new(255, 0, 0, 255)));
    }

    #[test]
    fn test_blit_target_into_itself_sees_pending_ops() {
        let target = Image::new(8, 8, ImageFormat::Prgb32).unwrap();
        let mut ctx = Context::builder().flush_threshold(0).build_with_image(&target);
        ctx.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0)).unwrap();
        ctx.blit_image(Point::new(4.0, 4.0), &target, Some(RectI::new(0, 0, 4, 4)))
            .unwrap();
        ctx.flush().unwrap();
        assert_eq!(target.pixel(6, 6), Some(Rgba32::BLACK));
    }
}
