//! Queued paint operations and their rasterization.
//!
//! Each operation captures everything it needs at submission time (path,
//! paint source, alpha, blend mode, transform and clip), so executing it
//! later is independent of the context's current state.

use crate::geometry::{BlitDest, RectI};
use crate::gradient::GradientKind;
use crate::style::{FillRule, Style};
use std::rc::Rc;
use tiny_skia::{BlendMode, Mask, Paint, Pixmap, Transform};

/// How a shape is painted.
#[derive(Debug, Clone)]
pub(crate) enum ShapeKind {
    Fill(FillRule),
    Stroke(tiny_skia::Stroke),
}

/// Fill or stroke of a path.
#[derive(Debug, Clone)]
pub(crate) struct ShapeOp {
    pub path: tiny_skia::Path,
    pub kind: ShapeKind,
    pub style: Style,
    pub alpha: f32,
    pub blend: BlendMode,
    pub transform: Transform,
    pub clip: Option<Rc<Mask>>,
}

/// Image blit.
#[derive(Debug, Clone)]
pub(crate) struct BlitOp {
    pub source: Rc<Pixmap>,
    pub dest: BlitDest,
    pub area: Option<RectI>,
    pub alpha: f32,
    pub blend: BlendMode,
    pub transform: Transform,
    pub clip: Option<Rc<Mask>>,
}

#[derive(Debug, Clone)]
pub(crate) enum PaintOp {
    Shape(ShapeOp),
    Blit(BlitOp),
}

impl PaintOp {
    /// Rasterize onto `pixmap`.
    pub(crate) fn execute(&self, pixmap: &mut Pixmap) {
        match self {
            PaintOp::Shape(op) => op.execute(pixmap),
            PaintOp::Blit(op) => op.execute(pixmap),
        }
    }
}

impl ShapeOp {
    fn execute(&self, pixmap: &mut Pixmap) {
        let Some(paint) = make_paint(&self.style, self.alpha, self.blend) else {
            return;
        };
        let clip = self.clip.as_deref();
        match &self.kind {
            ShapeKind::Fill(rule) => {
                pixmap.fill_path(&self.path, &paint, (*rule).into(), self.transform, clip)
            }
            ShapeKind::Stroke(stroke) => {
                pixmap.stroke_path(&self.path, &paint, stroke, self.transform, clip)
            }
        }
    }
}

impl BlitOp {
    fn execute(&self, pixmap: &mut Pixmap) {
        let cropped;
        let source = match self.area {
            None => self.source.as_ref().as_ref(),
            Some(area) => {
                cropped = area.to_skia().and_then(|rect| self.source.clone_rect(rect));
                match &cropped {
                    Some(p) => p.as_ref(),
                    None => return,
                }
            }
        };

        let (transform, quality) = match self.dest {
            BlitDest::Point(pt) => (
                self.transform.pre_translate(pt.x as f32, pt.y as f32),
                tiny_skia::FilterQuality::Nearest,
            ),
            BlitDest::Rect(rect) => {
                if rect.w <= 0.0 || rect.h <= 0.0 {
                    return;
                }
                // Scale the source to fill the destination rectangle
                let scale_x = rect.w as f32 / source.width() as f32;
                let scale_y = rect.h as f32 / source.height() as f32;
                (
                    self.transform
                        .pre_translate(rect.x as f32, rect.y as f32)
                        .pre_scale(scale_x, scale_y),
                    tiny_skia::FilterQuality::Bilinear,
                )
            }
        };

        let paint = tiny_skia::PixmapPaint {
            opacity: self.alpha,
            blend_mode: self.blend,
            quality,
        };
        pixmap.draw_pixmap(0, 0, source, &paint, transform, self.clip.as_deref());
    }
}

/// Build the paint for a style. Returns `None` when the style paints nothing
/// (a gradient without stops).
fn make_paint(style: &Style, alpha: f32, blend: BlendMode) -> Option<Paint<'_>> {
    let mut paint = Paint {
        anti_alias: true,
        blend_mode: blend,
        ..Default::default()
    };

    match style {
        Style::Color(rgba) => {
            let mut color: tiny_skia::Color = (*rgba).into();
            color.apply_opacity(alpha);
            paint.set_color(color);
        }
        Style::Gradient(gradient) => {
            if gradient.stops().is_empty() {
                return None;
            }
            let stops: Vec<tiny_skia::GradientStop> = gradient
                .stops()
                .iter()
                .map(|stop| {
                    let mut color: tiny_skia::Color = stop.color.into();
                    color.apply_opacity(alpha);
                    tiny_skia::GradientStop::new(stop.offset as f32, color)
                })
                .collect();
            let spread = gradient.extend_mode().into();

            paint.shader = match gradient.kind() {
                GradientKind::Linear { x0, y0, x1, y1 } => tiny_skia::LinearGradient::new(
                    tiny_skia::Point::from_xy(x0 as f32, y0 as f32),
                    tiny_skia::Point::from_xy(x1 as f32, y1 as f32),
                    stops,
                    spread,
                    Transform::identity(),
                )?,
                GradientKind::Radial { cx, cy, fx, fy, r } => tiny_skia::RadialGradient::new(
                    tiny_skia::Point::from_xy(fx as f32, fy as f32),
                    tiny_skia::Point::from_xy(cx as f32, cy as f32),
                    r as f32,
                    stops,
                    spread,
                    Transform::identity(),
                )?,
            };
        }
        Style::Pattern(pattern) => {
            paint.shader = pattern.shader(alpha);
        }
    }

    Some(paint)
}
