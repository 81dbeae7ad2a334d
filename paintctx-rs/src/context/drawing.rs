//! Fill, stroke, clear and clip operations for Context.

use super::Context;
use crate::error::{ContextError, ContextResult};
use crate::geometry::{ensure_finite, Point, Rect};
use crate::paint_op::{PaintOp, ShapeKind, ShapeOp};
use crate::path::Path;
use crate::style::{FillRule, Style};
use std::rc::Rc;
use tiny_skia::{BlendMode, PathBuilder, Transform};

/// Whether a shape is filled or stroked.
#[derive(Debug, Clone, Copy)]
pub(crate) enum DrawMode {
    Fill(FillRule),
    Stroke,
}

impl Context {
    // --- Queue helpers ---

    /// Queue `path` with the current paint state and `transform`.
    pub(crate) fn queue_path(
        &mut self,
        path: tiny_skia::Path,
        mode: DrawMode,
        transform: Transform,
    ) -> ContextResult<()> {
        let state = &self.state;
        let (kind, style, alpha) = match mode {
            DrawMode::Fill(rule) => (ShapeKind::Fill(rule), state.fill_style.clone(), state.fill_alpha),
            DrawMode::Stroke => (
                ShapeKind::Stroke(state.stroke.to_skia()),
                state.stroke_style.clone(),
                state.stroke_alpha,
            ),
        };
        let op = ShapeOp {
            path,
            kind,
            style,
            alpha: (alpha * state.global_alpha) as f32,
            blend: state.comp_op.into(),
            transform,
            clip: state.clip.clone(),
        };
        self.submit(PaintOp::Shape(op))
    }

    fn queue_user_path(&mut self, path: Option<tiny_skia::Path>, mode: DrawMode) -> ContextResult<()> {
        match path {
            Some(path) => {
                let transform = self.state.final_transform().into();
                self.queue_path(path, mode, transform)
            }
            None => Ok(()),
        }
    }

    fn queue_clear(&mut self, path: tiny_skia::Path, transform: Transform) -> ContextResult<()> {
        let op = ShapeOp {
            path,
            kind: ShapeKind::Fill(FillRule::NonZero),
            style: Style::default(),
            alpha: 1.0,
            blend: BlendMode::Clear,
            transform,
            clip: self.state.clip.clone(),
        };
        self.submit(PaintOp::Shape(op))
    }

    /// The whole target as a user-space path, with the transform to draw it.
    /// `None` when the final transform is not invertible.
    fn device_path(&self) -> ContextResult<Option<(tiny_skia::Path, Transform)>> {
        let (width, height) = self.target_size()?;
        let transform: Transform = self.state.final_transform().into();
        let device = tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
            .ok_or(ContextError::InvalidDimensions { width, height })?;
        let path = transform
            .invert()
            .and_then(|inverse| PathBuilder::from_rect(device).transform(inverse));
        Ok(path.map(|path| (path, transform)))
    }

    // --- Whole target ---

    /// Clear the whole target to transparent, honoring the clip.
    pub fn clear_all(&mut self) -> ContextResult<()> {
        log::debug!(target: "canvas", "clear_all");
        self.ensure_attached()?;
        let (width, height) = self.target_size()?;
        let device = tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
            .ok_or(ContextError::InvalidDimensions { width, height })?;
        self.queue_clear(PathBuilder::from_rect(device), Transform::identity())
    }

    /// Fill the whole target with the fill style, honoring the clip.
    pub fn fill_all(&mut self) -> ContextResult<()> {
        log::debug!(target: "canvas", "fill_all");
        self.ensure_attached()?;
        match self.device_path()? {
            Some((path, transform)) => {
                self.queue_path(path, DrawMode::Fill(FillRule::NonZero), transform)
            }
            None => Ok(()),
        }
    }

    // --- Rectangles ---

    /// Clear a rectangle to transparent.
    pub fn clear_rect(&mut self, rect: Rect) -> ContextResult<()> {
        log::debug!(target: "canvas", "clear_rect {} {} {} {}", rect.x, rect.y, rect.w, rect.h);
        self.ensure_attached()?;
        ensure_finite("rect", &[rect.x, rect.y, rect.w, rect.h])?;
        match rect.to_skia() {
            Some(r) => {
                let transform = self.state.final_transform().into();
                self.queue_clear(PathBuilder::from_rect(r), transform)
            }
            None => Ok(()),
        }
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, rect: Rect) -> ContextResult<()> {
        log::debug!(target: "canvas", "fill_rect {} {} {} {}", rect.x, rect.y, rect.w, rect.h);
        self.ensure_attached()?;
        ensure_finite("rect", &[rect.x, rect.y, rect.w, rect.h])?;
        let path = rect.to_skia().map(PathBuilder::from_rect);
        self.queue_user_path(path, DrawMode::Fill(self.state.fill_rule))
    }

    /// Stroke a rectangle.
    pub fn stroke_rect(&mut self, rect: Rect) -> ContextResult<()> {
        log::debug!(target: "canvas", "stroke_rect {} {} {} {}", rect.x, rect.y, rect.w, rect.h);
        self.ensure_attached()?;
        ensure_finite("rect", &[rect.x, rect.y, rect.w, rect.h])?;
        let path = rect.to_skia().map(PathBuilder::from_rect);
        self.queue_user_path(path, DrawMode::Stroke)
    }

    // --- Circles and ellipses ---

    fn ellipse_path(center: Point, rx: f64, ry: f64) -> ContextResult<Option<tiny_skia::Path>> {
        ensure_finite("ellipse", &[center.x, center.y, rx, ry])?;
        let mut path = Path::new();
        path.add_ellipse(center, rx, ry);
        Ok(path.to_skia())
    }

    /// Fill a circle. Logged and validated as an ellipse.
    pub fn fill_circle(&mut self, center: Point, r: f64) -> ContextResult<()> {
        self.fill_ellipse(center, r, r)
    }

    /// Stroke a circle.
    pub fn stroke_circle(&mut self, center: Point, r: f64) -> ContextResult<()> {
        self.stroke_ellipse(center, r, r)
    }

    /// Fill an ellipse.
    pub fn fill_ellipse(&mut self, center: Point, rx: f64, ry: f64) -> ContextResult<()> {
        log::debug!(target: "canvas", "fill_ellipse {} {} {} {}", center.x, center.y, rx, ry);
        self.ensure_attached()?;
        let path = Self::ellipse_path(center, rx, ry)?;
        self.queue_user_path(path, DrawMode::Fill(self.state.fill_rule))
    }

    /// Stroke an ellipse.
    pub fn stroke_ellipse(&mut self, center: Point, rx: f64, ry: f64) -> ContextResult<()> {
        log::debug!(target: "canvas", "stroke_ellipse {} {} {} {}", center.x, center.y, rx, ry);
        self.ensure_attached()?;
        let path = Self::ellipse_path(center, rx, ry)?;
        self.queue_user_path(path, DrawMode::Stroke)
    }

    // --- Paths ---

    /// Fill a path using the current fill rule.
    pub fn fill_path(&mut self, path: &Path) -> ContextResult<()> {
        log::debug!(target: "canvas", "fill_path");
        self.ensure_attached()?;
        path.ensure_finite()?;
        self.queue_user_path(path.to_skia(), DrawMode::Fill(self.state.fill_rule))
    }

    /// Stroke a path.
    pub fn stroke_path(&mut self, path: &Path) -> ContextResult<()> {
        log::debug!(target: "canvas", "stroke_path");
        self.ensure_attached()?;
        path.ensure_finite()?;
        self.queue_user_path(path.to_skia(), DrawMode::Stroke)
    }

    // --- Clipping ---

    /// Intersect the clip with a rectangle in user space.
    pub fn clip_to_rect(&mut self, rect: Rect) -> ContextResult<()> {
        log::debug!(target: "canvas", "clip_to_rect {} {} {} {}", rect.x, rect.y, rect.w, rect.h);
        self.ensure_attached()?;
        ensure_finite("clip rect", &[rect.x, rect.y, rect.w, rect.h])?;
        let (width, height) = self.target_size()?;
        let transform: Transform = self.state.final_transform().into();
        let path = rect.to_skia().map(PathBuilder::from_rect);

        let mask = match (&self.state.clip, path) {
            (Some(existing), Some(path)) => {
                let mut mask = (**existing).clone();
                mask.intersect_path(&path, tiny_skia::FillRule::Winding, true, transform);
                mask
            }
            (None, Some(path)) => {
                let mut mask = tiny_skia::Mask::new(width, height)
                    .ok_or(ContextError::InvalidDimensions { width, height })?;
                mask.fill_path(&path, tiny_skia::FillRule::Winding, true, transform);
                mask
            }
            // An empty rectangle clips everything
            (_, None) => tiny_skia::Mask::new(width, height)
                .ok_or(ContextError::InvalidDimensions { width, height })?,
        };
        self.state.clip = Some(Rc::new(mask));
        Ok(())
    }

    /// Reset the clip to the one active at the most recent save, or to no
    /// clip when nothing is saved.
    pub fn restore_clipping(&mut self) -> ContextResult<()> {
        log::debug!(target: "canvas", "restore_clipping");
        self.ensure_attached()?;
        self.state.clip = self.saved_clip();
        Ok(())
    }
}
