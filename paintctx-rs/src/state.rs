//! Graphics state that can be saved and restored.

use crate::error::{ContextError, ContextResult};
use crate::matrix::Matrix2D;
use crate::style::{CompOp, FillRule, StrokeCap, StrokeCapPosition, StrokeJoin, Style};
use std::rc::Rc;

/// Stroke parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeOptions {
    pub width: f64,
    pub miter_limit: f64,
    pub join: StrokeJoin,
    pub start_cap: StrokeCap,
    pub end_cap: StrokeCap,
    pub dash_array: Vec<f64>,
    pub dash_offset: f64,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            miter_limit: 4.0,
            join: StrokeJoin::default(),
            start_cap: StrokeCap::default(),
            end_cap: StrokeCap::default(),
            dash_array: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

impl StrokeOptions {
    pub fn cap(&self, position: StrokeCapPosition) -> StrokeCap {
        match position {
            StrokeCapPosition::Start => self.start_cap,
            StrokeCapPosition::End => self.end_cap,
        }
    }

    /// Build the rasterizer stroke. tiny-skia has a single cap per stroke, so
    /// the start cap is used for both ends.
    pub(crate) fn to_skia(&self) -> tiny_skia::Stroke {
        let dash = if self.dash_array.is_empty() {
            None
        } else {
            let mut segments: Vec<f32> = self.dash_array.iter().map(|&v| v as f32).collect();
            if segments.len() % 2 == 1 {
                segments.extend_from_within(..);
            }
            // All-zero arrays are rejected by StrokeDash and draw solid
            tiny_skia::StrokeDash::new(segments, self.dash_offset as f32)
        };

        tiny_skia::Stroke {
            width: self.width as f32,
            miter_limit: self.miter_limit as f32,
            line_cap: self.start_cap.into(),
            line_join: self.join.into(),
            dash,
        }
    }
}

/// Graphics state of a context.
#[derive(Debug, Clone)]
pub struct GraphicsState {
    pub comp_op: CompOp,
    pub global_alpha: f64,
    pub fill_alpha: f64,
    pub stroke_alpha: f64,
    pub fill_rule: FillRule,
    pub fill_style: Style,
    pub stroke_style: Style,
    pub stroke: StrokeOptions,
    pub meta_transform: Matrix2D,
    pub user_transform: Matrix2D,
    /// Device-space clip mask. `None` means no clipping.
    pub(crate) clip: Option<Rc<tiny_skia::Mask>>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            comp_op: CompOp::default(),
            global_alpha: 1.0,
            fill_alpha: 1.0,
            stroke_alpha: 1.0,
            fill_rule: FillRule::default(),
            fill_style: Style::default(),
            stroke_style: Style::default(),
            stroke: StrokeOptions::default(),
            meta_transform: Matrix2D::IDENTITY,
            user_transform: Matrix2D::IDENTITY,
            clip: None,
        }
    }
}

impl GraphicsState {
    /// User transform applied first, then the meta transform.
    pub fn final_transform(&self) -> Matrix2D {
        self.user_transform.then(&self.meta_transform)
    }

    pub fn has_clip(&self) -> bool {
        self.clip.is_some()
    }
}

/// Clamp an alpha value to `[0, 1]`, rejecting NaN.
pub(crate) fn checked_alpha(value: f64) -> ContextResult<f64> {
    if value.is_nan() {
        return Err(ContextError::InvalidValue("alpha is NaN".to_string()));
    }
    Ok(value.clamp(0.0, 1.0))
}

pub(crate) fn checked_finite(name: &str, value: f64) -> ContextResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ContextError::InvalidValue(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

pub(crate) fn checked_dash_array(segments: &[f64]) -> ContextResult<Vec<f64>> {
    if let Some(bad) = segments.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(ContextError::InvalidValue(format!(
            "dash segment must be finite and non-negative, got {}",
            bad
        )));
    }
    Ok(segments.to_vec())
}
