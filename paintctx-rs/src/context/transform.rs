//! Transform operations for Context.
//!
//! Operations act on the user transform and are applied before the existing
//! user transform, so `translate` followed by `scale` scales in translated
//! coordinates.

use super::Context;
use crate::error::{ContextError, ContextResult};
use crate::matrix::Matrix2D;

impl Context {
    fn pre_apply(&mut self, op: &str, matrix: Matrix2D) -> ContextResult<()> {
        self.ensure_attached()?;
        if !matrix.is_finite() {
            return Err(ContextError::InvalidValue(format!(
                "{} produced a non-finite matrix: {:?}",
                op, matrix
            )));
        }
        self.state.user_transform = matrix.then(&self.state.user_transform);
        Ok(())
    }

    /// Translate the user space.
    pub fn translate(&mut self, x: f64, y: f64) -> ContextResult<()> {
        log::debug!(target: "canvas", "translate {} {}", x, y);
        self.pre_apply("translate", Matrix2D::translation(x, y))
    }

    /// Scale the user space.
    pub fn scale(&mut self, x: f64, y: f64) -> ContextResult<()> {
        log::debug!(target: "canvas", "scale {} {}", x, y);
        self.pre_apply("scale", Matrix2D::scaling(x, y))
    }

    /// Rotate the user space by `angle` radians about the origin.
    pub fn rotate(&mut self, angle: f64) -> ContextResult<()> {
        log::debug!(target: "canvas", "rotate {}", angle);
        self.pre_apply("rotate", Matrix2D::rotation(angle))
    }

    /// Rotate the user space by `angle` radians about `(x, y)`.
    pub fn rotate_around(&mut self, angle: f64, x: f64, y: f64) -> ContextResult<()> {
        log::debug!(target: "canvas", "rotate_around {} {} {}", angle, x, y);
        self.pre_apply("rotate_around", Matrix2D::rotation_around(angle, x, y))
    }

    /// Skew the user space by angles `x` and `y` (radians).
    pub fn skew(&mut self, x: f64, y: f64) -> ContextResult<()> {
        log::debug!(target: "canvas", "skew {} {}", x, y);
        self.pre_apply("skew", Matrix2D::skewing(x, y))
    }

    /// Compose `matrix` with the user transform.
    pub fn apply_transform(&mut self, matrix: Matrix2D) -> ContextResult<()> {
        log::debug!(target: "canvas", "apply_transform {:?}", matrix);
        self.pre_apply("apply_transform", matrix)
    }

    /// Replace the user transform.
    pub fn set_transform(&mut self, matrix: Matrix2D) -> ContextResult<()> {
        log::debug!(target: "canvas", "set_transform {:?}", matrix);
        self.ensure_attached()?;
        if !matrix.is_finite() {
            return Err(ContextError::InvalidValue(format!(
                "transform matrix is not finite: {:?}",
                matrix
            )));
        }
        self.state.user_transform = matrix;
        Ok(())
    }

    /// Reset the user transform to identity. The meta transform is kept.
    pub fn reset_transform(&mut self) -> ContextResult<()> {
        log::debug!(target: "canvas", "reset_transform");
        self.ensure_attached()?;
        self.state.user_transform = Matrix2D::IDENTITY;
        Ok(())
    }

    /// Fold the user transform into the meta transform and reset the user
    /// transform to identity.
    pub fn user_to_meta(&mut self) -> ContextResult<()> {
        log::debug!(target: "canvas", "user_to_meta");
        self.ensure_attached()?;
        self.state.meta_transform = self.state.final_transform();
        self.state.user_transform = Matrix2D::IDENTITY;
        Ok(())
    }

    pub fn meta_transform(&self) -> Matrix2D {
        self.state.meta_transform
    }

    pub fn user_transform(&self) -> Matrix2D {
        self.state.user_transform
    }

    /// The transform from user space to device space.
    pub fn final_transform(&self) -> Matrix2D {
        self.state.final_transform()
    }
}
