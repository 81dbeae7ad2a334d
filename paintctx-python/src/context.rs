use crate::convert::{
    resolve_blit_dest, resolve_style, BlitDestArg, MatrixArg, PointArg, RectArg, RectIArg, StyleArg,
};
use crate::error::{to_py_err, IntoPyResult};
use crate::types::{
    PyCompOp, PyFillRule, PyFont, PyGradient, PyImage, PyMatrix2D, PyPath, PyPattern, PyStrokeCap,
    PyStrokeCapPosition, PyStrokeJoin,
};
use paintctx_rs::{Context, Point, StateCookie};
use pyo3::exceptions::{PyRuntimeError, PyTypeError};
use pyo3::prelude::*;

/// Drawing context bound to an `Image`.
///
/// Pending paint operations are flushed when the context is ended or
/// garbage collected. `with ctx:` saves the graphics state on entry and
/// restores it on exit.
#[pyclass(name = "Context", unsendable)]
pub struct PyContext {
    inner: Context,
    target: Option<Py<PyImage>>,
    scopes: Vec<StateCookie>,
}

impl PyContext {
    /// Copy flushed pixels into the target's backing array, if it has one.
    fn sync_target(&self, py: Python<'_>) -> PyResult<()> {
        match &self.target {
            Some(image) => image.bind(py).try_borrow()?.sync_array(py),
            None => Ok(()),
        }
    }
}

impl Drop for PyContext {
    fn drop(&mut self) {
        if self.target.is_none() {
            return;
        }
        Python::with_gil(|py| {
            if let Err(err) = self.end(py) {
                log::warn!("failed to end context on drop: {}", err);
            }
        });
    }
}

#[pymethods]
impl PyContext {
    #[new]
    #[pyo3(signature = (image=None))]
    fn new(image: Option<Bound<'_, PyImage>>) -> Self {
        let inner = match &image {
            Some(image) => Context::with_image(&image.borrow().inner),
            None => Context::new(),
        };
        Self {
            inner,
            target: image.map(Bound::unbind),
            scopes: Vec::new(),
        }
    }

    // --- Lifecycle ---

    fn begin(&mut self, py: Python<'_>, image: Bound<'_, PyImage>) -> PyResult<()> {
        self.end(py)?;
        self.inner.begin(&image.borrow().inner).into_py_result()?;
        self.target = Some(image.unbind());
        Ok(())
    }

    fn end(&mut self, py: Python<'_>) -> PyResult<()> {
        self.scopes.clear();
        let ended = self.inner.end().into_py_result();
        let synced = self.sync_target(py);
        self.target = None;
        ended.and(synced)
    }

    #[getter]
    fn is_attached(&self) -> bool {
        self.inner.is_attached()
    }

    fn flush(&mut self, py: Python<'_>) -> PyResult<()> {
        self.inner.flush().into_py_result()?;
        self.sync_target(py)
    }

    #[getter]
    fn pending_ops(&self) -> usize {
        self.inner.pending_ops()
    }

    fn save(&mut self) -> PyResult<()> {
        self.inner.save().into_py_result().map(|_| ())
    }

    fn restore(&mut self) -> PyResult<()> {
        self.inner.restore().into_py_result()
    }

    fn __enter__(mut slf: PyRefMut<'_, Self>) -> PyResult<PyRefMut<'_, Self>> {
        let cookie = slf.inner.save().into_py_result()?;
        slf.scopes.push(cookie);
        Ok(slf)
    }

    #[pyo3(signature = (exc_type=None, _exc_value=None, _traceback=None))]
    fn __exit__(
        &mut self,
        exc_type: Option<&Bound<'_, PyAny>>,
        _exc_value: Option<&Bound<'_, PyAny>>,
        _traceback: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<bool> {
        let Some(cookie) = self.scopes.pop() else {
            return Err(PyRuntimeError::new_err(
                "__exit__ called without a matching __enter__",
            ));
        };
        match self.inner.restore_to(cookie) {
            Ok(()) => Ok(false),
            // Keep the exception raised inside the block
            Err(err) if exc_type.is_some_and(|t| !t.is_none()) => {
                log::warn!("failed to restore state after exception: {}", err);
                Ok(false)
            }
            Err(err) => Err(to_py_err(err)),
        }
    }

    // --- Transform ---

    fn reset_transform(&mut self) -> PyResult<()> {
        self.inner.reset_transform().into_py_result()
    }

    fn rotate(&mut self, angle: f64) -> PyResult<()> {
        self.inner.rotate(angle).into_py_result()
    }

    fn rotate_around(&mut self, angle: f64, x: f64, y: f64) -> PyResult<()> {
        self.inner.rotate_around(angle, x, y).into_py_result()
    }

    fn scale(&mut self, x: f64, y: f64) -> PyResult<()> {
        self.inner.scale(x, y).into_py_result()
    }

    fn skew(&mut self, x: f64, y: f64) -> PyResult<()> {
        self.inner.skew(x, y).into_py_result()
    }

    fn translate(&mut self, x: f64, y: f64) -> PyResult<()> {
        self.inner.translate(x, y).into_py_result()
    }

    /// Replace the user transform with `matrix`.
    fn transform(&mut self, matrix: MatrixArg) -> PyResult<()> {
        self.inner.set_transform(matrix.into()).into_py_result()
    }

    fn set_transform(&mut self, matrix: MatrixArg) -> PyResult<()> {
        self.inner.set_transform(matrix.into()).into_py_result()
    }

    /// Multiply the user transform by `matrix`.
    fn apply_transform(&mut self, matrix: MatrixArg) -> PyResult<()> {
        self.inner.apply_transform(matrix.into()).into_py_result()
    }

    fn user_to_meta(&mut self) -> PyResult<()> {
        self.inner.user_to_meta().into_py_result()
    }

    fn get_meta_transform(&self) -> PyMatrix2D {
        self.inner.meta_transform().into()
    }

    fn get_user_transform(&self) -> PyMatrix2D {
        self.inner.user_transform().into()
    }

    // --- Paint state ---

    #[getter]
    fn comp_op(&self) -> PyCompOp {
        self.inner.comp_op().into()
    }

    #[setter(comp_op)]
    fn write_comp_op(&mut self, op: PyCompOp) -> PyResult<()> {
        self.set_comp_op(op)
    }

    fn set_comp_op(&mut self, op: PyCompOp) -> PyResult<()> {
        self.inner.set_comp_op(op.into()).into_py_result()
    }

    #[getter]
    fn global_alpha(&self) -> f64 {
        self.inner.global_alpha()
    }

    #[setter(global_alpha)]
    fn write_global_alpha(&mut self, alpha: f64) -> PyResult<()> {
        self.set_global_alpha(alpha)
    }

    fn set_global_alpha(&mut self, alpha: f64) -> PyResult<()> {
        self.inner.set_global_alpha(alpha).into_py_result()
    }

    #[getter]
    fn fill_alpha(&self) -> f64 {
        self.inner.fill_alpha()
    }

    #[setter(fill_alpha)]
    fn write_fill_alpha(&mut self, alpha: f64) -> PyResult<()> {
        self.set_fill_alpha(alpha)
    }

    fn set_fill_alpha(&mut self, alpha: f64) -> PyResult<()> {
        self.inner.set_fill_alpha(alpha).into_py_result()
    }

    #[getter]
    fn stroke_alpha(&self) -> f64 {
        self.inner.stroke_alpha()
    }

    #[setter(stroke_alpha)]
    fn write_stroke_alpha(&mut self, alpha: f64) -> PyResult<()> {
        self.set_stroke_alpha(alpha)
    }

    fn set_stroke_alpha(&mut self, alpha: f64) -> PyResult<()> {
        self.inner.set_stroke_alpha(alpha).into_py_result()
    }

    #[getter]
    fn fill_rule(&self) -> PyFillRule {
        self.inner.fill_rule().into()
    }

    #[setter(fill_rule)]
    fn write_fill_rule(&mut self, rule: PyFillRule) -> PyResult<()> {
        self.set_fill_rule(rule)
    }

    fn set_fill_rule(&mut self, rule: PyFillRule) -> PyResult<()> {
        self.inner.set_fill_rule(rule.into()).into_py_result()
    }

    /// Set the fill style to a color tuple, CSS color, `Gradient` or `Pattern`.
    #[pyo3(signature = (color=None, gradient=None, pattern=None))]
    fn set_fill_style(
        &mut self,
        color: Option<StyleArg>,
        gradient: Option<PyGradient>,
        pattern: Option<PyPattern>,
    ) -> PyResult<()> {
        let style = resolve_style(color, gradient, pattern)?;
        self.inner.set_fill_style(style).into_py_result()
    }

    /// Set the stroke style to a color tuple, CSS color, `Gradient` or `Pattern`.
    #[pyo3(signature = (color=None, gradient=None, pattern=None))]
    fn set_stroke_style(
        &mut self,
        color: Option<StyleArg>,
        gradient: Option<PyGradient>,
        pattern: Option<PyPattern>,
    ) -> PyResult<()> {
        let style = resolve_style(color, gradient, pattern)?;
        self.inner.set_stroke_style(style).into_py_result()
    }

    #[getter]
    fn stroke_width(&self) -> f64 {
        self.inner.stroke_width()
    }

    #[setter(stroke_width)]
    fn write_stroke_width(&mut self, width: f64) -> PyResult<()> {
        self.set_stroke_width(width)
    }

    fn set_stroke_width(&mut self, width: f64) -> PyResult<()> {
        self.inner.set_stroke_width(width).into_py_result()
    }

    #[getter]
    fn stroke_miter_limit(&self) -> f64 {
        self.inner.stroke_miter_limit()
    }

    #[setter(stroke_miter_limit)]
    fn write_stroke_miter_limit(&mut self, limit: f64) -> PyResult<()> {
        self.set_stroke_miter_limit(limit)
    }

    fn set_stroke_miter_limit(&mut self, limit: f64) -> PyResult<()> {
        self.inner.set_stroke_miter_limit(limit).into_py_result()
    }

    #[getter]
    fn stroke_join(&self) -> PyStrokeJoin {
        self.inner.stroke_join().into()
    }

    #[setter(stroke_join)]
    fn write_stroke_join(&mut self, join: PyStrokeJoin) -> PyResult<()> {
        self.set_stroke_join(join)
    }

    fn set_stroke_join(&mut self, join: PyStrokeJoin) -> PyResult<()> {
        self.inner.set_stroke_join(join.into()).into_py_result()
    }

    #[getter]
    fn stroke_dash_offset(&self) -> f64 {
        self.inner.stroke_dash_offset()
    }

    #[setter(stroke_dash_offset)]
    fn write_stroke_dash_offset(&mut self, offset: f64) -> PyResult<()> {
        self.set_stroke_dash_offset(offset)
    }

    fn set_stroke_dash_offset(&mut self, offset: f64) -> PyResult<()> {
        self.inner.set_stroke_dash_offset(offset).into_py_result()
    }

    fn set_stroke_cap(&mut self, position: PyStrokeCapPosition, cap: PyStrokeCap) -> PyResult<()> {
        self.inner
            .set_stroke_cap(position.into(), cap.into())
            .into_py_result()
    }

    fn set_stroke_caps(&mut self, cap: PyStrokeCap) -> PyResult<()> {
        self.inner.set_stroke_caps(cap.into()).into_py_result()
    }

    fn set_stroke_dash_array(&mut self, array: Vec<f64>) -> PyResult<()> {
        self.inner.set_stroke_dash_array(&array).into_py_result()
    }

    // --- Clipping ---

    fn clip_to_rect(&mut self, rect: RectArg) -> PyResult<()> {
        self.inner.clip_to_rect(rect.into()).into_py_result()
    }

    fn restore_clipping(&mut self) -> PyResult<()> {
        self.inner.restore_clipping().into_py_result()
    }

    // --- Drawing ---

    fn clear_all(&mut self) -> PyResult<()> {
        self.inner.clear_all().into_py_result()
    }

    fn fill_all(&mut self) -> PyResult<()> {
        self.inner.fill_all().into_py_result()
    }

    fn clear_rect(&mut self, rect: RectArg) -> PyResult<()> {
        self.inner.clear_rect(rect.into()).into_py_result()
    }

    fn fill_rect(&mut self, rect: RectArg) -> PyResult<()> {
        self.inner.fill_rect(rect.into()).into_py_result()
    }

    fn stroke_rect(&mut self, rect: RectArg) -> PyResult<()> {
        self.inner.stroke_rect(rect.into()).into_py_result()
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64) -> PyResult<()> {
        self.inner
            .fill_circle(Point::new(cx, cy), r)
            .into_py_result()
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64) -> PyResult<()> {
        self.inner
            .stroke_circle(Point::new(cx, cy), r)
            .into_py_result()
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> PyResult<()> {
        self.inner
            .fill_ellipse(Point::new(cx, cy), rx, ry)
            .into_py_result()
    }

    fn stroke_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> PyResult<()> {
        self.inner
            .stroke_ellipse(Point::new(cx, cy), rx, ry)
            .into_py_result()
    }

    fn fill_path(&mut self, path: PyRef<'_, PyPath>) -> PyResult<()> {
        self.inner.fill_path(&path.inner).into_py_result()
    }

    fn stroke_path(&mut self, path: PyRef<'_, PyPath>) -> PyResult<()> {
        self.inner.stroke_path(&path.inner).into_py_result()
    }

    fn fill_text(&mut self, pt: PointArg, font: PyRef<'_, PyFont>, text: &str) -> PyResult<()> {
        self.inner
            .fill_text(pt.into(), &font.inner, text)
            .into_py_result()
    }

    fn stroke_text(&mut self, pt: PointArg, font: PyRef<'_, PyFont>, text: &str) -> PyResult<()> {
        self.inner
            .stroke_text(pt.into(), &font.inner, text)
            .into_py_result()
    }

    /// Draw `image` at a point `pt` (unscaled) or into a rectangle `rect`
    /// (scaled), optionally restricted to the `area` of the source.
    #[pyo3(signature = (pt=None, image=None, area=None, *, rect=None))]
    fn blit_image(
        &mut self,
        pt: Option<BlitDestArg>,
        image: Option<PyRef<'_, PyImage>>,
        area: Option<RectIArg>,
        rect: Option<RectArg>,
    ) -> PyResult<()> {
        let dest = resolve_blit_dest(pt, rect)?;
        let image = image.ok_or_else(|| {
            PyTypeError::new_err("blit_image() missing required argument 'image'")
        })?;
        self.inner
            .blit_image(dest, &image.inner, area.map(Into::into))
            .into_py_result()
    }
}
